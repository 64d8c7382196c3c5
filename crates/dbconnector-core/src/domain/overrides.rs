//! Override computation and layer merging.
//!
//! # Layers (for beginners)
//!
//! The value a caller sees for a setting comes from stacking maps on top of
//! each other, later layers winning.  Once a user identity is active:
//!
//! ```text
//! defaults  ──►  initial values  ──►  stored overrides
//! ```
//!
//! Going the other way, [`compute_overrides`] strips from an effective map
//! every entry equal to its default, leaving only what is worth persisting.

use tracing::warn;

use crate::domain::defaults::DefaultRegistry;
use crate::domain::settings::{OverrideMap, SettingName, SettingsMap};

/// Returns the entries of `effective` whose value differs from the default.
///
/// Names outside the default map are dropped; they can never be valid
/// overrides.
pub fn compute_overrides(effective: &SettingsMap, defaults: &DefaultRegistry) -> OverrideMap {
    effective
        .iter()
        .filter(|(name, value)| {
            defaults
                .get(name)
                .is_some_and(|default| default != value.as_str())
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Merges `layers` in order into a single map; later layers win.
pub fn merge_layers<'a, I>(layers: I) -> SettingsMap
where
    I: IntoIterator<Item = &'a SettingsMap>,
{
    let mut merged = SettingsMap::new();
    for layer in layers {
        merged.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

/// Drops entries whose key is not a known setting name.
///
/// Stored documents are plain JSON and may carry stray keys; they are logged
/// and ignored rather than loaded into the effective map.
pub fn retain_known(identity: &str, mut overrides: OverrideMap) -> OverrideMap {
    overrides.retain(|name, _| {
        let known = SettingName::is_known(name);
        if !known {
            warn!(identity, setting = %name, "ignoring unknown stored setting");
        }
        known
    });
    overrides
}
