//! Initialisation policy for the effective settings map.

use serde::{Deserialize, Serialize};

/// How the resolver seeds its effective map when it is first bound to a
/// session.
///
/// At bind time, caller-supplied initial values win over the other layer.
/// Identity switches afterwards always re-merge as defaults, then initial
/// values, then the incoming identity's stored overrides, whatever the
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InitPolicy {
    /// Defaults + initial values; stored overrides are ignored at init.
    #[serde(rename = "defaults")]
    ForceDefaults,
    /// Stored overrides of the active identity + initial values.
    #[serde(rename = "stored")]
    ForceStored,
    /// Defaults + initial values, independent of any identity.
    #[default]
    #[serde(rename = "auto")]
    AutoMerge,
}
