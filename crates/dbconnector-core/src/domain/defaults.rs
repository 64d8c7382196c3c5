//! DefaultRegistry: the immutable setting-name → default-value mapping.
//!
//! The registry is built once at startup and never changes afterwards.  It
//! always holds exactly one value for every [`SettingName`], so lookups by
//! typed name cannot fail.  Its key set is also the authority on which names
//! a write may use.

use crate::domain::settings::{SettingName, SettingsMap};

const DEFAULT_DRIVER: &str = "{SQL SERVER}";
const DEFAULT_HOST: &str = r"FRITTE2\SQLEXPRESS";
const DEFAULT_DB_NAME: &str = "employees";
const DEFAULT_WIN_AUTH: &str = "yes";

/// Fixed default values for all connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRegistry {
    values: SettingsMap,
}

impl DefaultRegistry {
    /// Builds a registry from one value per setting.
    pub fn new(
        driver: impl Into<String>,
        host: impl Into<String>,
        db_name: impl Into<String>,
        win_auth: impl Into<String>,
    ) -> Self {
        let values = [
            (SettingName::Driver, driver.into()),
            (SettingName::Host, host.into()),
            (SettingName::DbName, db_name.into()),
            (SettingName::WinAuth, win_auth.into()),
        ]
        .into_iter()
        .map(|(name, value)| (name.as_str().to_string(), value))
        .collect();
        Self { values }
    }

    /// Returns the full default map.
    pub fn get_defaults(&self) -> &SettingsMap {
        &self.values
    }

    /// Returns the default for a typed setting name.
    pub fn value(&self, name: SettingName) -> &str {
        self.values
            .get(name.as_str())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Looks up a default by raw key; `None` for names outside the set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns `true` if `name` is a key of the default map.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

impl Default for DefaultRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_DRIVER,
            DEFAULT_HOST,
            DEFAULT_DB_NAME,
            DEFAULT_WIN_AUTH,
        )
    }
}
