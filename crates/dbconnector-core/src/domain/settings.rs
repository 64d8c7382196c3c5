//! The closed set of connection setting names.
//!
//! Every value the attribute subsystem stores is keyed by one of four names:
//! `driver`, `host`, `db_name` and `win_auth`.  The set is fixed at compile
//! time; anything else is rejected on write.
//!
//! Maps keep plain `String` keys because the persisted document is
//! string-keyed JSON and may have been edited by hand.  [`SettingName`] is
//! the typed view used wherever the code needs to be sure a name is valid.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Setting name → value.  Used for the effective map and for default maps.
pub type SettingsMap = BTreeMap<String, String>;

/// Setting name → value for one user identity, holding only entries that
/// differ from the defaults.
pub type OverrideMap = BTreeMap<String, String>;

/// Returned when a string does not name one of the known settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown setting name: {0:?}")]
pub struct UnknownSettingName(pub String);

/// One of the four connection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SettingName {
    /// ODBC driver, e.g. `{ODBC Driver 17 for SQL Server}`.
    Driver,
    /// Server host (and instance), e.g. `HOST\SQLEXPRESS`.
    Host,
    /// Database (catalog) name.
    DbName,
    /// Whether to use Windows integrated authentication (`yes`/`no`).
    WinAuth,
}

impl SettingName {
    /// Every setting, in display order.
    pub const ALL: [SettingName; 4] = [
        SettingName::Driver,
        SettingName::Host,
        SettingName::DbName,
        SettingName::WinAuth,
    ];

    /// The key used in maps and in the persisted document.
    pub const fn as_str(self) -> &'static str {
        match self {
            SettingName::Driver => "driver",
            SettingName::Host => "host",
            SettingName::DbName => "db_name",
            SettingName::WinAuth => "win_auth",
        }
    }

    /// Returns `true` if `name` is one of the known setting keys.
    pub fn is_known(name: &str) -> bool {
        name.parse::<SettingName>().is_ok()
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingName {
    type Err = UnknownSettingName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingName::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| UnknownSettingName(s.to_string()))
    }
}
