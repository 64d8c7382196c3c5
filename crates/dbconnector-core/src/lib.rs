//! # dbconnector-core
//!
//! Shared domain types for DBConnectorPro's per-user connection settings.
//!
//! A database client keeps four named settings (`driver`, `host`,
//! `db_name`, `win_auth`).  Each has a built-in default; each user identity
//! may override some of them.  This crate defines:
//!
//! - **`domain::settings`** – the closed [`SettingName`] set and map aliases.
//! - **`domain::defaults`** – the immutable [`DefaultRegistry`].
//! - **`domain::policy`** – [`InitPolicy`], how the effective map is seeded.
//! - **`domain::overrides`** – merging layers and extracting the entries
//!   that differ from the defaults.
//!
//! Persistence and the session state machine live in the `dbconnector`
//! crate; this one has no I/O.

pub mod domain;

pub use domain::defaults::DefaultRegistry;
pub use domain::overrides::{compute_overrides, merge_layers, retain_known};
pub use domain::policy::InitPolicy;
pub use domain::settings::{OverrideMap, SettingName, SettingsMap, UnknownSettingName};
