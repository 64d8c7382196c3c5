//! dbconnector library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does dbconnector do? (for beginners)
//!
//! A database client needs four settings to connect: the ODBC driver, the
//! host, the database name and whether to use Windows authentication.  Each
//! has a built-in default.  Several people may share one machine, so each
//! user identity can override some of them; the overrides are kept in a
//! small JSON file keyed by identity.
//!
//! The moving parts:
//!
//! 1. `JsonFileStore` reads and writes that file.
//! 2. `UserSession` tracks which identity is active and flushes its
//!    overrides when another one takes over.
//! 3. `AttributeResolver` answers reads (override, else default) and writes
//!    every change straight through to the file.
//! 4. `DbConnection` exposes named accessors and keeps an ODBC connection
//!    string in sync with the settings.

pub mod application;
pub mod infrastructure;

pub use application::connection_attributes::ConnectionAttributes;
pub use application::error::{AttributeError, StoreError};
pub use application::resolver::AttributeResolver;
pub use application::store::{AttributeDocument, AttributeStore};
pub use application::user_session::UserSession;
pub use infrastructure::connection::DbConnection;
pub use infrastructure::storage::attributes::{JsonFileStore, DEFAULT_ATTRIBUTES_FILE};
