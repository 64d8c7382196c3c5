//! Connection-facing collaborator: turns resolved settings into an ODBC
//! connection string.
//!
//! [`DbConnection`] wires a [`UserSession`] and an [`AttributeResolver`]
//! together, exposes the named accessors through [`ConnectionAttributes`],
//! and rebuilds its cached connection string whenever the settings change.
//! Opening the connection and running queries are left to the caller.

use std::path::PathBuf;

use dbconnector_core::{DefaultRegistry, InitPolicy, SettingsMap};
use tracing::debug;

use crate::application::connection_attributes::ConnectionAttributes;
use crate::application::error::AttributeError;
use crate::application::resolver::AttributeResolver;
use crate::application::store::AttributeStore;
use crate::application::user_session::UserSession;
use crate::infrastructure::storage::attributes::JsonFileStore;

/// Resolved connection settings plus the connection string derived from them.
pub struct DbConnection<S> {
    resolver: AttributeResolver<S>,
    connection_string: String,
}

impl DbConnection<JsonFileStore> {
    /// Opens a connection backed by the JSON document at `path`, using the
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// [`AttributeError::Store`] if the document's directory cannot be
    /// created; [`AttributeError::UnknownSetting`] for bad initial values.
    pub fn open(
        path: impl Into<PathBuf>,
        policy: InitPolicy,
        initial_values: SettingsMap,
    ) -> Result<Self, AttributeError> {
        let store = JsonFileStore::open(path)?;
        Self::new(store, DefaultRegistry::default(), policy, initial_values)
    }
}

impl<S: AttributeStore> DbConnection<S> {
    /// Creates the session and resolver over `store` and binds them.
    ///
    /// # Errors
    ///
    /// [`AttributeError::UnknownSetting`] for bad initial values.
    pub fn new(
        store: S,
        defaults: DefaultRegistry,
        policy: InitPolicy,
        initial_values: SettingsMap,
    ) -> Result<Self, AttributeError> {
        let mut resolver = AttributeResolver::new(defaults, policy, initial_values)?;
        resolver.bind_session(UserSession::new(store));

        let mut connection = Self {
            resolver,
            connection_string: String::new(),
        };
        connection.parameters_changed();
        Ok(connection)
    }

    /// Activates `identity`, loading its stored settings.
    ///
    /// # Errors
    ///
    /// See [`AttributeResolver::set_active_identity`].
    pub fn set_user(&mut self, identity: impl Into<String>) -> Result<(), AttributeError> {
        self.resolver.set_active_identity(identity)?;
        self.parameters_changed();
        Ok(())
    }

    /// The connection string for the current settings.
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl<S: AttributeStore> ConnectionAttributes for DbConnection<S> {
    type Store = S;

    fn resolver(&self) -> &AttributeResolver<S> {
        &self.resolver
    }

    fn resolver_mut(&mut self) -> &mut AttributeResolver<S> {
        &mut self.resolver
    }

    fn parameters_changed(&mut self) {
        self.connection_string = build_connection_string(&*self);
        debug!(connection_string = %self.connection_string, "connection parameters changed");
    }
}

/// Formats the ODBC connection string for `attributes`.
pub fn build_connection_string(attributes: &impl ConnectionAttributes) -> String {
    format!(
        "Driver={}; Server={}; database={}; Trusted_Connection={}",
        attributes.driver(),
        attributes.host(),
        attributes.db_name(),
        attributes.win_auth()
    )
}
