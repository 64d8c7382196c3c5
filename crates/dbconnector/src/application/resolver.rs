//! AttributeResolver: effective settings for the active session.
//!
//! Reads resolve against the in-memory effective map first and the defaults
//! second.  Writes are validated against the default map's key set, applied
//! in memory, and immediately persisted through the bound [`UserSession`].
//!
//! # Write-through (for beginners)
//!
//! There is no batching.  Every [`AttributeResolver::set`] performs a full
//! read-modify-write cycle of the attribute document:
//!
//! ```text
//! set(name, value)
//!  └─ effective[name] = value
//!  └─ session.save_overrides(effective)
//!       ├─ reload document from store
//!       ├─ overrides = effective − defaults
//!       └─ write document if overrides is non-empty
//! ```
//!
//! The document is tiny, and a change is never held only in memory for
//! longer than the call that made it.
//!
//! If the final write fails the value stays applied in memory; the caller
//! receives the [`AttributeError::Store`] error and must treat the change as
//! not durable.

use dbconnector_core::{merge_layers, DefaultRegistry, InitPolicy, SettingName, SettingsMap};
use tracing::debug;

use crate::application::error::AttributeError;
use crate::application::store::AttributeStore;
use crate::application::user_session::UserSession;

/// In-memory effective settings backed by a [`UserSession`].
pub struct AttributeResolver<S> {
    defaults: DefaultRegistry,
    policy: InitPolicy,
    initial_values: SettingsMap,
    effective: SettingsMap,
    session: Option<UserSession<S>>,
}

impl<S: AttributeStore> AttributeResolver<S> {
    /// Creates an unbound resolver.
    ///
    /// Until a session is bound the effective map is the defaults merged with
    /// `initial_values`.
    ///
    /// # Errors
    ///
    /// [`AttributeError::UnknownSetting`] if `initial_values` names a setting
    /// outside the default map.
    pub fn new(
        defaults: DefaultRegistry,
        policy: InitPolicy,
        initial_values: SettingsMap,
    ) -> Result<Self, AttributeError> {
        if let Some(name) = initial_values.keys().find(|k| !defaults.contains(k)) {
            return Err(AttributeError::UnknownSetting { name: name.clone() });
        }
        let effective = merge_layers([defaults.get_defaults(), &initial_values]);
        Ok(Self {
            defaults,
            policy,
            initial_values,
            effective,
            session: None,
        })
    }

    /// Binds `session` to this resolver and seeds the effective map according
    /// to the [`InitPolicy`].
    pub fn bind_session(&mut self, mut session: UserSession<S>) {
        session.attach(self.defaults.clone());

        self.effective = match self.policy {
            InitPolicy::ForceDefaults => {
                merge_layers([self.defaults.get_defaults(), &self.initial_values])
            }
            // An unbound session cannot have an active identity, so there is
            // no stored layer yet.
            InitPolicy::ForceStored => self.initial_values.clone(),
            InitPolicy::AutoMerge => {
                merge_layers([self.defaults.get_defaults(), &self.initial_values])
            }
        };

        debug!(policy = ?self.policy, "session bound to resolver");
        self.session = Some(session);
    }

    /// The bound session, if any.
    pub fn session(&self) -> Option<&UserSession<S>> {
        self.session.as_ref()
    }

    /// The active identity of the bound session, if any.
    pub fn active_identity(&self) -> Option<&str> {
        self.session.as_ref().and_then(UserSession::active_identity)
    }

    /// Activates `identity` on the bound session and recomputes the effective
    /// map as defaults ← initial values ← stored overrides, so whatever the
    /// identity saved earlier is shown again.
    ///
    /// # Errors
    ///
    /// [`AttributeError::SessionNotBound`] if no session is bound;
    /// [`AttributeError::Store`] if flushing the previous identity or loading
    /// the new one fails.
    pub fn set_active_identity(&mut self, identity: impl Into<String>) -> Result<(), AttributeError> {
        let session = self
            .session
            .as_mut()
            .ok_or(AttributeError::SessionNotBound("no session bound to the resolver"))?;
        let stored = session.set_active_identity(identity, &self.effective)?;
        self.effective = merge_layers([
            self.defaults.get_defaults(),
            &self.initial_values,
            &stored,
        ]);
        Ok(())
    }

    /// Returns the effective value for `name`: the in-memory value if present,
    /// the default otherwise.  `None` for names outside the setting set.
    pub fn get(&self, name: &str) -> Option<&str> {
        if !self.defaults.contains(name) {
            return None;
        }
        self.effective
            .get(name)
            .map(String::as_str)
            .or_else(|| self.defaults.get(name))
    }

    /// Typed variant of [`get`](Self::get); never fails.
    pub fn value(&self, name: SettingName) -> &str {
        self.get(name.as_str())
            .unwrap_or_else(|| self.defaults.value(name))
    }

    /// Returns every setting with its effective value.
    pub fn snapshot(&self) -> SettingsMap {
        SettingName::ALL
            .into_iter()
            .map(|name| (name.as_str().to_string(), self.value(name).to_string()))
            .collect()
    }

    /// Sets `name` to `value` and persists the active identity's overrides.
    ///
    /// # Errors
    ///
    /// - [`AttributeError::UnknownSetting`] for names outside the default map;
    ///   nothing is changed.
    /// - [`AttributeError::SessionNotBound`] if no session is bound or no
    ///   identity is active; nothing is changed.
    /// - [`AttributeError::Store`] if persisting fails; the value remains
    ///   applied in memory.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), AttributeError> {
        if !self.defaults.contains(name) {
            return Err(AttributeError::UnknownSetting {
                name: name.to_string(),
            });
        }
        self.writable_session()?;

        self.effective.insert(name.to_string(), value.into());
        self.persist()
    }

    /// Replaces the effective map with a fresh copy of the defaults and
    /// persists.
    ///
    /// The resulting override map is empty, so nothing is written and any
    /// previously stored entry for the identity stays as it is.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set), minus `UnknownSetting`.
    pub fn reset_to_defaults(&mut self) -> Result<(), AttributeError> {
        self.writable_session()?;
        self.effective = self.defaults.get_defaults().clone();
        self.persist()
    }

    /// Persists the current overrides of the active identity.
    ///
    /// # Errors
    ///
    /// [`AttributeError::SessionNotBound`] if no session is bound or no
    /// identity is active; [`AttributeError::Store`] if persisting fails.
    pub fn save(&mut self) -> Result<(), AttributeError> {
        self.writable_session()?;
        self.persist()
    }

    fn writable_session(&self) -> Result<(), AttributeError> {
        let session = self
            .session
            .as_ref()
            .ok_or(AttributeError::SessionNotBound("no session bound to the resolver"))?;
        if session.active_identity().is_none() {
            return Err(AttributeError::SessionNotBound("no active user identity"));
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<(), AttributeError> {
        match self.session.as_mut() {
            Some(session) => session.save_overrides(&self.effective),
            None => Err(AttributeError::SessionNotBound("no session bound to the resolver")),
        }
    }
}
