//! UserSession: the active user identity and its persisted overrides.
//!
//! The session owns the [`AttributeStore`] and a lazily loaded copy of the
//! attribute document.  It is a small state machine over one variable:
//!
//! ```text
//!  unset ──set_active_identity(a)──► a ──set_active_identity(b)──► b ...
//!                                     │
//!                              flush a's overrides
//! ```
//!
//! # Flush policy
//!
//! Every flush reloads the document from the store first, so edits made to
//! the file by someone else between two saves are merged rather than
//! overwritten.  Only entries that differ from the defaults are written.  If
//! nothing differs, the store is left untouched: an identity's previously
//! saved entry is never deleted by a flush.
//!
//! # Binding
//!
//! A session is unusable until a resolver binds it (the resolver hands over
//! the [`DefaultRegistry`] the session diffs against).  Any operation on an
//! unbound session fails with [`AttributeError::SessionNotBound`].

use dbconnector_core::{compute_overrides, retain_known, DefaultRegistry, OverrideMap, SettingsMap};
use tracing::{debug, info};

use crate::application::error::AttributeError;
use crate::application::store::{AttributeDocument, AttributeStore};

/// Active identity plus the document cache it reads from.
pub struct UserSession<S> {
    store: S,
    document: Option<AttributeDocument>,
    active_identity: Option<String>,
    defaults: Option<DefaultRegistry>,
}

impl<S: AttributeStore> UserSession<S> {
    /// Creates an unbound session with no active identity.
    ///
    /// The document is not read until it is first needed.
    pub fn new(store: S) -> Self {
        Self {
            store,
            document: None,
            active_identity: None,
            defaults: None,
        }
    }

    /// Called by the resolver when it binds this session.
    pub(crate) fn attach(&mut self, defaults: DefaultRegistry) {
        self.defaults = Some(defaults);
    }

    /// The identity whose overrides are currently loaded, if any.
    pub fn active_identity(&self) -> Option<&str> {
        self.active_identity.as_deref()
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the stored overrides for `identity`, or an empty map if it has
    /// no entry.  Unknown setting names in the stored entry are dropped.
    ///
    /// # Errors
    ///
    /// [`AttributeError::SessionNotBound`] before a resolver is bound;
    /// [`AttributeError::Store`] if the document cannot be loaded.
    pub fn load_overrides(&mut self, identity: &str) -> Result<OverrideMap, AttributeError> {
        self.bound_defaults()?;
        let stored = self
            .document()?
            .get(identity)
            .cloned()
            .unwrap_or_default();
        Ok(retain_known(identity, stored))
    }

    /// Persists the overrides contained in `effective` for the active
    /// identity.  Does nothing when no identity is active.
    ///
    /// # Errors
    ///
    /// [`AttributeError::SessionNotBound`] before a resolver is bound;
    /// [`AttributeError::Store`] if reloading or writing the document fails.
    pub fn save_overrides(&mut self, effective: &SettingsMap) -> Result<(), AttributeError> {
        let overrides = compute_overrides(effective, self.bound_defaults()?);
        let Some(identity) = self.active_identity.clone() else {
            return Ok(());
        };

        let mut document = self.store.load()?;
        if overrides.is_empty() {
            debug!(%identity, "no overrides to persist");
            self.document = Some(document);
            return Ok(());
        }

        debug!(%identity, count = overrides.len(), "persisting overrides");
        document.insert(identity, overrides);
        self.store.save(&document)?;
        self.document = Some(document);
        Ok(())
    }

    /// Makes `identity` the active identity and returns its stored overrides.
    ///
    /// If another identity was active, its overrides (computed from
    /// `outgoing`, the effective map being replaced) are flushed first.  When
    /// the flush fails the active identity is left unchanged.
    ///
    /// # Errors
    ///
    /// [`AttributeError::SessionNotBound`] before a resolver is bound;
    /// [`AttributeError::Store`] if flushing or loading fails.
    pub fn set_active_identity(
        &mut self,
        identity: impl Into<String>,
        outgoing: &SettingsMap,
    ) -> Result<OverrideMap, AttributeError> {
        self.bound_defaults()?;
        let identity = identity.into();

        if let Some(previous) = self.active_identity.as_deref() {
            info!(from = previous, to = %identity, "switching user identity");
            self.save_overrides(outgoing)?;
        } else {
            debug!(%identity, "activating user identity");
        }

        self.active_identity = Some(identity.clone());
        self.load_overrides(&identity)
    }

    fn bound_defaults(&self) -> Result<&DefaultRegistry, AttributeError> {
        self.defaults
            .as_ref()
            .ok_or(AttributeError::SessionNotBound("no resolver bound to the session"))
    }

    /// Returns the cached document, loading it on first access.
    fn document(&mut self) -> Result<&AttributeDocument, AttributeError> {
        let document = match self.document.take() {
            Some(document) => document,
            None => {
                debug!("loading attribute document");
                self.store.load()?
            }
        };
        Ok(self.document.insert(document))
    }
}
