//! The attribute storage port.
//!
//! The application layer only needs two things from persistent storage: read
//! the whole document, and overwrite the whole document.  [`AttributeStore`]
//! captures exactly that, so the session can be tested against a mock and the
//! JSON file backend lives in `infrastructure::storage`.

use std::collections::BTreeMap;

use dbconnector_core::OverrideMap;
use serde::{Deserialize, Serialize};

use crate::application::error::StoreError;

/// The persisted document: user identity → override map.
///
/// Serialized transparently, so on disk it is a plain JSON object:
///
/// ```json
/// {
///     "alice": {
///         "db_name": "sales"
///     }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeDocument {
    users: BTreeMap<String, OverrideMap>,
}

impl AttributeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored overrides for `identity`, if it has an entry.
    pub fn get(&self, identity: &str) -> Option<&OverrideMap> {
        self.users.get(identity)
    }

    /// Replaces the entry for `identity`.
    pub fn insert(&mut self, identity: impl Into<String>, overrides: OverrideMap) {
        self.users.insert(identity.into(), overrides);
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Whole-document persistence for per-user overrides.
#[cfg_attr(test, mockall::automock)]
pub trait AttributeStore {
    /// Reads the document; a missing backing file yields an empty document.
    ///
    /// # Errors
    ///
    /// [`StoreError::Corrupt`] if the stored data is not a valid document,
    /// [`StoreError::Read`] for other I/O failures.
    fn load(&self) -> Result<AttributeDocument, StoreError>;

    /// Overwrites the stored document with `document`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Write`] on I/O failure.
    fn save(&self, document: &AttributeDocument) -> Result<(), StoreError>;
}
