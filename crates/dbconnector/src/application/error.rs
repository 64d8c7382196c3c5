//! Error types for the attribute store, session and resolver.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for attribute document persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document exists but is not a user → (setting → value) mapping.
    #[error("attribute document at {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Reading the document failed for a reason other than "not found".
    #[error("I/O error reading attribute document at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating the directory or writing the document failed.
    #[error("I/O error writing attribute document at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialized.
    #[error("failed to serialize attribute document: {0}")]
    Serialize(String),
}

/// Error type for session and resolver operations.
#[derive(Debug, Error)]
pub enum AttributeError {
    /// A write named a setting outside the default map.
    #[error("unknown setting {name:?}: expected one of driver, host, db_name, win_auth")]
    UnknownSetting { name: String },

    /// The session/resolver wiring is incomplete for the requested operation.
    #[error("session not bound: {0}")]
    SessionNotBound(&'static str),

    /// Loading or saving the attribute document failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
