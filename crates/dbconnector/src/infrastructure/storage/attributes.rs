//! JSON file backend for the attribute document.
//!
//! The document is written pretty-printed with four-space indentation so it
//! stays easy to inspect and hand-edit:
//!
//! ```json
//! {
//!     "emp_exercise_1": {
//!         "driver": "{ODBC Driver 17 for SQL Server}"
//!     }
//! }
//! ```
//!
//! The file is opened only for the duration of a single read or write.  A
//! missing file reads as an empty document; the parent directory is created
//! when the store is opened and again before every save.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::application::error::StoreError;
use crate::application::store::{AttributeDocument, AttributeStore};

/// File name used when no path is configured.
pub const DEFAULT_ATTRIBUTES_FILE: &str = "excer_sql_attributes.json";

const INDENT: &[u8] = b"    ";

/// [`AttributeStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens a store at `path`, creating its parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        store.ensure_parent_dir()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                std::fs::create_dir_all(dir).map_err(|source| StoreError::Write {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }
}

impl AttributeStore for JsonFileStore {
    fn load(&self) -> Result<AttributeDocument, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let document = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })?;
                debug!(path = %self.path.display(), "attribute document loaded");
                Ok(document)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AttributeDocument::new()),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, document: &AttributeDocument) -> Result<(), StoreError> {
        self.ensure_parent_dir()?;

        let mut content = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut content, formatter);
        document
            .serialize(&mut serializer)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        std::fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "attribute document saved");
        Ok(())
    }
}
