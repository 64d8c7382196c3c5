//! Infrastructure layer.
//!
//! Contains the file-system adapters (attribute document, tool config) and
//! the connection-facing collaborator.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `dbconnector_core`, but MUST NOT be imported by the `application` layer.

pub mod connection;
pub mod storage;
