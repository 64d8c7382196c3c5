//! Storage infrastructure: file persistence.
//!
//! - `attributes` – the JSON attribute document, one entry per user
//!   identity, implementing the application's `AttributeStore` port.
//! - `config` – the optional TOML configuration of the command-line tool.

pub mod attributes;
pub mod config;
