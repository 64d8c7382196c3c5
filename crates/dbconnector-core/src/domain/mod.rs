//! Domain entities for the connection attribute subsystem.
//!
//! This module contains pure rules with no file-system or process access:
//! which setting names exist, what their defaults are, how the effective
//! map is layered, and which entries count as overrides worth persisting.
//! Everything here can be unit-tested without touching the disk.

pub mod defaults;
pub mod overrides;
pub mod policy;
pub mod settings;
