//! Application layer: the attribute-resolution and persistence use cases.
//!
//! # Sub-modules
//!
//! - **`store`** – The [`AttributeStore`](store::AttributeStore) port and the
//!   persisted [`AttributeDocument`](store::AttributeDocument).
//! - **`user_session`** – Which user identity is active; flushes the outgoing
//!   identity's overrides and loads the incoming one's.
//! - **`resolver`** – Effective settings, write-through on every change.
//! - **`connection_attributes`** – Named accessors for connection-facing
//!   types, plus the parameters-changed hook.
//! - **`error`** – The error taxonomy shared by all of the above.
//!
//! Nothing here touches the file system directly; the JSON backend lives in
//! `infrastructure::storage`.

pub mod connection_attributes;
pub mod error;
pub mod resolver;
pub mod store;
pub mod user_session;
