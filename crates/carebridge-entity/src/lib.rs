//! # carebridge-entity
//!
//! Domain entity models for the CareBridge client. Every struct in this
//! crate mirrors a backend document or a request body as it travels over
//! the REST API. All entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`, and use the backend's camelCase field names.

pub mod collaboration;
pub mod course;
pub mod notification;
pub mod reference;
pub mod user;

pub use reference::EntityRef;
