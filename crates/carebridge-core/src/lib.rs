//! # carebridge-core
//!
//! Core crate for the CareBridge client. Contains the configuration schema,
//! typed identifiers, domain events and the in-process event bus, the toast
//! sink trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other CareBridge crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use events::EventBus;
pub use result::AppResult;
