//! Core type definitions used across the CareBridge workspace.

pub mod id;

pub use id::*;
