//! Core traits defined in `carebridge-core` and implemented by other crates.

pub mod toaster;

pub use toaster::{Toast, ToastLevel, Toaster};
