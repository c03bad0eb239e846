//! Collaboration-request review controller.

pub mod controller;

pub use controller::CollaborationController;
