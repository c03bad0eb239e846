//! Profile controller and role-conditioned field visibility.

pub mod controller;

pub use controller::{ProfileController, visible_fields_for};
