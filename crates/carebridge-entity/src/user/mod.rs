//! User profile domain entities.

pub mod fields;
pub mod form;
pub mod model;
pub mod role;

pub use fields::{FieldGroup, ProfileField};
pub use form::ProfileForm;
pub use model::{AvatarResponse, UserProfile};
pub use role::UserRole;
