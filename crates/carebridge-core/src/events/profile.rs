//! Profile events.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Events emitted by the profile controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProfileEvent {
    /// Profile text fields were saved.
    Updated {
        /// The user whose profile changed.
        user_id: UserId,
    },
    /// A new avatar was uploaded.
    AvatarChanged {
        /// The user whose avatar changed.
        user_id: UserId,
        /// URL of the new avatar, if the server returned one.
        avatar: Option<String>,
    },
}
