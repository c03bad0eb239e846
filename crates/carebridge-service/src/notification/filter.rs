//! Client-side notification filtering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use carebridge_core::AppError;
use carebridge_entity::notification::{Notification, NotificationType};

/// Filter on notification type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeFilter {
    /// Every type.
    #[default]
    All,
    /// A single type.
    Only(NotificationType),
}

impl TypeFilter {
    /// Check whether a notification type passes.
    pub fn accepts(&self, kind: NotificationType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == kind,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// The pair of predicates applied to the notification list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFilter {
    /// Type predicate.
    pub kind: TypeFilter,
    /// Whether read notifications are included.
    pub show_read: bool,
}

impl Default for NotificationFilter {
    fn default() -> Self {
        Self {
            kind: TypeFilter::All,
            show_read: true,
        }
    }
}

impl NotificationFilter {
    /// Check whether a notification passes both predicates.
    pub fn matches(&self, notification: &Notification) -> bool {
        self.kind.accepts(notification.kind) && (self.show_read || !notification.read)
    }

    /// The matching subset, in list order.
    pub fn apply<'a>(&self, items: &'a [Notification]) -> Vec<&'a Notification> {
        items.iter().filter(|n| self.matches(n)).collect()
    }
}
