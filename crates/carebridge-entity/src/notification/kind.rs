//! Notification type enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use carebridge_core::AppError;

/// The event category a notification was created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// A professional asked to collaborate on a student.
    CollaborationRequest,
    /// Someone asked for access to a course.
    CourseAccessRequest,
    /// Something happened in a course the user follows.
    CourseActivity,
    /// Something happened for a student the user is linked to.
    StudentActivity,
    /// Platform-wide message.
    System,
}

impl NotificationType {
    /// Every notification type, in display order.
    pub const ALL: [NotificationType; 5] = [
        Self::CollaborationRequest,
        Self::CourseAccessRequest,
        Self::CourseActivity,
        Self::StudentActivity,
        Self::System,
    ];

    /// Return the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CollaborationRequest => "collaboration_request",
            Self::CourseAccessRequest => "course_access_request",
            Self::CourseActivity => "course_activity",
            Self::StudentActivity => "student_activity",
            Self::System => "system",
        }
    }

    /// Short label for list views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CollaborationRequest => "Collaboration",
            Self::CourseAccessRequest => "Course access",
            Self::CourseActivity => "Course",
            Self::StudentActivity => "Student",
            Self::System => "System",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid notification type: '{s}'. Expected one of: collaboration_request, \
                     course_access_request, course_activity, student_activity, system"
                ))
            })
    }
}
