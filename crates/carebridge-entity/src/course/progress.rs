//! Per-user course progress.

use serde::{Deserialize, Serialize};

use carebridge_core::types::LessonId;

use crate::reference::EntityRef;

/// Completion state of one user in one course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    /// Lessons the user has completed.
    #[serde(default)]
    pub completed_lessons: Vec<EntityRef>,
    /// Server-computed completion percentage.
    #[serde(default)]
    pub progress: f64,
}

impl CourseProgress {
    /// Check whether a lesson is in the completed set.
    pub fn is_completed(&self, lesson_id: &LessonId) -> bool {
        self.completed_lessons
            .iter()
            .any(|r| r.id() == lesson_id.as_str())
    }

    /// Completion percentage rounded and clamped to 0..=100.
    pub fn percent(&self) -> u8 {
        if !self.progress.is_finite() {
            return 0;
        }
        self.progress.round().clamp(0.0, 100.0) as u8
    }

    /// Percentage as displayed, e.g. `"42%"`.
    pub fn label(&self) -> String {
        format!("{}%", self.percent())
    }
}

/// Body of `PUT /api/courses/:id/progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    /// The lesson being marked.
    pub lesson_id: LessonId,
    /// Always `true` from this client; there is no un-complete path.
    pub is_completed: bool,
}

impl ProgressUpdate {
    /// Build the body that marks a lesson complete.
    pub fn complete(lesson_id: LessonId) -> Self {
        Self {
            lesson_id,
            is_completed: true,
        }
    }
}
