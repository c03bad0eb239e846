//! Course-progress events.

use serde::{Deserialize, Serialize};

use crate::types::{CourseId, LessonId};

/// Events emitted by the course player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CourseEvent {
    /// A lesson was marked complete and progress re-fetched.
    LessonCompleted {
        /// The course the lesson belongs to.
        course_id: CourseId,
        /// The completed lesson.
        lesson_id: LessonId,
        /// Server-reported completion percentage after the write.
        progress: u8,
    },
}
