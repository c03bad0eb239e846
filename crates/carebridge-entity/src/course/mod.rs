//! Course, section, lesson and progress entities.

pub mod lesson;
pub mod progress;
pub mod section;

pub use lesson::{Attachment, Lesson, LessonContent, LessonType};
pub use progress::{CourseProgress, ProgressUpdate};
pub use section::Section;
