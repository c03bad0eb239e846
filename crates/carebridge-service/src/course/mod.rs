//! Course player: section tree, lesson detail and completion progress.

pub mod outline;
pub mod player;

pub use outline::{SectionLessons, SectionOutline};
pub use player::CoursePlayer;
