//! Section tree of an opened course.

use serde::Serialize;

use carebridge_core::types::LessonId;
use carebridge_entity::course::{Lesson, Section};

/// Result of fetching one section's lessons.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum SectionLessons {
    /// Lessons sorted by `order`.
    Loaded(Vec<Lesson>),
    /// The fetch failed; carries the error message.
    Failed(String),
}

impl SectionLessons {
    /// Lessons, empty when the fetch failed.
    pub fn lessons(&self) -> &[Lesson] {
        match self {
            Self::Loaded(lessons) => lessons,
            Self::Failed(_) => &[],
        }
    }

    /// Check whether the fetch failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A section with its lessons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionOutline {
    /// The section.
    pub section: Section,
    /// Its lessons, or why they are missing.
    pub lessons: SectionLessons,
}

impl SectionOutline {
    /// Build an outline entry, sorting loaded lessons by `order`.
    pub fn new(section: Section, lessons: SectionLessons) -> Self {
        let lessons = match lessons {
            SectionLessons::Loaded(mut items) => {
                items.sort_by_key(|l| l.order);
                SectionLessons::Loaded(items)
            }
            failed => failed,
        };
        Self { section, lessons }
    }
}

/// Lesson ids of every loaded section, in reading order.
pub fn lesson_sequence(outline: &[SectionOutline]) -> Vec<&LessonId> {
    outline
        .iter()
        .flat_map(|s| s.lessons.lessons().iter().map(|l| &l.id))
        .collect()
}

/// Find a lesson summary in the outline.
pub fn find_lesson<'a>(outline: &'a [SectionOutline], id: &LessonId) -> Option<&'a Lesson> {
    outline
        .iter()
        .flat_map(|s| s.lessons.lessons())
        .find(|l| &l.id == id)
}
