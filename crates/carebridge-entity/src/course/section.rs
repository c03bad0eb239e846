//! Course section entity.

use serde::{Deserialize, Serialize};

use carebridge_core::types::{CourseId, SectionId};

/// An ordered group of lessons within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique section identifier.
    #[serde(rename = "_id")]
    pub id: SectionId,
    /// Owning course.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseId>,
    /// Section title.
    #[serde(default)]
    pub title: String,
    /// Optional section description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Position within the course.
    #[serde(default)]
    pub order: i32,
}
