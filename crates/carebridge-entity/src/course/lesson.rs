//! Course lesson entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use carebridge_core::types::{LessonId, SectionId};

/// What kind of content a lesson carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    /// A hosted video, `videoUrl` is populated.
    Video,
    /// An HTML article, `content` is populated.
    Article,
    /// Downloadable files, `attachments` is populated.
    File,
}

impl LessonType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Article => "article",
            Self::File => "file",
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A downloadable file attached to a `file` lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Display name of the file.
    #[serde(default)]
    pub name: String,
    /// Download URL.
    pub url: String,
    /// Size in bytes, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// A single lesson within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Unique lesson identifier.
    #[serde(rename = "_id")]
    pub id: LessonId,
    /// Owning section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionId>,
    /// Lesson title.
    #[serde(default)]
    pub title: String,
    /// Optional short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Position within the section.
    #[serde(default)]
    pub order: i32,
    /// Expected duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Content kind.
    #[serde(rename = "type")]
    pub kind: LessonType,
    /// Video URL for `video` lessons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Article HTML for `article` lessons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Files for `file` lessons.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// Borrowed view of the content field selected by a lesson's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonContent<'a> {
    /// Video lesson; the URL may be missing on summaries.
    Video {
        /// Video URL.
        url: Option<&'a str>,
    },
    /// Article lesson.
    Article {
        /// Article HTML, empty when absent.
        html: &'a str,
    },
    /// File lesson.
    File {
        /// Attached files, empty when absent.
        attachments: &'a [Attachment],
    },
}

impl Lesson {
    /// The content field relevant to this lesson's type.
    ///
    /// Fields belonging to other types are ignored even if present.
    pub fn content(&self) -> LessonContent<'_> {
        match self.kind {
            LessonType::Video => LessonContent::Video {
                url: self.video_url.as_deref(),
            },
            LessonType::Article => LessonContent::Article {
                html: self.content.as_deref().unwrap_or_default(),
            },
            LessonType::File => LessonContent::File {
                attachments: &self.attachments,
            },
        }
    }
}
