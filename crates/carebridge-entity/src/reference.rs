//! References to other documents that may arrive populated.

use serde::{Deserialize, Serialize};

/// A reference to another document.
///
/// The backend sends either the bare id or, when it populates the field,
/// a summary object carrying the id and a few display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    /// Bare document id.
    Id(String),
    /// Populated summary.
    Populated(RefSummary),
}

/// Display fields of a populated reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefSummary {
    /// Referenced document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name, if populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email, if populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EntityRef {
    /// The referenced document id.
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated(summary) => &summary.id,
        }
    }

    /// Best available human label: name, then email, then id.
    pub fn label(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated(summary) => summary
                .name
                .as_deref()
                .or(summary.email.as_deref())
                .unwrap_or(&summary.id),
        }
    }
}
