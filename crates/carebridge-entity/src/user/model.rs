//! User profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carebridge_core::types::UserId;

use super::fields::ProfileField;
use super::role::UserRole;

/// A user's profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique user identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Platform role.
    pub role: UserRole,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free-form bio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Clinical specialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    /// Professional license number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    /// Years in practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    /// Clinic, hospital or practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Parent's child name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    /// Parent's child age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_age: Option<u32>,
    /// Parent's child diagnosis notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_diagnosis: Option<String>,
    /// Student's school.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    /// Student's grade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// When the account was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the profile was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Displayable value of a field, `None` when unset.
    pub fn value(&self, field: ProfileField) -> Option<String> {
        match field {
            ProfileField::Name => Some(self.name.clone()),
            ProfileField::Email => Some(self.email.clone()),
            ProfileField::Phone => self.phone.clone(),
            ProfileField::Bio => self.bio.clone(),
            ProfileField::Address => self.address.clone(),
            ProfileField::Specialization => self.specialization.clone(),
            ProfileField::LicenseNumber => self.license_number.clone(),
            ProfileField::YearsOfExperience => self.years_of_experience.map(|v| v.to_string()),
            ProfileField::Organization => self.organization.clone(),
            ProfileField::ChildName => self.child_name.clone(),
            ProfileField::ChildAge => self.child_age.map(|v| v.to_string()),
            ProfileField::ChildDiagnosis => self.child_diagnosis.clone(),
            ProfileField::SchoolName => self.school_name.clone(),
            ProfileField::Grade => self.grade.clone(),
        }
    }
}

/// Response of `POST /api/users/:id/avatar`.
///
/// The backend answers with either the updated user or just the new URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvatarResponse {
    /// The full updated profile.
    Profile(Box<UserProfile>),
    /// Only the new avatar URL.
    Url {
        /// New avatar URL.
        avatar: String,
    },
}

impl AvatarResponse {
    /// The new avatar URL, if the response carried one.
    pub fn avatar(&self) -> Option<&str> {
        match self {
            Self::Profile(profile) => profile.avatar.as_deref(),
            Self::Url { avatar } => Some(avatar),
        }
    }
}
