//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::fields::FieldGroup;

/// Platform roles.
///
/// The role decides which optional profile groups are relevant and which
/// dashboard views a user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Platform administrator.
    Admin,
    /// Parent or guardian of a child on the spectrum.
    Parent,
    /// Student.
    Student,
    /// Teacher.
    Teacher,
    /// Psychologist.
    Psychologist,
    /// Therapist.
    Therapist,
    /// Medical doctor.
    Doctor,
}

impl UserRole {
    /// Check if this role is a clinical professional.
    pub fn is_clinical(&self) -> bool {
        matches!(self, Self::Psychologist | Self::Therapist | Self::Doctor)
    }

    /// Check if this role may review collaboration requests.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Optional profile groups relevant to this role.
    pub fn field_groups(&self) -> &'static [FieldGroup] {
        match self {
            Self::Psychologist | Self::Therapist | Self::Doctor => &[FieldGroup::Professional],
            Self::Parent => &[FieldGroup::Child],
            Self::Student => &[FieldGroup::School],
            Self::Admin | Self::Teacher => &[],
        }
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Parent => "parent",
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Psychologist => "psychologist",
            Self::Therapist => "therapist",
            Self::Doctor => "doctor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = carebridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "parent" => Ok(Self::Parent),
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "psychologist" => Ok(Self::Psychologist),
            "therapist" => Ok(Self::Therapist),
            "doctor" => Ok(Self::Doctor),
            _ => Err(carebridge_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, parent, student, teacher, \
                 psychologist, therapist, doctor"
            ))),
        }
    }
}
