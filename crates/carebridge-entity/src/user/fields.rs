//! Profile field catalogue and role-conditioned groups.

use std::fmt;
use std::str::FromStr;

use carebridge_core::AppError;

/// Optional groups of profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    /// Shown to clinical roles.
    Professional,
    /// Shown to parents.
    Child,
    /// Shown to students.
    School,
}

/// An editable profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Bio,
    Address,
    Specialization,
    LicenseNumber,
    YearsOfExperience,
    Organization,
    ChildName,
    ChildAge,
    ChildDiagnosis,
    SchoolName,
    Grade,
}

impl ProfileField {
    /// Fields every role sees, in render order.
    pub const BASE: [ProfileField; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Bio,
        Self::Address,
    ];

    /// Every field, in render order.
    pub const ALL: [ProfileField; 14] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Bio,
        Self::Address,
        Self::Specialization,
        Self::LicenseNumber,
        Self::YearsOfExperience,
        Self::Organization,
        Self::ChildName,
        Self::ChildAge,
        Self::ChildDiagnosis,
        Self::SchoolName,
        Self::Grade,
    ];

    /// The optional group this field belongs to, `None` for base fields.
    pub fn group(&self) -> Option<FieldGroup> {
        match self {
            Self::Name | Self::Email | Self::Phone | Self::Bio | Self::Address => None,
            Self::Specialization
            | Self::LicenseNumber
            | Self::YearsOfExperience
            | Self::Organization => Some(FieldGroup::Professional),
            Self::ChildName | Self::ChildAge | Self::ChildDiagnosis => Some(FieldGroup::Child),
            Self::SchoolName | Self::Grade => Some(FieldGroup::School),
        }
    }

    /// Backend (camelCase) field name.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Bio => "bio",
            Self::Address => "address",
            Self::Specialization => "specialization",
            Self::LicenseNumber => "licenseNumber",
            Self::YearsOfExperience => "yearsOfExperience",
            Self::Organization => "organization",
            Self::ChildName => "childName",
            Self::ChildAge => "childAge",
            Self::ChildDiagnosis => "childDiagnosis",
            Self::SchoolName => "schoolName",
            Self::Grade => "grade",
        }
    }

    /// Human label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Bio => "Bio",
            Self::Address => "Address",
            Self::Specialization => "Specialization",
            Self::LicenseNumber => "License number",
            Self::YearsOfExperience => "Years of experience",
            Self::Organization => "Organization",
            Self::ChildName => "Child's name",
            Self::ChildAge => "Child's age",
            Self::ChildDiagnosis => "Child's diagnosis",
            Self::SchoolName => "School",
            Self::Grade => "Grade",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProfileField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], "");
        Self::ALL
            .into_iter()
            .find(|f| f.key().to_lowercase() == wanted)
            .ok_or_else(|| AppError::validation(format!("Unknown profile field: '{s}'")))
    }
}
