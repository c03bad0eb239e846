//! Editable mirror of a profile.

use serde::{Deserialize, Serialize};
use validator::Validate;

use carebridge_core::AppError;

use super::fields::ProfileField;
use super::model::UserProfile;

/// The profile edit form.
///
/// Holds every editable field regardless of role; the role only decides
/// which fields are shown. The whole form is sent on submit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub address: Option<String>,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
    #[validate(range(max = 80))]
    pub years_of_experience: Option<u32>,
    pub organization: Option<String>,
    pub child_name: Option<String>,
    #[validate(range(max = 30))]
    pub child_age: Option<u32>,
    pub child_diagnosis: Option<String>,
    pub school_name: Option<String>,
    pub grade: Option<String>,
}

impl ProfileForm {
    /// Mirror the editable fields of a loaded profile.
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            bio: profile.bio.clone(),
            address: profile.address.clone(),
            specialization: profile.specialization.clone(),
            license_number: profile.license_number.clone(),
            years_of_experience: profile.years_of_experience,
            organization: profile.organization.clone(),
            child_name: profile.child_name.clone(),
            child_age: profile.child_age,
            child_diagnosis: profile.child_diagnosis.clone(),
            school_name: profile.school_name.clone(),
            grade: profile.grade.clone(),
        }
    }

    /// Set a field from user input. An empty value clears optional fields.
    pub fn set(&mut self, field: ProfileField, value: &str) -> Result<(), AppError> {
        let value = value.trim();
        let text = || (!value.is_empty()).then(|| value.to_string());
        let number = || -> Result<Option<u32>, AppError> {
            if value.is_empty() {
                return Ok(None);
            }
            value.parse::<u32>().map(Some).map_err(|_| {
                AppError::validation(format!("{} must be a whole number", field.label()))
            })
        };

        match field {
            ProfileField::Name => self.name = value.to_string(),
            ProfileField::Email => self.email = value.to_string(),
            ProfileField::Phone => self.phone = text(),
            ProfileField::Bio => self.bio = text(),
            ProfileField::Address => self.address = text(),
            ProfileField::Specialization => self.specialization = text(),
            ProfileField::LicenseNumber => self.license_number = text(),
            ProfileField::YearsOfExperience => self.years_of_experience = number()?,
            ProfileField::Organization => self.organization = text(),
            ProfileField::ChildName => self.child_name = text(),
            ProfileField::ChildAge => self.child_age = number()?,
            ProfileField::ChildDiagnosis => self.child_diagnosis = text(),
            ProfileField::SchoolName => self.school_name = text(),
            ProfileField::Grade => self.grade = text(),
        }
        Ok(())
    }
}
