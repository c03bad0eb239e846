//! Profile loading, role-conditioned editing and avatar upload.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};
use validator::Validate;

use carebridge_client::{AvatarUpload, PlatformApi};
use carebridge_core::{AppError, ErrorKind};
use carebridge_core::events::{EventBus, ProfileEvent};
use carebridge_core::result::AppResult;
use carebridge_core::traits::Toaster;
use carebridge_core::types::UserId;
use carebridge_entity::user::{FieldGroup, ProfileField, ProfileForm, UserProfile, UserRole};

use crate::state::LoadState;

/// Fields rendered for a role: the base fields followed by the role's groups.
pub fn visible_fields_for(role: UserRole) -> Vec<ProfileField> {
    let groups = role.field_groups();
    ProfileField::ALL
        .into_iter()
        .filter(|f| f.group().is_none_or(|g| groups.contains(&g)))
        .collect()
}

/// Holds one profile and a parallel edit form.
///
/// The form carries every field; the role only decides which are shown.
/// Submitting sends the whole form, hidden groups included.
#[derive(Debug)]
pub struct ProfileController {
    api: Arc<dyn PlatformApi>,
    bus: EventBus,
    toaster: Arc<dyn Toaster>,
    state: RwLock<ProfileState>,
}

#[derive(Debug, Default)]
struct ProfileState {
    profile: LoadState<UserProfile>,
    form: ProfileForm,
}

impl ProfileController {
    /// Creates a new profile controller.
    pub fn new(api: Arc<dyn PlatformApi>, bus: EventBus, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            api,
            bus,
            toaster,
            state: RwLock::new(ProfileState::default()),
        }
    }

    /// Fetch a profile and reset the form from it.
    pub async fn load(&self, user_id: &UserId) -> AppResult<UserProfile> {
        self.state.write().await.profile.begin();

        match self.api.get_user(user_id).await {
            Ok(profile) => {
                let mut state = self.state.write().await;
                state.form = ProfileForm::from_profile(&profile);
                state.profile.finish(profile.clone());
                Ok(profile)
            }
            Err(e) => {
                self.state.write().await.profile.abort();
                self.fail("Failed to load profile", e)
            }
        }
    }

    /// The loaded profile.
    pub async fn profile(&self) -> Option<UserProfile> {
        self.state.read().await.profile.value().cloned()
    }

    /// Current form contents.
    pub async fn form(&self) -> ProfileForm {
        self.state.read().await.form.clone()
    }

    /// Set one form field from text input.
    pub async fn set_field(&self, field: ProfileField, value: &str) -> AppResult<()> {
        let result = self.state.write().await.form.set(field, value);
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.fail("Rejected form input", e),
        }
    }

    /// Edit the form in place.
    pub async fn edit_form<F>(&self, edit: F)
    where
        F: FnOnce(&mut ProfileForm),
    {
        edit(&mut self.state.write().await.form);
    }

    /// Discard form edits.
    pub async fn reset_form(&self) {
        let mut state = self.state.write().await;
        if let Some(form) = state.profile.value().map(ProfileForm::from_profile) {
            state.form = form;
        }
    }

    /// Optional groups shown for the loaded profile's role.
    pub async fn visible_groups(&self) -> Vec<FieldGroup> {
        self.state
            .read()
            .await
            .profile
            .value()
            .map(|p| p.role.field_groups().to_vec())
            .unwrap_or_default()
    }

    /// Fields shown for the loaded profile's role.
    pub async fn visible_fields(&self) -> Vec<ProfileField> {
        self.state
            .read()
            .await
            .profile
            .value()
            .map(|p| visible_fields_for(p.role))
            .unwrap_or_default()
    }

    /// Validate and save the form, replacing profile and form with the
    /// server's response.
    pub async fn submit(&self) -> AppResult<UserProfile> {
        let pending = {
            let state = self.state.read().await;
            state
                .profile
                .value()
                .map(|profile| (profile.id.clone(), state.form.clone()))
        };
        let Some((user_id, form)) = pending else {
            return self.fail("Cannot save profile", AppError::validation("No profile loaded"));
        };

        if let Err(errors) = form.validate() {
            return self.fail("Profile form is invalid", errors.into());
        }

        let saved = match self.api.update_user(&user_id, &form).await {
            Ok(saved) => saved,
            Err(e) => return self.fail("Failed to update profile", e),
        };

        {
            let mut state = self.state.write().await;
            state.form = ProfileForm::from_profile(&saved);
            state.profile.finish(saved.clone());
        }

        self.bus.publish(ProfileEvent::Updated {
            user_id: user_id.clone(),
        });
        info!(user_id = %user_id, "Profile updated");
        self.toaster.success("Profile updated successfully");
        Ok(saved)
    }

    /// Upload an image file as the avatar.
    pub async fn upload_avatar(&self, path: &Path) -> AppResult<Option<String>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let err = AppError::with_source(
                    ErrorKind::Storage,
                    format!("Cannot read {}", path.display()),
                    e,
                );
                return self.fail("Failed to read avatar file", err);
            }
        };
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("avatar")
            .to_string();

        self.upload_avatar_bytes(file_name, bytes).await
    }

    /// Upload avatar bytes. Only the profile's avatar changes; pending form
    /// edits are kept.
    pub async fn upload_avatar_bytes(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> AppResult<Option<String>> {
        let user_id = match self.profile().await {
            Some(profile) => profile.id,
            None => {
                return self.fail(
                    "Cannot upload avatar",
                    AppError::validation("No profile loaded"),
                );
            }
        };

        let upload = AvatarUpload {
            mime_type: AvatarUpload::mime_for(&file_name).to_string(),
            file_name,
            bytes,
        };
        let response = match self.api.upload_avatar(&user_id, upload).await {
            Ok(response) => response,
            Err(e) => return self.fail("Failed to upload avatar", e),
        };

        let avatar = response.avatar().map(str::to_string);
        if let Some(profile) = self.state.write().await.profile.value_mut() {
            profile.avatar = avatar.clone();
        }

        self.bus.publish(ProfileEvent::AvatarChanged {
            user_id: user_id.clone(),
            avatar: avatar.clone(),
        });
        info!(user_id = %user_id, "Avatar updated");
        self.toaster.success("Avatar updated successfully");
        Ok(avatar)
    }

    fn fail<T>(&self, context: &str, err: AppError) -> AppResult<T> {
        warn!(error = %err, "{context}");
        self.toaster.error(&err.user_message());
        Err(err)
    }
}
