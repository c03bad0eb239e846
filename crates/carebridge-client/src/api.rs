//! The REST contract consumed by the controllers.

use async_trait::async_trait;

use carebridge_core::result::AppResult;
use carebridge_core::types::{
    CollaborationRequestId, CourseId, LessonId, NotificationId, SectionId, UserId,
};
use carebridge_entity::collaboration::{CollaborationRequest, StatusUpdate};
use carebridge_entity::course::{CourseProgress, Lesson, ProgressUpdate, Section};
use carebridge_entity::notification::Notification;
use carebridge_entity::user::{AvatarResponse, ProfileForm, UserProfile};

/// Which collaboration requests to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope {
    /// Every request on the platform (admin only).
    All,
    /// Requests involving the caller.
    Mine,
}

/// An avatar image ready for multipart upload.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    /// File name sent with the part.
    pub file_name: String,
    /// MIME type of the image.
    pub mime_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    /// Guess the MIME type from the file extension.
    pub fn mime_for(file_name: &str) -> &'static str {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        }
    }
}

/// Typed operations against the platform backend.
#[async_trait]
pub trait PlatformApi: Send + Sync + std::fmt::Debug + 'static {
    /// `GET /api/notifications/my`
    async fn list_notifications(&self) -> AppResult<Vec<Notification>>;

    /// `PUT /api/notifications/:id/read`
    async fn mark_notification_read(&self, id: &NotificationId) -> AppResult<()>;

    /// `PUT /api/notifications/mark-all-read`
    async fn mark_all_notifications_read(&self) -> AppResult<()>;

    /// `DELETE /api/notifications/:id`
    async fn delete_notification(&self, id: &NotificationId) -> AppResult<()>;

    /// `GET /api/collaboration-requests/all` or `/my`
    async fn list_collaboration_requests(
        &self,
        scope: RequestScope,
    ) -> AppResult<Vec<CollaborationRequest>>;

    /// `PUT /api/collaboration-requests/:id/status`
    async fn update_collaboration_status(
        &self,
        id: &CollaborationRequestId,
        update: &StatusUpdate,
    ) -> AppResult<CollaborationRequest>;

    /// `GET /api/course-sections/course/:id`
    async fn list_sections(&self, course_id: &CourseId) -> AppResult<Vec<Section>>;

    /// `GET /api/course-lessons/section/:id`
    async fn list_lessons(&self, section_id: &SectionId) -> AppResult<Vec<Lesson>>;

    /// `GET /api/course-lessons/:id`
    async fn get_lesson(&self, lesson_id: &LessonId) -> AppResult<Lesson>;

    /// `GET /api/courses/:id/progress`
    async fn get_progress(&self, course_id: &CourseId) -> AppResult<CourseProgress>;

    /// `PUT /api/courses/:id/progress`
    async fn update_progress(
        &self,
        course_id: &CourseId,
        update: &ProgressUpdate,
    ) -> AppResult<CourseProgress>;

    /// `GET /api/users/:id`
    async fn get_user(&self, user_id: &UserId) -> AppResult<UserProfile>;

    /// `PUT /api/users/:id`
    async fn update_user(&self, user_id: &UserId, form: &ProfileForm) -> AppResult<UserProfile>;

    /// `POST /api/users/:id/avatar` (multipart)
    async fn upload_avatar(
        &self,
        user_id: &UserId,
        upload: AvatarUpload,
    ) -> AppResult<AvatarResponse>;
}
