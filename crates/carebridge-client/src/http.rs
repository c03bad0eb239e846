//! `reqwest`-backed implementation of [`PlatformApi`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use carebridge_core::AppError;
use carebridge_core::config::api::ApiConfig;
use carebridge_core::result::AppResult;
use carebridge_core::types::{
    CollaborationRequestId, CourseId, LessonId, NotificationId, SectionId, UserId,
};
use carebridge_entity::collaboration::{CollaborationRequest, StatusUpdate};
use carebridge_entity::course::{CourseProgress, Lesson, ProgressUpdate, Section};
use carebridge_entity::notification::Notification;
use carebridge_entity::user::{AvatarResponse, ProfileForm, UserProfile};

use crate::api::{AvatarUpload, PlatformApi, RequestScope};
use crate::envelope::{decode_item, decode_list, error_message};
use crate::token::TokenStore;

/// HTTP client for the platform backend.
#[derive(Debug, Clone)]
pub struct HttpPlatformApi {
    /// Shared connection pool.
    http: reqwest::Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Source of the bearer token.
    tokens: Arc<dyn TokenStore>,
}

impl HttpPlatformApi {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            tokens,
        })
    }

    /// The backend this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Attach the bearer token, if one is stored.
    async fn authorize(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        Ok(match self.tokens.load().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    /// Send a request and return the decoded JSON body (`Null` when empty).
    async fn execute(&self, method: Method, path: &str, request: RequestBuilder) -> AppResult<Value> {
        debug!(%method, path, "Dispatching request");

        let response = self.authorize(request).await?.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            warn!(%method, path, status = status.as_u16(), %message, "Request rejected");
            return Err(AppError::from_status(status.as_u16(), message));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(AppError::from)
    }

    async fn get(&self, path: &str) -> AppResult<Value> {
        let request = self.http.get(self.url(path));
        self.execute(Method::GET, path, request).await
    }

    async fn put<B: Serialize + Sync>(&self, path: &str, body: Option<&B>) -> AppResult<Value> {
        let mut request = self.http.put(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(Method::PUT, path, request).await
    }

    async fn delete(&self, path: &str) -> AppResult<Value> {
        let request = self.http.delete(self.url(path));
        self.execute(Method::DELETE, path, request).await
    }
}

#[async_trait]
impl PlatformApi for HttpPlatformApi {
    async fn list_notifications(&self) -> AppResult<Vec<Notification>> {
        let body = self.get("/notifications/my").await?;
        decode_list(body, "notifications")
    }

    async fn mark_notification_read(&self, id: &NotificationId) -> AppResult<()> {
        self.put::<()>(&format!("/notifications/{id}/read"), None)
            .await?;
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> AppResult<()> {
        self.put::<()>("/notifications/mark-all-read", None).await?;
        Ok(())
    }

    async fn delete_notification(&self, id: &NotificationId) -> AppResult<()> {
        self.delete(&format!("/notifications/{id}")).await?;
        Ok(())
    }

    async fn list_collaboration_requests(
        &self,
        scope: RequestScope,
    ) -> AppResult<Vec<CollaborationRequest>> {
        let path = match scope {
            RequestScope::All => "/collaboration-requests/all",
            RequestScope::Mine => "/collaboration-requests/my",
        };
        let body = self.get(path).await?;
        decode_list(body, "requests")
    }

    async fn update_collaboration_status(
        &self,
        id: &CollaborationRequestId,
        update: &StatusUpdate,
    ) -> AppResult<CollaborationRequest> {
        let body = self
            .put(&format!("/collaboration-requests/{id}/status"), Some(update))
            .await?;
        decode_item(body, "request")
    }

    async fn list_sections(&self, course_id: &CourseId) -> AppResult<Vec<Section>> {
        let body = self
            .get(&format!("/course-sections/course/{course_id}"))
            .await?;
        decode_list(body, "sections")
    }

    async fn list_lessons(&self, section_id: &SectionId) -> AppResult<Vec<Lesson>> {
        let body = self
            .get(&format!("/course-lessons/section/{section_id}"))
            .await?;
        decode_list(body, "lessons")
    }

    async fn get_lesson(&self, lesson_id: &LessonId) -> AppResult<Lesson> {
        let body = self.get(&format!("/course-lessons/{lesson_id}")).await?;
        decode_item(body, "lesson")
    }

    async fn get_progress(&self, course_id: &CourseId) -> AppResult<CourseProgress> {
        let body = self.get(&format!("/courses/{course_id}/progress")).await?;
        decode_item(body, "progress")
    }

    async fn update_progress(
        &self,
        course_id: &CourseId,
        update: &ProgressUpdate,
    ) -> AppResult<CourseProgress> {
        let body = self
            .put(&format!("/courses/{course_id}/progress"), Some(update))
            .await?;
        decode_item(body, "progress")
    }

    async fn get_user(&self, user_id: &UserId) -> AppResult<UserProfile> {
        let body = self.get(&format!("/users/{user_id}")).await?;
        decode_item(body, "user")
    }

    async fn update_user(&self, user_id: &UserId, form: &ProfileForm) -> AppResult<UserProfile> {
        let body = self.put(&format!("/users/{user_id}"), Some(form)).await?;
        decode_item(body, "user")
    }

    async fn upload_avatar(
        &self,
        user_id: &UserId,
        upload: AvatarUpload,
    ) -> AppResult<AvatarResponse> {
        let path = format!("/users/{user_id}/avatar");
        let size = upload.bytes.len();
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)
            .map_err(|e| AppError::validation(format!("Invalid image type: {e}")))?;
        let form = Form::new().part("avatar", part);

        debug!(user_id = %user_id, size, "Uploading avatar");
        let request = self.http.post(self.url(&path)).multipart(form);
        let body = self.execute(Method::POST, &path, request).await?;
        decode_item(body, "user")
    }
}
