//! Shared test helpers for integration tests.
//!
//! Runs an in-process mock of the platform backend on a random local port
//! and builds real `HttpPlatformApi` clients against it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use carebridge_client::{HttpPlatformApi, MemoryTokenStore, PlatformApi, TokenStore};
use carebridge_core::config::api::ApiConfig;
use carebridge_core::events::EventBus;
use carebridge_service::ToastBuffer;

/// Mutable backend state shared with the route handlers.
#[derive(Debug, Default)]
pub struct MockState {
    /// Wrap list and item responses in `{ key: ... }` envelopes.
    pub wrapped: bool,
    pub notifications: Mutex<Vec<Value>>,
    pub requests: Mutex<Vec<Value>>,
    pub sections: Mutex<Vec<Value>>,
    pub lessons: Mutex<Vec<Value>>,
    pub completed: Mutex<Vec<String>>,
    pub users: Mutex<Vec<Value>>,
    /// Section ids whose lesson listing answers 500.
    pub failing_sections: Mutex<Vec<String>>,
    /// `Authorization` header of every request, in order.
    pub auth_headers: Mutex<Vec<Option<String>>>,
    /// `(field name, file name, content type, size)` of every uploaded part.
    pub uploads: Mutex<Vec<(String, String, String, usize)>>,
    /// Last JSON body received on `PUT /api/users/:id`.
    pub last_user_update: Mutex<Option<Value>>,
}

/// A running mock backend.
pub struct MockBackend {
    /// Address the backend listens on.
    pub addr: SocketAddr,
    /// Backend state.
    pub state: Arc<MockState>,
}

impl MockBackend {
    /// Start a backend answering with bare arrays and documents.
    pub async fn start() -> Self {
        Self::start_with(MockState::default()).await
    }

    /// Start a backend answering with `{ key: ... }` envelopes.
    pub async fn start_wrapped() -> Self {
        Self::start_with(MockState {
            wrapped: true,
            ..MockState::default()
        })
        .await
    }

    async fn start_with(state: MockState) -> Self {
        let state = Arc::new(state);
        let router = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Mock backend failed");
        });

        Self { addr, state }
    }

    /// API config pointing at this backend.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: format!("http://{}", self.addr),
            request_timeout_seconds: 5,
            ..ApiConfig::default()
        }
    }

    /// Client carrying the given token, or none.
    pub fn client(&self, token: Option<&str>) -> Arc<dyn PlatformApi> {
        let tokens: Arc<dyn TokenStore> = match token {
            Some(token) => Arc::new(MemoryTokenStore::with_token(token)),
            None => Arc::new(MemoryTokenStore::default()),
        };
        Arc::new(HttpPlatformApi::new(&self.api_config(), tokens).expect("Failed to build client"))
    }

    /// Client plus the bus and toast sink a controller needs.
    pub fn harness(&self) -> (Arc<dyn PlatformApi>, EventBus, Arc<ToastBuffer>) {
        (
            self.client(Some(TEST_TOKEN)),
            EventBus::new(32),
            Arc::new(ToastBuffer::new()),
        )
    }
}

/// Token used by [`MockBackend::harness`].
pub const TEST_TOKEN: &str = "header.eyJpZCI6InUxIiwicm9sZSI6InBhcmVudCJ9.signature";

pub fn notification(id: &str, kind: &str, read: bool) -> Value {
    json!({
        "_id": id,
        "user": "u1",
        "type": kind,
        "title": format!("Title {id}"),
        "message": format!("Message {id}"),
        "read": read,
        "createdAt": "2024-03-01T09:30:00.000Z",
    })
}

pub fn request(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "requester": { "_id": "pro1", "name": "Dr. Rivera", "email": "rivera@example.org" },
        "student": "stu1",
        "requestType": "assessment",
        "reason": "Coordinate therapy goals",
        "status": status,
        "createdAt": "2024-03-02T10:00:00.000Z",
    })
}

pub fn section(id: &str, course: &str, order: i32) -> Value {
    json!({ "_id": id, "course": course, "title": format!("Section {id}"), "order": order })
}

pub fn lesson(id: &str, section: &str, order: i32, kind: &str) -> Value {
    let mut lesson = json!({
        "_id": id,
        "section": section,
        "title": format!("Lesson {id}"),
        "order": order,
        "duration": 12,
        "type": kind,
    });
    match kind {
        "video" => lesson["videoUrl"] = json!(format!("https://videos.example.org/{id}.mp4")),
        "article" => lesson["content"] = json!(format!("<h1>{id}</h1>")),
        _ => {
            lesson["attachments"] =
                json!([{ "name": "worksheet.pdf", "url": "https://files.example.org/w.pdf" }])
        }
    }
    lesson
}

pub fn user(id: &str, role: &str) -> Value {
    json!({ "_id": id, "name": "Sam Lee", "email": "sam@example.org", "role": role })
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/notifications/my", get(list_notifications))
        .route("/api/notifications/mark-all-read", put(mark_all_read))
        .route("/api/notifications/{id}/read", put(mark_read))
        .route("/api/notifications/{id}", axum::routing::delete(delete_notification))
        .route("/api/collaboration-requests/all", get(list_requests))
        .route("/api/collaboration-requests/my", get(list_requests))
        .route("/api/collaboration-requests/{id}/status", put(update_status))
        .route("/api/course-sections/course/{id}", get(list_sections))
        .route("/api/course-lessons/section/{id}", get(list_lessons))
        .route("/api/course-lessons/{id}", get(get_lesson))
        .route("/api/courses/{id}/progress", get(get_progress).put(update_progress))
        .route("/api/users/{id}", get(get_user).put(update_user))
        .route("/api/users/{id}/avatar", post(upload_avatar))
        .layer(middleware::from_fn_with_state(state.clone(), record_auth))
        .with_state(state)
}

async fn record_auth(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let auth = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.auth_headers.lock().unwrap().push(auth);
    next.run(request).await
}

fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": format!("{what} not found") }))).into_response()
}

fn envelope(state: &MockState, key: &str, value: Value) -> Json<Value> {
    if state.wrapped {
        Json(json!({ "success": true, key: value }))
    } else {
        Json(value)
    }
}

async fn list_notifications(State(state): State<Arc<MockState>>) -> Json<Value> {
    let items = Value::Array(state.notifications.lock().unwrap().clone());
    envelope(&state, "notifications", items)
}

async fn mark_read(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let mut items = state.notifications.lock().unwrap();
    match items.iter_mut().find(|n| n["_id"] == id) {
        Some(item) => {
            item["read"] = json!(true);
            Json(json!({ "message": "Notification marked as read" })).into_response()
        }
        None => not_found("Notification"),
    }
}

async fn mark_all_read(State(state): State<Arc<MockState>>) -> Json<Value> {
    for item in state.notifications.lock().unwrap().iter_mut() {
        item["read"] = json!(true);
    }
    Json(json!({ "message": "All notifications marked as read" }))
}

async fn delete_notification(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Response {
    let mut items = state.notifications.lock().unwrap();
    let before = items.len();
    items.retain(|n| n["_id"] != id);
    if items.len() == before {
        return not_found("Notification");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_requests(State(state): State<Arc<MockState>>) -> Json<Value> {
    let items = Value::Array(state.requests.lock().unwrap().clone());
    envelope(&state, "requests", items)
}

async fn update_status(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut items = state.requests.lock().unwrap();
    let Some(item) = items.iter_mut().find(|r| r["_id"] == id) else {
        return not_found("Request");
    };
    if item["status"] != "pending" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Request has already been processed" })),
        )
            .into_response();
    }
    item["status"] = body["status"].clone();
    if let Some(response) = body.get("adminResponse") {
        item["adminResponse"] = response.clone();
    }
    item["approvedBy"] = json!("admin1");
    item["approvedAt"] = json!("2024-03-03T08:00:00.000Z");
    let updated = item.clone();
    drop(items);
    envelope(&state, "request", updated).into_response()
}

async fn list_sections(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Json<Value> {
    let items: Vec<Value> = state
        .sections
        .lock()
        .unwrap()
        .iter()
        .filter(|s| s["course"] == id)
        .cloned()
        .collect();
    envelope(&state, "sections", Value::Array(items))
}

async fn list_lessons(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    if state.failing_sections.lock().unwrap().contains(&id) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Lesson store unavailable" })),
        )
            .into_response();
    }
    let items: Vec<Value> = state
        .lessons
        .lock()
        .unwrap()
        .iter()
        .filter(|l| l["section"] == id)
        .cloned()
        .collect();
    envelope(&state, "lessons", Value::Array(items)).into_response()
}

async fn get_lesson(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let lesson = state
        .lessons
        .lock()
        .unwrap()
        .iter()
        .find(|l| l["_id"] == id)
        .cloned();
    match lesson {
        Some(lesson) => envelope(&state, "lesson", lesson).into_response(),
        None => not_found("Lesson"),
    }
}

fn progress_document(state: &MockState) -> Value {
    let completed = state.completed.lock().unwrap().clone();
    let total = state.lessons.lock().unwrap().len().max(1);
    let percent = (completed.len() * 100) as f64 / total as f64;
    json!({ "completedLessons": completed, "progress": percent.round() })
}

async fn get_progress(State(state): State<Arc<MockState>>) -> Json<Value> {
    let progress = progress_document(&state);
    envelope(&state, "progress", progress)
}

async fn update_progress(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> Response {
    let Some(lesson_id) = body["lessonId"].as_str() else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "lessonId is required" })))
            .into_response();
    };
    {
        let mut completed = state.completed.lock().unwrap();
        if body["isCompleted"] == true && !completed.iter().any(|c| c == lesson_id) {
            completed.push(lesson_id.to_string());
        }
    }
    let progress = progress_document(&state);
    envelope(&state, "progress", progress).into_response()
}

async fn get_user(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let user = state
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u["_id"] == id)
        .cloned();
    match user {
        Some(user) => envelope(&state, "user", user).into_response(),
        None => not_found("User"),
    }
}

async fn update_user(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    *state.last_user_update.lock().unwrap() = Some(body.clone());

    let mut users = state.users.lock().unwrap();
    let Some(user) = users.iter_mut().find(|u| u["_id"] == id) else {
        return not_found("User");
    };
    if let (Some(target), Some(fields)) = (user.as_object_mut(), body.as_object()) {
        for (key, value) in fields {
            if !value.is_null() {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    let updated = user.clone();
    drop(users);
    envelope(&state, "user", updated).into_response()
}

async fn upload_avatar(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut url = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().unwrap_or("").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
        if name == "avatar" {
            url = Some(format!("https://cdn.example.org/avatars/{id}/{file_name}"));
        }
        state
            .uploads
            .lock()
            .unwrap()
            .push((name, file_name, content_type, size));
    }

    let Some(url) = url else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "No file uploaded" })))
            .into_response();
    };
    if let Some(user) = state
        .users
        .lock()
        .unwrap()
        .iter_mut()
        .find(|u| u["_id"] == id)
    {
        user["avatar"] = json!(url);
    }
    Json(json!({ "avatar": url })).into_response()
}
