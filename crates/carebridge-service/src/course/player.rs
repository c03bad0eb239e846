//! Course player and progress controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use carebridge_client::PlatformApi;
use carebridge_core::AppError;
use carebridge_core::events::{CourseEvent, EventBus};
use carebridge_core::result::AppResult;
use carebridge_core::traits::Toaster;
use carebridge_core::types::{CourseId, LessonId};
use carebridge_entity::course::{CourseProgress, Lesson, ProgressUpdate};

use super::outline::{SectionLessons, SectionOutline, find_lesson, lesson_sequence};
use crate::state::LoadState;

/// Loads a course tree, shows one lesson at a time and records completion.
///
/// Lesson selection is sequenced: every call to [`Self::select_lesson`]
/// takes a ticket, and its response is applied only if no later selection
/// has been issued in the meantime.
#[derive(Debug)]
pub struct CoursePlayer {
    api: Arc<dyn PlatformApi>,
    bus: EventBus,
    toaster: Arc<dyn Toaster>,
    state: RwLock<PlayerState>,
    /// Ticket of the most recent lesson selection.
    selection: AtomicU64,
}

#[derive(Debug, Default)]
struct PlayerState {
    course_id: Option<CourseId>,
    outline: LoadState<Vec<SectionOutline>>,
    progress: LoadState<CourseProgress>,
    current: Option<Lesson>,
}

impl PlayerState {
    /// Responses for any other course are stale and must not be stored.
    fn is_open(&self, course_id: &CourseId) -> bool {
        self.course_id.as_ref() == Some(course_id)
    }
}

impl CoursePlayer {
    /// Creates a new course player.
    pub fn new(api: Arc<dyn PlatformApi>, bus: EventBus, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            api,
            bus,
            toaster,
            state: RwLock::new(PlayerState::default()),
            selection: AtomicU64::new(0),
        }
    }

    /// Load a course: sections, then every section's lessons, then progress.
    ///
    /// A section whose lesson fetch fails is kept in the outline as
    /// [`SectionLessons::Failed`]; one error toast names all such sections.
    pub async fn open(&self, course_id: &CourseId) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            if state.course_id.as_ref() != Some(course_id) {
                *state = PlayerState {
                    course_id: Some(course_id.clone()),
                    ..PlayerState::default()
                };
                // Invalidate selections still in flight for the previous course.
                self.selection.fetch_add(1, Ordering::AcqRel);
            }
            state.outline.begin();
        }

        let mut sections = match self.api.list_sections(course_id).await {
            Ok(sections) => sections,
            Err(e) => {
                let mut state = self.state.write().await;
                if state.is_open(course_id) {
                    state.outline.abort();
                }
                drop(state);
                return self.fail("Failed to load course sections", e);
            }
        };
        sections.sort_by_key(|s| s.order);

        let fetches = sections.iter().map(|s| self.api.list_lessons(&s.id));
        let results = join_all(fetches).await;

        let mut failed = Vec::new();
        let outline: Vec<SectionOutline> = sections
            .into_iter()
            .zip(results)
            .map(|(section, result)| {
                let lessons = match result {
                    Ok(lessons) => SectionLessons::Loaded(lessons),
                    Err(e) => {
                        warn!(section_id = %section.id, error = %e, "Failed to load section lessons");
                        failed.push(section.title.clone());
                        SectionLessons::Failed(e.user_message())
                    }
                };
                SectionOutline::new(section, lessons)
            })
            .collect();

        info!(
            course_id = %course_id,
            sections = outline.len(),
            failed_sections = failed.len(),
            "Course outline loaded"
        );
        {
            let mut state = self.state.write().await;
            if !state.is_open(course_id) {
                debug!(course_id = %course_id, "Discarding outline of a course no longer open");
                return Ok(());
            }
            state.outline.finish(outline);
        }

        if !failed.is_empty() {
            self.toaster
                .error(&format!("Failed to load lessons for: {}", failed.join(", ")));
        }

        self.refresh_progress(course_id).await.map(|_| ())
    }

    /// Re-fetch progress for the open course.
    pub async fn refresh_progress(&self, course_id: &CourseId) -> AppResult<CourseProgress> {
        {
            let mut state = self.state.write().await;
            if state.is_open(course_id) {
                state.progress.begin();
            }
        }

        let result = self.api.get_progress(course_id).await;
        let mut state = self.state.write().await;
        let current = state.is_open(course_id);
        match result {
            Ok(progress) => {
                if current {
                    state.progress.finish(progress.clone());
                }
                Ok(progress)
            }
            Err(e) => {
                if current {
                    state.progress.abort();
                }
                drop(state);
                self.fail("Failed to load course progress", e)
            }
        }
    }

    /// Fetch one lesson's detail and make it the current lesson.
    ///
    /// Returns `Ok(None)` when a later selection superseded this one; the
    /// stale response (or error) is discarded.
    pub async fn select_lesson(&self, lesson_id: &LessonId) -> AppResult<Option<Lesson>> {
        let ticket = self.selection.fetch_add(1, Ordering::AcqRel) + 1;
        let result = self.api.get_lesson(lesson_id).await;

        let mut state = self.state.write().await;
        if self.selection.load(Ordering::Acquire) != ticket {
            debug!(lesson_id = %lesson_id, ticket, "Discarding superseded lesson detail");
            return Ok(None);
        }

        match result {
            Ok(lesson) => {
                state.current = Some(lesson.clone());
                Ok(Some(lesson))
            }
            Err(e) => {
                drop(state);
                self.fail("Failed to load lesson", e)
            }
        }
    }

    /// Mark a lesson complete and re-fetch progress from the server.
    ///
    /// Returns the server-reported percentage. Marking an already-completed
    /// lesson is sent like any other.
    pub async fn mark_complete(&self, lesson_id: &LessonId) -> AppResult<u8> {
        let course_id = match self.course_id().await {
            Some(id) => id,
            None => {
                return self.fail(
                    "Cannot mark lesson complete",
                    AppError::validation("No course is open"),
                );
            }
        };

        let written = match self
            .api
            .update_progress(&course_id, &ProgressUpdate::complete(lesson_id.clone()))
            .await
        {
            Ok(progress) => progress,
            Err(e) => return self.fail("Failed to mark lesson complete", e),
        };

        let progress = match self.api.get_progress(&course_id).await {
            Ok(progress) => progress,
            Err(e) => {
                warn!(error = %e, "Progress re-fetch failed, using write response");
                written
            }
        };
        let percent = progress.percent();
        {
            let mut state = self.state.write().await;
            if state.is_open(&course_id) {
                state.progress.finish(progress);
            } else {
                debug!(course_id = %course_id, "Course switched during completion, progress not kept");
            }
        }

        self.bus.publish(CourseEvent::LessonCompleted {
            course_id: course_id.clone(),
            lesson_id: lesson_id.clone(),
            progress: percent,
        });
        info!(course_id = %course_id, lesson_id = %lesson_id, percent, "Lesson completed");
        self.toaster.success("Lesson marked as complete");
        Ok(percent)
    }

    /// Progress as displayed, `"0%"` before progress is loaded.
    pub async fn percent_label(&self) -> String {
        self.state
            .read()
            .await
            .progress
            .value()
            .map(CourseProgress::label)
            .unwrap_or_else(|| "0%".to_string())
    }

    /// Check whether a lesson is in the completed set.
    pub async fn is_completed(&self, lesson_id: &LessonId) -> bool {
        self.state
            .read()
            .await
            .progress
            .value()
            .is_some_and(|p| p.is_completed(lesson_id))
    }

    /// The open course.
    pub async fn course_id(&self) -> Option<CourseId> {
        self.state.read().await.course_id.clone()
    }

    /// Last loaded progress.
    pub async fn progress(&self) -> Option<CourseProgress> {
        self.state.read().await.progress.value().cloned()
    }

    /// Section tree of the open course.
    pub async fn outline(&self) -> Vec<SectionOutline> {
        self.state
            .read()
            .await
            .outline
            .value()
            .cloned()
            .unwrap_or_default()
    }

    /// The resident lesson detail.
    pub async fn current_lesson(&self) -> Option<Lesson> {
        self.state.read().await.current.clone()
    }

    /// Lesson after the current one in reading order, or the first lesson
    /// when nothing is selected.
    pub async fn next_lesson(&self) -> Option<LessonId> {
        let state = self.state.read().await;
        let outline = state.outline.value()?;
        let sequence = lesson_sequence(outline);
        match &state.current {
            None => sequence.first().map(|id| (*id).clone()),
            Some(current) => {
                let pos = sequence.iter().position(|id| **id == current.id)?;
                sequence.get(pos + 1).map(|id| (*id).clone())
            }
        }
    }

    /// Lesson before the current one in reading order.
    pub async fn previous_lesson(&self) -> Option<LessonId> {
        let state = self.state.read().await;
        let outline = state.outline.value()?;
        let current = state.current.as_ref()?;
        let sequence = lesson_sequence(outline);
        let pos = sequence.iter().position(|id| **id == current.id)?;
        pos.checked_sub(1)
            .and_then(|p| sequence.get(p))
            .map(|id| (*id).clone())
    }

    /// Lesson summary from the outline, without fetching detail.
    pub async fn lesson_summary(&self, lesson_id: &LessonId) -> Option<Lesson> {
        let state = self.state.read().await;
        find_lesson(state.outline.value()?, lesson_id).cloned()
    }

    fn fail<T>(&self, context: &str, err: AppError) -> AppResult<T> {
        warn!(error = %err, "{context}");
        self.toaster.error(&err.user_message());
        Err(err)
    }
}
