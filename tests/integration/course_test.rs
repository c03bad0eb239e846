//! Course player integration tests.

mod helpers;

use carebridge_core::traits::ToastLevel;
use carebridge_core::types::{CourseId, LessonId};
use carebridge_entity::course::LessonContent;
use carebridge_service::{CoursePlayer, SectionLessons};
use helpers::{MockBackend, lesson, section};

async fn seeded(wrapped: bool) -> MockBackend {
    let backend = if wrapped {
        MockBackend::start_wrapped().await
    } else {
        MockBackend::start().await
    };
    backend.state.sections.lock().unwrap().extend([
        section("s2", "c1", 2),
        section("s1", "c1", 1),
        section("other", "c2", 1),
    ]);
    backend.state.lessons.lock().unwrap().extend([
        lesson("l2", "s1", 2, "article"),
        lesson("l1", "s1", 1, "video"),
        lesson("l3", "s2", 1, "file"),
        lesson("l4", "s2", 2, "video"),
    ]);
    backend
}

fn lesson_ids(lessons: &SectionLessons) -> Vec<String> {
    lessons.lessons().iter().map(|l| l.id.to_string()).collect()
}

#[tokio::test]
async fn test_open_builds_ordered_outline() {
    let backend = seeded(false).await;
    let (api, bus, toasts) = backend.harness();
    let player = CoursePlayer::new(api, bus, toasts.clone());

    player.open(&CourseId::new("c1")).await.unwrap();

    let outline = player.outline().await;
    let sections: Vec<String> = outline.iter().map(|s| s.section.id.to_string()).collect();
    assert_eq!(sections, vec!["s1", "s2"]);
    assert_eq!(lesson_ids(&outline[0].lessons), vec!["l1", "l2"]);
    assert_eq!(lesson_ids(&outline[1].lessons), vec!["l3", "l4"]);
    assert_eq!(player.percent_label().await, "0%");
    assert!(toasts.messages(ToastLevel::Error).is_empty());
}

#[tokio::test]
async fn test_failing_section_is_isolated() {
    let backend = seeded(true).await;
    backend
        .state
        .failing_sections
        .lock()
        .unwrap()
        .push("s2".to_string());
    let (api, bus, toasts) = backend.harness();
    let player = CoursePlayer::new(api, bus, toasts.clone());

    player.open(&CourseId::new("c1")).await.unwrap();

    let outline = player.outline().await;
    assert_eq!(lesson_ids(&outline[0].lessons), vec!["l1", "l2"]);
    assert!(outline[1].lessons.is_failed());
    assert_eq!(
        toasts.messages(ToastLevel::Error),
        vec!["Failed to load lessons for: Section s2"]
    );
    // Progress still loads after a partial outline.
    assert!(player.progress().await.is_some());
}

#[tokio::test]
async fn test_select_and_complete_lessons() {
    let backend = seeded(false).await;
    let (api, bus, toasts) = backend.harness();
    let player = CoursePlayer::new(api, bus, toasts.clone());
    player.open(&CourseId::new("c1")).await.unwrap();

    let selected = player
        .select_lesson(&LessonId::new("l1"))
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(selected.content(), LessonContent::Video { url: Some(_) }));
    assert_eq!(
        player.next_lesson().await.map(|id| id.to_string()),
        Some("l2".to_string())
    );

    assert_eq!(player.mark_complete(&LessonId::new("l1")).await.unwrap(), 25);
    assert_eq!(player.mark_complete(&LessonId::new("l2")).await.unwrap(), 50);
    // Completing twice is accepted and changes nothing.
    assert_eq!(player.mark_complete(&LessonId::new("l2")).await.unwrap(), 50);

    assert!(player.is_completed(&LessonId::new("l1")).await);
    assert!(!player.is_completed(&LessonId::new("l3")).await);
    assert_eq!(player.percent_label().await, "50%");
    assert_eq!(toasts.messages(ToastLevel::Success).len(), 3);
}

#[tokio::test]
async fn test_missing_lesson_keeps_current() {
    let backend = seeded(false).await;
    let (api, bus, toasts) = backend.harness();
    let player = CoursePlayer::new(api, bus, toasts.clone());
    player.open(&CourseId::new("c1")).await.unwrap();
    player.select_lesson(&LessonId::new("l3")).await.unwrap();

    let err = player
        .select_lesson(&LessonId::new("nope"))
        .await
        .unwrap_err();
    assert_eq!(err.message, "Lesson not found");
    assert_eq!(
        player.current_lesson().await.map(|l| l.id.to_string()),
        Some("l3".to_string())
    );
    assert_eq!(toasts.messages(ToastLevel::Error), vec!["Lesson not found"]);
}
