//! Course player CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use carebridge_core::error::AppError;
use carebridge_core::types::{CourseId, LessonId};
use carebridge_entity::course::{Lesson, LessonContent};
use carebridge_service::{CoursePlayer, SectionLessons};

use super::Context;
use crate::output::{self, OutputFormat};

/// Arguments for course commands
#[derive(Debug, Args)]
pub struct CourseArgs {
    /// Course subcommand
    #[command(subcommand)]
    pub command: CourseCommand,
}

/// Course subcommands
#[derive(Debug, Subcommand)]
pub enum CourseCommand {
    /// Show sections and lessons with completion marks
    Outline {
        /// Course ID
        course: CourseId,
    },
    /// Show one lesson's content
    Lesson {
        /// Course ID
        course: CourseId,
        /// Lesson ID
        lesson: LessonId,
    },
    /// Mark a lesson complete
    Complete {
        /// Course ID
        course: CourseId,
        /// Lesson ID
        lesson: LessonId,
    },
    /// Show completion percentage
    Progress {
        /// Course ID
        course: CourseId,
    },
}

/// Outline display row for table output
#[derive(Debug, Serialize, Tabled)]
struct OutlineRow {
    /// Section title
    section: String,
    /// Position within the section
    #[tabled(rename = "#")]
    order: i32,
    /// Lesson ID
    lesson_id: String,
    /// Lesson title
    title: String,
    /// Lesson type
    #[tabled(rename = "type")]
    kind: String,
    /// Duration in minutes
    minutes: String,
    /// Completion mark
    done: &'static str,
}

/// Execute course commands
pub async fn execute(args: &CourseArgs, ctx: &Context) -> Result<(), AppError> {
    let player = ctx.course_player();

    match &args.command {
        CourseCommand::Outline { course } => {
            player.open(course).await?;
            print_outline(&player, ctx.format).await;
        }
        CourseCommand::Lesson { course, lesson } => {
            player.open(course).await?;
            if let Some(detail) = player.select_lesson(lesson).await? {
                let completed = player.is_completed(lesson).await;
                match ctx.format {
                    OutputFormat::Json => output::print_json(&detail),
                    OutputFormat::Table => print_lesson(&detail, completed),
                }
            }
        }
        CourseCommand::Complete { course, lesson } => {
            player.open(course).await?;
            player.mark_complete(lesson).await?;
            output::print_kv("Progress", &player.percent_label().await);
        }
        CourseCommand::Progress { course } => {
            player.refresh_progress(course).await?;
            match ctx.format {
                OutputFormat::Json => output::print_json(&player.progress().await),
                OutputFormat::Table => println!("{}", player.percent_label().await),
            }
        }
    }

    Ok(())
}

async fn print_outline(player: &CoursePlayer, format: OutputFormat) {
    let outline = player.outline().await;
    if format == OutputFormat::Json {
        output::print_json(&outline);
        return;
    }

    let mut rows = Vec::new();
    for entry in &outline {
        if let SectionLessons::Failed(reason) = &entry.lessons {
            output::print_warning(&format!("{}: {reason}", entry.section.title));
        }
        for lesson in entry.lessons.lessons() {
            rows.push(OutlineRow {
                section: entry.section.title.clone(),
                order: lesson.order,
                lesson_id: lesson.id.to_string(),
                title: lesson.title.clone(),
                kind: lesson.kind.to_string(),
                minutes: lesson.duration.map(|d| d.to_string()).unwrap_or_default(),
                done: if player.is_completed(&lesson.id).await { "✓" } else { "" },
            });
        }
    }
    output::print_list(&rows, format);
    output::print_kv("Progress", &player.percent_label().await);
}

fn print_lesson(lesson: &Lesson, completed: bool) {
    println!("{}", lesson.title);
    output::print_kv("Type", lesson.kind.as_str());
    if let Some(minutes) = lesson.duration {
        output::print_kv("Duration", &format!("{minutes} min"));
    }
    output::print_kv("Completed", if completed { "yes" } else { "no" });
    if let Some(description) = &lesson.description {
        println!("\n{description}");
    }
    println!();

    match lesson.content() {
        LessonContent::Video { url: Some(url) } => output::print_kv("Video", url),
        LessonContent::Video { url: None } => output::print_warning("No video attached"),
        LessonContent::Article { html } => println!("{html}"),
        LessonContent::File { attachments } if attachments.is_empty() => {
            output::print_warning("No files attached")
        }
        LessonContent::File { attachments } => {
            for file in attachments {
                output::print_kv(&file.name, &file.url);
            }
        }
    }
}
