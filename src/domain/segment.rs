//! Segmented rendering of a task
//!
//! [`Task::segments_with`] walks the task fields in canonical order and emits
//! one [`TaskSegment`] per rendered unit. The single-line form
//! ([`Task::render`] / `Display`) is the segment displays joined by single
//! spaces, so both outputs always agree on field order.

use serde::Serialize;
use std::fmt;

use super::date::format_date;
use super::options::Options;
use super::parse::DUE_TAG;
use super::task::Task;

/// Kind of a rendered unit, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    IsCompleted,
    CompletedDate,
    Priority,
    CreatedDate,
    TodoText,
    Context,
    Project,
    Tag,
    DueDate,
}

impl SegmentKind {
    /// Returns a display label for the segment kind
    pub fn label(&self) -> &'static str {
        match self {
            SegmentKind::IsCompleted => "completed",
            SegmentKind::CompletedDate => "completed_date",
            SegmentKind::Priority => "priority",
            SegmentKind::CreatedDate => "created_date",
            SegmentKind::TodoText => "todo",
            SegmentKind::Context => "context",
            SegmentKind::Project => "project",
            SegmentKind::Tag => "tag",
            SegmentKind::DueDate => "due_date",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One labeled piece of a rendered task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSegment {
    pub kind: SegmentKind,
    /// Raw field values; a tag carries its key and value
    pub originals: Vec<String>,
    /// Text as it appears in the rendered line
    pub display: String,
}

impl TaskSegment {
    fn plain(kind: SegmentKind, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind,
            originals: vec![text.clone()],
            display: text,
        }
    }

    fn decorated(kind: SegmentKind, original: &str, display: String) -> Self {
        Self {
            kind,
            originals: vec![original.to_string()],
            display,
        }
    }
}

fn sorted(values: &[String]) -> Vec<&str> {
    let mut values: Vec<&str> = values.iter().map(String::as_str).collect();
    values.sort_unstable();
    values
}

impl Task {
    /// Segments rendered with the process-wide [`Options`]
    pub fn segments(&self) -> Vec<TaskSegment> {
        self.segments_with(&Options::global())
    }

    /// Segments in the same order as the rendered line
    pub fn segments_with(&self, options: &Options) -> Vec<TaskSegment> {
        let mut segs = Vec::new();

        if self.completed {
            segs.push(TaskSegment::plain(SegmentKind::IsCompleted, "x"));
            if let Some(date) = self.effective_completed_date() {
                segs.push(TaskSegment::plain(SegmentKind::CompletedDate, format_date(date)));
            }
        }

        if let Some(priority) = self.priority {
            if !self.completed || !options.remove_completed_priority {
                segs.push(TaskSegment::decorated(
                    SegmentKind::Priority,
                    &priority.to_string(),
                    format!("({})", priority),
                ));
            }
        }

        if let Some(date) = self.created_date {
            segs.push(TaskSegment::plain(SegmentKind::CreatedDate, format_date(date)));
        }

        segs.push(TaskSegment::plain(SegmentKind::TodoText, self.todo.as_str()));

        for context in sorted(&self.contexts) {
            segs.push(TaskSegment::decorated(
                SegmentKind::Context,
                context,
                format!("@{}", context),
            ));
        }

        for project in sorted(&self.projects) {
            segs.push(TaskSegment::decorated(
                SegmentKind::Project,
                project,
                format!("+{}", project),
            ));
        }

        for (key, value) in &self.additional_tags {
            segs.push(TaskSegment {
                kind: SegmentKind::Tag,
                originals: vec![key.clone(), value.clone()],
                display: format!("{}:{}", key, value),
            });
        }

        if let Some(date) = self.due_date {
            segs.push(TaskSegment::plain(
                SegmentKind::DueDate,
                format!("{}:{}", DUE_TAG, format_date(date)),
            ));
        }

        segs
    }
}
