//! Task domain model
//!
//! A task is one line of a todo.txt file decomposed into typed fields.
//! See [`super::parse`] for the line decomposition and [`super::segment`] for
//! the reverse direction.

use chrono::{DateTime, Local, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::date::{end_of_day, today};
use super::options::Options;
use super::priority::Priority;

/// A todo.txt task entry
///
/// Contexts (`@phone`) describe where or how the work happens, projects
/// (`+garden`) group tasks by what they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Position assigned by the owning list; 0 means unassigned
    #[serde(default)]
    pub id: u32,

    /// Trimmed source line as it was parsed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub original: String,

    /// Free text left once every structured token is removed
    pub todo: String,

    /// Priority letter, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Completion flag (`x ` prefix)
    #[serde(default)]
    pub completed: bool,

    /// When the task was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDate>,

    /// When the task was completed; only meaningful while `completed` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,

    /// Due date, taken from the reserved `due:` tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Contexts (`@token`), unique
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<String>,

    /// Projects (`+token`), unique
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,

    /// `key:value` tags other than `due`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_tags: BTreeMap<String, String>,
}

impl Task {
    /// Creates an empty task created today
    pub fn new() -> Self {
        Self {
            created_date: Some(today()),
            ..Self::default()
        }
    }

    /// Returns true if the task has a priority
    pub fn has_priority(&self) -> bool {
        self.priority.is_some()
    }

    /// Returns true if the task has any projects
    pub fn has_projects(&self) -> bool {
        !self.projects.is_empty()
    }

    /// Returns true if the task has any contexts
    pub fn has_contexts(&self) -> bool {
        !self.contexts.is_empty()
    }

    /// Returns true if the task has tags besides `due`
    pub fn has_additional_tags(&self) -> bool {
        !self.additional_tags.is_empty()
    }

    pub fn has_created_date(&self) -> bool {
        self.created_date.is_some()
    }

    pub fn has_due_date(&self) -> bool {
        self.due_date.is_some()
    }

    /// Returns true if a completion date is set and the task is completed
    pub fn has_completed_date(&self) -> bool {
        self.completed && self.completed_date.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Completion date, ignored while the task is open
    pub fn effective_completed_date(&self) -> Option<NaiveDate> {
        self.completed_date.filter(|_| self.completed)
    }

    /// Marks the task as done today; no-op if already completed
    pub fn complete(&mut self) {
        if !self.completed {
            self.completed = true;
            self.completed_date = Some(today());
        }
    }

    /// Reopens a completed task and clears its completion date
    pub fn reopen(&mut self) {
        if self.completed {
            self.completed = false;
            self.completed_date = None;
        }
    }

    /// Time left until the end of the due day. Negative once overdue.
    ///
    /// Ignores the completion flag.
    pub fn due(&self) -> Option<TimeDelta> {
        self.due_from(Local::now())
    }

    /// Like [`Task::due`], measured from `now`
    pub fn due_from(&self, now: DateTime<Local>) -> Option<TimeDelta> {
        self.due_date.map(|date| end_of_day(date) - now)
    }

    /// Returns true if the due day has fully elapsed
    ///
    /// Ignores the completion flag; check [`Task::is_completed`] first if needed.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Local::now())
    }

    pub fn is_overdue_at(&self, now: DateTime<Local>) -> bool {
        self.due_from(now).is_some_and(|left| left < TimeDelta::zero())
    }

    /// Returns true if the task is due before the end of today
    pub fn is_due_today(&self) -> bool {
        self.is_due_today_at(Local::now())
    }

    pub fn is_due_today_at(&self, now: DateTime<Local>) -> bool {
        self.due_from(now)
            .is_some_and(|left| left > TimeDelta::zero() && left <= TimeDelta::days(1))
    }

    /// Renders the task as one todo.txt line using explicit options
    pub fn render(&self, options: &Options) -> String {
        self.segments_with(options)
            .iter()
            .map(|seg| seg.display.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Canonical todo.txt line, rendered with the process-wide [`Options`]
///
/// Contexts, projects and tags are sorted alphabetically and appended in
/// that order, followed by the due date:
/// `(A) 2013-07-23 Call Dad @Home @Phone +Family custom:1 due:2013-07-31`
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Options::global()))
    }
}
