//! Line decomposition
//!
//! A line is decomposed by a fixed sequence of recognizers. Each recognizer
//! matches against the untouched original line and strips what it found from
//! the residual description, so removing a token never shifts the anchors a
//! later recognizer depends on.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use super::date::parse_date;
use super::pattern::{
    self, COMPLETED, COMPLETED_DATE, CONTEXT, CREATED_DATE, PRIORITY, PROJECT, TAG,
};
use super::priority::Priority;
use super::task::Task;

/// Reserved tag key holding the due date
pub const DUE_TAG: &str = "due";

/// Characters trimmed from both ends of a line
pub const LINE_WHITESPACE: &[char] = &['\t', '\n', '\r', ' '];

/// Date-bearing fields of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Created,
    Completed,
    Due,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateField::Created => "created",
            DateField::Completed => "completed",
            DateField::Due => "due",
        })
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid {field} date: '{value}'")]
    InvalidDate { field: DateField, value: String },
}

/// Working state shared by the recognizers
struct Scan<'a> {
    original: &'a str,
    residual: String,
}

impl Scan<'_> {
    fn strip(&mut self, rx: &regex::Regex) {
        self.residual = pattern::strip(rx, &self.residual);
    }
}

type Recognizer = fn(&mut Scan<'_>, &mut Task) -> Result<(), ParseError>;

/// Recognizers in precedence order
const RECOGNIZERS: [Recognizer; 6] = [
    recognize_completion,
    recognize_priority,
    recognize_created_date,
    recognize_contexts,
    recognize_projects,
    recognize_tags,
];

/// Parses one todo.txt line into a [`Task`]
///
/// Fails on the first date token that is not a valid calendar date.
pub fn parse_task(line: &str) -> Result<Task, ParseError> {
    let original = line.trim_matches(LINE_WHITESPACE);
    let mut task = Task {
        original: original.to_string(),
        ..Task::default()
    };
    let mut scan = Scan {
        original,
        residual: original.to_string(),
    };

    for recognize in RECOGNIZERS {
        recognize(&mut scan, &mut task)
            .inspect_err(|e| debug!(line = original, error = %e, "rejected task line"))?;
    }

    task.todo = scan
        .residual
        .trim_matches(|c| matches!(c, '\t' | '\n' | '\r' | '\x0c' | ' '))
        .to_string();

    Ok(task)
}

fn date_token(field: DateField, value: &str) -> Result<chrono::NaiveDate, ParseError> {
    parse_date(value).ok_or_else(|| ParseError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn recognize_completion(scan: &mut Scan<'_>, task: &mut Task) -> Result<(), ParseError> {
    if !COMPLETED.is_match(scan.original) {
        return Ok(());
    }

    task.completed = true;
    if let Some(value) = pattern::capture(&COMPLETED_DATE, scan.original, 1) {
        task.completed_date = Some(date_token(DateField::Completed, value)?);
    }

    // The dated form has to go first: once `x ` is gone it no longer matches
    scan.strip(&COMPLETED_DATE);
    scan.strip(&COMPLETED);
    Ok(())
}

fn recognize_priority(scan: &mut Scan<'_>, task: &mut Task) -> Result<(), ParseError> {
    let letter = pattern::capture(&PRIORITY, scan.original, 2).and_then(|p| p.chars().next());
    if let Some(letter) = letter {
        task.priority = Priority::new(letter);
        scan.strip(&PRIORITY);
    }
    Ok(())
}

fn recognize_created_date(scan: &mut Scan<'_>, task: &mut Task) -> Result<(), ParseError> {
    if let Some(value) = pattern::capture(&CREATED_DATE, scan.original, 2) {
        task.created_date = Some(date_token(DateField::Created, value)?);
        scan.strip(&CREATED_DATE);
    }
    Ok(())
}

fn recognize_contexts(scan: &mut Scan<'_>, task: &mut Task) -> Result<(), ParseError> {
    if CONTEXT.is_match(scan.original) {
        task.contexts = pattern::collect_tokens(&CONTEXT, scan.original);
        scan.strip(&CONTEXT);
    }
    Ok(())
}

fn recognize_projects(scan: &mut Scan<'_>, task: &mut Task) -> Result<(), ParseError> {
    if PROJECT.is_match(scan.original) {
        task.projects = pattern::collect_tokens(&PROJECT, scan.original);
        scan.strip(&PROJECT);
    }
    Ok(())
}

fn recognize_tags(scan: &mut Scan<'_>, task: &mut Task) -> Result<(), ParseError> {
    if !TAG.is_match(scan.original) {
        return Ok(());
    }

    for caps in TAG.captures_iter(scan.original) {
        let (key, value) = (&caps[2], &caps[3]);
        if key == DUE_TAG {
            task.due_date = Some(date_token(DateField::Due, value)?);
        } else if !key.is_empty() && !value.is_empty() {
            task.additional_tags.insert(key.to_string(), value.to_string());
        }
    }

    scan.strip(&TAG);
    Ok(())
}

impl FromStr for Task {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_task(s)
    }
}
