//! Task CLI commands

use anyhow::{Context, Result};
use tracing::debug;

use super::app::Session;
use crate::domain::{filters, today, ListError, Predicate, SortKey, Task, TaskList};

/// Narrowing flags of `list`
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    pub completed: bool,
    pub pending: bool,
    pub overdue: bool,
    pub due_today: bool,
}

impl ListFilter {
    /// Completion flags narrow the list; due flags keep a task matching either
    pub fn apply(&self, list: TaskList) -> TaskList {
        let list = if self.completed {
            list.filter(filters::completed)
        } else if self.pending {
            list.filter(filters::not_completed)
        } else {
            list
        };

        let mut due: Vec<Predicate> = Vec::new();
        if self.overdue {
            due.push(filters::overdue);
        }
        if self.due_today {
            due.push(filters::due_today);
        }

        if due.is_empty() {
            list
        } else {
            list.filter_any(&due)
        }
    }
}

fn load(session: &Session) -> Result<TaskList> {
    session.file.read_all(&session.config.options)
}

fn save(session: &Session, list: &TaskList) -> Result<()> {
    session.file.write_all(list, &session.config.options)
}

fn not_found(id: u32) -> anyhow::Error {
    ListError::TaskNotFound(id.to_string()).into()
}

pub fn list(session: &Session, keys: &[SortKey], filter: ListFilter) -> Result<()> {
    let mut list = filter.apply(load(session)?);

    let keys = if keys.is_empty() {
        session.config.default_sort.as_slice()
    } else {
        keys
    };
    debug!(count = list.len(), keys = keys.len(), "listing tasks");
    list.sort(keys);

    let output = &session.output;
    if output.is_json() {
        output.data(&list.as_slice());
    } else {
        let options = &session.config.options;
        for task in &list {
            output.row(&[task.id.to_string().as_str(), task.render(options).as_str()]);
        }
    }

    Ok(())
}

pub fn add(session: &Session, text: &str, stamp_date: bool) -> Result<()> {
    let mut task: Task = text
        .parse()
        .with_context(|| format!("Invalid task: {}", text))?;
    if stamp_date && task.created_date.is_none() {
        task.created_date = Some(today());
    }

    let mut list = load(session)?;
    let id = list.add_task(task.clone());
    task.id = id;
    session.file.append(&task, &session.config.options)?;

    report(session, "Added", &task);
    Ok(())
}

pub fn complete(session: &Session, id: u32) -> Result<()> {
    update(session, id, "Completed", Task::complete)
}

pub fn reopen(session: &Session, id: u32) -> Result<()> {
    update(session, id, "Reopened", Task::reopen)
}

fn update(session: &Session, id: u32, verb: &str, change: fn(&mut Task)) -> Result<()> {
    let mut list = load(session)?;
    let task = list.get_mut(id).ok_or_else(|| not_found(id))?;
    change(task);
    let task = task.clone();

    save(session, &list)?;
    report(session, verb, &task);
    Ok(())
}

pub fn remove(session: &Session, id: u32) -> Result<()> {
    let mut list = load(session)?;
    let task = list.remove_by_id(id)?;

    save(session, &list)?;
    report(session, "Removed", &task);
    Ok(())
}

pub fn show(session: &Session, id: u32) -> Result<()> {
    let list = load(session)?;
    let task = list.get(id).ok_or_else(|| not_found(id))?;
    let segments = task.segments_with(&session.config.options);

    let output = &session.output;
    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id,
            "task": task,
            "segments": segments,
        }));
    } else {
        for segment in &segments {
            output.row(&[segment.kind.label(), segment.display.as_str()]);
        }
    }

    Ok(())
}

pub fn sort(session: &Session, keys: &[SortKey]) -> Result<()> {
    let mut list = load(session)?;
    list.sort(keys);
    save(session, &list)?;

    let keys: Vec<String> = keys.iter().map(SortKey::to_string).collect();
    session.output.success(&format!(
        "Sorted {} tasks by {}",
        list.len(),
        keys.join(", ")
    ));
    Ok(())
}

fn report(session: &Session, verb: &str, task: &Task) {
    let output = &session.output;
    if output.is_json() {
        output.data(task);
    } else {
        output.success(&format!(
            "{} task {}: {}",
            verb,
            task.id,
            task.render(&session.config.options)
        ));
    }
}
