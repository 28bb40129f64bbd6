//! Multi-key task ordering
//!
//! A sort is a list of [`SortKey`]s. The first key is the primary ordering and
//! each following key only breaks the ties left by the keys before it. This is
//! done by running one stable sort per key in reverse order, from the least
//! significant key to the most significant: every pass keeps the relative
//! order earlier passes left among the tasks it considers equal.
//!
//! Missing values (no priority, no date, no contexts/projects) sort after
//! present ones in ascending order and before them in descending order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use super::task::Task;

#[derive(Debug, Error, PartialEq)]
pub enum SortError {
    #[error("Unrecognized sort option: '{0}'")]
    UnrecognizedOption(String),
}

/// Task field a sort pass compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    TaskId,
    TodoText,
    Priority,
    CreatedDate,
    CompletedDate,
    DueDate,
    Context,
    Project,
}

impl SortField {
    const ALL: [SortField; 8] = [
        SortField::TaskId,
        SortField::TodoText,
        SortField::Priority,
        SortField::CreatedDate,
        SortField::CompletedDate,
        SortField::DueDate,
        SortField::Context,
        SortField::Project,
    ];

    /// Returns the name used in sort key strings
    pub fn name(&self) -> &'static str {
        match self {
            SortField::TaskId => "id",
            SortField::TodoText => "text",
            SortField::Priority => "priority",
            SortField::CreatedDate => "created",
            SortField::CompletedDate => "completed",
            SortField::DueDate => "due",
            SortField::Context => "context",
            SortField::Project => "project",
        }
    }

    /// Ascending comparison of two tasks on this field
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortField::TaskId => a.id.cmp(&b.id),
            SortField::TodoText => a.todo.cmp(&b.todo),
            SortField::Priority => missing_last(a.priority, b.priority),
            SortField::CreatedDate => missing_last(a.created_date, b.created_date),
            SortField::CompletedDate => {
                missing_last(a.effective_completed_date(), b.effective_completed_date())
            }
            SortField::DueDate => missing_last(a.due_date, b.due_date),
            SortField::Context => compare_tokens(&a.contexts, &b.contexts),
            SortField::Project => compare_tokens(&a.projects, &b.projects),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// One sort pass: a field and a direction
///
/// Written as `<field>-<direction>`, e.g. `priority-asc` or `due-desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
}

impl SortKey {
    pub const TASK_ID_ASC: SortKey = SortKey::asc(SortField::TaskId);
    pub const TASK_ID_DESC: SortKey = SortKey::desc(SortField::TaskId);
    pub const TODO_TEXT_ASC: SortKey = SortKey::asc(SortField::TodoText);
    pub const TODO_TEXT_DESC: SortKey = SortKey::desc(SortField::TodoText);
    pub const PRIORITY_ASC: SortKey = SortKey::asc(SortField::Priority);
    pub const PRIORITY_DESC: SortKey = SortKey::desc(SortField::Priority);
    pub const CREATED_DATE_ASC: SortKey = SortKey::asc(SortField::CreatedDate);
    pub const CREATED_DATE_DESC: SortKey = SortKey::desc(SortField::CreatedDate);
    pub const COMPLETED_DATE_ASC: SortKey = SortKey::asc(SortField::CompletedDate);
    pub const COMPLETED_DATE_DESC: SortKey = SortKey::desc(SortField::CompletedDate);
    pub const DUE_DATE_ASC: SortKey = SortKey::asc(SortField::DueDate);
    pub const DUE_DATE_DESC: SortKey = SortKey::desc(SortField::DueDate);
    pub const CONTEXT_ASC: SortKey = SortKey::asc(SortField::Context);
    pub const CONTEXT_DESC: SortKey = SortKey::desc(SortField::Context);
    pub const PROJECT_ASC: SortKey = SortKey::asc(SortField::Project);
    pub const PROJECT_DESC: SortKey = SortKey::desc(SortField::Project);

    pub const fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub const fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }

    /// Compares two tasks under this key
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        self.direction.apply(self.field.compare(a, b))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field.name(), self.direction.name())
    }
}

impl FromStr for SortKey {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unrecognized = || SortError::UnrecognizedOption(s.to_string());
        let (field, direction) = s.trim().rsplit_once('-').ok_or_else(unrecognized)?;

        let field = SortField::ALL
            .into_iter()
            .find(|f| f.name() == field)
            .ok_or_else(unrecognized)?;
        let direction = match direction {
            "asc" => Direction::Asc,
            "desc" => Direction::Desc,
            _ => return Err(unrecognized()),
        };

        Ok(Self { field, direction })
    }
}

/// Numeric codes 1..=16: each field in [`SortField`] order, ascending then
/// descending
impl TryFrom<u8> for SortKey {
    type Error = SortError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        let unrecognized = || SortError::UnrecognizedOption(code.to_string());
        let index = usize::from(code.checked_sub(1).ok_or_else(unrecognized)?);
        let field = SortField::ALL.get(index / 2).ok_or_else(unrecognized)?;

        Ok(if index % 2 == 0 {
            SortKey::asc(*field)
        } else {
            SortKey::desc(*field)
        })
    }
}

impl TryFrom<String> for SortKey {
    type Error = SortError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.to_string()
    }
}

/// Absent values order after present ones
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Element-wise comparison where an empty list counts as absent
fn compare_tokens(a: &[String], b: &[String]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Sorts tasks in place; the first key is the primary ordering
pub fn sort_tasks(tasks: &mut [Task], keys: &[SortKey]) {
    for key in keys.iter().rev() {
        debug!(key = %key, len = tasks.len(), "sort pass");
        tasks.sort_by(|a, b| key.compare(a, b));
    }
}

/// Parses every key name, then sorts
///
/// Nothing is reordered when a name is not recognized.
pub fn sort_tasks_by_names<S: AsRef<str>>(
    tasks: &mut [Task],
    names: &[S],
) -> Result<(), SortError> {
    let keys = names
        .iter()
        .map(|name| name.as_ref().parse())
        .collect::<Result<Vec<SortKey>, _>>()?;
    sort_tasks(tasks, &keys);
    Ok(())
}
