//! Domain models for todo.txt
//!
//! Parsing, rendering, sorting and filtering of tasks, without any I/O
//! concerns beyond reading from a caller-supplied [`std::io::BufRead`].

mod date;
mod list;
mod options;
mod parse;
mod pattern;
mod priority;
mod segment;
mod sort;
mod task;

pub mod filters;

pub use date::{format_date, parse_date, today, DATE_LAYOUT};
pub use list::{ListError, LoadError, Predicate, TaskList};
pub use options::Options;
pub use parse::{parse_task, DateField, ParseError, DUE_TAG};
pub use priority::{Priority, PriorityError};
pub use segment::{SegmentKind, TaskSegment};
pub use sort::{sort_tasks, sort_tasks_by_names, Direction, SortError, SortField, SortKey};
pub use task::Task;
