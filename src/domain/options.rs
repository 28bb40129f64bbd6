//! Formatting and loading options
//!
//! Every operation that depends on these switches has a variant taking an
//! explicit [`Options`]. The plain variants (`Display`, [`Task::segments`],
//! [`TaskList::parse`]) read the process-wide default instead.
//!
//! The process-wide default is stored in atomics, so concurrent reads and
//! writes are memory-safe, but output is only predictable when it is set once
//! before use.
//!
//! [`Task::segments`]: super::Task::segments
//! [`TaskList::parse`]: super::TaskList::parse

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

static IGNORE_COMMENTS: AtomicBool = AtomicBool::new(true);
static REMOVE_COMPLETED_PRIORITY: AtomicBool = AtomicBool::new(true);

/// Switches affecting list loading and task rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Skip lines starting with `#` when loading a list
    pub ignore_comments: bool,

    /// Leave the priority out when rendering a completed task
    /// (the parsed priority stays on the record)
    pub remove_completed_priority: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ignore_comments: true,
            remove_completed_priority: true,
        }
    }
}

impl Options {
    /// Returns the current process-wide options
    pub fn global() -> Self {
        Self {
            ignore_comments: IGNORE_COMMENTS.load(Ordering::Relaxed),
            remove_completed_priority: REMOVE_COMPLETED_PRIORITY.load(Ordering::Relaxed),
        }
    }

    /// Replaces the process-wide options
    pub fn set_global(self) {
        IGNORE_COMMENTS.store(self.ignore_comments, Ordering::Relaxed);
        REMOVE_COMPLETED_PRIORITY.store(self.remove_completed_priority, Ordering::Relaxed);
    }

    /// Builder: sets `ignore_comments`
    pub fn with_ignore_comments(mut self, ignore: bool) -> Self {
        self.ignore_comments = ignore;
        self
    }

    /// Builder: sets `remove_completed_priority`
    pub fn with_remove_completed_priority(mut self, remove: bool) -> Self {
        self.remove_completed_priority = remove;
        self
    }
}
