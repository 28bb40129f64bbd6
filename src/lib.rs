//! todo.txt parsing, rendering and sorting
//!
//! Each line of a todo.txt file is one task: an optional `x ` completion
//! marker and completion date, an optional `(A)` priority, an optional
//! creation date, free text, and inline `@context`, `+project` and
//! `key:value` annotations (`due:YYYY-MM-DD` is the due date).
//!
//! ```
//! use todotxt::{Options, SortKey, TaskList};
//!
//! let mut list = TaskList::parse_with(
//!     "(B) Call Mom @phone\n(A) 2024-01-02 Pay rent +home due:2024-01-31\n",
//!     &Options::default(),
//! )
//! .unwrap();
//! list.sort(&[SortKey::PRIORITY_ASC]);
//!
//! assert_eq!(
//!     list.render(&Options::default()),
//!     "(A) 2024-01-02 Pay rent +home due:2024-01-31\n(B) Call Mom @phone\n"
//! );
//! ```

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{
    filters, parse_task, Options, ParseError, SegmentKind, SortError, SortKey, Task, TaskList,
    TaskSegment,
};
