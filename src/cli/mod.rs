//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `list` | Print tasks as `id<TAB>line`, filtered and sorted |
//! | `add` | Append a task, stamping today's creation date |
//! | `done`, `reopen` | Toggle completion |
//! | `rm` | Remove a task |
//! | `show` | Print the rendered segments of a task |
//! | `sort` | Rewrite the file in sorted order |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr, or set `RUST_LOG`:
//! ```bash
//! todotxt --verbose list --sort due-asc
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod task;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
