//! # Storage Layer
//!
//! File persistence for todo.txt lists and user configuration.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | todo.txt (one task per line) | `--file`, config `todo_file`, or `./todo.txt` |
//! | Config | TOML | `--config`, or `<config dir>/todotxt/config.toml` |
//!
//! [`TodoFile`] locks the file (`fs2`) while reading or writing, and full
//! rewrites are atomic (temp file + rename).

mod config;
mod todo_file;

pub use config::{Config, ConfigError};
pub use todo_file::{TodoFile, DEFAULT_FILE_NAME};
