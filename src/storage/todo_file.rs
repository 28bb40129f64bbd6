//! todo.txt file storage
//!
//! One task per line in canonical form. Reads take a shared lock, writes an
//! exclusive one; full rewrites go through a temp file and a rename.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tracing::debug;

use crate::domain::{Options, Task, TaskList};

/// Default file name when nothing else is configured
pub const DEFAULT_FILE_NAME: &str = "todo.txt";

/// A todo.txt file on disk
pub struct TodoFile {
    path: PathBuf,
}

impl TodoFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }

    /// Reads every task; a missing file is an empty list
    pub fn read_all(&self, options: &Options) -> Result<TaskList> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "todo file missing, starting empty");
            return Ok(TaskList::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open todo file: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on todo file")?;

        // Lock is released when file is dropped
        TaskList::from_reader(BufReader::new(&file), options)
            .with_context(|| format!("Failed to load todo file: {}", self.path.display()))
    }

    /// Replaces the file contents with `tasks`
    pub fn write_all(&self, tasks: &TaskList, options: &Options) -> Result<()> {
        self.ensure_parent()?;
        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on todo file")?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(tasks.render(options).as_bytes())
                .context("Failed to write tasks")?;
            writer.flush().context("Failed to flush todo file")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        debug!(path = %self.path.display(), count = tasks.len(), "wrote todo file");
        Ok(())
    }

    /// Appends one task as a new last line
    pub fn append(&self, task: &Task, options: &Options) -> Result<()> {
        self.ensure_parent()?;

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open todo file: {}", self.path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock on todo file")?;

        let mut line = String::new();
        if !ends_with_newline(&mut file)? {
            line.push('\n');
        }
        line.push_str(&task.render(options));
        line.push('\n');

        let mut writer = BufWriter::new(&file);
        writer
            .write_all(line.as_bytes())
            .context("Failed to write task")?;
        writer.flush().context("Failed to flush todo file")?;

        Ok(())
    }
}

/// True for an empty file or one whose last byte is `\n`
fn ends_with_newline(file: &mut File) -> Result<bool> {
    let len = file.metadata().context("Failed to stat todo file")?.len();
    if len == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))
        .and_then(|_| file.read_exact(&mut last))
        .context("Failed to read end of todo file")?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options() -> Options {
        Options::default()
    }

    #[test]
    fn read_missing_file() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        let tasks = file.read_all(&options()).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn write_and_read_tasks() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        let list = TaskList::parse_with("(A) Call Mom @phone\nx 2020-01-01 Pay rent\n", &options())
            .unwrap();
        file.write_all(&list, &options()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "(A) Call Mom @phone\nx 2020-01-01 Pay rent\n");

        let loaded = file.read_all(&options()).unwrap();
        assert_eq!(loaded, list);
    }

    #[test]
    fn append_task() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        file.append(&"First".parse().unwrap(), &options()).unwrap();
        file.append(&"Second +p".parse().unwrap(), &options()).unwrap();

        let loaded = file.read_all(&options()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(2).unwrap().projects, vec!["p"]);
    }

    #[test]
    fn append_after_unterminated_line() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));
        fs::write(file.path(), "Hand written").unwrap();

        file.append(&"Added".parse().unwrap(), &options()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "Hand written\nAdded\n");
    }

    #[test]
    fn read_reports_bad_line() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));
        fs::write(file.path(), "ok\n2014-13-01 broken\n").unwrap();

        let err = file.read_all(&options()).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Failed to load todo file"));
        assert!(chain.contains("Line 2"));
        assert!(chain.contains("2014-13-01"));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("nested").join("dir").join("todo.txt"));

        file.append(&"Task".parse().unwrap(), &options()).unwrap();

        assert!(file.path().exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        file.write_all(&TaskList::new(), &options()).unwrap();

        assert!(file.path().exists());
        assert!(!dir.path().join("todo.txt.tmp").exists());
    }
}
