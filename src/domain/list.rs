//! Ordered task collection
//!
//! [`TaskList`] owns the tasks of one todo.txt file in file order and hands
//! out the ids used to address them. Ids are assigned on load (1, 2, 3...)
//! and by [`TaskList::add_task`], which takes one more than the highest id
//! present. Removing the task with the highest id frees that id for the next
//! add.

use std::cmp::Ordering;
use std::fmt;
use std::io::BufRead;

use thiserror::Error;
use tracing::debug;

use super::options::Options;
use super::parse::{parse_task, ParseError, LINE_WHITESPACE};
use super::sort::{sort_tasks, sort_tasks_by_names, SortError, SortKey};
use super::task::Task;

/// Boolean test over a task
pub type Predicate = fn(&Task) -> bool;

#[derive(Debug, Error, PartialEq)]
pub enum ListError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read task list: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {source}")]
    Parse { line: usize, source: ParseError },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whole file body using the process-wide [`Options`]
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        Self::parse_with(text, &Options::global())
    }

    /// Parses a whole file body
    ///
    /// Blank lines are skipped, and so are `#` lines when
    /// `options.ignore_comments` is set. Surviving lines are numbered from 1.
    pub fn parse_with(text: &str, options: &Options) -> Result<Self, LoadError> {
        Self::from_reader(text.as_bytes(), options)
    }

    /// Reads a list line by line from `reader`
    ///
    /// A bad date anywhere aborts the load; the error carries the 1-based
    /// physical line number.
    pub fn from_reader<R: BufRead>(reader: R, options: &Options) -> Result<Self, LoadError> {
        let mut tasks = Vec::new();
        let mut next_id: u32 = 1;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim_matches(LINE_WHITESPACE);

            if text.is_empty() || (options.ignore_comments && text.starts_with('#')) {
                continue;
            }

            let mut task = parse_task(text).map_err(|source| LoadError::Parse {
                line: index + 1,
                source,
            })?;
            task.id = next_id;
            next_id += 1;
            tasks.push(task);
        }

        debug!(count = tasks.len(), "loaded task list");
        Ok(Self { tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Task> {
        self.tasks.iter_mut()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_vec(self) -> Vec<Task> {
        self.tasks
    }

    /// Appends a task and returns the id it was given
    ///
    /// The id is one more than the highest id in the list, whatever id the
    /// task carried before.
    pub fn add_task(&mut self, mut task: Task) -> u32 {
        let id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        task.id = id;
        self.tasks.push(task);
        id
    }

    /// First task with the given id
    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Removes the task with the given id and returns it
    pub fn remove_by_id(&mut self, id: u32) -> Result<Task, ListError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ListError::TaskNotFound(id.to_string()))?;
        Ok(self.tasks.remove(index))
    }

    /// Removes every matching task using the process-wide [`Options`]
    pub fn remove_task(&mut self, task: &Task) -> Result<usize, ListError> {
        self.remove_task_with(task, &Options::global())
    }

    /// Removes every task that renders to the same line as `task`
    ///
    /// Both sides are rendered with `options`. Returns how many tasks were
    /// removed.
    pub fn remove_task_with(
        &mut self,
        task: &Task,
        options: &Options,
    ) -> Result<usize, ListError> {
        let target = task.render(options);
        let before = self.tasks.len();

        self.tasks.retain(|t| t.render(options) != target);

        match before - self.tasks.len() {
            0 => Err(ListError::TaskNotFound(target)),
            removed => Ok(removed),
        }
    }

    /// Tasks matching `predicate`, as a new list
    pub fn filter<P>(&self, predicate: P) -> TaskList
    where
        P: Fn(&Task) -> bool,
    {
        Self {
            tasks: self.tasks.iter().filter(|t| predicate(t)).cloned().collect(),
        }
    }

    /// Tasks matching at least one of `predicates`, as a new list
    pub fn filter_any(&self, predicates: &[Predicate]) -> TaskList {
        self.filter(|task| predicates.iter().any(|p| p(task)))
    }

    /// Sorts in place; the first key is the primary ordering
    pub fn sort(&mut self, keys: &[SortKey]) {
        sort_tasks(&mut self.tasks, keys);
    }

    /// Sorts by key names such as `priority-asc`
    pub fn sort_by_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), SortError> {
        sort_tasks_by_names(&mut self.tasks, names)
    }

    /// Sorts with a caller-supplied ordering
    pub fn sort_with<F>(&mut self, compare: F)
    where
        F: FnMut(&Task, &Task) -> Ordering,
    {
        self.tasks.sort_by(compare);
    }

    /// Renders every task on its own line, each followed by `\n`
    pub fn render(&self, options: &Options) -> String {
        let mut out = String::new();
        for task in &self.tasks {
            out.push_str(&task.render(options));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Options::global()))
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TaskList {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters;
    use crate::domain::parse::DateField;

    const SAMPLE: &str = "\
(A) Call Mom @Phone +Family
# a comment

x 2014-01-03 Create golang library @Go
  (B) 2013-12-01 Outline chapter 5 +Novel due:2014-02-17
";

    fn options() -> Options {
        Options::default()
    }

    #[test]
    fn parse_skips_blank_and_comment_lines() {
        let list = TaskList::parse_with(SAMPLE, &options()).unwrap();

        assert_eq!(list.len(), 3);
        let ids: Vec<u32> = list.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(list.get(3).unwrap().todo, "Outline chapter 5");
    }

    #[test]
    fn comments_parse_when_not_ignored() {
        let list =
            TaskList::parse_with(SAMPLE, &options().with_ignore_comments(false)).unwrap();

        assert_eq!(list.len(), 4);
        assert_eq!(list.get(2).unwrap().todo, "# a comment");
    }

    #[test]
    fn bad_date_reports_physical_line() {
        let err = TaskList::parse_with("ok\n\nbad due:2014-02-31\n", &options()).unwrap_err();

        match err {
            LoadError::Parse { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(
                    source,
                    ParseError::InvalidDate {
                        field: DateField::Due,
                        ..
                    }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn add_task_uses_next_id() {
        let mut list = TaskList::parse_with(SAMPLE, &options()).unwrap();
        list.remove_by_id(2).unwrap();

        let mut task: Task = "New one".parse().unwrap();
        task.id = 42;
        let id = list.add_task(task);

        assert_eq!(id, 4);
        assert_eq!(list.get(4).unwrap().todo, "New one");

        let mut empty = TaskList::new();
        assert_eq!(empty.add_task(Task::default()), 1);
    }

    #[test]
    fn removed_highest_id_is_handed_out_again() {
        let mut list = TaskList::parse_with(SAMPLE, &options()).unwrap();
        list.remove_by_id(3).unwrap();

        let id = list.add_task("Replacement".parse().unwrap());
        assert_eq!(id, 3);
        assert_eq!(list.get(3).unwrap().todo, "Replacement");
    }

    #[test]
    fn remove_by_id_missing() {
        let mut list = TaskList::parse_with(SAMPLE, &options()).unwrap();
        assert_eq!(
            list.remove_by_id(99),
            Err(ListError::TaskNotFound("99".to_string()))
        );
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn remove_task_removes_all_copies() {
        let mut list = TaskList::parse_with("Dup @a\nOther\nDup @a\n", &options()).unwrap();
        let target: Task = "Dup @a".parse().unwrap();

        assert_eq!(list.remove_task_with(&target, &options()), Ok(2));
        assert_eq!(list.len(), 1);
        assert!(list.remove_task_with(&target, &options()).is_err());
    }

    #[test]
    fn remove_task_renders_with_given_options() {
        let text = "x (A) Pay rent
Pay rent
";
        let target: Task = "x Pay rent".parse().unwrap();

        let keep = options().with_remove_completed_priority(false);
        let mut list = TaskList::parse_with(text, &keep).unwrap();
        assert!(list.remove_task_with(&target, &keep).is_err());
        assert_eq!(list.len(), 2);

        let strip = options().with_remove_completed_priority(true);
        assert_eq!(list.remove_task_with(&target, &strip), Ok(1));
        assert_eq!(list.get(2).unwrap().todo, "Pay rent");
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut list = TaskList::parse_with(SAMPLE, &options()).unwrap();
        list.get_mut(1).unwrap().complete();
        assert!(list.get(1).unwrap().is_completed());
        assert!(list.get_mut(10).is_none());
    }

    #[test]
    fn filter_leaves_original_untouched() {
        let list = TaskList::parse_with(SAMPLE, &options()).unwrap();

        let open = list.filter(filters::not_completed);
        assert_eq!(open.len(), 2);
        assert_eq!(list.len(), 3);

        let any = list.filter_any(&[filters::completed, filters::has_due_date]);
        let ids: Vec<u32> = any.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn sort_by_names_and_custom_order() {
        let mut list = TaskList::parse_with(SAMPLE, &options()).unwrap();

        list.sort_by_names(&["priority-desc"]).unwrap();
        let ids: Vec<u32> = list.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        assert!(list.sort_by_names(&["nope"]).is_err());

        list.sort_with(|a, b| a.todo.len().cmp(&b.todo.len()));
        assert_eq!(list.as_slice()[0].todo, "Call Mom");
    }

    #[test]
    fn render_ends_every_line() {
        let list = TaskList::parse_with("b task\na task", &options()).unwrap();
        assert_eq!(list.render(&options()), "b task\na task\n");
        assert_eq!(TaskList::new().render(&options()), "");
    }

    #[test]
    fn from_reader_reads_lines() {
        let reader = std::io::Cursor::new("(C) one\r\ntwo\r\n");
        let list = TaskList::from_reader(reader, &options()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(2).unwrap().original, "two");

        let ids: Vec<u32> = list.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
