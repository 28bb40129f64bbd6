//! Stock predicates for [`TaskList::filter`](super::TaskList::filter) and
//! [`TaskList::filter_any`](super::TaskList::filter_any)

use super::task::Task;

pub fn completed(task: &Task) -> bool {
    task.is_completed()
}

pub fn not_completed(task: &Task) -> bool {
    !task.is_completed()
}

/// Due before the end of today, measured against the current clock
pub fn due_today(task: &Task) -> bool {
    task.is_due_today()
}

/// Due day already over, measured against the current clock
pub fn overdue(task: &Task) -> bool {
    task.is_overdue()
}

pub fn has_due_date(task: &Task) -> bool {
    task.has_due_date()
}

pub fn has_priority(task: &Task) -> bool {
    task.has_priority()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::date::today;
    use chrono::Days;

    #[test]
    fn completion_filters_are_complementary() {
        let done: Task = "x Finished".parse().unwrap();
        let open: Task = "(A) Pending".parse().unwrap();

        assert!(completed(&done) && !not_completed(&done));
        assert!(not_completed(&open) && !completed(&open));
        assert!(has_priority(&open));
        assert!(!has_priority(&done));
    }

    #[test]
    fn due_filters() {
        let due_now = Task {
            due_date: Some(today()),
            ..Task::default()
        };
        let late = Task {
            due_date: today().checked_sub_days(Days::new(2)),
            ..Task::default()
        };

        assert!(has_due_date(&due_now));
        assert!(due_today(&due_now));
        assert!(!overdue(&due_now));

        assert!(overdue(&late));
        assert!(!due_today(&late));

        assert!(!has_due_date(&Task::default()));
    }
}
