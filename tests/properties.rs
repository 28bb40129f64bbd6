//! Property tests for rendering and sorting

use proptest::prelude::*;
use todotxt::{Options, SortKey, Task, TaskList};

fn word() -> impl Strategy<Value = String> {
    "[a-w]{2,8}"
}

fn date() -> impl Strategy<Value = String> {
    (2000u32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

/// A well-formed todo.txt line
fn line() -> impl Strategy<Value = String> {
    (
        prop::option::of(date()),
        prop::option::of("[A-Z]"),
        prop::option::of(date()),
        prop::collection::vec(word(), 1..4),
        prop::collection::vec(word(), 0..3),
        prop::collection::vec(word(), 0..3),
        prop::collection::vec((word(), word()), 0..3),
        prop::option::of(date()),
    )
        .prop_map(
            |(completed, priority, created, text, contexts, projects, tags, due)| {
                let mut parts = Vec::new();
                if let Some(date) = completed {
                    parts.push(format!("x {date}"));
                }
                if let Some(p) = priority {
                    parts.push(format!("({p})"));
                }
                if let Some(date) = created {
                    parts.push(date);
                }
                parts.extend(text);
                parts.extend(contexts.into_iter().map(|c| format!("@{c}")));
                parts.extend(projects.into_iter().map(|p| format!("+{p}")));
                parts.extend(tags.into_iter().map(|(k, v)| format!("k{k}:{v}")));
                if let Some(date) = due {
                    parts.push(format!("due:{date}"));
                }
                parts.join(" ")
            },
        )
}

fn options() -> impl Strategy<Value = Options> {
    any::<bool>().prop_map(|remove| Options::default().with_remove_completed_priority(remove))
}

fn sort_key() -> impl Strategy<Value = SortKey> {
    (1u8..=16).prop_map(|code| SortKey::try_from(code).unwrap())
}

proptest! {
    #[test]
    fn render_is_stable_under_reparse(line in line(), options in options()) {
        let once = line.parse::<Task>().unwrap().render(&options);
        let twice = once.parse::<Task>().unwrap().render(&options);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn segments_join_to_render(line in line(), options in options()) {
        let task: Task = line.parse().unwrap();
        let joined = task
            .segments_with(&options)
            .iter()
            .map(|s| s.display.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        prop_assert_eq!(joined, task.render(&options));
    }

    #[test]
    fn sorting_twice_changes_nothing(
        lines in prop::collection::vec(line(), 0..12),
        key in sort_key(),
    ) {
        let mut list = TaskList::parse_with(&lines.join("\n"), &Options::default()).unwrap();
        list.sort(&[key]);
        let once = list.clone();
        list.sort(&[key]);
        prop_assert_eq!(list, once);
    }

    #[test]
    fn missing_priority_sorts_last(lines in prop::collection::vec(line(), 1..12)) {
        let mut list = TaskList::parse_with(&lines.join("\n"), &Options::default()).unwrap();

        list.sort(&[SortKey::PRIORITY_ASC]);
        let flags: Vec<bool> = list.iter().map(Task::has_priority).collect();
        prop_assert!(flags.windows(2).all(|w| w[0] || !w[1]));

        list.sort(&[SortKey::PRIORITY_DESC]);
        let flags: Vec<bool> = list.iter().map(Task::has_priority).collect();
        prop_assert!(flags.windows(2).all(|w| !w[0] || w[1]));
    }
}
