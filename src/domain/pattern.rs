//! Token patterns of a todo.txt line
//!
//! Anchored patterns enumerate every legal prefix explicitly (completion
//! marker, completion date, priority) instead of relying on earlier steps
//! having stripped them, because matching always runs against the untouched
//! original line.
//!
//! Token separators are tab, newline, form feed, carriage return and space
//! only. Other Unicode spaces (e.g. U+00A0) are part of a token.
//!
//! | Pattern | Matches | Capture |
//! |---------|---------|---------|
//! | [`PRIORITY`] | `(A) `, `x (A) `, `x 2012-12-12 (A) ` | 2: letter |
//! | [`CREATED_DATE`] | `2012-12-12 ` after any legal prefix | 2: date |
//! | [`COMPLETED`] | `x ` | |
//! | [`COMPLETED_DATE`] | `x 2012-12-12 ` | 1: date |
//! | [`TAG`] | `key:value` anywhere | 2: key, 3: value |
//! | [`CONTEXT`] | `@token` anywhere | 2: token |
//! | [`PROJECT`] | `+token` anywhere | 2: token |

use regex::Regex;
use std::sync::LazyLock;

pub static PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(x|x [0-9]{4}-[0-9]{2}-[0-9]{2}|)[\t\n\x0C\r ]*\(([A-Z])\)[\t\n\x0C\r ]+").unwrap()
});

pub static CREATED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\([A-Z]\)|x [0-9]{4}-[0-9]{2}-[0-9]{2} \([A-Z]\)|x \([A-Z]\)|x [0-9]{4}-[0-9]{2}-[0-9]{2}|)[\t\n\x0C\r ]*([0-9]{4}-[0-9]{2}-[0-9]{2})[\t\n\x0C\r ]+",
    )
    .unwrap()
});

pub static COMPLETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^x[\t\n\x0C\r ]+").unwrap());

pub static COMPLETED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^x[\t\n\x0C\r ]*([0-9]{4}-[0-9]{2}-[0-9]{2})[\t\n\x0C\r ]+").unwrap()
});

pub static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[\t\n\x0C\r ]+)([^:\t\n\x0C\r ]+):([^:\t\n\x0C\r ]+)").unwrap()
});

pub static CONTEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[\t\n\x0C\r ]+)@([^\t\n\x0C\r ]+)").unwrap());

pub static PROJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[\t\n\x0C\r ]+)\+([^\t\n\x0C\r ]+)").unwrap());

/// Returns capture group `group` of the first match in `text`
pub fn capture<'t>(rx: &Regex, text: &'t str, group: usize) -> Option<&'t str> {
    rx.captures(text)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str())
}

/// Removes every match of `rx` from `text`
pub fn strip(rx: &Regex, text: &str) -> String {
    rx.replace_all(text, "").into_owned()
}

/// Collects capture group 2 of every match, deduplicated and sorted
pub fn collect_tokens(rx: &Regex, text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for caps in rx.captures_iter(text) {
        let word = caps[2].trim_matches(super::parse::LINE_WHITESPACE);
        if !tokens.iter().any(|t| t == word) {
            tokens.push(word.to_string());
        }
    }
    tokens.sort();
    tokens
}
