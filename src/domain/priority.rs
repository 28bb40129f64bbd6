//! Task priority
//!
//! A priority is a single uppercase ASCII letter. `A` is the most important.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PriorityError {
    #[error("Invalid priority: expected a letter 'A'-'Z', got '{0}'")]
    Invalid(char),
}

/// Priority letter in the range `A`..=`Z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Priority(char);

impl Priority {
    /// Creates a priority, or `None` if the letter is out of range
    pub fn new(letter: char) -> Option<Self> {
        letter.is_ascii_uppercase().then_some(Self(letter))
    }

    /// Returns the priority letter
    pub fn letter(self) -> char {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<char> for Priority {
    type Error = PriorityError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PriorityError::Invalid(value))
    }
}

impl From<Priority> for char {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_uppercase_letters() {
        assert_eq!(Priority::new('A').map(Priority::letter), Some('A'));
        assert_eq!(Priority::new('Z').map(Priority::letter), Some('Z'));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(Priority::new('a').is_none());
        assert!(Priority::new('1').is_none());
        assert_eq!(Priority::try_from('('), Err(PriorityError::Invalid('(')));
    }

    #[test]
    fn orders_alphabetically() {
        let a = Priority::new('A').unwrap();
        let c = Priority::new('C').unwrap();
        assert!(a < c);
    }
}
