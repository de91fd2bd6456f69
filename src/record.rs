//! Classification Records
//!
//! The output shape shared by both classification paths, plus the input
//! cleanup that turns raw strings into tasks.

use crate::core::vocabulary::Tag;
use crate::error::{TaggerError, TaggerResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum summary length, in characters
pub const MAX_SUMMARY_CHARS: usize = 50;

/// Task priority in `1..=5`, 5 being the most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: Priority = Priority(1);
    pub const LOW: Priority = Priority(2);
    pub const DEFAULT: Priority = Priority(3);
    pub const HIGH: Priority = Priority(4);
    pub const MAX: Priority = Priority(5);

    /// Returns `None` outside `1..=5`
    pub fn new(value: u8) -> Option<Self> {
        (1..=5).contains(&value).then_some(Priority(value))
    }

    /// Force any score into range
    pub fn clamped(value: i64) -> Self {
        Priority(value.clamp(1, 5) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Priority::new(value).ok_or_else(|| format!("priority {value} outside 1..=5"))
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One classified task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// The task text as submitted (after trimming)
    pub original: String,
    /// Condensed description, at most [`MAX_SUMMARY_CHARS`] characters
    pub summary: String,
    /// One or two tags in relevance order
    pub tags: Vec<Tag>,
    pub priority: Priority,
}

impl ClassificationRecord {
    /// Tags joined the way exporters display them
    pub fn tags_text(&self) -> String {
        self.tags
            .iter()
            .map(Tag::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Trim every entry and drop the blank ones.
///
/// Fails with [`TaggerError::NoValidTasks`] when nothing is left.
pub fn prepare_tasks<I, S>(raw: I) -> TaggerResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tasks: Vec<String> = raw
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if tasks.is_empty() {
        return Err(TaggerError::NoValidTasks);
    }
    Ok(tasks)
}

/// Cut a string to at most `max` characters without splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
