//! Controlled Tag Vocabulary
//!
//! The closed set of labels a task may carry. Both the rule tables and the
//! remote instruction payload are built from [`VOCABULARY`], so the two
//! classification paths always agree on what a valid tag is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tag from the controlled vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    #[serde(rename = "#urgent")]
    Urgent,
    #[serde(rename = "#frontend")]
    Frontend,
    #[serde(rename = "#backend")]
    Backend,
    #[serde(rename = "#client")]
    Client,
    #[serde(rename = "#meeting")]
    Meeting,
    #[serde(rename = "#documentation")]
    Documentation,
    #[serde(rename = "#bug")]
    Bug,
    #[serde(rename = "#research")]
    Research,
    #[serde(rename = "#design")]
    Design,
    #[serde(rename = "#legal")]
    Legal,
    #[serde(rename = "#optimization")]
    Optimization,
    #[serde(rename = "#planning")]
    Planning,
}

/// Every permitted tag, in the order presented to the remote model
pub const VOCABULARY: &[Tag] = &[
    Tag::Urgent,
    Tag::Frontend,
    Tag::Backend,
    Tag::Client,
    Tag::Meeting,
    Tag::Documentation,
    Tag::Bug,
    Tag::Research,
    Tag::Design,
    Tag::Legal,
    Tag::Optimization,
    Tag::Planning,
];

/// Tag applied when nothing else matches
pub const DEFAULT_TAG: Tag = Tag::Planning;

/// Upper bound on tags per record
pub const MAX_TAGS: usize = 2;

impl Tag {
    /// Label with the leading `#`
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Urgent => "#urgent",
            Tag::Frontend => "#frontend",
            Tag::Backend => "#backend",
            Tag::Client => "#client",
            Tag::Meeting => "#meeting",
            Tag::Documentation => "#documentation",
            Tag::Bug => "#bug",
            Tag::Research => "#research",
            Tag::Design => "#design",
            Tag::Legal => "#legal",
            Tag::Optimization => "#optimization",
            Tag::Planning => "#planning",
        }
    }

    /// Parse a label, tolerating a missing `#`, surrounding whitespace and case
    pub fn parse(label: &str) -> Option<Tag> {
        let label = label.trim().to_lowercase();
        let wanted = if label.starts_with('#') {
            label
        } else {
            format!("#{label}")
        };
        VOCABULARY.iter().copied().find(|tag| tag.as_str() == wanted)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comma-separated vocabulary, as listed in the remote instruction
pub fn vocabulary_list() -> String {
    VOCABULARY
        .iter()
        .map(Tag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
