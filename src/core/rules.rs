//! Keyword Rule Tables
//!
//! Ordered `(keywords -> outcome)` pairs used by the fallback classifier.
//! Table position is significant: tags are collected in table order and the
//! first matching priority rule wins.

use super::vocabulary::{Tag, DEFAULT_TAG, MAX_TAGS};
use crate::record::Priority;

/// A rule fires when the lower-cased text contains any of its keywords
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T> {
    pub keywords: &'static [&'static str],
    pub outcome: T,
}

impl<T> KeywordRule<T> {
    /// `text` must already be lower-cased
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|kw| text.contains(kw))
    }
}

const BUG_WORDS: &[&str] = &["bug", "error", "issue", "problem", "broken"];
const URGENT_WORDS: &[&str] = &["urgent", "asap", "critical", "immediately", "emergency"];

/// Tag rules, most relevant first
pub const TAG_RULES: &[KeywordRule<Tag>] = &[
    KeywordRule {
        keywords: BUG_WORDS,
        outcome: Tag::Bug,
    },
    KeywordRule {
        keywords: URGENT_WORDS,
        outcome: Tag::Urgent,
    },
    KeywordRule {
        keywords: &["client", "customer", "user"],
        outcome: Tag::Client,
    },
    KeywordRule {
        keywords: &["meeting", "schedule", "discuss", "call"],
        outcome: Tag::Meeting,
    },
    KeywordRule {
        keywords: &["document", "documentation", "docs"],
        outcome: Tag::Documentation,
    },
    KeywordRule {
        keywords: &["frontend", "ui", "interface", "design", "wireframe"],
        outcome: Tag::Frontend,
    },
    KeywordRule {
        keywords: &["backend", "database", "server", "api"],
        outcome: Tag::Backend,
    },
    KeywordRule {
        keywords: &["research", "investigate", "analyze"],
        outcome: Tag::Research,
    },
    KeywordRule {
        keywords: &["legal", "compliance", "privacy"],
        outcome: Tag::Legal,
    },
    KeywordRule {
        keywords: &["optimize", "performance", "slow", "speed"],
        outcome: Tag::Optimization,
    },
];

/// Priority rules in precedence order; anything else scores [`Priority::DEFAULT`]
pub const PRIORITY_RULES: &[KeywordRule<Priority>] = &[
    KeywordRule {
        keywords: &["asap", "urgent", "critical", "emergency", "immediately"],
        outcome: Priority::MAX,
    },
    KeywordRule {
        keywords: &["bug", "error", "broken", "issue"],
        outcome: Priority::HIGH,
    },
    KeywordRule {
        keywords: &["tomorrow", "today", "deadline"],
        outcome: Priority::HIGH,
    },
    KeywordRule {
        keywords: &["research", "documentation", "explore"],
        outcome: Priority::LOW,
    },
];

/// Action words searched for when condensing long tasks
pub const ACTION_WORDS: &[&str] = &[
    "fix",
    "update",
    "review",
    "call",
    "schedule",
    "create",
    "prepare",
    "research",
    "follow up",
    "optimize",
];

/// Collect every firing tag in table order, keep the first [`MAX_TAGS`].
pub fn assign_tags(text_lower: &str) -> Vec<Tag> {
    let mut tags: Vec<Tag> = TAG_RULES
        .iter()
        .filter(|rule| rule.matches(text_lower))
        .map(|rule| rule.outcome)
        .take(MAX_TAGS)
        .collect();

    if tags.is_empty() {
        tags.push(DEFAULT_TAG);
    }
    tags
}

/// First matching priority rule wins.
pub fn assign_priority(text_lower: &str) -> Priority {
    PRIORITY_RULES
        .iter()
        .find(|rule| rule.matches(text_lower))
        .map(|rule| rule.outcome)
        .unwrap_or(Priority::DEFAULT)
}
