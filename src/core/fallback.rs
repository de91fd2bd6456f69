//! Rule-Based Classifier
//!
//! Deterministic, offline classification used whenever the remote model is
//! unavailable or fails. Every non-empty task yields a valid record.

use super::rules::{assign_priority, assign_tags, ACTION_WORDS};
use crate::record::{truncate_chars, ClassificationRecord, MAX_SUMMARY_CHARS};
use tracing::debug;

/// Tasks this short are used as their own summary
const VERBATIM_WORD_LIMIT: usize = 7;
/// How many leading words are searched for an action
const ACTION_SEARCH_WINDOW: usize = 3;
/// Words kept after the action in a condensed summary
const SUMMARY_TAIL_WORDS: usize = 3;

/// Classify a batch without any external calls
pub fn classify_fallback<S: AsRef<str>>(tasks: &[S]) -> Vec<ClassificationRecord> {
    tasks.iter().map(|t| classify_task(t.as_ref())).collect()
}

/// Classify one task
pub fn classify_task(task: &str) -> ClassificationRecord {
    let lower = task.to_lowercase();
    let record = ClassificationRecord {
        original: task.to_string(),
        summary: summarize(task),
        tags: assign_tags(&lower),
        priority: assign_priority(&lower),
    };
    debug!(
        "Fallback: '{}' -> {} (priority {})",
        record.summary,
        record.tags_text(),
        record.priority
    );
    record
}

/// Condense a task into a short summary.
///
/// Short tasks are kept as-is. Longer ones become `<Action> <next three words>`,
/// using the first word when no action word leads the task.
pub fn summarize(task: &str) -> String {
    let words: Vec<&str> = task.split_whitespace().collect();
    if words.len() <= VERBATIM_WORD_LIMIT {
        return truncate_chars(task, MAX_SUMMARY_CHARS);
    }

    let (head, tail_start) = match find_action(&words) {
        Some((idx, len)) => (words[idx..idx + len].join(" "), idx + len),
        None => (words[0].to_string(), 1),
    };
    let tail_end = (tail_start + SUMMARY_TAIL_WORDS).min(words.len());
    let tail = words[tail_start..tail_end].join(" ");

    let summary = format!("{} {}", title_case(&head), tail);
    truncate_chars(summary.trim_end(), MAX_SUMMARY_CHARS)
}

/// Position and word count of the first action in the search window
fn find_action(words: &[&str]) -> Option<(usize, usize)> {
    let window = words.len().min(ACTION_SEARCH_WINDOW);
    (0..window).find_map(|idx| {
        ACTION_WORDS.iter().find_map(|action| {
            let parts: Vec<&str> = action.split(' ').collect();
            let candidate = words.get(idx..idx + parts.len())?;
            candidate
                .iter()
                .zip(&parts)
                .all(|(w, p)| w.to_lowercase() == *p)
                .then_some((idx, parts.len()))
        })
    })
}

/// Capitalize the first letter of each word, lower-case the rest
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
