//! Task Processor
//!
//! Routes a batch of tasks to the remote classifier or the rule-based
//! fallback and normalizes whatever comes back.
//!
//! **Routing Strategy:**
//! 1. No remote classifier configured → fallback, no network call
//! 2. Remote classifier configured → one batched attempt
//! 3. Any remote failure → the whole batch goes through the fallback

use crate::config::Config;
use crate::core::fallback::classify_fallback;
use crate::core::remote::{OpenAiClassifier, RemoteClassifier, RemoteRecord};
use crate::core::vocabulary::{Tag, DEFAULT_TAG, MAX_TAGS};
use crate::error::{TaggerError, TaggerResult};
use crate::record::{
    prepare_tasks, truncate_chars, ClassificationRecord, Priority, MAX_SUMMARY_CHARS,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Which path produced the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Remote,
    Fallback,
}

/// Result of processing a batch
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Classified by the remote model
    Remote(Vec<ClassificationRecord>),
    /// Classified by the keyword rules
    Fallback(Vec<ClassificationRecord>),
}

impl Outcome {
    pub fn source(&self) -> Source {
        match self {
            Outcome::Remote(_) => Source::Remote,
            Outcome::Fallback(_) => Source::Fallback,
        }
    }

    pub fn records(&self) -> &[ClassificationRecord] {
        match self {
            Outcome::Remote(records) | Outcome::Fallback(records) => records,
        }
    }

    pub fn into_records(self) -> Vec<ClassificationRecord> {
        match self {
            Outcome::Remote(records) | Outcome::Fallback(records) => records,
        }
    }
}

/// Classification orchestrator
#[derive(Debug, Clone, Default)]
pub struct TaskProcessor {
    remote: Option<Arc<dyn RemoteClassifier>>,
}

impl TaskProcessor {
    /// `None` means no credential: every batch uses the fallback
    pub fn new(remote: Option<Arc<dyn RemoteClassifier>>) -> Self {
        Self { remote }
    }

    /// Processor that never leaves the machine
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Build from config, enabling the remote path only when a credential is set
    pub fn from_config(config: &Config) -> TaggerResult<Self> {
        if config.credential().is_none() {
            info!("💡 No API key configured, using rule-based classification");
            return Ok(Self::offline());
        }
        let classifier = OpenAiClassifier::new(config)?;
        info!("✅ Remote classifier enabled ({})", config.model);
        Ok(Self::new(Some(Arc::new(classifier))))
    }

    /// Whether a remote classifier is configured
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Classify a batch of raw task strings.
    ///
    /// Blank entries are dropped first; an empty batch is
    /// [`TaggerError::NoValidTasks`]. Remote failures never surface here.
    pub async fn process<S: AsRef<str>>(&self, raw_tasks: &[S]) -> TaggerResult<Outcome> {
        let tasks = prepare_tasks(raw_tasks)?;
        debug!("Processing {} task(s)", tasks.len());

        let Some(remote) = &self.remote else {
            return Ok(Outcome::Fallback(classify_fallback(&tasks)));
        };

        let attempt = remote
            .classify(&tasks)
            .await
            .and_then(|records| normalize_remote(&tasks, records));

        match attempt {
            Ok(records) => {
                info!("✅ {} classified {} task(s)", remote.name(), records.len());
                Ok(Outcome::Remote(records))
            }
            Err(e) if e.is_remote_failure() => {
                warn!("⚠️ Remote classification failed, using fallback: {}", e);
                Ok(Outcome::Fallback(classify_fallback(&tasks)))
            }
            Err(e) => {
                error!("❌ Unexpected error from {}, using fallback: {}", remote.name(), e);
                Ok(Outcome::Fallback(classify_fallback(&tasks)))
            }
        }
    }
}

/// Bring remote records in line with the record invariants.
///
/// The batch must map 1:1 onto `tasks`; a count mismatch rejects it.
fn normalize_remote(
    tasks: &[String],
    records: Vec<RemoteRecord>,
) -> TaggerResult<Vec<ClassificationRecord>> {
    if records.len() != tasks.len() {
        return Err(TaggerError::MalformedResponse(format!(
            "expected {} records, got {}",
            tasks.len(),
            records.len()
        )));
    }

    Ok(tasks
        .iter()
        .zip(records)
        .map(|(task, record)| normalize_record(task, record))
        .collect())
}

fn normalize_record(task: &str, record: RemoteRecord) -> ClassificationRecord {
    let mut tags: Vec<Tag> = Vec::with_capacity(MAX_TAGS);
    for label in &record.tags {
        match Tag::parse(label) {
            Some(tag) if !tags.contains(&tag) => tags.push(tag),
            Some(_) => {}
            None => debug!("Dropping unknown tag '{}'", label),
        }
    }
    tags.truncate(MAX_TAGS);
    if tags.is_empty() {
        tags.push(DEFAULT_TAG);
    }

    let priority = if record.priority.is_finite() {
        Priority::clamped(record.priority.round() as i64)
    } else {
        Priority::DEFAULT
    };

    let summary = match record.summary.trim() {
        "" => truncate_chars(task, MAX_SUMMARY_CHARS),
        s => truncate_chars(s, MAX_SUMMARY_CHARS),
    };

    ClassificationRecord {
        original: task.to_string(),
        summary,
        tags,
        priority,
    }
}
