//! Mock Remote Classifier for Testing
//!
//! Records every batch it receives and replies according to its mode.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tasktagger::core::remote::{RemoteClassifier, RemoteRecord};
use tasktagger::{TaggerError, TaggerResult};

/// How the mock answers
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Echo each task back with the given tags and priority
    Echo { tags: Vec<String>, priority: f64 },
    /// Return a fixed set of records regardless of input
    Fixed(Vec<RemoteRecord>),
    /// Fail with a transport error
    TransportError,
    /// Fail as if the reply could not be parsed
    Malformed,
    /// Fail with an error outside the remote failure kinds
    Internal,
}

#[derive(Debug)]
pub struct MockRemote {
    mode: MockMode,
    /// Every batch that was sent
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockRemote {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn echo(tags: &[&str], priority: f64) -> Self {
        Self::new(MockMode::Echo {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            priority,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteClassifier for MockRemote {
    async fn classify(&self, tasks: &[String]) -> TaggerResult<Vec<RemoteRecord>> {
        self.calls.lock().unwrap().push(tasks.to_vec());
        match &self.mode {
            MockMode::Echo { tags, priority } => Ok(tasks
                .iter()
                .map(|t| RemoteRecord {
                    original: t.clone(),
                    summary: format!("AI: {t}"),
                    tags: tags.clone(),
                    priority: *priority,
                })
                .collect()),
            MockMode::Fixed(records) => Ok(records.clone()),
            MockMode::TransportError => {
                Err(TaggerError::RemoteRequest("connection refused".to_string()))
            }
            MockMode::Malformed => Err(TaggerError::MalformedResponse(
                "expected a JSON array".to_string(),
            )),
            MockMode::Internal => Err(TaggerError::Io(std::io::Error::other("pipe closed"))),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
