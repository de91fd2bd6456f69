//! Remote LLM Classification
//!
//! Sends the whole batch to an OpenAI-compatible chat-completion endpoint in
//! one request and parses the reply into task records.

use crate::config::Config;
use crate::core::vocabulary::vocabulary_list;
use crate::error::{TaggerError, TaggerResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

const SYSTEM_PROMPT: &str =
    "You are a helpful project management assistant that processes tasks efficiently.";

/// A classifier backed by an external service
#[async_trait]
pub trait RemoteClassifier: Send + Sync + fmt::Debug {
    /// Classify the whole batch in one call
    async fn classify(&self, tasks: &[String]) -> TaggerResult<Vec<RemoteRecord>>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// A record as returned by the remote model, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub original: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub priority: f64,
}

/// Chat completion message
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// OpenAI chat-completion classifier
#[derive(Clone)]
pub struct OpenAiClassifier {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl fmt::Debug for OpenAiClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClassifier")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl OpenAiClassifier {
    /// Build from config.
    ///
    /// Fails with [`TaggerError::RemoteUnavailable`] when no credential is set.
    pub fn new(config: &Config) -> TaggerResult<Self> {
        let api_key = config
            .credential()
            .ok_or(TaggerError::RemoteUnavailable)?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TaggerError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn build_request(&self, tasks: &[String]) -> TaggerResult<ChatCompletionRequest> {
        Ok(ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(tasks)?,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}

#[async_trait]
impl RemoteClassifier for OpenAiClassifier {
    async fn classify(&self, tasks: &[String]) -> TaggerResult<Vec<RemoteRecord>> {
        let request = self.build_request(tasks)?;
        info!(
            "🧠 Sending {} task(s) to {} ({})",
            tasks.len(),
            self.base_url,
            self.model
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            warn!("❌ Remote API error ({}): {}", status, body_text);
            return Err(TaggerError::RemoteRequest(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body_text
            )));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body_text)
            .map_err(|e| TaggerError::RemoteRequest(format!("unexpected completion body: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        debug!("Remote raw content: {}", content);
        parse_records(&content)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Instruction payload for a batch of tasks
pub fn build_prompt(tasks: &[String]) -> TaggerResult<String> {
    let task_list = serde_json::to_string_pretty(tasks)?;
    let vocabulary = vocabulary_list();

    Ok(format!(
        r##"You are an expert project manager assistant. I need you to process the following tasks and for each task provide:

1. A clear, concise summary (max 10 words)
2. 1-2 relevant tags from these options: {vocabulary}
3. Priority score from 1-5 (1=low, 5=critical/urgent)

Tasks to process:
{task_list}

Please respond with a valid JSON array where each object has this exact structure:
{{
  "original": "original task text",
  "summary": "concise summary",
  "tags": ["#tag1", "#tag2"],
  "priority": number_between_1_and_5
}}

Ensure the response is valid JSON only, no additional text."##
    ))
}

/// Remove optional markdown code fences around the reply
pub fn strip_code_fences(content: &str) -> &str {
    let mut text = content.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parse the model reply into records.
///
/// Anything other than a JSON array of complete records is a
/// [`TaggerError::MalformedResponse`].
pub fn parse_records(content: &str) -> TaggerResult<Vec<RemoteRecord>> {
    let body = strip_code_fences(content);
    if body.is_empty() {
        return Err(TaggerError::MalformedResponse("empty reply".to_string()));
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| TaggerError::MalformedResponse(format!("not JSON: {e}")))?;

    let items = value
        .as_array()
        .ok_or_else(|| TaggerError::MalformedResponse("expected a JSON array".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            RemoteRecord::deserialize(item)
                .map_err(|e| TaggerError::MalformedResponse(format!("element {idx}: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{bearer_token, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> Config {
        Config {
            api_key: Some("test-key".to_string()),
            api_base_url: base_url,
            request_timeout_secs: 1,
            ..Config::default()
        }
    }

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
            ]
        })
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = Config {
            api_key: Some("sk-live-secret".to_string()),
            ..Config::default()
        };
        let classifier = OpenAiClassifier::new(&config).unwrap();
        let printed = format!("{classifier:?}");

        assert!(!printed.contains("sk-live-secret"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("gpt-4"));
    }

    #[test]
    fn test_missing_credential_is_unavailable() {
        let err = OpenAiClassifier::new(&Config::default()).unwrap_err();
        assert!(matches!(err, TaggerError::RemoteUnavailable));
    }

    #[test]
    fn test_prompt_lists_tasks_and_vocabulary() {
        let prompt = build_prompt(&["fix the login bug".to_string()]).unwrap();
        assert!(prompt.contains("\"fix the login bug\""));
        assert!(prompt.contains(&vocabulary_list()));
        assert!(prompt.contains("max 10 words"));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[]\n```"), "[]");
        assert_eq!(strip_code_fences("```\n[1]\n```  "), "[1]");
        assert_eq!(strip_code_fences("  [2] "), "[2]");
    }

    #[test]
    fn test_parse_records_accepts_fenced_array() {
        let reply = r##"```json
[{"original": "a", "summary": "A", "tags": ["#bug"], "priority": 4}]
```"##;
        let records = parse_records(reply).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tags, vec!["#bug"]);
        assert_eq!(records[0].priority, 4.0);
    }

    #[test]
    fn test_parse_records_rejects_bad_shapes() {
        for reply in [
            "",
            "Sure! Here are your tasks.",
            r#"{"original": "a"}"#,
            r##"[{"original": "a", "summary": "A", "tags": ["#bug"]}]"##,
            r#"[{"original": "a", "summary": "A", "tags": "bug", "priority": 3}]"#,
        ] {
            let err = parse_records(reply).unwrap_err();
            assert!(
                matches!(err, TaggerError::MalformedResponse(_)),
                "reply {reply:?} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_classify_success() {
        let server = MockServer::start().await;
        let content = r##"[{"original": "fix bug", "summary": "Fix bug", "tags": ["#bug"], "priority": 4}]"##;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(bearer_token("test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
            .expect(1)
            .mount(&server)
            .await;

        let classifier = OpenAiClassifier::new(&test_config(server.uri())).unwrap();
        let records = classifier.classify(&["fix bug".to_string()]).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].summary, "Fix bug");
    }

    #[tokio::test]
    async fn test_request_carries_generation_settings() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("[]")))
            .mount(&server)
            .await;

        let classifier = OpenAiClassifier::new(&test_config(server.uri())).unwrap();
        classifier.classify(&["a".to_string()]).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["max_tokens"], 2000);
        assert!(body["temperature"].as_f64().unwrap() < 0.5);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
    }

    #[tokio::test]
    async fn test_server_error_is_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let classifier = OpenAiClassifier::new(&test_config(server.uri())).unwrap();
        let err = classifier.classify(&["a".to_string()]).await.unwrap_err();
        assert!(matches!(err, TaggerError::RemoteRequest(_)));
    }

    #[tokio::test]
    async fn test_malformed_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("I could not do that.")),
            )
            .mount(&server)
            .await;

        let classifier = OpenAiClassifier::new(&test_config(server.uri())).unwrap();
        let err = classifier.classify(&["a".to_string()]).await.unwrap_err();
        assert!(matches!(err, TaggerError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("[]"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let classifier = OpenAiClassifier::new(&test_config(server.uri())).unwrap();
        let err = classifier.classify(&["a".to_string()]).await.unwrap_err();
        assert!(matches!(err, TaggerError::RemoteRequest(_)));
    }
}
