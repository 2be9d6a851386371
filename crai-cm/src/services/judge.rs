//! Language-model comment judge
//!
//! `ChatCompletionJudge` sends each comment to an OpenAI-compatible chat
//! completions endpoint with a fixed instruction and a `response_format`
//! schema constraining the reply to the `CommentAnalysis` shape, so no
//! free-text parsing happens here. Anything other than a conforming reply
//! is a `JudgeError` and aborts the analysis of that comment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::models::CommentAnalysis;

const USER_AGENT: &str = concat!("CRAI/", env!("CARGO_PKG_VERSION"));

/// Instruction sent with every classification request
const JUDGE_INSTRUCTIONS: &str = "\
Analyze the user comment. Determine its sentiment, check for any profanity, \
and verify if it is genuinely about a movie or book.

- Sentiment: classify as 'positive', 'negative', or 'neutral'.
- Profanity: set `is_profane` to true if it contains any swear words or offensive language.
- Relevance: set `is_relevant` to true only if the comment is clearly discussing a film \
or book. Comments that are spam, gibberish, or off-topic should be false.
- Subject Title: extract the name of the movie or book. If no specific title can be \
found, return 'N/A'.
- Publish Flag: set `publish` to false if `is_profane` is true OR `is_relevant` is \
false. Otherwise, set it to true.";

/// Judge errors; any of these fails the whole comment analysis
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Model API error {0}: {1}")]
    Api(u16, String),

    #[error("Model returned no completion choice")]
    EmptyResponse,

    #[error("Model output did not conform to the analysis schema: {0}")]
    NonConforming(String),
}

/// Capability abstraction over the classification model
///
/// The concrete provider is swappable; tests substitute doubles without
/// network access.
#[async_trait]
pub trait LanguageJudge: Send + Sync {
    /// Produce the five moderation judgments for one comment
    async fn classify(&self, comment: &str) -> Result<CommentAnalysis, JudgeError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// JSON schema mirroring `CommentAnalysis`; the endpoint enforces it
fn analysis_schema() -> serde_json::Value {
    json!({
        "name": "comment_analysis",
        "strict": true,
        "schema": {
            "type": "object",
            "properties": {
                "sentiment": {
                    "type": "string",
                    "enum": ["positive", "negative", "neutral"]
                },
                "is_profane": { "type": "boolean" },
                "is_relevant": { "type": "boolean" },
                "subject_title": { "type": "string" },
                "publish": { "type": "boolean" }
            },
            "required": ["sentiment", "is_profane", "is_relevant", "subject_title", "publish"],
            "additionalProperties": false
        }
    })
}

/// Judge backed by an OpenAI-compatible chat completions endpoint
pub struct ChatCompletionJudge {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletionJudge {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, JudgeError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| JudgeError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl LanguageJudge for ChatCompletionJudge {
    async fn classify(&self, comment: &str) -> Result<CommentAnalysis, JudgeError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: JUDGE_INSTRUCTIONS.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Comment: \"{}\"", comment),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: analysis_schema(),
            },
        };

        tracing::debug!(model = %self.model, "Requesting comment classification");

        let mut builder = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| JudgeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(JudgeError::Api(status.as_u16(), error_text));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| JudgeError::NonConforming(e.to_string()))?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or(JudgeError::EmptyResponse)?;

        let analysis: CommentAnalysis =
            serde_json::from_str(content).map_err(|e| JudgeError::NonConforming(e.to_string()))?;

        tracing::info!(
            sentiment = ?analysis.sentiment,
            is_profane = analysis.is_profane,
            is_relevant = analysis.is_relevant,
            subject_title = %analysis.subject_title,
            publish = analysis.publish,
            "Comment classified"
        );

        Ok(analysis)
    }
}
