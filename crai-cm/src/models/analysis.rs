//! Analysis record types
//!
//! The serialized field names of these structs are the public API contract
//! (`POST /analyze-comment`, `GET /comments`) and also the schema the model
//! is constrained to produce. Records are immutable once constructed.

use serde::{Deserialize, Serialize};

/// Sentinel used when no film or book title could be identified
pub const NO_TITLE: &str = "N/A";

/// Overall sentiment of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Model-produced judgment for a single comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAnalysis {
    pub sentiment: Sentiment,
    /// Whether the comment contains profanity or offensive language
    pub is_profane: bool,
    /// False for spam, gibberish, or off-topic text
    pub is_relevant: bool,
    /// Film or book title the comment is about, or `"N/A"`
    pub subject_title: String,
    /// Whether the comment may be shown publicly
    pub publish: bool,
}

impl CommentAnalysis {
    /// Publish value implied by the moderation rule: profane or irrelevant
    /// comments are never published.
    pub fn derived_publish(&self) -> bool {
        !(self.is_profane || !self.is_relevant)
    }

    /// Whether the model-provided publish flag agrees with the rule
    pub fn publish_is_consistent(&self) -> bool {
        self.publish == self.derived_publish()
    }
}

/// Metadata fetched for the subject title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleInfo {
    /// Official title as reported by the metadata service
    pub title: String,
    /// Release year as formatted by the source (may be a range or `"N/A"`)
    pub year: String,
    /// Cover or poster image URL; absent when no artwork is available
    pub poster_url: Option<String>,
}

/// The persisted unit: one record per submitted comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Verbatim submitted text
    pub original_comment: String,
    pub analysis: CommentAnalysis,
    /// Present when title lookup succeeded
    pub retrieved_info: Option<TitleInfo>,
}
