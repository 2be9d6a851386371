//! Comment analysis pipeline
//!
//! The orchestration spine: one model classification, then a best-effort
//! title lookup, assembled into a single `AnalysisResult`. Classification
//! failure aborts the analysis; lookup failure never does.

use std::sync::Arc;
use thiserror::Error;

use crate::models::{AnalysisResult, CommentAnalysis};
use crate::services::judge::{JudgeError, LanguageJudge};
use crate::services::title_lookup::TitleLookupClient;

/// Pipeline policy knobs
#[derive(Debug, Clone, Copy)]
pub struct AnalysisPolicy {
    /// Attempt title lookup even when the comment will not be published.
    /// Matches the historical behavior of the pipeline.
    pub enrich_even_when_rejected: bool,
    /// Recompute `publish` from profanity/relevance instead of trusting the
    /// model-provided value. When disabled, an inconsistent model value
    /// fails the analysis instead of being stored.
    pub derive_publish: bool,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            enrich_even_when_rejected: true,
            derive_publish: true,
        }
    }
}

/// Analysis pipeline errors
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Classification failed: {0}")]
    Judge(#[from] JudgeError),

    /// Model-provided publish flag contradicts the moderation rule.
    /// Only reachable when publish derivation is disabled.
    #[error("Model publish flag ({publish}) contradicts its profanity/relevance judgment")]
    InconsistentPublish { publish: bool },
}

/// Orchestrates judge and title lookup for each submitted comment
pub struct CommentAnalyzer {
    judge: Arc<dyn LanguageJudge>,
    lookup: Arc<TitleLookupClient>,
    policy: AnalysisPolicy,
}

impl CommentAnalyzer {
    pub fn new(
        judge: Arc<dyn LanguageJudge>,
        lookup: Arc<TitleLookupClient>,
        policy: AnalysisPolicy,
    ) -> Self {
        Self {
            judge,
            lookup,
            policy,
        }
    }

    /// Run the full pipeline for one comment
    ///
    /// Returns a complete record or nothing: a judge failure produces no
    /// partial result, while a lookup failure yields a record with absent
    /// enrichment.
    pub async fn analyze(&self, comment: &str) -> Result<AnalysisResult, AnalyzeError> {
        let mut analysis = self.judge.classify(comment).await?;

        if self.policy.derive_publish {
            let derived = analysis.derived_publish();
            if analysis.publish != derived {
                tracing::warn!(
                    model_publish = analysis.publish,
                    derived_publish = derived,
                    "Overriding inconsistent model publish flag"
                );
                analysis.publish = derived;
            }
        } else if !analysis.publish_is_consistent() {
            return Err(AnalyzeError::InconsistentPublish {
                publish: analysis.publish,
            });
        }

        let retrieved_info = if self.should_enrich(&analysis) {
            // The lookup client itself short-circuits on the "N/A" sentinel
            self.lookup.lookup(&analysis.subject_title).await
        } else {
            None
        };

        Ok(AnalysisResult {
            original_comment: comment.to_string(),
            analysis,
            retrieved_info,
        })
    }

    fn should_enrich(&self, analysis: &CommentAnalysis) -> bool {
        self.policy.enrich_even_when_rejected || analysis.publish
    }
}
