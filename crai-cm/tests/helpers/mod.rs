//! Shared test helpers
//!
//! Judge doubles and state construction used across the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crai_cm::models::{CommentAnalysis, Sentiment};
use crai_cm::services::analyzer::{AnalysisPolicy, CommentAnalyzer};
use crai_cm::services::judge::{JudgeError, LanguageJudge};
use crai_cm::services::title_lookup::TitleLookupClient;
use crai_cm::store::MemoryStore;
use crai_cm::AppState;

/// Judge double returning a fixed classification
pub struct StubJudge {
    pub analysis: CommentAnalysis,
}

#[async_trait]
impl LanguageJudge for StubJudge {
    async fn classify(&self, _comment: &str) -> Result<CommentAnalysis, JudgeError> {
        Ok(self.analysis.clone())
    }
}

/// Judge double that always fails
pub struct FailingJudge;

#[async_trait]
impl LanguageJudge for FailingJudge {
    async fn classify(&self, _comment: &str) -> Result<CommentAnalysis, JudgeError> {
        Err(JudgeError::Network("connection refused".to_string()))
    }
}

/// Judge double counting how often it is invoked
pub struct CountingJudge {
    pub calls: AtomicUsize,
    pub analysis: CommentAnalysis,
}

impl CountingJudge {
    pub fn new(analysis: CommentAnalysis) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            analysis,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageJudge for CountingJudge {
    async fn classify(&self, _comment: &str) -> Result<CommentAnalysis, JudgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.analysis.clone())
    }
}

pub fn positive_analysis(subject_title: &str) -> CommentAnalysis {
    CommentAnalysis {
        sentiment: Sentiment::Positive,
        is_profane: false,
        is_relevant: true,
        subject_title: subject_title.to_string(),
        publish: true,
    }
}

pub fn profane_analysis(subject_title: &str) -> CommentAnalysis {
    CommentAnalysis {
        sentiment: Sentiment::Negative,
        is_profane: true,
        is_relevant: true,
        subject_title: subject_title.to_string(),
        publish: false,
    }
}

/// Lookup client with no API key; short-circuits before any network I/O
pub fn offline_lookup() -> TitleLookupClient {
    TitleLookupClient::new("http://127.0.0.1:1/unused", None, Duration::from_secs(1)).unwrap()
}

/// Lookup client pointed at a mock server
pub fn lookup_against(base_url: &str) -> TitleLookupClient {
    TitleLookupClient::new(base_url, Some("test-omdb-key".to_string()), Duration::from_secs(5))
        .unwrap()
}

/// Application state with the given judge, offline lookup, default policy
pub fn state_with_judge(judge: Arc<dyn LanguageJudge>) -> AppState {
    let analyzer = Arc::new(CommentAnalyzer::new(
        judge,
        Arc::new(offline_lookup()),
        AnalysisPolicy::default(),
    ));
    AppState::new(analyzer, Arc::new(MemoryStore::new()))
}
