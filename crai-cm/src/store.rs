//! Analysis record store
//!
//! Append-only, insertion-ordered, process lifetime only. The trait keeps
//! the backend swappable without touching handlers; the shipped
//! implementation is a guarded in-memory Vec.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::AnalysisResult;

/// Storage abstraction for analysis records
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Add a record to the end of the sequence
    async fn append(&self, result: AnalysisResult);

    /// Snapshot of the full sequence, oldest first
    async fn list_all(&self) -> Vec<AnalysisResult>;
}

/// In-memory store; contents are reset on process restart
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<AnalysisResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn append(&self, result: AnalysisResult) {
        self.entries.write().await.push(result);
    }

    async fn list_all(&self) -> Vec<AnalysisResult> {
        self.entries.read().await.clone()
    }
}
