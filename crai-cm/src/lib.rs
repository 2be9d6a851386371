//! crai-cm library interface
//!
//! Exposes the application state, router, and pipeline services for
//! integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::analyzer::CommentAnalyzer;
use crate::store::AnalysisStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Analysis pipeline (judge + title lookup)
    pub analyzer: Arc<CommentAnalyzer>,
    /// Record store; in-memory for process lifetime
    pub store: Arc<dyn AnalysisStore>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(analyzer: Arc<CommentAnalyzer>, store: Arc<dyn AnalysisStore>) -> Self {
        Self {
            analyzer,
            store,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI route (HTML page)
        .merge(api::ui_routes())
        // API routes
        .merge(api::health_routes())
        .merge(api::comment_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
