//! Comment analysis endpoints

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::AnalysisResult;
use crate::AppState;

/// Minimum accepted comment length, in characters
const MIN_COMMENT_CHARS: usize = 3;

/// Request body for POST /analyze-comment
#[derive(Debug, Deserialize)]
pub struct AnalyzeCommentRequest {
    /// The user comment to be analyzed
    pub comment: String,
}

/// Response body for GET /comments
#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<AnalysisResult>,
}

/// POST /analyze-comment
///
/// Validates the comment, runs the analysis pipeline, persists the record,
/// and returns it. Validation happens before any external call; a pipeline
/// failure persists nothing.
pub async fn analyze_comment(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeCommentRequest>,
) -> ApiResult<Json<AnalysisResult>> {
    if request.comment.chars().count() < MIN_COMMENT_CHARS {
        return Err(ApiError::Validation(format!(
            "Comment must be at least {} characters long",
            MIN_COMMENT_CHARS
        )));
    }

    let result = state.analyzer.analyze(&request.comment).await?;
    state.store.append(result.clone()).await;

    Ok(Json(result))
}

/// GET /comments
///
/// Full analysis history, oldest first. Never fails; an empty store yields
/// an empty list.
pub async fn list_comments(State(state): State<AppState>) -> Json<CommentsResponse> {
    let comments = state.store.list_all().await;
    Json(CommentsResponse { comments })
}

/// Build comment analysis routes
pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze-comment", post(analyze_comment))
        .route("/comments", get(list_comments))
}
