//! Data model types for comment analysis

pub mod analysis;

pub use analysis::{AnalysisResult, CommentAnalysis, Sentiment, TitleInfo, NO_TITLE};
