//! Analysis pipeline services

pub mod analyzer;
pub mod judge;
pub mod title_lookup;

pub use analyzer::{AnalysisPolicy, AnalyzeError, CommentAnalyzer};
pub use judge::{ChatCompletionJudge, JudgeError, LanguageJudge};
pub use title_lookup::TitleLookupClient;
