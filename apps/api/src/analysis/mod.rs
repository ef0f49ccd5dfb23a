// Sustainability analysis pipeline: request → completion → parse → render.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod animation;
pub mod dispatcher;
pub mod extract;
pub mod handlers;
pub mod render;
pub mod report;
pub mod request;

use thiserror::Error;

use crate::analysis::report::ReportParseError;
use crate::llm_client::LlmError;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Analysis failed. Please try again.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Product description is empty")]
    EmptyInput,

    #[error("An analysis is already in progress")]
    Busy,

    #[error("Completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error("Unreadable model reply: {0}")]
    Reply(#[from] ReportParseError),
}

impl AnalysisError {
    /// Message for the error indicator. Transport and reply failures share one
    /// path: the extracted message when there is one, else the fallback.
    pub fn user_message(&self) -> String {
        let detail = match self {
            AnalysisError::EmptyInput | AnalysisError::Busy => Some(self.to_string()),
            AnalysisError::Completion(e) => e.detail(),
            AnalysisError::Reply(e) => Some(e.to_string()),
        };
        detail
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }
}
