//! AnalysisRequest — one submission's worth of input, ready to send.

use tracing::warn;

use crate::analysis::AnalysisError;
use crate::llm_client::prompts::{MAX_TOKENS, MODEL, SUSTAINABILITY_SYSTEM, USER_PREFIX};
use crate::llm_client::CompletionRequest;

/// Ephemeral request built per submission and discarded after send.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    description: String,
    user_message: String,
    truncated: bool,
}

impl AnalysisRequest {
    /// Trims `raw`, rejects it if nothing is left, and caps it at `max_chars` characters.
    pub fn new(raw: &str, max_chars: usize) -> Result<Self, AnalysisError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let (description, truncated) = match trimmed.char_indices().nth(max_chars) {
            Some((cut, _)) => {
                warn!(
                    "Product description truncated to {max_chars} chars (was {})",
                    trimmed.chars().count()
                );
                (trimmed[..cut].trim_end().to_string(), true)
            }
            None => (trimmed.to_string(), false),
        };

        let user_message = format!("{USER_PREFIX}{description}");

        Ok(Self {
            description,
            user_message,
            truncated,
        })
    }

    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    pub fn char_count(&self) -> usize {
        self.description.chars().count()
    }

    /// Fixed model parameters plus this request's user message.
    pub fn as_completion(&self) -> CompletionRequest<'_> {
        CompletionRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: SUSTAINABILITY_SYSTEM,
            user: &self.user_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_is_rejected() {
        for raw in ["", "   ", "\n\t  \r\n"] {
            assert!(matches!(
                AnalysisRequest::new(raw, 8000),
                Err(AnalysisError::EmptyInput)
            ));
        }
    }

    #[test]
    fn test_input_is_trimmed_into_user_message() {
        let request = AnalysisRequest::new("  reusable steel water bottle \n", 8000).unwrap();
        assert_eq!(request.description, "reusable steel water bottle");
        assert_eq!(
            request.user_message,
            "Analyze this product: reusable steel water bottle"
        );
        assert!(!request.was_truncated());
    }

    #[test]
    fn test_long_input_truncated_on_char_boundary() {
        let raw = "é".repeat(20);
        let request = AnalysisRequest::new(&raw, 5).unwrap();
        assert_eq!(request.description, "ééééé");
        assert_eq!(request.char_count(), 5);
        assert!(request.was_truncated());
    }

    #[test]
    fn test_input_at_limit_is_untouched() {
        let request = AnalysisRequest::new("abcde", 5).unwrap();
        assert_eq!(request.description, "abcde");
        assert!(!request.was_truncated());
    }

    #[test]
    fn test_completion_uses_fixed_parameters() {
        let request = AnalysisRequest::new("cotton tote", 8000).unwrap();
        let completion = request.as_completion();
        assert_eq!(completion.model, MODEL);
        assert_eq!(completion.max_tokens, MAX_TOKENS);
        assert_eq!(completion.system, SUSTAINABILITY_SYSTEM);
        assert_eq!(completion.user, "Analyze this product: cotton tote");
    }
}
