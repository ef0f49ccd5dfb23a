// Prompt constants for the sustainability analysis.
// The schema and rubric here must stay in sync with `analysis::report`.

/// Model used for every analysis. Hardcoded to prevent drift.
pub const MODEL: &str = "claude-sonnet-4-20250514";

/// Output cap for a single analysis reply.
pub const MAX_TOKENS: u32 = 1000;

/// System instruction: sustainability analyst, JSON-only reply, nine exact keys.
pub const SUSTAINABILITY_SYSTEM: &str = r#"You are an expert sustainability analyst. Analyze the given product description and return ONLY a valid JSON object with no markdown or extra text. The JSON must have these exact keys:
{
  "score": number 0-100,
  "grade": "A"|"B"|"C"|"D"|"F",
  "verdict": "Good"|"Needs Work"|"Poor",
  "summary": "One sentence summary",
  "positive_tags": ["tag1","tag2",...],
  "negative_tags": ["tag1","tag2",...],
  "impacts": ["impact sentence 1", ...],
  "improvements": ["improvement 1", ...],
  "alternatives": ["alternative 1", ...]
}
Score: 0=extremely harmful, 50=average, 100=perfectly sustainable. Be accurate and strict. Grade A=85+, B=70+, C=55+, D=40+, F=below 40."#;

/// Prefix of the single user message. The product description follows it.
pub const USER_PREFIX: &str = "Analyze this product: ";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::report::REPORT_FIELDS;

    #[test]
    fn test_system_prompt_names_every_report_field() {
        for field in REPORT_FIELDS {
            assert!(
                SUSTAINABILITY_SYSTEM.contains(&format!("\"{field}\"")),
                "system prompt is missing {field}"
            );
        }
    }

    #[test]
    fn test_system_prompt_carries_grade_thresholds() {
        assert!(SUSTAINABILITY_SYSTEM.contains("A=85+, B=70+, C=55+, D=40+, F=below 40"));
        assert!(SUSTAINABILITY_SYSTEM.contains("0=extremely harmful, 50=average, 100=perfectly sustainable"));
    }
}
