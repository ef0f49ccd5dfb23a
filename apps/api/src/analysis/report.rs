//! Report parsing — turns the model's loosely-structured reply into an `AnalysisReport`.
//!
//! The reply is untrusted. Fences are stripped, the remainder must be a JSON
//! object, and each of the nine keys is read on its own with a default when it
//! is missing or malformed. Only JSON syntax errors fail the parse.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// The nine keys the model is asked to return, in prompt order.
pub const REPORT_FIELDS: [&str; 9] = [
    "score",
    "grade",
    "verdict",
    "summary",
    "positive_tags",
    "negative_tags",
    "impacts",
    "improvements",
    "alternatives",
];

#[derive(Debug, Error)]
pub enum ReportParseError {
    #[error("Reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Reply JSON is not an object")]
    NotAnObject,
}

/// Letter grade as reported by the model. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "D" => Some(Grade::D),
            "F" => Some(Grade::F),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Model verdict. Anything unrecognized is treated as `NeedsWork`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Good,
    #[default]
    #[serde(rename = "Needs Work")]
    NeedsWork,
    Poor,
}

impl Verdict {
    /// `None` for anything outside the three known verdicts.
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Good" => Some(Verdict::Good),
            "Needs Work" => Some(Verdict::NeedsWork),
            "Poor" => Some(Verdict::Poor),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Good => "Good",
            Verdict::NeedsWork => "Needs Work",
            Verdict::Poor => "Poor",
        }
    }
}

/// The normalized, defaulted report that drives rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// As reported, unclamped and unrounded; the renderer clamps into 0–100.
    pub score: f64,
    pub grade: Option<Grade>,
    pub verdict: Verdict,
    pub summary: String,
    pub positive_tags: Vec<String>,
    pub negative_tags: Vec<String>,
    pub impacts: Vec<String>,
    pub improvements: Vec<String>,
    pub alternatives: Vec<String>,
    /// Report keys absent from the reply.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub missing_fields: Vec<String>,
    /// Report keys present with an unusable value, replaced by their default.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub malformed_fields: Vec<String>,
}

/// Removes every ```json and ``` marker, then trims.
pub fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parses the model's reply text into a report.
pub fn parse_report(raw: &str) -> Result<AnalysisReport, ReportParseError> {
    let clean = strip_fences(raw);
    let value: Value = serde_json::from_str(&clean)?;
    let object = value.as_object().ok_or(ReportParseError::NotAnObject)?;

    let missing_fields: Vec<String> = REPORT_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing_fields.is_empty() {
        warn!("Model reply is missing fields: {}", missing_fields.join(", "));
    }

    let mut fields = FieldReader {
        object,
        malformed: Vec::new(),
    };

    let report = AnalysisReport {
        score: fields.read("score", read_score).unwrap_or(0.0),
        grade: fields.read("grade", |v| v.as_str().and_then(Grade::parse)),
        verdict: fields
            .read("verdict", |v| v.as_str().and_then(Verdict::parse))
            .unwrap_or_default(),
        summary: fields
            .read("summary", |v| v.as_str().map(|s| s.trim().to_string()))
            .unwrap_or_default(),
        positive_tags: fields.list("positive_tags"),
        negative_tags: fields.list("negative_tags"),
        impacts: fields.list("impacts"),
        improvements: fields.list("improvements"),
        alternatives: fields.list("alternatives"),
        missing_fields,
        malformed_fields: fields.malformed,
    };

    if !report.malformed_fields.is_empty() {
        warn!(
            "Model reply has unusable values for: {}",
            report.malformed_fields.join(", ")
        );
    }

    Ok(report)
}

/// Reads one key at a time, noting keys whose values could not be used.
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    malformed: Vec<String>,
}

impl FieldReader<'_> {
    fn read<T>(&mut self, key: &str, convert: impl FnOnce(&Value) -> Option<T>) -> Option<T> {
        let value = self.object.get(key)?;
        let converted = convert(value);
        if converted.is_none() {
            self.malformed.push(key.to_string());
        }
        converted
    }

    fn list(&mut self, key: &str) -> Vec<String> {
        self.read(key, |v| v.as_array().map(|items| read_items(items)))
            .unwrap_or_default()
    }
}

fn read_score(value: &Value) -> Option<f64> {
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    score.filter(|s| s.is_finite())
}

/// String items in order; numbers and booleans stringified; anything else skipped.
fn read_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEEL_BOTTLE: &str = r#"{"score":92,"grade":"A","verdict":"Good","summary":"Low impact.","positive_tags":["reusable"],"negative_tags":[],"impacts":["Reduces plastic waste"],"improvements":[],"alternatives":[]}"#;

    #[test]
    fn test_full_reply_parses() {
        let report = parse_report(STEEL_BOTTLE).unwrap();
        assert_eq!(report.score, 92.0);
        assert_eq!(report.grade, Some(Grade::A));
        assert_eq!(report.verdict, Verdict::Good);
        assert_eq!(report.summary, "Low impact.");
        assert_eq!(report.positive_tags, vec!["reusable"]);
        assert!(report.negative_tags.is_empty());
        assert_eq!(report.impacts, vec!["Reduces plastic waste"]);
        assert!(report.improvements.is_empty());
        assert!(report.alternatives.is_empty());
        assert!(report.missing_fields.is_empty());
        assert!(report.malformed_fields.is_empty());
    }

    #[test]
    fn test_fenced_reply_matches_bare_reply() {
        let bare = parse_report(STEEL_BOTTLE).unwrap();
        let tagged = parse_report(&format!("```json\n{STEEL_BOTTLE}\n```")).unwrap();
        let untagged = parse_report(&format!("```\n{STEEL_BOTTLE}\n```  ")).unwrap();
        assert_eq!(bare, tagged);
        assert_eq!(bare, untagged);
    }

    #[test]
    fn test_strip_fences_removes_inner_markers() {
        assert_eq!(strip_fences("  ```json{\"a\":1}``` "), "{\"a\":1}");
        assert_eq!(strip_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_garbage_reply_is_invalid_json() {
        let err = parse_report("```json\nI'm sorry, I can't help with that.\n```").unwrap_err();
        assert!(matches!(err, ReportParseError::InvalidJson(_)));
    }

    #[test]
    fn test_non_object_reply_rejected() {
        let err = parse_report("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ReportParseError::NotAnObject));
    }

    #[test]
    fn test_missing_score_defaults_to_zero() {
        let report = parse_report(r#"{"grade":"F","verdict":"Poor"}"#).unwrap();
        assert_eq!(report.score, 0.0);
        assert!(report.missing_fields.contains(&"score".to_string()));
        assert_eq!(report.missing_fields.len(), 7);
    }

    #[test]
    fn test_score_variants() {
        assert_eq!(parse_report(r#"{"score":69.6}"#).unwrap().score, 69.6);
        assert_eq!(parse_report(r#"{"score":" 64 "}"#).unwrap().score, 64.0);
        assert_eq!(parse_report(r#"{"score":"high"}"#).unwrap().score, 0.0);
        assert_eq!(parse_report(r#"{"score":null}"#).unwrap().score, 0.0);
        assert_eq!(parse_report(r#"{"score":140}"#).unwrap().score, 140.0);
        assert_eq!(parse_report(r#"{"score":-5}"#).unwrap().score, -5.0);
    }

    #[test]
    fn test_unknown_verdict_is_needs_work() {
        for raw in [r#"{"verdict":"Excellent"}"#, r#"{"verdict":3}"#, "{}"] {
            assert_eq!(parse_report(raw).unwrap().verdict, Verdict::NeedsWork);
        }
        assert_eq!(
            parse_report(r#"{"verdict":"Needs Work"}"#).unwrap().verdict,
            Verdict::NeedsWork
        );
        assert_eq!(parse_report(r#"{"verdict":"Poor"}"#).unwrap().verdict, Verdict::Poor);
    }

    #[test]
    fn test_grade_is_lenient_but_bounded() {
        assert_eq!(parse_report(r#"{"grade":"b"}"#).unwrap().grade, Some(Grade::B));
        assert_eq!(parse_report(r#"{"grade":"E"}"#).unwrap().grade, None);
        assert_eq!(parse_report(r#"{"grade":"A+"}"#).unwrap().grade, None);
    }

    #[test]
    fn test_lists_keep_order_and_skip_structures() {
        let report = parse_report(
            r#"{"impacts":["first", 2, {"nested": true}, null, "last", false]}"#,
        )
        .unwrap();
        assert_eq!(report.impacts, vec!["first", "2", "last", "false"]);
    }

    #[test]
    fn test_list_that_is_not_an_array_is_empty() {
        let report = parse_report(r#"{"positive_tags":"reusable"}"#).unwrap();
        assert!(report.positive_tags.is_empty());
        assert_eq!(report.malformed_fields, vec!["positive_tags"]);
    }

    #[test]
    fn test_wrong_typed_fields_are_recorded() {
        let report = parse_report(
            r#"{"score":"high","grade":"E","verdict":"Excellent","summary":["x"],"impacts":{"a":1},"improvements":[],"alternatives":["ok"]}"#,
        )
        .unwrap();
        assert_eq!(
            report.malformed_fields,
            vec!["score", "grade", "verdict", "summary", "impacts"]
        );
        assert_eq!(report.missing_fields, vec!["positive_tags", "negative_tags"]);
        assert_eq!(report.verdict, Verdict::NeedsWork);
        assert_eq!(report.alternatives, vec!["ok"]);
    }

    #[test]
    fn test_absent_field_is_missing_not_malformed() {
        let report = parse_report("{}").unwrap();
        assert_eq!(report.missing_fields.len(), 9);
        assert!(report.malformed_fields.is_empty());
    }

    #[test]
    fn test_verdict_serializes_with_space() {
        let json = serde_json::to_string(&Verdict::NeedsWork).unwrap();
        assert_eq!(json, r#""Needs Work""#);
    }
}
