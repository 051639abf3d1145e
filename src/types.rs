/// Core data structures for a finished RSpec run
///
/// The result file is produced by an external parser; this module only
/// deserializes and validates it. Nothing here is mutated after loading.
use crate::error::{ReportError, Result};
use std::path::Path;

/// Slack allowed when comparing summed run times against the total
const TIME_EPSILON: f64 = 1e-6;

/// Outcome of one RSpec run
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RspecResult {
    pub success: bool,
    /// One-line summary, e.g. "12 examples, 1 failure"
    pub summary: String,
    /// Total run duration in seconds
    pub total_time: f64,
    /// Examples in encounter order
    #[serde(default)]
    pub examples: Vec<Example>,
    /// Slowest examples, descending by run time
    #[serde(default)]
    pub slow_examples: Vec<SlowExample>,
}

/// A single recorded example (usually a failure)
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub file_path: String,
    pub line_number: u32,
    pub description: String,
    /// May contain literal `\n` escapes (backslash + n)
    #[serde(default)]
    pub message: String,
}

/// An example selected for the profile by run time
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlowExample {
    pub file_path: String,
    pub line_number: u32,
    pub description: String,
    pub run_time: f64,
}

impl RspecResult {
    /// Load and validate a result file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let result: RspecResult = serde_json::from_str(&content)?;
        result.validate()?;
        Ok(result)
    }

    /// Reject results that break the data model
    pub fn validate(&self) -> Result<()> {
        if !self.total_time.is_finite() || self.total_time < 0.0 {
            return Err(ReportError::InvalidResult(format!("totalTime must be >= 0, got {}", self.total_time)));
        }

        for example in &self.examples {
            if example.line_number == 0 {
                return Err(ReportError::InvalidResult(format!(
                    "example {} has line number 0",
                    example.file_path
                )));
            }
        }

        for slow in &self.slow_examples {
            if slow.line_number == 0 {
                return Err(ReportError::InvalidResult(format!("slow example {} has line number 0", slow.file_path)));
            }
            if !slow.run_time.is_finite() || slow.run_time < 0.0 {
                return Err(ReportError::InvalidResult(format!(
                    "slow example {}:{} has run time {}",
                    slow.file_path, slow.line_number, slow.run_time
                )));
            }
        }

        if let Some(pair) = self.slow_examples.windows(2).find(|w| w[1].run_time > w[0].run_time) {
            return Err(ReportError::InvalidResult(format!(
                "slowExamples are not sorted by run time: {}:{} ({}) before {}:{} ({})",
                pair[0].file_path,
                pair[0].line_number,
                pair[0].run_time,
                pair[1].file_path,
                pair[1].line_number,
                pair[1].run_time
            )));
        }

        let slow_total = self.slow_total_time();
        if slow_total > self.total_time + TIME_EPSILON {
            return Err(ReportError::InvalidResult(format!(
                "slow examples took {} seconds, more than totalTime {}",
                slow_total, self.total_time
            )));
        }

        Ok(())
    }

    /// Sum of run times across the slow examples
    pub fn slow_total_time(&self) -> f64 {
        self.slow_examples.iter().map(|e| e.run_time).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "success": false,
        "summary": "3 examples, 1 failure",
        "totalTime": 1.5,
        "examples": [
            {"filePath": "spec/foo_spec.rb", "lineNumber": 42, "description": "Foo works", "message": "expected 1\\ngot 2"}
        ],
        "slowExamples": [
            {"filePath": "spec/foo_spec.rb", "lineNumber": 42, "description": "Foo works", "runTime": 0.75},
            {"filePath": "spec/bar_spec.rb", "lineNumber": 7, "description": "Bar works", "runTime": 0.25}
        ]
    }"#;

    #[test]
    fn test_deserialize_camel_case_fields() {
        let result: RspecResult = serde_json::from_str(SAMPLE).unwrap();
        assert!(!result.success);
        assert_eq!(result.examples.len(), 1);
        assert_eq!(result.examples[0].line_number, 42);
        assert_eq!(result.examples[0].message, "expected 1\\ngot 2");
        assert_eq!(result.slow_examples[1].file_path, "spec/bar_spec.rb");
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let result: RspecResult =
            serde_json::from_str(r#"{"success": true, "summary": "0 examples", "totalTime": 0}"#).unwrap();
        assert!(result.examples.is_empty());
        assert!(result.slow_examples.is_empty());
        assert_eq!(result.slow_total_time(), 0.0);
    }

    #[test]
    fn test_validate_rejects_zero_line_number() {
        let mut result: RspecResult = serde_json::from_str(SAMPLE).unwrap();
        result.examples[0].line_number = 0;
        assert!(matches!(result.validate(), Err(ReportError::InvalidResult(_))));
    }

    #[test]
    fn test_validate_rejects_negative_run_time() {
        let mut result: RspecResult = serde_json::from_str(SAMPLE).unwrap();
        result.slow_examples[0].run_time = -1.0;
        assert!(matches!(result.validate(), Err(ReportError::InvalidResult(_))));
    }

    #[test]
    fn test_validate_rejects_unsorted_slow_examples() {
        let mut result: RspecResult = serde_json::from_str(SAMPLE).unwrap();
        result.slow_examples.swap(0, 1);
        let err = result.validate().unwrap_err();
        assert!(err.to_string().contains("not sorted"), "{}", err);
    }

    #[test]
    fn test_validate_accepts_equal_run_times() {
        let mut result: RspecResult = serde_json::from_str(SAMPLE).unwrap();
        result.slow_examples[1].run_time = 0.75;
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_slow_time_above_total() {
        let mut result: RspecResult = serde_json::from_str(SAMPLE).unwrap();
        result.total_time = 1.0;
        result.slow_examples.truncate(1);
        result.slow_examples[0].run_time = 1.3;
        let err = result.validate().unwrap_err();
        assert!(matches!(err, ReportError::InvalidResult(_)));
        assert!(err.to_string().contains("more than totalTime"), "{}", err);
    }

    #[test]
    fn test_validate_tolerates_float_slop_in_total() {
        let mut result: RspecResult = serde_json::from_str(SAMPLE).unwrap();
        // 0.1 + 0.2 sums to 0.30000000000000004
        result.total_time = 0.3;
        result.slow_examples[0].run_time = 0.2;
        result.slow_examples[1].run_time = 0.1;
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_slow_total_time() {
        let result: RspecResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.slow_total_time(), 1.0);
    }
}
