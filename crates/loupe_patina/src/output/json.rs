//! eslint-compatible JSON output.

use crate::diagnostic::{Label, LintDiagnostic, Severity};
use crate::linter::LintResult;
use serde::Serialize;

/// Results of one file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFileResult<'r> {
    pub file_path: &'r str,
    pub messages: Vec<JsonMessage<'r>>,
    pub error_count: usize,
    pub warning_count: usize,
}

/// One diagnostic
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMessage<'r> {
    pub rule_id: &'static str,
    /// eslint levels: 1 for warnings, 2 for errors
    pub severity: u8,
    pub message: &'r str,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'r str>,
    /// Secondary spans, such as the registered key
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<JsonRelated<'r>>,
}

/// A secondary span of a diagnostic
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonRelated<'r> {
    pub message: &'r str,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl<'r> From<&'r LintDiagnostic> for JsonMessage<'r> {
    fn from(d: &'r LintDiagnostic) -> Self {
        Self {
            rule_id: d.rule_name,
            severity: match d.severity {
                Severity::Error => 2,
                Severity::Warning => 1,
            },
            message: &d.message,
            line: d.line,
            column: d.column,
            end_line: d.end_line,
            end_column: d.end_column,
            help: d.help.as_deref(),
            related: d.labels.iter().map(JsonRelated::from).collect(),
        }
    }
}

impl<'r> From<&'r Label> for JsonRelated<'r> {
    fn from(label: &'r Label) -> Self {
        Self {
            message: &label.message,
            line: label.line,
            column: label.column,
            end_line: label.end_line,
            end_column: label.end_column,
        }
    }
}

/// Format results as a JSON array with one entry per file
pub fn format_json(results: &[LintResult]) -> String {
    let files: Vec<JsonFileResult<'_>> = results
        .iter()
        .map(|r| JsonFileResult {
            file_path: &r.filename,
            messages: r.diagnostics.iter().map(JsonMessage::from).collect(),
            error_count: r.error_count,
            warning_count: r.warning_count,
        })
        .collect();

    match serde_json::to_string_pretty(&files) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!("cannot serialize lint results: {}", err);
            "[]".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_file_has_no_messages() {
        let result = LintResult {
            filename: "clean.vue".to_string(),
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
        };
        let value: serde_json::Value = serde_json::from_str(&format_json(&[result])).unwrap();
        assert_eq!(value[0]["filePath"], "clean.vue");
        assert_eq!(value[0]["messages"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let diag = LintDiagnostic::error("vue/no-unused-components", "unused", 0, 3);
        let value = serde_json::to_value(JsonMessage::from(&diag)).unwrap();
        assert_eq!(value["severity"], 2);
        assert!(value.get("help").is_none());
        assert!(value.get("related").is_none());
    }
}
