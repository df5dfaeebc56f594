//! Reporting of lint results.
//!
//! Text output renders each diagnostic with its source snippet, grouped per
//! file. JSON output follows the layout of eslint's `json` formatter so that
//! editor integrations and CI annotations can read it as they are.

mod json;
mod text;

pub use json::{format_json, JsonFileResult, JsonMessage, JsonRelated};
pub use text::{format_summary, format_text};

use crate::config::ConfigError;
use crate::linter::LintResult;
use std::str::FromStr;

/// Output format for lint results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Graphical reports with code snippets
    #[default]
    Text,
    /// eslint-compatible JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::UnknownFormat(other.into())),
        }
    }
}

/// Format lint results in the requested format.
///
/// `sources` pairs file names with their text; text output needs it for
/// snippets, JSON output only uses the resolved positions.
pub fn format_results(
    results: &[LintResult],
    sources: &[(String, String)],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => format_text(results, sources),
        OutputFormat::Json => format_json(results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);

        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown output format `xml` (expected `text` or `json`)"
        );
    }
}
