//! Structured error types for report generation.
//!
//! Input problems are caught before anything is drawn; render and save
//! failures abort the whole pass. There is no partial output.

use std::path::PathBuf;

use thiserror::Error;

/// The unified error type returned by all public `auditpdf` functions.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The audit JSON failed to parse or does not match the expected shape.
    #[error("Failed to parse audit result: {source}{}", format_hint(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// The audit parsed but carries values the report cannot represent.
    #[error("Invalid audit result: {0}")]
    InvalidInput(String),

    /// The audited URL is unusable for the report header and file name.
    #[error("Invalid audit URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A report configuration file could not be read or understood.
    #[error("Invalid report configuration: {0}")]
    Config(String),

    /// Layout or PDF generation failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Writing the finished artifact failed.
    #[error("Failed to save report to {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the audit schema. Expected score, summary and findings; severity must be \"Error\" or \"Warning\".".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the model response truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        ReportError::Parse { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_hint() {
        let err: ReportError = serde_json::from_str::<serde_json::Value>("{\"a\": 1,}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse audit result"));
        assert!(msg.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn test_eof_hint() {
        let err: ReportError = serde_json::from_str::<serde_json::Value>("{\"score\": ")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_save_error_names_path() {
        let err = ReportError::Save {
            path: PathBuf::from("/nope/report.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/nope/report.pdf"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
