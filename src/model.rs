//! # Audit Model
//!
//! The input to report generation: one accessibility audit as returned by the
//! text-generation collaborator. Field names follow the JSON the model is
//! asked to produce (`camelCase`), so a raw response deserializes directly.
//!
//! The audit is read-only for the whole generation pass.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// A complete accessibility audit of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// Overall accessibility score, 0-100.
    pub score: u32,
    /// Two or three sentences summarizing the key barriers.
    pub summary: String,
    /// Ordered findings. Typically 5-7, no cap is enforced.
    pub findings: Vec<Finding>,
}

/// One reported accessibility issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub title: String,
    pub description: String,
    /// e.g. "1.1.1 Non-text Content (A)"
    pub wcag_guideline: String,
    pub severity: Severity,
    /// Raw snippet, rendered verbatim in a monospace block.
    pub problematic_code: String,
    /// Prose that may embed fenced code blocks and inline backtick spans.
    pub suggested_solution: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which findings get a card in the "Detailed Findings" section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(Severity),
}

impl SeverityFilter {
    pub fn accepts(&self, severity: Severity) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(s) => *s == severity,
        }
    }
}

impl FromStr for SeverityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(SeverityFilter::All),
            "error" | "errors" => Ok(SeverityFilter::Only(Severity::Error)),
            "warning" | "warnings" => Ok(SeverityFilter::Only(Severity::Warning)),
            other => Err(format!(
                "unknown severity filter '{}' (expected all, error or warning)",
                other
            )),
        }
    }
}

impl AuditResult {
    /// Parse an audit from the JSON text the model returned.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let audit: AuditResult = serde_json::from_str(json)?;
        audit.validate()?;
        Ok(audit)
    }

    /// Reject values the report cannot represent. Runs before any drawing.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.score > 100 {
            return Err(ReportError::InvalidInput(format!(
                "score must be between 0 and 100, got {}",
                self.score
            )));
        }
        Ok(())
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Findings that pass `filter`, in their original order.
    pub fn filtered<'a>(&'a self, filter: SeverityFilter) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| filter.accepts(f.severity))
    }
}
