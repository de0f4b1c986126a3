//! # auditpdf
//!
//! Paginated PDF reports for AI accessibility audits.
//!
//! An audit is a score, a summary, and a list of findings, each carrying a
//! code snippet and a suggested fix that may embed fenced code. The report
//! lays that content *into* A4 pages: every card's height is estimated
//! before it is drawn, and a card that does not fit in the space left on a
//! page moves whole to the next one. Nothing is rendered on a tall canvas
//! and sliced afterwards.
//!
//! ## Architecture
//!
//! ```text
//! Input (audit JSON + URL)
//!       ↓
//!   [model]     AuditResult, Finding, Severity
//!       ↓
//!   [report]    cover, summary, cards, header/footer stamping
//!       ↓
//!   [layout]    estimator, page flow, block renderer
//!       ↓
//!   [document]  pages of positioned text, rects, lines, links
//!       ↓
//!   [pdf]       serialize to PDF bytes
//! ```
//!
//! Measurement lives in [`text`] and [`font`] and is shared by the estimator
//! and the renderer, so what was measured is what gets drawn.

pub mod config;
pub mod document;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod report;
pub mod style;
pub mod text;

pub use config::ReportConfig;
pub use document::Document;
pub use error::ReportError;
pub use model::{AuditResult, Finding, Severity, SeverityFilter};
pub use report::{generate_report, report_file_name, ReportOptions};

/// Render an audit to PDF bytes.
///
/// This is the primary entry point.
pub fn render(
    audit: &AuditResult,
    url: &str,
    options: &ReportOptions,
) -> Result<Vec<u8>, ReportError> {
    generate_report(audit, url, options)?.to_pdf()
}

/// Render an audit given as the JSON the model returned.
pub fn render_json(json: &str, url: &str, options: &ReportOptions) -> Result<Vec<u8>, ReportError> {
    let audit = AuditResult::from_json(json)?;
    render(&audit, url, options)
}
