//! # Report Generation
//!
//! One pass from an [`AuditResult`] to a finished [`Document`]:
//!
//! 1. cover page with the score, issue counts, and generation date
//! 2. executive summary
//! 3. one card per finding
//! 4. header and footer stamped on every page once the page count is known
//!
//! All input is validated before anything is drawn, so a failed generation
//! never yields a partial document.

use chrono::{Local, NaiveDate};
use url::Url;

use crate::config::ReportConfig;
use crate::document::Document;
use crate::error::ReportError;
use crate::layout::PageFlow;
use crate::model::{AuditResult, SeverityFilter};
use crate::style::{Align, Paint, TextStyle};

pub const REPORT_TITLE: &str = "AI Accessibility Audit Report";
const EXECUTIVE_SUMMARY: &str = "Executive Summary";
const DETAILED_FINDINGS: &str = "Detailed Findings";

/// Everything about a run that is not the audit itself.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub config: ReportConfig,
    /// Which findings get a card. Cover counts always include every finding.
    pub filter: SeverityFilter,
    /// Printed on the cover.
    pub generated_on: NaiveDate,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            config: ReportConfig::default(),
            filter: SeverityFilter::All,
            generated_on: Local::now().date_naive(),
        }
    }
}

/// Parse the audited URL. Only absolute http(s) URLs with a host are accepted.
pub fn parse_audited_url(raw: &str) -> Result<Url, ReportError> {
    let invalid = |reason: &str| ReportError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(&format!("unsupported scheme '{}'", url.scheme())));
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(invalid("missing host")),
    }
}

/// `Accessibility_Audit_Report_<host>.pdf`
pub fn report_file_name(url: &str) -> Result<String, ReportError> {
    let url = parse_audited_url(url)?;
    let host = url.host_str().unwrap_or_default();
    Ok(format!("Accessibility_Audit_Report_{}.pdf", host))
}

/// Lay out the whole report. Nothing is drawn until the audit, the URL and
/// the configuration have all been validated.
pub fn generate_report(
    audit: &AuditResult,
    url: &str,
    options: &ReportOptions,
) -> Result<Document, ReportError> {
    audit.validate()?;
    options.config.validate()?;
    parse_audited_url(url)?;
    let url = url.trim();

    let config = &options.config;
    let mut flow = PageFlow::new(config);

    draw_cover(&mut flow, audit, url, options.generated_on);

    let cards: Vec<_> = audit.filtered(options.filter).collect();
    if !cards.is_empty() {
        flow.break_page();
    }

    let margin = config.page.margin;
    let width = config.content_width();
    let heading = flow.styles().heading;
    let body = flow.styles().body;

    flow.draw_paragraph(EXECUTIVE_SUMMARY, margin, width, &heading);
    flow.advance(15.0);
    flow.draw_paragraph(&audit.summary, margin, width, &body);
    flow.advance(30.0);

    if flow.cursor() > flow.usable_limit() - 50.0 {
        flow.break_page();
    }
    flow.draw_paragraph(DETAILED_FINDINGS, margin, width, &heading);
    flow.advance(20.0);

    for finding in &cards {
        flow.draw_card(finding);
    }

    let mut doc = flow.into_document();
    stamp_pages(&mut doc, config, url)?;

    doc.metadata.title = Some(REPORT_TITLE.to_string());
    doc.metadata.subject = Some(url.to_string());
    doc.metadata.author = Some("AI QA Assistant".to_string());

    log::info!(
        "Generated report for {}: {} pages, {} of {} findings rendered",
        url,
        doc.page_count(),
        cards.len(),
        audit.findings.len()
    );
    Ok(doc)
}

fn draw_cover(flow: &mut PageFlow, audit: &AuditResult, url: &str, date: NaiveDate) {
    let config = flow.config();
    let fonts = &config.fonts;
    let palette = &config.palette;
    let page_width = config.page_width();
    let center = page_width / 2.0;
    let top = config.content_top();
    let doc = flow.document_mut();

    let title = TextStyle::new(fonts.cover_title, palette.heading).bold();
    doc.text(center, top + 80.0, REPORT_TITLE, &title, Align::Center);

    let link = TextStyle::new(fonts.cover_url, palette.primary);
    doc.text_with_link(center, top + 120.0, url, &link, Align::Center, url);

    let box_y = top + 220.0;
    let box_width = config.content_width() * 0.8;
    let box_x = (page_width - box_width) / 2.0;
    doc.rect(
        box_x,
        box_y,
        box_width,
        120.0,
        Paint::Stroke(palette.border),
        config.spacing.card_radius,
    );

    let label = TextStyle::new(fonts.cover_label, palette.text);
    let score_x = box_x + box_width / 4.0;
    doc.text(score_x, box_y + 30.0, "Overall Score", &label, Align::Center);
    let score = TextStyle::new(fonts.score, palette.score_color(audit.score)).bold();
    doc.text(score_x, box_y + 80.0, &audit.score.to_string(), &score, Align::Center);

    let divider_x = box_x + box_width / 2.0;
    doc.line(divider_x, box_y + 15.0, divider_x, box_y + 105.0, palette.border);

    let issues_x = box_x + box_width / 4.0 * 3.0;
    doc.text(issues_x, box_y + 30.0, "Issue Summary", &label, Align::Center);
    let errors = TextStyle::new(fonts.issue_count, palette.error).bold();
    let warnings = TextStyle::new(fonts.issue_count, palette.warning).bold();
    doc.text(
        issues_x,
        box_y + 65.0,
        &count_label(audit.error_count(), "Error"),
        &errors,
        Align::Center,
    );
    doc.text(
        issues_x,
        box_y + 85.0,
        &count_label(audit.warning_count(), "Warning"),
        &warnings,
        Align::Center,
    );

    let date_y = box_y + 200.0;
    let small = TextStyle::new(fonts.small, palette.medium_gray);
    doc.text(
        center,
        date_y,
        &format!("Report Generated: {}", format_date(date)),
        &small,
        Align::Center,
    );

    // Without findings the summary follows on this page, below the date.
    flow.move_to(date_y + 40.0);
}

/// Header, rule, and "Page i of N" footer on every page.
fn stamp_pages(doc: &mut Document, config: &ReportConfig, url: &str) -> Result<(), ReportError> {
    let page = &config.page;
    let width = config.page_width();
    let height = config.page_height();
    let small = TextStyle::new(config.fonts.small, config.palette.medium_gray);
    let header = format!("{} | {}", REPORT_TITLE, url);
    let total = doc.page_count();

    for i in 0..total {
        doc.set_page(i)?;
        doc.text(page.margin, page.header_height, &header, &small, Align::Left);
        doc.text(
            width / 2.0,
            height - page.footer_height / 2.0,
            &format!("Page {} of {}", i + 1, total),
            &small,
            Align::Center,
        );
        doc.line(
            page.margin,
            page.header_height + 5.0,
            width - page.margin,
            page.header_height + 5.0,
            config.palette.border,
        );
    }
    Ok(())
}

fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// "October 17, 2026"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DrawCommand;
    use crate::model::{Finding, Severity};

    fn options() -> ReportOptions {
        ReportOptions {
            generated_on: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            ..ReportOptions::default()
        }
    }

    fn finding(title: &str, severity: Severity) -> Finding {
        Finding {
            title: title.to_string(),
            description: "Description.".to_string(),
            wcag_guideline: "1.1.1".to_string(),
            severity,
            problematic_code: "<div>".to_string(),
            suggested_solution: "Fix it.".to_string(),
        }
    }

    fn audit(findings: Vec<Finding>) -> AuditResult {
        AuditResult {
            score: 72,
            summary: "Summary.".to_string(),
            findings,
        }
    }

    #[test]
    fn test_url_validation() {
        assert!(parse_audited_url("https://example.com/page").is_ok());
        assert!(parse_audited_url("http://localhost:8080").is_ok());
        for bad in ["", "example.com", "ftp://example.com", "mailto:a@b.c", "https://"] {
            assert!(
                matches!(parse_audited_url(bad), Err(ReportError::InvalidUrl { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_file_name_uses_host() {
        assert_eq!(
            report_file_name("https://www.example.com/a/b?c=d").unwrap(),
            "Accessibility_Audit_Report_www.example.com.pdf"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            "March 5, 2024"
        );
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0, "Error"), "0 Errors");
        assert_eq!(count_label(1, "Error"), "1 Error");
        assert_eq!(count_label(3, "Warning"), "3 Warnings");
    }

    #[test]
    fn test_cover_contents() {
        let doc = generate_report(
            &audit(vec![finding("A", Severity::Error)]),
            "https://example.com",
            &options(),
        )
        .unwrap();
        let cover = &doc.pages()[0];
        assert!(cover.has_text(REPORT_TITLE));
        assert!(cover.has_text("https://example.com"));
        assert!(cover.has_text("72"));
        assert!(cover.has_text("1 Error"));
        assert!(cover.has_text("0 Warnings"));
        assert!(cover.has_text("Report Generated: March 5, 2024"));
        assert_eq!(cover.links.len(), 1);
        assert!(!cover.has_text(EXECUTIVE_SUMMARY));
    }

    #[test]
    fn test_invalid_input_draws_nothing() {
        let mut bad = audit(vec![]);
        bad.score = 101;
        assert!(matches!(
            generate_report(&bad, "https://example.com", &options()),
            Err(ReportError::InvalidInput(_))
        ));
        assert!(matches!(
            generate_report(&audit(vec![]), "not a url", &options()),
            Err(ReportError::InvalidUrl { .. })
        ));

        let mut opts = options();
        opts.config.spacing.section = -500.0;
        assert!(matches!(
            generate_report(&audit(vec![]), "https://example.com", &opts),
            Err(ReportError::Config(_))
        ));
    }

    #[test]
    fn test_filter_limits_cards_not_counts() {
        let mut opts = options();
        opts.filter = SeverityFilter::Only(Severity::Warning);
        let doc = generate_report(
            &audit(vec![
                finding("Err one", Severity::Error),
                finding("Warn one", Severity::Warning),
            ]),
            "https://example.com",
            &opts,
        )
        .unwrap();
        assert!(doc.pages()[0].has_text("1 Error"));
        assert!(doc.pages()[0].has_text("1 Warning"));
        let all: Vec<&str> = doc.pages().iter().flat_map(|p| p.texts()).collect();
        assert!(all.contains(&"Warn one"));
        assert!(!all.contains(&"Err one"));
    }

    #[test]
    fn test_every_page_stamped() {
        let findings = (0..8)
            .map(|i| finding(&format!("Finding {}", i), Severity::Warning))
            .collect();
        let doc = generate_report(&audit(findings), "https://example.com", &options()).unwrap();
        let total = doc.page_count();
        assert!(total >= 2);
        for (i, page) in doc.pages().iter().enumerate() {
            assert!(page.has_text(&format!("Page {} of {}", i + 1, total)));
            assert!(page.has_text("AI Accessibility Audit Report | https://example.com"));
            assert!(page
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Line { y1, y2, .. } if *y1 == 35.0 && *y2 == 35.0)));
        }
    }

    #[test]
    fn test_metadata() {
        let doc = generate_report(&audit(vec![]), "https://example.com", &options()).unwrap();
        assert_eq!(doc.metadata.title.as_deref(), Some(REPORT_TITLE));
        assert_eq!(doc.metadata.subject.as_deref(), Some("https://example.com"));
    }
}
