//! # Page Flow
//!
//! The report is laid out *into* pages. A single vertical cursor walks down
//! the active page; before each block is drawn the flow asks "does this
//! fit?" and opens a new page if it does not. Nothing is laid out on an
//! infinite canvas and sliced afterwards.
//!
//! - [`estimate`] computes block heights without drawing.
//! - [`blocks`] draws paragraphs, code blocks, and solution text.
//! - [`card`] lays out one finding as an atomic, height-checked card.
//!
//! Estimation and drawing share [`crate::text::wrap_text`] and
//! [`crate::text::segment::segment_solution`], so a block always occupies
//! exactly the height it was estimated at.

pub mod blocks;
pub mod card;
pub mod estimate;
pub mod page_break;

use crate::config::ReportConfig;
use crate::document::Document;
use crate::style::TextStyle;

use estimate::Estimator;
use page_break::{decide_break, BreakDecision};

/// Mutable layout state for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LayoutState {
    /// Vertical offset of the next block on the active page.
    pub cursor_y: f64,
}

/// Text styles shared by the estimator and the renderer.
#[derive(Debug, Clone, Copy)]
pub struct BlockStyles {
    pub heading: TextStyle,
    pub title: TextStyle,
    pub meta: TextStyle,
    pub body: TextStyle,
    pub label: TextStyle,
    pub code: TextStyle,
}

impl BlockStyles {
    pub fn from_config(config: &ReportConfig) -> Self {
        let fonts = &config.fonts;
        let palette = &config.palette;
        Self {
            heading: TextStyle::new(fonts.h2, palette.heading).bold(),
            title: TextStyle::new(fonts.h3, palette.heading).bold(),
            meta: TextStyle::new(fonts.small, palette.medium_gray),
            body: TextStyle::new(fonts.body, palette.text),
            label: TextStyle::new(fonts.body, palette.text).bold(),
            code: TextStyle::new(fonts.code, palette.text).monospace(),
        }
    }
}

/// Owns the document being built and the cursor that walks down it.
///
/// The flow is the only writer of layout state during a pass.
pub struct PageFlow<'a> {
    doc: Document,
    config: &'a ReportConfig,
    styles: BlockStyles,
    state: LayoutState,
}

impl<'a> PageFlow<'a> {
    /// Start a document with one page and the cursor at the content top.
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            doc: Document::new(config.page_width(), config.page_height()),
            config,
            styles: BlockStyles::from_config(config),
            state: LayoutState {
                cursor_y: config.content_top(),
            },
        }
    }

    pub fn config(&self) -> &'a ReportConfig {
        self.config
    }

    pub fn styles(&self) -> &BlockStyles {
        &self.styles
    }

    pub fn estimator(&self) -> Estimator<'a> {
        Estimator::new(self.config)
    }

    pub fn cursor(&self) -> f64 {
        self.state.cursor_y
    }

    pub fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    /// The lowest offset content may reach on a page.
    pub fn usable_limit(&self) -> f64 {
        self.config.usable_limit()
    }

    /// Append a page and reset the cursor to its content top.
    pub fn break_page(&mut self) {
        self.doc.add_page();
        self.state.cursor_y = self.config.content_top();
        log::debug!("Page break: now on page {}", self.doc.page_count());
    }

    /// Make sure `required` points fit below the cursor, breaking the page
    /// when they don't. Returns `true` if a new page was started.
    pub fn ensure_space(&mut self, required: f64) -> bool {
        let required = sanitize_height(required);
        match decide_break(
            self.state.cursor_y,
            required,
            self.usable_limit(),
            self.config.content_top(),
        ) {
            BreakDecision::Place => false,
            BreakDecision::MoveToNextPage => {
                self.break_page();
                true
            }
            BreakDecision::Overflow => {
                log::warn!(
                    "Block of {:.1}pt is taller than a page; it will run past the footer on page {}",
                    required,
                    self.doc.page_count()
                );
                false
            }
        }
    }

    /// Break only if the cursor has already passed the usable limit.
    pub fn break_if_past_limit(&mut self) -> bool {
        if self.state.cursor_y > self.usable_limit() {
            self.break_page();
            true
        } else {
            false
        }
    }

    /// Move the cursor down by `height`. Never moves it up.
    pub fn advance(&mut self, height: f64) {
        self.state.cursor_y += sanitize_height(height);
    }

    /// Place the cursor at an absolute offset on the active page, for fixed
    /// layouts such as the cover.
    pub(crate) fn move_to(&mut self, y: f64) {
        if y.is_finite() {
            self.state.cursor_y = y;
        }
    }
}

/// Negative or non-finite heights count as zero so the cursor never regresses.
pub fn sanitize_height(height: f64) -> f64 {
    if height.is_finite() && height >= 0.0 {
        height
    } else {
        log::warn!("Ignoring invalid block height {}", height);
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_content_top() {
        let config = ReportConfig::default();
        let flow = PageFlow::new(&config);
        assert_eq!(flow.cursor(), 80.0);
        assert_eq!(flow.page_count(), 1);
    }

    #[test]
    fn test_ensure_space_no_op_when_fits() {
        let config = ReportConfig::default();
        let mut flow = PageFlow::new(&config);
        flow.advance(100.0);
        assert!(!flow.ensure_space(200.0));
        assert_eq!(flow.page_count(), 1);
        assert_eq!(flow.cursor(), 180.0);
    }

    #[test]
    fn test_ensure_space_breaks_and_resets_cursor() {
        let config = ReportConfig::default();
        let mut flow = PageFlow::new(&config);
        flow.advance(650.0);
        assert!(flow.ensure_space(100.0));
        assert_eq!(flow.page_count(), 2);
        assert_eq!(flow.cursor(), config.content_top());
    }

    #[test]
    fn test_ensure_space_postcondition() {
        let config = ReportConfig::default();
        let max = config.usable_limit() - config.content_top();
        for start in [80.0, 300.0, 700.0, 811.0, 900.0] {
            for h in [0.0, 12.0, 250.0, max] {
                let mut flow = PageFlow::new(&config);
                flow.move_to(start);
                flow.ensure_space(h);
                assert!(
                    flow.cursor() + h <= config.usable_limit() + 1e-9,
                    "start={} h={} cursor={}",
                    start,
                    h,
                    flow.cursor()
                );
            }
        }
    }

    #[test]
    fn test_page_count_never_decreases() {
        use crate::model::{Finding, Severity};

        let config = ReportConfig::default();
        let mut flow = PageFlow::new(&config);
        let body = flow.styles().body;
        let finding = Finding {
            title: "Missing Alt Text".to_string(),
            description: "Images have no alt attribute.".to_string(),
            wcag_guideline: "1.1.1".to_string(),
            severity: Severity::Error,
            problematic_code: "<img src='x.jpg'>".to_string(),
            suggested_solution: "Add alt text.\n```html\n<img alt='x'>\n```".to_string(),
        };
        let long_code = vec!["<li></li>"; 90].join("\n");
        let long_text = vec!["word"; 60].join("\n");

        let mut counts = vec![flow.page_count()];
        for round in 0..6 {
            flow.ensure_space(100.0 * round as f64);
            counts.push(flow.page_count());
            flow.draw_paragraph(&long_text, 50.0, 400.0, &body);
            counts.push(flow.page_count());
            flow.draw_code_block(&long_code, 65.0, 400.0);
            counts.push(flow.page_count());
            flow.draw_card(&finding);
            counts.push(flow.page_count());
            flow.ensure_space(5000.0);
            counts.push(flow.page_count());
        }

        assert!(
            counts.windows(2).all(|w| w[1] >= w[0]),
            "page count went down: {:?}",
            counts
        );
        assert!(counts[counts.len() - 1] > counts[0]);
        assert_eq!(flow.document().pages().len(), flow.page_count());
    }

    #[test]
    fn test_oversized_block_on_fresh_page_does_not_add_blank_page() {
        let config = ReportConfig::default();
        let mut flow = PageFlow::new(&config);
        flow.advance(400.0);
        assert!(flow.ensure_space(5000.0));
        assert_eq!(flow.page_count(), 2);
        assert!(!flow.ensure_space(5000.0));
        assert_eq!(flow.page_count(), 2);
    }

    #[test]
    fn test_invalid_heights_never_regress_cursor() {
        let config = ReportConfig::default();
        let mut flow = PageFlow::new(&config);
        flow.advance(10.0);
        flow.advance(-50.0);
        flow.advance(f64::NAN);
        flow.advance(f64::INFINITY);
        assert_eq!(flow.cursor(), 90.0);
        assert!(!flow.ensure_space(f64::NAN));
        assert_eq!(flow.page_count(), 1);
    }

    #[test]
    fn test_break_if_past_limit() {
        let config = ReportConfig::default();
        let mut flow = PageFlow::new(&config);
        flow.move_to(config.usable_limit());
        assert!(!flow.break_if_past_limit());
        flow.advance(1.0);
        assert!(flow.break_if_past_limit());
        assert_eq!(flow.page_count(), 2);
    }
}
