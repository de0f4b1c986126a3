//! Layout estimator: block heights computed without drawing anything.

use crate::config::ReportConfig;
use crate::model::Finding;
use crate::style::TextStyle;
use crate::text::segment::{segment_solution, Segment};
use crate::text::wrap_line_count;

use super::BlockStyles;

/// Section labels drawn inside every card.
pub const PROBLEMATIC_CODE_LABEL: &str = "Problematic Code";
pub const SUGGESTED_SOLUTION_LABEL: &str = "Suggested Solution";

/// The metadata line under a card title.
pub fn meta_line(finding: &Finding) -> String {
    format!(
        "Severity: {} | WCAG: {}",
        finding.severity, finding.wcag_guideline
    )
}

/// Heights of every part of a card, and their padded total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardHeights {
    pub title: f64,
    pub meta: f64,
    pub description: f64,
    pub code_label: f64,
    pub code_block: f64,
    pub solution_label: f64,
    pub solution: f64,
    pub total: f64,
}

#[derive(Clone, Copy)]
pub struct Estimator<'a> {
    config: &'a ReportConfig,
    styles: BlockStyles,
}

impl<'a> Estimator<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            styles: BlockStyles::from_config(config),
        }
    }

    /// Height of `text` wrapped to `max_width`: lines × size × 1.2.
    pub fn text_height(&self, text: &str, max_width: f64, style: &TextStyle) -> f64 {
        wrap_line_count(text, max_width, style) as f64 * style.line_height()
    }

    /// Height of a code block whose panel spans `column_width`. The text
    /// wraps inside the horizontal padding and the vertical padding is added
    /// on top.
    pub fn code_block_height(&self, code: &str, column_width: f64) -> f64 {
        let padding = self.config.spacing.code_padding;
        self.text_height(code, column_width - padding, &self.styles.code) + padding
    }

    /// Height of mixed solution text: segment heights plus the gaps between
    /// them.
    pub fn solution_height(&self, text: &str, max_width: f64) -> f64 {
        self.segments_height(&segment_solution(text), max_width)
    }

    pub fn segments_height(&self, segments: &[Segment], max_width: f64) -> f64 {
        let content: f64 = segments
            .iter()
            .map(|segment| self.segment_height(segment, max_width))
            .sum();
        let gaps = segments.len().saturating_sub(1) as f64 * self.config.spacing.segment_gap;
        content + gaps
    }

    pub fn segment_height(&self, segment: &Segment, max_width: f64) -> f64 {
        if segment.is_code() {
            self.code_block_height(segment.text(), max_width)
        } else {
            self.text_height(segment.text(), max_width, &self.styles.body)
        }
    }

    /// Every part of a finding's card at `content_width`.
    pub fn card(&self, finding: &Finding, content_width: f64) -> CardHeights {
        let s = &self.styles;
        let spacing = &self.config.spacing;

        let title = self.text_height(&finding.title, content_width, &s.title);
        let meta = self.text_height(&meta_line(finding), content_width, &s.meta);
        let description = self.text_height(&finding.description, content_width, &s.body);
        let code_label = self.text_height(PROBLEMATIC_CODE_LABEL, content_width, &s.label);
        let code_block = self.code_block_height(&finding.problematic_code, content_width);
        let solution_label = self.text_height(SUGGESTED_SOLUTION_LABEL, content_width, &s.label);
        let solution = self.solution_height(&finding.suggested_solution, content_width);

        let total = spacing.card
            + title
            + spacing.title_gap
            + meta
            + spacing.section
            + description
            + spacing.section
            + code_label
            + spacing.item
            + code_block
            + spacing.section
            + solution_label
            + spacing.item
            + solution
            + spacing.card;

        CardHeights {
            title,
            meta,
            description,
            code_label,
            code_block,
            solution_label,
            solution,
            total,
        }
    }
}
