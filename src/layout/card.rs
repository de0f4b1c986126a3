//! One finding, laid out as a bordered card with a severity stripe.
//!
//! The card's full height is estimated first and checked against the space
//! left on the page, so a card that fits on a fresh page is never split.

use crate::model::Finding;
use crate::style::Paint;

use super::estimate::{meta_line, CardHeights, PROBLEMATIC_CODE_LABEL, SUGGESTED_SOLUTION_LABEL};
use super::PageFlow;

/// Where a card ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCard {
    /// Zero-based page the card starts on.
    pub page: usize,
    pub top: f64,
    pub heights: CardHeights,
}

impl<'a> PageFlow<'a> {
    pub fn draw_card(&mut self, finding: &Finding) -> PlacedCard {
        let config = self.config;
        let spacing = &config.spacing;
        let styles = self.styles;

        let x = config.page.margin;
        let width = config.content_width();
        let content_x = x + spacing.card_inset;
        let content_width = width - spacing.card_width_reduction;

        let heights = self.estimator().card(finding, content_width);
        self.ensure_space(heights.total);

        let top = self.state.cursor_y;
        let page = self.doc.active_page();

        self.doc.rect(
            x,
            top,
            width,
            heights.total,
            Paint::Stroke(config.palette.border),
            spacing.card_radius,
        );
        self.doc.rect(
            x,
            top,
            spacing.stripe_width,
            heights.total,
            Paint::Fill(config.palette.severity_color(finding.severity)),
            0.0,
        );

        self.advance(spacing.card);
        self.draw_paragraph(&finding.title, content_x, content_width, &styles.title);
        self.advance(spacing.title_gap);
        self.draw_paragraph(&meta_line(finding), content_x, content_width, &styles.meta);
        self.advance(spacing.section);
        self.draw_paragraph(&finding.description, content_x, content_width, &styles.body);
        self.advance(spacing.section);
        self.draw_paragraph(PROBLEMATIC_CODE_LABEL, content_x, content_width, &styles.label);
        self.advance(spacing.item);
        self.draw_code_block(&finding.problematic_code, content_x, content_width);
        self.advance(spacing.section);
        self.draw_paragraph(SUGGESTED_SOLUTION_LABEL, content_x, content_width, &styles.label);
        self.advance(spacing.item);
        self.draw_solution(&finding.suggested_solution, content_x, content_width);

        self.advance(spacing.card + spacing.after_card);

        log::debug!(
            "Card '{}' placed on page {} at {:.1} ({:.1}pt tall)",
            finding.title,
            page + 1,
            top,
            heights.total
        );

        PlacedCard { page, top, heights }
    }
}
