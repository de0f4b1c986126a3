//! Block renderer: draws paragraphs, code panels, and mixed solution text at
//! the cursor and advances it by what was drawn.

use crate::style::{Align, Paint, TextStyle};
use crate::text::segment::{segment_solution, Segment};

use super::{sanitize_height, PageFlow};

impl<'a> PageFlow<'a> {
    /// Draw wrapped text line by line. Each line checks for room on its own,
    /// so a long paragraph continues on the next page. Returns the number of
    /// lines drawn.
    pub fn draw_paragraph(&mut self, text: &str, x: f64, width: f64, style: &TextStyle) -> usize {
        let lines = self.doc.split_text(text, width, style);
        let advance = style.line_height();
        for line in &lines {
            self.ensure_space(advance);
            let y = self.state.cursor_y;
            self.doc.text(x, y, &line.text, style, Align::Left);
            self.advance(advance);
        }
        lines.len()
    }

    /// Draw a code snippet on a rounded panel spanning `width`. The panel is
    /// never split: it moves to a fresh page whole if it does not fit. The
    /// cursor ends exactly one block height below where the panel starts.
    pub fn draw_code_block(&mut self, code: &str, x: f64, width: f64) -> f64 {
        let spacing = &self.config.spacing;
        let padding = spacing.code_padding;
        let baseline = spacing.code_baseline;
        let radius = spacing.code_radius;
        let fill = self.config.palette.light_gray;
        let style = self.styles.code;

        let height = sanitize_height(self.estimator().code_block_height(code, width));
        self.ensure_space(height);

        let start = self.state.cursor_y;
        self.doc
            .rect(x, start, width, height, Paint::Fill(fill), radius);

        let lines = self.doc.split_text(code, width - padding, &style);
        let advance = style.line_height();
        let mut y = start + baseline;
        for line in &lines {
            self.doc.text(x + padding / 2.0, y, &line.text, &style, Align::Left);
            y += advance;
        }

        self.move_to(start + height);
        height
    }

    /// Draw solution text: prose paragraphs and code panels in source order,
    /// separated by the segment gap. Returns the segments drawn.
    pub fn draw_solution(&mut self, text: &str, x: f64, width: f64) -> Vec<Segment> {
        let segments = segment_solution(text);
        let gap = self.config.spacing.segment_gap;
        let body = self.styles.body;

        for (i, segment) in segments.iter().enumerate() {
            self.break_if_past_limit();
            match segment {
                Segment::Code { code, .. } => {
                    self.draw_code_block(code, x, width);
                }
                Segment::Prose(prose) => {
                    self.draw_paragraph(prose, x, width, &body);
                }
            }
            if i + 1 < segments.len() {
                self.advance(gap);
            }
        }

        segments
    }
}
