//! # Paginated Document
//!
//! The drawing surface the report is laid out onto. Pages are appended,
//! never removed, and every primitive draws onto the *active* page. The
//! stamping pass uses [`Document::set_page`] to revisit earlier pages once
//! the total page count is known.
//!
//! Coordinates are in points with the origin at the top-left corner and `y`
//! growing downward. Text is positioned by its baseline. The PDF writer flips
//! everything into PDF user space.

use std::path::Path;

use crate::error::ReportError;
use crate::pdf::PdfWriter;
use crate::style::{Align, Color, Paint, TextStyle};
use crate::text::{self, BrokenLine};

/// One primitive recorded on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A single line of text; `x` is the left edge after alignment.
    Text {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        paint: Paint,
        radius: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    },
}

/// A clickable URI region.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub uri: String,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
    pub links: Vec<Link>,
}

impl Page {
    fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            links: Vec::new(),
        }
    }

    /// All text runs on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether any text run on the page equals `needle`.
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }
}

/// Document metadata embedded in the PDF `/Info` dictionary.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
}

/// A paginated document. Starts with one page, like a fresh sheet of paper.
#[derive(Debug, Clone)]
pub struct Document {
    pages: Vec<Page>,
    active: usize,
    page_width: f64,
    page_height: f64,
    pub metadata: Metadata,
}

impl Document {
    pub fn new(page_width: f64, page_height: f64) -> Self {
        Self {
            pages: vec![Page::new(page_width, page_height)],
            active: 0,
            page_width,
            page_height,
            metadata: Metadata::default(),
        }
    }

    /// Append a page and make it the active one.
    pub fn add_page(&mut self) {
        self.pages.push(Page::new(self.page_width, self.page_height));
        self.active = self.pages.len() - 1;
    }

    /// Switch the active page. `index` is zero-based.
    pub fn set_page(&mut self, index: usize) -> Result<(), ReportError> {
        if index >= self.pages.len() {
            return Err(ReportError::Render(format!(
                "page {} does not exist (document has {} pages)",
                index + 1,
                self.pages.len()
            )));
        }
        self.active = index;
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn active_page(&self) -> usize {
        self.active
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Wrap `text` to `max_width`. The same routine the layout estimator uses.
    pub fn split_text(&self, text: &str, max_width: f64, style: &TextStyle) -> Vec<BrokenLine> {
        text::wrap_text(text, max_width, style)
    }

    /// Place one line of text with its baseline at `y`.
    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle, align: Align) {
        let x = match align {
            Align::Left => x,
            Align::Center => x - text::measure_width(content, style) / 2.0,
        };
        self.current().commands.push(DrawCommand::Text {
            x,
            y,
            text: content.to_string(),
            style: *style,
        });
    }

    /// Place text and make its box a link to `uri`.
    pub fn text_with_link(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        style: &TextStyle,
        align: Align,
        uri: &str,
    ) {
        let width = text::measure_width(content, style);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
        };
        self.text(left, y, content, style, Align::Left);
        self.current().links.push(Link {
            x: left,
            y: y - style.size,
            width,
            height: style.line_height(),
            uri: uri.to_string(),
        });
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint, radius: f64) {
        self.current().commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            paint,
            radius,
        });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        self.current()
            .commands
            .push(DrawCommand::Line { x1, y1, x2, y2, color });
    }

    /// Serialize to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>, ReportError> {
        PdfWriter::new().write(self)
    }

    /// Serialize and write the artifact to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        let bytes = self.to_pdf()?;
        std::fs::write(path, &bytes).map_err(|source| ReportError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn current(&mut self) -> &mut Page {
        &mut self.pages[self.active]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle {
        TextStyle::new(10.0, Color::BLACK)
    }

    #[test]
    fn test_starts_with_one_page() {
        let doc = Document::new(595.28, 841.89);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.active_page(), 0);
    }

    #[test]
    fn test_add_page_becomes_active() {
        let mut doc = Document::new(595.28, 841.89);
        doc.add_page();
        doc.text(10.0, 20.0, "second", &style(), Align::Left);
        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages()[1].has_text("second"));
        assert!(!doc.pages()[0].has_text("second"));
    }

    #[test]
    fn test_set_page_draws_on_earlier_page() {
        let mut doc = Document::new(595.28, 841.89);
        doc.add_page();
        doc.set_page(0).unwrap();
        doc.text(10.0, 20.0, "first", &style(), Align::Left);
        assert!(doc.pages()[0].has_text("first"));
    }

    #[test]
    fn test_set_page_out_of_range() {
        let mut doc = Document::new(595.28, 841.89);
        assert!(matches!(doc.set_page(3), Err(ReportError::Render(_))));
    }

    #[test]
    fn test_center_alignment() {
        let mut doc = Document::new(595.28, 841.89);
        let s = style().monospace();
        // 4 Courier chars at 10pt = 24pt wide.
        doc.text(100.0, 50.0, "abcd", &s, Align::Center);
        match &doc.pages()[0].commands[0] {
            DrawCommand::Text { x, .. } => assert!((x - 88.0).abs() < 1e-9),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_link_covers_text() {
        let mut doc = Document::new(595.28, 841.89);
        let s = style().monospace();
        doc.text_with_link(100.0, 50.0, "abcd", &s, Align::Center, "https://a.example");
        let link = &doc.pages()[0].links[0];
        assert!((link.x - 88.0).abs() < 1e-9);
        assert!((link.width - 24.0).abs() < 1e-9);
        assert_eq!(link.uri, "https://a.example");
    }

    #[test]
    fn test_save_to_missing_dir_is_save_error() {
        let doc = Document::new(595.28, 841.89);
        let err = doc
            .save(Path::new("/definitely/not/here/report.pdf"))
            .unwrap_err();
        assert!(matches!(err, ReportError::Save { .. }));
    }
}
