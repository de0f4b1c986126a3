//! # PDF Serializer
//!
//! Takes a laid-out [`Document`] and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. The report only needs text in the
//! standard fonts, filled and stroked rectangles, straight lines, and URI
//! links, so the subset of the format involved stays small.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```

use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use crate::document::{Document, DrawCommand, Link, Page};
use crate::error::ReportError;
use crate::font::{winansi_byte, StandardFont};
use crate::style::Paint;
use miniz_oxide::deflate::compress_to_vec_zlib;

/// Stroke width for outlines and rules, in points.
const STROKE_WIDTH: f64 = 0.75;

/// Bezier control-point factor for quarter circles.
const KAPPA: f64 = 0.5522847498;

pub struct PdfWriter;

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Fonts in resource order: /F0, /F1, ...
    font_objects: Vec<(StandardFont, usize)>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfBuilder {
    fn push(&mut self, data: Vec<u8>) -> usize {
        let id = self.objects.len();
        self.objects.push(PdfObject { data });
        id
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write every page of `document` to a PDF byte vector.
    pub fn write(&self, document: &Document) -> Result<Vec<u8>, ReportError> {
        if document.page_count() == 0 {
            return Err(ReportError::Render("document has no pages".to_string()));
        }

        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
        };

        // 0 = placeholder (PDF objects are 1-indexed), 1 = Catalog, 2 = Pages
        builder.push(vec![]);
        builder.push(vec![]);
        builder.push(vec![]);

        self.register_fonts(&mut builder, document.pages());

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in document.pages() {
            let content = self.build_content_stream(page, &builder)?;
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            let content_obj_id = builder.push(content_data);

            let annot_ids: Vec<usize> = page
                .links
                .iter()
                .map(|link| builder.push(self.link_annotation(link, page.height).into_bytes()))
                .collect();

            let mut page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >>",
                page.width,
                page.height,
                content_obj_id,
                self.build_font_resource_dict(&builder.font_objects)
            );
            if !annot_ids.is_empty() {
                let refs: Vec<String> = annot_ids.iter().map(|id| format!("{} 0 R", id)).collect();
                let _ = write!(page_dict, " /Annots [{}]", refs.join(" "));
            }
            page_dict.push_str(" >>");
            page_obj_ids.push(builder.push(page_dict.into_bytes()));
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let metadata = &document.metadata;
        let mut info = String::from("<< ");
        if let Some(ref title) = metadata.title {
            let _ = write!(info, "/Title ({}) ", Self::encode_text(title));
        }
        if let Some(ref author) = metadata.author {
            let _ = write!(info, "/Author ({}) ", Self::encode_text(author));
        }
        if let Some(ref subject) = metadata.subject {
            let _ = write!(info, "/Subject ({}) ", Self::encode_text(subject));
        }
        info.push_str("/Producer (auditpdf) /Creator (auditpdf) >>");
        let info_obj_id = builder.push(info.into_bytes());

        log::debug!(
            "Serialized {} pages into {} PDF objects",
            page_obj_ids.len(),
            builder.objects.len() - 1
        );

        Ok(self.serialize(&builder, info_obj_id))
    }

    /// Register each standard font that appears on any page, in a stable order.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[Page]) {
        let mut used: BTreeSet<StandardFont> = pages
            .iter()
            .flat_map(|p| p.commands.iter())
            .filter_map(|c| match c {
                DrawCommand::Text { style, .. } => Some(style.font()),
                _ => None,
            })
            .collect();

        // Always have at least Helvetica
        if used.is_empty() {
            used.insert(StandardFont::Helvetica);
        }

        for font in used {
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            let obj_id = builder.push(font_dict.into_bytes());
            builder.font_objects.push((font, obj_id));
        }
    }

    fn build_font_resource_dict(&self, font_objects: &[(StandardFont, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn font_index(&self, font: StandardFont, builder: &PdfBuilder) -> Result<usize, ReportError> {
        builder
            .font_objects
            .iter()
            .position(|(f, _)| *f == font)
            .ok_or_else(|| {
                ReportError::Render(format!("font {} was not registered", font.pdf_name()))
            })
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &Page, builder: &PdfBuilder) -> Result<String, ReportError> {
        let mut stream = String::new();
        let page_height = page.height;

        for command in &page.commands {
            match command {
                DrawCommand::Text { x, y, text, style } => {
                    let font_idx = self.font_index(style.font(), builder)?;
                    let c = style.color;
                    let _ = write!(
                        stream,
                        "BT\n{:.3} {:.3} {:.3} rg\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        c.r,
                        c.g,
                        c.b,
                        font_idx,
                        style.size,
                        x,
                        page_height - y,
                        Self::encode_text(text)
                    );
                }

                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    paint,
                    radius,
                } => {
                    let pdf_y = page_height - y - height;
                    let (color, set_op, paint_op) = match paint {
                        Paint::Fill(c) => (c, "rg", "f"),
                        Paint::Stroke(c) => (c, "RG", "S"),
                    };
                    let _ = write!(stream, "q\n{:.3} {:.3} {:.3} {}\n", color.r, color.g, color.b, set_op);
                    if matches!(paint, Paint::Stroke(_)) {
                        let _ = write!(stream, "{:.2} w\n", STROKE_WIDTH);
                    }
                    if *radius > 0.0 {
                        self.write_rounded_rect(&mut stream, *x, pdf_y, *width, *height, *radius);
                    } else {
                        let _ = write!(stream, "{:.2} {:.2} {:.2} {:.2} re\n", x, pdf_y, width, height);
                    }
                    let _ = write!(stream, "{}\nQ\n", paint_op);
                }

                DrawCommand::Line { x1, y1, x2, y2, color } => {
                    let _ = write!(
                        stream,
                        "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        color.r,
                        color.g,
                        color.b,
                        STROKE_WIDTH,
                        x1,
                        page_height - y1,
                        x2,
                        page_height - y2
                    );
                }
            }
        }

        Ok(stream)
    }

    /// Path a rectangle with equal rounded corners. `y` is the PDF-space bottom.
    fn write_rounded_rect(&self, stream: &mut String, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        let k = r * KAPPA;

        let _ = write!(stream, "{:.2} {:.2} m\n", x + r, y);
        let _ = write!(stream, "{:.2} {:.2} l\n", x + w - r, y);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x + w - r + k, y, x + w, y + r - k, x + w, y + r
        );
        let _ = write!(stream, "{:.2} {:.2} l\n", x + w, y + h - r);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h
        );
        let _ = write!(stream, "{:.2} {:.2} l\n", x + r, y + h);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x + r - k, y + h, x, y + h - r + k, x, y + h - r
        );
        let _ = write!(stream, "{:.2} {:.2} l\n", x, y + r);
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c\n",
            x, y + r - k, x + r - k, y, x + r, y
        );
        let _ = write!(stream, "h\n");
    }

    fn link_annotation(&self, link: &Link, page_height: f64) -> String {
        let bottom = page_height - link.y - link.height;
        format!(
            "<< /Type /Annot /Subtype /Link /Rect [{:.2} {:.2} {:.2} {:.2}] /Border [0 0 0] \
             /A << /S /URI /URI ({}) >> >>",
            link.x,
            bottom,
            link.x + link.width,
            bottom + link.height,
            Self::escape_pdf_string(&link.uri)
        )
    }

    /// Escape special characters in a PDF string.
    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// Encode text as a WinAnsi literal string body, escaping delimiters and
    /// writing bytes outside printable ASCII as octal escapes.
    fn encode_text(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            let b = winansi_byte(ch).unwrap_or(b'?');
            match b {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(b as char),
                _ => {
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}
