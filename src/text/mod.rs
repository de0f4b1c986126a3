//! # Text Layout
//!
//! Line breaking and measurement. [`wrap_text`] is the only wrapping routine
//! in the crate: the layout estimator counts its lines and the block renderer
//! draws them, so an estimate can never disagree with what gets drawn.

pub mod segment;

use crate::font::StandardFont;
use crate::style::TextStyle;
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// Fixed line-height multiplier applied to the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Tabs in code snippets are expanded to this many spaces before measuring.
const TAB_WIDTH: usize = 4;

/// Vertical advance of one line at `font_size`.
pub fn line_height(font_size: f64) -> f64 {
    font_size * LINE_HEIGHT_FACTOR
}

/// A line of text after line-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    /// The text as drawn, without trailing spaces.
    pub text: String,
    /// Width of `text` in points.
    pub width: f64,
}

/// Compute UAX#14 break opportunities indexed by char position.
///
/// Returns a vec of length `text.chars().count()`. Each entry is the break
/// opportunity *before* that character position. Index 0 is always `None`.
fn compute_break_opportunities(text: &str) -> Vec<Option<BreakOpportunity>> {
    let char_count = text.chars().count();
    let mut result = vec![None; char_count];

    // linebreaks() yields the byte offset AFTER the break, i.e. the start of
    // the next segment.
    let byte_to_char: Vec<usize> = {
        let mut map = vec![0usize; text.len() + 1];
        for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
            map[byte_idx] = char_idx;
        }
        map[text.len()] = char_count;
        map
    };

    for (byte_offset, opp) in linebreaks(text) {
        let char_idx = byte_to_char[byte_offset];
        if char_idx > 0 && char_idx < char_count {
            result[char_idx] = Some(opp);
        }
    }

    result
}

/// Normalize line terminators to `\n` and expand tabs.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}' => out.push('\n'),
            '\t' => out.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
            _ => out.push(ch),
        }
    }
    out
}

/// Break `text` into lines that each fit within `max_width` at `style`.
///
/// Hard newlines always start a new line, and an empty paragraph still
/// produces one empty line, so `""` wraps to exactly one line. Within a
/// paragraph the breaking is greedy over UAX#14 opportunities; a word wider
/// than the column is split between characters. Spaces may hang past the
/// right edge and are trimmed from the line.
pub fn wrap_text(text: &str, max_width: f64, style: &TextStyle) -> Vec<BrokenLine> {
    let font = style.font();
    let normalized = normalize(text);
    let mut lines = Vec::new();

    for paragraph in normalized.split('\n') {
        if paragraph.is_empty() {
            lines.push(BrokenLine {
                text: String::new(),
                width: 0.0,
            });
            continue;
        }
        break_paragraph(paragraph, max_width, font, style.size, &mut lines);
    }

    lines
}

/// Number of lines `text` wraps to. Shorthand for the estimator.
pub fn wrap_line_count(text: &str, max_width: f64, style: &TextStyle) -> usize {
    wrap_text(text, max_width, style).len()
}

/// Width of `text` on a single line.
pub fn measure_width(text: &str, style: &TextStyle) -> f64 {
    style.font().measure_string(text, style.size)
}

fn break_paragraph(
    paragraph: &str,
    max_width: f64,
    font: StandardFont,
    font_size: f64,
    lines: &mut Vec<BrokenLine>,
) {
    let chars: Vec<char> = paragraph.chars().collect();
    let widths: Vec<f64> = chars.iter().map(|&ch| font.char_width(ch, font_size)).collect();
    let break_opps = compute_break_opportunities(paragraph);

    let mut line_start = 0;
    let mut line_width = 0.0;
    let mut last_break_point: Option<usize> = None;

    for (i, &ch) in chars.iter().enumerate() {
        let char_width = widths[i];

        // A break *before* char[i] ends the previous line at char[i-1].
        match break_opps[i] {
            Some(BreakOpportunity::Mandatory) => {
                lines.push(make_line(&chars[line_start..i], &widths[line_start..i]));
                line_start = i;
                line_width = 0.0;
                last_break_point = None;
            }
            Some(BreakOpportunity::Allowed) => {
                last_break_point = Some(i - 1);
            }
            None => {}
        }

        if ch != ' ' && line_width + char_width > max_width && line_start < i {
            if let Some(bp) = last_break_point.filter(|&bp| bp >= line_start) {
                lines.push(make_line(&chars[line_start..=bp], &widths[line_start..=bp]));
                line_start = bp + 1;
                line_width = widths[line_start..=i].iter().sum();
                last_break_point = None;
                continue;
            }

            // No break opportunity on this line: split the word here.
            lines.push(make_line(&chars[line_start..i], &widths[line_start..i]));
            line_start = i;
            line_width = char_width;
            last_break_point = None;
            continue;
        }

        line_width += char_width;
    }

    if line_start < chars.len() {
        lines.push(make_line(&chars[line_start..], &widths[line_start..]));
    }
}

fn make_line(chars: &[char], widths: &[f64]) -> BrokenLine {
    let mut end = chars.len();
    while end > 0 && chars[end - 1] == ' ' {
        end -= 1;
    }
    BrokenLine {
        text: chars[..end].iter().collect(),
        width: widths[..end].iter().sum(),
    }
}
