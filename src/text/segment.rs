//! Fenced-code lexer for suggested-solution text.
//!
//! A solution is prose with zero or more fenced blocks:
//!
//! ````text
//! Add a text alternative.
//! ```html
//! <img src="x.jpg" alt="Product photo">
//! ```
//! ````
//!
//! The opening fence is three backticks plus an optional language tag on its
//! own line; the block ends at the first line that starts with three
//! backticks. Measuring and drawing both consume the output of
//! [`segment_solution`], so they always see the same segments.

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Prose with inline backtick markers already stripped.
    Prose(String),
    /// The inner text of a fenced block, blank edge lines removed.
    Code {
        language: Option<String>,
        code: String,
    },
}

impl Segment {
    pub fn is_code(&self) -> bool {
        matches!(self, Segment::Code { .. })
    }

    /// The text that gets measured and drawn for this segment.
    pub fn text(&self) -> &str {
        match self {
            Segment::Prose(text) => text,
            Segment::Code { code, .. } => code,
        }
    }
}

/// Split a solution into typed segments, dropping whitespace-only prose.
pub fn segment_solution(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut prose_start = 0;
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find(FENCE) {
        let fence_at = search_from + offset;
        match match_fence(text, fence_at) {
            Some(fence) => {
                push_prose(&mut segments, strip_line_end(&text[prose_start..fence_at]));
                segments.push(Segment::Code {
                    language: fence.language,
                    code: trim_blank_lines(fence.inner),
                });
                prose_start = skip_line_end(text, fence.end);
                search_from = prose_start;
            }
            None => search_from = fence_at + 1,
        }
    }

    push_prose(&mut segments, &text[prose_start..]);
    segments
}

struct Fence<'a> {
    language: Option<String>,
    inner: &'a str,
    /// Byte offset just past the closing backticks.
    end: usize,
}

/// Language tags are plain ASCII words: `html`, `css`, `javascript`.
fn is_tag_char(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Try to read a complete fenced block whose opening backticks sit at `at`.
fn match_fence(text: &str, at: usize) -> Option<Fence<'_>> {
    let after_ticks = at + FENCE.len();
    let rest = &text[after_ticks..];
    let tag_len = rest.find(|c: char| !is_tag_char(c)).unwrap_or(rest.len());
    let tag = &rest[..tag_len];

    let mut content_start = after_ticks + tag_len;
    if text[content_start..].starts_with("\r\n") {
        content_start += 2;
    } else if text[content_start..].starts_with('\n') {
        content_start += 1;
    } else {
        return None;
    }

    // The closing fence must start its own line. The newline before it
    // terminates the content, so an empty block is "```\n\n```".
    let close = text[content_start..].find("\n```")?;
    let inner = &text[content_start..content_start + close];

    Some(Fence {
        language: (!tag.is_empty()).then(|| tag.to_string()),
        inner: inner.strip_suffix('\r').unwrap_or(inner),
        end: content_start + close + 1 + FENCE.len(),
    })
}

fn push_prose(segments: &mut Vec<Segment>, raw: &str) {
    if raw.trim().is_empty() {
        return;
    }
    segments.push(Segment::Prose(strip_inline_code(raw)));
}

/// Drop the line terminator that belongs to a following fence line.
fn strip_line_end(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

/// Skip the line terminator that ends a closing fence line.
fn skip_line_end(text: &str, at: usize) -> usize {
    if text[at..].starts_with("\r\n") {
        at + 2
    } else if text[at..].starts_with('\n') {
        at + 1
    } else {
        at
    }
}

/// Remove whitespace-only lines from both ends and trailing whitespace.
/// Indentation of the first real line is kept.
pub fn trim_blank_lines(code: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n").trim_end().to_string(),
        _ => String::new(),
    }
}

/// Strip the markers of inline code spans: `` `alt` `` becomes `alt`.
///
/// A span needs at least one character between its backticks; unpaired
/// backticks are left as they are. The span gets no special styling.
pub fn strip_inline_code(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('`') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('`') {
            Some(close) if close > 0 => {
                out.push_str(&after[..close]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('`');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
