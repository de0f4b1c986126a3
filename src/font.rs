//! # Font Metrics
//!
//! The report only uses standard PDF fonts, which viewers supply themselves,
//! so no embedding is needed. Measurement uses the AFM advance widths of
//! each face (1/1000 em units) for the printable ASCII range.

use crate::style::FontFamily;

/// The subset of the 14 standard PDF fonts the report draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

/// Helvetica widths for U+0020..=U+007E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {..~
];

/// Helvetica-Bold widths for U+0020..=U+007E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // {..~
];

const COURIER_WIDTH: u16 = 600;

/// WinAnsiEncoding byte for `ch`, or `None` if the standard fonts cannot
/// draw it.
pub fn winansi_byte(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // Euro sign
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2030 => Some(0x89), // Per mille sign
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x2122 => Some(0x99), // Trade mark sign
        _ => None,
    }
}

impl StandardFont {
    pub fn resolve(family: FontFamily, bold: bool) -> Self {
        match (family, bold) {
            (FontFamily::Helvetica, false) => Self::Helvetica,
            (FontFamily::Helvetica, true) => Self::HelveticaBold,
            (FontFamily::Courier, false) => Self::Courier,
            (FontFamily::Courier, true) => Self::CourierBold,
        }
    }

    /// The PDF `/BaseFont` name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }

    /// Advance width of `ch` in 1/1000 em.
    fn units(&self, ch: char) -> u16 {
        let table = match self {
            Self::Courier | Self::CourierBold => return COURIER_WIDTH,
            Self::Helvetica => &HELVETICA_WIDTHS,
            Self::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) {
            table[(cp - 0x20) as usize]
        } else if winansi_byte(ch).is_some() {
            // Accented Latin letters and typographic punctuation: the width
            // of 'n' is a close stand-in.
            table[('n' as u32 - 0x20) as usize]
        } else {
            // Drawn as '?', so measured as '?'.
            table[('?' as u32 - 0x20) as usize]
        }
    }

    /// Advance width of `ch` in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.units(ch) as f64 / 1000.0 * font_size
    }

    /// Width of a whole string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_space() {
        let w = StandardFont::Helvetica.char_width(' ', 12.0);
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_bold_wider() {
        let regular = StandardFont::Helvetica.measure_string("Suggested Solution", 10.0);
        let bold = StandardFont::HelveticaBold.measure_string("Suggested Solution", 10.0);
        assert!(bold > regular, "bold should be wider than regular");
    }

    #[test]
    fn test_courier_is_fixed_width() {
        let a = StandardFont::Courier.measure_string("iiii", 9.0);
        let b = StandardFont::Courier.measure_string("WWWW", 9.0);
        assert!((a - b).abs() < 1e-9);
        assert!((a - 4.0 * 5.4).abs() < 1e-9);
    }

    #[test]
    fn test_non_ascii_falls_back() {
        let w = StandardFont::Helvetica.char_width('é', 10.0);
        assert!((w - 5.56).abs() < 1e-9);
    }

    #[test]
    fn test_unmappable_measured_as_question_mark() {
        let font = StandardFont::Helvetica;
        assert_eq!(winansi_byte('\u{4e2d}'), None);
        assert!((font.char_width('\u{4e2d}', 10.0) - font.char_width('?', 10.0)).abs() < 1e-9);
        assert!(
            (font.measure_string("a\u{1F600}b", 10.0) - font.measure_string("a?b", 10.0)).abs()
                < 1e-9
        );
        // Mappable non-ASCII keeps the 'n' stand-in.
        assert_eq!(winansi_byte('\u{2014}'), Some(0x97));
        assert!((font.char_width('\u{2014}', 10.0) - font.char_width('n', 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            StandardFont::resolve(FontFamily::Helvetica, true).pdf_name(),
            "Helvetica-Bold"
        );
        assert_eq!(
            StandardFont::resolve(FontFamily::Courier, false).pdf_name(),
            "Courier"
        );
    }
}
