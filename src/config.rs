//! # Report Configuration
//!
//! Page geometry, type scale, palette, and spacing for the audit report.
//! Every field has a default, so a JSON config only needs to name what it
//! changes:
//!
//! ```json
//! { "page": { "size": "Letter" }, "palette": { "error": "#b00020" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::Severity;
use crate::style::Color;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    pub page: PageConfig,
    pub fonts: FontSizes,
    pub palette: Palette,
    pub spacing: Spacing,
}

impl ReportConfig {
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let config: ReportConfig =
            serde_json::from_str(json).map_err(|e| ReportError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry that leaves no room for content, and any size or gap
    /// that would move the cursor up the page.
    pub fn validate(&self) -> Result<(), ReportError> {
        let (width, height) = self.page.size.dimensions();
        let page = &self.page;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ReportError::Config(format!(
                "page size must be positive, got {}x{}",
                width, height
            )));
        }
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !(non_negative(page.margin)
            && non_negative(page.header_height)
            && non_negative(page.footer_height))
        {
            return Err(ReportError::Config(
                "margin, header and footer heights must not be negative".to_string(),
            ));
        }
        self.fonts.validate()?;
        self.spacing.validate()?;
        if self.content_width() <= self.spacing.card_inset + self.spacing.code_padding {
            return Err(ReportError::Config(format!(
                "margin {} leaves no room for card content on a {}pt wide page",
                page.margin, width
            )));
        }
        if self.content_top() >= self.usable_limit() {
            return Err(ReportError::Config(format!(
                "header ({}) + margin ({}) + footer ({}) exceed the page height {}",
                page.header_height, page.margin, page.footer_height, height
            )));
        }
        Ok(())
    }

    pub fn page_width(&self) -> f64 {
        self.page.size.dimensions().0
    }

    pub fn page_height(&self) -> f64 {
        self.page.size.dimensions().1
    }

    /// Width between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.page_width() - self.page.margin * 2.0
    }

    /// Cursor position on a fresh page.
    pub fn content_top(&self) -> f64 {
        self.page.header_height + self.page.margin
    }

    /// The cursor must stay at or above this line: page height minus the
    /// footer reservation.
    pub fn usable_limit(&self) -> f64 {
        self.page_height() - self.page.footer_height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub size: PageSize,
    /// Left/right margin, and the gap between the header and content.
    pub margin: f64,
    pub header_height: f64,
    pub footer_height: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: 50.0,
            header_height: 30.0,
            footer_height: 30.0,
        }
    }
}

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontSizes {
    pub h2: f64,
    pub h3: f64,
    pub body: f64,
    pub small: f64,
    pub code: f64,
    pub cover_title: f64,
    pub cover_url: f64,
    pub cover_label: f64,
    pub score: f64,
    pub issue_count: f64,
}

impl FontSizes {
    fn named(&self) -> [(&'static str, f64); 10] {
        [
            ("h2", self.h2),
            ("h3", self.h3),
            ("body", self.body),
            ("small", self.small),
            ("code", self.code),
            ("coverTitle", self.cover_title),
            ("coverUrl", self.cover_url),
            ("coverLabel", self.cover_label),
            ("score", self.score),
            ("issueCount", self.issue_count),
        ]
    }

    /// Every size must be a positive, finite number of points.
    pub fn validate(&self) -> Result<(), ReportError> {
        for (name, size) in self.named() {
            if !(size.is_finite() && size > 0.0) {
                return Err(ReportError::Config(format!(
                    "font size '{}' must be positive, got {}",
                    name, size
                )));
            }
        }
        Ok(())
    }
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            h2: 18.0,
            h3: 14.0,
            body: 10.0,
            small: 8.0,
            code: 9.0,
            cover_title: 32.0,
            cover_url: 14.0,
            cover_label: 12.0,
            score: 48.0,
            issue_count: 14.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub text: Color,
    pub heading: Color,
    pub primary: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub light_gray: Color,
    pub medium_gray: Color,
    pub border: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Color::hex("#333333"),
            heading: Color::hex("#111111"),
            primary: Color::hex("#4f46e5"),
            error: Color::hex("#d9534f"),
            warning: Color::hex("#f0ad4e"),
            success: Color::hex("#5cb85c"),
            light_gray: Color::hex("#f3f4f6"),
            medium_gray: Color::hex("#6b7280"),
            border: Color::hex("#e5e7eb"),
        }
    }
}

impl Palette {
    /// Score color by threshold: below 50 low, below 90 mid, else high.
    pub fn score_color(&self, score: u32) -> Color {
        if score < 50 {
            self.error
        } else if score < 90 {
            self.warning
        } else {
            self.success
        }
    }

    /// Accent used for a finding's card stripe.
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
        }
    }
}

/// Fixed gaps, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spacing {
    /// Card top and bottom padding.
    pub card: f64,
    /// Between major sections inside a card.
    pub section: f64,
    /// Between a label and its value.
    pub item: f64,
    /// Between a card title and its metadata line.
    pub title_gap: f64,
    /// After each card.
    pub after_card: f64,
    /// Between consecutive solution segments.
    pub segment_gap: f64,
    /// Total horizontal (and total vertical) padding of a code block.
    pub code_padding: f64,
    /// Baseline of the first code line below the block top.
    pub code_baseline: f64,
    /// Left inset of card content from the card edge.
    pub card_inset: f64,
    /// Content width given up to the inset plus right padding.
    pub card_width_reduction: f64,
    pub stripe_width: f64,
    pub card_radius: f64,
    pub code_radius: f64,
}

impl Spacing {
    fn named(&self) -> [(&'static str, f64); 13] {
        [
            ("card", self.card),
            ("section", self.section),
            ("item", self.item),
            ("titleGap", self.title_gap),
            ("afterCard", self.after_card),
            ("segmentGap", self.segment_gap),
            ("codePadding", self.code_padding),
            ("codeBaseline", self.code_baseline),
            ("cardInset", self.card_inset),
            ("cardWidthReduction", self.card_width_reduction),
            ("stripeWidth", self.stripe_width),
            ("cardRadius", self.card_radius),
            ("codeRadius", self.code_radius),
        ]
    }

    /// Gaps may be zero but never negative; the cursor only moves down.
    pub fn validate(&self) -> Result<(), ReportError> {
        for (name, gap) in self.named() {
            if !(gap.is_finite() && gap >= 0.0) {
                return Err(ReportError::Config(format!(
                    "spacing '{}' must not be negative, got {}",
                    name, gap
                )));
            }
        }
        Ok(())
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            card: 20.0,
            section: 20.0,
            item: 8.0,
            title_gap: 5.0,
            after_card: 20.0,
            segment_gap: 10.0,
            code_padding: 20.0,
            code_baseline: 15.0,
            card_inset: 15.0,
            card_width_reduction: 25.0,
            stripe_width: 5.0,
            card_radius: 5.0,
            code_radius: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_a4_layout() {
        let c = ReportConfig::default();
        assert!((c.content_width() - 495.28).abs() < 1e-9);
        assert_eq!(c.content_top(), 80.0);
        assert!((c.usable_limit() - 811.89).abs() < 1e-9);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let c = ReportConfig::from_json(
            r##"{ "page": { "size": "Letter" }, "palette": { "error": "#b00020" } }"##,
        )
        .unwrap();
        assert_eq!(c.page_height(), 792.0);
        assert_eq!(c.page.margin, 50.0);
        assert_eq!(c.palette.error.to_hex(), "#b00020");
        assert_eq!(c.palette.warning, Palette::default().warning);
        assert_eq!(c.fonts, FontSizes::default());
    }

    #[test]
    fn test_custom_page_size() {
        let c = ReportConfig::from_json(
            r#"{ "page": { "size": { "Custom": { "width": 400, "height": 600 } } } }"#,
        )
        .unwrap();
        assert_eq!(c.page.size.dimensions(), (400.0, 600.0));
    }

    #[test]
    fn test_bad_color_is_config_error() {
        let err = ReportConfig::from_json(r#"{ "palette": { "text": "blue" } }"#).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_oversized_margins_rejected() {
        let err = ReportConfig::from_json(r#"{ "page": { "margin": 300 } }"#).unwrap_err();
        assert!(err.to_string().contains("no room"));
    }

    #[test]
    fn test_non_positive_font_sizes_rejected() {
        for json in [
            r#"{ "fonts": { "body": -10 } }"#,
            r#"{ "fonts": { "code": 0 } }"#,
            r#"{ "fonts": { "score": -1 } }"#,
        ] {
            let err = ReportConfig::from_json(json).unwrap_err();
            assert!(
                matches!(err, ReportError::Config(ref m) if m.contains("font size")),
                "{} gave {:?}",
                json,
                err
            );
        }
    }

    #[test]
    fn test_negative_spacing_rejected() {
        for json in [
            r#"{ "spacing": { "codePadding": -100 } }"#,
            r#"{ "spacing": { "section": -500 } }"#,
            r#"{ "spacing": { "item": -1 } }"#,
            r#"{ "spacing": { "card": -20 } }"#,
            r#"{ "spacing": { "afterCard": -0.5 } }"#,
        ] {
            let err = ReportConfig::from_json(json).unwrap_err();
            assert!(
                matches!(err, ReportError::Config(ref m) if m.contains("spacing")),
                "{} gave {:?}",
                json,
                err
            );
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut c = ReportConfig::default();
        c.fonts.h2 = f64::NAN;
        assert!(c.validate().is_err());

        let mut c = ReportConfig::default();
        c.spacing.segment_gap = f64::INFINITY;
        assert!(c.validate().is_err());

        let mut c = ReportConfig::default();
        c.page.margin = f64::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_zero_spacing_allowed() {
        let c = ReportConfig::from_json(r#"{ "spacing": { "afterCard": 0, "codeRadius": 0 } }"#)
            .unwrap();
        assert_eq!(c.spacing.after_card, 0.0);
    }

    #[test]
    fn test_score_color_thresholds() {
        let p = Palette::default();
        assert_eq!(p.score_color(0), p.error);
        assert_eq!(p.score_color(49), p.error);
        assert_eq!(p.score_color(50), p.warning);
        assert_eq!(p.score_color(72), p.warning);
        assert_eq!(p.score_color(89), p.warning);
        assert_eq!(p.score_color(90), p.success);
        assert_eq!(p.score_color(100), p.success);
    }

    #[test]
    fn test_severity_color() {
        let p = Palette::default();
        assert_eq!(p.severity_color(Severity::Error).to_hex(), "#d9534f");
        assert_eq!(p.severity_color(Severity::Warning).to_hex(), "#f0ad4e");
    }
}
