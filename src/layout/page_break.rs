//! # Page Break Decisions
//!
//! Logic for deciding whether a block starts on the current page or the
//! next one. Blocks are atomic here: a card or a code block either fits in
//! the space left on the page or moves, whole, to a fresh page. Paragraphs
//! get their split behavior by asking once per line.

/// What to do with a block of known height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// Place the block on the current page (it fits).
    Place,
    /// Start a new page and place the block at its top.
    MoveToNextPage,
    /// The block is taller than a whole page and the page is still empty.
    /// A new page would not help, so place it here and let it run past the
    /// bottom boundary.
    Overflow,
}

/// Decide where a block of `required` height goes.
///
/// `cursor_y` is the current offset on the page, `limit` the lowest offset
/// content may reach, and `content_top` the cursor position on a fresh page.
pub fn decide_break(cursor_y: f64, required: f64, limit: f64, content_top: f64) -> BreakDecision {
    if cursor_y + required <= limit {
        return BreakDecision::Place;
    }

    // Nothing has been placed on this page yet: moving would only leave a
    // blank page behind.
    if cursor_y <= content_top {
        return BreakDecision::Overflow;
    }

    BreakDecision::MoveToNextPage
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: f64 = 811.89;
    const TOP: f64 = 80.0;

    #[test]
    fn everything_fits() {
        assert_eq!(decide_break(100.0, 200.0, LIMIT, TOP), BreakDecision::Place);
    }

    #[test]
    fn exact_fit_places() {
        assert_eq!(decide_break(611.89, 200.0, LIMIT, TOP), BreakDecision::Place);
    }

    #[test]
    fn too_tall_moves() {
        assert_eq!(
            decide_break(700.0, 200.0, LIMIT, TOP),
            BreakDecision::MoveToNextPage
        );
    }

    #[test]
    fn taller_than_page_on_fresh_page_overflows() {
        assert_eq!(decide_break(TOP, 2000.0, LIMIT, TOP), BreakDecision::Overflow);
    }

    #[test]
    fn taller_than_page_mid_page_moves_first() {
        assert_eq!(
            decide_break(300.0, 2000.0, LIMIT, TOP),
            BreakDecision::MoveToNextPage
        );
    }
}
