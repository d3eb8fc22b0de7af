//! Bounded text search that recovers exact spans.
//!
//! The external processor only reports an approximate starting line and the
//! stripped text of each block. [`find_location`] re-finds that text in the
//! physical lines, inside a [`Window`] of candidate lines, and returns the
//! first (leftmost-earliest) alignment.

use crate::ast::{Location, Position};
use crate::span::{SourceIndex, find_from};

/// Prefix of a single-line comment outside verbatim blocks.
const COMMENT_MARKER: &str = "//";

/// Search bounds for one location lookup.
///
/// Passed by value; callers build narrowed copies per recursive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First candidate line (1-based, inclusive).
    pub min: usize,
    /// Last line a match may start its final expected line on (inclusive).
    pub max: usize,
    /// Skip `//` comment lines while aligning.
    pub skip_comments: bool,
    /// Character column the first expected line must start at or after.
    pub start_idx: usize,
}

impl Window {
    /// A window spanning lines `min..=max` with comment skipping on.
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min,
            max,
            skip_comments: true,
            start_idx: 0,
        }
    }

    /// The same window starting at `min`.
    #[must_use]
    pub fn starting_at(self, min: usize) -> Self {
        Self { min, ..self }
    }

    /// The same window ending at `max`.
    #[must_use]
    pub fn ending_at(self, max: usize) -> Self {
        Self { max, ..self }
    }

    /// The same window with a horizontal start column.
    #[must_use]
    pub fn from_column(self, start_idx: usize) -> Self {
        Self { start_idx, ..self }
    }

    /// The same window with comment skipping disabled.
    #[must_use]
    pub fn verbatim(self) -> Self {
        Self {
            skip_comments: false,
            ..self
        }
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER)
}

/// Find where `expected` lines occur in the source within `window`.
///
/// Candidate starting lines are tried from `window.min` upwards; the first
/// candidate at which every expected line is a substring of its aligned
/// physical line wins. When comment skipping is on, `//` lines are stepped
/// over and shift every later expected line by the same amount. Comment
/// lines skipped before the first expected line are not part of the span.
///
/// Returns `None` when no candidate in the window aligns.
#[must_use]
pub fn find_location(
    index: &SourceIndex<'_>,
    expected: &[&str],
    window: Window,
) -> Option<Location> {
    let (first, last) = match expected {
        [] => return None,
        [only] => (*only, *only),
        [first, .., last] => (*first, *last),
    };
    let min = window.min.max(1);
    let max = window.max.min(index.line_count());
    let last_start = (max + 1).checked_sub(expected.len())?;

    (min..=last_start).find_map(|candidate| {
        let location = align_at(index, expected, candidate, window)?;
        tracing::trace!(
            candidate,
            first,
            last,
            start = ?location.start,
            end = ?location.end,
            "located"
        );
        Some(location)
    })
}

/// Try to align all expected lines starting at physical line `candidate`.
fn align_at(
    index: &SourceIndex<'_>,
    expected: &[&str],
    candidate: usize,
    window: Window,
) -> Option<Location> {
    let mut offset = 0;
    let mut start = None;
    let mut end = None;

    for (j, text) in expected.iter().enumerate() {
        let skip = window.skip_comments && !is_comment(text);
        let (line_no, line) = loop {
            let line_no = candidate + j + offset;
            let line = index.line(line_no)?;
            if skip && is_comment(line) {
                offset += 1;
                continue;
            }
            break (line_no, line);
        };

        let from = if j == 0 { window.start_idx } else { 0 };
        let column = find_from(line, text, from)?;
        if j == 0 {
            start = Some(Position {
                line: line_no,
                column,
            });
        }
        if j == expected.len() - 1 {
            end = Some(Position {
                line: line_no,
                column: column + text.chars().count(),
            });
        }
    }

    Some(Location {
        start: start?,
        end: end?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, column: usize) -> Position {
        Position { line, column }
    }

    fn find(source: &str, expected: &[&str], window: Window) -> Option<Location> {
        find_location(&SourceIndex::new(source), expected, window)
    }

    #[test]
    fn single_line_match() {
        let loc = find("text", &["text"], Window::new(1, 1)).unwrap();
        assert_eq!(loc.start, pos(1, 0));
        assert_eq!(loc.end, pos(1, 4));
    }

    #[test]
    fn multi_line_match() {
        let loc = find("text\ntext\n", &["text", "text"], Window::new(1, 3)).unwrap();
        assert_eq!(loc.start, pos(1, 0));
        assert_eq!(loc.end, pos(2, 4));
    }

    #[test]
    fn column_after_marker() {
        let loc = find("- text", &["text"], Window::new(1, 1)).unwrap();
        assert_eq!(loc.start, pos(1, 2));
        assert_eq!(loc.end, pos(1, 6));
    }

    #[test]
    fn leftmost_earliest_wins() {
        let src = "foo\nfoo\nfoo";
        let loc = find(src, &["foo"], Window::new(1, 3)).unwrap();
        assert_eq!(loc.start.line, 1);
        let loc = find(src, &["foo"], Window::new(2, 3)).unwrap();
        assert_eq!(loc.start.line, 2);
    }

    #[test]
    fn repeated_search_is_deterministic() {
        let src = "a b\nb a\na b";
        let first = find(src, &["a"], Window::new(2, 3));
        let second = find(src, &["a"], Window::new(2, 3));
        assert_eq!(first, second);
        assert_eq!(first.unwrap().start, pos(2, 2));
    }

    #[test]
    fn respects_window_max() {
        let src = "x\ny\nneedle";
        assert!(find(src, &["needle"], Window::new(1, 2)).is_none());
        assert!(find(src, &["needle"], Window::new(1, 3)).is_some());
    }

    #[test]
    fn window_max_past_last_line_is_clamped() {
        let loc = find("a\nb", &["b"], Window::new(1, usize::MAX)).unwrap();
        assert_eq!(loc.start, pos(2, 0));
        assert!(find("a\nb", &["c"], Window::new(1, 1_000_000_000_000)).is_none());
        assert!(find("a\nb", &["a"], Window::new(usize::MAX, usize::MAX)).is_none());
    }

    #[test]
    fn window_too_small_for_lines() {
        assert!(find("a\nb", &["a", "b"], Window::new(1, 1)).is_none());
        assert!(find("a\nb", &["a", "b"], Window::new(1, 0)).is_none());
    }

    #[test]
    fn rejects_partial_alignment() {
        let src = "one\nthree\none\ntwo";
        let loc = find(src, &["one", "two"], Window::new(1, 4)).unwrap();
        assert_eq!(loc.start, pos(3, 0));
        assert_eq!(loc.end, pos(4, 3));
    }

    #[test]
    fn not_found() {
        assert!(find("alpha\nbeta", &["gamma"], Window::new(1, 2)).is_none());
        assert!(find("alpha", &[], Window::new(1, 1)).is_none());
    }

    #[test]
    fn comment_inside_paragraph_is_skipped() {
        let src = "first\n// note\nsecond";
        let loc = find(src, &["first", "second"], Window::new(1, 3)).unwrap();
        assert_eq!(loc.start, pos(1, 0));
        assert_eq!(loc.end, pos(3, 6));
    }

    #[test]
    fn leading_comments_are_excluded_from_span() {
        let src = "// one\n// two\ntext";
        let loc = find(src, &["text"], Window::new(1, 3)).unwrap();
        assert_eq!(loc.start, pos(3, 0));
        assert_eq!(loc.end, pos(3, 4));
    }

    #[test]
    fn comment_shift_past_end_rejects_candidate() {
        let src = "text\n// trailing";
        assert!(find(src, &["text", "more"], Window::new(1, 2)).is_none());
    }

    #[test]
    fn verbatim_window_keeps_comment_lines() {
        let src = "// code\nx = 1";
        let loc = find(src, &["// code", "x = 1"], Window::new(1, 2).verbatim()).unwrap();
        assert_eq!(loc.start, pos(1, 0));
        assert_eq!(loc.end, pos(2, 5));

        let src = "a\n// b\nc";
        assert!(find(src, &["a", "c"], Window::new(1, 3).verbatim()).is_none());
    }

    #[test]
    fn expected_comment_line_matches_in_place() {
        let src = "// code";
        let loc = find(src, &["// code"], Window::new(1, 1)).unwrap();
        assert_eq!(loc.start, pos(1, 0));
    }

    #[test]
    fn start_idx_applies_to_first_line() {
        let src = "|A|A";
        let loc = find(src, &["A"], Window::new(1, 1).from_column(2)).unwrap();
        assert_eq!(loc.start, pos(1, 3));
        assert_eq!(loc.end, pos(1, 4));
    }

    #[test]
    fn start_idx_does_not_constrain_later_lines() {
        let src = "  | x\ny";
        let loc = find(src, &["x", "y"], Window::new(1, 2).from_column(3)).unwrap();
        assert_eq!(loc.start, pos(1, 4));
        assert_eq!(loc.end, pos(2, 1));
    }

    #[test]
    fn window_helpers() {
        let w = Window::new(1, 9).starting_at(3).ending_at(5).from_column(2);
        assert_eq!((w.min, w.max, w.start_idx, w.skip_comments), (3, 5, 2, true));
        assert!(!w.verbatim().skip_comments);
    }
}
