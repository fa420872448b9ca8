//! Core types used throughout the project.

use serde::Serialize;

/// A range in a resource document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// A position in a resource document (0-indexed, `character` counts Unicode scalar values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl SourcePosition {
    /// Converts a byte offset into `text` to a line/character position.
    ///
    /// Offsets past the end of `text` (or inside a multi-byte character) are
    /// clamped to the nearest preceding character boundary.
    #[must_use]
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let prefix = text.get(..end).unwrap_or_default();

        let line = prefix.matches('\n').count();
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let character = prefix.get(line_start..).map_or(0, |rest| rest.chars().count());

        Self { line: saturating_u32(line), character: saturating_u32(character) }
    }
}

impl SourceRange {
    /// Builds a range from two byte offsets into `text`.
    #[must_use]
    pub fn from_offsets(text: &str, start: usize, end: usize) -> Self {
        Self {
            start: SourcePosition::from_offset(text, start),
            end: SourcePosition::from_offset(text, end),
        }
    }

    /// Checks if a position is within this range.
    #[must_use]
    pub const fn contains(&self, position: SourcePosition) -> bool {
        if position.line < self.start.line {
            return false;
        }
        if position.line == self.start.line && position.character < self.start.character {
            return false;
        }
        if position.line > self.end.line {
            return false;
        }
        if position.line == self.end.line && position.character > self.end.character {
            return false;
        }
        true
    }
}

/// Converts a count to `u32`, saturating on overflow.
fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const fn pos(line: u32, character: u32) -> SourcePosition {
        SourcePosition { line, character }
    }

    const fn range(start_line: u32, start_char: u32, end_line: u32, end_char: u32) -> SourceRange {
        SourceRange { start: pos(start_line, start_char), end: pos(end_line, end_char) }
    }

    #[rstest]
    #[case::before_start_line(pos(0, 5), range(1, 5, 2, 10), false)]
    #[case::before_start_char(pos(1, 4), range(1, 5, 2, 10), false)]
    #[case::at_start(pos(1, 5), range(1, 5, 2, 10), true)]
    #[case::middle_line(pos(1, 10), range(1, 5, 2, 10), true)]
    #[case::at_end(pos(2, 10), range(1, 5, 2, 10), true)]
    #[case::after_end_char(pos(2, 11), range(1, 5, 2, 10), false)]
    #[case::after_end_line(pos(3, 0), range(1, 5, 2, 10), false)]
    fn test_contains(
        #[case] position: SourcePosition,
        #[case] range: SourceRange,
        #[case] expected: bool,
    ) {
        assert_that!(range.contains(position), eq(expected));
    }

    #[rstest]
    #[case::start_of_text("<TS>\n  <context>", 0, pos(0, 0))]
    #[case::first_line("<TS>\n  <context>", 2, pos(0, 2))]
    #[case::after_newline("<TS>\n  <context>", 5, pos(1, 0))]
    #[case::second_line("<TS>\n  <context>", 7, pos(1, 2))]
    #[case::past_end("<TS>\n  <context>", 100, pos(1, 11))]
    // "è" is two bytes but one character
    #[case::multibyte("hypothèse\n", 9, pos(0, 8))]
    #[case::inside_multibyte("è", 1, pos(0, 0))]
    fn test_from_offset(#[case] text: &str, #[case] offset: usize, #[case] expected: SourcePosition) {
        assert_that!(SourcePosition::from_offset(text, offset), eq(expected));
    }

    #[googletest::test]
    fn test_from_offsets_spans_lines() {
        let text = "<message>\n  <source>A</source>\n</message>";

        let range = SourceRange::from_offsets(text, 0, text.len());

        expect_that!(range.start, eq(pos(0, 0)));
        expect_that!(range.end, eq(pos(2, 10)));
    }
}
