//! Caret coordinates for anchoring the candidate menu.
//!
//! The reducer never measures anything itself; hosts inject a
//! [`CaretLocator`]. [`MonospaceLocator`] covers terminals and fixed-width
//! text areas, and any `Fn(&str, usize) -> CaretPoint` works as a locator
//! for hosts that measure offscreen.

use fitmark_core::LineIndex;
use serde::{Deserialize, Serialize};

/// Glyph metrics for a fixed-width font.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    pub char_width: f32,
    pub line_height: f32,
    /// Columns per tab stop
    pub tab_width: usize,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 16.0,
            tab_width: 4,
        }
    }
}

/// Caret position in text and pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaretPoint {
    /// 1-based line
    pub line: usize,
    /// 0-based visual column
    pub column: usize,
    /// Left edge of the caret
    pub x: f32,
    /// Top of the caret's line
    pub y: f32,
}

/// Pure function of `(buffer, cursor)` to a caret position.
pub trait CaretLocator {
    fn locate(&self, buffer: &str, cursor: usize) -> CaretPoint;
}

impl<F> CaretLocator for F
where
    F: Fn(&str, usize) -> CaretPoint,
{
    fn locate(&self, buffer: &str, cursor: usize) -> CaretPoint {
        self(buffer, cursor)
    }
}

/// Locator for fixed-width fonts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonospaceLocator {
    metrics: FontMetrics,
}

impl MonospaceLocator {
    pub fn new(metrics: FontMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }
}

impl CaretLocator for MonospaceLocator {
    /// Cursors past the end clamp to the end; cursors inside a character
    /// snap back to its start.
    fn locate(&self, buffer: &str, cursor: usize) -> CaretPoint {
        let mut offset = cursor.min(buffer.len());
        while !buffer.is_char_boundary(offset) {
            offset -= 1;
        }

        let index = LineIndex::new(buffer);
        let (line, _) = index.line_col(offset);
        let line_start = index.line_start(line).unwrap_or(0);

        let tab_width = self.metrics.tab_width.max(1);
        let column = buffer[line_start..offset].chars().fold(0, |col, c| {
            if c == '\t' {
                (col / tab_width + 1) * tab_width
            } else {
                col + 1
            }
        });

        CaretPoint {
            line,
            column,
            x: column as f32 * self.metrics.char_width,
            y: (line - 1) as f32 * self.metrics.line_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let point = MonospaceLocator::default().locate("Try @bic", 4);
        assert_eq!(point.line, 1);
        assert_eq!(point.column, 4);
        assert_eq!(point.x, 32.0);
        assert_eq!(point.y, 0.0);
    }

    #[test]
    fn test_later_line() {
        let point = MonospaceLocator::default().locate("one\ntwo @x", 8);
        assert_eq!(point.line, 2);
        assert_eq!(point.column, 4);
        assert_eq!(point.y, 16.0);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let point = MonospaceLocator::default().locate("héllo @", 7);
        assert_eq!(point.column, 6);
    }

    #[test]
    fn test_tabs_expand_to_stops() {
        let point = MonospaceLocator::default().locate("a\tb", 3);
        assert_eq!(point.column, 5);
    }

    #[test]
    fn test_out_of_range_cursor_clamps() {
        let locator = MonospaceLocator::default();
        assert_eq!(locator.locate("abc", 99).column, 3);
        // Inside the two-byte 'é'
        assert_eq!(locator.locate("é", 1).column, 0);
    }

    #[test]
    fn test_closure_locator() {
        let fixed = |_: &str, cursor: usize| CaretPoint {
            line: 1,
            column: cursor,
            x: 0.0,
            y: 0.0,
        };
        assert_eq!(fixed.locate("anything", 3).column, 3);
    }
}
