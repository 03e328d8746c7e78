//! Scroll state and tab-expanded columns.

/// Default tab width in display columns.
pub const DEFAULT_TAB_STOP: usize = 4;

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible document row.
    pub row_offset: usize,
    /// First visible display column.
    pub col_offset: usize,
    /// Number of text rows on screen.
    pub rows: usize,
    /// Number of display columns on screen.
    pub cols: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(24, 80)
    }
}

impl Viewport {
    /// Create a viewport of `rows x cols` scrolled to the top-left corner.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            rows,
            cols,
        }
    }

    /// Whether document row `row` is on screen.
    pub fn contains_row(&self, row: usize) -> bool {
        row >= self.row_offset && row < self.row_offset + self.rows
    }

    /// The visible document rows.
    pub fn visible_rows(&self) -> std::ops::Range<usize> {
        self.row_offset..self.row_offset + self.rows
    }

    /// Adjust the offsets so that `(row, render_x)` is on screen.
    pub fn scroll_to(&mut self, row: usize, render_x: usize) {
        if row < self.row_offset {
            self.row_offset = row;
        }
        if self.rows > 0 && row >= self.row_offset + self.rows {
            self.row_offset = row + 1 - self.rows;
        }

        if render_x < self.col_offset {
            self.col_offset = render_x;
        }
        if self.cols > 0 && render_x >= self.col_offset + self.cols {
            self.col_offset = render_x + 1 - self.cols;
        }
    }
}

/// Display width of `byte` when it starts at display column `x`.
pub fn display_width(byte: u8, x: usize, tab_stop: usize) -> usize {
    if byte == b'\t' {
        let tab_stop = tab_stop.max(1);
        tab_stop - (x % tab_stop)
    } else {
        1
    }
}

/// Display column of byte column `col` in `text`.
pub fn render_x(text: &[u8], col: usize, tab_stop: usize) -> usize {
    text.iter()
        .take(col)
        .fold(0, |x, &b| x + display_width(b, x, tab_stop))
}

/// Byte column whose glyph covers display column `x`; past the end of the line this is the
/// line length.
pub fn col_for_render_x(text: &[u8], x: usize, tab_stop: usize) -> usize {
    let mut current = 0;
    for (col, &b) in text.iter().enumerate() {
        let width = display_width(b, current, tab_stop);
        if current + width > x {
            return col;
        }
        current += width;
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_x_expands_tabs() {
        assert_eq!(render_x(b"\tab", 0, 4), 0);
        assert_eq!(render_x(b"\tab", 1, 4), 4);
        assert_eq!(render_x(b"a\tb", 2, 4), 4);
        assert_eq!(render_x(b"ab", 9, 4), 2);
    }

    #[test]
    fn test_col_for_render_x() {
        assert_eq!(col_for_render_x(b"\tab", 2, 4), 0);
        assert_eq!(col_for_render_x(b"\tab", 4, 4), 1);
        assert_eq!(col_for_render_x(b"\tab", 40, 4), 3);
    }

    #[test]
    fn test_scroll_to_keeps_position_visible() {
        let mut viewport = Viewport::new(10, 20);
        viewport.scroll_to(15, 0);
        assert_eq!(viewport.row_offset, 6);
        viewport.scroll_to(2, 25);
        assert_eq!(viewport.row_offset, 2);
        assert_eq!(viewport.col_offset, 6);
        assert!(viewport.contains_row(11));
        assert!(!viewport.contains_row(12));
    }
}
