//! The line buffer.
//!
//! A [`Document`] is an ordered sequence of [`Line`]s and the only owner of the text. It
//! exposes the split/merge/insert/delete primitives the session builds on. Primitives never
//! touch the undo log or the highlighter; they return the cursor position the edit leaves
//! behind and let the caller decide what to record and re-classify.
//!
//! # Invariants
//!
//! - there is always at least one line (an empty document is one empty line);
//! - rows are 0-based and contiguous;
//! - a failed primitive leaves the document unchanged.

use crate::error::EditError;
use crate::line::Line;
use crate::text::split_lines_preserve_trailing;
use std::cmp::Ordering;

/// Smallest capacity the line sequence is ever shrunk to.
const MIN_LINE_CAPACITY: usize = 8;

/// A `(row, col)` location in a document.
///
/// `col` ranges over `0..=line.len()`; one past the end means "after the last byte".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Position {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based byte column.
    pub col: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then_with(|| self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What a [`Document::delete_char`] call removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    /// Nothing to delete (start of an empty single-line document, or the start of row 0).
    Nothing,
    /// A byte was removed from within the line.
    Char {
        /// The removed byte.
        ch: u8,
        /// Cursor after the deletion.
        cursor: Position,
    },
    /// The line was merged onto the previous one and removed.
    LineMerge {
        /// Text of the removed line, now appended to the previous line.
        content: Vec<u8>,
        /// Cursor after the merge (end of the previous line's old text).
        cursor: Position,
    },
}

/// An ordered, dynamically sized sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    dirty: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding a single empty line.
    pub fn new() -> Self {
        let mut lines = Vec::with_capacity(MIN_LINE_CAPACITY);
        lines.push(Line::new());
        Self {
            lines,
            dirty: false,
        }
    }

    /// Build a document from raw line texts. An empty iterator yields one empty line.
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut lines: Vec<Line> = lines.into_iter().map(Line::from_bytes).collect();
        if lines.is_empty() {
            lines.push(Line::new());
        }
        Self {
            lines,
            dirty: false,
        }
    }

    /// Build a document by splitting `text` on `\n`.
    ///
    /// ```rust
    /// use erwin_core::Document;
    ///
    /// let doc = Document::from_text("int x;\n// done");
    /// assert_eq!(doc.line_count(), 2);
    /// assert_eq!(doc.line(1).unwrap().text(), b"// done");
    /// ```
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(split_lines_preserve_trailing(text.as_bytes()))
    }

    /// Number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `row`.
    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    /// All lines in row order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Length of the line at `row`, or 0 past the end.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, Line::len)
    }

    /// Whether the document changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the document as saved.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// The whole text joined with `\n` (no trailing newline).
    pub fn text(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push(b'\n');
            }
            out.extend_from_slice(line.text());
        }
        out
    }

    /// Lossy UTF-8 rendering of [`text`](Self::text).
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.text()).into_owned()
    }

    /// Clamp `pos` onto the document: last row at most, column within the line.
    pub fn clamp(&self, pos: Position) -> Position {
        let row = pos.row.min(self.lines.len() - 1);
        let col = pos.col.min(self.lines[row].len());
        Position { row, col }
    }

    /// Insert `ch` at `(row, col)` and return the cursor after it.
    ///
    /// `row` may equal [`line_count`](Self::line_count), in which case a fresh empty line is
    /// appended first.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: u8) -> Result<Position, EditError> {
        if row > self.lines.len() || col > self.line_len(row) {
            return Err(EditError::OutOfRange { row, col });
        }
        if row == self.lines.len() {
            self.lines.try_reserve(1)?;
            self.lines.push(Line::new());
        }
        self.lines[row].insert(col, ch)?;
        self.dirty = true;
        Ok(Position::new(row, col + 1))
    }

    /// Split line `row` at `col`: `[col, len)` becomes a new line right after it.
    ///
    /// Returns the cursor `(row + 1, 0)`.
    pub fn insert_newline(&mut self, row: usize, col: usize) -> Result<Position, EditError> {
        if self.lines.is_empty() {
            self.lines.try_reserve(1)?;
            self.lines.push(Line::new());
            self.dirty = true;
            return Ok(Position::new(0, 0));
        }
        if row >= self.lines.len() || col > self.lines[row].len() {
            return Err(EditError::OutOfRange { row, col });
        }
        self.lines.try_reserve(1)?;
        let tail = self.lines[row].split_off(col)?;
        self.lines.insert(row + 1, tail);
        self.dirty = true;
        Ok(Position::new(row + 1, 0))
    }

    /// Backspace at `(row, col)`.
    ///
    /// - `col > 0`: removes the byte at `col - 1`.
    /// - `col == 0, row > 0`: appends the line onto the previous one and removes it.
    /// - `col == 0, row == 0`: nothing to delete.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Result<Deletion, EditError> {
        if row >= self.lines.len() || col > self.lines[row].len() {
            return Err(EditError::OutOfRange { row, col });
        }

        if col > 0 {
            let ch = self.lines[row].remove(col - 1)?;
            self.dirty = true;
            return Ok(Deletion::Char {
                ch,
                cursor: Position::new(row, col - 1),
            });
        }

        if row == 0 {
            return Ok(Deletion::Nothing);
        }

        let prev_len = self.lines[row - 1].len();
        let content = self.lines[row].text().to_vec();
        self.lines[row - 1].append(&content)?;
        self.remove_line(row);
        self.dirty = true;
        Ok(Deletion::LineMerge {
            content,
            cursor: Position::new(row - 1, prev_len),
        })
    }

    /// Replace the whole document with a single empty line.
    ///
    /// Returns the previous line texts so the clear can be undone in one step.
    pub fn select_all_delete(&mut self) -> Vec<Vec<u8>> {
        let old = std::mem::replace(&mut self.lines, Vec::with_capacity(MIN_LINE_CAPACITY));
        self.lines.push(Line::new());
        self.dirty = true;
        old.into_iter().map(Line::into_text).collect()
    }

    /// Replace every line with `lines` (used to revert [`select_all_delete`](Self::select_all_delete)).
    pub(crate) fn replace_lines(&mut self, lines: Vec<Vec<u8>>) {
        *self = Self::from_lines(lines);
        self.dirty = true;
    }

    /// Revert a line merge: cut `content.len()` bytes off the end of `row - 1` and insert
    /// `content` as line `row`.
    pub(crate) fn unmerge_line(&mut self, row: usize, content: Vec<u8>) -> Result<(), EditError> {
        if row == 0 || row > self.lines.len() {
            return Err(EditError::OutOfRange { row, col: 0 });
        }
        let prev = &self.lines[row - 1];
        if !prev.text().ends_with(&content) {
            return Err(EditError::OutOfRange {
                row: row - 1,
                col: prev.len(),
            });
        }
        let keep = prev.len() - content.len();
        self.lines.try_reserve(1)?;
        // The tail equals `content` and carries the merged line's comment state.
        let restored = self.lines[row - 1].split_off(keep)?;
        self.lines.insert(row, restored);
        self.dirty = true;
        Ok(())
    }

    pub(crate) fn line_mut(&mut self, row: usize) -> Option<&mut Line> {
        self.lines.get_mut(row)
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    /// Remove line `row`, keeping the one-line minimum and shrinking storage when it becomes
    /// mostly empty.
    fn remove_line(&mut self, row: usize) {
        self.lines.remove(row);
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }

        let capacity = self.lines.capacity();
        if capacity > MIN_LINE_CAPACITY && self.lines.len() < capacity / 4 {
            self.lines.shrink_to((capacity / 2).max(MIN_LINE_CAPACITY));
        }
    }
}
