//! Incremental find.
//!
//! The query is a plain substring: it is escaped and compiled into a byte regex once, when it
//! changes. [`SearchState::advance`] then walks the document from the last match (or the
//! cursor) one full pass at most, wrapping past either end.

use crate::document::{Document, Position};
use regex::bytes::{Regex, RegexBuilder};

/// Search errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was empty.
    #[error("empty search query")]
    EmptyQuery,
    /// The escaped query failed to compile (e.g. it exceeds the regex size limit).
    #[error("invalid search query: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Towards the end of the document.
    #[default]
    Forward,
    /// Towards the start of the document.
    Backward,
}

/// A match found by [`SearchState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    /// Start of the match.
    pub position: Position,
    /// Whether the scan went past the end (or start) of the document to reach it.
    pub wrapped: bool,
}

/// Query, direction and the last match.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: Option<String>,
    regex: Option<Regex>,
    direction: Direction,
    anchor: Option<Position>,
}

fn compile_search_regex(query: &str) -> Result<Regex, SearchError> {
    Ok(RegexBuilder::new(&regex::escape(query))
        .multi_line(false)
        .build()?)
}

impl SearchState {
    /// Create an empty search state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query. A different query resets the anchor; the same query keeps it.
    pub fn start(&mut self, query: &str) -> Result<(), SearchError> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        if self.query.as_deref() == Some(query) {
            return Ok(());
        }

        let regex = compile_search_regex(query)?;
        log::debug!("search: new query {query:?}");
        self.query = Some(query.to_string());
        self.regex = Some(regex);
        self.anchor = None;
        Ok(())
    }

    /// The current query.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The compiled query.
    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    /// Direction of the last scan.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Start of the last match, if the previous scan found one.
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// Forget the last match so the next scan starts at the cursor.
    pub fn clear_anchor(&mut self) {
        self.anchor = None;
    }

    /// Find the next occurrence in `direction`.
    ///
    /// Without an anchor the scan starts at `cursor` inclusively; otherwise it starts one byte
    /// past the anchor in the scan direction. Returns `None` (and clears the anchor) once a
    /// full pass found nothing.
    pub fn advance(
        &mut self,
        doc: &Document,
        cursor: Position,
        direction: Direction,
    ) -> Option<SearchHit> {
        let regex = self.regex.as_ref()?;
        self.direction = direction;

        let hit = match (direction, self.anchor) {
            (Direction::Forward, None) => scan_forward(regex, doc, cursor.row, cursor.col),
            (Direction::Forward, Some(a)) => scan_forward(regex, doc, a.row, a.col + 1),
            (Direction::Backward, None) => scan_backward(regex, doc, cursor.row, Some(cursor.col)),
            (Direction::Backward, Some(a)) => {
                scan_backward(regex, doc, a.row, a.col.checked_sub(1))
            }
        };

        self.anchor = hit.map(|h| h.position);
        log::debug!("search: {direction:?} from {cursor:?} -> {hit:?}");
        hit
    }
}

/// Every match start in `text`, overlapping ones included, in increasing order.
fn match_starts<'a>(regex: &'a Regex, text: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    let mut pos = 0;
    std::iter::from_fn(move || {
        if pos > text.len() {
            return None;
        }
        let m = regex.find_at(text, pos)?;
        pos = m.start() + 1;
        Some(m.start())
    })
}

fn line_text(doc: &Document, row: usize) -> &[u8] {
    doc.line(row).map(|line| line.text()).unwrap_or(&[])
}

/// Forward scan: starts `>= from_col` on `row`, then the following rows (wrapping), then
/// the part of `row` before `from_col`.
fn scan_forward(regex: &Regex, doc: &Document, row: usize, from_col: usize) -> Option<SearchHit> {
    let count = doc.line_count();
    let row = row.min(count - 1);
    let hit = |row, col, wrapped| SearchHit {
        position: Position::new(row, col),
        wrapped,
    };

    if let Some(col) = match_starts(regex, line_text(doc, row)).find(|&s| s >= from_col) {
        return Some(hit(row, col, false));
    }
    for step in 1..count {
        let r = (row + step) % count;
        if let Some(col) = match_starts(regex, line_text(doc, r)).next() {
            return Some(hit(r, col, row + step >= count));
        }
    }
    match_starts(regex, line_text(doc, row))
        .next()
        .filter(|&s| s < from_col)
        .map(|col| hit(row, col, true))
}

/// Backward scan: starts `<= max_col` on `row` (none when `max_col` is `None`), then the
/// preceding rows (wrapping), then the part of `row` after `max_col`.
fn scan_backward(
    regex: &Regex,
    doc: &Document,
    row: usize,
    max_col: Option<usize>,
) -> Option<SearchHit> {
    let count = doc.line_count();
    let row = row.min(count - 1);
    let hit = |row, col, wrapped| SearchHit {
        position: Position::new(row, col),
        wrapped,
    };

    if let Some(max) = max_col
        && let Some(col) = match_starts(regex, line_text(doc, row))
            .take_while(|&s| s <= max)
            .last()
    {
        return Some(hit(row, col, false));
    }
    for step in 1..count {
        let r = (row + count - step) % count;
        if let Some(col) = match_starts(regex, line_text(doc, r)).last() {
            return Some(hit(r, col, step > row));
        }
    }
    match_starts(regex, line_text(doc, row))
        .filter(|&s| max_col.is_none_or(|max| s > max))
        .last()
        .map(|col| hit(row, col, true))
}
