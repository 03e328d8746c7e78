//! The editing session.
//!
//! [`Editor`] ties the document to its cursor, undo log, highlighter, search cursor, viewport
//! and status line. Every mutator follows the same sequence: apply the document primitive,
//! record its inverse, re-classify the touched rows. Undo replays inverses straight onto the
//! document with recording switched off.

use crate::document::{Deletion, Document, Position};
use crate::error::{EditError, Error, Result, Severity};
use crate::file;
use crate::search::{Direction, SearchHit, SearchState};
use crate::status::{DEFAULT_STATUS_TIMEOUT, StatusLine};
use crate::syntax;
use crate::undo::{DEFAULT_UNDO_CAPACITY, UndoAction, UndoHistory};
use crate::viewport::{self, DEFAULT_TAB_STOP, Viewport};
use erwin_lang::SyntaxProfile;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Rows moved per mouse wheel notch.
pub const WHEEL_STEP: usize = 3;

/// Session tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    /// Tab width in display columns.
    pub tab_stop: usize,
    /// Number of retained undo actions.
    pub undo_capacity: usize,
    /// How long a status message stays visible.
    pub status_timeout: Duration,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            status_timeout: DEFAULT_STATUS_TIMEOUT,
        }
    }
}

/// Cursor motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// One byte left, wrapping to the end of the previous line.
    Left,
    /// One byte right, wrapping to the start of the next line.
    Right,
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// Start of the line.
    Home,
    /// End of the line.
    End,
    /// One screen up.
    PageUp,
    /// One screen down.
    PageDown,
}

/// What [`Editor::save`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The document was written.
    Saved {
        /// Bytes written.
        bytes: usize,
    },
    /// The document has no file name yet; call [`Editor::save_as`].
    NeedsFileName,
}

/// Counts reported by [`Editor::paste_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasteSummary {
    /// Bytes inserted as characters.
    pub inserted: usize,
    /// Newlines inserted.
    pub newlines: usize,
    /// Bytes dropped because they are neither printable ASCII, tab nor a line break.
    pub skipped: usize,
}

/// One editing session over one document.
#[derive(Debug)]
pub struct Editor {
    document: Document,
    cursor: Position,
    history: UndoHistory,
    search: SearchState,
    profile: Option<SyntaxProfile>,
    viewport: Viewport,
    status: StatusLine,
    file_name: Option<PathBuf>,
    find_active: bool,
    select_all_active: bool,
    /// Cursor before select-all moved it to the origin.
    select_all_cursor: Position,
    options: EditorOptions,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

impl Editor {
    /// Create a session over an empty, unnamed document.
    pub fn new(options: EditorOptions) -> Self {
        Self {
            document: Document::new(),
            cursor: Position::default(),
            history: UndoHistory::new(options.undo_capacity),
            search: SearchState::new(),
            profile: None,
            viewport: Viewport::default(),
            status: StatusLine::new(options.status_timeout),
            file_name: None,
            find_active: false,
            select_all_active: false,
            select_all_cursor: Position::default(),
            options,
        }
    }

    /// Create an unnamed session over `text`.
    pub fn from_text(text: &str, options: EditorOptions) -> Self {
        let mut editor = Self::new(options);
        editor.document = Document::from_text(text);
        editor
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor to `pos`, clamped onto the document.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.document.clamp(pos);
    }

    /// The undo log.
    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// The search state.
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// The active highlighting profile.
    pub fn profile(&self) -> Option<&SyntaxProfile> {
        self.profile.as_ref()
    }

    /// The viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The status line.
    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Replace the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status.set(message);
    }

    /// Drop the status message.
    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    /// File the document is saved to.
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Whether the document has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    /// Whether find mode is active.
    pub fn find_active(&self) -> bool {
        self.find_active
    }

    /// Whether the next delete clears the whole document.
    pub fn select_all_active(&self) -> bool {
        self.select_all_active
    }

    /// Session tunables.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Load `path`, replacing the document.
    ///
    /// A missing file starts an empty document under that name. Any other read error is
    /// returned and leaves the session unchanged.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let loaded = match file::load(path) {
            Ok(loaded) => loaded,
            Err(err) => {
                log::error!("{err}");
                self.status.set(err.to_string());
                return Err(err.into());
            }
        };

        self.document = Document::from_lines(loaded.lines);
        self.cursor = Position::default();
        self.viewport.row_offset = 0;
        self.viewport.col_offset = 0;
        self.history.clear();
        self.search.clear_anchor();
        self.select_all_active = false;
        self.set_file_name(path);

        if loaded.existed {
            log::info!(
                "opened {} ({} lines)",
                path.display(),
                self.document.line_count()
            );
            self.status.set(format!(
                "Opened file: {} ({} lines)",
                path.display(),
                self.document.line_count()
            ));
        } else {
            log::info!("new file {}", path.display());
            self.status.set(format!("New file: {}", path.display()));
        }
        Ok(())
    }

    /// Name the document, re-selecting the highlighting profile from the file name.
    pub fn set_file_name(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.profile = erwin_lang::profile_for_path(&path).cloned();
        log::debug!(
            "syntax profile for {}: {:?}",
            path.display(),
            self.profile.as_ref().map(|p| p.name.as_str())
        );
        self.file_name = Some(path);
        self.refresh_all();
    }

    /// Write the document to its file.
    ///
    /// Failures are reported on the status line and returned; the session is unaffected.
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let Some(path) = self.file_name.clone() else {
            return Ok(SaveOutcome::NeedsFileName);
        };

        match file::save(&path, &self.document) {
            Ok(bytes) => {
                self.document.mark_clean();
                log::info!("saved {} ({bytes} bytes)", path.display());
                self.status
                    .set(format!("File saved: {} ({bytes} bytes)", path.display()));
                Ok(SaveOutcome::Saved { bytes })
            }
            Err(err) => {
                log::warn!("{err}");
                self.status.set(format!("Error saving file: {err}"));
                Err(err.into())
            }
        }
    }

    /// Rename the document to `path` and save it.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<SaveOutcome> {
        self.set_file_name(path);
        self.save()
    }

    /// Insert `ch` at the cursor.
    pub fn insert_char(&mut self, ch: u8) -> Result<()> {
        let Position { row, col } = self.cursor;
        match self.document.insert_char(row, col, ch) {
            Ok(cursor) => {
                self.history.record(UndoAction::InsertChar { row, col, ch });
                self.cursor = cursor;
                self.refresh_rows(&[row]);
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Split the line at the cursor.
    pub fn insert_newline(&mut self) -> Result<()> {
        let Position { row, col } = self.cursor;
        match self.document.insert_newline(row, col) {
            Ok(cursor) => {
                self.history.record(UndoAction::InsertNewline { row, col });
                self.cursor = cursor;
                self.refresh_rows(&[row, row + 1]);
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Backspace at the cursor, or clear the document while select-all is armed.
    pub fn delete_char(&mut self) -> Result<()> {
        if self.select_all_active {
            self.delete_all();
            return Ok(());
        }

        let Position { row, col } = self.cursor;
        match self.document.delete_char(row, col) {
            Ok(Deletion::Nothing) => Ok(()),
            Ok(Deletion::Char { ch, cursor }) => {
                self.history.record(UndoAction::DeleteChar { row, col, ch });
                self.cursor = cursor;
                self.refresh_rows(&[row]);
                Ok(())
            }
            Ok(Deletion::LineMerge { content, cursor }) => {
                self.history
                    .record(UndoAction::DeleteLine { row, col, content });
                self.cursor = cursor;
                self.refresh_rows(&[row - 1, row]);
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Arm select-all: the cursor goes to the origin and the next delete clears everything.
    pub fn select_all(&mut self) {
        if !self.select_all_active {
            self.select_all_cursor = self.cursor;
        }
        self.select_all_active = true;
        self.cursor = Position::default();
        self.status
            .set("All text selected. Press Backspace to delete.");
    }

    /// Disarm select-all.
    pub fn cancel_select_all(&mut self) {
        if self.select_all_active {
            self.select_all_active = false;
            self.status.clear();
        }
    }

    fn delete_all(&mut self) {
        self.select_all_active = false;
        let already_empty = self.document.line_count() == 1 && self.document.line_len(0) == 0;
        if !already_empty {
            let cursor = self.select_all_cursor;
            let lines = self.document.select_all_delete();
            self.history.record(UndoAction::ClearAll { lines, cursor });
            self.refresh_all();
        }
        self.cursor = Position::default();
        self.viewport.row_offset = 0;
        self.viewport.col_offset = 0;
        self.status.set("All text deleted.");
    }

    /// Replay clipboard bytes through the normal edit path.
    ///
    /// `\n`, `\r` and `\r\n` insert one newline; tab and printable ASCII are inserted; any
    /// other byte is skipped and counted.
    pub fn paste_bytes(&mut self, bytes: &[u8]) -> Result<PasteSummary> {
        let mut summary = PasteSummary::default();
        let mut after_cr = false;
        for &b in bytes {
            match b {
                b'\n' if after_cr => {}
                b'\n' | b'\r' => {
                    self.insert_newline()?;
                    summary.newlines += 1;
                }
                b'\t' | 32..=126 => {
                    self.insert_char(b)?;
                    summary.inserted += 1;
                }
                _ => summary.skipped += 1,
            }
            after_cr = b == b'\r';
        }

        log::debug!("paste: {summary:?}");
        let mut message = format!(
            "Pasted {} characters, {} lines",
            summary.inserted, summary.newlines
        );
        if summary.skipped > 0 {
            message.push_str(&format!(" ({} unsupported bytes skipped)", summary.skipped));
        }
        self.status.set(message);
        Ok(summary)
    }

    /// Revert the most recent recorded edit.
    pub fn undo(&mut self) -> Result<()> {
        let Some(action) = self.history.pop() else {
            self.status.set("Nothing to undo.");
            return Ok(());
        };

        log::debug!("undo: replay {action:?}");
        self.history.set_recording(false);
        let replayed = self.replay_inverse(action);
        self.history.set_recording(true);

        match replayed {
            Ok(()) => {
                self.status.set("Undo successful.");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    fn replay_inverse(&mut self, action: UndoAction) -> Result<(), EditError> {
        match action {
            UndoAction::InsertChar { row, col, .. } => {
                self.document.delete_char(row, col + 1)?;
                self.cursor = Position::new(row, col);
                self.refresh_rows(&[row]);
            }
            UndoAction::DeleteChar { row, col, ch } => {
                let at = col
                    .checked_sub(1)
                    .ok_or(EditError::OutOfRange { row, col })?;
                self.document.insert_char(row, at, ch)?;
                self.cursor = Position::new(row, col);
                self.refresh_rows(&[row]);
            }
            UndoAction::InsertNewline { row, col } => {
                self.document.delete_char(row + 1, 0)?;
                self.cursor = Position::new(row, col);
                self.refresh_rows(&[row, row + 1]);
            }
            UndoAction::DeleteLine { row, col, content } => {
                self.document.unmerge_line(row, content)?;
                self.cursor = Position::new(row, col);
                self.refresh_rows(&[row - 1, row]);
            }
            UndoAction::ClearAll { lines, cursor } => {
                self.document.replace_lines(lines);
                self.cursor = cursor;
                self.refresh_all();
            }
        }
        self.cursor = self.document.clamp(self.cursor);
        Ok(())
    }

    /// Route a document failure by severity: programmer errors are logged and swallowed, the
    /// rest are reported and returned.
    fn fail(&mut self, err: EditError) -> Result<()> {
        match err.severity() {
            Severity::Programmer => {
                log::error!("ignored edit at {:?}: {err}", self.cursor);
                Ok(())
            }
            Severity::Fatal | Severity::Recoverable => {
                log::error!("{err}");
                self.status.set(format!("ERROR: {err}"));
                Err(Error::Edit(err))
            }
        }
    }

    /// Enter find mode with `query` and jump to the first match at or after the cursor.
    pub fn find_start(&mut self, query: &str) -> Result<Option<SearchHit>> {
        if let Err(err) = self.search.start(query) {
            log::warn!("{err}");
            self.status.set(format!("Search failed: {err}"));
            return Err(err.into());
        }
        self.find_active = true;
        Ok(self.find_next(Direction::Forward))
    }

    /// Jump to the next match in `direction`.
    pub fn find_next(&mut self, direction: Direction) -> Option<SearchHit> {
        let query = self.search.query()?.to_string();
        let hit = self.search.advance(&self.document, self.cursor, direction);
        match hit {
            Some(SearchHit { position, .. }) => {
                self.cursor = position;
                self.status.set(format!(
                    "Found '{query}' at {}:{}",
                    position.row + 1,
                    position.col + 1
                ));
            }
            None => {
                self.status.set(format!("No more matches for '{query}'"));
            }
        }
        self.scroll();
        self.refresh_all();
        hit
    }

    /// Leave find mode and drop the match overlay.
    pub fn find_cancel(&mut self) {
        if !self.find_active {
            return;
        }
        self.find_active = false;
        self.status.clear();
        self.refresh_all();
    }

    /// Re-classify `rows` (propagating comment state) and re-apply the match overlay.
    fn refresh_rows(&mut self, rows: &[usize]) {
        for &row in rows {
            if row < self.document.line_count() {
                syntax::update_line(&mut self.document, row, self.profile.as_ref());
            }
        }
        self.apply_overlay();
    }

    fn refresh_all(&mut self) {
        syntax::update_all(&mut self.document, self.profile.as_ref());
        self.apply_overlay();
    }

    fn apply_overlay(&mut self) {
        if !self.find_active {
            return;
        }
        let Some(regex) = self.search.regex() else {
            return;
        };
        let visible = self.viewport.visible_rows();
        let end = visible.end.min(self.document.line_count());
        for row in visible.start..end {
            if let Some(line) = self.document.line_mut(row) {
                syntax::apply_match_overlay(line, regex);
            }
        }
    }

    /// Apply one cursor motion, then clamp the column onto the new row.
    pub fn move_cursor(&mut self, motion: CursorMove) {
        let last_row = self.document.line_count() - 1;
        let Position { row, col } = &mut self.cursor;
        match motion {
            CursorMove::Left => {
                if *col > 0 {
                    *col -= 1;
                } else if *row > 0 {
                    *row -= 1;
                    *col = self.document.line_len(*row);
                }
            }
            CursorMove::Right => {
                if *col < self.document.line_len(*row) {
                    *col += 1;
                } else if *row < last_row {
                    *row += 1;
                    *col = 0;
                }
            }
            CursorMove::Up => *row = row.saturating_sub(1),
            CursorMove::Down => *row = (*row + 1).min(last_row),
            CursorMove::Home => *col = 0,
            CursorMove::End => *col = self.document.line_len(*row),
            CursorMove::PageUp => *row = row.saturating_sub(self.viewport.rows),
            CursorMove::PageDown => *row = (*row + self.viewport.rows).min(last_row),
        }
        self.cursor = self.document.clamp(self.cursor);
    }

    /// Mouse wheel: move the cursor [`WHEEL_STEP`] rows up or down.
    pub fn scroll_wheel(&mut self, direction: Direction) {
        let motion = match direction {
            Direction::Backward => CursorMove::Up,
            Direction::Forward => CursorMove::Down,
        };
        for _ in 0..WHEEL_STEP {
            self.move_cursor(motion);
        }
    }

    /// Place the cursor under screen cell `(x, y)` of the text area.
    pub fn click(&mut self, x: usize, y: usize) {
        let row = (y + self.viewport.row_offset).min(self.document.line_count() - 1);
        let text = self.document.line(row).map(|l| l.text()).unwrap_or(&[]);
        let x = x + self.viewport.col_offset;
        let col = viewport::col_for_render_x(text, x, self.options.tab_stop);
        self.cursor = Position::new(row, col);
    }

    /// Tab-expanded display column of the cursor.
    pub fn render_x(&self) -> usize {
        let text = self
            .document
            .line(self.cursor.row)
            .map(|l| l.text())
            .unwrap_or(&[]);
        viewport::render_x(text, self.cursor.col, self.options.tab_stop)
    }

    /// Clamp the cursor and scroll the viewport so it is visible.
    pub fn scroll(&mut self) {
        self.cursor = self.document.clamp(self.cursor);
        let render_x = self.render_x();
        self.viewport.scroll_to(self.cursor.row, render_x);
    }

    /// Resize the text area.
    pub fn set_viewport_size(&mut self, rows: usize, cols: usize) {
        self.viewport.rows = rows;
        self.viewport.cols = cols;
        self.scroll();
    }
}
