//! Input dispatch.
//!
//! [`App`] owns the editing session and turns terminal events into session calls. Prompts
//! (find, save as) are modes of the app; the core never blocks on input.

use crate::clipboard::ClipboardTool;
use crate::config::ClipboardConfig;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use erwin_core::{CursorMove, Direction, Editor, SaveOutcome};
use std::path::PathBuf;

/// Longest prompt answer, in bytes.
pub const PROMPT_CAPACITY: usize = 127;

pub const WELCOME_MESSAGE: &str =
    "ErwinText: Press Ctrl+Q to quit. Ctrl+S to save. Ctrl+F to find.";
const QUIT_WARNING: &str =
    "WARNING! File has unsaved changes. Press Ctrl+Q/C again to force quit.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Find,
    SaveAs,
}

pub struct App {
    editor: Editor,
    clipboard: ClipboardConfig,
    input_mode: InputMode,
    input_buffer: String,
    confirm_quit: bool,
    should_quit: bool,
    fatal: Option<erwin_core::Error>,
}

impl App {
    pub fn new(editor: Editor, clipboard: ClipboardConfig) -> Self {
        Self {
            editor,
            clipboard,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            confirm_quit: false,
            should_quit: false,
            fatal: None,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The error that ended the session, if any.
    pub fn take_fatal(&mut self) -> Option<erwin_core::Error> {
        self.fatal.take()
    }

    /// Text of the active prompt, shown in place of the status message.
    pub fn prompt_line(&self) -> Option<String> {
        match self.input_mode {
            InputMode::Normal => None,
            InputMode::Find => Some(format!(
                "Search (Use arrows to navigate, ESC to cancel): {}",
                self.input_buffer
            )),
            InputMode::SaveAs => Some(format!("Save as: {} (ESC to cancel)", self.input_buffer)),
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Paste(text) => self.handle_paste(text),
            // The next draw picks up the new size.
            Event::Resize(_, _) => {}
            _ => {}
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.input_mode != InputMode::Normal {
            self.handle_prompt_key(key);
            return;
        }

        if self.confirm_quit {
            self.confirm_quit = false;
            if is_quit_key(key) {
                self.should_quit = true;
            }
            return;
        }

        let find_key = matches!(key.code, KeyCode::Up | KeyCode::Down)
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('f'));
        if self.editor.find_active() && !find_key {
            self.editor.find_cancel();
        }
        if !matches!(key.code, KeyCode::Backspace | KeyCode::Delete) {
            self.editor.cancel_select_all();
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q' | 'c')) => {
                if self.editor.is_dirty() {
                    self.confirm_quit = true;
                    self.editor.set_status(QUIT_WARNING);
                } else {
                    self.should_quit = true;
                }
            }

            (KeyModifiers::CONTROL, KeyCode::Char('s')) => self.save(),

            (KeyModifiers::CONTROL, KeyCode::Char('a')) => self.editor.select_all(),

            (KeyModifiers::CONTROL, KeyCode::Char('v')) => self.paste_clipboard(),

            (KeyModifiers::CONTROL, KeyCode::Char('z')) => {
                let result = self.editor.undo();
                self.check(result);
            }

            (KeyModifiers::CONTROL, KeyCode::Char('f')) => self.start_prompt(InputMode::Find),

            (_, KeyCode::Backspace | KeyCode::Delete) => {
                let result = self.editor.delete_char();
                self.check(result);
            }

            (_, KeyCode::Enter) => {
                let result = self.editor.insert_newline();
                self.check(result);
            }

            (_, KeyCode::Tab) => {
                let result = self.editor.insert_char(b'\t');
                self.check(result);
            }

            (_, KeyCode::Up) if self.editor.find_active() => {
                self.editor.find_next(Direction::Backward);
            }
            (_, KeyCode::Down) if self.editor.find_active() => {
                self.editor.find_next(Direction::Forward);
            }

            (_, KeyCode::Left) => self.editor.move_cursor(CursorMove::Left),
            (_, KeyCode::Right) => self.editor.move_cursor(CursorMove::Right),
            (_, KeyCode::Up) => self.editor.move_cursor(CursorMove::Up),
            (_, KeyCode::Down) => self.editor.move_cursor(CursorMove::Down),
            (_, KeyCode::Home) => self.editor.move_cursor(CursorMove::Home),
            (_, KeyCode::End) => self.editor.move_cursor(CursorMove::End),
            (_, KeyCode::PageUp) => self.editor.move_cursor(CursorMove::PageUp),
            (_, KeyCode::PageDown) => self.editor.move_cursor(CursorMove::PageDown),

            (mods, KeyCode::Char(c))
                if !mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(byte) = printable_byte(c) {
                    let result = self.editor.insert_char(byte);
                    self.check(result);
                }
            }

            _ => {}
        }

        self.editor.scroll();
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => self.finish_prompt(None),
            (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) => self.finish_prompt(None),
            (_, KeyCode::Enter) => {
                let answer = std::mem::take(&mut self.input_buffer);
                self.finish_prompt(Some(answer).filter(|a| !a.is_empty()));
            }
            (_, KeyCode::Backspace | KeyCode::Delete) => {
                self.input_buffer.pop();
            }
            (mods, KeyCode::Char(c))
                if !mods.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if printable_byte(c).is_some() && self.input_buffer.len() < PROMPT_CAPACITY {
                    self.input_buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn start_prompt(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input_buffer.clear();
    }

    fn finish_prompt(&mut self, answer: Option<String>) {
        let mode = std::mem::replace(&mut self.input_mode, InputMode::Normal);
        self.input_buffer.clear();
        match (mode, answer) {
            (InputMode::Find, Some(query)) => {
                let result = self.editor.find_start(&query);
                self.check(result);
            }
            (InputMode::Find, None) => {
                self.editor.find_cancel();
                self.editor.clear_status();
            }
            (InputMode::SaveAs, Some(name)) => {
                let result = self.editor.save_as(PathBuf::from(name));
                self.check(result);
            }
            (InputMode::SaveAs, None) => self.editor.set_status("Save cancelled."),
            (InputMode::Normal, _) => {}
        }
        self.editor.scroll();
    }

    fn save(&mut self) {
        match self.editor.save() {
            Ok(SaveOutcome::NeedsFileName) => self.start_prompt(InputMode::SaveAs),
            Ok(SaveOutcome::Saved { .. }) => {}
            Err(err) => self.check::<()>(Err(err)),
        }
    }

    fn paste_clipboard(&mut self) {
        let tool = match ClipboardTool::resolve(&self.clipboard) {
            Ok(tool) => tool,
            Err(err) => {
                log::warn!("{err}");
                self.editor.set_status(err.to_string());
                return;
            }
        };
        let bytes = match tool.read() {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("{err}");
                self.editor.set_status(err.to_string());
                return;
            }
        };

        match self.editor.paste_bytes(&bytes) {
            Ok(summary) => {
                let mut message = format!(
                    "Pasted from clipboard using {}: {} characters, {} lines",
                    tool.program(),
                    summary.inserted,
                    summary.newlines
                );
                if summary.skipped > 0 {
                    message.push_str(&format!(" ({} unsupported bytes skipped)", summary.skipped));
                }
                self.editor.set_status(message);
            }
            Err(err) => self.check::<()>(Err(err)),
        }
    }

    fn handle_paste(&mut self, text: String) {
        if self.input_mode != InputMode::Normal {
            for c in text.chars() {
                if printable_byte(c).is_some() && self.input_buffer.len() < PROMPT_CAPACITY {
                    self.input_buffer.push(c);
                }
            }
            return;
        }
        self.editor.find_cancel();
        self.editor.cancel_select_all();
        let result = self.editor.paste_bytes(text.as_bytes());
        self.check(result);
        self.editor.scroll();
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if self.input_mode != InputMode::Normal {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let rows = self.editor.viewport().rows;
                if usize::from(mouse.row) < rows {
                    self.editor.find_cancel();
                    self.editor.cancel_select_all();
                    self.editor
                        .click(usize::from(mouse.column), usize::from(mouse.row));
                }
            }
            MouseEventKind::ScrollUp => {
                self.editor.cancel_select_all();
                self.editor.scroll_wheel(Direction::Backward);
            }
            MouseEventKind::ScrollDown => {
                self.editor.cancel_select_all();
                self.editor.scroll_wheel(Direction::Forward);
            }
            _ => return,
        }
        self.editor.scroll();
    }

    /// Fatal errors end the session; anything else has already been reported on the status line.
    fn check<T>(&mut self, result: erwin_core::Result<T>) {
        if let Err(err) = result
            && err.is_fatal()
        {
            log::error!("fatal: {err}");
            self.fatal = Some(err);
            self.should_quit = true;
        }
    }
}

fn is_quit_key(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('q' | 'c'))
}

fn printable_byte(c: char) -> Option<u8> {
    u8::try_from(c).ok().filter(|b| (32..=126).contains(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use erwin_core::{EditorOptions, Position};
    use pretty_assertions::assert_eq;

    fn app(text: &str) -> App {
        App::new(
            Editor::from_text(text, EditorOptions::default()),
            ClipboardConfig::default(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    fn text(app: &App) -> String {
        app.editor().document().to_string_lossy()
    }

    #[test]
    fn test_typing_and_newline() {
        let mut app = app("");
        type_str(&mut app, "ab");
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Tab));
        type_str(&mut app, "c");
        assert_eq!(text(&app), "ab\n\tc");
        assert_eq!(app.editor().cursor(), Position::new(1, 2));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = app("");
        let mut release = key(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        app.handle_key_event(release);
        assert_eq!(text(&app), "");
    }

    #[test]
    fn test_non_ascii_input_is_dropped() {
        let mut app = app("");
        type_str(&mut app, "aé");
        assert_eq!(text(&app), "a");
    }

    #[test]
    fn test_clean_quit_is_immediate() {
        let mut app = app("x");
        app.handle_key_event(ctrl('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_dirty_quit_needs_second_press() {
        let mut app = app("");
        type_str(&mut app, "x");
        app.handle_key_event(ctrl('q'));
        assert!(!app.should_quit());
        assert_eq!(app.editor().status().message(), QUIT_WARNING);

        // Any other key disarms the warning and is swallowed.
        type_str(&mut app, "y");
        assert!(!app.should_quit());
        assert_eq!(text(&app), "x");

        app.handle_key_event(ctrl('c'));
        app.handle_key_event(ctrl('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_save_prompts_for_a_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut app = app("");
        type_str(&mut app, "hi");

        app.handle_key_event(ctrl('s'));
        assert_eq!(app.input_mode(), InputMode::SaveAs);
        type_str(&mut app, path.to_str().unwrap());
        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi\n");
        assert!(!app.editor().is_dirty());
    }

    #[test]
    fn test_cancelled_save() {
        let mut app = app("");
        app.handle_key_event(ctrl('s'));
        type_str(&mut app, "abc");
        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.editor().status().message(), "Save cancelled.");
        assert_eq!(app.editor().file_name(), None);

        app.handle_key_event(ctrl('s'));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.editor().status().message(), "Save cancelled.");
    }

    #[test]
    fn test_prompt_editing_and_capacity() {
        let mut app = app("");
        app.handle_key_event(ctrl('f'));
        type_str(&mut app, "abc");
        app.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(
            app.prompt_line().unwrap(),
            "Search (Use arrows to navigate, ESC to cancel): ab"
        );

        type_str(&mut app, &"x".repeat(200));
        assert_eq!(app.input_buffer.len(), PROMPT_CAPACITY);
        app.handle_key_event(ctrl('q'));
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_find_navigation_and_exit() {
        let mut app = app("foo\nbar foo\nfoo");
        app.handle_key_event(ctrl('f'));
        type_str(&mut app, "foo");
        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.editor().find_active());
        assert_eq!(app.editor().cursor(), Position::new(0, 0));

        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.editor().cursor(), Position::new(1, 4));
        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.editor().cursor(), Position::new(2, 0));
        app.handle_key_event(key(KeyCode::Up));
        assert_eq!(app.editor().cursor(), Position::new(1, 4));

        app.handle_key_event(key(KeyCode::Right));
        assert!(!app.editor().find_active());
        assert_eq!(app.editor().cursor(), Position::new(1, 5));
    }

    #[test]
    fn test_cancelled_find_leaves_find_mode() {
        let mut app = app("foo");
        app.handle_key_event(ctrl('f'));
        type_str(&mut app, "o");
        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.editor().find_active());

        app.handle_key_event(ctrl('f'));
        assert!(app.editor().find_active());
        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.editor().find_active());
    }

    #[test]
    fn test_select_all_then_backspace() {
        let mut app = app("one\ntwo");
        app.handle_key_event(ctrl('a'));
        assert!(app.editor().select_all_active());
        app.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(text(&app), "");
        assert_eq!(app.editor().status().message(), "All text deleted.");

        app.handle_key_event(ctrl('z'));
        assert_eq!(text(&app), "one\ntwo");
    }

    #[test]
    fn test_select_all_is_cancelled_by_other_keys() {
        let mut app = app("one");
        app.handle_key_event(ctrl('a'));
        app.handle_key_event(key(KeyCode::End));
        assert!(!app.editor().select_all_active());
        app.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(text(&app), "on");
    }

    #[test]
    fn test_bracketed_paste() {
        let mut app = app("");
        app.handle_event(Event::Paste("a\r\nb\u{7}".to_string()));
        assert_eq!(text(&app), "a\nb");
        assert_eq!(
            app.editor().status().message(),
            "Pasted 2 characters, 1 lines (1 unsupported bytes skipped)"
        );
    }

    #[test]
    fn test_clipboard_paste_uses_configured_tool() {
        if std::env::var_os(crate::clipboard::CLIPBOARD_ENV).is_some() {
            return;
        }
        let mut app = App::new(
            Editor::default(),
            ClipboardConfig {
                command: Some(vec!["echo".into(), "hi".into()]),
            },
        );
        app.handle_key_event(ctrl('v'));
        assert_eq!(text(&app), "hi\n");
        assert_eq!(
            app.editor().status().message(),
            "Pasted from clipboard using echo: 2 characters, 1 lines"
        );
    }

    #[test]
    fn test_mouse_click_and_wheel() {
        let lines: Vec<String> = (0..10).map(|i| format!("line {i}")).collect();
        let mut app = app(&lines.join("\n"));
        app.editor_mut().set_viewport_size(5, 40);

        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(app.editor().cursor(), Position::new(2, 3));

        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(app.editor().cursor().row, 5);
    }
}
