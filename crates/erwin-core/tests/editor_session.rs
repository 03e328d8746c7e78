use erwin_core::{CursorMove, Direction, Editor, EditorOptions, PasteSummary, Position};
use pretty_assertions::assert_eq;

fn editor(text: &str) -> Editor {
    Editor::from_text(text, EditorOptions::default())
}

#[test]
fn test_insert_into_empty_document() {
    let mut ed = editor("");
    ed.insert_char(b'a').unwrap();
    assert_eq!(ed.document().to_string_lossy(), "a");
    assert_eq!(ed.cursor(), Position::new(0, 1));
    assert!(ed.is_dirty());
}

#[test]
fn test_backspace_joins_empty_line() {
    let mut ed = editor("abc\n");
    ed.set_cursor(Position::new(1, 0));
    ed.delete_char().unwrap();
    assert_eq!(ed.document().line_count(), 1);
    assert_eq!(ed.cursor(), Position::new(0, 3));
}

#[test]
fn test_select_all_is_disarmed_by_other_input() {
    let mut ed = editor("abc\ndef");
    ed.select_all();
    assert!(ed.select_all_active());
    assert_eq!(ed.cursor(), Position::new(0, 0));

    ed.cancel_select_all();
    ed.move_cursor(CursorMove::End);
    ed.delete_char().unwrap();
    assert_eq!(ed.document().to_string_lossy(), "ab\ndef");
}

#[test]
fn test_select_all_on_empty_document_records_nothing() {
    let mut ed = editor("");
    ed.select_all();
    ed.delete_char().unwrap();
    assert_eq!(ed.history().undo_depth(), 0);
    assert!(!ed.select_all_active());
}

#[test]
fn test_paste_policy() {
    let mut ed = editor("");
    let summary = ed.paste_bytes(b"a\r\nb\rc\n\td\x07\xc3\xa9").unwrap();
    assert_eq!(
        summary,
        PasteSummary {
            inserted: 5,
            newlines: 3,
            skipped: 3,
        }
    );
    assert_eq!(ed.document().to_string_lossy(), "a\nb\nc\n\td");
    assert_eq!(
        ed.status().message(),
        "Pasted 5 characters, 3 lines (3 unsupported bytes skipped)"
    );
}

#[test]
fn test_paste_is_undone_byte_by_byte() {
    let mut ed = editor("");
    ed.paste_bytes(b"ab\nc").unwrap();
    ed.undo().unwrap();
    assert_eq!(ed.document().to_string_lossy(), "ab\n");
    ed.undo().unwrap();
    assert_eq!(ed.document().to_string_lossy(), "ab");
}

#[test]
fn test_page_motion_and_scroll() {
    let text: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
    let mut ed = editor(&text.join("\n"));
    ed.set_viewport_size(10, 40);

    ed.move_cursor(CursorMove::PageDown);
    assert_eq!(ed.cursor().row, 10);
    ed.scroll();
    assert_eq!(ed.viewport().row_offset, 1);

    for _ in 0..20 {
        ed.move_cursor(CursorMove::PageDown);
    }
    assert_eq!(ed.cursor().row, 99);
    ed.move_cursor(CursorMove::PageUp);
    assert_eq!(ed.cursor().row, 89);
}

#[test]
fn test_vertical_motion_clamps_column() {
    let mut ed = editor("long line\nab\nanother long");
    ed.move_cursor(CursorMove::End);
    ed.move_cursor(CursorMove::Down);
    assert_eq!(ed.cursor(), Position::new(1, 2));
    ed.move_cursor(CursorMove::Down);
    assert_eq!(ed.cursor(), Position::new(2, 2));
    ed.move_cursor(CursorMove::Down);
    assert_eq!(ed.cursor(), Position::new(2, 2));
}

#[test]
fn test_wheel_moves_three_rows() {
    let mut ed = editor("0\n1\n2\n3\n4\n5");
    ed.scroll_wheel(Direction::Forward);
    assert_eq!(ed.cursor().row, 3);
    ed.scroll_wheel(Direction::Backward);
    assert_eq!(ed.cursor().row, 0);
}

#[test]
fn test_horizontal_scroll_follows_tabs() {
    let mut ed = editor("\t\t\tabc");
    ed.set_viewport_size(5, 8);
    ed.move_cursor(CursorMove::End);
    assert_eq!(ed.render_x(), 15);
    ed.scroll();
    assert_eq!(ed.viewport().col_offset, 8);

    ed.click(0, 0);
    assert_eq!(ed.cursor(), Position::new(0, 2));
}
