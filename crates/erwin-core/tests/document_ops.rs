use erwin_core::{Deletion, Document, EditError, Position};
use pretty_assertions::assert_eq;

#[test]
fn test_newline_then_backspace_restores_line() {
    for col in 0..=5 {
        let mut doc = Document::from_text("hello\nworld");
        doc.insert_newline(0, col).unwrap();
        assert_eq!(doc.line_count(), 3);

        let deletion = doc.delete_char(1, 0).unwrap();
        assert!(matches!(deletion, Deletion::LineMerge { .. }));
        assert_eq!(doc.to_string_lossy(), "hello\nworld");
    }
}

#[test]
fn test_backspace_on_empty_second_line() {
    let mut doc = Document::from_text("abc\n");
    assert_eq!(doc.line_count(), 2);

    let deletion = doc.delete_char(1, 0).unwrap();
    assert_eq!(
        deletion,
        Deletion::LineMerge {
            content: Vec::new(),
            cursor: Position::new(0, 3),
        }
    );
    assert_eq!(doc.line_count(), 1);
    assert_eq!(doc.to_string_lossy(), "abc");
}

#[test]
fn test_insert_newline_at_line_ends() {
    let mut doc = Document::from_text("ab");
    doc.insert_newline(0, 2).unwrap();
    assert_eq!(doc.to_string_lossy(), "ab\n");

    doc.insert_newline(0, 0).unwrap();
    assert_eq!(doc.to_string_lossy(), "\nab\n");
    assert_eq!(doc.line_count(), 3);
}

#[test]
fn test_deleting_everything_keeps_one_line() {
    let mut doc = Document::from_text("a\nb");
    doc.delete_char(1, 1).unwrap();
    doc.delete_char(1, 0).unwrap();
    doc.delete_char(0, 1).unwrap();
    assert_eq!(doc.line_count(), 1);
    assert!(doc.line(0).unwrap().is_empty());
    assert_eq!(doc.delete_char(0, 0).unwrap(), Deletion::Nothing);
}

#[test]
fn test_out_of_range_row() {
    let mut doc = Document::new();
    assert!(matches!(
        doc.delete_char(3, 0),
        Err(EditError::OutOfRange { row: 3, col: 0 })
    ));
    assert_eq!(doc.line_count(), 1);
}

#[test]
fn test_dirty_flag() {
    let mut doc = Document::from_text("x");
    assert!(!doc.is_dirty());
    doc.insert_char(0, 1, b'y').unwrap();
    assert!(doc.is_dirty());
    doc.mark_clean();
    assert!(!doc.is_dirty());
}
