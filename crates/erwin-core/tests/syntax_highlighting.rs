use erwin_core::{Editor, EditorOptions, Highlight, Position};
use pretty_assertions::assert_eq;

fn c_editor(text: &str) -> Editor {
    let mut editor = Editor::from_text(text, EditorOptions::default());
    editor.set_file_name("test.c");
    editor
}

fn tags(editor: &Editor, row: usize) -> Vec<Highlight> {
    editor.document().line(row).unwrap().highlight().to_vec()
}

#[test]
fn test_c_declaration_and_comment() {
    let editor = c_editor("int x = 1;\n// done");
    let line0 = tags(&editor, 0);
    assert_eq!(&line0[0..3], &[Highlight::Keyword2; 3]);
    assert_eq!(line0[4], Highlight::Normal);
    assert_eq!(line0[8], Highlight::Number);
    assert_eq!(tags(&editor, 1), vec![Highlight::Comment; 7]);
}

#[test]
fn test_unterminated_block_comment_propagates() {
    let mut editor = c_editor("int a;\nint b;\nint c;\nint d; */ int e;");
    editor.set_cursor(Position::new(0, 0));
    editor.insert_char(b'/').unwrap();
    editor.insert_char(b'*').unwrap();

    for row in 1..3 {
        assert!(tags(&editor, row).iter().all(|h| *h == Highlight::Comment));
        assert!(editor.document().line(row).unwrap().comment_open());
    }
    let last = tags(&editor, 3);
    assert!(last[..9].iter().all(|h| *h == Highlight::Comment));
    assert_eq!(&last[10..13], &[Highlight::Keyword2; 3]);
    assert!(!editor.document().line(3).unwrap().comment_open());

    // Removing the opener uncomments every following line again.
    editor.delete_char().unwrap();
    assert_eq!(&tags(&editor, 1)[0..3], &[Highlight::Keyword2; 3]);
    assert_eq!(&tags(&editor, 2)[0..3], &[Highlight::Keyword2; 3]);
}

#[test]
fn test_split_inside_block_comment() {
    let mut editor = c_editor("/* a b */ int");
    editor.set_cursor(Position::new(0, 4));
    editor.insert_newline().unwrap();

    assert!(editor.document().line(0).unwrap().comment_open());
    let second = tags(&editor, 1);
    assert!(second[..5].iter().all(|h| *h == Highlight::Comment));
    assert_eq!(&second[6..], &[Highlight::Keyword2; 3]);
}

#[test]
fn test_merge_closes_comment_state() {
    let mut editor = c_editor("/* a\n*/ int\nint");
    assert!(editor.document().line(0).unwrap().comment_open());

    editor.set_cursor(Position::new(1, 0));
    editor.delete_char().unwrap();
    assert!(!editor.document().line(0).unwrap().comment_open());
    assert_eq!(&tags(&editor, 1)[..], &[Highlight::Keyword2; 3]);
}

#[test]
fn test_preproc_and_strings() {
    let editor = c_editor("#include <stdio.h>\nchar *s = \"if 1\";");
    assert!(tags(&editor, 0).iter().all(|h| *h == Highlight::Preproc));

    let line = tags(&editor, 1);
    assert_eq!(&line[0..4], &[Highlight::Keyword2; 4]);
    assert_eq!(&line[10..16], &[Highlight::String; 6]);
}

#[test]
fn test_unknown_extension_disables_highlighting() {
    let mut editor = Editor::from_text("int x = 1; /* c", EditorOptions::default());
    editor.set_file_name("notes.txt");
    assert!(editor.profile().is_none());
    assert!(tags(&editor, 0).iter().all(|h| *h == Highlight::Normal));
    assert!(!editor.document().line(0).unwrap().comment_open());
}

#[test]
fn test_renaming_reselects_profile() {
    let mut editor = Editor::from_text("# comment\necho hi", EditorOptions::default());
    editor.set_file_name("run.sh");
    assert_eq!(editor.profile().unwrap().name, "sh");
    assert!(tags(&editor, 0).iter().all(|h| *h == Highlight::Comment));
    assert_eq!(&tags(&editor, 1)[0..4], &[Highlight::Keyword1; 4]);

    editor.set_file_name("run.c");
    assert!(tags(&editor, 0).iter().all(|h| *h == Highlight::Preproc));
}

#[test]
fn test_newline_after_block_opener_uncomments_following_line() {
    // The split leaves `#/* y` as a preproc line, which opens no comment.
    let mut editor = c_editor("x#/* y\nz");
    assert_eq!(tags(&editor, 1), vec![Highlight::Comment]);

    editor.set_cursor(Position::new(0, 1));
    editor.insert_newline().unwrap();
    assert_eq!(tags(&editor, 0), vec![Highlight::Normal]);
    assert_eq!(tags(&editor, 1), vec![Highlight::Preproc; 5]);
    assert_eq!(tags(&editor, 2), vec![Highlight::Normal]);
}

#[test]
fn test_newline_inside_block_opener() {
    let mut editor = c_editor("a /* b\nc");
    editor.set_cursor(Position::new(0, 3));
    editor.insert_newline().unwrap();
    assert_eq!(editor.document().to_string_lossy(), "a /\n* b\nc");
    assert_eq!(tags(&editor, 2), vec![Highlight::Normal]);
    assert!(!editor.document().line(1).unwrap().comment_open());
}

#[test]
fn test_undo_of_line_merge_restores_highlighting() {
    let mut editor = c_editor("x\n#/* y\nz");
    let before: Vec<_> = (0..3).map(|row| tags(&editor, row)).collect();
    assert_eq!(before[2], vec![Highlight::Normal]);

    editor.set_cursor(Position::new(1, 0));
    editor.delete_char().unwrap();
    assert_eq!(tags(&editor, 1), vec![Highlight::Comment]);

    editor.undo().unwrap();
    let after: Vec<_> = (0..3).map(|row| tags(&editor, row)).collect();
    assert_eq!(after, before);
}
