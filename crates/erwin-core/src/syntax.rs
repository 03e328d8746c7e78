//! Lexical highlighting.
//!
//! [`classify`] tags every byte of one line with a [`Highlight`] using a single left-to-right
//! scan driven by a [`SyntaxProfile`]. The only state carried between lines is whether a
//! multiline comment is still open; when re-classifying a line flips that state, the following
//! lines are re-classified too, iteratively, until the state settles.
//!
//! Rules, in priority order at each byte:
//!
//! 1. inside a multiline comment: `Comment` up to and including the end delimiter
//! 2. multiline start delimiter: `Comment`, enter the comment
//! 3. single-line comment prefix: the rest of the line is `Comment`
//! 4. inside a string: `String`; a backslash escapes the next byte
//! 5. `"` or `'`: opens a string
//! 6. digit after a separator or another number digit: `Number`
//! 7. `#` at column 0: the whole line is `Preproc`
//! 8. keyword at a separator boundary, followed by a separator or end of line
//! 9. anything else: `Normal`

use crate::document::Document;
use crate::line::{Highlight, Line};
use erwin_lang::SyntaxProfile;
use regex::bytes::Regex;

/// Returns `true` for bytes that delimit numbers and keywords.
pub fn is_separator(byte: u8) -> bool {
    byte == 0
        || byte.is_ascii_whitespace()
        // `isspace` also accepts vertical tab.
        || byte == 0x0b
        || b",.()+-/*=~%<>[];".contains(&byte)
}

/// Classify one line.
///
/// `prior_open` is the comment-open state of the previous line. Returns the highlight tags
/// (same length as `text`) and whether a multiline comment is still open at the end of the
/// line. Without a profile everything is [`Highlight::Normal`].
///
/// ```rust
/// use erwin_core::{Highlight, syntax::classify};
///
/// let c = erwin_lang::profile_for_path("x.c".as_ref());
/// let (tags, open) = classify(b"int x = 1;", false, c);
/// assert_eq!(&tags[..3], &[Highlight::Keyword2; 3]);
/// assert_eq!(tags[8], Highlight::Number);
/// assert!(!open);
/// ```
pub fn classify(
    text: &[u8],
    prior_open: bool,
    profile: Option<&SyntaxProfile>,
) -> (Vec<Highlight>, bool) {
    let mut hl = vec![Highlight::Normal; text.len()];
    let Some(profile) = profile else {
        return (hl, false);
    };

    let block = profile.comments.block_tokens();
    let line_comment = profile.comments.line_token();

    let mut in_comment = prior_open && block.is_some();
    let mut in_string: Option<u8> = None;
    let mut prev_sep = true;

    let mut i = 0;
    'scan: while i < text.len() {
        let c = text[i];
        let rest = &text[i..];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if let Some((start, end)) = block {
            if in_comment {
                if rest.starts_with(end) {
                    hl[i..i + end.len()].fill(Highlight::Comment);
                    i += end.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    hl[i] = Highlight::Comment;
                    i += 1;
                }
                continue;
            }
            if rest.starts_with(start) {
                hl[i..i + start.len()].fill(Highlight::Comment);
                i += start.len();
                in_comment = true;
                continue;
            }
        }

        if let Some(prefix) = line_comment
            && rest.starts_with(prefix)
        {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if let Some(quote) = in_string {
            hl[i] = Highlight::String;
            prev_sep = false;
            if c == b'\\' && i + 1 < text.len() {
                hl[i + 1] = Highlight::String;
                i += 2;
                continue;
            }
            if c == quote {
                in_string = None;
            }
            i += 1;
            continue;
        }
        if c == b'"' || c == b'\'' {
            in_string = Some(c);
            hl[i] = Highlight::String;
            prev_sep = false;
            i += 1;
            continue;
        }

        if c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number) {
            hl[i] = Highlight::Number;
            prev_sep = false;
            i += 1;
            continue;
        }

        if i == 0 && c == b'#' {
            hl.fill(Highlight::Preproc);
            break;
        }

        if prev_sep {
            let classes = [
                (&profile.keywords1, Highlight::Keyword1),
                (&profile.keywords2, Highlight::Keyword2),
            ];
            for (keywords, tag) in classes {
                if let Some(len) = keyword_at(rest, keywords) {
                    hl[i..i + len].fill(tag);
                    i += len;
                    prev_sep = false;
                    continue 'scan;
                }
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}

/// Length of the first keyword of `keywords` that starts `rest` and is followed by a separator
/// or the end of the line.
fn keyword_at(rest: &[u8], keywords: &[String]) -> Option<usize> {
    keywords
        .iter()
        .map(|kw| kw.as_bytes())
        .find(|kw| {
            !kw.is_empty()
                && rest.starts_with(kw)
                && rest.get(kw.len()).is_none_or(|&b| is_separator(b))
        })
        .map(<[u8]>::len)
}

/// Re-classify `row` and propagate a changed comment-open state downwards.
///
/// Returns the last row that was re-classified.
pub(crate) fn update_line(
    doc: &mut Document,
    row: usize,
    profile: Option<&SyntaxProfile>,
) -> usize {
    let lines = doc.lines_mut();
    let mut row = row;
    while row < lines.len() {
        let prior_open = row > 0 && lines[row - 1].comment_open();
        let line = &mut lines[row];
        let was_open = line.comment_open();
        let (hl, open) = classify(line.text(), prior_open, profile);
        line.set_classification(hl, open);

        if open == was_open || row + 1 >= lines.len() {
            break;
        }
        row += 1;
    }
    row.min(lines.len().saturating_sub(1))
}

/// Re-classify the whole document in one top-down pass.
pub(crate) fn update_all(doc: &mut Document, profile: Option<&SyntaxProfile>) {
    let mut prior_open = false;
    for line in doc.lines_mut() {
        let (hl, open) = classify(line.text(), prior_open, profile);
        line.set_classification(hl, open);
        prior_open = open;
    }
}

/// Tag every non-overlapping occurrence of `query` in `line` as [`Highlight::Match`].
pub(crate) fn apply_match_overlay(line: &mut Line, query: &Regex) {
    let ranges: Vec<_> = query.find_iter(line.text()).map(|m| m.range()).collect();
    let hl = line.highlight_mut();
    for range in ranges {
        hl[range].fill(Highlight::Match);
    }
}
