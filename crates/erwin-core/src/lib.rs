#![warn(missing_docs)]
//! Erwin Core - headless kernel of the erwin terminal editor
//!
//! # Overview
//!
//! `erwin-core` owns the in-memory document model and everything that mutates it. It never
//! touches the terminal: a front-end feeds it keys and reads back lines, highlight tags,
//! cursor, viewport and status message.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Editor session (open/save/edit/undo/find)  │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  Undo log            │  Search cursor       │
//! ├──────────────────────┴──────────────────────┤
//! │  Syntax engine (per-line, comment carry)    │  ← Highlight tags
//! ├─────────────────────────────────────────────┤
//! │  Document (split / merge / insert / delete) │  ← Line buffer
//! ├─────────────────────────────────────────────┤
//! │  Line (bytes + highlight + comment state)   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use erwin_core::{Editor, EditorOptions, Highlight, Position};
//!
//! let mut editor = Editor::from_text("", EditorOptions::default());
//! editor.set_file_name("hello.c");
//! for &b in b"int x = 1;" {
//!     editor.insert_char(b).unwrap();
//! }
//!
//! let line = editor.document().line(0).unwrap();
//! assert_eq!(line.highlight()[0], Highlight::Keyword2);
//! assert_eq!(line.highlight()[8], Highlight::Number);
//!
//! editor.undo().unwrap();
//! assert_eq!(editor.document().to_string_lossy(), "int x = 1");
//!
//! editor.set_cursor(Position::new(0, 5));
//! let hit = editor.find_start("int").unwrap().unwrap();
//! assert!(hit.wrapped);
//! ```
//!
//! # Module Description
//!
//! - [`document`] - line buffer and its editing primitives
//! - [`line`] - one row with its highlight tags
//! - [`syntax`] - lexical classification and comment-state propagation
//! - [`undo`] - bounded inverse-action log
//! - [`search`] - literal find with wraparound
//! - [`viewport`] - scroll offsets and tab expansion
//! - [`status`] - timed status message
//! - [`file`] - plain-text load/save
//! - [`editor`] - the session object tying it together

pub mod document;
pub mod editor;
pub mod error;
pub mod file;
pub mod line;
pub mod search;
pub mod status;
pub mod syntax;
mod text;
pub mod undo;
pub mod viewport;

pub use document::{Deletion, Document, Position};
pub use editor::{CursorMove, Editor, EditorOptions, PasteSummary, SaveOutcome, WHEEL_STEP};
pub use error::{EditError, Error, FileError, Result, Severity};
pub use line::{Highlight, Line};
pub use search::{Direction, SearchError, SearchHit, SearchState};
pub use status::StatusLine;
pub use undo::{UndoAction, UndoHistory};
pub use viewport::Viewport;

pub use erwin_lang::{CommentConfig, SyntaxProfile};
