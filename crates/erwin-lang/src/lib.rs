#![warn(missing_docs)]
//! `erwin-lang` - data-driven language profiles for `erwin-core`.
//!
//! A [`SyntaxProfile`] is everything the lexical highlighter needs to know about a language:
//! which file names it applies to, two keyword classes, and its comment delimiters. This crate
//! intentionally stays free of any parsing logic; the classification rules live in
//! `erwin-core::syntax`.

use std::path::Path;
use std::sync::LazyLock;

/// Comment tokens for a given language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            block_start: None,
            block_end: None,
        }
    }

    /// Create a config that supports only block comments.
    pub fn block(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            line: None,
            block_start: Some(start.into()),
            block_end: Some(end.into()),
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// The line comment token as bytes, if one is configured and non-empty.
    pub fn line_token(&self) -> Option<&[u8]> {
        self.line
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::as_bytes)
    }

    /// The block comment delimiters as bytes.
    ///
    /// Only returns `Some` when *both* tokens are configured and non-empty: a start token
    /// without an end token never opens a block comment.
    pub fn block_tokens(&self) -> Option<(&[u8], &[u8])> {
        let start = self.block_start.as_deref().filter(|s| !s.is_empty())?;
        let end = self.block_end.as_deref().filter(|s| !s.is_empty())?;
        Some((start.as_bytes(), end.as_bytes()))
    }
}

/// Highlighting rules for one language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyntaxProfile {
    /// Display name (shown in the status bar).
    pub name: String,
    /// File-name suffixes including the leading dot (e.g. `.c`).
    pub extensions: Vec<String>,
    /// Control-flow keywords.
    pub keywords1: Vec<String>,
    /// Type keywords.
    pub keywords2: Vec<String>,
    /// Comment delimiters.
    pub comments: CommentConfig,
}

impl SyntaxProfile {
    /// Create an empty profile with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the file-name suffixes this profile applies to.
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set both keyword classes.
    pub fn with_keywords(mut self, keywords1: &[&str], keywords2: &[&str]) -> Self {
        self.keywords1 = keywords1.iter().map(|s| s.to_string()).collect();
        self.keywords2 = keywords2.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the comment delimiters.
    pub fn with_comments(mut self, comments: CommentConfig) -> Self {
        self.comments = comments;
        self
    }

    /// Returns `true` if `file_name` ends with one of this profile's extensions.
    ///
    /// The suffix is everything from the last `.` of the file name on, compared exactly
    /// (case-sensitive). A name without a dot never matches.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let Some(dot) = file_name.rfind('.') else {
            return false;
        };
        let suffix = &file_name[dot..];
        self.extensions.iter().any(|ext| ext == suffix)
    }
}

/// Pick the first profile in `profiles` whose extensions match `path`'s file name.
pub fn select_profile<'a>(profiles: &'a [SyntaxProfile], path: &Path) -> Option<&'a SyntaxProfile> {
    let file_name = path.file_name()?.to_str()?;
    profiles.iter().find(|p| p.matches_file_name(file_name))
}

/// Pick a built-in profile for `path`, see [`builtin_profiles`].
pub fn profile_for_path(path: &Path) -> Option<&'static SyntaxProfile> {
    select_profile(builtin_profiles(), path)
}

/// The built-in profile table, in selection order.
pub fn builtin_profiles() -> &'static [SyntaxProfile] {
    static PROFILES: LazyLock<Vec<SyntaxProfile>> = LazyLock::new(|| {
        vec![
            c_profile(),
            shell_profile(),
            javascript_profile(),
            html_profile(),
            css_profile(),
            xml_profile(),
        ]
    });
    &PROFILES
}

fn c_profile() -> SyntaxProfile {
    SyntaxProfile::new("c")
        .with_extensions(&[".c", ".h", ".cpp", ".hpp", ".cc"])
        .with_keywords(
            &[
                "switch", "if", "while", "for", "break", "continue", "return", "else", "goto",
                "auto", "register", "extern", "const", "unsigned", "signed", "volatile", "do",
                "typeof", "_Bool", "_Complex", "_Imaginary", "case", "default", "sizeof", "enum",
                "union", "struct", "typedef",
            ],
            &["int", "char", "float", "double", "void", "long", "short"],
        )
        .with_comments(CommentConfig::line_and_block("//", "/*", "*/"))
}

fn shell_profile() -> SyntaxProfile {
    SyntaxProfile::new("sh")
        .with_extensions(&[".sh"])
        .with_keywords(
            &[
                "if", "then", "else", "fi", "for", "in", "do", "done", "while", "until", "case",
                "esac", "function", "return", "export", "local", "read", "echo", "printf", "test",
                "exit", "break", "continue", "set", "unset", "trap", "eval", "exec", "source", ".",
            ],
            &[],
        )
        .with_comments(CommentConfig::line("#"))
}

fn javascript_profile() -> SyntaxProfile {
    SyntaxProfile::new("javascript")
        .with_extensions(&[".js"])
        .with_keywords(
            &[
                "function", "var", "let", "const", "if", "else", "for", "while", "do", "return",
                "break", "continue", "switch", "case", "default", "try", "catch", "finally",
                "throw", "new", "this", "super", "class", "extends", "import", "export", "await",
                "async", "yield", "typeof", "instanceof", "delete", "in", "void", "debugger",
                "with",
            ],
            &[],
        )
        .with_comments(CommentConfig::line_and_block("//", "/*", "*/"))
}

fn html_profile() -> SyntaxProfile {
    SyntaxProfile::new("html")
        .with_extensions(&[".html", ".htm"])
        .with_keywords(
            &[
                "html", "head", "body", "title", "meta", "link", "script", "style", "div", "p",
                "a", "img", "ul", "ol", "li", "table", "tr", "td", "th", "form", "input",
                "button", "span", "h1", "h2", "h3", "h4", "h5", "h6", "br", "hr", "em", "strong",
                "b", "i", "code", "pre",
            ],
            &[],
        )
        .with_comments(CommentConfig::block("<!--", "-->"))
}

fn css_profile() -> SyntaxProfile {
    SyntaxProfile::new("css")
        .with_extensions(&[".css"])
        .with_keywords(
            &[
                "color", "background-color", "font-size", "margin", "padding", "border",
                "display", "position", "width", "height", "top", "right", "bottom", "left",
                "text-align", "line-height", "font-family", "font-weight", "float", "clear",
                "overflow", "z-index", "opacity", "transform", "transition", "animation",
                "selector", "class", "id", "media", "keyframes", "from", "to", "important",
            ],
            &[],
        )
        .with_comments(CommentConfig::block("/*", "*/"))
}

fn xml_profile() -> SyntaxProfile {
    SyntaxProfile::new("xml")
        .with_extensions(&[".xml"])
        .with_keywords(
            &[
                "xml", "version", "encoding", "root", "element", "attribute", "value", "item",
                "data", "note", "to", "from", "heading", "body",
            ],
            &[],
        )
        .with_comments(CommentConfig::block("<!--", "-->"))
}
