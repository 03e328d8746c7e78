//! Error taxonomy.
//!
//! Every failure the core can report belongs to one of three [`Severity`] classes:
//!
//! - **Fatal**: allocation failure. The front-end restores the terminal and exits.
//! - **Recoverable**: file and search failures. Reported on the status line; the session
//!   continues unaffected.
//! - **Programmer**: an out-of-range row/column reached a primitive. Logged and ignored; the
//!   document is left untouched.

use crate::search::SearchError;
use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

/// How a failure must be handled by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Unrecoverable; terminate after orderly teardown.
    Fatal,
    /// Report to the user and continue.
    Recoverable,
    /// Internal misuse; log and treat the operation as a no-op.
    Programmer,
}

/// Errors raised by [`Document`](crate::Document) primitives.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// The row or column does not address a position of the document.
    #[error("position out of range: row {row}, column {col}")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// Growing a line or the line sequence failed.
    #[error("out of memory")]
    OutOfMemory(#[from] TryReserveError),
}

impl EditError {
    /// Severity class of this error.
    pub fn severity(&self) -> Severity {
        match self {
            Self::OutOfRange { .. } => Severity::Programmer,
            Self::OutOfMemory(_) => Severity::Fatal,
        }
    }
}

/// File load/save failures.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// Opening or reading the file failed (a missing file is not an error).
    #[error("error opening file '{}': {source}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Creating or writing the file failed.
    #[error("error saving file '{}': {source}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Umbrella error returned by [`Editor`](crate::Editor) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document primitive failed.
    #[error(transparent)]
    Edit(#[from] EditError),
    /// Loading or saving failed.
    #[error(transparent)]
    File(#[from] FileError),
    /// The search query was rejected.
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl Error {
    /// Severity class of this error.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Edit(err) => err.severity(),
            Self::File(FileError::Read { .. } | FileError::Write { .. }) => Severity::Recoverable,
            Self::Search(_) => Severity::Recoverable,
        }
    }

    /// Shorthand for `severity() == Severity::Fatal`.
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result alias used by the session API.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_classes() {
        let oob = EditError::OutOfRange { row: 3, col: 1 };
        assert_eq!(oob.severity(), Severity::Programmer);
        assert_eq!(oob.to_string(), "position out of range: row 3, column 1");

        let err = Error::from(FileError::Write {
            path: PathBuf::from("/nope/x.c"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(err.severity(), Severity::Recoverable);
        assert!(!err.is_fatal());
        assert!(err.to_string().starts_with("error saving file '/nope/x.c'"));

        let oom = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        assert!(Error::from(EditError::from(oom)).is_fatal());
    }

    #[test]
    fn test_search_errors_are_recoverable() {
        let err = Error::from(SearchError::EmptyQuery);
        assert_eq!(err.severity(), Severity::Recoverable);
    }
}
