//! Plain-text load and save.
//!
//! Files are read line by line: every `\n` ends a line, trailing `\r`/`\n` bytes are stripped,
//! and a final line without a newline is kept. Saving writes every line followed by `\n`.

use crate::document::Document;
use crate::error::FileError;
use crate::text::trim_line_terminators;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Result of [`load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    /// Line texts; never empty.
    pub lines: Vec<Vec<u8>>,
    /// `false` when the file did not exist.
    pub existed: bool,
}

/// Read `path`.
///
/// A missing file is not an error: it yields one empty line and `existed == false`. So does
/// an empty file.
pub fn load(path: &Path) -> Result<Loaded, FileError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(Loaded {
                lines: vec![Vec::new()],
                existed: false,
            });
        }
        Err(source) => {
            return Err(FileError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut lines = read_lines(BufReader::new(file)).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if lines.is_empty() {
        lines.push(Vec::new());
    }
    Ok(Loaded {
        lines,
        existed: true,
    })
}

/// Split a reader into lines, stripping line terminators.
pub fn read_lines(mut reader: impl BufRead) -> io::Result<Vec<Vec<u8>>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lines.push(trim_line_terminators(&buf).to_vec());
    }
    Ok(lines)
}

/// Write every line of `doc` followed by `\n`; returns the number of bytes written.
pub fn write_lines(doc: &Document, mut writer: impl Write) -> io::Result<usize> {
    let mut written = 0;
    for line in doc.lines() {
        writer.write_all(line.text())?;
        writer.write_all(b"\n")?;
        written += line.len() + 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Create (or truncate) `path` and write `doc` to it.
pub fn save(path: &Path, doc: &Document) -> Result<usize, FileError> {
    let err = |source| FileError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(err)?;
    write_lines(doc, BufWriter::new(file)).map_err(err)
}
