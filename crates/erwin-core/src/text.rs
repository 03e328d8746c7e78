/// Split `text` into lines on `\n`, stripping one trailing `\r` from each.
///
/// Trailing empty segments are kept, so N newlines produce N + 1 lines. File loading uses
/// [`crate::file::read_lines`] instead, which follows `getline` semantics.
pub(crate) fn split_lines_preserve_trailing(text: &[u8]) -> Vec<Vec<u8>> {
    text.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect()
}

/// Strip every trailing `\r` / `\n` byte.
pub(crate) fn trim_line_terminators(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b'\r' | b'\n'] = line {
        line = rest;
    }
    line
}
