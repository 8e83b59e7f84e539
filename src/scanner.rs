//! # Delimiter Scanner
//!
//! Locates the first balanced pair of an open/close delimiter in a piece of Terraform text
//! without parsing HCL. The scanner steps over regions whose braces are not structural:
//!
//! -   double-quoted strings, honoring backslash escapes
//! -   `#` and `//` line comments
//! -   `/* ... */` block comments
//! -   `${ ... }` interpolation bodies (single level, up to the first `}`)
//!
//! Delimiters are ASCII, so scanning works on bytes and every returned offset is a valid
//! `char` boundary in the input.

use crate::error::{MigrationError, Side};

/// Result of a delimiter scan. Either end may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    /// Offset of the first open delimiter seen, if any.
    pub open: Option<usize>,
    /// Offset of the close delimiter that brought the nesting depth back to zero.
    pub close: Option<usize>,
}

impl Balance {
    /// Returns `(open, close)` or a `MalformedBlock` error naming the missing side.
    pub fn require(self, keyword: &'static str) -> Result<(usize, usize), MigrationError> {
        let open = self.open.ok_or(MigrationError::MalformedBlock {
            keyword,
            side: Side::Open,
        })?;
        let close = self.close.ok_or(MigrationError::MalformedBlock {
            keyword,
            side: Side::Close,
        })?;
        Ok((open, close))
    }
}

/// Finds the first balanced `open`/`close` pair in `text`.
///
/// The depth counter is not clamped: a `close` seen before any `open` drives it negative, and
/// the scan then only succeeds if the depth later returns to exactly zero. Callers must treat a
/// missing `close` as "no block found" even when a balanced block is visible further on.
pub fn find_balanced(open: u8, close: u8, text: &str) -> Balance {
    let bytes = text.as_bytes();
    let mut depth: isize = 0;
    let mut start = None;
    let mut idx = 0;

    while idx < bytes.len() {
        let current = bytes[idx];

        if current == open {
            depth += 1;
            if start.is_none() {
                start = Some(idx);
            }
        }

        if current == close {
            depth -= 1;
            if depth == 0 {
                return Balance {
                    open: start,
                    close: Some(idx),
                };
            }
        }

        idx += 1;
        let next = bytes.get(idx).copied();

        idx = match (current, next) {
            (b'"', _) => skip_string(bytes, idx),
            (b'#', _) => skip_line(bytes, idx),
            (b'/', Some(b'/')) => skip_line(bytes, idx + 1),
            (b'/', Some(b'*')) => skip_past(bytes, idx + 1, b"*/"),
            (b'$', Some(b'{')) => skip_past(bytes, idx + 1, b"}"),
            _ => idx,
        };
    }

    Balance {
        open: start,
        close: None,
    }
}

/// Advances from just inside an opening quote to just past its closing quote.
fn skip_string(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b'"' => return idx + 1,
            _ => idx += 1,
        }
    }
    bytes.len()
}

/// Advances to just past the next newline.
fn skip_line(bytes: &[u8], idx: usize) -> usize {
    match bytes[idx.min(bytes.len())..].iter().position(|&b| b == b'\n') {
        Some(offset) => idx + offset + 1,
        None => bytes.len(),
    }
}

/// Advances to just past the next occurrence of `terminator`.
fn skip_past(bytes: &[u8], idx: usize, terminator: &[u8]) -> usize {
    let haystack = &bytes[idx.min(bytes.len())..];
    match haystack
        .windows(terminator.len())
        .position(|window| window == terminator)
    {
        Some(offset) => idx + offset + terminator.len(),
        None => bytes.len(),
    }
}
