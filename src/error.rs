use std::fmt;
use thiserror::Error;

/// Which half of a `{ ... }` pair could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Open,
    Close,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Open => f.write_str("start"),
            Side::Close => f.write_str("end"),
        }
    }
}

/// Errors raised by the rewrite engine.
///
/// Only structural problems are errors. A missing anchor keyword is a no-op and an
/// unmatched line passes through the pattern chains untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// An anchor keyword was found but no balanced block follows it.
    #[error("`{keyword}` detected, block {side} not found")]
    MalformedBlock { keyword: &'static str, side: Side },
}
