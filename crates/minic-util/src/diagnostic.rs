//! Diagnostics accumulated across the best-effort pipeline.
//!
//! Every phase — lexing, parsing, semantic analysis — reports problems by
//! pushing a [`Diagnostic`] onto a shared list rather than returning early.
//! A single variant suffices: the originating phase is implicit from where
//! it was pushed, and callers only ever render `message`/`line`/`col`.

use serde::Serialize;
use std::fmt;

use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub line: u32,
    pub col: u32,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            line: span.line,
            col: span.col,
        }
    }

    pub fn at(message: impl Into<String>, line: u32, col: u32) -> Self {
        Self {
            message: message.into(),
            line,
            col,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.col, self.message)
    }
}
