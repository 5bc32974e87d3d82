// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # lox-lexer
//!
//! The lexical front end of the Lox toolchain.
//!
//! ## Overview
//!
//! This crate turns Lox source text into a sequence of classified tokens:
//! - `lexer` - the maximal-munch [`Scanner`] and the [`Token`] model
//! - `diagnostics` - lexical errors and the sinks that receive them
//!
//! Lexical errors never stop a scan. They are handed to a
//! [`DiagnosticSink`] and the offending lexeme is dropped.
//!
//! ## Quick Start
//!
//! ```rust
//! use lox_lexer::{TokenKind, scan};
//!
//! let output = scan("print 1 + 2;");
//! assert!(!output.had_error());
//! assert_eq!(output.tokens[0].kind, TokenKind::Print);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diagnostics;
pub mod lexer;

// Re-exports for convenience
pub use diagnostics::{Diagnostic, DiagnosticSink, ErrorReporter, LexError};
pub use lexer::{Literal, Scanner, Span, Token, TokenKind};

/// Tokens and diagnostics from one scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    /// The scanned tokens, ending with [`TokenKind::Eof`]
    pub tokens: Vec<Token>,
    /// Every lexical error found, in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanOutput {
    /// Returns true if the scan reported any diagnostic.
    pub fn had_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Scans `source`, collecting diagnostics instead of printing them.
///
/// # Examples
///
/// ```rust
/// use lox_lexer::{LexError, scan};
///
/// let output = scan("@");
/// assert_eq!(output.tokens.len(), 1);
/// assert_eq!(output.diagnostics[0].error, LexError::UnexpectedCharacter('@'));
/// ```
pub fn scan(source: &str) -> ScanOutput {
    let mut diagnostics = Vec::new();
    let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
    ScanOutput {
        tokens,
        diagnostics,
    }
}
