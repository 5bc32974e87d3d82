// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Lexical diagnostics and the sinks that receive them.
//!
//! The scanner never fails. Each malformed lexeme is turned into a
//! [`Diagnostic`] and handed to a [`DiagnosticSink`]; whether the run as a
//! whole failed is decided by the caller from the sink's state.

use std::fmt;
use thiserror::Error;

/// The lexical errors the scanner can detect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that cannot start any token
    #[error(
        "Unexpected character. char repr: {ch} int repr: {code}",
        ch = .0,
        code = char_code(.0)
    )]
    UnexpectedCharacter(char),

    /// End of input inside a string literal
    #[error("Unterminated string.")]
    UnterminatedString,
}

fn char_code(ch: &char) -> u32 {
    u32::from(*ch)
}

/// A single reported problem, tied to the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line
    pub line: usize,
    /// Extra location context; empty for lexical errors
    pub location: String,
    /// What went wrong
    pub error: LexError,
}

impl Diagnostic {
    /// Creates a diagnostic with an explicit location.
    pub fn new(line: usize, location: impl Into<String>, error: LexError) -> Self {
        Self {
            line,
            location: location.into(),
            error,
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

// The closing bracket is intentionally absent; tooling matches this prefix.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {} Error {}: {}",
            self.line, self.location, self.error
        )
    }
}

/// Receives diagnostics from the scanner.
pub trait DiagnosticSink {
    /// Records a diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Reports an error with no location context.
    fn error(&mut self, line: usize, error: LexError) {
        self.report(Diagnostic::new(line, "", error));
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// The standard sink: prints each diagnostic to stdout as it arrives and
/// remembers whether anything went wrong until [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    silent: bool,
}

impl ErrorReporter {
    /// Creates a reporter that echoes diagnostics to stdout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reporter that only records.
    pub fn silent() -> Self {
        Self {
            diagnostics: Vec::new(),
            silent: true,
        }
    }

    /// Returns true if any diagnostic was reported since the last reset.
    pub fn had_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Number of diagnostics since the last reset.
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// The diagnostics reported since the last reset.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Clears the error state.
    pub fn reset(&mut self) {
        self.diagnostics.clear();
    }

    /// Takes the recorded diagnostics, leaving the reporter clean.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl DiagnosticSink for ErrorReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(line = diagnostic.line, "{}", diagnostic.error);
        if !self.silent {
            println!("{diagnostic}");
        }
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_character_message() {
        let error = LexError::UnexpectedCharacter('@');
        assert_eq!(
            error.to_string(),
            "Unexpected character. char repr: @ int repr: 64"
        );
    }

    #[test]
    fn test_unexpected_non_ascii_character_message() {
        let error = LexError::UnexpectedCharacter('é');
        assert_eq!(
            error.to_string(),
            "Unexpected character. char repr: é int repr: 233"
        );
    }

    #[test]
    fn test_unterminated_string_message() {
        assert_eq!(
            LexError::UnterminatedString.to_string(),
            "Unterminated string."
        );
    }

    #[test]
    fn test_diagnostic_format() {
        let diagnostic = Diagnostic::new(3, "", LexError::UnterminatedString);
        assert_eq!(
            diagnostic.to_string(),
            "[line 3 Error : Unterminated string."
        );
    }

    #[test]
    fn test_diagnostic_with_location() {
        let diagnostic = Diagnostic::new(1, "at end", LexError::UnexpectedCharacter('#'));
        assert_eq!(
            diagnostic.to_string(),
            "[line 1 Error at end: Unexpected character. char repr: # int repr: 35"
        );
        assert_eq!(
            diagnostic.message(),
            "Unexpected character. char repr: # int repr: 35"
        );
    }

    #[test]
    fn test_error_uses_empty_location() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.error(7, LexError::UnterminatedString);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].line, 7);
        assert!(sink[0].location.is_empty());
    }

    #[test]
    fn test_reporter_tracks_errors() {
        let mut reporter = ErrorReporter::silent();
        assert!(!reporter.had_error());

        reporter.error(1, LexError::UnexpectedCharacter('@'));
        reporter.error(2, LexError::UnterminatedString);

        assert!(reporter.had_error());
        assert_eq!(reporter.error_count(), 2);
        assert_eq!(reporter.diagnostics()[1].line, 2);
    }

    #[test]
    fn test_reporter_reset() {
        let mut reporter = ErrorReporter::silent();
        reporter.error(1, LexError::UnterminatedString);
        reporter.reset();

        assert!(!reporter.had_error());
        assert_eq!(reporter.error_count(), 0);
    }

    #[test]
    fn test_reporter_take() {
        let mut reporter = ErrorReporter::silent();
        reporter.error(4, LexError::UnexpectedCharacter('$'));

        let taken = reporter.take();
        assert_eq!(taken.len(), 1);
        assert!(!reporter.had_error());
    }
}
