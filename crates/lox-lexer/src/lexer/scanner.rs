//! The scanner that produces tokens from source text.

use super::{Span, Token, TokenKind};
use crate::diagnostics::{DiagnosticSink, LexError};

/// A scanner that tokenizes Lox source code.
///
/// A scanner is single-use: [`scan_tokens`](Scanner::scan_tokens) consumes
/// it, so every scan starts from a fresh cursor and line counter.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    tokens: Vec<Token>,
    /// Byte offset where the current lexeme begins
    start: usize,
    /// Line where the current lexeme begins
    start_line: usize,
    current_pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            tokens: Vec::new(),
            start: 0,
            start_line: 1,
            current_pos: 0,
            line: 1,
        }
    }

    /// Scans the whole source, reporting malformed lexemes to `sink`.
    ///
    /// The returned sequence always ends with a [`TokenKind::Eof`] token.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = self.source.len()))]
    pub fn scan_tokens<S>(mut self, sink: &mut S) -> Vec<Token>
    where
        S: DiagnosticSink + ?Sized,
    {
        let mut errors = 0;

        while !self.is_at_end() {
            // We are at the beginning of the next lexeme.
            self.start = self.current_pos;
            self.start_line = self.line;
            if let Err(error) = self.scan_token() {
                errors += 1;
                sink.error(self.line, error);
            }
        }

        self.tokens.push(Token::eof(self.line, self.source.len()));
        tracing::debug!(tokens = self.tokens.len(), errors, "scan complete");
        self.tokens
    }

    fn scan_token(&mut self) -> Result<(), LexError> {
        let Some((_pos, ch)) = self.advance() else {
            return Ok(());
        };

        let kind = match ch {
            // Single-character tokens
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,

            // One or two character tokens
            '!' => self.either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.either('=', TokenKind::GreaterEqual, TokenKind::Greater),

            '/' => {
                if self.matches('/') {
                    self.skip_line_comment();
                    return Ok(());
                }
                TokenKind::Slash
            }

            ' ' | '\r' | '\t' => return Ok(()),
            '\n' => {
                self.line += 1;
                return Ok(());
            }

            '"' => self.scan_string()?,
            _ if ch.is_ascii_digit() => self.scan_number(),
            _ if is_alpha(ch) => self.scan_identifier(),

            _ => return Err(LexError::UnexpectedCharacter(ch)),
        };

        self.add_token(kind);
        Ok(())
    }

    fn add_token(&mut self, kind: TokenKind) {
        let span = Span::new(self.start, self.current_pos);
        self.tokens.push(Token::new(
            kind,
            &self.source[span.start..span.end],
            self.start_line,
            span,
        ));
    }

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.current_pos = pos + ch.len_utf8();
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().map(|(_, ch)| ch)
    }

    /// Consumes the next character only if it is `expected`.
    fn matches(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn either(&mut self, expected: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.matches(expected) {
            matched
        } else {
            single
        }
    }

    fn skip_line_comment(&mut self) {
        // A comment goes until the end of the line; the newline itself is
        // left for the main loop so the line counter stays right.
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn scan_string(&mut self) -> Result<TokenKind, LexError> {
        loop {
            match self.advance() {
                None => return Err(LexError::UnterminatedString),
                Some((_, '"')) => break,
                Some((_, '\n')) => self.line += 1,
                Some(_) => {}
            }
        }

        // Trim the surrounding quotes.
        let value = &self.source[self.start + 1..self.current_pos - 1];
        Ok(TokenKind::String(value.to_string()))
    }

    fn scan_number(&mut self) -> TokenKind {
        self.consume_digits();

        // Look for a fractional part.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }

        // A run of ASCII digits with an optional fraction always parses.
        let value = self.source[self.start..self.current_pos]
            .parse::<f64>()
            .unwrap_or_default();
        TokenKind::Number(value)
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
        }
    }

    fn scan_identifier(&mut self) -> TokenKind {
        while self.peek().is_some_and(is_alphanumeric) {
            self.advance();
        }

        TokenKind::keyword(&self.source[self.start..self.current_pos])
            .unwrap_or(TokenKind::Identifier)
    }
}

/// Checks if a character can start an identifier.
fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Checks if a character can continue an identifier.
fn is_alphanumeric(ch: char) -> bool {
    is_alpha(ch) || ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;

    fn scan(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
        (tokens, diagnostics)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).0.into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("{ } ( ) , ; * + -"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Star,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_empty_source() {
        let (tokens, diagnostics) = scan("");
        assert_eq!(tokens, vec![Token::eof(1, 0)]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_lexemes_and_spans() {
        let (tokens, _) = scan("var answer = 42;");
        let lexemes: Vec<&str> = tokens.iter().map(|token| token.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["var", "answer", "=", "42", ";", ""]);
        assert_eq!(tokens[1].span, Span::new(4, 10));
        assert_eq!(tokens[5].span, Span::new(16, 16));
    }

    #[test]
    fn test_division_vs_comment() {
        assert_eq!(
            kinds("6 / 2"),
            vec![
                TokenKind::Number(6.0),
                TokenKind::Slash,
                TokenKind::Number(2.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let (tokens, diagnostics) = scan("1 // a comment with @ and \"quotes\n2");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Number(2.0));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_comment_at_end_of_input() {
        assert_eq!(kinds("// nothing else"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_line_counting() {
        let (tokens, _) = scan("\n\n+");
        assert_eq!(tokens[0].kind, TokenKind::Plus);
        assert_eq!(tokens[0].line, 3);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_carriage_return_and_tab_are_skipped() {
        let (tokens, _) = scan("\t(\r\n)");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].kind, TokenKind::RightParen);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_multiline_string() {
        let (tokens, diagnostics) = scan("\"one\ntwo\" x");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::String("one\ntwo".to_string()));
        assert_eq!(tokens[0].lexeme, "\"one\ntwo\"");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_unterminated_string_reports_current_line() {
        let (tokens, diagnostics) = scan("\"abc\ndef");
        assert_eq!(tokens, vec![Token::eof(2, 8)]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 2);
        assert_eq!(diagnostics[0].error, LexError::UnterminatedString);
    }

    #[test]
    fn test_unexpected_character_continues() {
        let (tokens, diagnostics) = scan("1 # 2");
        assert_eq!(
            tokens.iter().map(|t| t.kind.clone()).collect::<Vec<_>>(),
            vec![TokenKind::Number(1.0), TokenKind::Number(2.0), TokenKind::Eof]
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::new(1, "", LexError::UnexpectedCharacter('#'))]
        );
    }

    #[test]
    fn test_non_ascii_is_unexpected() {
        let (tokens, diagnostics) = scan("é");
        assert_eq!(tokens.len(), 1);
        assert_eq!(diagnostics[0].error, LexError::UnexpectedCharacter('é'));
        assert_eq!(tokens[0].span, Span::new(2, 2));
    }

    #[test]
    fn test_number_with_trailing_dot() {
        let (tokens, _) = scan("123.");
        assert_eq!(tokens[0].kind, TokenKind::Number(123.0));
        assert_eq!(tokens[0].lexeme, "123");
        assert_eq!(tokens[1].kind, TokenKind::Dot);
    }

    #[test]
    fn test_method_call_on_number() {
        assert_eq!(
            kinds("1.abs"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        let (tokens, _) = scan("foo _bar baz9");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Identifier));
        assert_eq!(tokens[1].lexeme, "_bar");
        assert_eq!(tokens[2].lexeme, "baz9");
    }

    #[test]
    fn test_fresh_state_per_scan() {
        let source = "print \"a\";\n@";
        assert_eq!(scan(source), scan(source));
    }
}
