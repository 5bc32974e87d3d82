//! Literal scanning documentation.
//!
//! This module documents the literal scanning logic in `scanner.rs`.
//! The lexer handles number, string, and identifier literals.
//!
//! ## Number Literals
//!
//! Method: `scan_number`
//!
//! ```text
//! 42        -> Number(42.0)
//! 3.14      -> Number(3.14)
//! 123.      -> Number(123.0) Dot
//! .5        -> Dot Number(5.0)
//! -1        -> Minus Number(1.0)
//! ```
//!
//! A fraction is only consumed when the `.` is followed by a digit. Signs
//! are separate `Minus` tokens; folding them belongs to the parser.
//!
//! ## String Literals
//!
//! Method: `scan_string`
//!
//! ```text
//! "hello"   -> String("hello")
//! "a\nb"    -> String("a\\nb")   (no escape processing)
//! ```
//!
//! Strings may span lines; each embedded newline bumps the line counter.
//! Input that ends before the closing quote reports `UnterminatedString`
//! and produces no token.
//!
//! ## Identifiers and Keywords
//!
//! Method: `scan_identifier`
//!
//! - Start: `A-Z`, `a-z`, `_`
//! - Continue: start chars + `0-9`
//!
//! The whole identifier is looked up in the reserved word table:
//!
//! ```text
//! "class"   -> TokenKind::Class
//! "classic" -> TokenKind::Identifier
//! ```

// This module serves as documentation. The actual implementation is in scanner.rs.
