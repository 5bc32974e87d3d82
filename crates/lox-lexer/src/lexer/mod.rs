//! Lexical analysis (tokenization) for Lox source code.
//!
//! The lexer transforms Lox source text into a sequence of tokens that a
//! parser can consume.
//!
//! ## Structure
//!
//! - `scanner.rs` - Main `Scanner` struct that produces tokens
//! - `token.rs` - `Token` and `TokenKind` definitions
//!
//! ## Documentation Submodules
//!
//! - `operators` - One-or-two character operator scanning
//! - `literals` - Number, string, and identifier literals
//!
//! ## Usage
//!
//! ```rust
//! use lox_lexer::lexer::{Scanner, TokenKind};
//!
//! let mut diagnostics = Vec::new();
//! let tokens = Scanner::new("var x = 42;").scan_tokens(&mut diagnostics);
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(tokens.last().map(|t| &t.kind), Some(&TokenKind::Eof));
//! for token in &tokens {
//!     println!("{token}");
//! }
//! ```

mod scanner;
mod token;

// Documentation and test submodules
pub mod literals;
pub mod operators;

pub use scanner::Scanner;
pub use token::{KEYWORDS, LITERAL_PLACEHOLDER, Literal, Span, Token, TokenKind};
