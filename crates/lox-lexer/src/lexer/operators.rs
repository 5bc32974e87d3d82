//! Operator scanning documentation.
//!
//! This module documents the operator scanning logic in `scanner.rs`.
//! Lox operators are at most two characters long, so one character of
//! lookahead is enough.
//!
//! ## Single-Character Tokens
//!
//! `(` `)` `{` `}` `,` `.` `-` `+` `;` `*` produce a token immediately.
//!
//! ## One-or-Two Character Operators
//!
//! | Lead | Alone | Followed by `=` |
//! |------|-------|-----------------|
//! | `!` | `Bang` | `BangEqual` |
//! | `=` | `Equal` | `EqualEqual` |
//! | `<` | `Less` | `LessEqual` |
//! | `>` | `Greater` | `GreaterEqual` |
//!
//! Method: `either`
//!
//! ## Slash and Comments
//!
//! A `/` followed by another `/` starts a comment that runs up to, but not
//! including, the next newline. Any other `/` is `Slash`.
//!
//! ```text
//! a / b     -> Identifier Slash Identifier
//! a // b    -> Identifier
//! ```
//!
//! ## Maximal Munch
//!
//! ```text
//! // For input "<="
//!   consume '<'
//!   peek() returns '='  -> consume it
//!   return LessEqual      (never Less followed by Equal)
//! ```

// This module serves as documentation. The actual implementation is in scanner.rs.
