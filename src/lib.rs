/*!
# `jsonvet` Library

Conformance-oriented JSON validation: decides whether a byte sequence is
syntactically valid JSON per the RFC 8259 grammar, and if not, reports a
precise reason.

The core is a two-stage pipeline composed in strict sequence:

1. [`tokenizer`] — converts the raw bytes into a flat [`TokenStream`] in a
   single left-to-right pass, enforcing the lexical grammar (string escapes,
   number syntax, keyword literals).
2. [`validator`] — walks the token stream with a cursor and an explicit
   open-bracket stack and enforces nesting, ordering, and punctuation rules.

Data flows one way: bytes to tokens to an accept/reject decision. Each call
owns its stream, cursor, and stack exclusively, so validating different
inputs on different threads needs no locking.

## Examples

```rust
use jsonvet::is_valid_json;

assert!(is_valid_json(br#"{"key": "value"}"#).is_ok());
assert!(is_valid_json(br#"["extra comma",]"#).is_err());
```

Errors distinguish the lexical from the grammatical:

```rust
use jsonvet::{is_valid_json, JsonError};
use jsonvet::tokenizer::LexError;
use jsonvet::validator::ParseError;

assert!(matches!(
    is_valid_json(br#"{"n": 013}"#),
    Err(JsonError::Lex(LexError::LeadingZero { .. }))
));
assert!(matches!(
    is_valid_json(br#"{"k": true} "trailing""#),
    Err(JsonError::Parse(ParseError::TrailingData { .. }))
));
```
*/

pub mod commands;
pub mod tokenizer;
pub mod validator;

pub use tokenizer::{tokenize, LexError, Token, TokenStream};
pub use validator::{validate, validate_with, ParseError, ValidateOptions};

use std::error::Error;
use std::fmt;

/// Union of the two disjoint error families: lexical violations from the
/// tokenizer and grammatical violations from the structural validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// The input failed tokenization.
    Lex(LexError),
    /// The token stream failed structural validation.
    Parse(ParseError),
}

impl Error for JsonError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "lexical error: {e}"),
            Self::Parse(e) => write!(f, "structural error: {e}"),
        }
    }
}

impl From<LexError> for JsonError {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for JsonError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

/// Check whether `input` is a single syntactically valid JSON value.
///
/// Runs the full pipeline: tokenize, then validate with default
/// [`ValidateOptions`]. Fail-fast: the first violation aborts the whole
/// operation.
///
/// # Errors
///
/// Returns the [`JsonError`] describing the first violation found.
pub fn is_valid_json(input: &[u8]) -> Result<(), JsonError> {
    is_valid_json_with(input, ValidateOptions::default())
}

/// Like [`is_valid_json`], with explicit [`ValidateOptions`].
///
/// # Errors
///
/// Returns the [`JsonError`] describing the first violation found.
pub fn is_valid_json_with(input: &[u8], options: ValidateOptions) -> Result<(), JsonError> {
    let stream = tokenize(input)?;
    validate_with(&stream, options)?;
    Ok(())
}
