//! # Structural Validator
//!
//! Walks a [`TokenStream`] with a cursor and an explicit open-bracket stack
//! and decides whether it forms exactly one well-formed JSON value followed
//! by end of input.
//!
//! The grammar being enforced:
//!
//! ```text
//! Value   := Object | Array | String | Number | True | False | Null
//! Object  := '{' [ Member (',' Member)* ] '}'
//! Member  := String ':' Value
//! Array   := '[' [ Value (',' Value)* ] ']'
//! ```
//!
//! Nesting is tracked with a heap-allocated bracket stack rather than native
//! call-stack recursion, so depth is bounded by
//! [`ValidateOptions::max_depth`] and an over-deep document fails with
//! [`ParseError::MaxDepthExceeded`] instead of overflowing the stack.
//!
//! ## Examples
//!
//! ```rust
//! use jsonvet::tokenizer::tokenize;
//! use jsonvet::validator::{validate, ParseError};
//!
//! let stream = tokenize(br#"{"key": [1, 2, 3]}"#).unwrap();
//! assert!(validate(&stream).is_ok());
//!
//! let stream = tokenize(br#"[1, 2,]"#).unwrap();
//! assert!(matches!(validate(&stream), Err(ParseError::TrailingComma { .. })));
//! ```
use crate::tokenizer::{Token, TokenStream};
use std::error::Error;
use std::fmt;

/// Default cap on nesting depth; documents nested deeper are rejected.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Per-call validation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Maximum allowed nesting depth (open `{`/`[` at any one time).
    pub max_depth: usize,
    /// Require the top-level value to be an object or array (the stricter
    /// "document" conformance profile). Bare scalars are valid otherwise.
    pub require_container: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            require_container: false,
        }
    }
}

/// Represents a grammatical violation found while validating a token stream.
///
/// `index` fields are token indices into the stream being validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token that no grammar production allows at this point.
    UnexpectedToken { found: String, index: usize },
    /// An object member key was not followed by `:`.
    MissingColon { found: String, index: usize },
    /// Two members/values without a separating `,`.
    MissingComma { found: String, index: usize },
    /// A `,` directly before a closing `}`/`]`.
    TrailingComma { index: usize },
    /// An object member key that is not a string.
    ExpectedString { found: String, index: usize },
    /// A closer that does not match the innermost open bracket.
    MismatchedBracket { found: String, index: usize },
    /// A closer with no open bracket, or end of input inside an open one.
    UnbalancedBrackets { index: usize },
    /// A token after the single top-level value.
    TrailingData { found: String, index: usize },
    /// The stream holds no value at all.
    EmptyInput,
    /// Nesting exceeded [`ValidateOptions::max_depth`].
    MaxDepthExceeded { limit: usize, index: usize },
    /// Strict profile only: the top-level value is not an object or array.
    DocumentNotContainer { found: String, index: usize },
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, index } => {
                write!(f, "unexpected token {found} at token {index}")
            }
            Self::MissingColon { found, index } => {
                write!(f, "expected ':' after object key, got {found} at token {index}")
            }
            Self::MissingComma { found, index } => {
                write!(f, "expected ',' or closing bracket, got {found} at token {index}")
            }
            Self::TrailingComma { index } => {
                write!(f, "trailing comma before closing bracket at token {index}")
            }
            Self::ExpectedString { found, index } => {
                write!(f, "expected string key, got {found} at token {index}")
            }
            Self::MismatchedBracket { found, index } => {
                write!(f, "closing {found} does not match open bracket at token {index}")
            }
            Self::UnbalancedBrackets { index } => {
                write!(f, "unbalanced brackets at token {index}")
            }
            Self::TrailingData { found, index } => {
                write!(f, "trailing data {found} after top-level value at token {index}")
            }
            Self::EmptyInput => write!(f, "input holds no JSON value"),
            Self::MaxDepthExceeded { limit, index } => {
                write!(f, "nesting deeper than {limit} at token {index}")
            }
            Self::DocumentNotContainer { found, index } => {
                write!(
                    f,
                    "top-level value must be an object or array, got {found} at token {index}"
                )
            }
        }
    }
}

/// One open bracket on the nesting stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Brace,
    Square,
}

/// What the grammar allows at the current cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// A value must come next: top level, after `:`, or after `,` in an
    /// array.
    Value,
    /// Right after `[`: a value or an immediate `]` (empty array).
    ValueOrArrayClose,
    /// After `,` in an object: a member key must follow.
    MemberKey,
    /// Right after `{`: a member key or an immediate `}` (empty object).
    MemberKeyOrObjectClose,
    /// After a member key: `:` must follow.
    Colon,
    /// After a member value: `,` or `}`.
    CommaOrObjectClose,
    /// After an array element: `,` or `]`.
    CommaOrArrayClose,
    /// The top-level value is complete; only `EndOfInput` may follow.
    Done,
}

/// Cursor + bracket stack over one token stream. Freshly built per
/// validation call; nothing is shared across calls.
struct Validator<'a> {
    tokens: &'a TokenStream,
    cursor: usize,
    stack: Vec<Bracket>,
    options: ValidateOptions,
}

impl<'a> Validator<'a> {
    fn new(tokens: &'a TokenStream, options: ValidateOptions) -> Self {
        Self {
            tokens,
            cursor: 0,
            stack: Vec::new(),
            options,
        }
    }

    fn run(mut self) -> Result<(), ParseError> {
        let first = self.tokens.get(0);
        if matches!(first, Token::EndOfInput) {
            return Err(ParseError::EmptyInput);
        }
        if self.options.require_container
            && !matches!(first, Token::LeftBrace | Token::LeftBracket)
        {
            return Err(ParseError::DocumentNotContainer {
                found: first.to_string(),
                index: 0,
            });
        }

        let mut state = State::Value;
        loop {
            let token = self.tokens.get(self.cursor);
            state = match state {
                State::Value => self.on_value(token, false)?,
                State::ValueOrArrayClose => self.on_value(token, true)?,
                State::MemberKey => self.on_member_key(token, false)?,
                State::MemberKeyOrObjectClose => self.on_member_key(token, true)?,
                State::Colon => self.on_colon(token)?,
                State::CommaOrObjectClose => self.on_comma_or_close(token, Bracket::Brace)?,
                State::CommaOrArrayClose => self.on_comma_or_close(token, Bracket::Square)?,
                State::Done => {
                    return match token {
                        Token::EndOfInput => {
                            debug_assert!(self.stack.is_empty());
                            Ok(())
                        }
                        other => Err(ParseError::TrailingData {
                            found: other.to_string(),
                            index: self.cursor,
                        }),
                    };
                }
            };
            self.cursor += 1;
        }
    }

    /// State after a complete value, decided by the innermost open bracket.
    fn after_value(&self) -> State {
        match self.stack.last() {
            None => State::Done,
            Some(Bracket::Brace) => State::CommaOrObjectClose,
            Some(Bracket::Square) => State::CommaOrArrayClose,
        }
    }

    fn push(&mut self, bracket: Bracket) -> Result<(), ParseError> {
        if self.stack.len() >= self.options.max_depth {
            return Err(ParseError::MaxDepthExceeded {
                limit: self.options.max_depth,
                index: self.cursor,
            });
        }
        self.stack.push(bracket);
        Ok(())
    }

    /// Pops the innermost bracket, which must match `expected`.
    fn close(&mut self, expected: Bracket, found: &Token) -> Result<(), ParseError> {
        match self.stack.pop() {
            Some(open) if open == expected => Ok(()),
            Some(_) => Err(ParseError::MismatchedBracket {
                found: found.to_string(),
                index: self.cursor,
            }),
            None => Err(ParseError::UnbalancedBrackets { index: self.cursor }),
        }
    }

    fn on_value(&mut self, token: &Token, array_may_close: bool) -> Result<State, ParseError> {
        match token {
            Token::String(_) | Token::Number(_) | Token::True | Token::False | Token::Null => {
                Ok(self.after_value())
            }
            Token::LeftBrace => {
                self.push(Bracket::Brace)?;
                Ok(State::MemberKeyOrObjectClose)
            }
            Token::LeftBracket => {
                self.push(Bracket::Square)?;
                Ok(State::ValueOrArrayClose)
            }
            Token::RightBracket if array_may_close => {
                self.close(Bracket::Square, token)?;
                Ok(self.after_value())
            }
            // A `]` where a value is required: after a comma in an array it
            // names the trailing comma; inside an object it is a mismatched
            // closer; at top level nothing is open.
            Token::RightBracket => match self.stack.last() {
                Some(Bracket::Square) => Err(ParseError::TrailingComma { index: self.cursor }),
                Some(Bracket::Brace) => Err(ParseError::MismatchedBracket {
                    found: token.to_string(),
                    index: self.cursor,
                }),
                None => Err(ParseError::UnbalancedBrackets { index: self.cursor }),
            },
            Token::RightBrace => match self.stack.last() {
                // `{"k":}` — the member value is simply missing.
                Some(Bracket::Brace) => Err(ParseError::UnexpectedToken {
                    found: token.to_string(),
                    index: self.cursor,
                }),
                Some(Bracket::Square) => Err(ParseError::MismatchedBracket {
                    found: token.to_string(),
                    index: self.cursor,
                }),
                None => Err(ParseError::UnbalancedBrackets { index: self.cursor }),
            },
            Token::EndOfInput => {
                // A value was promised; the only way to get here with an
                // empty stack was caught by the EmptyInput pre-check.
                Err(ParseError::UnbalancedBrackets { index: self.cursor })
            }
            // Covers `[1,,2]`, `[,1]`, stray `:` and friends.
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                index: self.cursor,
            }),
        }
    }

    fn on_member_key(&mut self, token: &Token, object_may_close: bool) -> Result<State, ParseError> {
        match token {
            Token::String(_) => Ok(State::Colon),
            Token::RightBrace if object_may_close => {
                self.close(Bracket::Brace, token)?;
                Ok(self.after_value())
            }
            Token::RightBrace => Err(ParseError::TrailingComma { index: self.cursor }),
            Token::RightBracket => Err(ParseError::MismatchedBracket {
                found: token.to_string(),
                index: self.cursor,
            }),
            Token::EndOfInput => Err(ParseError::UnbalancedBrackets { index: self.cursor }),
            other => Err(ParseError::ExpectedString {
                found: other.to_string(),
                index: self.cursor,
            }),
        }
    }

    fn on_colon(&mut self, token: &Token) -> Result<State, ParseError> {
        match token {
            Token::Colon => Ok(State::Value),
            Token::EndOfInput => Err(ParseError::UnbalancedBrackets { index: self.cursor }),
            other => Err(ParseError::MissingColon {
                found: other.to_string(),
                index: self.cursor,
            }),
        }
    }

    fn on_comma_or_close(&mut self, token: &Token, open: Bracket) -> Result<State, ParseError> {
        match token {
            Token::Comma => Ok(match open {
                Bracket::Brace => State::MemberKey,
                Bracket::Square => State::Value,
            }),
            Token::RightBrace if open == Bracket::Brace => {
                self.close(Bracket::Brace, token)?;
                Ok(self.after_value())
            }
            Token::RightBracket if open == Bracket::Square => {
                self.close(Bracket::Square, token)?;
                Ok(self.after_value())
            }
            Token::RightBrace | Token::RightBracket => Err(ParseError::MismatchedBracket {
                found: token.to_string(),
                index: self.cursor,
            }),
            Token::EndOfInput => Err(ParseError::UnbalancedBrackets { index: self.cursor }),
            other => Err(ParseError::MissingComma {
                found: other.to_string(),
                index: self.cursor,
            }),
        }
    }
}

/// Validate a token stream against the JSON grammar with default options.
///
/// The stream is only read, never mutated; validating the same stream twice
/// yields the same result.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first grammatical violation.
pub fn validate(tokens: &TokenStream) -> Result<(), ParseError> {
    validate_with(tokens, ValidateOptions::default())
}

/// Validate a token stream with explicit [`ValidateOptions`].
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first grammatical violation.
pub fn validate_with(tokens: &TokenStream, options: ValidateOptions) -> Result<(), ParseError> {
    Validator::new(tokens, options).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn check(input: &str) -> Result<(), ParseError> {
        let stream = tokenize(input.as_bytes()).expect("input should tokenize");
        validate(&stream)
    }

    #[test]
    fn accepts_simple_object() {
        assert_eq!(check(r#"{"key":"value"}"#), Ok(()));
    }

    #[test]
    fn accepts_empty_containers() {
        assert_eq!(check("{}"), Ok(()));
        assert_eq!(check("[]"), Ok(()));
        assert_eq!(check("[[]]"), Ok(()));
        assert_eq!(check(r#"{"empty":{}}"#), Ok(()));
    }

    #[test]
    fn accepts_bare_scalars() {
        for input in [r#""value""#, "42", "-3.5e2", "true", "false", "null"] {
            assert_eq!(check(input), Ok(()), "case: {input}");
        }
    }

    #[test]
    fn accepts_nested_structures() {
        assert_eq!(
            check(r#"{"arr":[{"nested":"jee"}, { "another" : "val" }]}"#),
            Ok(())
        );
        assert_eq!(check(r#"[[[[["deep"]]]]]"#), Ok(()));
        assert_eq!(check(r#"{"a": {"b": {"c": [1, [2, [3]]]}}}"#), Ok(()));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(check(""), Err(ParseError::EmptyInput));
        assert_eq!(check("  \n\t "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn rejects_trailing_comma() {
        assert!(matches!(
            check(r#"["extra comma",]"#),
            Err(ParseError::TrailingComma { .. })
        ));
        assert!(matches!(
            check(r#"{"k":1,}"#),
            Err(ParseError::TrailingComma { .. })
        ));
        assert!(matches!(
            check("[1, 2, 3,]"),
            Err(ParseError::TrailingComma { .. })
        ));
    }

    #[test]
    fn rejects_double_comma() {
        assert!(matches!(
            check("[1,,2]"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            check(r#"[ , "x"]"#),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn rejects_missing_member_value() {
        assert!(matches!(
            check(r#"{"k":}"#),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn rejects_non_string_key() {
        assert!(matches!(
            check(r#"{1:"x"}"#),
            Err(ParseError::ExpectedString { .. })
        ));
        assert!(matches!(
            check(r#"{true:1}"#),
            Err(ParseError::ExpectedString { .. })
        ));
        assert!(matches!(
            check(r#"{"a":1, 2:3}"#),
            Err(ParseError::ExpectedString { .. })
        ));
    }

    #[test]
    fn rejects_missing_colon() {
        assert!(matches!(
            check(r#"{"k" 1}"#),
            Err(ParseError::MissingColon { .. })
        ));
        assert!(matches!(
            check(r#"{"k"}"#),
            Err(ParseError::MissingColon { .. })
        ));
    }

    #[test]
    fn rejects_missing_comma() {
        assert!(matches!(
            check("[1 2]"),
            Err(ParseError::MissingComma { .. })
        ));
        assert!(matches!(
            check(r#"{"a":1 "b":2}"#),
            Err(ParseError::MissingComma { .. })
        ));
    }

    #[test]
    fn rejects_mismatched_brackets() {
        assert!(matches!(
            check("[1}"),
            Err(ParseError::MismatchedBracket { .. })
        ));
        assert!(matches!(
            check(r#"{"a":1]"#),
            Err(ParseError::MismatchedBracket { .. })
        ));
        assert!(matches!(
            check("{]"),
            Err(ParseError::MismatchedBracket { .. })
        ));
        assert!(matches!(
            check(r#"{"k":]"#),
            Err(ParseError::MismatchedBracket { .. })
        ));
    }

    #[test]
    fn rejects_unbalanced_brackets() {
        for input in ["[", "[[]", r#"{"a":1"#, "]", "}", "[1,", r#"{"k""#] {
            assert!(
                matches!(check(input), Err(ParseError::UnbalancedBrackets { .. })),
                "case: {input}"
            );
        }
    }

    #[test]
    fn rejects_trailing_data() {
        assert!(matches!(
            check(r#"{"k": true} "trailing""#),
            Err(ParseError::TrailingData { .. })
        ));
        assert!(matches!(
            check("1 2"),
            Err(ParseError::TrailingData { .. })
        ));
        assert!(matches!(
            check("{} {}"),
            Err(ParseError::TrailingData { .. })
        ));
        assert!(matches!(
            check("[]]"),
            Err(ParseError::TrailingData { .. })
        ));
    }

    #[test]
    fn depth_cap() {
        let options = ValidateOptions {
            max_depth: 3,
            ..ValidateOptions::default()
        };
        let shallow = tokenize(b"[[1]]").unwrap();
        assert_eq!(validate_with(&shallow, options), Ok(()));

        let deep = tokenize(b"[[[[1]]]]").unwrap();
        assert_eq!(
            validate_with(&deep, options),
            Err(ParseError::MaxDepthExceeded { limit: 3, index: 3 })
        );
    }

    #[test]
    fn strict_profile_requires_container() {
        let options = ValidateOptions {
            require_container: true,
            ..ValidateOptions::default()
        };
        let scalar = tokenize(b"42").unwrap();
        assert!(matches!(
            validate_with(&scalar, options),
            Err(ParseError::DocumentNotContainer { .. })
        ));

        let object = tokenize(br#"{"k":1}"#).unwrap();
        assert_eq!(validate_with(&object, options), Ok(()));
        let array = tokenize(b"[1]").unwrap();
        assert_eq!(validate_with(&array, options), Ok(()));
    }

    #[test]
    fn validation_is_idempotent() {
        let stream = tokenize(br#"{"a":[1,2],"b":{"c":true}}"#).unwrap();
        let first = validate(&stream);
        let second = validate(&stream);
        assert_eq!(first, second);
        assert_eq!(first, Ok(()));

        let bad = tokenize(b"[1,]").unwrap();
        assert_eq!(validate(&bad), validate(&bad));
    }

    #[test]
    fn accepted_inputs_have_balanced_brackets() {
        let inputs = [
            r#"{"a":[1,2],"b":{"c":[true,[null]]}}"#,
            "[[[[[1]]]]]",
            r#"{"x":{},"y":[[]]}"#,
        ];
        for input in &inputs {
            let stream = tokenize(input.as_bytes()).unwrap();
            assert_eq!(validate(&stream), Ok(()), "case: {input}");

            let opens = stream
                .iter()
                .filter(|t| matches!(t, Token::LeftBrace | Token::LeftBracket))
                .count();
            let closes = stream
                .iter()
                .filter(|t| matches!(t, Token::RightBrace | Token::RightBracket))
                .count();
            assert_eq!(opens, closes, "case: {input}");
        }
    }
}
