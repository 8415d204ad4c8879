//! # JSON Token
//!
//! Defines the lexical tokens produced from a JSON byte sequence, and the
//! [`TokenStream`] the structural validator consumes.
use std::fmt::Display;

/// A single lexical unit of a JSON document.
#[derive(Debug, PartialEq, Clone, Eq)]
pub enum Token {
    /* Delimiters */
    /// Opening curly brace
    LeftBrace,

    /// Closing curly brace
    RightBrace,

    /// Opening square bracket
    LeftBracket,

    /// Closing square bracket
    RightBracket,

    /// Colon character
    Colon,

    /// Comma character
    Comma,

    /* Values */
    /// String value; payload is the still-escaped text between the quotes.
    String(String),

    /// Numeric value; payload is the verbatim literal text.
    Number(String),

    /// `true` literal
    True,

    /// `false` literal
    False,

    /// `null` literal
    Null,

    /* Terminator */
    /// End of input marker; appears exactly once, last.
    EndOfInput,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::String(s) => write!(f, "\"{s}\""),
            Token::Number(n) => write!(f, "{n}"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::EndOfInput => write!(f, "<end of input>"),
        }
    }
}

/// The complete, ordered output of tokenizing one input.
///
/// Produced once by [`tokenize`](crate::tokenizer::tokenize) and read-only
/// thereafter. Always terminated by exactly one [`Token::EndOfInput`].
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Invariant: `tokens` ends with exactly one `EndOfInput`.
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        debug_assert_eq!(tokens.last(), Some(&Token::EndOfInput));
        Self { tokens }
    }

    /// Returns the token at `index`, or [`Token::EndOfInput`] if `index` is
    /// past the end. The terminator makes out-of-range reads harmless for a
    /// cursor that stops at `EndOfInput`.
    #[must_use]
    pub fn get(&self, index: usize) -> &Token {
        self.tokens.get(index).unwrap_or(&Token::EndOfInput)
    }

    /// Number of tokens, including the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A well-formed stream is never empty (the terminator is always
    /// present); provided as the conventional pair to [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
