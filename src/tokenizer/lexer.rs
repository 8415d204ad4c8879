//! # JSON Lexer
//!
//! Converts an input slice of bytes from a JSON document into a
//! [`TokenStream`] in a single left-to-right pass, enforcing the full RFC
//! 8259 lexical grammar (string escapes, number syntax, keyword literals).
//! Any lexical violation aborts tokenization immediately; no partial stream
//! is ever returned.
use crate::tokenizer::{Token, TokenStream};
use std::error::Error;
use std::fmt;

/// Represents a lexical violation found while tokenizing.
///
/// Every variant carries the byte offset at which the violation was
/// detected, so diagnostics can point at the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A byte that cannot begin or extend any token.
    UnexpectedCharacter { byte: u8, offset: usize },
    /// End of input reached before a string's closing quote.
    UnterminatedString { offset: usize },
    /// A `\` followed by a character that is not a recognized escape.
    InvalidEscape { byte: u8, offset: usize },
    /// A raw (unescaped) control byte (< 0x20) inside a string.
    ControlCharacterInString { byte: u8, offset: usize },
    /// String content that is not well-formed UTF-8.
    InvalidUtf8 { offset: usize },
    /// An alphabetic run that is not exactly `true`, `false`, or `null`.
    InvalidLiteral { found: String, offset: usize },
    /// A `0` immediately followed by another digit.
    LeadingZero { offset: usize },
    /// A `0x`/`0X` prefix where JSON allows only decimal.
    HexNotAllowed { offset: usize },
    /// An exponent marker with no digits after it.
    MalformedExponent { offset: usize },
}

impl Error for LexError {}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter { byte, offset } => {
                write!(f, "unexpected character 0x{byte:02x} at byte {offset}")
            }
            Self::UnterminatedString { offset } => {
                write!(f, "unterminated string starting at byte {offset}")
            }
            Self::InvalidEscape { byte, offset } => {
                write!(f, "invalid escape '\\{}' at byte {offset}", char::from(*byte))
            }
            Self::ControlCharacterInString { byte, offset } => {
                write!(
                    f,
                    "unescaped control character 0x{byte:02x} in string at byte {offset}"
                )
            }
            Self::InvalidUtf8 { offset } => {
                write!(f, "malformed UTF-8 in string at byte {offset}")
            }
            Self::InvalidLiteral { found, offset } => {
                write!(f, "invalid literal '{found}' at byte {offset}")
            }
            Self::LeadingZero { offset } => {
                write!(f, "number has a leading zero at byte {offset}")
            }
            Self::HexNotAllowed { offset } => {
                write!(f, "hexadecimal numbers are not allowed (byte {offset})")
            }
            Self::MalformedExponent { offset } => {
                write!(f, "exponent has no digits at byte {offset}")
            }
        }
    }
}

/// A lexer that turns an input slice of bytes from a JSON document into
/// tokens.
struct Lexer<'a> {
    /// The input sequence of bytes to tokenize
    input: &'a [u8],
    /// Current position (current byte)
    position: usize,
    /// Current reading position (after current byte)
    read_position: usize,
    /// Current byte under examination (0 at end of input)
    byte: u8,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a [u8]) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            byte: 0,
        };
        // put the lexer in an initial working state
        lexer.read_byte();
        lexer
    }

    /// Reads and consumes the next byte in the input sequence.
    fn read_byte(&mut self) {
        if self.read_position >= self.input.len() {
            self.byte = 0;
        } else {
            self.byte = self.input[self.read_position];
        }
        // Advance the positions
        self.position = self.read_position;
        self.read_position += 1;
    }

    /// Whether the cursor has run past the last input byte. `self.byte` is 0
    /// both here and on a literal NUL byte, so the two must be told apart.
    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Consume whitespace byte(s) starting from the current position.
    fn skip_whitespace(&mut self) {
        while !self.at_end() && matches!(self.byte, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_byte();
        }
    }

    /// Returns the next token in the input sequence from the current
    /// position, or the lexical error that prevents one.
    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        if self.at_end() {
            return Ok(Token::EndOfInput);
        }

        match self.byte {
            b'{' => {
                self.read_byte();
                Ok(Token::LeftBrace)
            }
            b'}' => {
                self.read_byte();
                Ok(Token::RightBrace)
            }
            b'[' => {
                self.read_byte();
                Ok(Token::LeftBracket)
            }
            b']' => {
                self.read_byte();
                Ok(Token::RightBracket)
            }
            b':' => {
                self.read_byte();
                Ok(Token::Colon)
            }
            b',' => {
                self.read_byte();
                Ok(Token::Comma)
            }
            b'"' => self.read_string(),
            b'-' | b'0'..=b'9' => self.read_number(),
            b't' | b'f' | b'n' => self.read_literal(),
            other => Err(LexError::UnexpectedCharacter {
                byte: other,
                offset: self.position,
            }),
        }
    }

    /// Reads a keyword literal (`true`/`false`/`null`) and returns the
    /// corresponding token. The whole alphabetic run must match exactly, so
    /// `truthy` or `nul` fail here rather than leaking a prefix.
    fn read_literal(&mut self) -> Result<Token, LexError> {
        let start_pos = self.position;
        while !self.at_end() && self.byte.is_ascii_alphabetic() {
            self.read_byte();
        }
        let slice = &self.input[start_pos..self.position];
        match slice {
            b"true" => Ok(Token::True),
            b"false" => Ok(Token::False),
            b"null" => Ok(Token::Null),
            _ => Err(LexError::InvalidLiteral {
                found: String::from_utf8_lossy(slice).into_owned(),
                offset: start_pos,
            }),
        }
    }

    /// Reads a string token, validating escape sequences and control-byte
    /// rules. The returned payload is the raw (still-escaped) text between
    /// the quotes.
    fn read_string(&mut self) -> Result<Token, LexError> {
        let quote_pos = self.position;
        // Skip opening quote
        self.read_byte();
        let start_pos = self.position;

        loop {
            if self.at_end() {
                return Err(LexError::UnterminatedString { offset: quote_pos });
            }
            match self.byte {
                b'"' => break,
                b'\\' => {
                    self.read_byte();
                    self.read_escape(quote_pos)?;
                }
                // Raw tab counts too; the escaped form `\t` is handled above.
                b if b < 0x20 => {
                    return Err(LexError::ControlCharacterInString {
                        byte: b,
                        offset: self.position,
                    });
                }
                // Bytes >= 0x80 pass through here; multi-byte sequences are
                // checked wholesale below since no continuation byte can
                // collide with quote, backslash, or a control byte.
                _ => self.read_byte(),
            }
        }

        let end_pos = self.position;
        // Skip closing quote
        self.read_byte();

        let payload = std::str::from_utf8(&self.input[start_pos..end_pos])
            .map_err(|e| LexError::InvalidUtf8 {
                offset: start_pos + e.valid_up_to(),
            })?;
        Ok(Token::String(payload.to_owned()))
    }

    /// Validates one escape sequence with the cursor on the byte after the
    /// backslash, consuming it (and the 4 hex digits of a `\u` escape).
    fn read_escape(&mut self, quote_pos: usize) -> Result<(), LexError> {
        if self.at_end() {
            return Err(LexError::UnterminatedString { offset: quote_pos });
        }
        match self.byte {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
                self.read_byte();
                Ok(())
            }
            b'u' => {
                self.read_byte();
                for _ in 0..4 {
                    if self.at_end() {
                        return Err(LexError::UnterminatedString { offset: quote_pos });
                    }
                    if !self.byte.is_ascii_hexdigit() {
                        return Err(LexError::InvalidEscape {
                            byte: self.byte,
                            offset: self.position,
                        });
                    }
                    self.read_byte();
                }
                Ok(())
            }
            other => Err(LexError::InvalidEscape {
                byte: other,
                offset: self.position,
            }),
        }
    }

    /// Reads a JSON number (int, frac, exp) and returns a Number token with
    /// the verbatim literal text. The token ends at the first byte that
    /// cannot extend it; that byte is not consumed.
    fn read_number(&mut self) -> Result<Token, LexError> {
        let start_pos = self.position;

        // optional leading '-'
        if self.byte == b'-' {
            self.read_byte();
            if self.at_end() || !self.byte.is_ascii_digit() {
                return Err(LexError::UnexpectedCharacter {
                    byte: self.byte,
                    offset: self.position,
                });
            }
        }

        // integer part: a single '0', or a nonzero digit then any digits
        if self.byte == b'0' {
            self.read_byte();
            if !self.at_end() {
                if matches!(self.byte, b'x' | b'X') {
                    return Err(LexError::HexNotAllowed { offset: start_pos });
                }
                if self.byte.is_ascii_digit() {
                    return Err(LexError::LeadingZero { offset: start_pos });
                }
            }
        } else {
            while !self.at_end() && self.byte.is_ascii_digit() {
                self.read_byte();
            }
        }

        // fractional part: '.' requires at least one digit after it
        if !self.at_end() && self.byte == b'.' {
            self.read_byte();
            if self.at_end() || !self.byte.is_ascii_digit() {
                return Err(LexError::UnexpectedCharacter {
                    byte: self.byte,
                    offset: self.position,
                });
            }
            while !self.at_end() && self.byte.is_ascii_digit() {
                self.read_byte();
            }
        }

        // exponent part: 'e'/'E', optional sign, at least one digit
        if !self.at_end() && matches!(self.byte, b'e' | b'E') {
            let exp_pos = self.position;
            self.read_byte();
            if !self.at_end() && matches!(self.byte, b'+' | b'-') {
                self.read_byte();
            }
            if self.at_end() || !self.byte.is_ascii_digit() {
                return Err(LexError::MalformedExponent { offset: exp_pos });
            }
            while !self.at_end() && self.byte.is_ascii_digit() {
                self.read_byte();
            }
        }

        let text = String::from_utf8_lossy(&self.input[start_pos..self.position]);
        Ok(Token::Number(text.into_owned()))
    }
}

/// Tokenize a JSON document from bytes into a [`TokenStream`].
///
/// Single pass, fail-fast: the first lexical violation aborts the whole
/// operation and no partial stream is returned. On success the stream is
/// terminated by exactly one [`Token::EndOfInput`].
///
/// # Errors
///
/// Returns a [`LexError`] describing the first lexical violation found.
pub fn tokenize(input: &[u8]) -> Result<TokenStream, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens: Vec<Token> = vec![];

    loop {
        let token = lexer.next_token()?;
        let done = matches!(token, Token::EndOfInput);

        tokens.push(token);

        if done {
            break;
        }
    }

    Ok(TokenStream::new(tokens))
}
