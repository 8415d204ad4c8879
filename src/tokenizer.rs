//! # Tokenizer/ Lexer
//!
//! Converts an input sequence of bytes from a JSON document into a token
//! stream, enforcing the lexical half of the JSON grammar.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{tokenize, LexError};
pub use token::{Token, TokenStream};
