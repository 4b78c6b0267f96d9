//! Zero-allocation, resumable JSON tokenizer and structural validator.
//!
//! `jsontape` scans a byte buffer in a single pass and fills a flat array of
//! [`Token`]s that reference byte ranges of the caller's input. Nothing is
//! decoded or allocated while parsing: strings keep their escapes, numbers
//! stay text, and the caller owns both the input buffer and the token array,
//! which makes the parser suitable for hostile input, embedded targets, and
//! streaming use. Nesting depth is bounded at compile time, so memory use is
//! fully predictable.
//!
//! The parser is resumable. When the buffer ends mid-value, `parse` returns
//! [`ParseError::Partial`]; calling again with the same buffer grown by more
//! bytes picks up exactly where the previous call left off and produces the
//! same tokens as a one-shot parse of the full input. Passing no token array
//! ([`Parser::count`]) runs the identical grammar in count-only mode, which
//! sizes the token array for a second pass.
//!
//! ```
//! use jsontape::{Parser, ParserOptions, Token, TokenKind};
//!
//! let json = br#"{"id": 7, "tags": ["a", "b"]}"#;
//! let mut parser = Parser::new(ParserOptions::default());
//! let mut tokens = [Token::default(); 8];
//!
//! let used = parser.parse(json, &mut tokens).unwrap();
//! assert_eq!(used, 7);
//! assert_eq!(tokens[0].kind, TokenKind::Object);
//! assert_eq!(tokens[0].size, 2);
//! assert_eq!(tokens[1].span(json), b"id");
//! ```
//!
//! The [`nav`] module navigates a finished token array (key lookup, path
//! traversal, primitive decoding, string unescaping); the [`sse`] module
//! extracts `data:` payloads from a Server-Sent-Events stream with the same
//! growing-buffer discipline.

#![no_std]

#[cfg(test)]
extern crate std;

mod error;
mod frame;
mod options;
mod parser;
mod scan;
mod token;

pub mod nav;
pub mod sse;

pub use error::{DecodeError, ParseError};
pub use options::ParserOptions;
pub use parser::{Parser, ParserImpl, DEFAULT_MAX_DEPTH};
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests;
