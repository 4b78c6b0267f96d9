use std::{vec, vec::Vec};

use crate::{ParseError, Parser, ParserOptions, Token};

/// One-shot strict parse expected to succeed; returns the used token slots.
pub fn tokenize(json: &str) -> Vec<Token> {
    tokenize_with(json, ParserOptions::default())
}

pub fn tokenize_with(json: &str, options: ParserOptions) -> Vec<Token> {
    let mut parser = Parser::new(options);
    let mut tokens = vec![Token::default(); 256];
    let used = match parser.parse(json.as_bytes(), &mut tokens) {
        Ok(used) => used,
        Err(err) => panic!("parse of {json:?} failed: {err}"),
    };
    tokens.truncate(used);
    tokens
}

/// One-shot strict parse expected to fail; returns the error.
pub fn parse_err(json: &str) -> ParseError {
    parse_err_with(json, ParserOptions::default())
}

pub fn parse_err_with(json: &str, options: ParserOptions) -> ParseError {
    let mut parser = Parser::new(options);
    let mut tokens = vec![Token::default(); 256];
    match parser.parse(json.as_bytes(), &mut tokens) {
        Ok(used) => panic!("parse of {json:?} unexpectedly produced {used} tokens"),
        Err(err) => err,
    }
}
