//! Read-side helpers over a finished token array.
//!
//! Everything here is allocation-free and operates on the caller's input
//! buffer plus the token slice a successful parse produced (truncated to the
//! returned count). Lookups return `Option<usize>` token indices; decoders
//! return [`DecodeError`] on failure.

use crate::{
    error::DecodeError,
    token::{Token, TokenKind},
};

/// One step of a [`path`] traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathItem<'a> {
    /// Object key lookup.
    Key(&'a str),
    /// Array element lookup, 0-based.
    Index(usize),
}

/// `true` when the token's span equals `expect` byte-for-byte.
///
/// Escapes are not decoded; compare against the raw source text.
#[must_use]
pub fn token_eq(json: &[u8], token: &Token, expect: &str) -> bool {
    token.span(json) == expect.as_bytes()
}

/// Index one past the subtree rooted at `i`: the next sibling when there is
/// one, `tokens.len()` otherwise.
///
/// Non-recursive. A descent stack would only ever hold child counts, so a
/// single pending-children counter replaces it and the walk runs in O(1)
/// memory at any nesting depth.
#[must_use]
pub fn skip(tokens: &[Token], i: usize) -> usize {
    if i >= tokens.len() {
        return tokens.len();
    }
    let mut at = i;
    let mut pending = 1usize;
    while pending > 0 && at < tokens.len() {
        pending -= 1;
        pending += match tokens[at].kind {
            TokenKind::Object => tokens[at].size * 2,
            TokenKind::Array => tokens[at].size,
            TokenKind::String | TokenKind::Primitive => 0,
        };
        at += 1;
    }
    at
}

/// Token index of element `idx` of the array token at `arr`.
#[must_use]
pub fn array_at(tokens: &[Token], arr: usize, idx: usize) -> Option<usize> {
    let t = tokens.get(arr)?;
    if t.kind != TokenKind::Array || idx >= t.size {
        return None;
    }
    let mut at = arr + 1;
    for _ in 0..idx {
        at = skip(tokens, at);
    }
    (at < tokens.len()).then_some(at)
}

/// Token index of the value for `key` in the object token at `obj`.
///
/// Keys are matched against their raw source bytes, so a key that needs
/// escape decoding will not match its decoded form.
#[must_use]
pub fn object_get(json: &[u8], tokens: &[Token], obj: usize, key: &str) -> Option<usize> {
    let t = tokens.get(obj)?;
    if t.kind != TokenKind::Object {
        return None;
    }
    let mut at = obj + 1;
    for _ in 0..t.size {
        let k = at;
        let v = k + 1;
        if v >= tokens.len() {
            return None;
        }
        if tokens[k].kind == TokenKind::String && token_eq(json, &tokens[k], key) {
            return Some(v);
        }
        at = skip(tokens, v);
    }
    None
}

/// Walks `steps` down from `root`, resolving keys in objects and indices in
/// arrays, and returns the final token index. A step that does not match the
/// kind of the token it lands on resolves to `None`.
#[must_use]
pub fn path(json: &[u8], tokens: &[Token], root: usize, steps: &[PathItem<'_>]) -> Option<usize> {
    let mut at = root;
    for step in steps {
        at = match (tokens.get(at)?.kind, step) {
            (TokenKind::Object, PathItem::Key(key)) => object_get(json, tokens, at, key)?,
            (TokenKind::Array, PathItem::Index(idx)) => array_at(tokens, at, *idx)?,
            _ => return None,
        };
    }
    (at < tokens.len()).then_some(at)
}

/// Decodes a primitive token as a base-10 integer.
///
/// Overflow is detected and reported; fractional and exponent forms are
/// [`DecodeError::Malformed`].
pub fn parse_i64(json: &[u8], token: &Token) -> Result<i64, DecodeError> {
    if token.kind != TokenKind::Primitive {
        return Err(DecodeError::WrongKind);
    }
    let text = token.span(json);
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text),
    };
    if digits.is_empty() {
        return Err(DecodeError::Malformed);
    }
    // Accumulate negated so that i64::MIN itself decodes.
    let mut value: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(DecodeError::Malformed);
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_sub(i64::from(b - b'0')))
            .ok_or(DecodeError::Overflow)?;
    }
    if negative {
        Ok(value)
    } else {
        value.checked_neg().ok_or(DecodeError::Overflow)
    }
}

/// Decodes a primitive token as `true` or `false`. `null` and numbers are
/// [`DecodeError::Malformed`].
pub fn parse_bool(json: &[u8], token: &Token) -> Result<bool, DecodeError> {
    if token.kind != TokenKind::Primitive {
        return Err(DecodeError::WrongKind);
    }
    match token.span(json) {
        b"true" => Ok(true),
        b"false" => Ok(false),
        _ => Err(DecodeError::Malformed),
    }
}

/// Decodes a string token's escapes into `out` and returns the written
/// prefix.
///
/// Each `\uXXXX` escape is encoded as UTF-8 on its own; surrogate halves
/// are not combined, matching the tokenizer's hex-digits-only validation,
/// so output containing lone surrogates is not valid UTF-8.
pub fn unescape<'a>(
    json: &[u8],
    token: &Token,
    out: &'a mut [u8],
) -> Result<&'a [u8], DecodeError> {
    if token.kind != TokenKind::String {
        return Err(DecodeError::WrongKind);
    }
    let text = token.span(json);
    let mut r = 0;
    let mut w = 0;
    while r < text.len() {
        let b = text[r];
        if b != b'\\' {
            push(out, &mut w, b)?;
            r += 1;
            continue;
        }
        r += 1;
        let &esc = text.get(r).ok_or(DecodeError::Malformed)?;
        r += 1;
        match esc {
            b'"' | b'\\' | b'/' => push(out, &mut w, esc)?,
            b'b' => push(out, &mut w, 0x08)?,
            b'f' => push(out, &mut w, 0x0C)?,
            b'n' => push(out, &mut w, b'\n')?,
            b'r' => push(out, &mut w, b'\r')?,
            b't' => push(out, &mut w, b'\t')?,
            b'u' => {
                let hex = text.get(r..r + 4).ok_or(DecodeError::Malformed)?;
                let mut code: u32 = 0;
                for &h in hex {
                    code = (code << 4) | u32::from(hex_val(h).ok_or(DecodeError::Malformed)?);
                }
                r += 4;
                // Minimal UTF-8; BMP code points take at most three bytes.
                if code <= 0x7F {
                    push(out, &mut w, code as u8)?;
                } else if code <= 0x7FF {
                    push(out, &mut w, 0xC0 | (code >> 6) as u8)?;
                    push(out, &mut w, 0x80 | (code & 0x3F) as u8)?;
                } else {
                    push(out, &mut w, 0xE0 | (code >> 12) as u8)?;
                    push(out, &mut w, 0x80 | ((code >> 6) & 0x3F) as u8)?;
                    push(out, &mut w, 0x80 | (code & 0x3F) as u8)?;
                }
            }
            _ => return Err(DecodeError::Malformed),
        }
    }
    Ok(&out[..w])
}

fn push(out: &mut [u8], w: &mut usize, b: u8) -> Result<(), DecodeError> {
    let slot = out.get_mut(*w).ok_or(DecodeError::NoSpace)?;
    *slot = b;
    *w += 1;
    Ok(())
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
