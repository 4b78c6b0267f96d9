use thiserror::Error;

/// Parse failure codes. Every variant carries the best-effort byte offset of
/// the failing input position.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The caller-supplied token slice filled up before the input was fully
    /// tokenized.
    #[error("token capacity exhausted at byte {pos}")]
    NoMemory { pos: usize },

    /// Grammar violation. Terminal for the parser; re-initialize before
    /// reuse.
    #[error("invalid JSON at byte {pos}")]
    Invalid { pos: usize },

    /// The input so far is a well-formed prefix; more bytes are needed. Not
    /// terminal for the session: extend the buffer and call `parse` again.
    #[error("unexpected end of input at byte {pos}")]
    Partial { pos: usize },

    /// Nesting exceeded the compile-time depth limit.
    #[error("nesting depth limit exceeded at byte {pos}")]
    Depth { pos: usize },
}

impl ParseError {
    /// The byte offset the failure was recorded at.
    #[must_use]
    pub fn pos(&self) -> usize {
        match *self {
            ParseError::NoMemory { pos }
            | ParseError::Invalid { pos }
            | ParseError::Partial { pos }
            | ParseError::Depth { pos } => pos,
        }
    }

    /// `true` for the resumable [`Partial`](ParseError::Partial) outcome.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        matches!(self, ParseError::Partial { .. })
    }
}

/// Failures of the token decoders in [`crate::nav`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The token's kind does not support the requested decode.
    #[error("token kind does not support this decode")]
    WrongKind,
    /// The token's text is not in the expected shape.
    #[error("malformed token text")]
    Malformed,
    /// The decoded integer does not fit the output type.
    #[error("integer out of range")]
    Overflow,
    /// The caller-supplied output buffer is too small.
    #[error("output buffer too small")]
    NoSpace,
}
