/// Kind of a tokenized JSON item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Object,
    Array,
    String,
    /// `true`, `false`, `null` or any number.
    Primitive,
}

/// A descriptor of one JSON item, referring to a byte range of the input
/// buffer. Tokens own nothing; slicing the input with [`Token::span`] yields
/// the item's source bytes.
///
/// Boundaries:
///
/// - `end` is exclusive everywhere.
/// - String tokens exclude both quotes: `start` is the byte after the opening
///   `"`, `end` is the byte of the closing `"`.
/// - Container tokens include their delimiters: `start` at the `{`/`[`, `end`
///   one past the matching `}`/`]`.
/// - Primitive tokens cover the exact literal bytes, with no trailing
///   whitespace or delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Start offset into the input buffer.
    pub start: usize,
    /// End offset, exclusive.
    pub end: usize,
    /// Pair count for objects, element count for arrays, 0 otherwise.
    pub size: usize,
    /// Index of the enclosing container token, `None` at the root.
    #[cfg(feature = "parent-links")]
    pub parent: Option<usize>,
}

impl Token {
    /// The input bytes this token refers to.
    ///
    /// # Panics
    ///
    /// Panics if the token's range does not lie inside `json`. Tokens from a
    /// successful parse of `json` always do.
    #[must_use]
    pub fn span<'a>(&self, json: &'a [u8]) -> &'a [u8] {
        &json[self.start..self.end]
    }

    /// Byte length of the token's span.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Default for Token {
    /// A placeholder slot value; the parser overwrites every slot it reports
    /// in its returned count.
    fn default() -> Self {
        Token {
            kind: TokenKind::Primitive,
            start: 0,
            end: 0,
            size: 0,
            #[cfg(feature = "parent-links")]
            parent: None,
        }
    }
}
