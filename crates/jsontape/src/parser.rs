//! The resumable tokenizer driver.
//!
//! The driver reads one structural byte at a time, hands non-structural runs
//! to the recognizers in [`crate::scan`], and tracks open containers on a
//! fixed-capacity frame stack. It never recurses and never allocates: the
//! caller owns the input buffer and the token array, and memory use is
//! bounded by the compile-time nesting limit.
//!
//! Incremental parsing is expressed entirely at the call boundary. A parse
//! that runs out of input mid-value returns [`ParseError::Partial`] and
//! leaves the parser in a state indistinguishable from one that was only
//! ever shown the bytes before that value; calling again with the same
//! buffer grown by more bytes completes the parse with output identical to
//! a one-shot parse of the full input.

use crate::{
    error::ParseError,
    frame::{ContainerKind, Frame, FrameStack, SubState},
    options::ParserOptions,
    scan::{self, Scan},
    token::{Token, TokenKind},
};

/// Nesting limit of the [`Parser`] alias.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Marks a container token whose closer has not been seen yet. Containers
/// get their real `end` exactly when they close; a terminal error can leave
/// the marker visible in slots past the reported state.
const END_OPEN: usize = usize::MAX;

/// A single-pass, zero-allocation JSON tokenizer with a compile-time
/// nesting limit.
///
/// Most callers want the [`Parser`] alias. A custom limit reads
/// `ParserImpl::<16>::new(options)`.
#[derive(Debug)]
pub struct ParserImpl<const MAX_DEPTH: usize> {
    options: ParserOptions,
    /// Next byte to examine.
    pos: usize,
    /// Next token index to allocate; the final count on success.
    toknext: usize,
    /// One top-level value has been accepted.
    root_done: bool,
    stack: FrameStack<MAX_DEPTH>,
    last_error: Option<ParseError>,
}

/// The tokenizer with the default nesting limit of 64.
pub type Parser = ParserImpl<DEFAULT_MAX_DEPTH>;

impl<const MAX_DEPTH: usize> ParserImpl<MAX_DEPTH> {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        ParserImpl {
            options,
            pos: 0,
            toknext: 0,
            root_done: false,
            stack: FrameStack::new(),
            last_error: None,
        }
    }

    /// Re-initializes the parser for a new session, keeping the options.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.toknext = 0;
        self.root_done = false;
        self.stack.clear();
        self.last_error = None;
    }

    /// Current scan position: the next byte to examine.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Number of currently open containers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Tokens allocated (or, in count-only mode, counted) so far.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.toknext
    }

    /// The failure recorded by the most recent call, if any. Cleared at the
    /// top of every [`parse`](Self::parse) / [`count`](Self::count) call.
    #[must_use]
    pub fn last_error(&self) -> Option<ParseError> {
        self.last_error
    }

    /// Tokenizes `json`, writing descriptors into `tokens`, and returns the
    /// number of token slots used.
    ///
    /// After [`ParseError::Partial`] the call may be repeated with the same
    /// buffer extended by more bytes (same start, non-decreasing length);
    /// the parser resumes where it left off and the final token array is
    /// identical to a one-shot parse of the full input. All other errors are
    /// terminal: [`reset`](Self::reset) before starting over.
    ///
    /// A successful return ends the session unless
    /// [`ParserOptions::allow_multiple_json_values`] is set, in which case
    /// further calls with a longer buffer keep accepting top-level values.
    pub fn parse(&mut self, json: &[u8], tokens: &mut [Token]) -> Result<usize, ParseError> {
        self.run(json, Some(tokens))
    }

    /// Count-only mode: tokenizes `json` without writing descriptors and
    /// returns the number of tokens an equivalent [`parse`](Self::parse)
    /// would use. Grammar handling is byte-for-byte the same as in write
    /// mode, so the count is exact on every input, error paths included.
    pub fn count(&mut self, json: &[u8]) -> Result<usize, ParseError> {
        self.run(json, None)
    }

    fn run(&mut self, json: &[u8], mut tokens: Option<&mut [Token]>) -> Result<usize, ParseError> {
        self.last_error = None;

        while self.pos < json.len() {
            let c = json[self.pos];
            if scan::is_space(c) {
                self.pos += 1;
                continue;
            }
            match c {
                b'{' => self.open_container(&mut tokens, ContainerKind::Object)?,
                b'[' => self.open_container(&mut tokens, ContainerKind::Array)?,
                b'}' => self.close_container(&mut tokens, ContainerKind::Object)?,
                b']' => self.close_container(&mut tokens, ContainerKind::Array)?,
                b':' => self.colon()?,
                b',' => self.comma()?,
                b'"' => self.string_token(json, &mut tokens)?,
                _ => self.primitive_token(json, &mut tokens)?,
            }
        }

        if self.stack.depth() != 0 || !self.root_done {
            // Open containers, or no value accepted yet (empty/blank input).
            let pos = self.pos;
            return Err(self.fail(ParseError::Partial { pos }));
        }
        Ok(self.toknext)
    }

    fn fail(&mut self, err: ParseError) -> ParseError {
        self.last_error = Some(err);
        err
    }

    fn invalid(&mut self) -> ParseError {
        let pos = self.pos;
        self.fail(ParseError::Invalid { pos })
    }

    /// Token index of the innermost open container, `None` at the root or in
    /// count-only mode.
    fn parent_index(&self) -> Option<usize> {
        self.stack.top().and_then(|frame| frame.tok)
    }

    /// Allocates the next token slot, or only advances the counter when no
    /// token array was supplied. Returns the slot index in write mode.
    fn emit(
        &mut self,
        tokens: &mut Option<&mut [Token]>,
        kind: TokenKind,
        start: usize,
        end: usize,
        parent: Option<usize>,
    ) -> Result<Option<usize>, ParseError> {
        #[cfg(not(feature = "parent-links"))]
        let _ = parent;

        let Some(out) = tokens.as_deref_mut() else {
            self.toknext += 1;
            return Ok(None);
        };
        if self.toknext >= out.len() {
            let pos = self.pos;
            return Err(self.fail(ParseError::NoMemory { pos }));
        }
        let idx = self.toknext;
        out[idx] = Token {
            kind,
            start,
            end,
            size: 0,
            #[cfg(feature = "parent-links")]
            parent,
        };
        self.toknext += 1;
        Ok(Some(idx))
    }

    /// Validates that a value may appear at the current position and does
    /// the parent-side bookkeeping: size bump and sub-state transition,
    /// exactly once per accepted child.
    fn accept_value(&mut self, tokens: &mut Option<&mut [Token]>) -> Result<(), ParseError> {
        let Some(top) = self.stack.top_mut() else {
            if self.root_done && !self.options.allow_multiple_json_values {
                return Err(self.invalid());
            }
            self.root_done = true;
            return Ok(());
        };
        let accepted = match top.kind {
            ContainerKind::Array => matches!(top.sub, SubState::ValueOrEnd | SubState::Value),
            ContainerKind::Object => top.sub == SubState::Value,
        };
        if !accepted {
            return Err(self.invalid());
        }
        top.sub = SubState::CommaOrEnd;
        let tok = top.tok;
        if let (Some(out), Some(idx)) = (tokens.as_deref_mut(), tok) {
            out[idx].size += 1;
        }
        Ok(())
    }

    /// A string at key position: require an object expecting a key and move
    /// to the colon expectation. The pair is counted when its value lands.
    fn accept_key(&mut self) -> Result<(), ParseError> {
        let ok = match self.stack.top_mut() {
            Some(top)
                if top.kind == ContainerKind::Object
                    && matches!(top.sub, SubState::KeyOrEnd | SubState::Key) =>
            {
                top.sub = SubState::Colon;
                true
            }
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(self.invalid())
        }
    }

    /// Parent-side state captured right before `accept_value`, so a value
    /// that turns out `Partial` can be undone without leaking a
    /// half-committed child.
    fn value_snapshot(&self) -> (Option<SubState>, bool) {
        (self.stack.top().map(|frame| frame.sub), self.root_done)
    }

    /// Undoes the side effects of `accept_value` after the value recognizer
    /// reported `Partial`: the parent's sub-state, its size increment, and
    /// `root_done` at the root. The scan position never moved, so the next
    /// call re-scans the value from its first byte.
    fn rollback_value(
        &mut self,
        tokens: &mut Option<&mut [Token]>,
        snapshot: (Option<SubState>, bool),
    ) {
        let (saved_sub, saved_root) = snapshot;
        match (self.stack.top_mut(), saved_sub) {
            (Some(top), Some(sub)) => {
                top.sub = sub;
                let tok = top.tok;
                if let (Some(out), Some(idx)) = (tokens.as_deref_mut(), tok) {
                    out[idx].size -= 1;
                }
            }
            _ => self.root_done = saved_root,
        }
    }

    fn open_container(
        &mut self,
        tokens: &mut Option<&mut [Token]>,
        kind: ContainerKind,
    ) -> Result<(), ParseError> {
        let parent = self.parent_index();
        // The opener is a value for the enclosing context. A one-byte token
        // cannot be partial, so no rollback is needed past this point.
        self.accept_value(tokens)?;
        let tok = self.emit(tokens, kind.token_kind(), self.pos, END_OPEN, parent)?;
        let frame = Frame {
            kind,
            sub: kind.initial_sub(),
            tok,
        };
        if !self.stack.push(frame) {
            let pos = self.pos;
            return Err(self.fail(ParseError::Depth { pos }));
        }
        self.pos += 1;
        Ok(())
    }

    fn close_container(
        &mut self,
        tokens: &mut Option<&mut [Token]>,
        kind: ContainerKind,
    ) -> Result<(), ParseError> {
        let closable = match self.stack.top() {
            Some(top) if top.kind == kind => match kind {
                ContainerKind::Object => {
                    matches!(top.sub, SubState::KeyOrEnd | SubState::CommaOrEnd)
                }
                ContainerKind::Array => {
                    matches!(top.sub, SubState::ValueOrEnd | SubState::CommaOrEnd)
                }
            },
            _ => false,
        };
        if !closable {
            return Err(self.invalid());
        }
        let frame = self.stack.pop();
        if let (Some(out), Some(idx)) = (tokens.as_deref_mut(), frame.tok) {
            out[idx].end = self.pos + 1;
        }
        self.pos += 1;
        Ok(())
    }

    fn colon(&mut self) -> Result<(), ParseError> {
        let ok = match self.stack.top_mut() {
            Some(top) if top.kind == ContainerKind::Object && top.sub == SubState::Colon => {
                top.sub = SubState::Value;
                true
            }
            _ => false,
        };
        if !ok {
            return Err(self.invalid());
        }
        self.pos += 1;
        Ok(())
    }

    fn comma(&mut self) -> Result<(), ParseError> {
        let ok = match self.stack.top_mut() {
            Some(top) if top.sub == SubState::CommaOrEnd => {
                top.sub = match top.kind {
                    ContainerKind::Object => SubState::Key,
                    ContainerKind::Array => SubState::Value,
                };
                true
            }
            _ => false,
        };
        if !ok {
            return Err(self.invalid());
        }
        self.pos += 1;
        Ok(())
    }

    fn string_token(
        &mut self,
        json: &[u8],
        tokens: &mut Option<&mut [Token]>,
    ) -> Result<(), ParseError> {
        let parent = self.parent_index();
        let key_position = matches!(
            self.stack.top(),
            Some(top) if top.kind == ContainerKind::Object
                && matches!(top.sub, SubState::KeyOrEnd | SubState::Key)
        );

        if key_position {
            match scan::string(json, self.pos) {
                Scan::End(close) => {
                    self.emit(tokens, TokenKind::String, self.pos + 1, close, parent)?;
                    self.accept_key()?;
                    self.pos = close + 1;
                    Ok(())
                }
                Scan::Invalid(at) => Err(self.fail(ParseError::Invalid { pos: at })),
                // The cursor still points at the opening quote, and key
                // expectation state was never touched; nothing to undo.
                Scan::Partial(at) => Err(self.fail(ParseError::Partial { pos: at })),
            }
        } else {
            let snapshot = self.value_snapshot();
            self.accept_value(tokens)?;
            match scan::string(json, self.pos) {
                Scan::End(close) => {
                    self.emit(tokens, TokenKind::String, self.pos + 1, close, parent)?;
                    self.pos = close + 1;
                    Ok(())
                }
                Scan::Invalid(at) => Err(self.fail(ParseError::Invalid { pos: at })),
                Scan::Partial(at) => {
                    self.rollback_value(tokens, snapshot);
                    Err(self.fail(ParseError::Partial { pos: at }))
                }
            }
        }
    }

    fn primitive_token(
        &mut self,
        json: &[u8],
        tokens: &mut Option<&mut [Token]>,
    ) -> Result<(), ParseError> {
        let parent = self.parent_index();
        let snapshot = self.value_snapshot();
        self.accept_value(tokens)?;

        let outcome = match json[self.pos] {
            b't' => scan::literal(json, self.pos, b"true"),
            b'f' => scan::literal(json, self.pos, b"false"),
            b'n' => scan::literal(json, self.pos, b"null"),
            _ => scan::number(json, self.pos, self.options.allow_leading_zeros),
        };
        match outcome {
            Scan::End(end) => {
                self.emit(tokens, TokenKind::Primitive, self.pos, end, parent)?;
                self.pos = end;
                Ok(())
            }
            Scan::Invalid(at) => Err(self.fail(ParseError::Invalid { pos: at })),
            Scan::Partial(at) => {
                self.rollback_value(tokens, snapshot);
                Err(self.fail(ParseError::Partial { pos: at }))
            }
        }
    }
}

impl<const MAX_DEPTH: usize> Default for ParserImpl<MAX_DEPTH> {
    fn default() -> Self {
        ParserImpl::new(ParserOptions::default())
    }
}
