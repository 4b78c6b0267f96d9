/// Configuration options for the tokenizer.
///
/// These options relax the strict RFC 8259 grammar the parser enforces by
/// default. The nesting limit and the optional token parent links are
/// compile-time choices instead (the `MAX_DEPTH` const generic on
/// [`crate::ParserImpl`] and the `parent-links` cargo feature).
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Whether to tolerate a digit run after a leading `0` in numbers.
    ///
    /// RFC 8259 forbids `01`, `-00`, and friends. With this option enabled
    /// the extra digits are consumed as part of the number token instead of
    /// being rejected.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_leading_zeros: bool,

    /// Whether to parse multiple JSON values in a single input stream.
    ///
    /// When `true`, the parser accepts further whitespace-separated
    /// top-level values after the first one and emits tokens for each. This
    /// supports formats such as JSON Lines (JSONL) and newline-delimited
    /// JSON (ND-JSON), and arbitrary concatenation of JSON values.
    ///
    /// # Examples
    ///
    /// ```json
    /// {}{}{}
    /// ```
    ///
    /// ```json
    /// 123 45 678 9
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_json_values: bool,
}
