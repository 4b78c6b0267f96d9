//! Resumable extraction of `data:` payloads from a Server-Sent-Events byte
//! stream.
//!
//! The scanner shares the tokenizer's growing-buffer discipline: the caller
//! owns a buffer that only ever gets longer and a cursor that advances past
//! each fully-received line. `data:` payloads come back as borrowed spans;
//! everything else (blank event separators, `:` comments, other fields) is
//! skipped.

/// Scans from `*pos` for the next complete `data:` line.
///
/// Returns `Some(payload)` with one optional space after the colon stripped
/// and no trailing `\r`; `*pos` then points one past that line's `\n`. An
/// empty payload (`data:\n`) is valid and yields an empty span.
///
/// Returns `None` when no complete line remains. `*pos` is left at the
/// start of the incomplete line (clamped to `buf.len()`), so a later call
/// against a longer buffer re-scans that line from its first byte.
pub fn next_data<'a>(buf: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    let mut start = (*pos).min(buf.len());
    loop {
        *pos = start;
        let len = buf[start..].iter().position(|&b| b == b'\n')?;
        let mut line = &buf[start..start + len];
        if let [head @ .., b'\r'] = line {
            line = head;
        }
        start += len + 1;
        *pos = start;

        let Some(mut payload) = line.strip_prefix(b"data:") else {
            // Blank separator, comment, or some other field; keep looking.
            continue;
        };
        if let [b' ', rest @ ..] = payload {
            payload = rest;
        }
        return Some(payload);
    }
}
