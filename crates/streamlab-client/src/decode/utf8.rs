//! Streaming-safe UTF-8 decoding
//!
//! Chunk boundaries are not character boundaries: a multi-byte sequence can
//! be cut anywhere. The decoder keeps the incomplete tail of one call and
//! prepends it to the next, so the decoded text is identical to decoding
//! the unsplit input. Invalid sequences become U+FFFD instead of an error.

/// Incremental UTF-8 decoder
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Incomplete multi-byte sequence carried over from the previous chunk
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, carrying partial sequences across calls
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(chunk);

        let mut out = String::with_capacity(input.len());
        let mut rest = input.as_slice();

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));

                    match err.error_len() {
                        // Invalid sequence: substitute and continue after it.
                        Some(len) => {
                            out.push('\u{FFFD}');
                            rest = &after[len..];
                        }
                        // Incomplete sequence at the end: keep for next call.
                        None => {
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Flush at end of stream.
    ///
    /// A sequence still incomplete when the source ends can never complete,
    /// so it decodes to a single replacement character.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            "\u{FFFD}".to_string()
        }
    }

    /// Whether an incomplete sequence is currently buffered
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
