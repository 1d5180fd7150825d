//! Frame extraction state machine
//!
//! One decoder instance serves one stream. Bytes go in through [`feed`],
//! complete frames come out; whatever trails the last separator stays
//! buffered until the next call. [`finish`] is called once when the source
//! ends (normally or not) and applies the configured [`TailPolicy`] to any
//! unterminated remainder.
//!
//! [`feed`]: FrameDecoder::feed
//! [`finish`]: FrameDecoder::finish

use super::utf8::Utf8Decoder;

/// A fully reassembled logical unit of streamed data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// One newline-delimited record (trailing `\r` stripped)
    Line(String),
    /// One blank-line-delimited SSE event
    Event(EventFrame),
}

impl Frame {
    /// The frame's payload text: the line itself, or the event's data
    pub fn data(&self) -> &str {
        match self {
            Frame::Line(line) => line,
            Frame::Event(event) => &event.data,
        }
    }
}

/// A parsed SSE event block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFrame {
    /// Event type from the `event:` line, `"message"` if absent
    pub event: String,
    /// All `data:` line remainders joined with `\n`, trimmed
    pub data: String,
}

/// What to do with an unterminated remainder when the stream ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailPolicy {
    /// Drop the remainder (the behavior of the browser-side reference:
    /// a partial frame before disconnect is never rendered)
    #[default]
    Discard,
    /// Promote the remainder to a final frame
    Emit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Line,
    Event,
}

impl Mode {
    fn separator(self) -> &'static str {
        match self {
            Mode::Line => "\n",
            Mode::Event => "\n\n",
        }
    }
}

/// Incremental frame decoder
///
/// Invariant: after every call, the buffer holds exactly the bytes received
/// so far minus the bytes already emitted as complete frames (separators
/// are consumed but never emitted). No byte is duplicated or lost.
#[derive(Debug)]
pub struct FrameDecoder {
    mode: Mode,
    tail: TailPolicy,
    utf8: Utf8Decoder,
    buffer: String,
}

impl FrameDecoder {
    /// Decoder for newline-delimited records (plain text lines, NDJSON)
    pub fn lines() -> Self {
        Self::new(Mode::Line)
    }

    /// Decoder for blank-line-delimited SSE event blocks
    pub fn events() -> Self {
        Self::new(Mode::Event)
    }

    fn new(mode: Mode) -> Self {
        Self {
            mode,
            tail: TailPolicy::default(),
            utf8: Utf8Decoder::new(),
            buffer: String::new(),
        }
    }

    /// Set the end-of-stream policy for an unterminated remainder
    pub fn with_tail_policy(mut self, tail: TailPolicy) -> Self {
        self.tail = tail;
        self
    }

    /// Feed the next chunk of raw bytes and extract all complete frames.
    ///
    /// Accepts any byte sequence: chunk boundaries may fall inside a
    /// multi-byte character or anywhere relative to frame boundaries.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Frame> {
        self.buffer.push_str(&self.utf8.decode(chunk));
        self.drain_complete()
    }

    /// Signal end of stream and apply the tail policy.
    ///
    /// The transport calls this for normal completion and for mid-stream
    /// failures alike; the decoder makes no distinction.
    pub fn finish(&mut self) -> Vec<Frame> {
        self.buffer.push_str(&self.utf8.finish());
        let remainder = std::mem::take(&mut self.buffer);

        match self.tail {
            TailPolicy::Discard => Vec::new(),
            TailPolicy::Emit => self.make_frame(&remainder).into_iter().collect(),
        }
    }

    /// Unconsumed text currently buffered (for diagnostics)
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    fn drain_complete(&mut self) -> Vec<Frame> {
        let separator = self.mode.separator();
        let mut frames = Vec::new();

        while let Some(pos) = self.buffer.find(separator) {
            let taken: String = self.buffer.drain(..pos + separator.len()).collect();
            let candidate = &taken[..pos];
            if let Some(frame) = self.make_frame(candidate) {
                frames.push(frame);
            }
        }

        frames
    }

    /// Build a frame from candidate text; empty/whitespace-only candidates
    /// produce nothing.
    fn make_frame(&self, text: &str) -> Option<Frame> {
        match self.mode {
            Mode::Line => {
                let line = text.strip_suffix('\r').unwrap_or(text);
                if line.trim().is_empty() {
                    None
                } else {
                    Some(Frame::Line(line.to_string()))
                }
            }
            Mode::Event => {
                if text.trim().is_empty() {
                    None
                } else {
                    Some(Frame::Event(parse_event_block(text)))
                }
            }
        }
    }
}

/// Parse one SSE block into its event type and joined data.
///
/// Only `event: ` and `data: ` labeled sub-lines carry meaning here;
/// comment lines and unknown labels are ignored.
fn parse_event_block(block: &str) -> EventFrame {
    let mut event: Option<String> = None;
    let mut data: Vec<&str> = Vec::new();

    for line in block.lines() {
        if let Some(rest) = line.strip_prefix("event: ") {
            event = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("data: ") {
            data.push(rest);
        }
    }

    EventFrame {
        event: event.unwrap_or_else(|| "message".to_string()),
        data: data.join("\n").trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn feed_all(decoder: &mut FrameDecoder, input: &[u8]) -> Vec<Frame> {
        let mut frames = decoder.feed(input);
        frames.extend(decoder.finish());
        frames
    }

    fn line_texts(frames: &[Frame]) -> Vec<&str> {
        frames.iter().map(|f| f.data()).collect()
    }

    #[test]
    fn lines_split_on_newline() {
        let mut decoder = FrameDecoder::lines();
        let frames = decoder.feed(b"first\nsecond\n");
        assert_eq!(
            frames,
            vec![
                Frame::Line("first".to_string()),
                Frame::Line("second".to_string()),
            ]
        );
        assert_eq!(decoder.buffered(), "");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut decoder = FrameDecoder::lines().with_tail_policy(TailPolicy::Emit);
        let frames = feed_all(&mut decoder, b"a\nb\n\nc");
        assert_eq!(line_texts(&frames), vec!["a", "b", "c"]);
    }

    #[test]
    fn discard_policy_drops_unterminated_tail() {
        let mut decoder = FrameDecoder::lines();
        let frames = feed_all(&mut decoder, b"a\nb\n\nc");
        assert_eq!(line_texts(&frames), vec!["a", "b"]);
    }

    #[test]
    fn crlf_line_endings_are_trimmed() {
        let mut decoder = FrameDecoder::lines();
        let frames = decoder.feed(b"one\r\ntwo\r\n");
        assert_eq!(line_texts(&frames), vec!["one", "two"]);
    }

    #[test]
    fn partial_line_stays_buffered_across_feeds() {
        let mut decoder = FrameDecoder::lines();
        assert!(decoder.feed(b"hel").is_empty());
        assert_eq!(decoder.buffered(), "hel");
        let frames = decoder.feed(b"lo\nwor");
        assert_eq!(line_texts(&frames), vec!["hello"]);
        assert_eq!(decoder.buffered(), "wor");
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    #[case(7)]
    #[case(usize::MAX)]
    fn chunking_never_changes_line_frames(#[case] chunk_size: usize) {
        // Includes a multi-byte character so some splits land inside it.
        let input = "alpha\nbéta\n\ngamma\n".as_bytes();
        let mut decoder = FrameDecoder::lines();
        let mut frames = Vec::new();
        for chunk in input.chunks(chunk_size.min(input.len())) {
            frames.extend(decoder.feed(chunk));
        }
        frames.extend(decoder.finish());
        assert_eq!(line_texts(&frames), vec!["alpha", "béta", "gamma"]);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(4)]
    #[case(9)]
    #[case(usize::MAX)]
    fn chunking_never_changes_event_frames(#[case] chunk_size: usize) {
        let input =
            b"event: meta\ndata: {\"x\":1}\n\nevent: md\ndata: line1\ndata: line2\n\n";
        let mut decoder = FrameDecoder::events();
        let mut frames = Vec::new();
        for chunk in input.chunks(chunk_size.min(input.len())) {
            frames.extend(decoder.feed(chunk));
        }
        frames.extend(decoder.finish());

        assert_eq!(
            frames,
            vec![
                Frame::Event(EventFrame {
                    event: "meta".to_string(),
                    data: "{\"x\":1}".to_string(),
                }),
                Frame::Event(EventFrame {
                    event: "md".to_string(),
                    data: "line1\nline2".to_string(),
                }),
            ]
        );
    }

    #[test]
    fn event_type_defaults_to_message() {
        let mut decoder = FrameDecoder::events();
        let frames = decoder.feed(b"data: hello\n\n");
        assert_eq!(
            frames,
            vec![Frame::Event(EventFrame {
                event: "message".to_string(),
                data: "hello".to_string(),
            })]
        );
    }

    #[test]
    fn unterminated_event_fragment_is_dropped() {
        let mut decoder = FrameDecoder::events();
        assert!(decoder.feed(b"event: do").is_empty());
        assert!(decoder.finish().is_empty());
        assert_eq!(decoder.buffered(), "");
    }

    #[test]
    fn emit_policy_promotes_final_event() {
        let mut decoder = FrameDecoder::events().with_tail_policy(TailPolicy::Emit);
        assert!(decoder.feed(b"event: late\ndata: tail").is_empty());
        let frames = decoder.finish();
        assert_eq!(
            frames,
            vec![Frame::Event(EventFrame {
                event: "late".to_string(),
                data: "tail".to_string(),
            })]
        );
    }

    #[test]
    fn blank_event_blocks_are_skipped() {
        let mut decoder = FrameDecoder::events();
        // Keepalive-style extra blank lines between events.
        let frames = decoder.feed(b"data: a\n\n\n\ndata: b\n\n");
        assert_eq!(line_texts(&frames), vec!["a", "b"]);
    }

    #[test]
    fn comment_and_unknown_lines_are_ignored() {
        let mut decoder = FrameDecoder::events();
        let frames = decoder.feed(b": keepalive\nid: 7\nevent: tick\ndata: 1\n\n");
        assert_eq!(
            frames,
            vec![Frame::Event(EventFrame {
                event: "tick".to_string(),
                data: "1".to_string(),
            })]
        );
    }

    #[test]
    fn multibyte_character_split_at_chunk_boundary() {
        let input = "héllo\n".as_bytes();
        // Cut inside the two-byte "é".
        let mut decoder = FrameDecoder::lines();
        let mut frames = decoder.feed(&input[..2]);
        frames.extend(decoder.feed(&input[2..]));
        assert_eq!(frames, vec![Frame::Line("héllo".to_string())]);
    }

    #[test]
    fn decoder_is_single_use_after_finish() {
        let mut decoder = FrameDecoder::lines().with_tail_policy(TailPolicy::Emit);
        decoder.feed(b"tail");
        assert_eq!(line_texts(&decoder.finish()), vec!["tail"]);
        // A second finish has nothing left to emit.
        assert!(decoder.finish().is_empty());
    }
}
