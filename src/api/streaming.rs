//! Streaming Support
//!
//! Incremental decoding of Server-Sent Events (SSE) chat completion streams.
//!
//! Contract: a stream yields zero or more text deltas strictly before either the
//! `[DONE]` sentinel or end-of-stream; nothing is ever emitted after the
//! sentinel has been observed.

use serde::{Deserialize, Serialize};

/// A streaming chunk from the API
///
/// Only the delta-content path is consumed; every other field a provider sends
/// is tolerated and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Choices with deltas
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

/// A choice in a streaming chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,

    /// The delta (partial message)
    #[serde(default)]
    pub delta: StreamDelta,

    /// Finish reason (set in final chunk)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Delta content in a streaming chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamDelta {
    /// Role (usually only in first chunk)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content delta
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl StreamChunk {
    /// The first choice's content delta, if present and non-empty.
    pub fn delta_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Classification of one complete SSE line
#[derive(Debug)]
pub enum SseLine {
    /// Blank line, comment, non-data field, or malformed payload
    Ignored,

    /// The `[DONE]` sentinel
    Done,

    /// A parsed data frame
    Chunk(StreamChunk),
}

/// Classify a single complete SSE line.
///
/// Lines without the literal `data: ` prefix are ignored, as are data payloads
/// that fail to parse. A corrupt frame must never kill an otherwise healthy
/// stream.
pub fn parse_sse_line(line: &str) -> SseLine {
    let Some(payload) = line.strip_prefix("data: ") else {
        return SseLine::Ignored;
    };

    if payload == "[DONE]" {
        return SseLine::Done;
    }

    match serde_json::from_str::<StreamChunk>(payload) {
        Ok(chunk) => SseLine::Chunk(chunk),
        Err(err) => {
            tracing::debug!(error = %err, "dropping malformed stream frame");
            SseLine::Ignored
        }
    }
}

/// Incremental decoder for one SSE completion stream.
///
/// Holds the undecoded tail of the stream (a line that has not yet seen its
/// terminating newline) plus the open/closed flag. One decoder exists per
/// streamed call and is discarded when the call ends; any buffered partial
/// line goes with it.
///
/// The buffer holds raw bytes, not decoded text, so a UTF-8 code point split
/// across two chunks is reassembled before its line is decoded. The sequence
/// of emitted deltas is therefore identical no matter how the transport chunks
/// the byte stream.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Bytes of the current incomplete line
    buffer: Vec<u8>,

    /// Set once the `[DONE]` sentinel has been seen
    done: bool,
}

impl SseDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel has been observed.
    ///
    /// A stream that ends without the sentinel is still treated as a clean
    /// close by the client; this flag lets callers tell the two apart.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one chunk of bytes, returning the content deltas it completed.
    ///
    /// Deltas are returned in arrival order. Once the sentinel has been seen,
    /// all further input is ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut deltas = Vec::new();
        if self.done {
            return deltas;
        }

        self.buffer.extend_from_slice(chunk);

        // Split off complete lines; the trailing fragment stays buffered until
        // its newline arrives.
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let rest = self.buffer.split_off(pos + 1);
            let mut line = std::mem::replace(&mut self.buffer, rest);
            line.pop(); // the newline itself

            match parse_sse_line(&String::from_utf8_lossy(&line)) {
                SseLine::Ignored => {}
                SseLine::Done => {
                    self.done = true;
                    self.buffer.clear();
                    return deltas;
                }
                SseLine::Chunk(chunk) => {
                    if let Some(content) = chunk.delta_content() {
                        deltas.push(content.to_string());
                    }
                }
            }
        }

        deltas
    }
}
