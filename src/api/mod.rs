//! API Module
//!
//! Chat completion API types and streaming support.

pub mod completion;
pub mod streaming;

pub use completion::{
    Choice, CompletionRequest, CompletionResponse, Message, Role, SamplingDefaults, Usage,
};
pub use streaming::{parse_sse_line, SseDecoder, SseLine, StreamChoice, StreamChunk, StreamDelta};
