//! Client Module
//!
//! HTTP transport and stream cancellation primitives.

pub mod cancel;
pub mod http;

pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use http::{ByteStream, HttpTransport};
