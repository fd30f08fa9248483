//! Text buffer core.
//!
//! Provides a rope-backed text buffer with a char-offset cursor that writes
//! every edit through to a swappable external sink and publishes change
//! events to subscribers.

mod buffer;
mod sink;

pub use buffer::{BufferEvent, EditPolicy, TextBuffer};
pub use sink::{CursorSink, FieldSink, SinkHandle, StringSink, TextSink};
