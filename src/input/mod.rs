//! Background byte capture.
//!
//! A dedicated thread polls a [`ByteSource`] with a bounded timeout and
//! forwards each byte, in order, over a channel to the host event loop.

mod reader;
mod source;

pub use reader::InputReader;
pub use source::ByteSource;

/// Event delivered from the reader thread to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// One byte, in read order.
    Byte(u8),
    /// The source reached end of stream. No further events follow.
    Closed,
    /// The source failed. No further events follow.
    Failed(String),
}
