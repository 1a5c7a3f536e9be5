/// Errors that can occur while handling frames.
///
/// A frame that fails classification is not an error; see [`crate::Class::Invalid`].
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A byte index past the end of the frame was requested.
    #[error("frame index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    /// A byte sequence of the wrong length was converted into a frame.
    #[error("expected {expected} frame bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Textual frame input could not be parsed as hex bytes.
    #[error("invalid frame hex: {0}")]
    InvalidHex(String),

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed at a frame boundary.
    #[error("connection closed")]
    ConnectionClosed,

    /// The stream ended partway through a frame.
    #[error("stream ended mid-frame ({received} of 5 bytes received)")]
    Truncated { received: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
