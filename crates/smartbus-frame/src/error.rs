/// Errors that can occur while building or writing frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Header plus payload does not fit the single-byte length field.
    #[error("frame too large ({size} header+payload bytes, max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// An I/O error occurred while writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport accepted zero bytes of a frame.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
