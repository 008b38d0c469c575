use std::io;
use std::path::PathBuf;

/// Errors that can occur in serial transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open or configure the serial device.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: serialport::Error,
    },

    /// The driver rejected an operation on an open port.
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl TransportError {
    /// The underlying I/O error kind, when the driver reported one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        let (TransportError::Open { source, .. } | TransportError::Serial(source)) = self;
        match source.kind() {
            serialport::ErrorKind::Io(kind) => Some(kind),
            _ => None,
        }
    }

    /// True when the driver rejected the requested line settings.
    pub fn is_invalid_setting(&self) -> bool {
        let (TransportError::Open { source, .. } | TransportError::Serial(source)) = self;
        source.kind() == serialport::ErrorKind::InvalidInput
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
