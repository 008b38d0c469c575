use std::io::Write;
use std::path::{Path, PathBuf};

/// An open, configured serial line. Write-only from the gateway's view.
pub struct SerialStream {
    inner: Box<dyn serialport::SerialPort>,
    path: PathBuf,
}

impl SerialStream {
    pub(crate) fn new(inner: Box<dyn serialport::SerialPort>, path: PathBuf) -> Self {
        Self { inner, path }
    }

    /// Device path this stream was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for SerialStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl std::fmt::Debug for SerialStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialStream")
            .field("path", &self.path)
            .finish()
    }
}
