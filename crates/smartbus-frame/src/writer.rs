use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::debug;

use crate::codec::{encode_command, Frame, LogicalCommand};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Writes complete SmartBus frames to any `Write` stream.
///
/// Each frame goes out as one contiguous buffer followed by a flush. The
/// controller drops frames that arrive split across separate writes.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> FrameWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Write an already built frame (blocking).
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        debug!(len = frame.wire_size(), frame = %frame.hex_dump(), "sending frame");
        self.write_all_bytes(frame.as_bytes())
    }

    /// Encode and send a command.
    pub fn send(&mut self, command: &LogicalCommand) -> Result<()> {
        self.buf.clear();
        encode_command(command, &mut self.buf)?;
        debug!(
            opcode = command.header().opcode,
            len = self.buf.len(),
            "sending command"
        );

        let buf = std::mem::take(&mut self.buf);
        let result = self.write_all_bytes(&buf);
        self.buf = buf;
        result
    }

    fn write_all_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let mut offset = 0usize;
        while offset < bytes.len() {
            match self.inner.write(&bytes[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::codec::{build_frame, MessageHeader, MAX_BODY_SIZE};

    fn relay_command(channel: u8, level: u8) -> LogicalCommand {
        let header = MessageHeader {
            orig_subnet: 1,
            orig_device: 0x14,
            orig_device_type: 0x0095,
            opcode: 0x31,
            target_subnet: 1,
            target_device: 0x1c,
        };
        LogicalCommand::new(header, vec![channel, level, 0, 0])
    }

    #[test]
    fn send_writes_one_frame() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));

        writer.send(&relay_command(4, 100)).unwrap();

        let wire = writer.into_inner().into_inner();
        let expected = build_frame(1, 0x14, 0x0095, 0x31, 1, 0x1c, &[4, 100, 0, 0]).unwrap();
        assert_eq!(wire.as_slice(), expected.as_bytes());
    }

    #[test]
    fn frames_are_written_in_order() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));

        writer.send(&relay_command(4, 100)).unwrap();
        writer.send(&relay_command(5, 0)).unwrap();
        writer.send(&relay_command(15, 100)).unwrap();

        let wire = writer.into_inner().into_inner();
        assert_eq!(wire.len(), 3 * 17);
        assert_eq!(wire[11], 4);
        assert_eq!(wire[17 + 11], 5);
        assert_eq!(wire[34 + 11], 15);
    }

    #[test]
    fn write_frame_method() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        let frame = relay_command(7, 0).to_frame().unwrap();

        writer.write_frame(&frame).unwrap();

        assert_eq!(writer.get_ref().get_ref().as_slice(), frame.as_bytes());
    }

    #[test]
    fn oversized_command_writes_nothing() {
        let header = *relay_command(1, 1).header();
        let command = LogicalCommand::new(header, vec![0u8; MAX_BODY_SIZE]);
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));

        let err = writer.send(&command).unwrap_err();
        assert!(matches!(err, FrameError::FrameTooLarge { .. }));
        assert!(writer.get_ref().get_ref().is_empty());

        writer.send(&relay_command(4, 100)).unwrap();
        assert_eq!(writer.get_ref().get_ref().len(), 17);
    }

    #[test]
    fn flush_propagates() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = FrameWriter::new(sink);

        writer.send(&relay_command(4, 100)).unwrap();

        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn frame_is_written_in_a_single_call() {
        let mut writer = FrameWriter::new(FlushTrackingWriter::default());

        writer.send(&relay_command(4, 100)).unwrap();

        let inner = writer.into_inner();
        assert_eq!(inner.writes, 1);
        assert_eq!(inner.data.len(), 17);
    }

    #[test]
    fn handles_interrupted_write_and_flush() {
        let writer_impl = InterruptedWriteThenFlush {
            wrote_once: false,
            flush_interrupted: false,
            data: Vec::new(),
        };

        let mut writer = FrameWriter::new(writer_impl);
        writer.send(&relay_command(4, 100)).unwrap();

        let inner = writer.into_inner();
        assert_eq!(inner.data.len(), 17);
    }

    #[test]
    fn connection_closed_when_write_returns_zero() {
        let mut writer = FrameWriter::new(ZeroWriter);
        let err = writer.send(&relay_command(4, 100)).unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn io_error_is_reported() {
        let mut writer = FrameWriter::new(BrokenPipe);
        let err = writer.send(&relay_command(4, 100)).unwrap_err();
        assert!(matches!(err, FrameError::Io(ref e) if e.kind() == ErrorKind::BrokenPipe));
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        flushed: Arc<AtomicBool>,
        writes: usize,
        data: Vec<u8>,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.writes += 1;
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct InterruptedWriteThenFlush {
        wrote_once: bool,
        flush_interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for InterruptedWriteThenFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.wrote_once {
                self.wrote_once = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if !self.flush_interrupted {
                self.flush_interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            Ok(())
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
