use std::fmt::Write as _;

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::checksum::checksum;
use crate::error::{FrameError, Result};

/// Frame preamble (sync bytes).
pub const PREAMBLE: [u8; 2] = [0xAA, 0xAA];

/// Header: orig subnet (1) + orig device (1) + orig type (2) + opcode (2)
/// + target subnet (1) + target device (1) = 8 bytes.
pub const HEADER_SIZE: usize = 8;

/// Checksum trailer size.
pub const TRAILER_SIZE: usize = 2;

/// Length byte + trailer, counted by the length byte on top of header and payload.
const LENGTH_OVERHEAD: usize = 3;

/// Largest header+payload that still fits the one-byte length field.
pub const MAX_BODY_SIZE: usize = u8::MAX as usize - LENGTH_OVERHEAD;

/// Smallest valid frame, excluding the preamble.
pub const MIN_FRAME_SIZE: usize = 1 + HEADER_SIZE + TRAILER_SIZE;

/// Subnet id addressing every subnet.
pub const BROADCAST_SUBNET: u8 = 0xFF;

/// Device id addressing every device on a subnet.
pub const BROADCAST_DEVICE: u8 = 0xFF;

/// Addressing and opcode fields shared by every SmartBus frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    pub orig_subnet: u8,
    pub orig_device: u8,
    pub orig_device_type: u16,
    pub opcode: u16,
    pub target_subnet: u8,
    pub target_device: u8,
}

impl MessageHeader {
    fn put(&self, dst: &mut BytesMut) {
        dst.put_u8(self.orig_subnet);
        dst.put_u8(self.orig_device);
        dst.put_u16(self.orig_device_type);
        dst.put_u16(self.opcode);
        dst.put_u8(self.target_subnet);
        dst.put_u8(self.target_device);
    }
}

/// A command ready for serialization: header plus opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalCommand {
    header: MessageHeader,
    payload: Bytes,
}

impl LogicalCommand {
    /// Create a new command.
    pub fn new(header: MessageHeader, payload: impl Into<Bytes>) -> Self {
        Self {
            header,
            payload: payload.into(),
        }
    }

    pub fn header(&self) -> &MessageHeader {
        &self.header
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Header plus payload size, the part limited by [`MAX_BODY_SIZE`].
    pub fn body_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Serialize into a standalone frame.
    pub fn to_frame(&self) -> Result<Frame> {
        let mut buf = BytesMut::with_capacity(PREAMBLE.len() + LENGTH_OVERHEAD + self.body_size());
        encode_command(self, &mut buf)?;
        Ok(Frame {
            bytes: buf.freeze(),
        })
    }
}

/// A fully serialized frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Total size on the wire, preamble and trailer included.
    pub fn wire_size(&self) -> usize {
        self.bytes.len()
    }

    /// The length byte at offset 2.
    pub fn length_byte(&self) -> u8 {
        self.bytes[PREAMBLE.len()]
    }

    /// The checksum trailer as stored on the wire.
    pub fn trailer(&self) -> [u8; TRAILER_SIZE] {
        let end = self.bytes.len();
        [self.bytes[end - 2], self.bytes[end - 1]]
    }

    /// Lowercase hex, space separated.
    pub fn hex_dump(&self) -> String {
        let mut out = String::with_capacity(self.bytes.len() * 3);
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Encode a command into the wire format, appending to `dst`.
///
/// Wire format:
/// ```text
/// ┌───────────┬─────────┬──────────────┬──────────┬──────────────┐
/// │ Preamble  │ Length  │ Header       │ Payload  │ CRC          │
/// │ 0xAA 0xAA │ (1B)    │ (8B, BE)     │ (N B)    │ (2B, low 1st)│
/// └───────────┴─────────┴──────────────┴──────────┴──────────────┘
/// ```
///
/// The length byte counts itself, the header, the payload and the CRC.
/// The CRC covers the length byte, the header and the payload.
pub fn encode_command(command: &LogicalCommand, dst: &mut BytesMut) -> Result<()> {
    let body = command.body_size();
    if body > MAX_BODY_SIZE {
        return Err(FrameError::FrameTooLarge {
            size: body,
            max: MAX_BODY_SIZE,
        });
    }

    dst.reserve(PREAMBLE.len() + LENGTH_OVERHEAD + body);
    dst.put_slice(&PREAMBLE);
    let start = dst.len();
    dst.put_u8((body + LENGTH_OVERHEAD) as u8);
    command.header.put(dst);
    dst.put_slice(&command.payload);
    let crc = checksum(&dst[start..]);
    dst.put_u16_le(crc);
    Ok(())
}

/// Build a frame from individual header fields and a payload.
pub fn build_frame(
    orig_subnet: u8,
    orig_device: u8,
    orig_device_type: u16,
    opcode: u16,
    target_subnet: u8,
    target_device: u8,
    payload: &[u8],
) -> Result<Frame> {
    let header = MessageHeader {
        orig_subnet,
        orig_device,
        orig_device_type,
        opcode,
        target_subnet,
        target_device,
    };
    LogicalCommand::new(header, Bytes::copy_from_slice(payload)).to_frame()
}
