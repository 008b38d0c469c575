//! SmartBus wire framing.
//!
//! Every frame the gateway sends is laid out as:
//! - A 2-byte preamble `0xAA 0xAA`
//! - A 1-byte length counting everything after the preamble
//! - An 8-byte big-endian header (source, device type, opcode, target)
//! - The command payload
//! - A 2-byte CRC-16/XMODEM trailer over length, header and payload
//!
//! Only the write direction is implemented.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod checksum;
pub mod codec;
pub mod command;
pub mod error;
pub mod writer;

#[cfg(feature = "async")]
pub use async_codec::SmartbusCodec;
pub use checksum::{checksum, crc16_xmodem};
pub use codec::{
    build_frame, encode_command, Frame, LogicalCommand, MessageHeader, BROADCAST_DEVICE,
    BROADCAST_SUBNET, HEADER_SIZE, MAX_BODY_SIZE, MIN_FRAME_SIZE, PREAMBLE, TRAILER_SIZE,
};
pub use command::{
    SingleChannelControl, LIGHT_LEVEL_OFF, LIGHT_LEVEL_ON, QUERY_MODULES, SINGLE_CHANNEL_CONTROL,
};
pub use error::{FrameError, Result};
pub use writer::FrameWriter;
