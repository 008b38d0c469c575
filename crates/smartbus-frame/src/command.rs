//! Typed payloads for the commands the gateway sends.

use bytes::{BufMut, Bytes, BytesMut};

use crate::codec::{LogicalCommand, MessageHeader};

/// Opcode of the single channel control command.
pub const SINGLE_CHANNEL_CONTROL: u16 = 0x0031;

/// Opcode of the module query the panels send on a button press.
pub const QUERY_MODULES: u16 = 0x0286;

/// Relay level for "on".
pub const LIGHT_LEVEL_ON: u8 = 100;

/// Relay level for "off".
pub const LIGHT_LEVEL_OFF: u8 = 0;

/// Sets one relay output to a level.
///
/// Payload layout: channel (1B), level (1B), running time (2B, BE). The
/// running time is reserved and always zero for relay switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleChannelControl {
    pub channel: u8,
    pub level: u8,
    pub duration: u16,
}

impl SingleChannelControl {
    pub const PAYLOAD_SIZE: usize = 4;

    pub fn new(channel: u8, level: u8) -> Self {
        Self {
            channel,
            level,
            duration: 0,
        }
    }

    pub fn payload(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::PAYLOAD_SIZE);
        buf.put_u8(self.channel);
        buf.put_u8(self.level);
        buf.put_u16(self.duration);
        buf.freeze()
    }

    /// Wrap into a command addressed by `header`. The opcode is taken from
    /// `header` as is; relay modules answer to [`SINGLE_CHANNEL_CONTROL`].
    pub fn into_command(self, header: MessageHeader) -> LogicalCommand {
        LogicalCommand::new(header, self.payload())
    }
}
