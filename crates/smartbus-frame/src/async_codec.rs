use bytes::BytesMut;
use tokio_util::codec::Encoder;

use crate::codec::{encode_command, LogicalCommand};
use crate::error::FrameError;

/// `tokio-util` encoder for SmartBus commands.
///
/// There is no matching decoder: the gateway never reads controller frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartbusCodec;

impl Encoder<LogicalCommand> for SmartbusCodec {
    type Error = FrameError;

    fn encode(&mut self, item: LogicalCommand, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_command(&item, dst)
    }
}

impl Encoder<&LogicalCommand> for SmartbusCodec {
    type Error = FrameError;

    fn encode(&mut self, item: &LogicalCommand, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_command(item, dst)
    }
}
