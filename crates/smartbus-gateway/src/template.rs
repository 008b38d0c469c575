use serde::{Deserialize, Serialize};
use smartbus_frame::{
    LogicalCommand, MessageHeader, SingleChannelControl, LIGHT_LEVEL_OFF, LIGHT_LEVEL_ON,
    SINGLE_CHANNEL_CONTROL,
};

use crate::dispatch::Action;

/// Addressing and levels used to turn an [`Action`] into a command.
///
/// Defaults target a Zone Beast at subnet 1, device 0x1c, with the gateway
/// posing as device 0x14 of type 0x0095.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandTemplate {
    pub orig_subnet: u8,
    pub orig_device: u8,
    pub orig_device_type: u16,
    pub opcode: u16,
    pub target_subnet: u8,
    pub target_device: u8,
    pub on_level: u8,
    pub off_level: u8,
}

impl Default for CommandTemplate {
    fn default() -> Self {
        Self {
            orig_subnet: 1,
            orig_device: 0x14,
            orig_device_type: 0x0095,
            opcode: SINGLE_CHANNEL_CONTROL,
            target_subnet: 1,
            target_device: 0x1c,
            on_level: LIGHT_LEVEL_ON,
            off_level: LIGHT_LEVEL_OFF,
        }
    }
}

impl CommandTemplate {
    pub fn header(&self) -> MessageHeader {
        MessageHeader {
            orig_subnet: self.orig_subnet,
            orig_device: self.orig_device,
            orig_device_type: self.orig_device_type,
            opcode: self.opcode,
            target_subnet: self.target_subnet,
            target_device: self.target_device,
        }
    }

    pub fn level(&self, on: bool) -> u8 {
        if on {
            self.on_level
        } else {
            self.off_level
        }
    }

    pub fn to_command(&self, action: Action) -> LogicalCommand {
        SingleChannelControl::new(action.channel, self.level(action.on))
            .into_command(self.header())
    }
}
