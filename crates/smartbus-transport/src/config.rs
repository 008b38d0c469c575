use serde::{Deserialize, Serialize};

/// Parity bit setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    None,
    #[default]
    Even,
    Odd,
}

/// Number of stop bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StopBits {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

/// Line settings for the serial device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path.
    pub device: String,
    /// Line speed. Default: 9600.
    pub baud_rate: u32,
    /// Parity. Default: even.
    pub parity: Parity,
    /// Stop bits. Default: 1.
    pub stop_bits: StopBits,
}

impl SerialConfig {
    /// Device the reference installation uses.
    pub const DEFAULT_DEVICE: &'static str = "/dev/ttyNSC1";
    pub const DEFAULT_BAUD_RATE: u32 = 9600;
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: Self::DEFAULT_DEVICE.to_string(),
            baud_rate: Self::DEFAULT_BAUD_RATE,
            parity: Parity::Even,
            stop_bits: StopBits::One,
        }
    }
}
