use std::path::PathBuf;
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, FlowControl};
use tracing::info;

use crate::config::{Parity, SerialConfig, StopBits};
use crate::error::{Result, TransportError};
use crate::stream::SerialStream;

/// Upper bound on how long one frame write may block on a stalled line.
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// Serial device opener.
pub struct SerialPort;

impl SerialPort {
    /// Open `config.device` in raw 8-bit mode with the configured speed,
    /// parity and stop bits.
    pub fn open(config: &SerialConfig) -> Result<SerialStream> {
        let path = PathBuf::from(&config.device);
        let mut port = serialport::new(config.device.as_str(), config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(config.parity.into())
            .stop_bits(config.stop_bits.into())
            .flow_control(FlowControl::None)
            .timeout(WRITE_TIMEOUT)
            .open()
            .map_err(|source| TransportError::Open {
                path: path.clone(),
                source,
            })?;

        // Drop whatever the line buffered before we owned it.
        port.clear(ClearBuffer::All)?;

        info!(
            ?path,
            baud_rate = config.baud_rate,
            parity = ?config.parity,
            stop_bits = ?config.stop_bits,
            "serial port opened"
        );
        Ok(SerialStream::new(port, path))
    }
}

impl From<Parity> for serialport::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => serialport::Parity::None,
            Parity::Even => serialport::Parity::Even,
            Parity::Odd => serialport::Parity::Odd,
        }
    }
}

impl From<StopBits> for serialport::StopBits {
    fn from(stop_bits: StopBits) -> Self {
        match stop_bits {
            StopBits::One => serialport::StopBits::One,
            StopBits::Two => serialport::StopBits::Two,
        }
    }
}
