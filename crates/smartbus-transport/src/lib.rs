//! Serial line transport for SmartBus controllers.
//!
//! SmartBus controllers hang off an RS-485 line, typically at 9600 baud with
//! even parity. This crate opens the device through `serialport` with the
//! requested line settings and hands back a [`SerialStream`] that the frame
//! layer writes to.

pub mod config;
pub mod error;
pub mod serial;
pub mod stream;

pub use config::{Parity, SerialConfig, StopBits};
pub use error::{Result, TransportError};
pub use serial::{SerialPort, WRITE_TIMEOUT};
pub use stream::SerialStream;
