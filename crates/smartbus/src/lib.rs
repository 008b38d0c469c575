//! MQTT to SmartBus relay controller gateway.
//!
//! Exposes the relay outputs of a SmartBus controller as switches on an
//! MQTT bus and turns switch commands into serial frames.
//!
//! # Crate Structure
//!
//! - [`transport`] - Serial line transport (serialport)
//! - [`frame`] - Frame layout, CRC-16 trailer, command payloads
//! - [`gateway`] - Channel registry, topic dispatch, startup announcement

/// Re-export transport types.
pub mod transport {
    pub use smartbus_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use smartbus_frame::*;
}

/// Re-export gateway types.
pub mod gateway {
    pub use smartbus_gateway::*;
}
