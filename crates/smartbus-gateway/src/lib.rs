//! Bus-to-SmartBus gateway core.
//!
//! Control events arriving on `<device>/controls/<switch>/on` are resolved
//! against a fixed [`ChannelRegistry`] and turned into single channel control
//! frames. The bus client and the serial transport are injected: the bus
//! through the narrow [`BusClient`] capability, the transport as any
//! [`std::io::Write`].

pub mod announce;
pub mod bus;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod registry;
pub mod template;

pub use announce::{announce, INITIAL_STATE, SWITCH_TYPE};
pub use bus::{BusClient, BusMessage, DeviceTopics, Qos};
pub use dispatch::{Action, ControlEvent, Dispatch, Dispatcher, RejectReason, ON_PAYLOAD};
pub use error::{GatewayError, Result};
pub use gateway::{EventOutcome, Gateway, GatewaySettings};
pub use registry::{zone_beast_channels, ChannelRegistry, RelayChannel};
pub use template::CommandTemplate;
