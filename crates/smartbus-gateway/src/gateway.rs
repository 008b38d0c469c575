use std::io::Write;

use serde::{Deserialize, Serialize};
use smartbus_frame::{FrameError, FrameWriter};
use tracing::error;

use crate::announce::announce;
use crate::bus::{BusClient, DeviceTopics};
use crate::dispatch::{Action, ControlEvent, Dispatch, Dispatcher, RejectReason};
use crate::error::Result;
use crate::registry::{zone_beast_channels, ChannelRegistry, RelayChannel};
use crate::template::CommandTemplate;

/// Device-side settings of the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    /// Root topic of the device, e.g. `/devices/ZoneBeast`.
    pub device_topic: String,
    /// Human-readable device name published under `meta/name`.
    pub device_title: String,
    /// Relay channels in display order.
    pub channels: Vec<RelayChannel>,
    /// Frame addressing and levels.
    pub command: CommandTemplate,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            device_topic: "/devices/ZoneBeast".to_string(),
            device_title: "Zone Beast".to_string(),
            channels: zone_beast_channels(),
            command: CommandTemplate::default(),
        }
    }
}

/// What happened to one inbound event.
#[derive(Debug)]
pub enum EventOutcome {
    /// One frame was written for the action.
    Sent(Action),
    Ignored,
    Rejected(RejectReason),
    /// The action was valid but its frame could not be built or written.
    Failed { action: Action, error: FrameError },
}

/// Bus handlers wired to a frame writer.
///
/// Each control event is handled to completion, and at most one frame is
/// written per event, in arrival order.
pub struct Gateway<W> {
    topics: DeviceTopics,
    device_title: String,
    dispatcher: Dispatcher,
    template: CommandTemplate,
    writer: FrameWriter<W>,
}

impl<W: Write> Gateway<W> {
    /// Validate `settings` and bind the gateway to `transport`.
    pub fn new(settings: GatewaySettings, transport: W) -> Result<Self> {
        let registry = ChannelRegistry::new(settings.channels)?;
        let topics = DeviceTopics::new(settings.device_topic);
        Ok(Self {
            dispatcher: Dispatcher::for_device(&topics, registry),
            topics,
            device_title: settings.device_title,
            template: settings.command,
            writer: FrameWriter::new(transport),
        })
    }

    /// Connection handler: announce the device and subscribe to commands.
    pub fn on_connect<B: BusClient + ?Sized>(&self, bus: &mut B) -> Result<()> {
        announce(
            bus,
            &self.topics,
            &self.device_title,
            self.dispatcher.registry(),
        )
    }

    /// Message handler: dispatch the event and write its frame, if any.
    ///
    /// Never fails the caller; errors are logged and reported in the outcome.
    pub fn on_message(&mut self, event: &ControlEvent) -> EventOutcome {
        let action = match self.dispatcher.handle_control_event(event) {
            Dispatch::Action(action) => action,
            Dispatch::Ignored => return EventOutcome::Ignored,
            Dispatch::Rejected(reason) => return EventOutcome::Rejected(reason),
        };

        let command = self.template.to_command(action);
        match self.writer.send(&command) {
            Ok(()) => EventOutcome::Sent(action),
            Err(err) => {
                error!(
                    channel = action.channel,
                    on = action.on,
                    error = %err,
                    "failed to send command"
                );
                EventOutcome::Failed { action, error: err }
            }
        }
    }

    pub fn topics(&self) -> &DeviceTopics {
        &self.topics
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn template(&self) -> &CommandTemplate {
        &self.template
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &W {
        self.writer.get_ref()
    }

    /// Consume the gateway and return the transport.
    pub fn into_transport(self) -> W {
        self.writer.into_inner()
    }
}
