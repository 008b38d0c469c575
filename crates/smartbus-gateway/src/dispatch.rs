//! Control topic parsing and channel resolution.

use tracing::{debug, info, warn};

use crate::bus::DeviceTopics;
use crate::registry::ChannelRegistry;

/// Payload that switches a channel on. Anything else switches it off.
pub const ON_PAYLOAD: &str = "1";

/// Last topic segment of a control command.
const ON_SUFFIX: &str = "on";

/// An inbound bus notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEvent {
    pub topic: String,
    pub payload: String,
}

impl ControlEvent {
    pub fn new(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// A validated request to switch one relay channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub channel: u8,
    pub on: bool,
}

/// Why a well-formed control event produced no command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("unknown control {0:?}")]
    UnknownControl(String),
}

/// Result of dispatching one control event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Action(Action),
    /// Topic is not a control command; other traffic on the bus is expected.
    Ignored,
    Rejected(RejectReason),
}

/// Resolves control events against a channel registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    prefix: String,
    registry: ChannelRegistry,
}

impl Dispatcher {
    pub fn new(prefix: impl Into<String>, registry: ChannelRegistry) -> Self {
        Self {
            prefix: prefix.into(),
            registry,
        }
    }

    /// Dispatcher for the control topics under `topics`.
    pub fn for_device(topics: &DeviceTopics, registry: ChannelRegistry) -> Self {
        Self::new(topics.control_prefix(), registry)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// Turn `<prefix><name>/on` + payload into an [`Action`].
    pub fn handle_control_event(&self, event: &ControlEvent) -> Dispatch {
        let topic = event.topic.as_str();
        let Some(rest) = topic.strip_prefix(self.prefix.as_str()) else {
            debug!(topic, "ignored: outside control prefix");
            return Dispatch::Ignored;
        };

        let mut parts = rest.split('/');
        let name = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(ON_SUFFIX), None) => name,
            _ => {
                debug!(topic, "ignored: not a control command topic");
                return Dispatch::Ignored;
            }
        };

        let Some(channel) = self.registry.lookup_by_name(name) else {
            warn!(topic, control = name, "rejected: unknown control");
            return Dispatch::Rejected(RejectReason::UnknownControl(name.to_string()));
        };

        let on = event.payload == ON_PAYLOAD;
        info!(control = name, channel, on, "dispatched");
        Dispatch::Action(Action { channel, on })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "/devices/ZoneBeast/controls/";

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(PREFIX, ChannelRegistry::zone_beast())
    }

    fn dispatch(topic: &str, payload: &str) -> Dispatch {
        dispatcher().handle_control_event(&ControlEvent::new(topic, payload))
    }

    #[test]
    fn on_payload_switches_on() {
        assert_eq!(
            dispatch("/devices/ZoneBeast/controls/Line 1: 1 Out/on", "1"),
            Dispatch::Action(Action {
                channel: 4,
                on: true
            })
        );
    }

    #[test]
    fn anything_else_switches_off() {
        for payload in ["0", "yes", "", "true", " 1", "11"] {
            assert_eq!(
                dispatch("/devices/ZoneBeast/controls/Line 1: 1 Out/on", payload),
                Dispatch::Action(Action {
                    channel: 4,
                    on: false
                }),
                "payload {payload:?}"
            );
        }
    }

    #[test]
    fn unknown_control_rejected() {
        let result = dispatch("/devices/ZoneBeast/controls/Nonexistent/on", "1");
        assert_eq!(
            result,
            Dispatch::Rejected(RejectReason::UnknownControl("Nonexistent".to_string()))
        );
        if let Dispatch::Rejected(reason) = result {
            assert!(reason.to_string().starts_with("unknown control"));
        }
    }

    #[test]
    fn foreign_topics_ignored() {
        for topic in [
            "/devices/Other/controls/Line 1: 1 Out/on",
            "/devices/ZoneBeast/meta/name",
            "devices/ZoneBeast/controls/Line 1: 1 Out/on",
            "",
        ] {
            assert_eq!(dispatch(topic, "1"), Dispatch::Ignored, "topic {topic:?}");
        }
    }

    #[test]
    fn wrong_shape_ignored_not_rejected() {
        for topic in [
            "/devices/ZoneBeast/controls/Line 1: 1 Out",
            "/devices/ZoneBeast/controls/Line 1: 1 Out/off",
            "/devices/ZoneBeast/controls/Line 1: 1 Out/on/extra",
            "/devices/ZoneBeast/controls/Nonexistent/meta/type",
            "/devices/ZoneBeast/controls/Nonexistent",
            "/devices/ZoneBeast/controls/",
        ] {
            assert_eq!(dispatch(topic, "1"), Dispatch::Ignored, "topic {topic:?}");
        }
    }

    #[test]
    fn every_registered_channel_resolves() {
        let dispatcher = dispatcher();
        for channel in dispatcher.registry().iter() {
            let event = ControlEvent::new(format!("{PREFIX}{}/on", channel.name), "1");
            assert_eq!(
                dispatcher.handle_control_event(&event),
                Dispatch::Action(Action {
                    channel: channel.number,
                    on: true
                })
            );
        }
    }

    #[test]
    fn for_device_uses_control_prefix() {
        let dispatcher = Dispatcher::for_device(
            &DeviceTopics::new("/devices/ZoneBeast"),
            ChannelRegistry::zone_beast(),
        );
        assert_eq!(dispatcher.prefix(), PREFIX);
    }
}
