//! Startup publications: device name, per-switch metadata and subscriptions.

use tracing::{debug, info};

use crate::bus::{BusClient, BusMessage, DeviceTopics, Qos};
use crate::error::Result;
use crate::registry::ChannelRegistry;

/// Control type every relay channel is announced as.
pub const SWITCH_TYPE: &str = "switch";

/// State published for every channel at startup.
pub const INITIAL_STATE: &str = "0";

/// Announce the device and its switches, then subscribe to their command topics.
pub fn announce<B: BusClient + ?Sized>(
    bus: &mut B,
    topics: &DeviceTopics,
    device_title: &str,
    registry: &ChannelRegistry,
) -> Result<()> {
    bus.publish(BusMessage::retained(
        topics.device_name(),
        device_title,
        Qos::ExactlyOnce,
    ))?;

    for (order, channel) in registry.iter_ordered() {
        let name = channel.name.as_str();
        bus.publish(BusMessage::retained(
            topics.control_meta(name, "type"),
            SWITCH_TYPE,
            Qos::ExactlyOnce,
        ))?;
        bus.publish(BusMessage::retained(
            topics.control_meta(name, "order"),
            order.to_string(),
            Qos::ExactlyOnce,
        ))?;
        bus.publish(BusMessage::retained(
            topics.control(name),
            INITIAL_STATE,
            Qos::AtLeastOnce,
        ))?;
        bus.subscribe(&topics.control_on(name))?;
        debug!(control = name, channel = channel.number, order, "announced switch");
    }

    info!(
        device = topics.root(),
        switches = registry.len(),
        "device announced"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::registry::RelayChannel;

    #[derive(Default)]
    struct RecordingBus {
        published: Vec<BusMessage>,
        subscribed: Vec<String>,
        fail_after: Option<usize>,
    }

    impl BusClient for RecordingBus {
        fn publish(&mut self, message: BusMessage) -> Result<()> {
            if self.fail_after == Some(self.published.len()) {
                return Err(GatewayError::Bus("broker gone".to_string()));
            }
            self.published.push(message);
            Ok(())
        }

        fn subscribe(&mut self, topic: &str) -> Result<()> {
            self.subscribed.push(topic.to_string());
            Ok(())
        }
    }

    fn registry() -> ChannelRegistry {
        ChannelRegistry::new(vec![
            RelayChannel::new(4, "Line 1: 1 Out"),
            RelayChannel::new(15, "16A Relay"),
        ])
        .unwrap()
    }

    #[test]
    fn announces_in_registry_order() {
        let mut bus = RecordingBus::default();
        let topics = DeviceTopics::new("/devices/ZoneBeast");

        announce(&mut bus, &topics, "Zone Beast", &registry()).unwrap();

        let published: Vec<(&str, &str, Qos, bool)> = bus
            .published
            .iter()
            .map(|m| (m.topic.as_str(), m.payload.as_str(), m.qos, m.retained))
            .collect();
        assert_eq!(
            published,
            vec![
                ("/devices/ZoneBeast/meta/name", "Zone Beast", Qos::ExactlyOnce, true),
                (
                    "/devices/ZoneBeast/controls/Line 1: 1 Out/meta/type",
                    "switch",
                    Qos::ExactlyOnce,
                    true
                ),
                (
                    "/devices/ZoneBeast/controls/Line 1: 1 Out/meta/order",
                    "1",
                    Qos::ExactlyOnce,
                    true
                ),
                (
                    "/devices/ZoneBeast/controls/Line 1: 1 Out",
                    "0",
                    Qos::AtLeastOnce,
                    true
                ),
                (
                    "/devices/ZoneBeast/controls/16A Relay/meta/type",
                    "switch",
                    Qos::ExactlyOnce,
                    true
                ),
                (
                    "/devices/ZoneBeast/controls/16A Relay/meta/order",
                    "2",
                    Qos::ExactlyOnce,
                    true
                ),
                (
                    "/devices/ZoneBeast/controls/16A Relay",
                    "0",
                    Qos::AtLeastOnce,
                    true
                ),
            ]
        );
        assert_eq!(
            bus.subscribed,
            vec![
                "/devices/ZoneBeast/controls/Line 1: 1 Out/on",
                "/devices/ZoneBeast/controls/16A Relay/on",
            ]
        );
    }

    #[test]
    fn bus_failure_stops_announcement() {
        let mut bus = RecordingBus {
            fail_after: Some(2),
            ..RecordingBus::default()
        };
        let topics = DeviceTopics::new("/devices/ZoneBeast");

        let err = announce(&mut bus, &topics, "Zone Beast", &registry()).unwrap_err();
        assert!(matches!(err, GatewayError::Bus(_)));
        assert_eq!(bus.published.len(), 2);
        assert!(bus.subscribed.is_empty());
    }
}
