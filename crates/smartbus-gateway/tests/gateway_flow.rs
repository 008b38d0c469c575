use smartbus_frame::build_frame;
use smartbus_gateway::{
    Action, BusClient, BusMessage, ControlEvent, EventOutcome, Gateway, GatewaySettings, Qos,
    RejectReason, Result,
};

#[derive(Default)]
struct FakeBus {
    published: Vec<BusMessage>,
    subscribed: Vec<String>,
}

impl BusClient for FakeBus {
    fn publish(&mut self, message: BusMessage) -> Result<()> {
        self.published.push(message);
        Ok(())
    }

    fn subscribe(&mut self, topic: &str) -> Result<()> {
        self.subscribed.push(topic.to_string());
        Ok(())
    }
}

fn relay_frame(channel: u8, level: u8) -> Vec<u8> {
    build_frame(1, 0x14, 0x0095, 0x31, 1, 0x1c, &[channel, level, 0, 0])
        .expect("frame should build")
        .as_bytes()
        .to_vec()
}

#[test]
fn connect_announces_every_switch() {
    let gateway = Gateway::new(GatewaySettings::default(), Vec::<u8>::new())
        .expect("default settings should be valid");
    let mut bus = FakeBus::default();

    gateway.on_connect(&mut bus).expect("announce should succeed");

    // device name + 3 publications per switch
    assert_eq!(bus.published.len(), 1 + 3 * 10);
    assert_eq!(bus.subscribed.len(), 10);
    assert_eq!(bus.published[0].topic, "/devices/ZoneBeast/meta/name");
    assert_eq!(bus.published[0].payload, "Zone Beast");

    let orders: Vec<&str> = bus
        .published
        .iter()
        .filter(|m| m.topic.ends_with("/meta/order"))
        .map(|m| m.payload.as_str())
        .collect();
    assert_eq!(orders, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);

    let initial: Vec<&BusMessage> = bus
        .published
        .iter()
        .filter(|m| m.payload == "0" && !m.topic.contains("/meta/"))
        .collect();
    assert_eq!(initial.len(), 10);
    assert!(initial.iter().all(|m| m.retained && m.qos == Qos::AtLeastOnce));

    assert_eq!(
        bus.subscribed.last().map(String::as_str),
        Some("/devices/ZoneBeast/controls/16A Relay/on")
    );
}

#[test]
fn session_writes_one_frame_per_action_in_order() {
    let mut gateway = Gateway::new(GatewaySettings::default(), Vec::<u8>::new())
        .expect("default settings should be valid");

    let events = [
        ("/devices/ZoneBeast/controls/Line 1: 1 Out/on", "1"),
        ("/devices/ZoneBeast/controls/Line 1: 1 Out", "1"),
        ("/devices/ZoneBeast/controls/Nonexistent/on", "1"),
        ("/devices/ZoneBeast/controls/Line 2: 9 Out/on", "yes"),
        ("/devices/Other/controls/Line 2: 9 Out/on", "1"),
        ("/devices/ZoneBeast/controls/16A Relay/on", "1"),
        ("/devices/ZoneBeast/controls/Line 1: 1 Out/on", "0"),
    ];

    let outcomes: Vec<EventOutcome> = events
        .iter()
        .map(|(topic, payload)| gateway.on_message(&ControlEvent::new(*topic, *payload)))
        .collect();

    assert!(matches!(
        outcomes[0],
        EventOutcome::Sent(Action {
            channel: 4,
            on: true
        })
    ));
    assert!(matches!(outcomes[1], EventOutcome::Ignored));
    assert!(matches!(
        outcomes[2],
        EventOutcome::Rejected(RejectReason::UnknownControl(ref name)) if name == "Nonexistent"
    ));
    assert!(matches!(
        outcomes[3],
        EventOutcome::Sent(Action {
            channel: 12,
            on: false
        })
    ));
    assert!(matches!(outcomes[4], EventOutcome::Ignored));
    assert!(matches!(
        outcomes[5],
        EventOutcome::Sent(Action {
            channel: 15,
            on: true
        })
    ));
    assert!(matches!(
        outcomes[6],
        EventOutcome::Sent(Action {
            channel: 4,
            on: false
        })
    ));

    let expected: Vec<u8> = [
        relay_frame(4, 100),
        relay_frame(12, 0),
        relay_frame(15, 100),
        relay_frame(4, 0),
    ]
    .concat();
    assert_eq!(gateway.into_transport(), expected);
}

#[test]
fn custom_template_changes_addressing() {
    let settings: GatewaySettings = serde_json::from_str(
        r#"{
            "device_topic": "/devices/Hall",
            "device_title": "Hall relays",
            "channels": [{"number": 2, "name": "Ceiling"}],
            "command": {"target_subnet": 3, "target_device": 7}
        }"#,
    )
    .expect("settings should parse");
    let mut gateway = Gateway::new(settings, Vec::<u8>::new()).expect("settings should be valid");

    let outcome = gateway.on_message(&ControlEvent::new("/devices/Hall/controls/Ceiling/on", "1"));
    assert!(matches!(outcome, EventOutcome::Sent(_)));

    let expected = build_frame(1, 0x14, 0x0095, 0x31, 3, 7, &[2, 100, 0, 0])
        .expect("frame should build");
    assert_eq!(gateway.transport().as_slice(), expected.as_bytes());
}
