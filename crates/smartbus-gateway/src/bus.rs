//! Capability interface of the message bus collaborator.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Delivery guarantee for a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Qos {
    AtMostOnce = 0,
    #[default]
    AtLeastOnce = 1,
    ExactlyOnce = 2,
}

/// An outbound publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusMessage {
    pub topic: String,
    pub payload: String,
    pub qos: Qos,
    pub retained: bool,
}

impl BusMessage {
    /// A retained publication.
    pub fn retained(topic: impl Into<String>, payload: impl Into<String>, qos: Qos) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
            qos,
            retained: true,
        }
    }
}

/// What the gateway needs from a bus client.
pub trait BusClient {
    fn publish(&mut self, message: BusMessage) -> Result<()>;
    fn subscribe(&mut self, topic: &str) -> Result<()>;
}

/// Topic layout under one device root, e.g. `/devices/ZoneBeast`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTopics {
    root: String,
}

impl DeviceTopics {
    pub fn new(root: impl Into<String>) -> Self {
        let mut root = root.into();
        while root.ends_with('/') {
            root.pop();
        }
        Self { root }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// `<root>/meta/name`
    pub fn device_name(&self) -> String {
        format!("{}/meta/name", self.root)
    }

    /// `<root>/controls/`, the prefix of every control topic.
    pub fn control_prefix(&self) -> String {
        format!("{}/controls/", self.root)
    }

    /// `<root>/controls/<name>`, which carries the control's state.
    pub fn control(&self, name: &str) -> String {
        format!("{}/controls/{name}", self.root)
    }

    /// `<root>/controls/<name>/meta/<key>`
    pub fn control_meta(&self, name: &str, key: &str) -> String {
        format!("{}/controls/{name}/meta/{key}", self.root)
    }

    /// `<root>/controls/<name>/on`, where commands arrive.
    pub fn control_on(&self, name: &str) -> String {
        format!("{}/controls/{name}/on", self.root)
    }
}
