use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// A physical relay output and the name it is published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayChannel {
    pub number: u8,
    pub name: String,
}

impl RelayChannel {
    pub fn new(number: u8, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }
}

/// Fixed, ordered set of relay channels.
///
/// Registration order is the display order announced on the bus (1-based).
/// Names are unique and usable as a single topic segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRegistry {
    channels: Vec<RelayChannel>,
}

impl ChannelRegistry {
    /// Build a registry, rejecting duplicate or unusable names.
    pub fn new(channels: Vec<RelayChannel>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(channels.len());
        for channel in &channels {
            if !is_valid_name(&channel.name) {
                return Err(GatewayError::InvalidChannelName {
                    number: channel.number,
                    name: channel.name.clone(),
                });
            }
            if !seen.insert(channel.name.as_str()) {
                return Err(GatewayError::DuplicateChannel(channel.name.clone()));
            }
        }
        Ok(Self { channels })
    }

    /// Relay table of the Zone Beast controller.
    pub fn zone_beast() -> Self {
        Self {
            channels: zone_beast_channels(),
        }
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<u8> {
        self.channels
            .iter()
            .find(|channel| channel.name == name)
            .map(|channel| channel.number)
    }

    pub fn lookup_by_channel(&self, number: u8) -> Option<&RelayChannel> {
        self.channels.iter().find(|channel| channel.number == number)
    }

    /// Channels in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, RelayChannel> {
        self.channels.iter()
    }

    /// Channels paired with their 1-based display order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (usize, &RelayChannel)> {
        self.channels.iter().enumerate().map(|(i, ch)| (i + 1, ch))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChannelRegistry {
    type Item = &'a RelayChannel;
    type IntoIter = std::slice::Iter<'a, RelayChannel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Default relay table: outputs 13 and 14 are not exposed.
pub fn zone_beast_channels() -> Vec<RelayChannel> {
    vec![
        RelayChannel::new(4, "Line 1: 1 Out"),
        RelayChannel::new(5, "Line 1: 2 Out"),
        RelayChannel::new(6, "Line 1: 3 Out"),
        RelayChannel::new(7, "Line 1: 4 Out"),
        RelayChannel::new(8, "Line 1: 5 Out"),
        RelayChannel::new(9, "Line 1: 6 Out"),
        RelayChannel::new(10, "Line 1: 7 Out"),
        RelayChannel::new(11, "Line 2: 8 Out"),
        RelayChannel::new(12, "Line 2: 9 Out"),
        RelayChannel::new(15, "16A Relay"),
    ]
}

// MQTT wildcards and the level separator would break subscriptions.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '+', '#'])
}
