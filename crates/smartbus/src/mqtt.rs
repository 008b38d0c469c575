use std::time::{Duration, Instant};

use rumqttc::{Client, Connection, Event, MqttOptions, Outgoing, QoS};
use smartbus_gateway::{BusClient, BusMessage, GatewayError, Qos, Result};
use tracing::debug;

use crate::config::MqttSettings;

/// Requests queued per switch during the announcement (3 publishes, 1 subscribe).
const REQUESTS_PER_SWITCH: usize = 4;

/// QoS for `<control>/on` subscriptions.
pub const COMMAND_QOS: QoS = QoS::AtMostOnce;

/// How long shutdown keeps polling for the DISCONNECT to go out.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// [`BusClient`] backed by a synchronous rumqttc client.
pub struct MqttBus {
    client: Client,
}

/// Create a client and its connection. Nothing is sent until the connection
/// is polled.
///
/// The request queue is sized so the whole startup announcement fits while
/// the connection is not being polled.
pub fn connect(settings: &MqttSettings, switches: usize) -> (MqttBus, Connection) {
    let mut options = MqttOptions::new(&settings.client_id, &settings.host, settings.port);
    options.set_keep_alive(Duration::from_secs(settings.keep_alive));
    let capacity = REQUESTS_PER_SWITCH * switches + 8;
    let (client, connection) = Client::new(options, capacity);
    (MqttBus { client }, connection)
}

impl MqttBus {
    /// Queue a DISCONNECT and poll `connection` until it is written, the
    /// connection drops, or [`SHUTDOWN_GRACE`] runs out.
    pub fn shutdown(&mut self, connection: &mut Connection) -> Result<()> {
        self.client.disconnect().map_err(bus_error)?;

        let deadline = Instant::now() + SHUTDOWN_GRACE;
        while let Some(left) = deadline.checked_duration_since(Instant::now()) {
            match connection.recv_timeout(left) {
                Ok(Ok(Event::Outgoing(Outgoing::Disconnect))) => {
                    debug!("mqtt: disconnect sent");
                    break;
                }
                Ok(Ok(_)) => {}
                Ok(Err(_)) | Err(_) => break,
            }
        }
        Ok(())
    }
}

impl BusClient for MqttBus {
    fn publish(&mut self, message: BusMessage) -> Result<()> {
        self.client
            .publish(
                message.topic,
                to_qos(message.qos),
                message.retained,
                message.payload.into_bytes(),
            )
            .map_err(bus_error)
    }

    fn subscribe(&mut self, topic: &str) -> Result<()> {
        self.client
            .subscribe(topic, COMMAND_QOS)
            .map_err(bus_error)
    }
}

fn to_qos(qos: Qos) -> QoS {
    match qos {
        Qos::AtMostOnce => QoS::AtMostOnce,
        Qos::AtLeastOnce => QoS::AtLeastOnce,
        Qos::ExactlyOnce => QoS::ExactlyOnce,
    }
}

fn bus_error(err: rumqttc::ClientError) -> GatewayError {
    GatewayError::Bus(err.to_string())
}
