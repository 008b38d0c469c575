use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rumqttc::{ConnectReturnCode, Event, Packet, RecvTimeoutError};
use smartbus_gateway::{ControlEvent, Gateway};
use smartbus_transport::SerialPort;
use tracing::{info, warn};

use crate::cmd::RunArgs;
use crate::config::Config;
use crate::exit::{gateway_error, transport_error, CliError, CliResult, SUCCESS};
use crate::mqtt;

/// How long one poll of the MQTT connection may block before the stop flag
/// is checked again.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Pause after a connection error before rumqttc reconnects.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

pub fn run(args: RunArgs) -> CliResult<i32> {
    let mut config = Config::load(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let transport = SerialPort::open(&config.serial)
        .map_err(|err| transport_error("serial open failed", err))?;
    let mut gateway = Gateway::new(config.gateway, transport)
        .map_err(|err| gateway_error("invalid configuration", err))?;

    let switches = gateway.dispatcher().registry().len();
    let (mut bus, mut connection) = mqtt::connect(&config.mqtt, switches);
    info!(
        broker = %config.mqtt.host,
        port = config.mqtt.port,
        switches,
        "gateway started"
    );

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    while running.load(Ordering::SeqCst) {
        match connection.recv_timeout(POLL_INTERVAL) {
            Ok(Ok(Event::Incoming(Packet::ConnAck(ack)))) => {
                if ack.code != ConnectReturnCode::Success {
                    warn!(code = ?ack.code, "mqtt: connection refused");
                    continue;
                }
                info!("mqtt: connected");
                if let Err(err) = gateway.on_connect(&mut bus) {
                    warn!(error = %err, "device announcement failed");
                }
            }
            Ok(Ok(Event::Incoming(Packet::Publish(publish)))) => {
                let payload = String::from_utf8_lossy(&publish.payload).into_owned();
                gateway.on_message(&ControlEvent::new(publish.topic, payload));
            }
            Ok(Ok(_)) => {}
            Ok(Err(err)) => {
                warn!(error = %err, "mqtt: connection error");
                std::thread::sleep(RECONNECT_DELAY);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    info!("shutting down");
    if let Err(err) = bus.shutdown(&mut connection) {
        warn!(error = %err, "mqtt: disconnect failed");
    }
    Ok(SUCCESS)
}

fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(device) = &args.serial {
        config.serial.device = device.clone();
    }
    if let Some(baud_rate) = args.baud_rate {
        config.serial.baud_rate = baud_rate;
    }
    if let Some(host) = &args.broker {
        config.mqtt.host = host.clone();
    }
    if let Some(port) = args.port {
        config.mqtt.port = port;
    }
    if let Some(client_id) = &args.client_id {
        config.mqtt.client_id = client_id.clone();
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
