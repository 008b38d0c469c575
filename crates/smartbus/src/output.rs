use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use smartbus_frame::{Frame, LogicalCommand};
use smartbus_gateway::{Action, DeviceTopics, Dispatcher};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    channel: u8,
    on: bool,
    opcode: u16,
    target_subnet: u8,
    target_device: u8,
    payload: &'a [u8],
    length: u8,
    wire_size: usize,
    frame: String,
}

pub fn print_frame(action: Action, command: &LogicalCommand, frame: &Frame, format: OutputFormat) {
    let header = command.header();
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                channel: action.channel,
                on: action.on,
                opcode: header.opcode,
                target_subnet: header.target_subnet,
                target_device: header.target_device,
                payload: command.payload(),
                length: frame.length_byte(),
                wire_size: frame.wire_size(),
                frame: frame.hex_dump(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CHANNEL", "STATE", "OPCODE", "TARGET", "FRAME"])
                .add_row(vec![
                    action.channel.to_string(),
                    state_label(action.on).to_string(),
                    format!("0x{:04x}", header.opcode),
                    format!("{}/{}", header.target_subnet, header.target_device),
                    frame.hex_dump(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "channel={} state={} opcode=0x{:04x} size={} frame={}",
                action.channel,
                state_label(action.on),
                header.opcode,
                frame.wire_size(),
                frame.hex_dump()
            );
        }
        OutputFormat::Raw => {
            print_raw(frame.as_bytes());
        }
    }
}

#[derive(Serialize)]
struct ChannelOutput<'a> {
    order: usize,
    channel: u8,
    name: &'a str,
    topic: String,
}

pub fn print_channels(dispatcher: &Dispatcher, topics: &DeviceTopics, format: OutputFormat) {
    let rows: Vec<ChannelOutput<'_>> = dispatcher
        .registry()
        .iter_ordered()
        .map(|(order, ch)| ChannelOutput {
            order,
            channel: ch.number,
            name: &ch.name,
            topic: topics.control_on(&ch.name),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ORDER", "CHANNEL", "NAME", "COMMAND TOPIC"]);
            for row in &rows {
                table.add_row(vec![
                    row.order.to_string(),
                    row.channel.to_string(),
                    row.name.to_string(),
                    row.topic.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!("{}\t{}\t{}", row.order, row.channel, row.name);
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn state_label(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
