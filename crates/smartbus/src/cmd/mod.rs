use clap::{ArgGroup, Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod channels;
pub mod frame;
pub mod run;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the gateway: bridge MQTT switch commands to the serial line.
    Run(RunArgs),
    /// Print the frame for a single switch command without sending it.
    Frame(FrameArgs),
    /// List configured channels and their command topics.
    Channels(ChannelsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args),
        Command::Frame(args) => frame::run(args, format),
        Command::Channels(args) => channels::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// JSON configuration file.
    #[arg(long, short = 'c', env = "SMARTBUS_CONFIG")]
    pub config: Option<PathBuf>,
    /// Serial device (overrides config).
    #[arg(long, value_name = "DEVICE")]
    pub serial: Option<String>,
    /// Serial line speed (overrides config).
    #[arg(long)]
    pub baud_rate: Option<u32>,
    /// MQTT broker host (overrides config).
    #[arg(long, value_name = "HOST")]
    pub broker: Option<String>,
    /// MQTT broker port (overrides config).
    #[arg(long)]
    pub port: Option<u16>,
    /// MQTT client id (overrides config).
    #[arg(long)]
    pub client_id: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SwitchState {
    On,
    Off,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["channel", "control"])))]
pub struct FrameArgs {
    /// Desired switch state.
    pub state: SwitchState,
    /// Relay channel number.
    #[arg(long)]
    pub channel: Option<u8>,
    /// Configured control name, resolved through the channel registry.
    #[arg(long)]
    pub control: Option<String>,
    /// JSON configuration file.
    #[arg(long, env = "SMARTBUS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ChannelsArgs {
    /// JSON configuration file.
    #[arg(long, env = "SMARTBUS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
