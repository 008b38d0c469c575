use smartbus_gateway::{ChannelRegistry, DeviceTopics, Dispatcher};

use crate::cmd::ChannelsArgs;
use crate::config::Config;
use crate::exit::{gateway_error, CliResult, SUCCESS};
use crate::output::{print_channels, OutputFormat};

pub fn run(args: ChannelsArgs, format: OutputFormat) -> CliResult<i32> {
    let config = Config::load(args.config.as_deref())?;
    let registry = ChannelRegistry::new(config.gateway.channels)
        .map_err(|err| gateway_error("invalid configuration", err))?;
    let topics = DeviceTopics::new(config.gateway.device_topic);
    let dispatcher = Dispatcher::for_device(&topics, registry);

    print_channels(&dispatcher, &topics, format);
    Ok(SUCCESS)
}
