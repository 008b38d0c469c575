use smartbus_gateway::{
    Action, ChannelRegistry, ControlEvent, DeviceTopics, Dispatch, Dispatcher, ON_PAYLOAD,
};

use crate::cmd::{FrameArgs, SwitchState};
use crate::config::Config;
use crate::exit::{frame_error, gateway_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: FrameArgs, format: OutputFormat) -> CliResult<i32> {
    let config = Config::load(args.config.as_deref())?;
    let template = config.gateway.command;
    let registry = ChannelRegistry::new(config.gateway.channels)
        .map_err(|err| gateway_error("invalid configuration", err))?;
    let topics = DeviceTopics::new(config.gateway.device_topic);
    let dispatcher = Dispatcher::for_device(&topics, registry);

    let action = resolve_action(&args, &dispatcher, &topics)?;
    let command = template.to_command(action);
    let frame = command
        .to_frame()
        .map_err(|err| frame_error("frame build failed", err))?;

    print_frame(action, &command, &frame, format);
    Ok(SUCCESS)
}

/// A bare channel number is taken as is. A control name goes through the
/// same dispatch path as a bus command would.
fn resolve_action(
    args: &FrameArgs,
    dispatcher: &Dispatcher,
    topics: &DeviceTopics,
) -> CliResult<Action> {
    let on = args.state == SwitchState::On;
    if let Some(channel) = args.channel {
        return Ok(Action { channel, on });
    }

    let Some(name) = args.control.as_deref() else {
        return Err(CliError::new(USAGE, "either --channel or --control is required"));
    };
    let payload = if on { ON_PAYLOAD } else { "0" };
    match dispatcher.handle_control_event(&ControlEvent::new(topics.control_on(name), payload)) {
        Dispatch::Action(action) => Ok(action),
        Dispatch::Rejected(reason) => Err(CliError::new(USAGE, reason.to_string())),
        Dispatch::Ignored => Err(CliError::new(
            USAGE,
            format!("{name:?} is not a valid control name"),
        )),
    }
}
