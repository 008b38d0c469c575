/// Errors that can occur while configuring or running the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Two channels share a display name.
    #[error("duplicate channel name: {0:?}")]
    DuplicateChannel(String),

    /// A channel name cannot be used as a topic segment.
    #[error("invalid name for channel {number}: {name:?}")]
    InvalidChannelName { number: u8, name: String },

    /// The bus collaborator failed to publish or subscribe.
    #[error("bus error: {0}")]
    Bus(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
