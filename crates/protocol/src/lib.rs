mod channel;
mod handler;
mod message;

pub use channel::{
    direct_route, ChannelError, ChannelHub, ThemePublisher, ThemeReceiver, CHANNEL_CAPACITY,
    CHANNEL_NAME,
};
pub use handler::{handle_message, handle_raw, pump};
pub use message::{MessageError, ThemeMessage};
