//! gui/subscription.rs
//! Poll playback events by emitting a periodic TickPlayback message.

use iced::{Subscription, time};
use std::time::Duration;

use super::state::{Message, Tagsmith};

pub(crate) fn subscription(_state: &Tagsmith) -> Subscription<Message> {
    time::every(Duration::from_millis(200)).map(|_| Message::TickPlayback)
}
