//! Tagsmith
//!
//! # What this program is
//! A small desktop app (built with the `iced` GUI library) for batch-editing
//! the ID3 tags and file names of `.mp3` files, with a preview player.
//!
//! # How Iced works (super simple mental model)
//! - `Tagsmith` = the *entire memory* of the app (all the state)
//! - `Message` = "something happened" (button clicked, typed a letter, tick)
//! - `update(state, message)` = handles that thing and updates state
//! - `view(state)` = draws UI based on the current state
//!
//! **Message happens -> update changes state -> view redraws**
//!
//! # Current behavior
//! - Add a folder (or single file); every file is read eagerly.
//! - Edit one file's fields in the right panel, saved field by field.
//! - Check several files and open a batch edit: transform one field,
//!   guess tags from file names, or build file names from tags. The preview
//!   updates on every keystroke; Finish writes to disk.
//!
//! # Architecture constraints (on purpose)
//! - `core` owns all tag IO, templates and playback; no iced in there.
//! - `gui` renders core structs and forwards input. Tag writes are small
//!   and run on the UI thread.

mod core;
mod gui;

use env_logger::Env;

use crate::core::config::{default_config_path, load_config};
use crate::core::playback::start_playback;
use crate::gui::{Tagsmith, subscription, update, view};

fn main() -> iced::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let settings = load_config(&default_config_path());
    log::info!("starting Tagsmith (marker prefix {:?})", settings.marker_prefix);

    iced::application(
        move || Tagsmith::new(settings.clone(), start_playback(settings.volume)),
        update,
        view,
    )
    .title("Tagsmith")
    .subscription(subscription)
    .run()
}
