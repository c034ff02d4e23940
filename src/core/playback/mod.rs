//! core/playback/mod.rs
//! Audio preview for the browser: one rodio engine on its own thread.
//!
//! The GUI owns a `PlaybackController` (commands in) and the event
//! `Receiver` (polled by a subscription). Nothing here knows about iced.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::error;

mod engine;

pub use engine::PlaybackEngine;

#[derive(Debug, Clone)]
pub struct PlaybackController {
    command_tx: Sender<PlayerCommand>,
}

impl PlaybackController {
    /// Best-effort send. If the engine died, the command is dropped.
    pub fn send(&self, cmd: PlayerCommand) {
        let _ = self.command_tx.send(cmd);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    PlayFile(PathBuf),
    Pause,
    Resume,
    Stop,
    Seek(u64),      // ms
    SetVolume(f32), // 0.0..=1.0
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Started {
        path: PathBuf,
        duration_ms: Option<u64>,
    },
    Paused,
    Resumed,
    Stopped,
    Position {
        position_ms: u64,
    },
    TrackEnded,
    Error(String),
}

/// Spawns the playback thread and returns:
/// - PlaybackController (stored in GUI state)
/// - Receiver<PlayerEvent> (drained on every playback tick)
///
/// If no audio output exists the thread reports one `Error` and exits;
/// later commands are silently dropped.
pub fn start_playback(volume: f32) -> (PlaybackController, Receiver<PlayerEvent>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();

    thread::spawn(move || {
        let mut engine = match PlaybackEngine::new(event_tx.clone(), volume) {
            Ok(e) => e,
            Err(msg) => {
                error!("audio output unavailable: {msg}");
                let _ = event_tx.send(PlayerEvent::Error(msg));
                return;
            }
        };

        engine.run(command_rx);
    });

    (PlaybackController { command_tx }, event_rx)
}

/// Controller wired to plain channels, no audio thread.
#[cfg(test)]
pub(crate) fn detached() -> (
    PlaybackController,
    Receiver<PlayerCommand>,
    Sender<PlayerEvent>,
    Receiver<PlayerEvent>,
) {
    let (command_tx, command_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    (PlaybackController { command_tx }, command_rx, event_tx, event_rx)
}

/// `m:ss`, or `h:mm:ss` from one hour up.
pub fn format_time(ms: u64) -> String {
    let total = ms / 1000;
    let (h, m, s) = (total / 3600, (total / 60) % 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
