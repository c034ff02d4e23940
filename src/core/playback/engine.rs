//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink (per current file)
//! - command loop + periodic position ticks
//!
//! Emits PlayerEvent back via a channel.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::{PlayerCommand, PlayerEvent};

const TICK_MS: u64 = 200;

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,

    sink: Option<Sink>,
    current_path: Option<PathBuf>,

    /// Applied to every new sink, so volume set while idle sticks.
    volume: f32,

    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<PlayerEvent>, volume: f32) -> Result<Self, String> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| format!("Failed to open default audio output: {e}"))?;

        Ok(Self {
            stream,
            sink: None,
            current_path: None,
            volume: volume.clamp(0.0, 1.0),
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>) {
        let tick = Duration::from_millis(TICK_MS);

        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            self.stop_internal();
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_internal();
    }

    fn emit(&self, event: PlayerEvent) {
        let _ = self.event_tx.send(event);
    }

    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        debug!("playback command: {cmd:?}");

        match cmd {
            PlayerCommand::PlayFile(path) => {
                if let Err(e) = self.play_file(path) {
                    warn!("playback failed: {e}");
                    self.emit(PlayerEvent::Error(e));
                }
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    self.emit(PlayerEvent::Paused);
                }
            }
            PlayerCommand::Resume => {
                if let Some(sink) = &self.sink {
                    sink.play();
                    self.emit(PlayerEvent::Resumed);
                }
            }
            PlayerCommand::Stop => {
                self.stop_internal();
                self.emit(PlayerEvent::Stopped);
            }
            PlayerCommand::Seek(ms) => {
                if let Some(sink) = &self.sink {
                    if let Err(e) = sink.try_seek(Duration::from_millis(ms)) {
                        self.emit(PlayerEvent::Error(format!("Seek failed: {e}")));
                    }
                }
            }
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        let Some(sink) = &self.sink else { return };

        let position_ms = sink.get_pos().as_millis() as u64;
        self.emit(PlayerEvent::Position { position_ms });

        if sink.empty() && self.current_path.is_some() {
            self.emit(PlayerEvent::TrackEnded);
            self.stop_internal();
        }
    }

    fn play_file(&mut self, path: PathBuf) -> Result<(), String> {
        self.stop_internal();

        let file = File::open(&path).map_err(|e| format!("Failed to open file: {e}"))?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| format!("Decode failed: {e}"))?;
        let duration_ms = decoder.total_duration().map(|d| d.as_millis() as u64);

        // rodio 0.21.x: Sink is created from the stream's mixer
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(decoder);
        sink.play();

        self.current_path = Some(path.clone());
        self.sink = Some(sink);

        self.emit(PlayerEvent::Started { path, duration_ms });
        Ok(())
    }

    fn stop_internal(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current_path = None;
    }
}
