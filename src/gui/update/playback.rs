//! gui/update/playback.rs
//! GUI-playback engine bridge
//!
//! - `now_playing` is a `RecordId`, so sorting the list mid-song is harmless.
//! - GUI never touches rodio directly; all timing comes from engine events
//!   drained on `TickPlayback`.

use iced::Task;
use log::debug;

use super::super::state::{Message, Tagsmith};
use crate::core::playback::{PlayerCommand, PlayerEvent};
use crate::core::types::RecordId;

pub(crate) fn drain_events(state: &mut Tagsmith) -> Task<Message> {
    let drained: Vec<PlayerEvent> = state.playback_events.try_iter().collect();
    for ev in drained {
        handle_event(state, ev);
    }
    Task::none()
}

pub(crate) fn play_record(state: &mut Tagsmith, id: RecordId) -> Task<Message> {
    let Some(record) = state.files.get(id) else {
        state.status = "Play failed: file is no longer in the list.".into();
        return Task::none();
    };

    let path = record.path().to_path_buf();
    debug!("play {}", path.display());
    state.send(PlayerCommand::PlayFile(path));

    state.transport.now_playing = Some(id);
    state.transport.is_playing = true;
    state.transport.reset_position();
    Task::none()
}

pub(crate) fn toggle_play_pause(state: &mut Tagsmith) -> Task<Message> {
    if state.transport.is_playing {
        state.send(PlayerCommand::Pause);
        state.transport.is_playing = false;
        return Task::none();
    }

    if state.transport.now_playing.is_some() {
        state.send(PlayerCommand::Resume);
        state.transport.is_playing = true;
        return Task::none();
    }

    match state.active.or_else(|| state.files.first()) {
        Some(id) => play_record(state, id),
        None => {
            state.status = "Nothing to play.".into();
            Task::none()
        }
    }
}

pub(crate) fn stop(state: &mut Tagsmith) -> Task<Message> {
    state.send(PlayerCommand::Stop);
    state.transport.is_playing = false;
    state.transport.reset_position();
    Task::none()
}

/// Next in list order, wrapping to the top.
pub(crate) fn next(state: &mut Tagsmith) -> Task<Message> {
    let anchor = state.transport.now_playing.or(state.active);
    let target = anchor
        .and_then(|id| state.files.next_after(id))
        .or_else(|| state.files.first());

    match target {
        Some(id) => play_record(state, id),
        None => Task::none(),
    }
}

/// Previous in list order, wrapping to the bottom.
pub(crate) fn prev(state: &mut Tagsmith) -> Task<Message> {
    let anchor = state.transport.now_playing.or(state.active);
    let target = anchor
        .and_then(|id| state.files.previous_before(id))
        .or_else(|| state.files.ids().last().copied());

    match target {
        Some(id) => play_record(state, id),
        None => Task::none(),
    }
}

/// Seek slider changed: preview only (UI updates, no engine command).
pub(crate) fn seek_preview(state: &mut Tagsmith, ratio: f32) -> Task<Message> {
    let Some(dur_ms) = state.transport.duration_ms else {
        return Task::none();
    };

    let ratio = ratio.clamp(0.0, 1.0);
    state.transport.seek_preview_ratio = Some(ratio);
    state.transport.position_ms = (((ratio as f64) * (dur_ms as f64)).round() as u64).min(dur_ms);
    Task::none()
}

/// Seek slider released: commit the last preview to the engine.
pub(crate) fn seek_commit(state: &mut Tagsmith) -> Task<Message> {
    let Some(ratio) = state.transport.seek_preview_ratio.take() else {
        return Task::none();
    };
    let Some(dur_ms) = state.transport.duration_ms else {
        return Task::none();
    };

    // Seeking to *exactly* the end tends to produce EOF weirdness; clamp slightly.
    let target_ms =
        (((ratio as f64) * (dur_ms as f64)).round() as u64).min(dur_ms.saturating_sub(1));

    state.send(PlayerCommand::Seek(target_ms));
    state.transport.position_ms = target_ms;
    Task::none()
}

pub(crate) fn set_volume(state: &mut Tagsmith, volume: f32) -> Task<Message> {
    let volume = volume.clamp(0.0, 1.0);
    state.transport.volume = volume;
    state.send(PlayerCommand::SetVolume(volume));
    Task::none()
}

pub(crate) fn handle_event(state: &mut Tagsmith, event: PlayerEvent) {
    let t = &mut state.transport;

    match event {
        PlayerEvent::Started { path, duration_ms } => {
            t.is_playing = true;
            t.position_ms = 0;
            t.seek_preview_ratio = None;
            // Fall back to what the tag reader measured.
            let measured = t
                .now_playing
                .and_then(|id| state.files.get(id))
                .and_then(|r| r.duration_ms());
            t.duration_ms = duration_ms.or(measured);
            state.status = format!("Now playing: {}", path.display());
        }
        PlayerEvent::Paused => t.is_playing = false,
        PlayerEvent::Resumed => t.is_playing = true,
        PlayerEvent::Stopped => {
            t.is_playing = false;
            t.reset_position();
        }
        PlayerEvent::Position { position_ms } => {
            // If user is dragging the seek slider, don't fight them.
            if t.seek_preview_ratio.is_none() {
                t.position_ms = position_ms;
            }
        }
        PlayerEvent::TrackEnded => {
            t.is_playing = false;
            t.position_ms = 0;
            t.seek_preview_ratio = None;
        }
        PlayerEvent::Error(err) => {
            t.is_playing = false;
            state.status = format!("Playback error: {err}");
        }
    }
}
