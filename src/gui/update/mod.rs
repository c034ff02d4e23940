//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Message, Tagsmith};

mod browser;
mod editor;
mod playback;
mod session;

pub(crate) fn update(state: &mut Tagsmith, message: Message) -> Task<Message> {
    match message {
        Message::TickPlayback => playback::drain_events(state),

        // Browser
        Message::PathInputChanged(s) => browser::path_input_changed(state, s),
        Message::AddPath => browser::add_path(state),
        Message::SelectRecord(id) => browser::select_record(state, id),
        Message::ToggleCheck(id) => browser::toggle_check(state, id),
        Message::CheckAll => browser::check_all(state),
        Message::UncheckAll => browser::uncheck_all(state),
        Message::SortBy(field) => browser::sort_by(state, field),
        Message::RemoveChecked => browser::remove_checked(state),

        // Dialogs
        Message::ConfirmYes => browser::confirm_yes(state),
        Message::ConfirmNo => browser::confirm_no(state),
        Message::DismissNotice => browser::dismiss_notice(state),

        // Field editor
        Message::DraftChanged(field, value) => editor::draft_changed(state, field, value),
        Message::CommitField(field) => editor::commit_field(state, field),
        Message::RevertDraft => editor::revert_draft(state),
        Message::CoverSourceChanged(s) => editor::cover_source_changed(state, s),
        Message::SetCover => editor::set_cover(state),
        Message::RemoveCover => editor::remove_cover(state),

        // Batch edit
        Message::OpenSession(mode) => session::open(state, mode),
        Message::TemplateChanged(s) => session::template_changed(state, s),
        Message::InsertMarker(key) => session::insert_marker(state, key),
        Message::ValueModeSelected(mode) => session::value_mode_selected(state, mode),
        Message::StartIndexChanged(s) => session::start_index_changed(state, s),
        Message::DigitsChanged(s) => session::digits_changed(state, s),
        Message::SessionCoverChanged(s) => session::cover_input_changed(state, s),
        Message::ChooseSessionCover => session::choose_cover(state),
        Message::ClearSessionCover => session::clear_cover(state),
        Message::MoveRowUp(row) => session::move_row_up(state, row),
        Message::MoveRowDown(row) => session::move_row_down(state, row),
        Message::RemoveRow(row) => session::remove_row(state, row),
        Message::FinishSession => session::finish(state),
        Message::CancelSession => session::cancel(state),

        // Playback
        Message::PlayRecord(id) => playback::play_record(state, id),
        Message::TogglePlayPause => playback::toggle_play_pause(state),
        Message::Stop => playback::stop(state),
        Message::Next => playback::next(state),
        Message::Prev => playback::prev(state),

        // Seek: preview vs commit
        Message::SeekTo(ratio) => playback::seek_preview(state, ratio),
        Message::SeekCommit => playback::seek_commit(state),

        Message::SetVolume(vol) => playback::set_volume(state, vol),
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    //! App state with a detached playback controller.

    use std::sync::mpsc::{Receiver, Sender};

    use crate::core::config::Settings;
    use crate::core::playback::{PlayerCommand, PlayerEvent, detached};
    use crate::gui::state::Tagsmith;

    pub(crate) struct Harness {
        pub app: Tagsmith,
        pub commands: Receiver<PlayerCommand>,
        pub events: Sender<PlayerEvent>,
    }

    pub(crate) fn harness() -> Harness {
        let (controller, commands, events, events_rx) = detached();
        let settings = Settings {
            marker_prefix: String::new(),
            ..Settings::default()
        };
        Harness {
            app: Tagsmith::new(settings, (controller, events_rx)),
            commands,
            events,
        }
    }
}
