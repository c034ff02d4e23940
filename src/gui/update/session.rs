//! gui/update/session.rs
//! Batch edit dialog: forwards every input to the open `EditSession`,
//! which re-previews the whole batch.

use std::path::PathBuf;

use iced::Task;
use log::warn;

use super::super::state::{Message, Notice, SessionDraft, Tagsmith};
use super::super::util::parse_optional_u32;
use super::browser::no_selection;
use super::editor::load_draft;
use crate::core::error::TagError;
use crate::core::session::{EditMode, EditSession};
use crate::core::template::{Key, ValueMode};
use crate::core::working_set::WorkingSet;

/// Widest running number the digits input accepts.
const MAX_DIGITS: usize = 12;

/// Run `f` against the open session, if any.
fn with_session(
    state: &mut Tagsmith,
    f: impl FnOnce(&mut EditSession, &mut WorkingSet),
) -> Task<Message> {
    if let Some(session) = state.session.as_mut() {
        f(session, &mut state.files);
    }
    Task::none()
}

pub(crate) fn open(state: &mut Tagsmith, mode: EditMode) -> Task<Message> {
    if state.is_modal() {
        return Task::none();
    }

    let ids = state.files.checked();
    match EditSession::open(&mut state.files, ids, mode, &state.settings) {
        Ok(session) => {
            state.session_draft = SessionDraft::for_session(&session);
            state.session = Some(session);
        }
        Err(TagError::EmptySelection) => state.notice = Some(no_selection()),
        Err(e) => state.notice = Some(Notice::new(mode.title(), e.to_string())),
    }
    Task::none()
}

pub(crate) fn template_changed(state: &mut Tagsmith, s: String) -> Task<Message> {
    with_session(state, |session, files| session.set_template(files, s))
}

pub(crate) fn insert_marker(state: &mut Tagsmith, key: Key) -> Task<Message> {
    with_session(state, |session, files| session.insert_marker(files, key))
}

pub(crate) fn value_mode_selected(state: &mut Tagsmith, mode: ValueMode) -> Task<Message> {
    with_session(state, |session, files| session.set_value_mode(files, mode))
}

pub(crate) fn start_index_changed(state: &mut Tagsmith, s: String) -> Task<Message> {
    let parsed = parse_optional_u32(&s);
    if parsed.is_err() {
        state.status = format!("Start index must be a whole number, got {s:?}.");
    }
    state.session_draft.start = s;

    match parsed {
        Ok(Some(n)) => with_session(state, |session, files| session.set_start_index(files, n)),
        _ => Task::none(),
    }
}

pub(crate) fn digits_changed(state: &mut Tagsmith, s: String) -> Task<Message> {
    let parsed = parse_optional_u32(&s);
    if parsed.is_err() {
        state.status = format!("Digits must be a whole number, got {s:?}.");
    }
    state.session_draft.digits = s;

    match parsed {
        Ok(Some(n)) => {
            let digits = (n as usize).min(MAX_DIGITS);
            if digits < n as usize {
                state.status = format!("Running numbers are at most {MAX_DIGITS} digits wide.");
            }
            with_session(state, |session, files| session.set_digits(files, digits))
        }
        _ => Task::none(),
    }
}

pub(crate) fn cover_input_changed(state: &mut Tagsmith, s: String) -> Task<Message> {
    state.session_draft.cover_source = s;
    Task::none()
}

pub(crate) fn choose_cover(state: &mut Tagsmith) -> Task<Message> {
    let source = PathBuf::from(state.session_draft.cover_source.trim());
    if source.as_os_str().is_empty() {
        state.status = "Type the path of a jpg, gif or png image first.".into();
        return Task::none();
    }
    with_session(state, |session, files| session.choose_cover(files, &source))
}

pub(crate) fn clear_cover(state: &mut Tagsmith) -> Task<Message> {
    with_session(state, |session, files| session.clear_cover(files))
}

pub(crate) fn move_row_up(state: &mut Tagsmith, row: usize) -> Task<Message> {
    with_session(state, |session, files| {
        session.move_up(files, row);
    })
}

pub(crate) fn move_row_down(state: &mut Tagsmith, row: usize) -> Task<Message> {
    with_session(state, |session, files| {
        session.move_down(files, row);
    })
}

pub(crate) fn remove_row(state: &mut Tagsmith, row: usize) -> Task<Message> {
    with_session(state, |session, files| {
        session.remove_row(files, row);
    })
}

/// Commit the batch. A refused rename keeps the dialog open so the
/// template can be fixed.
pub(crate) fn finish(state: &mut Tagsmith) -> Task<Message> {
    let Some(session) = state.session.as_ref() else {
        return Task::none();
    };
    if !session.can_finish() {
        state.notice = Some(no_selection());
        return Task::none();
    }
    if let Err(e) = session.validate(&state.files) {
        state.notice = Some(Notice::new("Rename refused", format!("{e}\nNo file was changed.")));
        return Task::none();
    }

    let Some(session) = state.session.take() else {
        return Task::none();
    };
    let title = session.mode().title();

    match session.commit(&mut state.files) {
        Ok(report) => {
            let title = if report.is_success() {
                title
            } else {
                format!("{title}: some files failed")
            };
            state.status = report.summary();
            state.notice = Some(Notice::new(title, report.summary()));
        }
        Err(e) => {
            warn!("batch commit refused: {e}");
            state.notice = Some(Notice::new(title, e.to_string()));
        }
    }

    if let Some((field, ascending)) = state.sort {
        state.files.sort_by(field, ascending);
    }
    load_draft(state);
    Task::none()
}

pub(crate) fn cancel(state: &mut Tagsmith) -> Task<Message> {
    if let Some(session) = state.session.take() {
        session.cancel(&mut state.files);
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{Harness, harness};
    use super::super::update;
    use super::*;
    use crate::core::field::Field;
    use crate::core::tags::testutil::write_silent_mp3;
    use tempfile::TempDir;

    fn send(app: &mut Tagsmith, msg: Message) {
        let _ = update(app, msg);
    }

    fn loaded(dir: &TempDir, names: &[&str]) -> Harness {
        for n in names {
            write_silent_mp3(&dir.path().join(n));
        }
        let mut h = harness();
        send(&mut h.app, Message::PathInputChanged(dir.path().display().to_string()));
        send(&mut h.app, Message::AddPath);
        h
    }

    #[test]
    fn every_batch_action_warns_on_empty_selection() {
        let dir = TempDir::new().unwrap();
        let mut h = loaded(&dir, &["a.mp3"]);

        for mode in [
            EditMode::Field(Field::Artist),
            EditMode::Cover,
            EditMode::GuessTags,
            EditMode::GuessName,
        ] {
            send(&mut h.app, Message::OpenSession(mode));
            assert!(h.app.session.is_none());
            assert_eq!(h.app.notice, Some(no_selection()));
            send(&mut h.app, Message::DismissNotice);
        }
    }

    #[test]
    fn guess_tags_round_trip_through_messages() {
        let dir = TempDir::new().unwrap();
        let mut h = loaded(&dir, &["Beatles_HeyJude.mp3"]);
        send(&mut h.app, Message::CheckAll);

        send(&mut h.app, Message::OpenSession(EditMode::GuessTags));
        send(&mut h.app, Message::TemplateChanged("al(.+?)_sn(.+?)".into()));

        let id = h.app.files.first().unwrap();
        assert_eq!(h.app.files.get(id).unwrap().staged(Field::Album), Some("Beatles"));

        send(&mut h.app, Message::FinishSession);
        assert!(h.app.session.is_none());
        assert_eq!(h.app.files.get(id).unwrap().text(Field::Album), "Beatles");
        assert!(h.app.notice.as_ref().unwrap().body.starts_with("Saved 1 file(s)"));
        assert_eq!(h.app.draft.text(Field::Title), "HeyJude");
    }

    #[test]
    fn refused_rename_keeps_the_dialog_open() {
        let dir = TempDir::new().unwrap();
        let mut h = loaded(&dir, &["a.mp3", "b.mp3"]);
        send(&mut h.app, Message::CheckAll);

        send(&mut h.app, Message::OpenSession(EditMode::GuessName));
        send(&mut h.app, Message::TemplateChanged("same".into()));
        send(&mut h.app, Message::FinishSession);

        assert!(h.app.session.is_some());
        assert_eq!(h.app.notice.as_ref().unwrap().title, "Rename refused");
        assert!(dir.path().join("a.mp3").exists());
        assert!(dir.path().join("b.mp3").exists());

        send(&mut h.app, Message::DismissNotice);
        send(&mut h.app, Message::TemplateChanged("song d".into()));
        send(&mut h.app, Message::FinishSession);
        assert!(h.app.session.is_none());
        assert!(dir.path().join("song 01.mp3").exists());
        assert!(dir.path().join("song 02.mp3").exists());
    }

    #[test]
    fn numbering_inputs_and_cancel() {
        let dir = TempDir::new().unwrap();
        let mut h = loaded(&dir, &["a.mp3"]);
        send(&mut h.app, Message::CheckAll);

        send(&mut h.app, Message::OpenSession(EditMode::Field(Field::Track)));
        send(&mut h.app, Message::ValueModeSelected(ValueMode::Custom));
        send(&mut h.app, Message::TemplateChanged("d".into()));
        send(&mut h.app, Message::StartIndexChanged("5".into()));
        send(&mut h.app, Message::DigitsChanged("3".into()));
        send(&mut h.app, Message::DigitsChanged("abc".into()));

        let id = h.app.files.first().unwrap();
        assert_eq!(h.app.files.get(id).unwrap().staged(Field::Track), Some("005"));
        assert_eq!(h.app.session_draft.digits, "abc");

        // Cleared while retyping: the box stays empty, the last number holds.
        send(&mut h.app, Message::StartIndexChanged(String::new()));
        assert_eq!(h.app.session_draft.start, "");
        assert_eq!(h.app.files.get(id).unwrap().staged(Field::Track), Some("005"));
        send(&mut h.app, Message::StartIndexChanged("7".into()));
        assert_eq!(h.app.files.get(id).unwrap().staged(Field::Track), Some("007"));

        send(&mut h.app, Message::DigitsChanged("20".into()));
        assert_eq!(h.app.session_draft.digits, "20");
        assert_eq!(h.app.session.as_ref().unwrap().numbering().digits, MAX_DIGITS);

        send(&mut h.app, Message::CancelSession);
        assert!(h.app.session.is_none());
        assert_eq!(h.app.files.get(id).unwrap().staged(Field::Track), None);
        assert_eq!(h.app.files.get(id).unwrap().text(Field::Track), "");
    }
}
