//! gui/update/editor.rs
//! Field editor for the active record: edit a draft, commit one field.

use iced::Task;

use super::super::state::{Confirm, FieldDraft, Message, Notice, Tagsmith};
use crate::core::field::Field;

/// Refill the draft from the active record (or clear it).
pub(crate) fn load_draft(state: &mut Tagsmith) {
    let Some(record) = state.active.and_then(|id| state.files.get(id)) else {
        state.draft = FieldDraft::default();
        return;
    };

    state.draft.values = Field::TEXT
        .into_iter()
        .map(|f| (f, record.text(f).to_string()))
        .collect();
}

pub(crate) fn draft_changed(state: &mut Tagsmith, field: Field, value: String) -> Task<Message> {
    state.draft.values.insert(field, value);
    Task::none()
}

pub(crate) fn commit_field(state: &mut Tagsmith, field: Field) -> Task<Message> {
    if state.is_modal() {
        return Task::none();
    }
    let Some(record) = state.active.and_then(|id| state.files.get_mut(id)) else {
        state.status = "No file selected.".into();
        return Task::none();
    };

    let value = state.draft.text(field).to_string();
    if record.text(field) == value {
        return Task::none();
    }

    match record.commit(field, &value) {
        Ok(()) => {
            state.status = format!("Saved {} of {}.", field.label(), record.base_name());
        }
        Err(e) => {
            state.notice = Some(Notice::new(format!("{} not saved", field.label()), e.to_string()));
        }
    }
    Task::none()
}

pub(crate) fn revert_draft(state: &mut Tagsmith) -> Task<Message> {
    load_draft(state);
    Task::none()
}

pub(crate) fn cover_source_changed(state: &mut Tagsmith, s: String) -> Task<Message> {
    state.draft.cover_source = s;
    Task::none()
}

pub(crate) fn set_cover(state: &mut Tagsmith) -> Task<Message> {
    if state.is_modal() {
        return Task::none();
    }
    let source = state.draft.cover_source.trim().to_string();
    if source.is_empty() {
        state.status = "Type the path of a jpg, gif or png image first.".into();
        return Task::none();
    }
    let Some(record) = state.active.and_then(|id| state.files.get_mut(id)) else {
        state.status = "No file selected.".into();
        return Task::none();
    };

    match record.commit(Field::Cover, &source) {
        Ok(()) => {
            state.status = format!("Cover set on {}.", record.base_name());
            state.draft.cover_source.clear();
        }
        Err(e) => state.notice = Some(Notice::new("Cover not set", e.to_string())),
    }
    Task::none()
}

/// Asks first; the write happens on `ConfirmYes`.
pub(crate) fn remove_cover(state: &mut Tagsmith) -> Task<Message> {
    if state.is_modal() {
        return Task::none();
    }
    match state.active.and_then(|id| state.files.get(id).map(|r| (id, r))) {
        Some((id, record)) if record.has_cover() => {
            state.confirm = Some(Confirm::RemoveCover(id));
        }
        Some(_) => state.status = "This file has no cover.".into(),
        None => state.status = "No file selected.".into(),
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::super::testutil::harness;
    use super::super::update;
    use super::*;
    use crate::core::tags::testutil::write_silent_mp3;
    use crate::core::types::TagRecord;
    use tempfile::TempDir;

    fn send(app: &mut Tagsmith, msg: Message) {
        let _ = update(app, msg);
    }

    fn loaded(dir: &TempDir, names: &[&str]) -> crate::gui::update::testutil::Harness {
        for n in names {
            write_silent_mp3(&dir.path().join(n));
        }
        let mut h = harness();
        send(&mut h.app, Message::PathInputChanged(dir.path().display().to_string()));
        send(&mut h.app, Message::AddPath);
        h
    }

    #[test]
    fn commit_one_field_writes_to_disk() {
        let dir = TempDir::new().unwrap();
        let mut h = loaded(&dir, &["a.mp3"]);

        send(&mut h.app, Message::DraftChanged(Field::Artist, "Low".into()));
        send(&mut h.app, Message::DraftChanged(Field::Album, "Unsaved".into()));
        send(&mut h.app, Message::CommitField(Field::Artist));

        let back = TagRecord::load(dir.path().join("a.mp3")).unwrap();
        assert_eq!(back.text(Field::Artist), "Low");
        assert_eq!(back.text(Field::Album), "");

        send(&mut h.app, Message::RevertDraft);
        assert_eq!(h.app.draft.text(Field::Album), "");
        assert_eq!(h.app.draft.text(Field::Artist), "Low");
    }

    #[test]
    fn rename_conflict_shows_notice_and_keeps_name() {
        let dir = TempDir::new().unwrap();
        let mut h = loaded(&dir, &["a.mp3"]);
        write_silent_mp3(&dir.path().join("b.mp3"));

        send(&mut h.app, Message::DraftChanged(Field::FileName, "b.mp3".into()));
        send(&mut h.app, Message::CommitField(Field::FileName));

        assert!(h.app.notice.is_some());
        let id = h.app.active.unwrap();
        assert_eq!(h.app.files.get(id).unwrap().base_name(), "a.mp3");
    }

    #[test]
    fn remove_cover_needs_a_cover_and_a_yes() {
        let dir = TempDir::new().unwrap();
        let mut h = loaded(&dir, &["a.mp3"]);

        send(&mut h.app, Message::RemoveCover);
        assert!(h.app.confirm.is_none());
        assert_eq!(h.app.status, "This file has no cover.");

        let png = dir.path().join("front.png");
        std::fs::write(&png, [0x89, b'P', b'N', b'G']).unwrap();
        send(&mut h.app, Message::CoverSourceChanged(png.display().to_string()));
        send(&mut h.app, Message::SetCover);
        let id = h.app.active.unwrap();
        assert!(h.app.files.get(id).unwrap().has_cover());

        send(&mut h.app, Message::RemoveCover);
        assert_eq!(h.app.confirm, Some(Confirm::RemoveCover(id)));
        send(&mut h.app, Message::ConfirmYes);
        assert!(!h.app.files.get(id).unwrap().has_cover());
        assert!(!TagRecord::load(dir.path().join("a.mp3")).unwrap().has_cover());
    }
}
