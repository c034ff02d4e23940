//! gui/update/browser.rs
//! Browser list: adding files, check marks, sorting, removal, dialogs.

use std::path::PathBuf;

use iced::Task;
use log::info;

use super::super::state::{Confirm, Message, Notice, Tagsmith};
use super::editor::load_draft;
use crate::core::field::Field;
use crate::core::playback::PlayerCommand;
use crate::core::types::RecordId;
use crate::core::working_set::AddReport;

pub(crate) fn path_input_changed(state: &mut Tagsmith, s: String) -> Task<Message> {
    state.path_input = s;
    Task::none()
}

/// Add one file, or every audio file directly inside a folder.
pub(crate) fn add_path(state: &mut Tagsmith) -> Task<Message> {
    if state.is_modal() {
        return Task::none();
    }

    let raw = state.path_input.trim();
    if raw.is_empty() {
        state.status = "Type a folder or file path first.".into();
        return Task::none();
    }
    let path = PathBuf::from(raw);

    let report = if path.is_dir() {
        match state
            .files
            .add_directory(&path, &state.settings.audio_extension)
        {
            Ok(r) => r,
            Err(e) => {
                state.status = format!("Cannot read folder: {e}");
                return Task::none();
            }
        }
    } else if path.is_file() {
        state.files.add_paths([path])
    } else {
        state.status = format!("Not found: {}", path.display());
        return Task::none();
    };

    if let Some((field, ascending)) = state.sort {
        state.files.sort_by(field, ascending);
    }
    if state.active.is_none() {
        if let Some(first) = report.added.first().copied() {
            state.active = Some(first);
            load_draft(state);
        }
    }

    state.status = add_summary(&report);
    if !report.failures.is_empty() {
        let body = report
            .failures
            .iter()
            .map(|(p, e)| format!("{}: {e}", p.display()))
            .collect::<Vec<_>>()
            .join("\n");
        state.notice = Some(Notice::new("Some files could not be read", body));
    }
    state.path_input.clear();

    Task::none()
}

fn add_summary(report: &AddReport) -> String {
    let mut s = format!("Added {} file(s).", report.added.len());
    if report.duplicates > 0 {
        s.push_str(&format!(" {} already listed.", report.duplicates));
    }
    if !report.failures.is_empty() {
        s.push_str(&format!(" {} unreadable.", report.failures.len()));
    }
    s
}

pub(crate) fn select_record(state: &mut Tagsmith, id: RecordId) -> Task<Message> {
    if state.is_modal() || state.files.get(id).is_none() {
        return Task::none();
    }
    state.active = Some(id);
    load_draft(state);
    Task::none()
}

pub(crate) fn toggle_check(state: &mut Tagsmith, id: RecordId) -> Task<Message> {
    if !state.is_modal() {
        state.files.toggle(id);
    }
    Task::none()
}

pub(crate) fn check_all(state: &mut Tagsmith) -> Task<Message> {
    if !state.is_modal() {
        state.files.check_all();
    }
    Task::none()
}

pub(crate) fn uncheck_all(state: &mut Tagsmith) -> Task<Message> {
    if !state.is_modal() {
        state.files.uncheck_all();
    }
    Task::none()
}

/// Clicking the sorted column again flips the direction.
pub(crate) fn sort_by(state: &mut Tagsmith, field: Field) -> Task<Message> {
    if state.is_modal() {
        return Task::none();
    }
    let ascending = match state.sort {
        Some((f, asc)) if f == field => !asc,
        _ => true,
    };
    state.sort = Some((field, ascending));
    state.files.sort_by(field, ascending);
    Task::none()
}

pub(crate) fn remove_checked(state: &mut Tagsmith) -> Task<Message> {
    if state.is_modal() {
        return Task::none();
    }
    let n = state.files.checked().len();
    if n == 0 {
        state.notice = Some(no_selection());
    } else {
        state.confirm = Some(Confirm::RemoveChecked(n));
    }
    Task::none()
}

pub(crate) fn no_selection() -> Notice {
    Notice::new("No files selected", "Check one or more files in the list first.")
}

pub(crate) fn confirm_yes(state: &mut Tagsmith) -> Task<Message> {
    match state.confirm.take() {
        Some(Confirm::RemoveChecked(_)) => {
            let checked = state.files.checked();

            if let Some(playing) = state.transport.now_playing {
                if checked.contains(&playing) {
                    state.send(PlayerCommand::Stop);
                    state.transport.now_playing = None;
                    state.transport.is_playing = false;
                    state.transport.reset_position();
                }
            }

            let removed = state.files.remove(&checked);
            if state.active.is_some_and(|id| checked.contains(&id)) {
                state.active = None;
                load_draft(state);
            }
            info!("removed {removed} file(s) from the list");
            state.status = format!("Removed {removed} file(s) from the list.");
        }
        Some(Confirm::RemoveCover(id)) => {
            let Some(record) = state.files.get_mut(id) else {
                return Task::none();
            };
            match record.commit(Field::Cover, "") {
                Ok(()) => state.status = format!("Cover removed from {}.", record.base_name()),
                Err(e) => state.notice = Some(Notice::new("Cover not removed", e.to_string())),
            }
        }
        None => {}
    }
    Task::none()
}

pub(crate) fn confirm_no(state: &mut Tagsmith) -> Task<Message> {
    state.confirm = None;
    Task::none()
}

pub(crate) fn dismiss_notice(state: &mut Tagsmith) -> Task<Message> {
    state.notice = None;
    Task::none()
}
