//! GUI state + messages.
//! Pure data definitions used by update/ + view/.

use std::collections::BTreeMap;
use std::sync::mpsc::Receiver;

use crate::core::config::Settings;
use crate::core::field::Field;
use crate::core::playback::{PlaybackController, PlayerCommand, PlayerEvent};
use crate::core::session::{EditMode, EditSession};
use crate::core::template::{Key, ValueMode};
use crate::core::types::RecordId;
use crate::core::working_set::WorkingSet;

/// Destructive actions wait here until the user says yes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Confirm {
    RemoveChecked(usize),
    RemoveCover(RecordId),
}

impl Confirm {
    pub(crate) fn question(self) -> String {
        match self {
            Confirm::RemoveChecked(n) => format!("Remove {n} file(s) from the list?"),
            Confirm::RemoveCover(_) => "Remove the cover picture from this file?".to_string(),
        }
    }
}

/// Modal message box (warnings, batch summaries).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub(crate) fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Draft values for the active record (strings, so user can type anything).
/// Committed one field at a time.
#[derive(Debug, Default, Clone)]
pub(crate) struct FieldDraft {
    pub values: BTreeMap<Field, String>,
    /// Path typed into the cover row.
    pub cover_source: String,
}

impl FieldDraft {
    pub(crate) fn text(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }
}

/// Typed text of the batch dialog inputs. Parsed values go to the session;
/// the text stays as typed (empty while the user is retyping a number).
#[derive(Debug, Default, Clone)]
pub(crate) struct SessionDraft {
    pub cover_source: String,
    pub start: String,
    pub digits: String,
}

impl SessionDraft {
    pub(crate) fn for_session(session: &EditSession) -> Self {
        let n = session.numbering();
        Self {
            cover_source: String::new(),
            start: n.start.to_string(),
            digits: n.digits.to_string(),
        }
    }
}

/// What the transport bar shows. Updated from `PlayerEvent`s.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    pub now_playing: Option<RecordId>,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
    /// Set while the seek slider is dragged.
    pub seek_preview_ratio: Option<f32>,
    pub volume: f32,
}

impl Transport {
    pub(crate) fn new(volume: f32) -> Self {
        Self {
            now_playing: None,
            is_playing: false,
            position_ms: 0,
            duration_ms: None,
            seek_preview_ratio: None,
            volume,
        }
    }

    pub(crate) fn reset_position(&mut self) {
        self.position_ms = 0;
        self.duration_ms = None;
        self.seek_preview_ratio = None;
    }
}

/// App state
pub(crate) struct Tagsmith {
    pub settings: Settings,
    pub status: String,

    // Browser
    pub path_input: String,
    pub files: WorkingSet,
    pub sort: Option<(Field, bool)>,
    pub active: Option<RecordId>,

    // Field editor (active record)
    pub draft: FieldDraft,

    // Batch edit
    pub session: Option<EditSession>,
    pub session_draft: SessionDraft,

    // Dialogs
    pub confirm: Option<Confirm>,
    pub notice: Option<Notice>,

    // Playback
    pub playback: PlaybackController,
    pub playback_events: Receiver<PlayerEvent>,
    pub transport: Transport,
}

impl Tagsmith {
    pub(crate) fn new(
        settings: Settings,
        (playback, playback_events): (PlaybackController, Receiver<PlayerEvent>),
    ) -> Self {
        let transport = Transport::new(settings.volume);
        Self {
            settings,
            status: "Type a folder or file path, then Add.".to_string(),

            path_input: String::new(),
            files: WorkingSet::new(),
            sort: None,
            active: None,

            draft: FieldDraft::default(),

            session: None,
            session_draft: SessionDraft::default(),

            confirm: None,
            notice: None,

            playback,
            playback_events,
            transport,
        }
    }

    /// Any modal open? Browser input is ignored while one is.
    pub(crate) fn is_modal(&self) -> bool {
        self.session.is_some() || self.confirm.is_some() || self.notice.is_some()
    }

    pub(crate) fn send(&self, cmd: PlayerCommand) {
        self.playback.send(cmd);
    }
}

/// Message = "something happened".
#[derive(Debug, Clone)]
pub(crate) enum Message {
    TickPlayback,

    // Browser
    PathInputChanged(String),
    AddPath,
    SelectRecord(RecordId),
    ToggleCheck(RecordId),
    CheckAll,
    UncheckAll,
    SortBy(Field),
    RemoveChecked,

    // Dialogs
    ConfirmYes,
    ConfirmNo,
    DismissNotice,

    // Field editor
    DraftChanged(Field, String),
    CommitField(Field),
    RevertDraft,
    CoverSourceChanged(String),
    SetCover,
    RemoveCover,

    // Batch edit
    OpenSession(EditMode),
    TemplateChanged(String),
    InsertMarker(Key),
    ValueModeSelected(ValueMode),
    StartIndexChanged(String),
    DigitsChanged(String),
    SessionCoverChanged(String),
    ChooseSessionCover,
    ClearSessionCover,
    MoveRowUp(usize),
    MoveRowDown(usize),
    RemoveRow(usize),
    FinishSession,
    CancelSession,

    // Playback
    PlayRecord(RecordId),
    TogglePlayPause,
    Stop,
    Next,
    Prev,
    SeekTo(f32),
    SeekCommit,
    SetVolume(f32),
}
