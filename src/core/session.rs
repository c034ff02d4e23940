//! core/session.rs
//!
//! Batch edit session: preview and commit one edit across several records.
//!
//! The session never owns records. It holds `RecordId`s into the
//! `WorkingSet` and writes its preview into each record's staging map.
//! Every setter re-runs the whole preview, so the UI can just render
//! `staged()` after any event.
//!
//! Commit rules:
//! - Guess tags: only non-empty staged values are written.
//! - Rename / guess name: the whole batch is validated first; any conflict
//!   aborts before a single file is touched.
//! - Other fields / cover: written record by record; a failure on one record
//!   is reported and the rest still go ahead (no rollback).

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::config::Settings;
use super::error::{Result, TagError};
use super::field::Field;
use super::template::{
    ExtractionTemplate, Key, Numbering, SubstitutionTemplate, ValueMode, marker_text,
};
use super::types::RecordId;
use super::working_set::WorkingSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Transform one field (file name included) via a `ValueMode`.
    Field(Field),
    /// Set or remove the embedded cover picture.
    Cover,
    /// Extraction template against each file name.
    GuessTags,
    /// Substitution template producing each new file name.
    GuessName,
}

impl EditMode {
    pub fn title(self) -> String {
        match self {
            EditMode::Field(f) => format!("Edit field: {}", f.label()),
            EditMode::Cover => "Edit field: Cover".to_string(),
            EditMode::GuessTags => "Tags from file name".to_string(),
            EditMode::GuessName => "File name from tags".to_string(),
        }
    }

    /// The field whose staged value gets committed (guess-tags writes many).
    pub fn target(self) -> Option<Field> {
        match self {
            EditMode::Field(f) => Some(f),
            EditMode::Cover => Some(Field::Cover),
            EditMode::GuessTags => None,
            EditMode::GuessName => Some(Field::FileName),
        }
    }

    fn renames(self) -> bool {
        self.target() == Some(Field::FileName)
    }
}

/// One failed record in a batch commit.
#[derive(Debug)]
pub struct CommitFailure {
    pub path: PathBuf,
    pub error: TagError,
}

#[derive(Debug, Default)]
pub struct CommitReport {
    /// Records with every write succeeding.
    pub committed: usize,
    pub failures: Vec<CommitFailure>,
}

impl CommitReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.failures.is_empty() {
            format!("Saved {} file(s).", self.committed)
        } else {
            format!(
                "Saved {} file(s), {} failed: {}",
                self.committed,
                self.failures.len(),
                self.failures
                    .iter()
                    .map(|f| format!("{} ({})", f.path.display(), f.error))
                    .collect::<Vec<_>>()
                    .join("; ")
            )
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    ids: Vec<RecordId>,
    mode: EditMode,
    value_mode: ValueMode,
    template: String,
    numbering: Numbering,
    prefix: String,
    /// Cover mode only: `None` = nothing chosen yet, `Some("")` = remove.
    cover_choice: Option<String>,
    /// Guess-tags only: `template` parsed once per edit.
    extraction: Option<ExtractionTemplate>,
}

impl EditSession {
    /// Open a session over `ids` (batch order = the order given).
    /// Stale ids are dropped; an empty batch is refused.
    pub fn open(
        set: &mut WorkingSet,
        ids: Vec<RecordId>,
        mode: EditMode,
        settings: &Settings,
    ) -> Result<Self> {
        let ids: Vec<RecordId> = ids.into_iter().filter(|id| set.get(*id).is_some()).collect();
        let mode = match mode {
            EditMode::Field(f) if f.is_binary() => EditMode::Cover,
            m => m,
        };
        if ids.is_empty() {
            return Err(TagError::EmptySelection);
        }

        info!("edit session opened: {} on {} file(s)", mode.title(), ids.len());

        let extraction = (mode == EditMode::GuessTags)
            .then(|| ExtractionTemplate::parse("", &settings.marker_prefix));
        let session = Self {
            ids,
            mode,
            value_mode: ValueMode::Keep,
            template: String::new(),
            numbering: Numbering {
                start: settings.start_index,
                digits: settings.digits,
            },
            prefix: settings.marker_prefix.clone(),
            cover_choice: None,
            extraction,
        };
        session.preview(set);
        Ok(session)
    }

    pub fn ids(&self) -> &[RecordId] {
        &self.ids
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn value_mode(&self) -> ValueMode {
        self.value_mode
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn numbering(&self) -> Numbering {
        self.numbering
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn cover_choice(&self) -> Option<&str> {
        self.cover_choice.as_deref()
    }

    /// Whether the template input means anything in the current state.
    pub fn uses_template(&self) -> bool {
        match self.mode {
            EditMode::GuessTags | EditMode::GuessName => true,
            EditMode::Field(_) => self.value_mode == ValueMode::Custom,
            EditMode::Cover => false,
        }
    }

    /// Why the extraction template does not compile, while typing.
    pub fn template_problem(&self) -> Option<String> {
        self.extraction
            .as_ref()
            .and_then(ExtractionTemplate::compile_error)
            .map(|e| e.to_string())
    }

    /// Fields the extraction template would fill, in template order.
    pub fn targets(&self) -> Vec<Field> {
        self.extraction
            .as_ref()
            .map(ExtractionTemplate::targets)
            .unwrap_or_default()
    }

    pub fn can_finish(&self) -> bool {
        !self.ids.is_empty()
    }

    // -------------------------
    // Inputs (each one re-previews)
    // -------------------------

    pub fn set_template(&mut self, set: &mut WorkingSet, template: String) {
        self.template = template;
        self.reparse();
        self.preview(set);
    }

    /// Append a marker for `key` (what the marker picker does).
    pub fn insert_marker(&mut self, set: &mut WorkingSet, key: Key) {
        let extraction = self.mode == EditMode::GuessTags;
        self.template.push_str(&marker_text(&self.prefix, key, extraction));
        self.reparse();
        self.preview(set);
    }

    fn reparse(&mut self) {
        if self.mode == EditMode::GuessTags {
            self.extraction = Some(ExtractionTemplate::parse(&self.template, &self.prefix));
        }
    }

    pub fn set_value_mode(&mut self, set: &mut WorkingSet, mode: ValueMode) {
        self.value_mode = mode;
        if mode != ValueMode::Custom {
            self.template.clear();
        }
        self.preview(set);
    }

    pub fn set_start_index(&mut self, set: &mut WorkingSet, start: u32) {
        self.numbering.start = start;
        self.preview(set);
    }

    pub fn set_digits(&mut self, set: &mut WorkingSet, digits: usize) {
        self.numbering.digits = digits;
        self.preview(set);
    }

    pub fn choose_cover(&mut self, set: &mut WorkingSet, source: &Path) {
        self.cover_choice = Some(source.to_string_lossy().into_owned());
        self.preview(set);
    }

    /// Stage removal of the cover on every record.
    pub fn clear_cover(&mut self, set: &mut WorkingSet) {
        self.cover_choice = Some(String::new());
        self.preview(set);
    }

    // -------------------------
    // Batch rows
    // -------------------------

    pub fn move_up(&mut self, set: &mut WorkingSet, row: usize) -> bool {
        if row == 0 || row >= self.ids.len() {
            return false;
        }
        self.ids.swap(row, row - 1);
        self.preview(set);
        true
    }

    pub fn move_down(&mut self, set: &mut WorkingSet, row: usize) -> bool {
        if row + 1 >= self.ids.len() {
            return false;
        }
        self.ids.swap(row, row + 1);
        self.preview(set);
        true
    }

    /// Take a record out of the batch (it stays in the working set).
    pub fn remove_row(&mut self, set: &mut WorkingSet, row: usize) -> bool {
        if row >= self.ids.len() {
            return false;
        }
        let id = self.ids.remove(row);
        if let Some(r) = set.get_mut(id) {
            r.clear_staged();
        }
        self.preview(set);
        true
    }

    // -------------------------
    // Preview
    // -------------------------

    /// Recompute every staged value from scratch.
    pub fn preview(&self, set: &mut WorkingSet) {
        let substitution = self
            .uses_template()
            .then(|| SubstitutionTemplate::parse(&self.template, &self.prefix));

        let mut position = 0usize;
        for id in &self.ids {
            let Some(record) = set.get_mut(*id) else {
                continue;
            };
            record.clear_staged();

            match self.mode {
                EditMode::GuessTags => {
                    if let Some(t) = &self.extraction {
                        for (field, value) in t.apply(record.stem()) {
                            record.stage(field, value);
                        }
                    }
                }
                EditMode::GuessName => {
                    let stem = substitution
                        .as_ref()
                        .map(|t| t.render(record, position, self.numbering))
                        .unwrap_or_default();
                    let name = with_extension(stem, record.extension());
                    record.stage(Field::FileName, name);
                }
                EditMode::Field(field) => {
                    let value = match self.value_mode.apply(record.text(field)) {
                        Some(v) => v,
                        None => substitution
                            .as_ref()
                            .map(|t| t.render(record, position, self.numbering))
                            .unwrap_or_default(),
                    };
                    record.stage(field, value);
                }
                EditMode::Cover => {
                    if let Some(choice) = &self.cover_choice {
                        record.stage(Field::Cover, choice.clone());
                    }
                }
            }

            position += 1;
        }
    }

    // -------------------------
    // Finish / cancel
    // -------------------------

    /// Discard the preview. Nothing on disk changes.
    pub fn cancel(self, set: &mut WorkingSet) {
        for id in &self.ids {
            if let Some(r) = set.get_mut(*id) {
                r.clear_staged();
            }
        }
        debug!("edit session cancelled");
    }

    /// Every rename this batch would perform must be possible, and no two
    /// records may land on the same path.
    pub fn validate(&self, set: &WorkingSet) -> Result<()> {
        if !self.mode.renames() {
            return Ok(());
        }

        let mut targets: Vec<PathBuf> = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            let Some(record) = set.get(*id) else { continue };
            let name = record.staged(Field::FileName).unwrap_or("");
            let target = record.dir().join(name);

            if !record.can_rename(name) || targets.contains(&target) {
                return Err(TagError::RenameConflict {
                    name: name.to_string(),
                });
            }
            targets.push(target);
        }
        Ok(())
    }

    /// Write staged values to disk, in batch order.
    ///
    /// `Err` only for a rejected rename batch (nothing written).
    /// Per-record failures otherwise land in the report.
    pub fn commit(self, set: &mut WorkingSet) -> Result<CommitReport> {
        if let Err(e) = self.validate(set) {
            warn!("batch rename refused: {e}");
            return Err(e);
        }

        let mut report = CommitReport::default();

        for id in &self.ids {
            let Some(record) = set.get_mut(*id) else { continue };

            let writes: Vec<(Field, String)> = match self.mode {
                EditMode::GuessTags => record
                    .staged_fields()
                    .filter(|(_, v)| !v.is_empty())
                    .map(|(f, v)| (f, v.to_string()))
                    .collect(),
                mode => match mode.target().and_then(|f| record.staged(f).map(|v| (f, v))) {
                    Some((f, v)) => vec![(f, v.to_string())],
                    None => Vec::new(),
                },
            };

            let mut failed = false;
            for (field, value) in writes {
                if let Err(error) = record.commit(field, &value) {
                    warn!("commit {field} failed for {}: {error}", record.path().display());
                    report.failures.push(CommitFailure {
                        path: record.path().to_path_buf(),
                        error,
                    });
                    failed = true;
                }
            }
            if !failed {
                report.committed += 1;
            }
            record.clear_staged();
        }

        info!("{}", report.summary());
        Ok(report)
    }
}

/// Keep the record's extension on a generated name unless it is already there.
fn with_extension(stem: String, ext: Option<&str>) -> String {
    match ext {
        Some(ext) if !stem.is_empty() => {
            let suffix = format!(".{ext}");
            if stem.to_lowercase().ends_with(&suffix.to_lowercase()) {
                stem
            } else {
                stem + &suffix
            }
        }
        _ => stem,
    }
}
