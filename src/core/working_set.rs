//! core/working_set.rs
//!
//! The browser list: owns every loaded `TagRecord`.
//!
//! - Records are addressed by `RecordId`, never by position, so sorting or
//!   removing rows does not invalidate an open edit session.
//! - Check marks are the batch selection (what the edit actions act on).

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::error::{Result, TagError};
use super::field::Field;
use super::library::scan_dir;
use super::tags::leading_number;
use super::types::{RecordId, TagRecord};

#[derive(Debug)]
struct Entry {
    id: RecordId,
    record: TagRecord,
    checked: bool,
}

/// Outcome of adding files: what got in, what was already there, what failed.
#[derive(Debug, Default)]
pub struct AddReport {
    pub added: Vec<RecordId>,
    pub duplicates: usize,
    pub failures: Vec<(PathBuf, TagError)>,
}

#[derive(Debug, Default)]
pub struct WorkingSet {
    entries: Vec<Entry>,
    next_id: u64,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Eagerly load each path. Unreadable files are skipped and reported.
    pub fn add_paths(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> AddReport {
        let mut report = AddReport::default();

        for path in paths {
            if self.contains_path(&path) {
                report.duplicates += 1;
                continue;
            }
            match TagRecord::load(&path) {
                Ok(record) => report.added.push(self.insert(record)),
                Err(e) => {
                    warn!("skipping {}: {e}", path.display());
                    report.failures.push((path, e));
                }
            }
        }

        info!(
            "added {} file(s), {} duplicate(s), {} unreadable",
            report.added.len(),
            report.duplicates,
            report.failures.len()
        );
        report
    }

    /// Add every audio file directly inside `dir`.
    pub fn add_directory(&mut self, dir: &Path, extension: &str) -> Result<AddReport> {
        let paths = scan_dir(dir, extension)?;
        Ok(self.add_paths(paths))
    }

    pub fn insert(&mut self, record: TagRecord) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            record,
            checked: false,
        });
        id
    }

    /// Drop records from the set. Returns how many were removed.
    pub fn remove(&mut self, ids: &[RecordId]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id));
        before - self.entries.len()
    }

    pub fn get(&self, id: RecordId) -> Option<&TagRecord> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.record)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut TagRecord> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.record)
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// (id, record, checked) in list order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &TagRecord, bool)> {
        self.entries.iter().map(|e| (e.id, &e.record, e.checked))
    }

    fn contains_path(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.record.path() == path)
    }

    // -------------------------
    // Check marks
    // -------------------------

    pub fn is_checked(&self, id: RecordId) -> bool {
        self.entries.iter().any(|e| e.id == id && e.checked)
    }

    pub fn set_checked(&mut self, id: RecordId, checked: bool) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.id == id) {
            e.checked = checked;
        }
    }

    pub fn toggle(&mut self, id: RecordId) {
        let checked = self.is_checked(id);
        self.set_checked(id, !checked);
    }

    pub fn check_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.checked = true);
    }

    pub fn uncheck_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.checked = false);
    }

    /// Checked records, in list order.
    pub fn checked(&self) -> Vec<RecordId> {
        self.entries
            .iter()
            .filter(|e| e.checked)
            .map(|e| e.id)
            .collect()
    }

    // -------------------------
    // Ordering / navigation
    // -------------------------

    /// Stable sort by one column. Track and year compare numerically first.
    pub fn sort_by(&mut self, field: Field, ascending: bool) {
        self.entries.sort_by(|a, b| {
            let ord = compare_field(&a.record, &b.record, field);
            if ascending { ord } else { ord.reverse() }
        });
    }

    pub fn next_after(&self, id: RecordId) -> Option<RecordId> {
        let i = self.position_of(id)?;
        self.entries.get(i + 1).map(|e| e.id)
    }

    pub fn previous_before(&self, id: RecordId) -> Option<RecordId> {
        let i = self.position_of(id)?;
        i.checked_sub(1).and_then(|j| self.entries.get(j)).map(|e| e.id)
    }

    pub fn first(&self) -> Option<RecordId> {
        self.entries.first().map(|e| e.id)
    }
}

fn compare_field(a: &TagRecord, b: &TagRecord, field: Field) -> Ordering {
    match field {
        Field::Cover => a.has_cover().cmp(&b.has_cover()),
        Field::Track | Field::Year => {
            let (x, y) = (a.text(field), b.text(field));
            match (leading_number(x), leading_number(y)) {
                (Some(n), Some(m)) => n.cmp(&m).then_with(|| x.cmp(y)),
                // Numbers before free text / empties.
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => x.cmp(y),
            }
        }
        f => a.text(f).to_lowercase().cmp(&b.text(f).to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tags::testutil::write_silent_mp3;
    use crate::core::types::fixtures::record;
    use tempfile::TempDir;

    fn set_of(records: Vec<TagRecord>) -> (WorkingSet, Vec<RecordId>) {
        let mut set = WorkingSet::new();
        let ids = records.into_iter().map(|r| set.insert(r)).collect();
        (set, ids)
    }

    #[test]
    fn add_directory_skips_unreadable_and_duplicates() {
        let dir = TempDir::new().unwrap();
        write_silent_mp3(&dir.path().join("a.mp3"));
        write_silent_mp3(&dir.path().join("b.mp3"));
        std::fs::write(dir.path().join("broken.mp3"), "nope").unwrap();

        let mut set = WorkingSet::new();
        let report = set.add_directory(dir.path(), "mp3").unwrap();
        assert_eq!(report.added.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].0.ends_with("broken.mp3"));
        assert_eq!(set.len(), 2);

        let again = set.add_directory(dir.path(), "mp3").unwrap();
        assert_eq!(again.duplicates, 2);
        assert!(again.added.is_empty());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn checked_follows_list_order_and_removal() {
        let (mut set, ids) = set_of(vec![
            record("a.mp3", &[]),
            record("b.mp3", &[]),
            record("c.mp3", &[]),
        ]);

        set.toggle(ids[2]);
        set.toggle(ids[0]);
        assert_eq!(set.checked(), vec![ids[0], ids[2]]);

        set.toggle(ids[0]);
        assert_eq!(set.checked(), vec![ids[2]]);

        set.check_all();
        assert_eq!(set.checked().len(), 3);

        set.uncheck_all();
        set.set_checked(ids[1], true);
        let checked = set.checked();
        assert_eq!(set.remove(&checked), 1);
        assert!(set.get(ids[1]).is_none());
        assert_eq!(set.ids(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn ids_survive_sorting() {
        let (mut set, ids) = set_of(vec![
            record("x.mp3", &[(Field::Track, "10")]),
            record("y.mp3", &[(Field::Track, "2/12")]),
            record("z.mp3", &[(Field::Track, "")]),
        ]);

        set.sort_by(Field::Track, true);
        assert_eq!(set.ids(), vec![ids[1], ids[0], ids[2]]);
        assert_eq!(set.get(ids[1]).unwrap().base_name(), "y.mp3");

        set.sort_by(Field::FileName, false);
        assert_eq!(set.ids(), vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn text_sort_ignores_case() {
        let (mut set, ids) = set_of(vec![
            record("1.mp3", &[(Field::Artist, "beatles")]),
            record("2.mp3", &[(Field::Artist, "ABBA")]),
        ]);
        set.sort_by(Field::Artist, true);
        assert_eq!(set.ids(), vec![ids[1], ids[0]]);
    }

    #[test]
    fn next_and_previous() {
        let (set, ids) = set_of(vec![record("a.mp3", &[]), record("b.mp3", &[])]);
        assert_eq!(set.next_after(ids[0]), Some(ids[1]));
        assert_eq!(set.next_after(ids[1]), None);
        assert_eq!(set.previous_before(ids[1]), Some(ids[0]));
        assert_eq!(set.previous_before(ids[0]), None);
        assert_eq!(set.first(), Some(ids[0]));
    }
}
