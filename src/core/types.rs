//! Core data types shared between core logic and the UI.
//!
//! Rule of thumb:
//! - These structs are "boring bags of data"
//! - No GUI code
//! - Tag IO lives in `core::tags`, which adds the `impl TagRecord` methods
//!
//! `TagRecord` represents ONE audio file on disk plus the metadata we edit.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::field::Field;

/// Stable identity for a record inside a `WorkingSet`.
/// Survives sorting and removal of other records (a Vec index would not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

/// Embedded picture bytes + mime type (e.g. "image/jpeg").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub data: Vec<u8>,
    pub mime: String,
}

/// Result of `TagRecord::get`: text for text fields, a blob for the cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Cover(Option<&'a CoverArt>),
}

/// Read-only stream facts taken at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamInfo {
    pub duration_ms: Option<u64>,
    pub bitrate_kbps: Option<u32>,
}

/// One audio file in the working set.
///
/// Invariant: `values` always holds every `Field::TEXT` entry (possibly "").
/// `staged` is sparse and only meaningful while an edit session is open.
#[derive(Debug, Clone)]
pub struct TagRecord {
    pub(crate) path: PathBuf,
    pub(crate) dir: PathBuf,
    pub(crate) base_name: String,

    pub(crate) values: BTreeMap<Field, String>,
    pub(crate) cover: Option<CoverArt>,

    pub(crate) info: StreamInfo,

    pub(crate) staged: BTreeMap<Field, String>,
}

impl TagRecord {
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Base name without the extension (what extraction templates match).
    pub fn stem(&self) -> &str {
        match self.base_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.base_name,
        }
    }

    /// Extension without the dot, as written on disk ("mp3", "MP3", ...).
    pub fn extension(&self) -> Option<&str> {
        match self.base_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Some(ext),
            _ => None,
        }
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.info.duration_ms
    }

    pub fn bitrate_kbps(&self) -> Option<u32> {
        self.info.bitrate_kbps
    }

    /// Current value of `field`. Never fails.
    pub fn get(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Cover => FieldValue::Cover(self.cover.as_ref()),
            f => FieldValue::Text(self.text(f)),
        }
    }

    /// Current text of `field` ("" for the cover or a missing tag).
    pub fn text(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn cover(&self) -> Option<&CoverArt> {
        self.cover.as_ref()
    }

    pub fn has_cover(&self) -> bool {
        self.cover.is_some()
    }

    // -------------------------
    // Staging (edit session preview)
    // -------------------------

    pub fn staged(&self, field: Field) -> Option<&str> {
        self.staged.get(&field).map(String::as_str)
    }

    pub fn staged_fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.staged.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub(crate) fn stage(&mut self, field: Field, value: String) {
        self.staged.insert(field, value);
    }

    pub(crate) fn clear_staged(&mut self) {
        self.staged.clear();
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn stem_and_extension_split_on_last_dot() {
        let r = record("01. Intro.mp3", &[]);
        assert_eq!(r.stem(), "01. Intro");
        assert_eq!(r.extension(), Some("mp3"));

        let hidden = record(".mp3", &[]);
        assert_eq!(hidden.stem(), ".mp3");
        assert_eq!(hidden.extension(), None);
    }

    #[test]
    fn get_returns_text_or_cover() {
        let r = record("a.mp3", &[(Field::Artist, "Low")]);
        assert_eq!(r.get(Field::Artist), FieldValue::Text("Low"));
        assert_eq!(r.get(Field::Genre), FieldValue::Text(""));
        assert_eq!(r.get(Field::FileName), FieldValue::Text("a.mp3"));
        assert_eq!(r.get(Field::Cover), FieldValue::Cover(None));
    }
}
