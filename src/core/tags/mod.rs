//! core/tags/mod.rs
//!
//! ID3 tag read/write for a single `TagRecord`.
//! Public API (all on `TagRecord`):
//! - [`TagRecord::load`] eagerly reads every field plus stream info.
//! - [`TagRecord::can_rename`] pure check for a new base name.
//! - [`TagRecord::commit`] writes one field back to disk.
//! - [`TagRecord::reload_cover`] re-reads only the picture.

mod art;
mod read;
mod stream;
mod util;
mod write;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

pub use art::COVER_EXTENSIONS;
pub(crate) use util::leading_number;

use super::error::{Result, TagError};
use super::field::Field;
use super::types::TagRecord;

impl TagRecord {
    /// Open `path` and read every known field immediately.
    ///
    /// Fails with `UnreadableContainer` if the file is not audio Symphonia can
    /// probe, or if its tag is corrupt. A file with no tag at all is fine.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let info = stream::probe_stream(&path).map_err(|reason| TagError::UnreadableContainer {
            path: path.clone(),
            reason,
        })?;
        let tag = read::open_tag(&path)?;

        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let base_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let values = read::read_values(&tag, &base_name);
        let cover = art::read_cover(&tag);

        debug!("loaded {} ({:?})", path.display(), info);

        Ok(Self {
            path,
            dir,
            base_name,
            values,
            cover,
            info,
            staged: BTreeMap::new(),
        })
    }

    /// True iff `new_name` is non-empty and is either the current name
    /// or not taken by another file in the same directory.
    pub fn can_rename(&self, new_name: &str) -> bool {
        if new_name.is_empty() {
            return false;
        }
        new_name == self.base_name || !self.dir.join(new_name).exists()
    }

    /// Write one field back to disk.
    ///
    /// On success the in-memory value mirrors `value` (set from the input, not
    /// re-read). On failure the record is left exactly as it was.
    pub fn commit(&mut self, field: Field, value: &str) -> Result<()> {
        match field {
            Field::FileName => self.rename(value),
            Field::Cover => self.commit_cover(value),
            f => {
                write::write_text_field(&self.path, f, value)?;
                debug!("{}: {} <- {:?}", self.base_name, f, value);
                self.values.insert(f, value.to_string());
                Ok(())
            }
        }
    }

    /// Re-read only the embedded picture from disk.
    pub fn reload_cover(&mut self) -> Result<()> {
        let tag = read::open_tag(&self.path)?;
        self.cover = art::read_cover(&tag);
        Ok(())
    }

    fn rename(&mut self, new_name: &str) -> Result<()> {
        if !self.can_rename(new_name) {
            return Err(TagError::RenameConflict {
                name: new_name.to_string(),
            });
        }
        if new_name == self.base_name {
            return Ok(());
        }

        let target = self.dir.join(new_name);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&self.path, &target)?;

        info!("renamed {} -> {}", self.path.display(), target.display());

        self.path = target;
        self.base_name = new_name.to_string();
        self.values.insert(Field::FileName, self.base_name.clone());
        Ok(())
    }

    /// `source` is an image path; empty means "remove the cover".
    fn commit_cover(&mut self, source: &str) -> Result<()> {
        if source.is_empty() {
            write::write_cover(&self.path, None)?;
            self.cover = None;
            info!("{}: cover removed", self.base_name);
            return Ok(());
        }

        let art = art::load_cover_source(Path::new(source))?;
        write::write_cover(&self.path, Some(&art))?;
        info!("{}: cover set from {source} ({})", self.base_name, art.mime);
        self.cover = Some(art);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testutil::write_silent_mp3;
    use super::*;
    use crate::core::types::FieldValue;
    use id3::TagLike;
    use tempfile::TempDir;

    fn loaded(dir: &TempDir, name: &str) -> TagRecord {
        let path = dir.path().join(name);
        write_silent_mp3(&path);
        TagRecord::load(&path).unwrap()
    }

    #[test]
    fn load_rejects_files_that_are_not_audio() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.mp3");
        std::fs::write(&path, "just some text, not an mp3 at all").unwrap();

        let err = TagRecord::load(&path).unwrap_err();
        assert!(matches!(err, TagError::UnreadableContainer { .. }));
    }

    #[test]
    fn untagged_file_loads_with_every_field_empty() {
        let dir = TempDir::new().unwrap();
        let r = loaded(&dir, "Beatles_HeyJude.mp3");

        assert_eq!(r.base_name(), "Beatles_HeyJude.mp3");
        assert_eq!(r.dir(), dir.path());
        assert_eq!(r.text(Field::FileName), "Beatles_HeyJude.mp3");
        for f in Field::TAGS {
            assert_eq!(r.text(f), "", "{f} should be empty");
        }
        assert!(!r.has_cover());
    }

    #[test]
    fn committed_text_fields_survive_a_reload() {
        let dir = TempDir::new().unwrap();
        let mut r = loaded(&dir, "a.mp3");

        let values = [
            (Field::Title, "Hey Jude"),
            (Field::Artist, "The Beatles"),
            (Field::Album, "Hey Jude (single)"),
            (Field::Track, "1/2"),
            (Field::Year, "1968"),
            (Field::Genre, "Rock"),
            (Field::Comment, "Příliš žluťoučký kůň"),
        ];
        for (f, v) in values {
            r.commit(f, v).unwrap();
            assert_eq!(r.text(f), v);
        }

        let again = TagRecord::load(r.path()).unwrap();
        for (f, v) in values {
            assert_eq!(again.text(f), v, "{f} did not round-trip");
        }
    }

    #[test]
    fn empty_commit_removes_the_frame() {
        let dir = TempDir::new().unwrap();
        let mut r = loaded(&dir, "a.mp3");

        r.commit(Field::Artist, "Low").unwrap();
        r.commit(Field::Artist, "").unwrap();
        assert_eq!(r.text(Field::Artist), "");

        let tag = id3::Tag::read_from_path(r.path()).unwrap();
        assert!(tag.get("TPE1").is_none());
        assert_eq!(TagRecord::load(r.path()).unwrap().text(Field::Artist), "");
    }

    #[test]
    fn failed_text_commit_leaves_value_untouched() {
        let dir = TempDir::new().unwrap();
        let mut r = loaded(&dir, "a.mp3");
        r.commit(Field::Artist, "Low").unwrap();

        std::fs::remove_file(r.path()).unwrap();
        assert!(r.commit(Field::Artist, "X").is_err());
        assert_eq!(r.text(Field::Artist), "Low");
        assert!(r.commit(Field::Artist, "").is_err());
        assert_eq!(r.text(Field::Artist), "Low");
    }

    #[test]
    fn can_rename_rules() {
        let dir = TempDir::new().unwrap();
        let r = loaded(&dir, "a.mp3");
        write_silent_mp3(&dir.path().join("taken.mp3"));

        assert!(!r.can_rename(""));
        assert!(r.can_rename("a.mp3"));
        assert!(!r.can_rename("taken.mp3"));
        assert!(r.can_rename("free.mp3"));
    }

    #[test]
    fn rename_moves_file_and_updates_record() {
        let dir = TempDir::new().unwrap();
        let mut r = loaded(&dir, "a.mp3");
        let old = r.path().to_path_buf();

        r.commit(Field::FileName, "b.mp3").unwrap();

        assert!(!old.exists());
        assert!(dir.path().join("b.mp3").exists());
        assert_eq!(r.base_name(), "b.mp3");
        assert_eq!(r.text(Field::FileName), "b.mp3");
        assert_eq!(r.path(), dir.path().join("b.mp3"));
    }

    #[test]
    fn rename_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let mut r = loaded(&dir, "a.mp3");

        r.commit(Field::FileName, "Abbey Road/01.mp3").unwrap();
        assert!(dir.path().join("Abbey Road").join("01.mp3").exists());
    }

    #[test]
    fn rename_conflict_leaves_record_untouched() {
        let dir = TempDir::new().unwrap();
        let mut r = loaded(&dir, "a.mp3");
        write_silent_mp3(&dir.path().join("taken.mp3"));

        let err = r.commit(Field::FileName, "taken.mp3").unwrap_err();
        assert!(matches!(err, TagError::RenameConflict { ref name } if name == "taken.mp3"));
        assert_eq!(r.base_name(), "a.mp3");
        assert!(dir.path().join("a.mp3").exists());

        assert!(matches!(
            r.commit(Field::FileName, ""),
            Err(TagError::RenameConflict { .. })
        ));
    }

    #[test]
    fn cover_commit_sets_jpeg_mime_and_can_be_removed() {
        let dir = TempDir::new().unwrap();
        let mut r = loaded(&dir, "a.mp3");
        let jpg = dir.path().join("front.jpg");
        std::fs::write(&jpg, [0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]).unwrap();

        r.commit(Field::Cover, jpg.to_str().unwrap()).unwrap();
        assert_eq!(r.cover().unwrap().mime, "image/jpeg");

        r.reload_cover().unwrap();
        let art = r.cover().unwrap();
        assert_eq!(art.mime, "image/jpeg");
        assert_eq!(art.data, vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]);

        r.commit(Field::Cover, "").unwrap();
        assert_eq!(r.get(Field::Cover), FieldValue::Cover(None));
        r.reload_cover().unwrap();
        assert!(!r.has_cover());
    }

    #[test]
    fn failed_cover_commit_keeps_existing_cover() {
        let dir = TempDir::new().unwrap();
        let mut r = loaded(&dir, "a.mp3");
        let png = dir.path().join("front.png");
        std::fs::write(&png, [0x89, b'P', b'N', b'G']).unwrap();
        r.commit(Field::Cover, png.to_str().unwrap()).unwrap();

        let missing = dir.path().join("gone.jpg");
        let err = r.commit(Field::Cover, missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, TagError::CoverSourceMissing(_)));

        let txt = dir.path().join("cover.txt");
        std::fs::write(&txt, "x").unwrap();
        let err = r.commit(Field::Cover, txt.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, TagError::UnsupportedCoverFormat(_)));

        assert_eq!(r.cover().unwrap().mime, "image/png");
        r.reload_cover().unwrap();
        assert_eq!(r.cover().unwrap().mime, "image/png");
    }
}
