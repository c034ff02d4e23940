//! core/field.rs
//!
//! The fixed set of editable attributes of one audio file.
//!
//! Every place that used to look a tag up by a string name goes through
//! `Field` instead, so a typo is a compile error rather than a silent miss.

/// One editable metadata attribute.
///
/// Order matters: it is the column order of the browser table and the
/// iteration order of [`Field::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Base file name. Virtual: lives in the filesystem, not in the tag.
    FileName,
    Title,
    Artist,
    Album,
    Track,
    Year,
    Genre,
    Comment,
    /// Embedded front cover picture (binary).
    Cover,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::FileName,
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::Track,
        Field::Year,
        Field::Genre,
        Field::Comment,
        Field::Cover,
    ];

    /// Every text field (everything except the cover).
    pub const TEXT: [Field; 8] = [
        Field::FileName,
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::Track,
        Field::Year,
        Field::Genre,
        Field::Comment,
    ];

    /// Text fields stored inside the tag (no file name, no cover).
    pub const TAGS: [Field; 7] = [
        Field::Title,
        Field::Artist,
        Field::Album,
        Field::Track,
        Field::Year,
        Field::Genre,
        Field::Comment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::FileName => "File name",
            Field::Title => "Title",
            Field::Artist => "Artist",
            Field::Album => "Album",
            Field::Track => "Track",
            Field::Year => "Year",
            Field::Genre => "Genre",
            Field::Comment => "Comment",
            Field::Cover => "Cover",
        }
    }

    /// ID3v2.4 frame id backing this field.
    ///
    /// Year maps to `TDRC` (recording time). `TORY` is never used.
    pub fn frame_id(self) -> Option<&'static str> {
        match self {
            Field::FileName => None,
            Field::Title => Some("TIT2"),
            Field::Artist => Some("TPE1"),
            Field::Album => Some("TALB"),
            Field::Track => Some("TRCK"),
            Field::Year => Some("TDRC"),
            Field::Genre => Some("TCON"),
            Field::Comment => Some("COMM"),
            Field::Cover => Some("APIC"),
        }
    }

    /// True for the file name, which is not stored in the container.
    pub fn is_virtual(self) -> bool {
        self == Field::FileName
    }

    pub fn is_binary(self) -> bool {
        self == Field::Cover
    }

    /// Two-letter template key (`\kal`, `\ksn(...)`, ...).
    pub fn abbreviation(self) -> Option<&'static str> {
        match self {
            Field::FileName => Some("fi"),
            Field::Title => Some("sn"),
            Field::Artist => Some("ar"),
            Field::Album => Some("al"),
            Field::Track => Some("tr"),
            Field::Year => Some("ye"),
            Field::Genre => Some("ge"),
            Field::Comment => Some("co"),
            Field::Cover => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fields_have_distinct_two_letter_keys() {
        let keys: Vec<_> = Field::TEXT
            .into_iter()
            .map(|f| f.abbreviation().unwrap())
            .collect();
        for (i, k) in keys.iter().enumerate() {
            assert_eq!(k.len(), 2);
            assert!(!keys[i + 1..].contains(k), "{k} used twice");
        }
        assert_eq!(Field::Cover.abbreviation(), None);
    }

    #[test]
    fn only_file_name_is_virtual_and_only_cover_is_binary() {
        let virtuals: Vec<_> = Field::ALL.into_iter().filter(|f| f.is_virtual()).collect();
        let binaries: Vec<_> = Field::ALL.into_iter().filter(|f| f.is_binary()).collect();
        assert_eq!(virtuals, vec![Field::FileName]);
        assert_eq!(binaries, vec![Field::Cover]);
        assert_eq!(Field::FileName.frame_id(), None);
    }

    #[test]
    fn year_uses_recording_time_frame() {
        assert_eq!(Field::Year.frame_id(), Some("TDRC"));
        assert_eq!(Field::Cover.frame_id(), Some("APIC"));
    }
}
