//! core/tags/art.rs
//! Embedded cover picture: read from a tag, load from an image file.

use std::path::Path;

use id3::Tag;
use id3::frame::Content;

use super::super::error::{Result, TagError};
use super::super::types::CoverArt;

/// Image extensions accepted as a cover source.
pub const COVER_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "gif", "png"];

/// First embedded picture (APIC, or PIC in v2.2 tags).
pub(crate) fn read_cover(tag: &Tag) -> Option<CoverArt> {
    for f in tag.frames() {
        if f.id() != "APIC" && f.id() != "PIC" {
            continue;
        }
        if let Content::Picture(p) = f.content() {
            return Some(CoverArt {
                data: p.data.clone(),
                mime: p.mime_type.clone(),
            });
        }
    }
    None
}

/// Mime type for a cover source path. "jpg" is spelled "jpeg" in mime land.
pub fn cover_mime(source: &Path) -> Result<String> {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !COVER_EXTENSIONS.contains(&ext.as_str()) {
        return Err(TagError::UnsupportedCoverFormat(ext));
    }

    let token = if ext == "jpg" { "jpeg" } else { ext.as_str() };
    Ok(format!("image/{token}"))
}

/// Validate and read an image file into a `CoverArt`.
/// Existence is checked before the extension.
pub(crate) fn load_cover_source(source: &Path) -> Result<CoverArt> {
    if !source.is_file() {
        return Err(TagError::CoverSourceMissing(source.to_path_buf()));
    }
    let mime = cover_mime(source)?;
    let data = std::fs::read(source)?;
    Ok(CoverArt { data, mime })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn jpg_is_normalized_to_jpeg() {
        assert_eq!(cover_mime(Path::new("a/front.jpg")).unwrap(), "image/jpeg");
        assert_eq!(cover_mime(Path::new("front.JPG")).unwrap(), "image/jpeg");
        assert_eq!(cover_mime(Path::new("front.png")).unwrap(), "image/png");
        assert_eq!(cover_mime(Path::new("front.gif")).unwrap(), "image/gif");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = cover_mime(Path::new("front.bmp")).unwrap_err();
        assert!(matches!(err, TagError::UnsupportedCoverFormat(ref e) if e == "bmp"));
        assert!(matches!(
            cover_mime(Path::new("front")),
            Err(TagError::UnsupportedCoverFormat(_))
        ));
    }

    #[test]
    fn missing_source_wins_over_bad_extension() {
        let dir = TempDir::new().unwrap();
        let err = load_cover_source(&dir.path().join("nope.bmp")).unwrap_err();
        assert!(matches!(err, TagError::CoverSourceMissing(_)));

        let bmp = dir.path().join("there.bmp");
        std::fs::write(&bmp, b"BM").unwrap();
        let err = load_cover_source(&bmp).unwrap_err();
        assert!(matches!(err, TagError::UnsupportedCoverFormat(_)));
    }

    #[test]
    fn loads_bytes_and_mime() {
        let dir = TempDir::new().unwrap();
        let jpg = dir.path().join("front.jpg");
        std::fs::write(&jpg, [0xFF, 0xD8, 0xFF]).unwrap();

        let art = load_cover_source(&jpg).unwrap();
        assert_eq!(art.mime, "image/jpeg");
        assert_eq!(art.data, vec![0xFF, 0xD8, 0xFF]);
    }
}
