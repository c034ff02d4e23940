//! Write single fields back into the ID3 tag of a file.

use std::path::Path;

use id3::frame::{Comment, Picture, PictureType};
use id3::{TagLike, Version};

use super::super::error::Result;
use super::super::field::Field;
use super::super::types::CoverArt;
use super::read::open_tag;

/// Written consistently; the id3 crate encodes v2.4 text frames as UTF-8.
pub(crate) const WRITE_VERSION: Version = Version::Id3v24;

/// Set or remove one embedded text field.
///
/// - Empty value => remove the frame (never write an empty one)
/// - Otherwise => replace whatever was there
pub(crate) fn write_text_field(path: &Path, field: Field, value: &str) -> Result<()> {
    let Some(id) = field.frame_id() else {
        return Ok(());
    };

    let mut tag = open_tag(path)?;

    let _ = tag.remove(id); // returns the removed frames; not needed
    if !value.is_empty() {
        match field {
            Field::Comment => {
                let _ = tag.add_frame(Comment {
                    lang: "eng".to_string(),
                    description: String::new(),
                    text: value.to_string(),
                });
            }
            _ => tag.set_text(id, value.to_string()),
        }
    }

    tag.write_to_path(path, WRITE_VERSION)?;
    Ok(())
}

/// Replace every embedded picture with `cover` (or just remove them on `None`).
pub(crate) fn write_cover(path: &Path, cover: Option<&CoverArt>) -> Result<()> {
    let mut tag = open_tag(path)?;

    tag.remove_all_pictures();
    if let Some(art) = cover {
        let _ = tag.add_frame(Picture {
            mime_type: art.mime.clone(),
            picture_type: PictureType::CoverFront,
            description: String::new(),
            data: art.data.clone(),
        });
    }

    tag.write_to_path(path, WRITE_VERSION)?;
    Ok(())
}
