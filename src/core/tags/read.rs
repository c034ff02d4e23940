//! core/tags/read.rs
//! Read ID3 frames into the per-field value map of a `TagRecord`.

use std::collections::BTreeMap;
use std::path::Path;

use id3::frame::Content;
use id3::{ErrorKind, Tag, TagLike};

use super::super::error::{Result, TagError};
use super::super::field::Field;
use super::util::first_value;

/// Read the tag of `path`.
///
/// - No tag at all is fine (fresh rip): returns an empty tag.
/// - Anything else the id3 crate rejects is an unreadable container.
pub(crate) fn open_tag(path: &Path) -> Result<Tag> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(tag),
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => Ok(Tag::new()),
        Err(e) => Err(TagError::UnreadableContainer {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// Build the complete text-value map: every `Field::TEXT` key is present.
pub(crate) fn read_values(tag: &Tag, base_name: &str) -> BTreeMap<Field, String> {
    let mut values = BTreeMap::new();
    values.insert(Field::FileName, base_name.to_string());

    for field in Field::TAGS {
        let value = match field {
            Field::Comment => first_comment(tag),
            f => f.frame_id().and_then(|id| text_frame(tag, id)),
        };
        values.insert(field, value.unwrap_or_default());
    }

    values
}

/// First value of a plain text frame (T***).
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(first_value(s)),
        _ => None,
    }
}

fn first_comment(tag: &Tag) -> Option<String> {
    for frame in tag.frames() {
        if frame.id() != "COMM" {
            continue;
        }
        if let Content::Comment(c) = frame.content() {
            return Some(c.text.clone());
        }
    }
    None
}
