//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use crate::core::field::Field;
use crate::core::playback::format_time;
use crate::core::types::{FieldValue, TagRecord};

/// Parse a number typed into a small numeric input.
/// - empty -> Ok(None) (user is still typing)
/// - number -> Ok(Some(number))
/// - garbage -> Err(())
pub(crate) fn parse_optional_u32(s: &str) -> Result<Option<u32>, ()> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<u32>().map(Some).map_err(|_| ())
}

/// Duration cell for the browser table.
pub(crate) fn fmt_duration(ms: Option<u64>) -> String {
    ms.map(format_time).unwrap_or_else(|| "-".into())
}

pub(crate) fn fmt_bitrate(kbps: Option<u32>) -> String {
    kbps.map(|k| format!("{k} kbps")).unwrap_or_else(|| "-".into())
}

/// Title, falling back to the file stem.
pub(crate) fn display_title(record: &TagRecord) -> &str {
    match record.text(Field::Title) {
        "" => record.stem(),
        t => t,
    }
}

/// Table cell for `field`: the staged preview wins over the current value.
pub(crate) fn cell_text(record: &TagRecord, field: Field) -> String {
    if let Some(staged) = record.staged(field) {
        return staged.to_string();
    }
    match record.get(field) {
        FieldValue::Text(t) => t.to_string(),
        FieldValue::Cover(Some(art)) => art.mime.trim_start_matches("image/").to_string(),
        FieldValue::Cover(None) => String::new(),
    }
}
