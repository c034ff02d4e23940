//! core/template/mod.rs
//!
//! Small template languages used by batch editing.
//!
//! - Extraction (`ExtractionTemplate`): `\kal(.+?)_\ksn(.+?)` pulls values
//!   out of a file name.
//! - Substitution (`SubstitutionTemplate`): `\ktr - \ksn` builds a string
//!   from current values; `\kd` is the running number.
//! - `ValueMode`: lowercase / uppercase / capitalize without a template.
//!
//! Everything here is pure: no IO, no record mutation.

mod extract;
mod substitute;
mod token;
mod transform;

pub use extract::ExtractionTemplate;
pub use substitute::{Numbering, SubstitutionTemplate};
pub use token::Key;
pub use transform::ValueMode;

/// Marker prefix inserted by the marker picker.
pub const DEFAULT_PREFIX: &str = r"\k";

/// Text the marker picker appends for `key`.
/// Extraction markers get a lazy catch-all group to edit from.
pub fn marker_text(prefix: &str, key: Key, extraction: bool) -> String {
    if extraction {
        format!("{prefix}{}(.+?)", key.spelling())
    } else {
        format!("{prefix}{}", key.spelling())
    }
}
