//! core/mod.rs
//!
//! The brain of the app:
//! - Load audio files into `TagRecord`s and write edits back (tag IO)
//! - Keep the browser list (`WorkingSet`)
//! - Run batch edit sessions with templates (preview, then commit)
//! - Drive audio playback on its own thread
//!
//! No iced imports anywhere below this module. The GUI only renders
//! these structs and forwards user input to them.

pub mod config;
pub mod error;
pub mod field;
pub mod library;
pub mod playback;
pub mod session;
pub mod tags;
pub mod template;
pub mod types;
pub mod working_set;

pub use error::{Result, TagError};
pub use field::Field;
pub use session::{CommitReport, EditMode, EditSession};
pub use types::{RecordId, TagRecord};
pub use working_set::WorkingSet;
