//! View constants (layout/sizing).

pub(crate) const PLAYBACK_H: f32 = 76.0;

pub(crate) const SIDEBAR_W: f32 = 250.0;
pub(crate) const EDITOR_W: f32 = 360.0;

pub(crate) const LABEL_W: f32 = 90.0;

// list sizing
pub(crate) const HEADER_TEXT: f32 = 14.0;
pub(crate) const ROW_TEXT: f32 = 14.0;

pub(crate) const ROW_H: f32 = 26.0;
pub(crate) const ROW_VPAD: f32 = 2.0;
pub(crate) const ROW_HPAD: f32 = 8.0;
pub(crate) const LIST_SPACING: f32 = 1.0;

pub(crate) const CHECK_W: f32 = 34.0;
pub(crate) const MARK_W: f32 = 18.0;
pub(crate) const NARROW_COL_W: f32 = 60.0;
pub(crate) const WIDE_COL_W: f32 = 180.0;

pub(crate) const COVER_BIG: f32 = 180.0;
pub(crate) const DIALOG_W: f32 = 420.0;
