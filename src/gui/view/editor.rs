//! Right panel: every field of the active file, saved one at a time.

use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Message, Tagsmith};
use super::super::util::{fmt_bitrate, fmt_duration};
use super::constants::COVER_BIG;
use super::session::image_placeholder;
use super::widgets::{cover_thumb, field_row, labeled};
use crate::core::field::Field;

pub(crate) fn build_editor(state: &Tagsmith) -> iced::widget::Container<'_, Message> {
    let Some((id, record)) = state
        .active
        .and_then(|id| state.files.get(id).map(|r| (id, r)))
    else {
        return container(
            column![
                text("File").size(18),
                text("Select a file in the list to edit its tags.").size(12)
            ]
            .spacing(12),
        )
        .padding(12);
    };

    let mut fields = column![].spacing(8);
    for field in Field::TEXT {
        fields = fields.push(field_row(
            field.label(),
            state.draft.text(field),
            move |v| Message::DraftChanged(field, v),
            Message::CommitField(field),
        ));
    }

    let cover_row = row![
        text_input(&image_placeholder(), &state.draft.cover_source)
            .on_input(Message::CoverSourceChanged)
            .on_submit(Message::SetCover)
            .width(Length::Fill),
        button("Set").on_press(Message::SetCover),
        button("Remove").on_press(Message::RemoveCover),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let info = column![
        labeled("Length", text(fmt_duration(record.duration_ms())).size(12)),
        labeled("Bit rate", text(fmt_bitrate(record.bitrate_kbps())).size(12)),
        labeled("Folder", text(record.dir().display().to_string()).size(12)),
    ]
    .spacing(4);

    let col = column![
        text("File").size(18),
        container(cover_thumb(record.cover(), COVER_BIG)).center_x(Length::Fill),
        cover_row,
        fields,
        row![
            button("Revert").on_press(Message::RevertDraft),
            button("Play").on_press(Message::PlayRecord(id)),
        ]
        .spacing(8),
        info,
    ]
    .spacing(12);

    container(scrollable(col).height(Length::Fill)).padding(12)
}

