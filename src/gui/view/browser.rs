//! Browser table: one row per file, check marks, sortable columns.

use iced::widget::{Column, button, column, container, mouse_area, row, scrollable, text};
use iced::{Alignment, Length};

use super::super::state::{Message, Tagsmith};
use super::super::util::{cell_text, fmt_bitrate, fmt_duration};
use super::constants::{
    CHECK_W, HEADER_TEXT, LIST_SPACING, MARK_W, NARROW_COL_W, ROW_H, ROW_HPAD, ROW_TEXT,
    ROW_VPAD, WIDE_COL_W,
};
use crate::core::field::Field;

fn column_width(field: Field) -> Length {
    match field {
        Field::Track | Field::Year | Field::Cover => Length::Fixed(NARROW_COL_W),
        _ => Length::Fixed(WIDE_COL_W),
    }
}

pub(crate) fn build_browser(state: &Tagsmith) -> Column<'_, Message> {
    let title = if state.files.is_empty() {
        "Files (none yet)".to_string()
    } else {
        format!("Files ({})", state.files.len())
    };

    column![
        text(title).size(18),
        scrollable(build_table(state))
            .direction(scrollable::Direction::Both {
                vertical: scrollable::Scrollbar::default(),
                horizontal: scrollable::Scrollbar::default(),
            })
            .height(Length::Fill),
    ]
    .spacing(12)
}

fn build_table(state: &Tagsmith) -> Column<'_, Message> {
    let mut header = row![
        text("").width(Length::Fixed(CHECK_W)),
        text("").width(Length::Fixed(MARK_W)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    for field in Field::ALL {
        let arrow = match state.sort {
            Some((f, true)) if f == field => " ▲",
            Some((f, false)) if f == field => " ▼",
            _ => "",
        };
        header = header.push(
            button(text(format!("{}{arrow}", field.label())).size(HEADER_TEXT))
                .on_press(Message::SortBy(field))
                .style(button::text)
                .width(column_width(field)),
        );
    }
    header = header
        .push(text("Len").size(HEADER_TEXT).width(Length::Fixed(NARROW_COL_W)))
        .push(text("Bit rate").size(HEADER_TEXT).width(Length::Fixed(80.0)));

    let mut col = column![header].spacing(LIST_SPACING);

    for (id, record, checked) in state.files.iter() {
        let check = button(text(if checked { "[x]" } else { "[ ]" }).size(ROW_TEXT))
            .on_press(Message::ToggleCheck(id))
            .style(button::text)
            .width(Length::Fixed(CHECK_W));

        // Active row gets ▶, the playing one gets ♪.
        let marker = if state.transport.now_playing == Some(id) {
            "♪"
        } else if state.active == Some(id) {
            "▶"
        } else {
            ""
        };

        let mut cells = row![check, text(marker).size(ROW_TEXT).width(Length::Fixed(MARK_W))]
            .spacing(10)
            .align_y(Alignment::Center);
        for field in Field::ALL {
            cells = cells.push(
                text(cell_text(record, field))
                    .size(ROW_TEXT)
                    .width(column_width(field)),
            );
        }
        cells = cells
            .push(
                text(fmt_duration(record.duration_ms()))
                    .size(ROW_TEXT)
                    .width(Length::Fixed(NARROW_COL_W)),
            )
            .push(
                text(fmt_bitrate(record.bitrate_kbps()))
                    .size(ROW_TEXT)
                    .width(Length::Fixed(80.0)),
            );

        let row_widget = mouse_area(
            container(cells)
                .padding([ROW_VPAD, ROW_HPAD])
                .height(Length::Fixed(ROW_H)),
        )
        .on_press(Message::SelectRecord(id))
        .on_double_click(Message::PlayRecord(id));

        col = col.push(row_widget);
    }

    col
}
