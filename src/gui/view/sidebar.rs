//! Left sidebar (add files, selection, batch actions).

use iced::Length;
use iced::widget::{button, column, container, row, scrollable, text, text_input};

use super::super::state::{Message, Tagsmith};
use crate::core::field::Field;
use crate::core::session::EditMode;

pub(crate) fn build_sidebar(state: &Tagsmith) -> iced::widget::Container<'_, Message> {
    let path_input = text_input("Folder or file path", &state.path_input)
        .on_input(Message::PathInputChanged)
        .on_submit(Message::AddPath)
        .width(Length::Fill);
    let add_row = row![path_input, button("Add").on_press(Message::AddPath)].spacing(8);

    let checked = state.files.checked().len();
    let selection = column![
        text(format!("{checked} of {} checked", state.files.len())).size(12),
        row![
            button("Check all").on_press(Message::CheckAll),
            button("None").on_press(Message::UncheckAll),
        ]
        .spacing(8),
        button("Remove checked").on_press(Message::RemoveChecked),
    ]
    .spacing(6);

    let mut fields = column![text("Edit checked files").size(16)].spacing(6);
    for field in Field::ALL {
        fields = fields.push(
            button(text(field.label()))
                .on_press(Message::OpenSession(EditMode::Field(field)))
                .width(Length::Fill),
        );
    }

    let guesses = column![
        text("Guess").size(16),
        button("Tags from file name")
            .on_press(Message::OpenSession(EditMode::GuessTags))
            .width(Length::Fill),
        button("File name from tags")
            .on_press(Message::OpenSession(EditMode::GuessName))
            .width(Length::Fill),
    ]
    .spacing(6);

    let col = column![
        text("Tagsmith").size(20),
        text(&state.status).size(12),
        add_row,
        selection,
        fields,
        guesses,
    ]
    .spacing(12);

    container(scrollable(col).height(Length::Fill)).padding(12)
}
