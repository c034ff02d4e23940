//! Batch edit panel: template input, marker picker, live preview.

use iced::widget::{Column, Row, button, column, pick_list, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};

use super::super::state::{Message, Tagsmith};
use super::constants::{HEADER_TEXT, ROW_TEXT, WIDE_COL_W};
use super::widgets::labeled;
use crate::core::field::Field;
use crate::core::session::{EditMode, EditSession};
use crate::core::tags::COVER_EXTENSIONS;
use crate::core::template::{Key, ValueMode};
use crate::core::types::TagRecord;

pub(crate) fn build_session<'a>(
    state: &'a Tagsmith,
    session: &'a EditSession,
) -> Column<'a, Message> {
    let mut col = column![text(session.mode().title()).size(18)].spacing(12);

    col = match session.mode() {
        EditMode::Cover => col.push(cover_controls(state, session)),
        EditMode::Field(_) => {
            let modes = pick_list(
                &ValueMode::ALL[..],
                Some(session.value_mode()),
                Message::ValueModeSelected,
            );
            let col = col.push(labeled("Value", modes));
            if session.uses_template() {
                col.push(template_controls(state, session))
            } else {
                col
            }
        }
        EditMode::GuessTags | EditMode::GuessName => col.push(template_controls(state, session)),
    };

    col.push(text(format!("Preview ({} file(s))", session.ids().len())).size(HEADER_TEXT))
        .push(scrollable(preview_table(state, session)).height(Length::Fill))
        .push(
            row![
                button("Finish").on_press(Message::FinishSession),
                button("Cancel").on_press(Message::CancelSession),
            ]
            .spacing(8),
        )
}

fn template_controls<'a>(state: &'a Tagsmith, session: &'a EditSession) -> Column<'a, Message> {
    let extraction = session.mode() == EditMode::GuessTags;

    let p = session.prefix();
    let placeholder = if extraction {
        format!("e.g. {p}ar(.+?) - {p}sn(.+)")
    } else {
        format!("e.g. {p}tr - {p}sn")
    };
    let input = text_input(&placeholder, session.template())
        .on_input(Message::TemplateChanged)
        .width(Length::Fill);

    let mut markers = Row::new().spacing(4);
    for key in Key::ALL {
        // Index means "running number" when building, "skip" when extracting.
        let label = match key {
            Key::Index if extraction => "Skip",
            k => k.label(),
        };
        markers = markers.push(
            button(text(label).size(12))
                .on_press(Message::InsertMarker(key))
                .padding([2, 6]),
        );
    }

    let markers = scrollable(markers).direction(scrollable::Direction::Horizontal(
        scrollable::Scrollbar::default(),
    ));
    let mut col = column![labeled("Template", input), markers].spacing(8);

    if extraction {
        let fills: Vec<&str> = session
            .targets()
            .into_iter()
            .map(Field::label)
            .collect();
        if !fills.is_empty() {
            col = col.push(text(format!("Fills: {}", fills.join(", "))).size(12));
        }
    }

    if let Some(problem) = session.template_problem() {
        col = col.push(text(format!("Pattern does not compile yet: {problem}")).size(12));
    }

    if !extraction {
        let draft = &state.session_draft;
        col = col.push(
            row![
                labeled(
                    "Start at",
                    text_input("1", &draft.start)
                        .on_input(Message::StartIndexChanged)
                        .width(Length::Fixed(70.0)),
                ),
                labeled(
                    "Digits",
                    text_input("2", &draft.digits)
                        .on_input(Message::DigitsChanged)
                        .width(Length::Fixed(70.0)),
                ),
            ]
            .spacing(16),
        );
    }

    col
}

fn cover_controls<'a>(state: &'a Tagsmith, session: &'a EditSession) -> Column<'a, Message> {
    let chosen = match session.cover_choice() {
        None => "Nothing chosen: Finish leaves covers as they are.".to_string(),
        Some("") => "Covers will be removed.".to_string(),
        Some(path) => format!("New cover: {path}"),
    };

    column![
        row![
            text_input(&image_placeholder(), &state.session_draft.cover_source)
                .on_input(Message::SessionCoverChanged)
                .on_submit(Message::ChooseSessionCover)
                .width(Length::Fill),
            button("Use").on_press(Message::ChooseSessionCover),
            button("Remove covers").on_press(Message::ClearSessionCover),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        text(chosen).size(12),
    ]
    .spacing(8)
}

pub(crate) fn image_placeholder() -> String {
    format!("Image path ({})", COVER_EXTENSIONS.join(", "))
}

/// Current vs proposed, one line per record in batch order.
fn preview_table<'a>(state: &'a Tagsmith, session: &'a EditSession) -> Column<'a, Message> {
    let mut col = column![
        row![
            text("#").size(HEADER_TEXT).width(Length::Fixed(30.0)),
            text("File").size(HEADER_TEXT).width(Length::Fixed(WIDE_COL_W)),
            text("Now").size(HEADER_TEXT).width(Length::Fixed(WIDE_COL_W)),
            text("New").size(HEADER_TEXT).width(Length::Fill),
        ]
        .spacing(10)
    ]
    .spacing(2);

    let last = session.ids().len().saturating_sub(1);
    for (i, id) in session.ids().iter().enumerate() {
        let Some(record) = state.files.get(*id) else {
            continue;
        };
        let (now, new) = before_after(record, session.mode());

        let controls = row![
            small_button("↑", (i > 0).then_some(Message::MoveRowUp(i))),
            small_button("↓", (i < last).then_some(Message::MoveRowDown(i))),
            small_button("✕", Some(Message::RemoveRow(i))),
        ]
        .spacing(2);

        col = col.push(
            row![
                text(format!("{}", i + 1)).size(ROW_TEXT).width(Length::Fixed(30.0)),
                text(record.base_name()).size(ROW_TEXT).width(Length::Fixed(WIDE_COL_W)),
                text(now).size(ROW_TEXT).width(Length::Fixed(WIDE_COL_W)),
                text(new).size(ROW_TEXT).width(Length::Fill),
                controls,
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        );
    }

    col
}

fn small_button(label: &str, msg: Option<Message>) -> Element<'_, Message> {
    button(text(label).size(12))
        .on_press_maybe(msg)
        .padding([2, 6])
        .into()
}

fn before_after(record: &TagRecord, mode: EditMode) -> (String, String) {
    match mode.target() {
        Some(Field::Cover) => (
            if record.has_cover() { "cover" } else { "none" }.to_string(),
            match record.staged(Field::Cover) {
                None => "(unchanged)".to_string(),
                Some("") => "none".to_string(),
                Some(path) => path.to_string(),
            },
        ),
        Some(field) => (
            record.text(field).to_string(),
            record.staged(field).unwrap_or("").to_string(),
        ),
        // Guess tags: only what matched.
        None => {
            let (mut now, mut new) = (Vec::new(), Vec::new());
            for (f, v) in record.staged_fields().filter(|(_, v)| !v.is_empty()) {
                now.push(format!("{}: {}", f.label(), record.text(f)));
                new.push(format!("{}: {v}", f.label()));
            }
            (now.join(", "), new.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::fixtures::record;

    #[test]
    fn guess_tags_preview_lists_only_matches() {
        let mut r = record("a.mp3", &[(Field::Album, "Old")]);
        r.stage(Field::Album, "New".into());
        r.stage(Field::Artist, String::new());

        let (now, new) = before_after(&r, EditMode::GuessTags);
        assert_eq!(now, "Album: Old");
        assert_eq!(new, "Album: New");
    }

    #[test]
    fn cover_preview_wording() {
        let mut r = record("a.mp3", &[]);
        assert_eq!(before_after(&r, EditMode::Cover).1, "(unchanged)");
        r.stage(Field::Cover, String::new());
        assert_eq!(before_after(&r, EditMode::Cover), ("none".into(), "none".into()));
    }
}
