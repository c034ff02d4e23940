//! Reusable small widgets/helpers used across view modules.

use iced::widget::{button, column, container, image, row, slider, text, text_input};
use iced::{Alignment, Element, Length};

use super::super::state::{Confirm, Message, Notice, Tagsmith};
use super::super::util::display_title;
use super::constants::{DIALOG_W, LABEL_W};
use crate::core::playback::format_time;
use crate::core::types::CoverArt;

pub(crate) fn cover_placeholder(size: f32) -> iced::widget::Container<'static, Message> {
    container(
        column![text("♪").size(28), text("no cover").size(12)]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .center_x(Length::Fill)
    .center_y(Length::Fill)
}

/// Embedded picture if there is one, otherwise the placeholder.
pub(crate) fn cover_thumb(cover: Option<&CoverArt>, size: f32) -> Element<'static, Message> {
    match cover {
        Some(art) => container(image(image::Handle::from_bytes(art.data.clone())))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
        None => cover_placeholder(size).into(),
    }
}

/// Label, input, and a per-field save button.
pub(crate) fn field_row<'a>(
    label: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
    on_save: Message,
) -> iced::widget::Row<'a, Message> {
    row![
        text(label).width(Length::Fixed(LABEL_W)),
        text_input("", value)
            .on_input(on_input)
            .on_submit(on_save.clone())
            .width(Length::Fill),
        button("Save").on_press(on_save),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
}

pub(crate) fn labeled<'a>(
    label: &'a str,
    content: impl Into<Element<'a, Message>>,
) -> iced::widget::Row<'a, Message> {
    row![text(label).width(Length::Fixed(LABEL_W)), content.into()]
        .spacing(8)
        .align_y(Alignment::Center)
}

/// Boxed dialog body used by the modal overlays.
fn dialog<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(
        container(content)
            .padding(16)
            .width(Length::Fixed(DIALOG_W))
            .style(container::rounded_box),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

pub(crate) fn confirm_dialog(confirm: Confirm) -> Element<'static, Message> {
    dialog(
        column![
            text("Please confirm").size(18),
            text(confirm.question()),
            row![
                button("Yes").on_press(Message::ConfirmYes),
                button("No").on_press(Message::ConfirmNo),
            ]
            .spacing(8),
        ]
        .spacing(12),
    )
}

pub(crate) fn notice_dialog(notice: &Notice) -> Element<'_, Message> {
    dialog(
        column![
            text(&notice.title).size(18),
            text(&notice.body),
            button("OK").on_press(Message::DismissNotice),
        ]
        .spacing(12),
    )
}

/// Top playback bar.
///
/// Emits only Messages (no rodio, no decoding).
pub(crate) fn playback_bar(state: &Tagsmith) -> iced::widget::Container<'_, Message> {
    let t = &state.transport;
    let play_label = if t.is_playing { "Pause" } else { "Play" };

    let prev_btn = button("⏮").on_press(Message::Prev);
    let play_btn = button(play_label).on_press(Message::TogglePlayPause);
    let stop_btn = button("Stop").on_press(Message::Stop);
    let next_btn = button("⏭").on_press(Message::Next);

    // --- seek slider ---
    let pos = t.position_ms;
    let dur = t.duration_ms.unwrap_or(0);
    let seek_enabled = dur > 0;

    // slider needs a sane range; if we don't know duration yet, freeze it at 0..=1
    let seek_val = if seek_enabled {
        pos.min(dur) as f32 / dur as f32
    } else {
        0.0
    };
    let seek = slider(0.0..=1.0, seek_val, Message::SeekTo)
        .step(0.001)
        .on_release(Message::SeekCommit)
        .width(Length::Fill);

    let time_text = if seek_enabled {
        format!("{} / {}", format_time(pos), format_time(dur))
    } else {
        format!("{} / -:--", format_time(pos))
    };

    // --- volume slider ---
    let vol = t.volume.clamp(0.0, 1.0);
    let vol_slider = slider(0.0..=1.0, vol, Message::SetVolume)
        .step(0.01)
        .width(Length::Fixed(140.0));

    let now_playing = match t.now_playing.and_then(|id| state.files.get(id)) {
        Some(r) => display_title(r).to_string(),
        None => "Nothing playing".into(),
    };

    let bar = row![
        // left: transport
        row![prev_btn, play_btn, stop_btn, next_btn]
            .spacing(8)
            .align_y(Alignment::Center),
        // middle: now playing + seek
        column![
            text(now_playing).size(14),
            row![seek, text(time_text).size(12)]
                .spacing(10)
                .align_y(Alignment::Center),
        ]
        .spacing(6)
        .width(Length::Fill),
        // right: volume
        row![text("Vol").size(12), vol_slider]
            .spacing(8)
            .align_y(Alignment::Center),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    container(bar).padding(12)
}
