//! GUI renderer (reads state, produces widgets; no mutation).

mod browser;
mod constants;
mod editor;
mod session;
mod sidebar;
mod widgets;

use iced::widget::{column, container, opaque, row, stack};
use iced::{Element, Length};

use super::state::{Message, Tagsmith};
use constants::{EDITOR_W, PLAYBACK_H, SIDEBAR_W};

pub(crate) fn view(state: &Tagsmith) -> Element<'_, Message> {
    let playback = widgets::playback_bar(state).height(Length::Fixed(PLAYBACK_H));

    let sidebar = sidebar::build_sidebar(state).width(Length::Fixed(SIDEBAR_W));

    // An open batch edit takes over the center panel.
    let center: Element<'_, Message> = match &state.session {
        Some(s) => session::build_session(state, s).into(),
        None => browser::build_browser(state).into(),
    };
    let main = container(center).padding(12).width(Length::Fill);

    let editor = editor::build_editor(state).width(Length::Fixed(EDITOR_W));

    let body = row![sidebar, main, editor].spacing(12).height(Length::Fill);
    let base = column![playback, body].spacing(12).padding(12);

    // Dialogs: notice above confirm above everything else.
    let overlay: Option<Element<'_, Message>> = match (&state.notice, state.confirm) {
        (Some(n), _) => Some(widgets::notice_dialog(n)),
        (None, Some(c)) => Some(widgets::confirm_dialog(c)),
        (None, None) => None,
    };

    match overlay {
        Some(dialog) => stack![base, opaque(dialog)].into(),
        None => base.into(),
    }
}
