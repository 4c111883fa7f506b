use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use libadwaita::prelude::*;

use super::state::{AppState, take_then};
use crate::game::Screen;

fn set_header_intro(st: &AppState) {
    if let (Some(header), Some(title)) = (&st.header, &st.title_intro) {
        header.set_title_widget(Some(title));
    }
    if let Some(back) = &st.back_button {
        back.set_visible(false);
    }
    if let Some(new_round) = &st.new_round_button {
        new_round.set_visible(false);
    }
}

fn set_header_game(st: &AppState) {
    if let (Some(header), Some(title)) = (&st.header, &st.title_game) {
        header.set_title_widget(Some(title));
    }
    if let Some(back) = &st.back_button {
        back.set_visible(true);
    }
    if let Some(new_round) = &st.new_round_button {
        new_round.set_visible(true);
    }
}

/// Brings the stack and header in line with the session's screen.
pub(super) fn sync_screen(state: &Rc<RefCell<AppState>>) {
    if state.borrow().session.view().screen == Screen::Intro {
        take_then(state, |st| st.prompt_dialog.take(), |dialog| dialog.force_close());
    }

    let mut st = state.borrow_mut();
    let screen = st.session.view().screen;
    if st.shown_screen == Some(screen) {
        return;
    }
    st.shown_screen = Some(screen);

    let (child, transition) = match screen {
        Screen::Intro => {
            set_header_intro(&st);
            ("intro", gtk::StackTransitionType::SlideRight)
        }
        Screen::Playing => {
            set_header_game(&st);
            ("game", gtk::StackTransitionType::SlideLeft)
        }
    };
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(transition);
        stack.set_visible_child_name(child);
    }
}
