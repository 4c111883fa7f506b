use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gettextrs::gettext;
use gtk4::glib;
use gtk4::prelude::*;

use super::dialogs::show_round_dialog;
use super::scene::sync_screen;
use super::state::AppState;
use crate::game::{Prompt, PromptKind, Session, SessionEvent};

/// Catches the session up to wall-clock time, runs `action` on it and redraws.
pub(super) fn with_session<F>(state: &Rc<RefCell<AppState>>, action: F)
where
    F: FnOnce(&mut Session),
{
    {
        let mut st = state.borrow_mut();
        st.sync_clock();
        action(&mut st.session);
    }
    refresh(state);
}

pub(super) fn refresh(state: &Rc<RefCell<AppState>>) {
    let events = state.borrow_mut().session.take_events();
    sync_screen(state);
    update_hud(&state.borrow());
    update_board(&mut state.borrow_mut());

    for event in events {
        let prompt = match event {
            SessionEvent::StateChanged => continue,
            SessionEvent::RoundSucceeded { score, level } => Prompt {
                kind: PromptKind::Success,
                score,
                level,
            },
            SessionEvent::RoundFailed { score, level } => Prompt {
                kind: PromptKind::Failure,
                score,
                level,
            },
        };
        show_round_dialog(state, prompt);
    }

    arm_wake_timer(state);
}

pub(super) fn update_hud(st: &AppState) {
    let view = st.session.view();
    if let Some(label) = &st.score_label {
        label.set_text(&gettext("Score: {}").replace("{}", &view.score.to_string()));
    }
    if let Some(label) = &st.level_label {
        label.set_text(&gettext("Level: {}").replace("{}", &view.level.to_string()));
    }
    if let Some(label) = &st.hint_label {
        let hint = if view.flashing {
            gettext("Watch the sequence")
        } else if view.prompt.is_some() {
            String::new()
        } else {
            gettext("Repeat the sequence")
        };
        label.set_text(&hint);
    }
}

fn update_board(st: &mut AppState) {
    let view = st.session.view();
    for (index, button) in st.panel_buttons.iter().enumerate() {
        let previous = st.panel_colors[index];
        let current = view.panels[index];
        button.set_sensitive(!view.flashing);
        if previous != current {
            button.remove_css_class(previous.css_class());
        }
        button.add_css_class(current.css_class());
        if previous != current
            && let Some(child) = button.child()
        {
            child.queue_draw();
        }
    }
    st.panel_colors = view.panels;
}

pub(super) fn stop_wake_timer(st: &mut AppState) {
    if let Some(handle) = st.wake_handle.take() {
        handle.remove();
    }
}

/// Keeps exactly one glib timeout armed for the session's next due task.
pub(super) fn arm_wake_timer(state: &Rc<RefCell<AppState>>) {
    let mut st = state.borrow_mut();
    stop_wake_timer(&mut st);
    let Some(due_ms) = st.session.next_wakeup() else {
        return;
    };
    let delay = Duration::from_millis(due_ms.saturating_sub(st.elapsed_ms()));

    let state_wake = state.clone();
    let handle = glib::timeout_add_local_once(delay, move || {
        {
            let mut st = state_wake.borrow_mut();
            st.wake_handle = None;
            st.sync_clock();
        }
        refresh(&state_wake);
    });
    st.wake_handle = Some(handle);
}
