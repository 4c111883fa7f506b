use std::cell::RefCell;
use std::time::Instant;

use gtk4 as gtk;
use libadwaita as adw;

use crate::game::{PANEL_COUNT, PanelColor, Screen, Session};

pub struct AppState {
    pub session: Session,
    pub clock_origin: Instant,
    pub wake_handle: Option<glib::SourceId>,

    pub window: Option<adw::ApplicationWindow>,
    pub view_stack: Option<gtk::Stack>,
    pub header: Option<adw::HeaderBar>,
    pub back_button: Option<gtk::Button>,
    pub title_intro: Option<gtk::Label>,
    pub title_game: Option<gtk::Widget>,
    pub score_label: Option<gtk::Label>,
    pub level_label: Option<gtk::Label>,
    pub hint_label: Option<gtk::Label>,
    pub new_round_button: Option<gtk::Button>,
    pub prompt_dialog: Option<adw::AlertDialog>,

    // Board
    pub panel_buttons: Vec<gtk::Button>,
    pub panel_colors: [PanelColor; PANEL_COUNT],
    pub shown_screen: Option<Screen>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        AppState {
            session,
            clock_origin: Instant::now(),
            wake_handle: None,
            window: None,
            view_stack: None,
            header: None,
            back_button: None,
            title_intro: None,
            title_game: None,
            score_label: None,
            level_label: None,
            hint_label: None,
            new_round_button: None,
            prompt_dialog: None,
            panel_buttons: Vec::new(),
            panel_colors: [PanelColor::Idle; PANEL_COUNT],
            shown_screen: None,
        }
    }

    /// Wall-clock milliseconds since the window came up; the session clock follows it.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.clock_origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn sync_clock(&mut self) {
        let now = self.elapsed_ms();
        self.session.advance_to(now);
    }
}

/// Takes a value out of `cell` and hands it to `then` once the borrow is
/// released, so widget calls that re-enter the state can borrow it again.
pub(super) fn take_then<S, T>(
    cell: &RefCell<S>,
    take: impl FnOnce(&mut S) -> Option<T>,
    then: impl FnOnce(T),
) {
    let taken = take(&mut cell.borrow_mut());
    if let Some(value) = taken {
        then(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_then_runs_after_the_borrow_is_released() {
        let slot = RefCell::new(Some(3));
        let mut seen = None;
        take_then(
            &slot,
            |value| value.take(),
            |value| {
                *slot.borrow_mut() = Some(value + 1);
                seen = Some(value);
            },
        );
        assert_eq!(seen, Some(3));
        assert_eq!(*slot.borrow(), Some(4));
    }

    #[test]
    fn take_then_skips_an_empty_slot() {
        let slot: RefCell<Option<u32>> = RefCell::new(None);
        let mut called = false;
        take_then(&slot, |value| value.take(), |_| called = true);
        assert!(!called);
    }
}
