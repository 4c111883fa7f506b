use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

use super::hud::with_session;
use super::state::{AppState, take_then};
use crate::game::{Prompt, PromptKind};

const CONTINUE_RESPONSE: &str = "continue";

fn prompt_texts(prompt: Prompt) -> (String, String, String) {
    match prompt.kind {
        PromptKind::Success => (
            gettext("Well done!"),
            gettext("You got the sequence right!\nScore: {score}\nLevel: {level}")
                .replace("{score}", &prompt.score.to_string())
                .replace("{level}", &prompt.level.to_string()),
            gettext("Next Round"),
        ),
        PromptKind::Failure => (
            gettext("Oops!"),
            gettext("Wrong sequence.\nFinal score: {score}")
                .replace("{score}", &prompt.score.to_string()),
            gettext("Try Again"),
        ),
    }
}

/// Shows the round result; its only response acknowledges and starts the next round.
pub fn show_round_dialog(state: &Rc<RefCell<AppState>>, prompt: Prompt) {
    let (heading, body, action) = prompt_texts(prompt);
    let dialog = adw::AlertDialog::new(Some(&heading), Some(&body));
    dialog.add_response(CONTINUE_RESPONSE, &action);
    dialog.set_response_appearance(CONTINUE_RESPONSE, adw::ResponseAppearance::Suggested);
    dialog.set_default_response(Some(CONTINUE_RESPONSE));
    dialog.set_close_response(CONTINUE_RESPONSE);

    let state_ack = state.clone();
    dialog.connect_response(None, move |_, _| {
        state_ack.borrow_mut().prompt_dialog = None;
        with_session(&state_ack, |session| {
            session.acknowledge();
        });
    });

    take_then(
        state,
        |st| st.prompt_dialog.replace(dialog.clone()),
        |previous| previous.force_close(),
    );
    let window = state.borrow().window.clone();
    dialog.present(window.as_ref());
}

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some(&gettext("Instructions")),
        Some(&gettext(
            "Watch the panels light up one after another.\n\
Repeat the sequence by tapping the panels in the same order.\n\
Every correct round is worth 100 points and the sequences get longer and faster.",
        )),
    );
    dialog.add_response("ok", &gettext("Got it"));
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Genius")
        .application_icon(super::app::APP_ID)
        .version(env!("CARGO_PKG_VERSION"))
        .comments(gettext("Memorize the sequence of lights."))
        .license_type(gtk::License::MitX11)
        .build();
    dialog.present(app.active_window().as_ref());
    dialog
}
