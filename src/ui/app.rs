use std::cell::RefCell;
use std::error::Error as _;
use std::rc::Rc;
use std::sync::Once;

use gettextrs::gettext;
use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use log::{info, warn};

use adw::prelude::*;

use super::board::{CONTENT_MARGIN, build_board_grid};
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud::{refresh, stop_wake_timer, with_session};
use super::state::AppState;
use crate::game::config::{self, GameConfig};
use crate::game::{RandomSequence, Screen, SequenceSource, Session};

pub const APP_ID: &str = "io.genius.Genius";
const RESOURCE_PREFIX: &str = "/io/genius/Genius";

fn load_config() -> GameConfig {
    let path = config::config_path();
    match GameConfig::load_from(&path) {
        Ok(config) => config,
        Err(err) => {
            match err.source() {
                Some(source) => warn!("{err}: {source}; using default timings"),
                None => warn!("{err}; using default timings"),
            }
            GameConfig::default()
        }
    }
}

fn sequence_source() -> Box<dyn SequenceSource> {
    match config::seed_from_env() {
        Some(seed) => {
            info!("Using seeded sequences ({}={seed})", config::SEED_ENV);
            Box::new(RandomSequence::seeded(seed))
        }
        None => Box::new(RandomSequence::from_entropy()),
    }
}

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        load_css();
        adw::StyleManager::default().set_color_scheme(adw::ColorScheme::ForceDark);

        let session = Session::new(load_config(), sequence_source());
        let state = Rc::new(RefCell::new(AppState::new(session)));

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);

        let title_intro = gtk::Label::new(None);
        title_intro.set_markup("<b>Genius</b>");
        title_intro.set_halign(gtk::Align::Center);

        let title_game_box = gtk::Box::new(gtk::Orientation::Horizontal, 18);
        title_game_box.set_valign(gtk::Align::Center);
        title_game_box.set_halign(gtk::Align::Center);
        let score_label = gtk::Label::builder()
            .css_classes(vec!["score-text"])
            .build();
        let level_label = gtk::Label::builder()
            .css_classes(vec!["score-text"])
            .build();
        title_game_box.append(&score_label);
        title_game_box.append(&level_label);

        let header = adw::HeaderBar::builder().title_widget(&title_intro).build();
        header.add_css_class("app-header");
        header.add_css_class("flat");

        let back_button = gtk::Button::builder()
            .icon_name("go-previous-symbolic")
            .build();
        back_button.set_tooltip_text(Some(&gettext("Back")));
        back_button.connect_clicked({
            let state = state.clone();
            move |_| {
                with_session(&state, Session::restart_to_intro);
            }
        });
        header.pack_start(&back_button);

        let menu_model = gio::Menu::new();
        menu_model.append(Some(&gettext("Instructions")), Some("app.instructions"));
        menu_model.append(Some(&gettext("About Genius")), Some("app.about"));
        menu_model.append(Some(&gettext("Quit")), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let new_round_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        new_round_button.set_tooltip_text(Some(&gettext("New Round")));
        new_round_button.connect_clicked({
            let state = state.clone();
            move |_| {
                with_session(&state, Session::new_round);
            }
        });
        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&new_round_button);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        let view_stack = gtk::Stack::new();
        view_stack.set_hexpand(true);
        view_stack.set_vexpand(true);
        view_stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
        view_stack.set_transition_duration(300);

        let intro_view = build_intro_view(&state);
        view_stack.add_named(&intro_view, Some("intro"));

        let (game_view, hint_label) = build_game_view(&state);
        view_stack.add_named(&game_view, Some("game"));

        view_stack.set_visible_child_name("intro");
        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Genius")
            .icon_name(APP_ID)
            .default_width(420)
            .default_height(720)
            .content(&toolbar)
            .build();
        win.set_size_request(340, 560);
        win.add_css_class("app-window");

        {
            let mut st = state.borrow_mut();
            st.window = Some(win.clone());
            st.view_stack = Some(view_stack.clone());
            st.header = Some(header.clone());
            st.back_button = Some(back_button);
            st.new_round_button = Some(new_round_button);
            st.title_intro = Some(title_intro);
            st.title_game = Some(title_game_box.upcast::<gtk::Widget>());
            st.score_label = Some(score_label);
            st.level_label = Some(level_label);
            st.hint_label = Some(hint_label);
        }

        let global_key = gtk::EventControllerKey::new();
        global_key.set_propagation_phase(gtk::PropagationPhase::Capture);
        global_key.connect_key_pressed({
            let state = state.clone();
            move |_, key, _, _| {
                if key == gdk::Key::Escape {
                    let in_game = state.borrow().session.view().screen == Screen::Playing;
                    if in_game {
                        with_session(&state, Session::restart_to_intro);
                        return glib::Propagation::Stop;
                    }
                }
                glib::Propagation::Proceed
            }
        });
        win.add_controller(global_key);

        win.connect_close_request({
            let state = state.clone();
            move |_| {
                stop_wake_timer(&mut state.borrow_mut());
                glib::Propagation::Proceed
            }
        });

        refresh(&state);
        win.present();
    });

    app.run()
}

fn load_css() {
    static RESOURCES_INIT: Once = Once::new();
    RESOURCES_INIT.call_once(|| {
        if let Err(err) = gio::resources_register_include!("genius.gresource") {
            warn!("Failed to register embedded resources: {err}");
        }
    });

    let Some(display) = gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_resource(&format!("{RESOURCE_PREFIX}/style.css"));
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn build_intro_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("intro-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 6);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);

    let title = gtk::Label::new(Some(&gettext("Welcome to the Genius Challenge!")));
    title.add_css_class("intro-title");
    title.add_css_class("title-1");
    title.set_wrap(true);
    title.set_justify(gtk::Justification::Center);

    let subtitle = gtk::Label::new(Some(&gettext("Test your memory")));
    subtitle.add_css_class("intro-subtitle");

    let start_button = gtk::Button::with_label(&gettext("Start Game"));
    start_button.add_css_class("start-button");
    start_button.add_css_class("pill");
    start_button.set_halign(gtk::Align::Center);
    start_button.set_size_request(200, 48);
    start_button.connect_clicked({
        let state = state.clone();
        move |_| {
            with_session(&state, Session::start_game);
        }
    });

    content.append(&title);
    content.append(&subtitle);
    content.append(&start_button);
    center.set_center_widget(Some(&content));
    root.append(&center);
    root
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> (gtk::Box, gtk::Label) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");
    root.set_margin_top(CONTENT_MARGIN);
    root.set_margin_bottom(CONTENT_MARGIN);
    root.set_margin_start(CONTENT_MARGIN);
    root.set_margin_end(CONTENT_MARGIN);

    let title = gtk::Label::new(Some("Genius"));
    title.add_css_class("game-title");
    title.add_css_class("title-1");

    let hint = gtk::Label::new(None);
    hint.add_css_class("game-hint");

    let board_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    board_frame.set_halign(gtk::Align::Fill);
    board_frame.set_valign(gtk::Align::Fill);
    board_frame.set_hexpand(true);
    board_frame.set_vexpand(true);
    board_frame.set_child(Some(&build_board_grid(state)));

    let footer = gtk::Box::new(gtk::Orientation::Vertical, 10);
    footer.set_halign(gtk::Align::Center);

    let new_round = gtk::Button::with_label(&gettext("New Round"));
    new_round.add_css_class("action-button");
    new_round.add_css_class("pill");
    new_round.set_size_request(200, -1);
    new_round.connect_clicked({
        let state = state.clone();
        move |_| {
            with_session(&state, Session::new_round);
        }
    });

    let back = gtk::Button::with_label(&gettext("Back"));
    back.add_css_class("action-button-secondary");
    back.add_css_class("pill");
    back.set_size_request(200, -1);
    back.connect_clicked({
        let state = state.clone();
        move |_| {
            with_session(&state, Session::restart_to_intro);
        }
    });

    footer.append(&new_round);
    footer.append(&back);

    root.append(&title);
    root.append(&hint);
    root.append(&board_frame);
    root.append(&footer);
    (root, hint)
}
