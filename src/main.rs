mod game;
mod ui;

use env_logger::Env;
use gettextrs::{LocaleCategory, bindtextdomain, setlocale, textdomain};
use log::warn;

const GETTEXT_PACKAGE: &str = "genius";
const LOCALEDIR: &str = match option_env!("GENIUS_LOCALEDIR") {
    Some(dir) => dir,
    None => "/usr/share/locale",
};

fn main() -> glib::ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    setlocale(LocaleCategory::LcAll, "");
    if let Err(err) = bindtextdomain(GETTEXT_PACKAGE, LOCALEDIR) {
        warn!("Unable to bind the text domain: {err}");
    }
    if let Err(err) = textdomain(GETTEXT_PACKAGE) {
        warn!("Unable to switch to the text domain: {err}");
    }

    ui::app::run()
}
