// SPDX-License-Identifier: GPL-3.0-only

use app::Pagewise;
use env_logger::Builder;
use iced::window::Settings;

use pagewise_core::settings;

mod app;
mod i18n;

fn main() -> Result<(), iced::Error> {
    Builder::from_default_env().init();

    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    let settings = match settings::Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("invalid settings: {err}");
            std::process::exit(1);
        }
    };

    iced::application(|_: &Pagewise| fl!("app-title"), Pagewise::update, Pagewise::view)
        .subscription(Pagewise::subscription)
        .window(Settings {
            position: iced::window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .run_with(move || Pagewise::new(settings))
}
