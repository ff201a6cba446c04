use gui::Gui;
use iced::{window, Application, Settings};

mod gui;

fn main() -> iced::Result {
    env_logger::init();
    let settings = Settings {
        window: window::Settings {
            size: (1820, 980),
            ..window::Settings::default()
        },
        antialiasing: true,
        ..Settings::default()
    };
    Gui::run(settings)
}
