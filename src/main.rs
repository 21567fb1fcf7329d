use libadwaita as adw;

use adw::prelude::*;

mod app;
mod bridge;
mod capture;
mod host;
mod ui;

use app::AppConfig;

const APP_ID: &str = "org.example.GleevaCapture";
const APP_NAME: &str = "Gleeva Capture";

fn main() -> gtk4::glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting {}", APP_NAME);

    let config = AppConfig::default();
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| ui::build_ui(app, &config));
    app.run()
}
