pub mod drawing;
pub mod handlers;
pub mod header;
pub mod overlay;
pub mod shortcuts;
pub mod toolbar;

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::Orientation;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::{AppConfig, AppContext, AppState};
use crate::capture::{CaptureWorkflow, MonitorStreams};
use crate::host::GtkHost;

pub fn show_toast(toasts: &adw::ToastOverlay, message: &str, timeout_secs: u32) {
    let toast = adw::Toast::builder()
        .title(message)
        .use_markup(false)
        .timeout(timeout_secs)
        .build();
    toasts.add_toast(toast);
}

fn main_window(app: &adw::Application) -> Option<adw::ApplicationWindow> {
    app.windows()
        .into_iter()
        .find_map(|window| window.downcast::<adw::ApplicationWindow>().ok())
}

pub fn build_ui(app: &adw::Application, config: &AppConfig) {
    // Activated again while running in the tray
    if let Some(window) = main_window(app) {
        debug!("Already running, presenting main window");
        window.set_visible(true);
        window.present();
        return;
    }

    let config = Rc::new(config.clone());
    let state = Rc::new(RefCell::new(AppState::new(config.capture.min_selection)));

    let header = header::create_header_bar();
    let toolbar = toolbar::create_toolbar();
    let drawing = drawing::create_drawing_area();

    let preview = gtk::Overlay::builder().child(&drawing.drawing_area).build();
    preview.add_overlay(&drawing.placeholder_icon);
    preview.add_overlay(&toolbar.actions_box);

    let toast_overlay = adw::ToastOverlay::new();
    toast_overlay.set_child(Some(&preview));

    let content = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .build();
    content.append(&header.header_bar);
    content.append(&toast_overlay);

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(crate::APP_NAME)
        .content(&content)
        .default_width(900)
        .default_height(600)
        .build();

    let selection_overlay = overlay::create_overlay(app, &state);

    let (tray_tx, tray_rx) = crossbeam_channel::unbounded();
    let context = Rc::new(AppContext::new());
    context.init(app, &config, tray_tx);

    let workflow = Rc::new(CaptureWorkflow::new(
        GtkHost::new(&window, config.capture.clone()),
        MonitorStreams,
        config.capture.clone(),
    ));

    let shared = handlers::Shared {
        state,
        workflow,
        context,
        config,
    };
    let components = handlers::UiComponents {
        app: app.clone(),
        window: window.clone(),
        toast_overlay,
        header,
        toolbar,
        drawing,
        overlay: selection_overlay,
    };

    handlers::connect_all_handlers(&shared, &components, tray_rx);

    window.present();
}
