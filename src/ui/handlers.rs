use gtk::glib;
use gtk4 as gtk;
use libadwaita as adw;
use log::{debug, error, info, warn};

use adw::prelude::*;
use crossbeam_channel::Receiver;
use gtk::{gio, EventControllerKey, GestureDrag};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::app::config::Action;
use crate::app::{AppConfig, AppContext, AppState};
use crate::bridge::{ClipboardOutcome, HostBridge, HostEvent, SaveOutcome};
use crate::capture::{
    CaptureError, CaptureKind, CaptureOutcome, CaptureWorkflow, EncodedImage, MonitorStreams,
    Point, SelectionRect,
};
use crate::host::{GtkHost, TrayAction};
use crate::ui::drawing::DrawingComponents;
use crate::ui::header::HeaderComponents;
use crate::ui::overlay::OverlayComponents;
use crate::ui::shortcuts::show_shortcuts_dialog;
use crate::ui::show_toast;
use crate::ui::toolbar::ToolbarComponents;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub type Workflow = CaptureWorkflow<GtkHost, MonitorStreams>;

#[derive(Clone)]
pub struct UiComponents {
    pub app: adw::Application,
    pub window: adw::ApplicationWindow,
    pub toast_overlay: adw::ToastOverlay,
    pub header: HeaderComponents,
    pub toolbar: ToolbarComponents,
    pub drawing: DrawingComponents,
    pub overlay: OverlayComponents,
}

/// Handles shared by every handler closure.
#[derive(Clone)]
pub struct Shared {
    pub state: Rc<RefCell<AppState>>,
    pub workflow: Rc<Workflow>,
    pub context: Rc<AppContext>,
    pub config: Rc<AppConfig>,
}

fn toast(shared: &Shared, ui: &UiComponents, message: &str) {
    let toasts = if shared.state.borrow().is_selecting() {
        &ui.overlay.toast_overlay
    } else {
        &ui.toast_overlay
    };
    show_toast(toasts, message, shared.config.capture.toast_timeout_secs);
}

fn show_main_window(ui: &UiComponents) {
    ui.window.set_visible(true);
    ui.window.present();
}

pub fn hide_to_tray(shared: &Shared, ui: &UiComponents) {
    ui.window.set_visible(false);
    info!("Window hidden to tray");

    if shared.context.take_minimize_notice() {
        let notification = gio::Notification::new(crate::APP_NAME);
        notification.set_body(Some("App was minimized to tray"));
        ui.app
            .send_notification(Some("minimized-to-tray"), &notification);
    }
}

fn show_capture_result(
    shared: &Shared,
    ui: &UiComponents,
    result: Result<CaptureOutcome, CaptureError>,
) {
    match result {
        Ok(outcome) => {
            let message = outcome.success_message();
            ui.drawing.set_image(Some(&outcome.image.pixels));
            shared.state.borrow_mut().set_capture(outcome.image);
            ui.toolbar.set_has_image(true);
            toast(shared, ui, message);
        }
        Err(e) => {
            error!("Capture failed: {}", e);
            toast(shared, ui, &e.user_message());
        }
    }
}

pub fn trigger_fullscreen(shared: &Shared, ui: &UiComponents) {
    debug!("Full screen capture requested");
    let shared = shared.clone();
    let ui = ui.clone();
    glib::spawn_future_local(async move {
        let result = shared.workflow.capture_fullscreen().await;
        show_capture_result(&shared, &ui, result);
    });
}

pub fn trigger_area(shared: &Shared, ui: &UiComponents) {
    debug!("Area capture requested");
    let shared = shared.clone();
    let ui = ui.clone();
    glib::spawn_future_local(async move {
        match shared.workflow.begin_area_selection().await {
            Ok(area) => {
                ui.overlay.open(area.preview());
                shared.state.borrow_mut().start_selection(area);
            }
            Err(e) => {
                error!("Failed to start area selection: {}", e);
                toast(&shared, &ui, &e.user_message());
            }
        }
    });
}

fn finish_selection(shared: &Shared, ui: &UiComponents, selection: SelectionRect) {
    let overlay_size = ui.overlay.surface_size();
    let Some(area) = shared.state.borrow_mut().exit_selection() else {
        warn!("Selection finished without an open capture");
        return;
    };

    let shared = shared.clone();
    let ui = ui.clone();
    glib::spawn_future_local(async move {
        let result = shared
            .workflow
            .finish_area_selection(area, selection, overlay_size)
            .await;
        ui.overlay.close();
        show_capture_result(&shared, &ui, result);
    });
}

pub fn cancel_selection(shared: &Shared, ui: &UiComponents) {
    let Some(area) = shared.state.borrow_mut().exit_selection() else {
        return;
    };
    ui.overlay.close();

    let shared = shared.clone();
    let ui = ui.clone();
    glib::spawn_future_local(async move {
        shared.workflow.cancel_area_selection(area).await;
        toast(&shared, &ui, "Selection cancelled");
    });
}

fn current_encoded(shared: &Shared) -> Option<(EncodedImage, CaptureKind)> {
    shared
        .state
        .borrow()
        .current
        .as_ref()
        .map(|image| (image.encoded.clone(), image.kind))
}

pub fn save_current(shared: &Shared, ui: &UiComponents) {
    let Some((encoded, kind)) = current_encoded(shared) else {
        debug!("Nothing to save");
        return;
    };

    let shared = shared.clone();
    let ui = ui.clone();
    glib::spawn_future_local(async move {
        let message = match shared.workflow.host().save_image(&encoded, kind).await {
            SaveOutcome::Saved { path } => {
                debug!("Saved {:?} capture to {}", kind, path.display());
                "Image saved successfully!".to_string()
            }
            SaveOutcome::Canceled => "Save canceled".to_string(),
            SaveOutcome::Failed { error } => CaptureError::Persistence(error).user_message(),
        };
        toast(&shared, &ui, &message);
    });
}

pub fn copy_current(shared: &Shared, ui: &UiComponents) {
    let Some((encoded, _)) = current_encoded(shared) else {
        debug!("Nothing to copy");
        return;
    };

    let shared = shared.clone();
    let ui = ui.clone();
    glib::spawn_future_local(async move {
        let message = match shared.workflow.host().copy_to_clipboard(&encoded).await {
            ClipboardOutcome::Copied => "Image copied to clipboard!".to_string(),
            ClipboardOutcome::Failed { error } => CaptureError::Clipboard(error).user_message(),
        };
        toast(&shared, &ui, &message);
    });
}

pub fn clear_current(shared: &Shared, ui: &UiComponents) {
    if !shared.state.borrow_mut().clear_capture() {
        return;
    }
    ui.drawing.set_image(None);
    ui.toolbar.set_has_image(false);
    toast(shared, ui, "Screenshot cleared! Ready for new capture.");
}

pub fn connect_capture_handlers(shared: &Shared, ui: &UiComponents) {
    ui.header.fullscreen_btn.connect_clicked({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_| trigger_fullscreen(&shared, &ui)
    });

    ui.header.area_btn.connect_clicked({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_| trigger_area(&shared, &ui)
    });
}

pub fn connect_action_handlers(shared: &Shared, ui: &UiComponents) {
    ui.toolbar.save_btn.connect_clicked({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_| save_current(&shared, &ui)
    });

    ui.toolbar.copy_btn.connect_clicked({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_| copy_current(&shared, &ui)
    });

    ui.toolbar.clear_btn.connect_clicked({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_| clear_current(&shared, &ui)
    });
}

pub fn connect_selection_handlers(shared: &Shared, ui: &UiComponents) {
    debug!("Connecting selection handlers");
    let drag = GestureDrag::new();

    drag.connect_drag_begin({
        let shared = shared.clone();
        let drawing_area = ui.overlay.drawing_area.clone();
        move |_, x, y| {
            shared
                .state
                .borrow_mut()
                .selection
                .pointer_down(Point::new(x, y));
            drawing_area.queue_draw();
        }
    });

    drag.connect_drag_update({
        let shared = shared.clone();
        let drawing_area = ui.overlay.drawing_area.clone();
        move |_, offset_x, offset_y| {
            let moved = shared
                .state
                .borrow_mut()
                .selection
                .pointer_move_by(offset_x, offset_y);
            if moved.is_some() {
                drawing_area.queue_draw();
            }
        }
    });

    drag.connect_drag_end({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_, offset_x, offset_y| {
            let released = {
                let mut s = shared.state.borrow_mut();
                let released = s.selection.pointer_up_by(offset_x, offset_y);
                debug!("Pointer released: {:?}", s.selection.state());
                released
            };
            ui.overlay.drawing_area.queue_draw();

            match released {
                Some(Ok(selection)) => finish_selection(&shared, &ui, selection),
                Some(Err(e)) => {
                    info!("{}", e);
                    toast(&shared, &ui, &e.user_message());
                }
                None => {}
            }
        }
    });

    ui.overlay.drawing_area.add_controller(drag);

    ui.overlay.cancel_btn.connect_clicked({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_| cancel_selection(&shared, &ui)
    });

    let keys = EventControllerKey::new();
    keys.connect_key_pressed({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_, key, _, modifiers| {
            if shared.config.shortcuts.get_action(key, modifiers) == Some(Action::Cancel) {
                cancel_selection(&shared, &ui);
                return glib::Propagation::Stop;
            }
            glib::Propagation::Proceed
        }
    });
    ui.overlay.window.add_controller(keys);

    ui.overlay.window.connect_close_request({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_| {
            if shared.context.is_quitting() {
                return glib::Propagation::Proceed;
            }
            cancel_selection(&shared, &ui);
            glib::Propagation::Stop
        }
    });
}

pub fn connect_key_handler(shared: &Shared, ui: &UiComponents) {
    let keys = EventControllerKey::new();
    keys.connect_key_pressed({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_, key, _, modifiers| {
            let Some(action) = shared.config.shortcuts.get_action(key, modifiers) else {
                return glib::Propagation::Proceed;
            };
            debug!("Shortcut: {:?}", action);

            match action {
                Action::CaptureFullScreen => trigger_fullscreen(&shared, &ui),
                Action::CaptureArea => trigger_area(&shared, &ui),
                Action::Save => save_current(&shared, &ui),
                Action::Copy => copy_current(&shared, &ui),
                Action::Clear => clear_current(&shared, &ui),
                Action::Cancel => hide_to_tray(&shared, &ui),
            }
            glib::Propagation::Stop
        }
    });
    ui.window.add_controller(keys);
}

pub fn connect_window_actions(shared: &Shared, ui: &UiComponents) {
    let show_shortcuts = gio::SimpleAction::new("show-shortcuts", None);
    show_shortcuts.connect_activate({
        let config = shared.config.clone();
        let window = ui.window.clone();
        move |_, _| show_shortcuts_dialog(&config, &window)
    });
    ui.window.add_action(&show_shortcuts);

    let minimize = gio::SimpleAction::new("minimize-to-tray", None);
    minimize.connect_activate({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_, _| hide_to_tray(&shared, &ui)
    });
    ui.window.add_action(&minimize);

    let quit = gio::SimpleAction::new("quit", None);
    quit.connect_activate({
        let context = shared.context.clone();
        let app = ui.app.clone();
        move |_, _| context.quit(&app)
    });
    ui.app.add_action(&quit);
    ui.app.set_accels_for_action("app.quit", &["<Control>q"]);

    ui.window.connect_close_request({
        let shared = shared.clone();
        let ui = ui.clone();
        move |_| {
            if shared.context.is_quitting() {
                return glib::Propagation::Proceed;
            }
            hide_to_tray(&shared, &ui);
            glib::Propagation::Stop
        }
    });
}

pub fn handle_host_event(shared: &Shared, ui: &UiComponents, event: HostEvent) {
    debug!("Host event: {:?}", event);
    match event {
        HostEvent::TriggerFullscreenCapture => trigger_fullscreen(shared, ui),
        HostEvent::TriggerAreaCapture => {
            // Stays hidden while a capture is running
            if !ui.window.is_visible() && !shared.workflow.is_busy() {
                show_main_window(ui);
            }
            trigger_area(shared, ui);
        }
    }
}

fn handle_tray_action(shared: &Shared, ui: &UiComponents, action: TrayAction) {
    match action {
        TrayAction::ShowApp => show_main_window(ui),
        TrayAction::CaptureFullScreen => {
            handle_host_event(shared, ui, HostEvent::TriggerFullscreenCapture)
        }
        TrayAction::CaptureArea => {
            if !shared.workflow.is_busy() {
                show_main_window(ui);
            }
            handle_host_event(shared, ui, HostEvent::TriggerAreaCapture);
        }
        TrayAction::Quit => shared.context.quit(&ui.app),
    }
}

/// Drain tray clicks and global shortcut presses on the main loop.
pub fn connect_host_events(shared: &Shared, ui: &UiComponents, tray_rx: Receiver<TrayAction>) {
    let shared = shared.clone();
    let ui = ui.clone();
    glib::timeout_add_local(EVENT_POLL_INTERVAL, move || {
        while let Ok(action) = tray_rx.try_recv() {
            handle_tray_action(&shared, &ui, action);
        }
        for event in shared.context.poll_shortcuts() {
            handle_host_event(&shared, &ui, event);
        }

        if shared.context.is_quitting() {
            glib::ControlFlow::Break
        } else {
            glib::ControlFlow::Continue
        }
    });
}

pub fn connect_all_handlers(shared: &Shared, ui: &UiComponents, tray_rx: Receiver<TrayAction>) {
    debug!("Initializing UI handlers");
    connect_capture_handlers(shared, ui);
    connect_action_handlers(shared, ui);
    connect_selection_handlers(shared, ui);
    connect_key_handler(shared, ui);
    connect_window_actions(shared, ui);
    connect_host_events(shared, ui, tray_rx);
}
