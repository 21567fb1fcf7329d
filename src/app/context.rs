//! Host lifecycle context
//!
//! Owns what keeps the app alive in the background: the application hold,
//! the tray icon and the global shortcuts.

use gtk4 as gtk;
use libadwaita as adw;

use crossbeam_channel::Sender;
use gtk::gio;
use gtk4::prelude::*;
use log::{info, warn};
use std::cell::{Cell, RefCell};

use super::config::AppConfig;
use crate::bridge::HostEvent;
use crate::host::{create_tray, GlobalShortcuts, TrayAction, TrayHandle};

pub struct AppContext {
    quitting: Cell<bool>,
    minimize_notice_sent: Cell<bool>,
    hold: RefCell<Option<gio::ApplicationHoldGuard>>,
    tray: RefCell<Option<TrayHandle>>,
    shortcuts: RefCell<Option<GlobalShortcuts>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            quitting: Cell::new(false),
            minimize_notice_sent: Cell::new(false),
            hold: RefCell::new(None),
            tray: RefCell::new(None),
            shortcuts: RefCell::new(None),
        }
    }

    /// Keep the application running with no visible window, then bring up
    /// the tray and the global shortcuts. Either may be unavailable on the
    /// current desktop; that is logged and the app carries on.
    pub fn init(&self, app: &adw::Application, config: &AppConfig, tray_tx: Sender<TrayAction>) {
        *self.hold.borrow_mut() = Some(app.hold());

        match create_tray(tray_tx, &config.global_shortcuts) {
            Ok(handle) => {
                info!("Tray icon created");
                *self.tray.borrow_mut() = Some(handle);
            }
            Err(e) => warn!("{}", e),
        }

        match GlobalShortcuts::register(&config.global_shortcuts) {
            Ok(shortcuts) => *self.shortcuts.borrow_mut() = Some(shortcuts),
            Err(e) => warn!("{}", e),
        }
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting.get()
    }

    /// True exactly once: the first time the window goes to the tray.
    pub fn take_minimize_notice(&self) -> bool {
        !self.minimize_notice_sent.replace(true)
    }

    /// Shortcut presses since the last call.
    pub fn poll_shortcuts(&self) -> Vec<HostEvent> {
        match self.shortcuts.borrow().as_ref() {
            Some(shortcuts) => shortcuts.poll(),
            None => Vec::new(),
        }
    }

    /// Release everything `init` acquired. Safe to call more than once.
    pub fn teardown(&self) {
        self.quitting.set(true);

        if let Some(mut shortcuts) = self.shortcuts.borrow_mut().take() {
            shortcuts.unregister_all();
        }
        if let Some(handle) = self.tray.borrow_mut().take() {
            let _ = handle.shutdown();
        }
        self.hold.borrow_mut().take();
    }

    pub fn quit(&self, app: &adw::Application) {
        info!("Quitting");
        self.teardown();
        app.quit();
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimize_notice_is_sent_once() {
        let context = AppContext::new();
        assert!(context.take_minimize_notice());
        assert!(!context.take_minimize_notice());
        assert!(!context.take_minimize_notice());
    }

    #[test]
    fn teardown_marks_quitting_and_is_repeatable() {
        let context = AppContext::new();
        assert!(!context.is_quitting());
        context.teardown();
        context.teardown();
        assert!(context.is_quitting());
        assert!(context.poll_shortcuts().is_empty());
    }
}
