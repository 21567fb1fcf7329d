//! Desktop host integration
//!
//! `GtkHost` implements the bridge the capture workflows talk to. The tray
//! icon, global shortcuts and display server detection live here too.

mod desktop;
pub mod hotkeys;
pub mod tray;

use gtk4 as gtk;
use libadwaita as adw;

use gtk::{gdk, gio, glib};
use gtk4::prelude::*;
use log::{debug, error, info};
use std::cell::RefCell;

use crate::app::config::CaptureConfig;
use crate::bridge::{
    capture_file_name, unix_millis_now, ClipboardOutcome, HostBridge, SaveOutcome,
};
use crate::capture::workflow::settle;
use crate::capture::{list_screen_sources, CaptureKind, EncodedImage, ScreenSource};

pub use hotkeys::GlobalShortcuts;
pub use tray::{create_tray, TrayAction, TrayHandle};

/// Windows hidden for a capture, kept until the main window comes back.
struct HiddenWindows<W> {
    windows: RefCell<Vec<W>>,
}

impl<W: PartialEq> HiddenWindows<W> {
    fn new() -> Self {
        Self {
            windows: RefCell::new(Vec::new()),
        }
    }

    fn remember(&self, window: W) {
        let mut windows = self.windows.borrow_mut();
        if !windows.contains(&window) {
            windows.push(window);
        }
    }

    /// Empties the stash and returns the windows `keep` accepts.
    fn restore(&self, keep: impl Fn(&W) -> bool) -> Vec<W> {
        self.windows.take().into_iter().filter(|w| keep(w)).collect()
    }
}

pub struct GtkHost {
    window: adw::ApplicationWindow,
    hidden: HiddenWindows<gtk::Window>,
    config: CaptureConfig,
}

impl GtkHost {
    pub fn new(window: &adw::ApplicationWindow, config: CaptureConfig) -> Self {
        Self {
            window: window.clone(),
            hidden: HiddenWindows::new(),
            config,
        }
    }

    async fn choose_save_path(&self, kind: CaptureKind) -> Result<Option<gio::File>, glib::Error> {
        let filter = gtk::FileFilter::new();
        filter.set_name(Some("PNG Images"));
        filter.add_suffix("png");

        let filters = gio::ListStore::new::<gtk::FileFilter>();
        filters.append(&filter);

        let dialog = gtk::FileDialog::builder()
            .title("Save Image")
            .modal(true)
            .initial_name(capture_file_name(kind, unix_millis_now()))
            .filters(&filters)
            .default_filter(&filter)
            .build();

        match dialog.save_future(Some(&self.window)).await {
            Ok(file) => Ok(Some(file)),
            Err(e)
                if e.matches(gtk::DialogError::Dismissed)
                    || e.matches(gtk::DialogError::Cancelled) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl HostBridge for GtkHost {
    async fn get_sources(&self) -> Vec<ScreenSource> {
        list_screen_sources()
    }

    async fn hide_window(&self) {
        let windows = match self.window.application() {
            Some(app) => app.windows(),
            None => vec![self.window.clone().upcast()],
        };
        for window in windows.into_iter().filter(|w| w.is_visible()) {
            window.set_visible(false);
            self.hidden.remember(window);
        }
        settle(self.config.host_settle).await;
    }

    async fn show_window(&self) {
        self.window.set_visible(true);
        self.window.present();

        // Dialogs of the main window come back with it; the overlay does not.
        let main = self.window.upcast_ref::<gtk::Window>();
        for dialog in self
            .hidden
            .restore(|w| w.transient_for().as_ref() == Some(main))
        {
            debug!("Restoring dialog {:?}", dialog.title());
            dialog.set_visible(true);
        }
    }

    async fn save_image(&self, image: &EncodedImage, kind: CaptureKind) -> SaveOutcome {
        let file = match self.choose_save_path(kind).await {
            Ok(Some(file)) => file,
            Ok(None) => {
                info!("Save canceled");
                return SaveOutcome::Canceled;
            }
            Err(e) => {
                error!("Save dialog failed: {}", e);
                return SaveOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let Some(path) = file.path() else {
            error!("Selected location is not a local path: {}", file.uri());
            return SaveOutcome::Failed {
                error: "Selected location is not a local path".to_string(),
            };
        };

        match std::fs::write(&path, image.as_bytes()) {
            Ok(()) => {
                info!("Image saved to: {}", path.display());
                SaveOutcome::Saved { path }
            }
            Err(e) => {
                error!("Failed to write {}: {}", path.display(), e);
                SaveOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn copy_to_clipboard(&self, image: &EncodedImage) -> ClipboardOutcome {
        let bytes = glib::Bytes::from(image.as_bytes());
        match gdk::Texture::from_bytes(&bytes) {
            Ok(texture) => {
                self.window.clipboard().set_texture(&texture);
                info!("Image copied to clipboard");
                ClipboardOutcome::Copied
            }
            Err(e) => {
                error!("Failed to decode image for clipboard: {}", e);
                ClipboardOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_accepted_windows_are_restored() {
        let hidden = HiddenWindows::new();
        hidden.remember("main");
        hidden.remember("shortcuts");
        hidden.remember("overlay");

        let restored = hidden.restore(|w| *w == "shortcuts");
        assert_eq!(restored, vec!["shortcuts"]);
        assert!(hidden.restore(|_| true).is_empty());
    }

    #[test]
    fn windows_hidden_twice_are_kept_once() {
        let hidden = HiddenWindows::new();
        hidden.remember("shortcuts");
        hidden.remember("overlay");
        hidden.remember("shortcuts");

        assert_eq!(hidden.restore(|_| true), vec!["shortcuts", "overlay"]);
    }
}
