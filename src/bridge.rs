//! Host bridge
//!
//! The fixed set of privileged operations the UI may ask the host for, and
//! the events the host pushes to the UI. Every operation answers with a
//! value; failures are reported in the outcome, never raised.

#![allow(async_fn_in_trait)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::capture::{CaptureKind, EncodedImage, ScreenSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { path: PathBuf },
    /// The user dismissed the dialog. Not an error.
    Canceled,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardOutcome {
    Copied,
    Failed { error: String },
}

/// Pushed from the host (tray menu, global shortcuts) to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    TriggerFullscreenCapture,
    TriggerAreaCapture,
}

pub trait HostBridge {
    async fn get_sources(&self) -> Vec<ScreenSource>;

    /// Hide the host window. Returns once the hide has had time to take effect.
    async fn hide_window(&self);

    async fn show_window(&self);

    async fn save_image(&self, image: &EncodedImage, kind: CaptureKind) -> SaveOutcome;

    async fn copy_to_clipboard(&self, image: &EncodedImage) -> ClipboardOutcome;
}

/// `capture_<kind>_<unixMillis>.png`
pub fn capture_file_name(kind: CaptureKind, unix_millis: u128) -> String {
    format!("capture_{}_{}.png", kind.label(), unix_millis)
}

pub fn unix_millis_now() -> u128 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(dur) => dur.as_millis(),
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_embeds_kind_and_timestamp() {
        assert_eq!(
            capture_file_name(CaptureKind::Fullscreen, 1700000000123),
            "capture_fullscreen_1700000000123.png"
        );
        assert_eq!(
            capture_file_name(CaptureKind::Area, 42),
            "capture_area_selection_42.png"
        );
    }

    #[test]
    fn cancel_is_neither_success_nor_failure() {
        let canceled = SaveOutcome::Canceled;
        assert_ne!(
            canceled,
            SaveOutcome::Saved {
                path: PathBuf::from("/tmp/a.png")
            }
        );
        assert_ne!(
            canceled,
            SaveOutcome::Failed {
                error: String::new()
            }
        );
    }

    #[test]
    fn clock_is_after_epoch() {
        assert!(unix_millis_now() > 0);
    }
}
