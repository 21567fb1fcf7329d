//! Application state types
//!
//! This module contains the UI-side state of the screenshot application.

use crate::capture::{AreaSession, CapturedImage, MonitorStream, SelectionTracker};

/// Main application state
pub struct AppState {
    /// The last finished capture, shown in the preview
    pub current: Option<CapturedImage>,
    /// Open area capture while the selection overlay is up
    pub area: Option<AreaSession<MonitorStream>>,
    /// Drag tracking on the overlay surface
    pub selection: SelectionTracker,
}

impl AppState {
    pub fn new(min_selection: f64) -> Self {
        Self {
            current: None,
            area: None,
            selection: SelectionTracker::new(min_selection),
        }
    }

    pub fn set_capture(&mut self, image: CapturedImage) {
        self.current = Some(image);
    }

    /// Drop the current capture. Returns false if there was none.
    pub fn clear_capture(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Enter selection mode with an open area session
    pub fn start_selection(&mut self, area: AreaSession<MonitorStream>) {
        self.selection.reset();
        self.area = Some(area);
    }

    /// Leave selection mode, handing back the session if one was open
    pub fn exit_selection(&mut self) -> Option<AreaSession<MonitorStream>> {
        self.selection.reset();
        self.area.take()
    }

    pub fn is_selecting(&self) -> bool {
        self.area.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureKind, Point};
    use image::RgbaImage;

    #[test]
    fn clear_reports_whether_an_image_existed() {
        let mut state = AppState::new(10.0);
        assert!(!state.clear_capture());

        state.set_capture(CapturedImage::new(CaptureKind::Fullscreen, RgbaImage::new(4, 4)).unwrap());
        assert!(state.current.is_some());
        assert!(state.clear_capture());
        assert!(state.current.is_none());
    }

    #[test]
    fn exit_selection_resets_tracker() {
        let mut state = AppState::new(10.0);
        state.selection.pointer_down(Point::new(1.0, 1.0));
        assert!(state.exit_selection().is_none());
        assert!(state.selection.current().is_none());
        assert!(!state.is_selecting());
    }
}
