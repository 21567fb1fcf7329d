//! Screen sources
//!
//! Enumerates capturable displays through xcap and picks the one a capture
//! should use.

use log::{debug, error, warn};
use xcap::Monitor;

use super::error::CaptureError;
use super::geometry::Size;

/// A display that can be captured.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSource {
    pub id: String,
    pub name: String,
    pub is_primary: bool,
    pub size: Size,
}

impl ScreenSource {
    fn from_xcap(monitor: &Monitor) -> Result<Self, String> {
        Ok(Self {
            id: monitor.id().map_err(|e| e.to_string())?.to_string(),
            name: monitor.name().map_err(|e| e.to_string())?,
            is_primary: monitor.is_primary().unwrap_or(false),
            size: Size::new(
                monitor.width().map_err(|e| e.to_string())?,
                monitor.height().map_err(|e| e.to_string())?,
            ),
        })
    }

    fn looks_like_entire_screen(&self) -> bool {
        self.is_primary
            || self.name.contains("Entire")
            || self.name == "Screen 1"
            || self.name.to_lowercase().contains("primary")
    }
}

/// List every monitor. Failures are logged and produce an empty list.
pub fn list_screen_sources() -> Vec<ScreenSource> {
    let monitors = match Monitor::all() {
        Ok(monitors) => monitors,
        Err(e) => {
            error!("Failed to get monitors: {}", e);
            return Vec::new();
        }
    };

    let sources: Vec<ScreenSource> = monitors
        .iter()
        .filter_map(|monitor| match ScreenSource::from_xcap(monitor) {
            Ok(source) => Some(source),
            Err(e) => {
                warn!("Skipping monitor with unreadable properties: {}", e);
                None
            }
        })
        .collect();

    debug!(
        "Available screen sources: {:?}",
        sources
            .iter()
            .map(|s| (s.id.as_str(), s.name.as_str()))
            .collect::<Vec<_>>()
    );
    sources
}

/// Prefer the entire/primary screen, fall back to the first source.
pub fn select_source(sources: &[ScreenSource]) -> Result<&ScreenSource, CaptureError> {
    sources
        .iter()
        .find(|s| s.looks_like_entire_screen())
        .or(sources.first())
        .ok_or(CaptureError::NoSourceAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: &str, name: &str, is_primary: bool) -> ScreenSource {
        ScreenSource {
            id: id.to_string(),
            name: name.to_string(),
            is_primary,
            size: Size::new(1920, 1080),
        }
    }

    #[test]
    fn empty_list_has_no_source() {
        assert_eq!(select_source(&[]), Err(CaptureError::NoSourceAvailable));
    }

    #[test]
    fn entire_screen_is_preferred() {
        let sources = [
            source("1", "HDMI-1", false),
            source("2", "Entire Screen", false),
        ];
        assert_eq!(select_source(&sources).unwrap().id, "2");
    }

    #[test]
    fn primary_flag_and_names_are_recognised() {
        let sources = [source("1", "DP-2", false), source("2", "eDP-1", true)];
        assert_eq!(select_source(&sources).unwrap().id, "2");

        let sources = [source("1", "DP-2", false), source("2", "Screen 1", false)];
        assert_eq!(select_source(&sources).unwrap().id, "2");

        let sources = [source("1", "DP-2", false), source("2", "Primary Display", false)];
        assert_eq!(select_source(&sources).unwrap().id, "2");
    }

    #[test]
    fn falls_back_to_first_source() {
        let sources = [source("7", "DP-2", false), source("8", "HDMI-1", false)];
        assert_eq!(select_source(&sources).unwrap().id, "7");
    }

    #[test]
    fn test_list_screen_sources() {
        // No display in CI: the list is simply empty then
        for source in list_screen_sources() {
            println!(
                "Source: {} ({}x{})",
                source.name, source.size.width, source.size.height
            );
            assert!(!source.id.is_empty());
        }
    }
}
