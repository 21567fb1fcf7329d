//! Frame streams
//!
//! A stream is opened against a screen source and hands out frames at the
//! source's native resolution until it is stopped.

use image::RgbaImage;
use log::{debug, info};
use xcap::Monitor;

use super::error::CaptureError;
use super::source::ScreenSource;

pub trait FrameStream {
    /// Grab the current frame.
    fn next_frame(&mut self) -> Result<RgbaImage, CaptureError>;

    /// Release the capture resources. Must be safe to call more than once.
    fn stop(&mut self);
}

pub trait StreamProvider {
    type Stream: FrameStream;

    fn open(&self, source: &ScreenSource) -> Result<Self::Stream, CaptureError>;
}

/// Opens streams on xcap monitors.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonitorStreams;

impl StreamProvider for MonitorStreams {
    type Stream = MonitorStream;

    fn open(&self, source: &ScreenSource) -> Result<MonitorStream, CaptureError> {
        let monitors = Monitor::all().map_err(|e| CaptureError::from_platform(e.to_string()))?;

        let monitor = monitors
            .into_iter()
            .find(|m| {
                m.id()
                    .map(|id| id.to_string() == source.id)
                    .unwrap_or(false)
            })
            .ok_or_else(|| {
                CaptureError::Stream(format!("Monitor '{}' is no longer available", source.name))
            })?;

        info!(
            "Using screen source: {} ({}x{})",
            source.name, source.size.width, source.size.height
        );
        Ok(MonitorStream {
            monitor: Some(monitor),
            name: source.name.clone(),
        })
    }
}

pub struct MonitorStream {
    monitor: Option<Monitor>,
    name: String,
}

impl FrameStream for MonitorStream {
    fn next_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        let monitor = self
            .monitor
            .as_ref()
            .ok_or_else(|| CaptureError::Stream("Capture stream already stopped".to_string()))?;

        let frame = monitor
            .capture_image()
            .map_err(|e| CaptureError::from_platform(e.to_string()))?;

        debug!(
            "Captured {}x{} frame from {}",
            frame.width(),
            frame.height(),
            self.name
        );
        Ok(frame)
    }

    fn stop(&mut self) {
        if self.monitor.take().is_some() {
            debug!("Stopped capture stream on {}", self.name);
        }
    }
}

impl Drop for MonitorStream {
    fn drop(&mut self) {
        self.stop();
    }
}
