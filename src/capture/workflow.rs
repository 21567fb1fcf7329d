//! Capture workflows
//!
//! Sequences the full-screen and area captures against the host bridge:
//! hide the host window, open a stream, grab and encode frames, and always
//! bring the window back, whichever way the capture ends.

use gtk4::glib;
use log::{debug, info, warn};
use std::time::Duration;

use super::bitmap::{crop_frame, CaptureKind, CapturedImage};
use super::error::CaptureError;
use super::geometry::{map_to_video, SelectionRect, Size};
use super::session::{AreaSession, CaptureSession, FlightGuard, SingleFlight};
use super::source::select_source;
use super::stream::StreamProvider;
use crate::app::config::CaptureConfig;
use crate::bridge::{ClipboardOutcome, HostBridge};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CaptureStep {
    HidingHost,
    StreamOpening,
    FrameCaptured,
    Restoring,
    Done,
    Error,
}

#[derive(Debug)]
pub struct CaptureOutcome {
    pub image: CapturedImage,
    /// Whether the automatic clipboard copy went through.
    pub copied: bool,
}

impl CaptureOutcome {
    pub fn success_message(&self) -> &'static str {
        match (self.image.kind, self.copied) {
            (CaptureKind::Fullscreen, true) => "Full screen captured & copied to clipboard!",
            (CaptureKind::Fullscreen, false) => "Full screen captured!",
            (CaptureKind::Area, true) => "Selected area captured & copied to clipboard!",
            (CaptureKind::Area, false) => "Selected area captured!",
        }
    }
}

pub struct CaptureWorkflow<H, P> {
    host: H,
    streams: P,
    config: CaptureConfig,
    flight: SingleFlight,
}

impl<H: HostBridge, P: StreamProvider> CaptureWorkflow<H, P> {
    pub fn new(host: H, streams: P, config: CaptureConfig) -> Self {
        Self {
            host,
            streams,
            config,
            flight: SingleFlight::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_busy(&self) -> bool {
        self.flight.is_busy()
    }

    pub async fn capture_fullscreen(&self) -> Result<CaptureOutcome, CaptureError> {
        let flight = self.flight.try_acquire()?;

        enter(CaptureKind::Fullscreen, CaptureStep::HidingHost);
        self.host.hide_window().await;
        settle(self.config.capture_settle).await;

        let result = self.grab_fullscreen(flight).await;

        enter(CaptureKind::Fullscreen, CaptureStep::Restoring);
        self.host.show_window().await;
        finish(CaptureKind::Fullscreen, &result);
        result
    }

    async fn grab_fullscreen(&self, flight: FlightGuard) -> Result<CaptureOutcome, CaptureError> {
        let mut session = self.open_session(CaptureKind::Fullscreen, flight).await?;
        let frame = session.grab_frame()?;
        enter(CaptureKind::Fullscreen, CaptureStep::FrameCaptured);

        let image = CapturedImage::new(CaptureKind::Fullscreen, frame)?;
        let copied = self.auto_copy(&image).await;
        session.stop();

        Ok(CaptureOutcome { image, copied })
    }

    /// Open a stream for an area capture and grab the preview frame. The host
    /// window is visible again when this returns, whatever the result.
    pub async fn begin_area_selection(&self) -> Result<AreaSession<P::Stream>, CaptureError> {
        let flight = self.flight.try_acquire()?;

        enter(CaptureKind::Area, CaptureStep::HidingHost);
        self.host.hide_window().await;
        settle(self.config.capture_settle).await;

        let result = match self.open_session(CaptureKind::Area, flight).await {
            Ok(mut session) => session
                .grab_frame()
                .map(|preview| AreaSession::new(session, preview)),
            Err(e) => Err(e),
        };

        self.host.show_window().await;
        if let Err(ref e) = result {
            warn!("Failed to start area selection: {}", e);
        }
        result
    }

    /// Capture a fresh frame and crop it to `selection`, given in
    /// coordinates of an overlay surface of size `overlay`.
    pub async fn finish_area_selection(
        &self,
        mut area: AreaSession<P::Stream>,
        selection: SelectionRect,
        overlay: Size,
    ) -> Result<CaptureOutcome, CaptureError> {
        enter(CaptureKind::Area, CaptureStep::HidingHost);
        self.host.hide_window().await;
        settle(self.config.reselect_settle).await;

        let result = self.crop_selection(&mut area, selection, overlay).await;
        area.session.stop();
        drop(area);

        enter(CaptureKind::Area, CaptureStep::Restoring);
        self.host.show_window().await;
        finish(CaptureKind::Area, &result);
        result
    }

    async fn crop_selection(
        &self,
        area: &mut AreaSession<P::Stream>,
        selection: SelectionRect,
        overlay: Size,
    ) -> Result<CaptureOutcome, CaptureError> {
        let frame = area.session.grab_frame()?;
        enter(CaptureKind::Area, CaptureStep::FrameCaptured);

        let video = Size::new(frame.width(), frame.height());
        let region =
            map_to_video(&selection, video, overlay).ok_or(CaptureError::SelectionOutsideFrame)?;
        debug!(
            "Cropping {}x{} at ({}, {}) from {}x{} frame (overlay {}x{})",
            region.width,
            region.height,
            region.x,
            region.y,
            video.width,
            video.height,
            overlay.width,
            overlay.height
        );

        let cropped = crop_frame(&frame, region)?;
        let image = CapturedImage::new(CaptureKind::Area, cropped)?;
        let copied = self.auto_copy(&image).await;

        Ok(CaptureOutcome { image, copied })
    }

    pub async fn cancel_area_selection(&self, area: AreaSession<P::Stream>) {
        drop(area);
        self.host.show_window().await;
        info!("Area selection cancelled");
    }

    async fn open_session(
        &self,
        kind: CaptureKind,
        flight: FlightGuard,
    ) -> Result<CaptureSession<P::Stream>, CaptureError> {
        enter(kind, CaptureStep::StreamOpening);
        let sources = self.host.get_sources().await;
        let source = select_source(&sources)?;
        let stream = self.streams.open(source)?;
        Ok(CaptureSession::new(kind, stream, flight))
    }

    async fn auto_copy(&self, image: &CapturedImage) -> bool {
        match self.host.copy_to_clipboard(&image.encoded).await {
            ClipboardOutcome::Copied => true,
            ClipboardOutcome::Failed { error } => {
                warn!("Auto-copy to clipboard failed: {}", error);
                false
            }
        }
    }
}

fn enter(kind: CaptureKind, step: CaptureStep) {
    debug!("{:?} capture: {:?}", kind, step);
}

fn finish(kind: CaptureKind, result: &Result<CaptureOutcome, CaptureError>) {
    match result {
        Ok(outcome) => {
            enter(kind, CaptureStep::Done);
            info!(
                "{:?} capture finished: {}x{}, {} bytes",
                kind,
                outcome.image.pixels.width(),
                outcome.image.pixels.height(),
                outcome.image.encoded.as_bytes().len()
            );
        }
        Err(e) => {
            enter(kind, CaptureStep::Error);
            warn!("{:?} capture failed: {}", kind, e);
        }
    }
}

/// Wait for the compositor to catch up with a window show/hide.
pub async fn settle(delay: Duration) {
    if !delay.is_zero() {
        glib::timeout_future(delay).await;
    }
}
