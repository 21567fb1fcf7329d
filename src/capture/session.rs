//! Capture sessions
//!
//! A session owns the open stream of one capture. The stream is stopped
//! exactly once: when the session finishes, is cancelled, or is dropped on
//! an error path.

use image::RgbaImage;
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

use super::bitmap::CaptureKind;
use super::error::CaptureError;
use super::stream::FrameStream;

/// Allows one capture at a time.
#[derive(Debug, Default, Clone)]
pub struct SingleFlight {
    busy: Rc<Cell<bool>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Result<FlightGuard, CaptureError> {
        if self.busy.replace(true) {
            return Err(CaptureError::Busy);
        }
        Ok(FlightGuard {
            busy: self.busy.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Released on drop.
#[derive(Debug)]
pub struct FlightGuard {
    busy: Rc<Cell<bool>>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

pub struct CaptureSession<S: FrameStream> {
    kind: CaptureKind,
    stream: S,
    stopped: bool,
    _flight: FlightGuard,
}

impl<S: FrameStream> CaptureSession<S> {
    pub fn new(kind: CaptureKind, stream: S, flight: FlightGuard) -> Self {
        Self {
            kind,
            stream,
            stopped: false,
            _flight: flight,
        }
    }

    pub fn grab_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        if self.stopped {
            return Err(CaptureError::Stream("Capture stream already stopped".to_string()));
        }
        self.stream.next_frame()
    }

    /// Stop the stream's tracks.
    pub fn stop(&mut self) {
        if !self.stopped {
            debug!("Stopping {:?} capture stream", self.kind);
            self.stopped = true;
            self.stream.stop();
        }
    }
}

impl<S: FrameStream> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// An area capture waiting for the user's selection.
pub struct AreaSession<S: FrameStream> {
    pub(super) session: CaptureSession<S>,
    preview: RgbaImage,
}

impl<S: FrameStream> AreaSession<S> {
    pub(super) fn new(session: CaptureSession<S>, preview: RgbaImage) -> Self {
        Self { session, preview }
    }

    /// Frame grabbed while the host window was hidden, shown behind the selection.
    pub fn preview(&self) -> &RgbaImage {
        &self.preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingStream {
        stops: Rc<Cell<u32>>,
    }

    impl FrameStream for CountingStream {
        fn next_frame(&mut self) -> Result<RgbaImage, CaptureError> {
            Ok(RgbaImage::new(2, 2))
        }

        fn stop(&mut self) {
            self.stops.set(self.stops.get() + 1);
        }
    }

    #[test]
    fn single_flight_rejects_second_capture() {
        let flight = SingleFlight::new();
        let guard = flight.try_acquire().unwrap();
        assert!(flight.is_busy());
        assert_eq!(flight.try_acquire().unwrap_err(), CaptureError::Busy);
        drop(guard);
        assert!(!flight.is_busy());
        assert!(flight.try_acquire().is_ok());
    }

    #[test]
    fn session_stops_stream_once() {
        let stops = Rc::new(Cell::new(0));
        let flight = SingleFlight::new();
        let mut session = CaptureSession::new(
            CaptureKind::Fullscreen,
            CountingStream {
                stops: stops.clone(),
            },
            flight.try_acquire().unwrap(),
        );
        assert!(session.grab_frame().is_ok());
        session.stop();
        assert!(session.grab_frame().is_err());
        drop(session);
        assert_eq!(stops.get(), 1);
        assert!(!flight.is_busy());
    }

    #[test]
    fn dropped_session_releases_stream() {
        let stops = Rc::new(Cell::new(0));
        let flight = SingleFlight::new();
        {
            let _session = CaptureSession::new(
                CaptureKind::Area,
                CountingStream {
                    stops: stops.clone(),
                },
                flight.try_acquire().unwrap(),
            );
        }
        assert_eq!(stops.get(), 1);
    }
}
