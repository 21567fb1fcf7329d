//! Capture module
//!
//! Everything between "the user asked for a capture" and "here are the PNG
//! bytes": source selection, frame streams over xcap, the drag-selection
//! state machine, crop math and the workflows that tie them together.

pub mod bitmap;
pub mod error;
pub mod geometry;
pub mod selection;
pub mod session;
pub mod source;
pub mod stream;
pub mod workflow;

pub use bitmap::{CaptureKind, CapturedImage, EncodedImage};
pub use error::CaptureError;
pub use geometry::{Point, SelectionRect, Size};
pub use selection::SelectionTracker;
pub use session::AreaSession;
pub use source::{list_screen_sources, ScreenSource};
pub use stream::{MonitorStream, MonitorStreams};
pub use workflow::{CaptureOutcome, CaptureWorkflow};
