//! Capture error taxonomy
//!
//! Every failure in the capture flows is recovered where it happens and
//! turned into a transient notification; none of them end the process.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CaptureError {
    #[error("No screen sources available")]
    NoSourceAvailable,

    #[error("Screen capture permission denied: {0}")]
    PermissionDenied(String),

    #[error("Screen capture stream failed: {0}")]
    Stream(String),

    #[error("Selection {width}x{height} is smaller than {min}x{min}")]
    SelectionTooSmall { width: f64, height: f64, min: f64 },

    #[error("Selection does not overlap the captured frame")]
    SelectionOutsideFrame,

    #[error("Failed to save image: {0}")]
    Persistence(String),

    #[error("Failed to copy image: {0}")]
    Clipboard(String),

    #[error("PNG encoding failed: {0}")]
    Encoding(String),

    #[error("A capture is already in progress")]
    Busy,
}

impl CaptureError {
    /// Classify a platform capture error by its message.
    pub fn from_platform(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("permission") || lower.contains("denied") || lower.contains("not allowed")
        {
            CaptureError::PermissionDenied(message)
        } else {
            CaptureError::Stream(message)
        }
    }

    /// Text shown in the toast for this error.
    pub fn user_message(&self) -> String {
        match self {
            CaptureError::NoSourceAvailable => {
                "No screen sources available. Please grant screen recording permission.".to_string()
            }
            CaptureError::PermissionDenied(_) => {
                "Screen recording permission denied. Please allow screen access.".to_string()
            }
            CaptureError::Stream(_) => "Failed to access screen. Try again.".to_string(),
            CaptureError::SelectionTooSmall { .. } => "Selection too small. Try again.".to_string(),
            CaptureError::SelectionOutsideFrame => {
                "Selection is outside the screen. Start a new area capture.".to_string()
            }
            CaptureError::Persistence(e) => format!("Failed to save image: {}", e),
            CaptureError::Clipboard(e) => format!("Failed to copy image: {}", e),
            CaptureError::Encoding(_) => "Failed to capture screen".to_string(),
            CaptureError::Busy => "A capture is already in progress".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_errors_mentioning_permission_are_classified() {
        let err = CaptureError::from_platform("Screen recording permission not granted");
        assert!(matches!(err, CaptureError::PermissionDenied(_)));

        let err = CaptureError::from_platform("Access Denied by compositor");
        assert!(matches!(err, CaptureError::PermissionDenied(_)));

        let err = CaptureError::from_platform("XGetImage failed");
        assert!(matches!(err, CaptureError::Stream(_)));
    }

    #[test]
    fn permission_and_stream_failures_have_distinct_messages() {
        let denied = CaptureError::PermissionDenied("x".into()).user_message();
        let stream = CaptureError::Stream("x".into()).user_message();
        assert_ne!(denied, stream);
        assert!(denied.contains("permission denied"));
    }

    #[test]
    fn small_selection_message_matches_toast() {
        let small = CaptureError::SelectionTooSmall {
            width: 4.0,
            height: 20.0,
            min: 10.0,
        };
        assert_eq!(small.user_message(), "Selection too small. Try again.");
        assert_eq!(small.to_string(), "Selection 4x20 is smaller than 10x10");
        assert_ne!(
            CaptureError::SelectionOutsideFrame.user_message(),
            small.user_message()
        );
    }
}
