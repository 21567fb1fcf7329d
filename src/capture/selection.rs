//! Drag-selection state machine
//!
//! Tracks a pointer drag on the overlay surface. Kept free of any toolkit
//! types so the overlay only has to forward pointer positions.

use log::debug;

use super::error::CaptureError;
use super::geometry::{Point, SelectionRect};

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging(SelectionRect),
    Finalizing(SelectionRect),
}

#[derive(Clone, Debug)]
pub struct SelectionTracker {
    state: SelectionState,
    min_size: f64,
}

impl SelectionTracker {
    pub fn new(min_size: f64) -> Self {
        Self {
            state: SelectionState::Idle,
            min_size,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// The rectangle to draw, if a drag is in progress.
    pub fn current(&self) -> Option<SelectionRect> {
        match self.state {
            SelectionState::Dragging(sel) => Some(sel),
            _ => None,
        }
    }

    pub fn pointer_down(&mut self, at: Point) {
        if matches!(self.state, SelectionState::Finalizing(_)) {
            return;
        }
        debug!("Selection started at ({}, {})", at.x, at.y);
        self.state = SelectionState::Dragging(SelectionRect::new(at));
    }

    /// Returns the updated rectangle when the overlay needs a redraw.
    pub fn pointer_move(&mut self, at: Point) -> Option<SelectionRect> {
        if let SelectionState::Dragging(ref mut sel) = self.state {
            sel.update_end(at);
            return Some(*sel);
        }
        None
    }

    /// Where the pointer is after moving `(dx, dy)` from the press point.
    fn offset_from_start(&self, dx: f64, dy: f64) -> Option<Point> {
        match self.state {
            SelectionState::Dragging(sel) => Some(Point::new(sel.start.x + dx, sel.start.y + dy)),
            _ => None,
        }
    }

    pub fn pointer_move_by(&mut self, dx: f64, dy: f64) -> Option<SelectionRect> {
        let at = self.offset_from_start(dx, dy)?;
        self.pointer_move(at)
    }

    /// Release relative to the press point, as drag gestures report it.
    pub fn pointer_up_by(&mut self, dx: f64, dy: f64) -> Option<Result<SelectionRect, CaptureError>> {
        let at = self.offset_from_start(dx, dy)?;
        self.pointer_up(at)
    }

    /// Finish the drag. A selection below the minimum size returns the tracker
    /// to `Idle` so the user can drag again.
    pub fn pointer_up(&mut self, at: Point) -> Option<Result<SelectionRect, CaptureError>> {
        let SelectionState::Dragging(mut sel) = self.state else {
            return None;
        };
        sel.update_end(at);

        if !sel.meets_minimum(self.min_size) {
            let rect = sel.rectangle();
            debug!(
                "Selection {}x{} rejected (minimum {})",
                rect.width, rect.height, self.min_size
            );
            self.state = SelectionState::Idle;
            return Some(Err(CaptureError::SelectionTooSmall {
                width: rect.width,
                height: rect.height,
                min: self.min_size,
            }));
        }

        self.state = SelectionState::Finalizing(sel);
        Some(Ok(sel))
    }

    pub fn reset(&mut self) {
        self.state = SelectionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_produces_rectangle_on_release() {
        let mut tracker = SelectionTracker::new(10.0);
        tracker.pointer_down(Point::new(10.0, 10.0));
        assert!(tracker.pointer_move(Point::new(50.0, 40.0)).is_some());
        assert_eq!(
            tracker.current().map(|s| s.rectangle().width),
            Some(40.0)
        );

        let sel = tracker.pointer_up(Point::new(110.0, 60.0)).unwrap().unwrap();
        assert_eq!(sel.start, Point::new(10.0, 10.0));
        assert_eq!(sel.end, Point::new(110.0, 60.0));
        assert!(matches!(tracker.state(), SelectionState::Finalizing(_)));
    }

    #[test]
    fn small_selection_is_rejected_and_tracker_stays_usable() {
        let mut tracker = SelectionTracker::new(10.0);
        tracker.pointer_down(Point::new(100.0, 100.0));
        let result = tracker.pointer_up(Point::new(105.0, 150.0)).unwrap();
        assert!(matches!(
            result,
            Err(CaptureError::SelectionTooSmall { width, .. }) if width == 5.0
        ));
        assert_eq!(tracker.state(), SelectionState::Idle);

        tracker.pointer_down(Point::new(0.0, 0.0));
        assert!(tracker.pointer_up(Point::new(30.0, 30.0)).unwrap().is_ok());
    }

    #[test]
    fn exact_threshold_is_accepted() {
        let mut tracker = SelectionTracker::new(10.0);
        tracker.pointer_down(Point::new(50.0, 50.0));
        assert!(tracker.pointer_up(Point::new(40.0, 40.0)).unwrap().is_ok());
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut tracker = SelectionTracker::new(10.0);
        assert!(tracker.pointer_move(Point::new(5.0, 5.0)).is_none());
        assert!(tracker.pointer_up(Point::new(5.0, 5.0)).is_none());
        assert!(tracker.current().is_none());
    }

    #[test]
    fn offsets_are_relative_to_the_press_point() {
        let mut tracker = SelectionTracker::new(10.0);
        assert!(tracker.pointer_up_by(40.0, 40.0).is_none());

        tracker.pointer_down(Point::new(200.0, 150.0));
        let moved = tracker.pointer_move_by(-20.0, 10.0).unwrap();
        assert_eq!(moved.end, Point::new(180.0, 160.0));

        let sel = tracker.pointer_up_by(-120.0, -50.0).unwrap().unwrap();
        assert_eq!(sel.start, Point::new(200.0, 150.0));
        assert_eq!(sel.end, Point::new(80.0, 100.0));
        assert!(matches!(tracker.state(), SelectionState::Finalizing(_)));
    }

    #[test]
    fn finalized_selection_ignores_new_presses_until_reset() {
        let mut tracker = SelectionTracker::new(10.0);
        tracker.pointer_down(Point::new(0.0, 0.0));
        tracker.pointer_up(Point::new(100.0, 100.0));

        tracker.pointer_down(Point::new(5.0, 5.0));
        assert!(matches!(tracker.state(), SelectionState::Finalizing(_)));

        tracker.reset();
        tracker.pointer_down(Point::new(5.0, 5.0));
        assert!(tracker.current().is_some());
    }
}
