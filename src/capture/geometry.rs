//! Selection geometry
//!
//! Points and rectangles in overlay-surface coordinates, and the mapping of
//! a selection onto the native resolution of the captured frame.

/// A point in overlay-surface pixels.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of a surface or frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A normalized rectangle (non-negative width/height).
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A drag selection, defined by where the pointer went down and where it is now.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct SelectionRect {
    pub start: Point,
    pub end: Point,
}

impl SelectionRect {
    /// Create a new selection with the given start point
    pub fn new(start: Point) -> Self {
        Self { start, end: start }
    }

    pub fn update_end(&mut self, end: Point) {
        self.end = end;
    }

    /// Get the selection as a normalized rectangle
    pub fn rectangle(&self) -> Rect {
        Rect {
            x: self.start.x.min(self.end.x),
            y: self.start.y.min(self.end.y),
            width: (self.end.x - self.start.x).abs(),
            height: (self.end.y - self.start.y).abs(),
        }
    }

    /// Both sides must reach `min` (inclusive).
    pub fn meets_minimum(&self, min: f64) -> bool {
        let rect = self.rectangle();
        rect.width >= min && rect.height >= min
    }
}

/// Ratio between the captured frame and the overlay surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    pub fn between(video: Size, overlay: Size) -> Option<Self> {
        if video.is_empty() || overlay.is_empty() {
            return None;
        }
        Some(Self {
            x: video.width as f64 / overlay.width as f64,
            y: video.height as f64 / overlay.height as f64,
        })
    }
}

/// A region of the captured frame, in native pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Map an overlay-space selection into frame space.
///
/// Coordinates are rounded to the nearest pixel and the result is clamped to
/// the frame. Returns `None` when nothing of the selection lies on the frame.
pub fn map_to_video(selection: &SelectionRect, video: Size, overlay: Size) -> Option<CropRegion> {
    let scale = ScaleFactors::between(video, overlay)?;
    let rect = selection.rectangle();

    let (x, width) = clamp_span(rect.x, rect.width, scale.x, video.width);
    let (y, height) = clamp_span(rect.y, rect.height, scale.y, video.height);

    if width == 0 || height == 0 {
        return None;
    }

    Some(CropRegion {
        x,
        y,
        width,
        height,
    })
}

/// Scale both edges of a span and intersect it with `[0, limit]`.
fn clamp_span(origin: f64, extent: f64, scale: f64, limit: u32) -> (u32, u32) {
    let limit = limit as f64;
    let start = (origin * scale).round().clamp(0.0, limit);
    let end = ((origin + extent) * scale).round().clamp(0.0, limit);
    (start as u32, (end - start).max(0.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(from: (f64, f64), to: (f64, f64)) -> SelectionRect {
        let mut sel = SelectionRect::new(Point::new(from.0, from.1));
        sel.update_end(Point::new(to.0, to.1));
        sel
    }

    #[test]
    fn rectangle_is_normalized_for_backwards_drags() {
        let rect = drag((120.0, 80.0), (20.0, 30.0)).rectangle();
        assert_eq!(
            rect,
            Rect {
                x: 20.0,
                y: 30.0,
                width: 100.0,
                height: 50.0
            }
        );
    }

    #[test]
    fn minimum_is_inclusive() {
        assert!(drag((50.0, 50.0), (40.0, 40.0)).meets_minimum(10.0));
        assert!(!drag((50.0, 50.0), (40.5, 40.0)).meets_minimum(10.0));
        assert!(!drag((0.0, 0.0), (200.0, 9.0)).meets_minimum(10.0));
    }

    #[test]
    fn backwards_drag_on_double_density_frame() {
        let region = map_to_video(
            &drag((50.0, 50.0), (40.0, 40.0)),
            Size::new(2000, 1600),
            Size::new(1000, 800),
        );
        assert_eq!(
            region,
            Some(CropRegion {
                x: 80,
                y: 80,
                width: 20,
                height: 20
            })
        );
    }

    #[test]
    fn cropped_size_matches_rounded_scaled_extent() {
        let video = Size::new(1920, 1080);
        let overlay = Size::new(1366, 768);
        let scale = ScaleFactors::between(video, overlay).unwrap();

        for (from, to) in [
            ((10.0, 10.0), (300.0, 200.0)),
            ((700.5, 400.25), (33.0, 12.0)),
            ((0.0, 0.0), (1366.0, 768.0)),
        ] {
            let sel = drag(from, to);
            let region = map_to_video(&sel, video, overlay).unwrap();
            let expected_w = (to.0 - from.0).abs() * scale.x;
            let expected_h = (to.1 - from.1).abs() * scale.y;
            assert!((region.width as f64 - expected_w.round()).abs() <= 1.0);
            assert!((region.height as f64 - expected_h.round()).abs() <= 1.0);
        }
    }

    #[test]
    fn mapping_the_same_points_twice_is_identical() {
        let sel = drag((512.0, 300.0), (100.0, 90.0));
        let video = Size::new(2560, 1440);
        let overlay = Size::new(1707, 960);
        assert_eq!(
            map_to_video(&sel, video, overlay),
            map_to_video(&sel, video, overlay)
        );
    }

    #[test]
    fn region_is_clamped_to_frame() {
        let region = map_to_video(
            &drag((900.0, 700.0), (1100.0, 900.0)),
            Size::new(1000, 800),
            Size::new(1000, 800),
        )
        .unwrap();
        assert_eq!(region.x, 900);
        assert_eq!(region.width, 100);
        assert_eq!(region.height, 100);

        assert_eq!(
            map_to_video(
                &drag((1200.0, 0.0), (1300.0, 50.0)),
                Size::new(1000, 800),
                Size::new(1000, 800)
            ),
            None
        );
    }

    #[test]
    fn drag_starting_off_surface_is_intersected() {
        let frame = Size::new(1000, 800);
        assert_eq!(
            map_to_video(&drag((-50.0, 10.0), (50.0, 110.0)), frame, frame),
            Some(CropRegion {
                x: 0,
                y: 10,
                width: 50,
                height: 100
            })
        );

        let region = map_to_video(&drag((300.0, 200.0), (200.0, -40.0)), frame, frame).unwrap();
        assert_eq!((region.y, region.height), (0, 200));
    }

    #[test]
    fn empty_surfaces_have_no_scale() {
        assert!(ScaleFactors::between(Size::new(0, 10), Size::new(10, 10)).is_none());
        assert!(ScaleFactors::between(Size::new(10, 10), Size::new(10, 0)).is_none());
    }
}
