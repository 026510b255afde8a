// src/bbox.rs

use opencv::core::Rect;

/// Axis-aligned region of interest, top-left origin. Non-degenerate by
/// construction: width and height are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// `None` for empty rectangles, e.g. a cancelled ROI drag.
    pub fn from_rect(rect: Rect) -> Option<Self> {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Clip the box to a frame of the given size. `None` when no area
    /// remains inside the frame.
    pub fn clamped(self, frame_width: i32, frame_height: i32) -> Option<Self> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (self.x + self.width).min(frame_width);
        let y1 = (self.y + self.height).min(frame_height);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_boxes_rejected() {
        assert!(BoundingBox::new(10, 10, 0, 50).is_none());
        assert!(BoundingBox::new(10, 10, 50, 0).is_none());
        assert!(BoundingBox::new(10, 10, -5, 50).is_none());
        assert!(BoundingBox::new(10, 10, 1, 1).is_some());
    }

    #[test]
    fn test_from_rect_rejects_cancelled_selection() {
        // select_roi reports a zero rect when the drag is cancelled
        assert!(BoundingBox::from_rect(Rect::new(0, 0, 0, 0)).is_none());
    }

    #[test]
    fn test_clamp_inside_frame_is_identity() {
        let bbox = BoundingBox::new(10, 10, 50, 50).unwrap();
        assert_eq!(bbox.clamped(500, 375), Some(bbox));
    }

    #[test]
    fn test_clamp_clips_overhang() {
        let bbox = BoundingBox::new(-10, 360, 50, 50).unwrap();
        let clamped = bbox.clamped(500, 375).unwrap();
        assert_eq!(clamped, BoundingBox::new(0, 360, 40, 15).unwrap());
    }

    #[test]
    fn test_clamp_outside_frame_is_none() {
        let bbox = BoundingBox::new(600, 10, 50, 50).unwrap();
        assert!(bbox.clamped(500, 375).is_none());
    }

    #[test]
    fn test_rect_round_trip() {
        let bbox = BoundingBox::new(12, 11, 50, 50).unwrap();
        assert_eq!(BoundingBox::from_rect(bbox.to_rect()), Some(bbox));
    }
}
