// src/overlay.rs
//
// Status rendering on the working frame. The frame is owned by the
// current cycle, so drawing happens in place.

use anyhow::Result;
use opencv::core::{Mat, Point};
use opencv::imgproc;
use opencv::prelude::*;

use crate::bbox::BoundingBox;
use crate::config::OverlayConfig;

/// Colors for overlay rendering (BGR for OpenCV).
pub mod colors {
    use opencv::core::Scalar;

    pub const TRACKED_GREEN: Scalar = Scalar::new(0.0, 255.0, 0.0, 0.0);
    pub const STATUS_RED: Scalar = Scalar::new(0.0, 0.0, 255.0, 0.0);
    pub const HINT_GREY: Scalar = Scalar::new(200.0, 200.0, 200.0, 0.0);
}

/// Status block shown while a tracker is active.
#[derive(Debug, Clone)]
pub struct TrackingStatus<'a> {
    pub tracker: &'a str,
    pub success: bool,
    pub fps: f64,
}

/// Draws the tracked box (when the last update succeeded) and the
/// status block, bottom-left, one line per `line_spacing` pixels.
/// While idle only a key hint is shown.
pub fn render(
    frame: &mut Mat,
    bbox: Option<BoundingBox>,
    status: Option<&TrackingStatus>,
    config: &OverlayConfig,
) -> Result<()> {
    let height = frame.rows();

    if let Some(bbox) = bbox {
        imgproc::rectangle(
            frame,
            bbox.to_rect(),
            colors::TRACKED_GREEN,
            config.box_thickness,
            imgproc::LINE_8,
            0,
        )?;
    }

    match status {
        Some(status) => {
            let lines = [
                format!("Tracker: {}", status.tracker),
                format!("Success: {}", if status.success { "Yes" } else { "No" }),
                format!("FPS: {:.2}", status.fps),
            ];
            for (i, text) in lines.iter().enumerate() {
                let y = height - (i as i32 * config.line_spacing + config.line_spacing);
                put_line(frame, text, y, colors::STATUS_RED, config)?;
            }
        }
        None => {
            put_line(frame, "s: select region  c: quit", height - 10, colors::HINT_GREY, config)?;
        }
    }

    Ok(())
}

fn put_line(
    frame: &mut Mat,
    text: &str,
    y: i32,
    color: opencv::core::Scalar,
    config: &OverlayConfig,
) -> Result<()> {
    imgproc::put_text(
        frame,
        text,
        Point::new(10, y),
        imgproc::FONT_HERSHEY_SIMPLEX,
        config.font_scale,
        color,
        2,
        imgproc::LINE_8,
        false,
    )?;
    Ok(())
}
