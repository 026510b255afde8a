// src/source.rs

use anyhow::{bail, Context, Result};
use opencv::core::{Mat, Size};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use opencv::imgproc;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// One decoded frame per call. `Ok(None)` means the stream is
/// exhausted; a live camera never reports that while open, a failed
/// grab there is an error instead.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Mat>>;

    /// Releases the underlying capture. Idempotent.
    fn close(&mut self) -> Result<()>;
}

pub struct CaptureHandle {
    cap: VideoCapture,
    released: bool,
}

/// Acquisition resource for one session: a live camera or a decoded
/// video file behind the same contract.
pub enum VideoSource {
    LiveCamera(CaptureHandle),
    FileStream(CaptureHandle),
}

impl VideoSource {
    pub fn open_camera(warmup: Duration) -> Result<Self> {
        info!("Starting webcam stream");
        let cap = VideoCapture::new(0, videoio::CAP_ANY).context("failed to open camera 0")?;
        if !cap.is_opened()? {
            bail!("camera 0 is not available");
        }
        // let exposure settle before the first frame
        thread::sleep(warmup);
        Ok(Self::LiveCamera(CaptureHandle {
            cap,
            released: false,
        }))
    }

    pub fn open_file(path: &Path) -> Result<Self> {
        info!("Using input video {}", path.display());
        let path_str = path
            .to_str()
            .with_context(|| format!("non-UTF-8 video path {}", path.display()))?;
        let cap = VideoCapture::from_file(path_str, videoio::CAP_ANY)
            .with_context(|| format!("failed to open video {}", path.display()))?;
        if !cap.is_opened()? {
            bail!("failed to open video {}", path.display());
        }
        Ok(Self::FileStream(CaptureHandle {
            cap,
            released: false,
        }))
    }

    fn handle(&mut self) -> &mut CaptureHandle {
        match self {
            Self::LiveCamera(handle) | Self::FileStream(handle) => handle,
        }
    }
}

impl FrameSource for VideoSource {
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        let live = matches!(self, Self::LiveCamera(_));
        let handle = self.handle();
        if handle.released {
            return Ok(None);
        }
        let mut mat = Mat::default();
        let grabbed = handle.cap.read(&mut mat)?;
        if !grabbed || mat.empty() {
            if live {
                bail!("camera stream interrupted");
            }
            return Ok(None);
        }
        Ok(Some(mat))
    }

    fn close(&mut self) -> Result<()> {
        let handle = self.handle();
        if !handle.released {
            handle.cap.release()?;
            handle.released = true;
            debug!("frame source released");
        }
        Ok(())
    }
}

impl Drop for VideoSource {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Height that keeps the aspect ratio when scaling to `target_width`.
pub fn scaled_height(height: i32, width: i32, target_width: i32) -> i32 {
    (height as f64 * target_width as f64 / width as f64).round() as i32
}

/// Scale the frame to a fixed working width so per-frame processing
/// cost is independent of the source resolution.
pub fn normalize_width(frame: Mat, target_width: i32) -> Result<Mat> {
    let size = frame.size()?;
    if size.width == target_width || size.width == 0 {
        return Ok(frame);
    }
    let new_size = Size::new(target_width, scaled_height(size.height, size.width, target_width));
    let mut resized = Mat::default();
    imgproc::resize(&frame, &mut resized, new_size, 0.0, 0.0, imgproc::INTER_AREA)?;
    Ok(resized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    #[test]
    fn test_scaled_height_preserves_aspect_ratio() {
        assert_eq!(scaled_height(480, 640, 500), 375);
        assert_eq!(scaled_height(1080, 1920, 500), 281); // round(281.25)
        assert_eq!(scaled_height(333, 500, 500), 333);
    }

    #[test]
    fn test_scaled_height_rounds_half_up() {
        // 100 * 500 / 400 = 125; 101 * 500 / 400 = 126.25
        assert_eq!(scaled_height(100, 400, 500), 125);
        assert_eq!(scaled_height(101, 400, 500), 126);
    }

    #[test]
    fn test_normalize_width_resizes_to_target() {
        let frame =
            Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0)).unwrap();
        let normalized = normalize_width(frame, 500).unwrap();
        let size = normalized.size().unwrap();
        assert_eq!(size.width, 500);
        assert_eq!(size.height, 375);
    }

    #[test]
    fn test_normalize_width_is_identity_at_target() {
        let frame =
            Mat::new_rows_cols_with_default(375, 500, CV_8UC3, Scalar::all(0.0)).unwrap();
        let normalized = normalize_width(frame, 500).unwrap();
        let size = normalized.size().unwrap();
        assert_eq!(size.width, 500);
        assert_eq!(size.height, 375);
    }
}
