// src/display.rs
//
// The operator-facing surface: one titled window plus the key poll
// and the blocking ROI drag. Owned explicitly so window state lives
// and dies with the session instead of hiding in process globals.

use anyhow::Result;
use opencv::core::{Mat, Rect};
use opencv::highgui;
use tracing::debug;

/// What the run loop needs from the operator side each cycle.
pub trait ControlSurface {
    fn present(&mut self, frame: &Mat) -> Result<()>;

    /// At most one key per cycle; negative when none was pressed.
    fn poll_key(&mut self) -> Result<i32>;

    /// Blocking rectangle-drag gesture against the given frame. An
    /// empty rect means the operator cancelled.
    fn select_region(&mut self, frame: &Mat) -> Result<Rect>;
}

pub struct DisplaySink {
    window: String,
    poll_timeout_ms: i32,
}

impl DisplaySink {
    pub fn open(title: &str, poll_timeout_ms: i32) -> Result<Self> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            window: title.to_string(),
            poll_timeout_ms,
        })
    }
}

impl ControlSurface for DisplaySink {
    fn present(&mut self, frame: &Mat) -> Result<()> {
        highgui::imshow(&self.window, frame)?;
        Ok(())
    }

    fn poll_key(&mut self) -> Result<i32> {
        Ok(highgui::wait_key(self.poll_timeout_ms)?)
    }

    fn select_region(&mut self, frame: &Mat) -> Result<Rect> {
        debug!("pausing acquisition for region selection");
        // confirm with ENTER/SPACE, cancel with c
        let roi = highgui::select_roi_for_window(&self.window, frame, true, false)?;
        Ok(roi)
    }
}

impl Drop for DisplaySink {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.window);
    }
}
