// src/session.rs
//
// The tracking session state machine and the frame/render loop that
// drives it. Two states: Idle (no region) and Tracking (an active
// tracker plus its throughput meter). All transitions happen
// synchronously inside one loop iteration.

use anyhow::Result;
use opencv::core::{Mat, Rect};
use opencv::prelude::*;
use tracing::{debug, info, warn};

use crate::bbox::BoundingBox;
use crate::config::AppConfig;
use crate::display::ControlSurface;
use crate::fps::FpsMeter;
use crate::input::{command_for_key, Command};
use crate::overlay::{self, TrackingStatus};
use crate::source::{normalize_width, FrameSource};
use crate::tracker::{RegionTracker, TrackUpdate, TrackerFactory};

/// The Tracking arm owns the tracker and its meter, so both are
/// created on entry and dropped together on exit or re-selection.
enum TrackingState {
    Idle,
    Tracking {
        tracker: Box<dyn RegionTracker>,
        meter: FpsMeter,
        last: Option<TrackUpdate>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    EndOfStream,
    Quit,
}

#[derive(Debug)]
pub struct SessionSummary {
    pub frames: u64,
    pub outcome: Outcome,
}

pub struct TrackingSession {
    factory: Box<dyn TrackerFactory>,
    config: AppConfig,
    state: TrackingState,
    frames: u64,
}

impl TrackingSession {
    pub fn new(factory: Box<dyn TrackerFactory>, config: AppConfig) -> Self {
        Self {
            factory,
            config,
            state: TrackingState::Idle,
            frames: 0,
        }
    }

    /// Runs the loop to completion. The frame source is released on
    /// every exit path, including a fatal tracker-init error.
    pub fn run<S: FrameSource>(
        &mut self,
        source: &mut S,
        surface: &mut dyn ControlSurface,
    ) -> Result<SessionSummary> {
        let outcome = self.drive(source, surface);
        if let Err(err) = source.close() {
            warn!("failed to release frame source: {err:#}");
        }
        outcome
    }

    fn drive<S: FrameSource>(
        &mut self,
        source: &mut S,
        surface: &mut dyn ControlSurface,
    ) -> Result<SessionSummary> {
        loop {
            let Some(raw) = source.next_frame()? else {
                info!("end of stream after {} frames", self.frames);
                return Ok(self.summary(Outcome::EndOfStream));
            };
            let mut frame = normalize_width(raw, self.config.display.target_width)?;
            self.frames += 1;

            self.update(&frame)?;
            self.render(&mut frame)?;
            surface.present(&frame)?;

            match command_for_key(surface.poll_key()?) {
                Command::Select => {
                    let roi = surface.select_region(&frame)?;
                    self.select_region(&frame, roi)?;
                }
                Command::Quit => {
                    info!("quit requested after {} frames", self.frames);
                    return Ok(self.summary(Outcome::Quit));
                }
                Command::Noop => {}
            }
        }
    }

    /// Advances the tracker on one frame. No-op while Idle. The meter
    /// ticks regardless of success; a lost target is surfaced on the
    /// overlay, not acted upon; the operator re-selects or quits.
    fn update(&mut self, frame: &Mat) -> Result<()> {
        if let TrackingState::Tracking {
            tracker,
            meter,
            last,
        } = &mut self.state
        {
            let update = tracker.update(frame)?;
            meter.tick();
            if !update.success {
                debug!("tracking lost on frame {}", self.frames);
            }
            *last = Some(update);
        }
        Ok(())
    }

    /// SelectRegion transition: valid from both states; while already
    /// Tracking it replaces the tracker/meter pair and the throughput
    /// count restarts from zero. Returns false for a degenerate
    /// selection, which leaves the state untouched.
    fn select_region(&mut self, frame: &Mat, roi: Rect) -> Result<bool> {
        let bbox = BoundingBox::from_rect(roi)
            .and_then(|bbox| bbox.clamped(frame.cols(), frame.rows()));
        let Some(bbox) = bbox else {
            warn!(
                "ignoring degenerate region selection {}x{}",
                roi.width, roi.height
            );
            return Ok(false);
        };
        let mut tracker = self.factory.build()?;
        tracker.init(frame, bbox)?;
        info!(
            "🎯 tracking {}x{} region at ({}, {}) with {}",
            bbox.width(),
            bbox.height(),
            bbox.x(),
            bbox.y(),
            self.factory.label()
        );
        self.state = TrackingState::Tracking {
            tracker,
            meter: FpsMeter::start(),
            last: None,
        };
        Ok(true)
    }

    fn render(&self, frame: &mut Mat) -> Result<()> {
        match &self.state {
            TrackingState::Idle => overlay::render(frame, None, None, &self.config.overlay),
            TrackingState::Tracking { meter, last, .. } => {
                let (success, bbox) = match last {
                    Some(update) if update.success => (true, update.bbox),
                    _ => (false, None),
                };
                let status = TrackingStatus {
                    tracker: self.factory.label(),
                    success,
                    fps: meter.rate(),
                };
                overlay::render(frame, bbox, Some(&status), &self.config.overlay)
            }
        }
    }

    fn summary(&self, outcome: Outcome) -> SessionSummary {
        if let TrackingState::Tracking { meter, .. } = &self.state {
            debug!(
                "tracker ticked {} frames at {:.2} fps",
                meter.count(),
                meter.rate()
            );
        }
        SessionSummary {
            frames: self.frames,
            outcome,
        }
    }

    #[cfg(test)]
    fn is_tracking(&self) -> bool {
        matches!(self.state, TrackingState::Tracking { .. })
    }

    #[cfg(test)]
    fn tick_count(&self) -> Option<u64> {
        match &self.state {
            TrackingState::Idle => None,
            TrackingState::Tracking { meter, .. } => Some(meter.count()),
        }
    }
}
