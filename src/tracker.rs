// src/tracker.rs
//
// The tracking capability behind a fixed init/update contract. The
// session never sees which algorithm runs, only that a region comes
// back with a success flag each frame.

use anyhow::{Context, Result};
use opencv::core::{Mat, Ptr, Rect};
use opencv::prelude::*;
use opencv::tracking::{TrackerCSRT, TrackerCSRT_Params, TrackerKCF, TrackerKCF_Params};
use opencv::video::{TrackerMIL, TrackerMIL_Params};

use crate::bbox::BoundingBox;

/// Result of one per-frame re-localization. A lost target is
/// `success: false`, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackUpdate {
    pub success: bool,
    pub bbox: Option<BoundingBox>,
}

pub trait RegionTracker {
    /// Binds the tracker to a region on the given frame. Failure here is
    /// fatal: a tracker that cannot initialize leaves nothing to recover.
    fn init(&mut self, frame: &Mat, bbox: BoundingBox) -> Result<()>;

    fn update(&mut self, frame: &Mat) -> Result<TrackUpdate>;
}

/// Builds tracker instances for a session. One factory per session,
/// invoked on every region selection.
pub trait TrackerFactory {
    fn label(&self) -> &str;
    fn build(&self) -> Result<Box<dyn RegionTracker>>;
}

/// Closed set of supported algorithms. CSRT is the accuracy/speed
/// balance the tool defaults to; KCF trades accuracy for speed; MIL is
/// the robust baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TrackerKind {
    Csrt,
    Kcf,
    Mil,
}

impl TrackerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TrackerKind::Csrt => "csrt",
            TrackerKind::Kcf => "kcf",
            TrackerKind::Mil => "mil",
        }
    }
}

impl TrackerFactory for TrackerKind {
    fn label(&self) -> &str {
        TrackerKind::label(self)
    }

    fn build(&self) -> Result<Box<dyn RegionTracker>> {
        let backend = match self {
            TrackerKind::Csrt => Backend::Csrt(
                TrackerCSRT::create(&TrackerCSRT_Params::default()?)
                    .context("failed to create CSRT tracker")?,
            ),
            TrackerKind::Kcf => Backend::Kcf(
                TrackerKCF::create(TrackerKCF_Params::default()?)
                    .context("failed to create KCF tracker")?,
            ),
            TrackerKind::Mil => Backend::Mil(
                TrackerMIL::create(TrackerMIL_Params::default()?)
                    .context("failed to create MIL tracker")?,
            ),
        };
        Ok(Box::new(OpenCvTracker { backend }))
    }
}

enum Backend {
    Csrt(Ptr<TrackerCSRT>),
    Kcf(Ptr<TrackerKCF>),
    Mil(Ptr<TrackerMIL>),
}

/// Adapter from the OpenCV tracker API to the session contract.
struct OpenCvTracker {
    backend: Backend,
}

impl RegionTracker for OpenCvTracker {
    fn init(&mut self, frame: &Mat, bbox: BoundingBox) -> Result<()> {
        let rect = bbox.to_rect();
        match &mut self.backend {
            Backend::Csrt(t) => t.init(frame, rect),
            Backend::Kcf(t) => t.init(frame, rect),
            Backend::Mil(t) => t.init(frame, rect),
        }
        .context("tracker failed to initialize on the selected region")
    }

    fn update(&mut self, frame: &Mat) -> Result<TrackUpdate> {
        let mut rect = Rect::default();
        let success = match &mut self.backend {
            Backend::Csrt(t) => t.update(frame, &mut rect)?,
            Backend::Kcf(t) => t.update(frame, &mut rect)?,
            Backend::Mil(t) => t.update(frame, &mut rect)?,
        };
        Ok(TrackUpdate {
            success,
            bbox: if success {
                BoundingBox::from_rect(rect)
            } else {
                None
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_kind_labels() {
        assert_eq!(TrackerKind::Csrt.label(), "csrt");
        assert_eq!(TrackerKind::Kcf.label(), "kcf");
        assert_eq!(TrackerKind::Mil.label(), "mil");
    }

    #[test]
    fn test_kind_parses_from_cli_value() {
        assert_eq!(TrackerKind::from_str("csrt", true), Ok(TrackerKind::Csrt));
        assert_eq!(TrackerKind::from_str("kcf", true), Ok(TrackerKind::Kcf));
        assert!(TrackerKind::from_str("mosse", true).is_err());
    }
}
