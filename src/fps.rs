// src/fps.rs
//
// Throughput estimator for the tracking-active part of the loop.
// A fresh meter is started on every region selection, so the rate
// always reflects the current tracker instance.

use std::time::Instant;

#[derive(Debug)]
pub struct FpsMeter {
    started_at: Instant,
    frames: u64,
}

impl FpsMeter {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
            frames: 0,
        }
    }

    pub fn tick(&mut self) {
        self.frames += 1;
    }

    pub fn count(&self) -> u64 {
        self.frames
    }

    /// Frames per second since `start()`. 0.0 until any measurable time
    /// has elapsed.
    pub fn rate(&self) -> f64 {
        let elapsed = self.started_at.elapsed().as_secs_f64();
        if elapsed > 0.01 {
            self.frames as f64 / elapsed
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fresh_meter_starts_at_zero() {
        let meter = FpsMeter::start();
        assert_eq!(meter.count(), 0);
        assert!(meter.rate() >= 0.0);
    }

    #[test]
    fn test_tick_is_monotonic() {
        let mut meter = FpsMeter::start();
        for expected in 1..=10 {
            meter.tick();
            assert_eq!(meter.count(), expected);
        }
    }

    #[test]
    fn test_rate_is_non_negative_after_elapsed_time() {
        let mut meter = FpsMeter::start();
        meter.tick();
        meter.tick();
        thread::sleep(Duration::from_millis(20));
        let rate = meter.rate();
        assert!(rate > 0.0);
        assert!(rate < 1000.0);
    }
}
