//! Frame pacing against host-supplied timestamps.

use web_time::{Duration, Instant};

/// Throttles host ticks to a target frame rate and tracks smoothed FPS.
///
/// The host drives it with [`FramePacer::accept`]; ticks arriving before
/// the minimum frame interval has passed are rejected without touching
/// the baseline, so the skipped time folds into the next accepted delta.
#[derive(Debug, Clone)]
pub struct FramePacer {
    /// Target FPS (0 = unlimited).
    target_fps: u32,
    /// Minimum frame interval derived from the target.
    min_frame_duration: Duration,
    /// Timestamp of the last accepted frame; `None` until the first tick
    /// establishes the baseline.
    last_frame: Option<Instant>,
    /// Smoothed FPS using an exponential moving average.
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0).
    smoothing: f32,
}

impl FramePacer {
    /// Pacer for the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_fps,
            min_frame_duration: Self::frame_duration(target_fps),
            last_frame: None,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    fn frame_duration(target_fps: u32) -> Duration {
        if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        }
    }

    /// Current FPS target.
    #[must_use]
    pub const fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Retarget the pacer. The baseline is kept, so the new interval
    /// applies from the next tick.
    pub fn set_target_fps(&mut self, target_fps: u32) {
        if self.target_fps == target_fps {
            return;
        }
        log::debug!("pacing retargeted to {target_fps} fps");
        self.target_fps = target_fps;
        self.min_frame_duration = Self::frame_duration(target_fps);
    }

    /// Offer a tick timestamp. Returns the elapsed seconds since the last
    /// accepted frame when the tick should render, `None` when it falls
    /// inside the minimum frame interval. The first tick after
    /// construction or [`FramePacer::reset`] only establishes the
    /// baseline.
    pub fn accept(&mut self, now: Instant) -> Option<f32> {
        let Some(last) = self.last_frame else {
            self.last_frame = Some(now);
            return None;
        };

        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.min_frame_duration {
            return None;
        }
        self.last_frame = Some(now);

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        Some(frame_time)
    }

    /// Drop the baseline; the next tick re-establishes it.
    pub fn reset(&mut self) {
        self.last_frame = None;
    }

    /// Smoothed frames-per-second estimate.
    #[must_use]
    pub const fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
