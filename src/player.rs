//! Per-instance runtime: one generator bound to one surface on one
//! mount. Hosts drive rendering by calling [`Player::tick`] with their
//! own clock; frame pacing targets come from the global governor.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use web_time::Instant;

use crate::canvas::Canvas;
use crate::color::Paint;
use crate::config::{AnimationConfig, ConfigPatch};
use crate::error::HaloError;
use crate::governor;
use crate::motion::{DrawContext, Motion, MotionKind};
use crate::mount::{Mount, SharedCanvas};
use crate::util::frame_pacing::FramePacer;

/// Lifecycle of one animation instance. `Detached` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayState {
    Stopped,
    Running,
    Detached,
}

/// One animation bound to one surface.
///
/// Created through the loader; owns its generator, live configuration
/// and pacing state. The surface stays attached to the mount until
/// [`destroy`](Self::destroy).
pub struct Player {
    surface: SharedCanvas,
    mount: Mount,
    generator: Box<dyn Motion>,
    kind: MotionKind,
    config: AnimationConfig,
    state: PlayState,
    /// Dilated elapsed seconds, advanced only by accepted ticks.
    time: f32,
    pacer: FramePacer,
}

fn lock(surface: &SharedCanvas) -> MutexGuard<'_, Canvas> {
    surface.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Player {
    /// Build an instance on an already-resolved mount: validate the
    /// config, allocate the surface, attach it and take the initial
    /// pacing target from the governor. Starts stopped at time zero.
    pub(crate) fn new(
        mount: Mount,
        config: AnimationConfig,
        kind: MotionKind,
        generator: Box<dyn Motion>,
    ) -> Result<Self, HaloError> {
        config.validate()?;
        let config = config.clamped();
        let surface: SharedCanvas =
            Arc::new(Mutex::new(Canvas::new(config.width, config.height)?));
        mount.attach(Arc::clone(&surface));
        let target = governor::global().budget_for(kind).max_fps;
        log::debug!(
            "created {kind} player: {}x{} at {target} fps",
            config.width,
            config.height
        );
        Ok(Self {
            surface,
            mount,
            generator,
            kind,
            config,
            state: PlayState::Stopped,
            time: 0.0,
            pacer: FramePacer::new(target),
        })
    }

    // ── Frame loop ───────────────────────────────────────────────────

    /// Advance by one host tick. Returns whether a frame was drawn.
    ///
    /// Ignored unless running. The first tick after a start only
    /// establishes the timestamp baseline; ticks arriving faster than
    /// the pacing interval are skipped and their time accumulates into
    /// the next accepted delta.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != PlayState::Running {
            return false;
        }
        let Some(delta) = self.pacer.accept(now) else {
            return false;
        };
        self.time += delta * self.config.speed;
        // Visibility and battery changes land on the next accepted frame.
        self.pacer
            .set_target_fps(governor::global().budget_for(self.kind).max_fps);

        let paint = Paint::new(self.config.color.rgba(), self.config.opacity);
        let mut canvas = lock(&self.surface);
        canvas.clear(self.config.background.rgba());
        let mut ctx = DrawContext {
            canvas: &mut *canvas,
            time: self.time,
            paint,
        };
        self.generator.draw(&mut ctx);
        true
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Enter the running state from a fresh time baseline. Idempotent
    /// while running; ignored once detached.
    pub fn start(&mut self) {
        match self.state {
            PlayState::Running => {}
            PlayState::Detached => {
                log::warn!("start ignored: {} player is detached", self.kind);
            }
            PlayState::Stopped => {
                self.time = 0.0;
                self.pacer.reset();
                self.state = PlayState::Running;
                log::debug!("{} player started", self.kind);
            }
        }
    }

    /// Leave the running state. The last-drawn frame stays on the
    /// surface. Idempotent.
    pub fn stop(&mut self) {
        if self.state == PlayState::Running {
            self.state = PlayState::Stopped;
            log::debug!(
                "{} player stopped at {:.2}s",
                self.kind,
                self.time
            );
        }
    }

    /// Stop and detach the surface from the mount. Terminal; safe to
    /// call repeatedly, the surface is only released once.
    pub fn destroy(&mut self) {
        if self.state == PlayState::Detached {
            return;
        }
        self.stop();
        if self.mount.detach(&self.surface) {
            log::debug!("{} player detached", self.kind);
        }
        self.state = PlayState::Detached;
    }

    /// Shallow-merge a patch into the live config. A width or height
    /// change reallocates (and clears) the surface immediately; a patch
    /// that fails validation leaves everything untouched.
    ///
    /// # Errors
    /// `InvalidConfig` from the merged config's boundary checks.
    pub fn update_config(
        &mut self,
        patch: &ConfigPatch,
    ) -> Result<(), HaloError> {
        if self.state == PlayState::Detached {
            log::warn!("update ignored: {} player is detached", self.kind);
            return Ok(());
        }
        if patch.is_empty() {
            return Ok(());
        }
        let merged = self.config.merged(patch);
        merged.validate()?;
        let merged = merged.clamped();
        if (merged.width, merged.height)
            != (self.config.width, self.config.height)
        {
            lock(&self.surface).resize(merged.width, merged.height)?;
            log::debug!(
                "{} surface resized to {}x{}",
                self.kind,
                merged.width,
                merged.height
            );
        }
        self.config = merged;
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Whether ticks currently produce frames.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, PlayState::Running)
    }

    /// Dilated elapsed seconds.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.time
    }

    /// Current surface dimensions in pixels.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// The animation kind this instance was built for.
    #[must_use]
    pub const fn kind(&self) -> MotionKind {
        self.kind
    }

    /// Smoothed frames-per-second estimate over accepted ticks.
    #[must_use]
    pub const fn fps(&self) -> f32 {
        self.pacer.fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    fn make(kind: MotionKind, config: AnimationConfig) -> (Mount, Player) {
        let mount = Mount::default();
        let player = Player::new(
            mount.clone(),
            config,
            kind,
            kind.default_params().build(),
        )
        .unwrap();
        (mount, player)
    }

    fn lit(mount: &Mount) -> usize {
        let mut count = 0;
        mount.with_frames(|canvas| count = canvas.lit_pixels());
        count
    }

    // 100 ms spacing clears every pacing interval the governor can
    // currently hand out, so these ticks are always accepted.
    const STEP: Duration = Duration::from_millis(100);

    #[test]
    fn ticks_are_ignored_until_started() {
        let (mount, mut player) =
            make(MotionKind::ConcentricRings, AnimationConfig::default());
        let base = Instant::now();
        assert!(!player.tick(base));
        assert!(!player.tick(base + STEP));
        assert_eq!(player.elapsed(), 0.0);
        assert_eq!(lit(&mount), 0);
    }

    #[test]
    fn the_first_tick_baselines_and_the_second_draws() {
        let (mount, mut player) =
            make(MotionKind::ConcentricRings, AnimationConfig::default());
        let base = Instant::now();
        player.start();
        assert!(player.is_running());

        assert!(!player.tick(base));
        assert_eq!(lit(&mount), 0);

        assert!(player.tick(base + STEP));
        assert!((player.elapsed() - 0.1).abs() < 1e-6);
        assert!(lit(&mount) > 0);
    }

    #[test]
    fn speed_dilates_elapsed_time() {
        let config = AnimationConfig {
            speed: 3.0,
            ..AnimationConfig::default()
        };
        let (_mount, mut player) = make(MotionKind::RadialPulse, config);
        let base = Instant::now();
        player.start();
        assert!(!player.tick(base));
        assert!(player.tick(base + STEP));
        assert!((player.elapsed() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn early_ticks_skip_but_their_time_is_not_lost() {
        let (_mount, mut player) =
            make(MotionKind::RadialPulse, AnimationConfig::default());
        let base = Instant::now();
        player.start();
        assert!(!player.tick(base));
        // 2 ms after the baseline: under every pacing interval.
        assert!(!player.tick(base + Duration::from_millis(2)));
        assert_eq!(player.elapsed(), 0.0);
        assert!(player.tick(base + STEP));
        assert!((player.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn stop_keeps_the_last_frame_and_ignores_stale_ticks() {
        let (mount, mut player) =
            make(MotionKind::ConcentricRings, AnimationConfig::default());
        let base = Instant::now();
        player.start();
        assert!(!player.tick(base));
        assert!(player.tick(base + STEP));
        let frozen = player.elapsed();

        player.stop();
        player.stop();
        assert!(!player.is_running());
        assert!(!player.tick(base + STEP * 2));
        assert_eq!(player.elapsed(), frozen);
        assert!(lit(&mount) > 0);
    }

    #[test]
    fn restarting_resets_the_clock_and_the_baseline() {
        let (_mount, mut player) =
            make(MotionKind::RadialPulse, AnimationConfig::default());
        let base = Instant::now();
        player.start();
        assert!(!player.tick(base));
        assert!(player.tick(base + STEP));
        assert!(player.elapsed() > 0.0);

        // Idempotent while running: no reset.
        player.start();
        assert!(player.elapsed() > 0.0);

        player.stop();
        player.start();
        assert_eq!(player.elapsed(), 0.0);
        // Fresh baseline: even a distant tick only re-anchors the clock.
        assert!(!player.tick(base + STEP * 50));
        assert!(player.tick(base + STEP * 51));
    }

    #[test]
    fn destroy_releases_the_surface_exactly_once() {
        let (mount, mut player) =
            make(MotionKind::ConcentricRings, AnimationConfig::default());
        assert_eq!(mount.surface_count(), 1);

        let base = Instant::now();
        player.start();
        assert!(!player.tick(base));
        player.destroy();
        assert_eq!(mount.surface_count(), 0);
        assert!(!player.is_running());

        // Terminal: repeat calls and revival attempts change nothing.
        player.destroy();
        player.start();
        assert!(!player.is_running());
        assert!(!player.tick(base + STEP));
        assert_eq!(mount.surface_count(), 0);
    }

    #[test]
    fn resizing_reallocates_and_clears_the_surface() {
        let (mount, mut player) =
            make(MotionKind::ConcentricRings, AnimationConfig::default());
        let base = Instant::now();
        player.start();
        assert!(!player.tick(base));
        assert!(player.tick(base + STEP));
        assert!(lit(&mount) > 0);

        let patch = ConfigPatch {
            width: Some(90),
            height: Some(120),
            ..ConfigPatch::default()
        };
        player.update_config(&patch).unwrap();
        assert_eq!(player.size(), (90, 120));
        let mut dims = (0, 0);
        mount.with_frames(|canvas| dims = (canvas.width(), canvas.height()));
        assert_eq!(dims, (90, 120));
        assert_eq!(lit(&mount), 0);

        // The next accepted frame draws at the new size.
        assert!(player.tick(base + STEP * 2));
        assert!(lit(&mount) > 0);
    }

    #[test]
    fn rejected_patches_change_nothing() {
        let (_mount, mut player) =
            make(MotionKind::RadialPulse, AnimationConfig::default());
        let patch = ConfigPatch {
            width: Some(0),
            speed: Some(5.0),
            ..ConfigPatch::default()
        };
        assert!(player.update_config(&patch).is_err());
        assert_eq!(player.size(), (180, 180));

        let base = Instant::now();
        player.start();
        assert!(!player.tick(base));
        assert!(player.tick(base + STEP));
        // The speed half of the rejected patch must not have leaked in.
        assert!((player.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn updates_after_destroy_are_ignored() {
        let (_mount, mut player) =
            make(MotionKind::RadialPulse, AnimationConfig::default());
        player.destroy();
        let patch = ConfigPatch {
            width: Some(64),
            ..ConfigPatch::default()
        };
        assert!(player.update_config(&patch).is_ok());
        assert_eq!(player.size(), (180, 180));
    }

    #[test]
    fn the_background_fills_cleared_pixels() {
        let config = AnimationConfig {
            background: "#000080".parse().unwrap(),
            ..AnimationConfig::default()
        };
        let (mount, mut player) = make(MotionKind::RadialPulse, config);
        let base = Instant::now();
        player.start();
        assert!(!player.tick(base));
        assert!(player.tick(base + STEP));
        let mut corner = crate::color::Rgba::new(0.0, 0.0, 0.0, 0.0);
        mount.with_frames(|canvas| corner = canvas.sample(0, 0));
        assert!(corner.b > 0.4);
        assert!(corner.a > 0.9);
    }
}
