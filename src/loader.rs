//! The public factory: the one place embedders create animations.
//!
//! ```
//! use halo::{AnimationConfig, Loader, Mount};
//!
//! let mount = Mount::default();
//! let mut loader =
//!     Loader::spiral_galaxy(&mount, AnimationConfig::default())?;
//! assert!(loader.is_running());
//! loader.destroy();
//! # Ok::<(), halo::HaloError>(())
//! ```

use std::fmt;

use web_time::Instant;

use crate::config::{AnimationConfig, ConfigPatch};
use crate::error::HaloError;
use crate::motion::{MotionKind, MotionParams};
use crate::mount::MountSel;
use crate::player::Player;

// ── Options & builder ────────────────────────────────────────────────

/// Everything needed to construct one animation.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Where the surface attaches: a registered name or a direct handle.
    pub mount: MountSel,
    /// Base configuration.
    pub config: AnimationConfig,
    /// Animation kind plus its fixed parameters.
    pub motion: MotionParams,
    /// Enter the running state immediately after construction.
    pub auto_start: bool,
}

/// Fluent builder for [`Loader`].
pub struct LoaderBuilder {
    mount: Option<MountSel>,
    config: AnimationConfig,
    motion: MotionParams,
    auto_start: bool,
}

impl LoaderBuilder {
    fn new() -> Self {
        Self {
            mount: None,
            config: AnimationConfig::default(),
            motion: MotionParams::default(),
            auto_start: true,
        }
    }

    /// Select the mount by registered name or direct handle.
    #[must_use]
    pub fn with_mount(mut self, mount: impl Into<MountSel>) -> Self {
        self.mount = Some(mount.into());
        self
    }

    /// Override the default base configuration.
    #[must_use]
    pub fn with_config(mut self, config: AnimationConfig) -> Self {
        self.config = config;
        self
    }

    /// Pick the animation kind and its parameters.
    #[must_use]
    pub fn with_motion(mut self, motion: MotionParams) -> Self {
        self.motion = motion;
        self
    }

    /// Whether construction also starts the animation (default true).
    #[must_use]
    pub const fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Consume the builder and construct the animation.
    ///
    /// # Errors
    /// `InvalidConfig` when no mount was selected, otherwise everything
    /// [`Loader::new`] can return.
    pub fn build(self) -> Result<Loader, HaloError> {
        let mount = self.mount.ok_or_else(|| {
            HaloError::InvalidConfig("no mount selected".to_owned())
        })?;
        Loader::new(LoaderOptions {
            mount,
            config: self.config,
            motion: self.motion,
            auto_start: self.auto_start,
        })
    }
}

// ── Loader ───────────────────────────────────────────────────────────

/// Handle to one animation instance.
///
/// All lifecycle and configuration calls forward to the player behind
/// it; after [`destroy`](Self::destroy) the handle stays valid but
/// inert.
pub struct Loader {
    player: Option<Player>,
    kind: MotionKind,
}

impl Loader {
    /// Construct from fully spelled-out options.
    ///
    /// # Errors
    /// `MountNotFound` when a named mount is not registered,
    /// `InvalidConfig` from config validation, `Surface` when the
    /// surface cannot be allocated.
    pub fn new(options: LoaderOptions) -> Result<Self, HaloError> {
        let LoaderOptions {
            mount,
            config,
            motion,
            auto_start,
        } = options;
        let mount = mount.resolve()?;
        let kind = motion.kind();
        let mut player = Player::new(mount, config, kind, motion.build())?;
        if auto_start {
            player.start();
        }
        log::info!("created {kind} loader");
        Ok(Self {
            player: Some(player),
            kind,
        })
    }

    /// Start a new builder.
    #[must_use]
    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::new()
    }

    /// Construct from a kebab-case animation tag with that kind's
    /// default parameters.
    ///
    /// # Errors
    /// `UnknownMotion` for a tag outside the supported set, otherwise
    /// everything [`Loader::new`] can return.
    pub fn from_kind(
        mount: impl Into<MountSel>,
        tag: &str,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        let kind: MotionKind = tag.parse()?;
        Self::of_kind(mount, kind, config)
    }

    fn of_kind(
        mount: impl Into<MountSel>,
        kind: MotionKind,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::new(LoaderOptions {
            mount: mount.into(),
            config,
            motion: kind.default_params(),
            auto_start: true,
        })
    }

    // ── Per-kind constructors ────────────────────────────────────────

    /// `radial-pulse` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn radial_pulse(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::RadialPulse, config)
    }

    /// `orbital-pulse` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn orbital_pulse(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::OrbitalPulse, config)
    }

    /// `pendulum-wave` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn pendulum_wave(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::PendulumWave, config)
    }

    /// `pulse-wave` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn pulse_wave(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::PulseWave, config)
    }

    /// `concentric-rings` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn concentric_rings(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::ConcentricRings, config)
    }

    /// `sequential-pulse` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn sequential_pulse(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::SequentialPulse, config)
    }

    /// `oscillating-dots` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn oscillating_dots(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::OscillatingDots, config)
    }

    /// `pulsing-grid` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn pulsing_grid(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::PulsingGrid, config)
    }

    /// `spiral-galaxy` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn spiral_galaxy(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::SpiralGalaxy, config)
    }

    /// `wave-ripple` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn wave_ripple(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::WaveRipple, config)
    }

    /// `orbital-dance` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn orbital_dance(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::OrbitalDance, config)
    }

    /// `spiral-vortex` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn spiral_vortex(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::SpiralVortex, config)
    }

    /// `quantum-field` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn quantum_field(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::QuantumField, config)
    }

    /// `neural-network` with default parameters.
    ///
    /// # Errors
    /// See [`Loader::new`].
    pub fn neural_network(
        mount: impl Into<MountSel>,
        config: AnimationConfig,
    ) -> Result<Self, HaloError> {
        Self::of_kind(mount, MotionKind::NeuralNetwork, config)
    }

    // ── Delegation ───────────────────────────────────────────────────

    /// Start (or restart from zero) the animation. No-op once
    /// destroyed.
    pub fn start(&mut self) {
        if let Some(player) = &mut self.player {
            player.start();
        }
    }

    /// Pause the animation, keeping the last frame on the surface.
    pub fn stop(&mut self) {
        if let Some(player) = &mut self.player {
            player.stop();
        }
    }

    /// Advance by one host tick. Returns whether a frame was drawn;
    /// always false once destroyed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.player.as_mut().is_some_and(|player| player.tick(now))
    }

    /// Shallow-merge a patch into the live config. No-op once
    /// destroyed.
    ///
    /// # Errors
    /// `InvalidConfig` when the merged config fails validation.
    pub fn update_config(
        &mut self,
        patch: &ConfigPatch,
    ) -> Result<(), HaloError> {
        match &mut self.player {
            Some(player) => player.update_config(patch),
            None => Ok(()),
        }
    }

    /// Release the surface and drop the player. Safe to call
    /// repeatedly; the handle stays usable but inert.
    pub fn destroy(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.destroy();
        }
    }

    /// Whether ticks currently produce frames.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.player.as_ref().is_some_and(Player::is_running)
    }

    /// Dilated elapsed seconds; zero once destroyed.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.player.as_ref().map_or(0.0, Player::elapsed)
    }

    /// Surface dimensions in pixels; `(0, 0)` once destroyed.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.player.as_ref().map_or((0, 0), Player::size)
    }

    /// The animation kind, reportable for the life of the handle.
    #[must_use]
    pub const fn kind(&self) -> MotionKind {
        self.kind
    }

    /// Smoothed frames-per-second estimate; zero once destroyed.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.player.as_ref().map_or(0.0, Player::fps)
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("kind", &self.kind)
            .field("player", &self.player.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mount::{self, Mount};
    use web_time::Duration;

    const STEP: Duration = Duration::from_millis(100);

    #[test]
    fn every_tag_constructs_and_reports_its_kind() {
        let mount = Mount::default();
        let mut loaders = Vec::new();
        for kind in MotionKind::ALL {
            let loader = Loader::from_kind(
                &mount,
                kind.id(),
                AnimationConfig::default(),
            )
            .unwrap();
            assert_eq!(loader.kind(), kind);
            assert!(loader.is_running());
            assert_eq!(loader.size(), (180, 180));
            loaders.push(loader);
        }
        // Surfaces stack on the shared mount in attach order.
        assert_eq!(mount.surface_count(), MotionKind::ALL.len());

        for loader in &mut loaders {
            loader.destroy();
        }
        assert!(mount.is_empty());
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let mount = Mount::default();
        let err =
            Loader::from_kind(&mount, "laser-show", AnimationConfig::default())
                .unwrap_err();
        assert!(
            matches!(err, HaloError::UnknownMotion(ref tag) if tag == "laser-show")
        );
        assert!(mount.is_empty());
    }

    #[test]
    fn named_mounts_resolve_through_the_registry() {
        let mount = Mount::default();
        mount::register("loader-facade", &mount);
        let loader =
            Loader::radial_pulse("loader-facade", AnimationConfig::default())
                .unwrap();
        assert_eq!(mount.surface_count(), 1);
        drop(loader);
        assert!(mount::unregister("loader-facade"));

        let err = Loader::radial_pulse(
            "loader-nowhere",
            AnimationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, HaloError::MountNotFound(_)));
    }

    #[test]
    fn the_builder_needs_a_mount() {
        let err = Loader::builder().build().unwrap_err();
        assert!(matches!(err, HaloError::InvalidConfig(_)));
    }

    #[test]
    fn auto_start_is_honored_both_ways() {
        let mount = Mount::default();
        let mut loader = Loader::builder()
            .with_mount(&mount)
            .with_auto_start(false)
            .build()
            .unwrap();
        assert!(!loader.is_running());
        loader.start();
        assert!(loader.is_running());

        let running = Loader::builder().with_mount(&mount).build().unwrap();
        assert!(running.is_running());
    }

    #[test]
    fn the_builder_carries_custom_parameters() {
        use crate::motion::SpiralGalaxyParams;

        let mount = Mount::default();
        let mut loader = Loader::builder()
            .with_mount(&mount)
            .with_motion(MotionParams::SpiralGalaxy(SpiralGalaxyParams {
                particle_count: 40,
                ..SpiralGalaxyParams::default()
            }))
            .build()
            .unwrap();
        assert_eq!(loader.kind(), MotionKind::SpiralGalaxy);

        let base = Instant::now();
        assert!(!loader.tick(base));
        assert!(loader.tick(base + STEP));
    }

    #[test]
    fn destroyed_handles_go_inert() {
        let mount = Mount::default();
        let mut loader =
            Loader::concentric_rings(&mount, AnimationConfig::default())
                .unwrap();
        let base = Instant::now();
        assert!(!loader.tick(base));
        assert!(loader.tick(base + STEP));

        loader.destroy();
        loader.destroy();
        assert!(mount.is_empty());
        assert!(!loader.is_running());
        assert!(!loader.tick(base + STEP * 2));
        assert_eq!(loader.elapsed(), 0.0);
        assert_eq!(loader.size(), (0, 0));
        assert_eq!(loader.kind(), MotionKind::ConcentricRings);

        loader.start();
        assert!(!loader.is_running());
        let patch = ConfigPatch {
            speed: Some(2.0),
            ..ConfigPatch::default()
        };
        assert!(loader.update_config(&patch).is_ok());
    }

    #[test]
    fn two_loaders_share_one_mount() {
        let mount = Mount::default();
        let mut first =
            Loader::concentric_rings(&mount, AnimationConfig::default())
                .unwrap();
        let mut second =
            Loader::pulsing_grid(&mount, AnimationConfig::default()).unwrap();
        assert_eq!(mount.surface_count(), 2);

        let base = Instant::now();
        assert!(!first.tick(base));
        assert!(!second.tick(base));
        assert!(first.tick(base + STEP));
        assert!(second.tick(base + STEP));

        first.destroy();
        assert_eq!(mount.surface_count(), 1);
        // The survivor keeps drawing.
        assert!(second.tick(base + STEP * 2));
        second.destroy();
        assert!(mount.is_empty());
    }

    #[test]
    fn rapid_start_stop_cycles_stay_consistent() {
        let mount = Mount::default();
        let mut loader =
            Loader::radial_pulse(&mount, AnimationConfig::default()).unwrap();
        for _ in 0..10 {
            loader.stop();
            loader.start();
        }
        assert!(loader.is_running());

        let base = Instant::now();
        assert!(!loader.tick(base));
        assert!(loader.tick(base + STEP));
        assert!((loader.elapsed() - 0.1).abs() < 1e-6);
        loader.destroy();
    }
}
