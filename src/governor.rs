//! Process-wide adaptive performance governor.
//!
//! One logical governor per process derives a [`FrameBudget`] from device
//! signals, battery level, and host visibility. Players consult it for
//! their pacing target; particle-heavy generators can ask for a clamped
//! particle budget.

use std::sync::{Mutex, OnceLock, PoisonError};

use serde::Serialize;

use crate::motion::MotionKind;

/// Raw device capabilities the budget is derived from.
///
/// [`DeviceSignals::detect`] fills in what the platform exposes and falls
/// back to conservative values elsewhere; embedders with better knowledge
/// (a windowing toolkit, a mobile shell) pass their own via
/// [`Governor::set_signals`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviceSignals {
    /// Host is a phone or tablet class device.
    pub mobile: bool,
    /// Logical CPU cores available to the process.
    pub logical_cores: u32,
    /// Approximate system memory in gigabytes.
    pub memory_gb: f32,
    /// The OS-level reduced-motion accessibility preference.
    pub reduced_motion: bool,
}

impl DeviceSignals {
    /// Probe the platform. Memory and reduced-motion have no portable
    /// detection and start at conservative defaults.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            mobile: cfg!(any(target_os = "android", target_os = "ios")),
            logical_cores: std::thread::available_parallelism()
                .map_or(2, |cores| cores.get() as u32),
            memory_gb: 4.0,
            reduced_motion: false,
        }
    }

    /// Whether the device qualifies as low-end.
    #[must_use]
    pub fn is_low_end(&self) -> bool {
        self.logical_cores <= 2 || self.memory_gb <= 2.0 || self.reduced_motion
    }
}

/// Rendering quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// Lowest fidelity.
    Low,
    /// Middle ground for capable mobile devices.
    Medium,
    /// Full fidelity.
    High,
}

/// The governor's recommendation for running animations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameBudget {
    /// Target frame rate ceiling.
    pub max_fps: u32,
    /// Recommended particle budget for particle-system generators.
    pub particle_count: u32,
    /// Rendering quality tier.
    pub quality: QualityTier,
    /// Hosts should prefer static or slowed rendering.
    pub reduced_motion: bool,
    /// The device is conserving power.
    pub battery_saving: bool,
}

impl Default for FrameBudget {
    fn default() -> Self {
        Self {
            max_fps: 60,
            particle_count: 100,
            quality: QualityTier::High,
            reduced_motion: false,
            battery_saving: false,
        }
    }
}

impl FrameBudget {
    fn merged(self, overrides: &BudgetOverride) -> Self {
        Self {
            max_fps: overrides.max_fps.unwrap_or(self.max_fps),
            particle_count: overrides
                .particle_count
                .unwrap_or(self.particle_count),
            quality: overrides.quality.unwrap_or(self.quality),
            reduced_motion: overrides
                .reduced_motion
                .unwrap_or(self.reduced_motion),
            battery_saving: overrides
                .battery_saving
                .unwrap_or(self.battery_saving),
        }
    }
}

/// Partial budget override merged over the derived budget. Embedder
/// escape hatch; fields left `None` keep the derived value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BudgetOverride {
    /// Replacement frame rate ceiling.
    pub max_fps: Option<u32>,
    /// Replacement particle budget.
    pub particle_count: Option<u32>,
    /// Replacement quality tier.
    pub quality: Option<QualityTier>,
    /// Replacement reduced-motion flag.
    pub reduced_motion: Option<bool>,
    /// Replacement battery-saving flag.
    pub battery_saving: Option<bool>,
}

impl BudgetOverride {
    fn fold(&mut self, other: &Self) {
        self.max_fps = other.max_fps.or(self.max_fps);
        self.particle_count = other.particle_count.or(self.particle_count);
        self.quality = other.quality.or(self.quality);
        self.reduced_motion = other.reduced_motion.or(self.reduced_motion);
        self.battery_saving = other.battery_saving.or(self.battery_saving);
    }
}

/// Introspection snapshot for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeviceReport {
    /// The signals the budget was derived from.
    pub signals: DeviceSignals,
    /// Low-end classification of those signals.
    pub low_end: bool,
    /// Last accepted battery level, if any was reported.
    pub battery_level: Option<f32>,
    /// The budget currently in force.
    pub budget: FrameBudget,
}

#[derive(Debug, Clone, Copy)]
struct State {
    signals: DeviceSignals,
    battery_level: Option<f32>,
    visible: bool,
    overrides: BudgetOverride,
}

impl State {
    const fn new(signals: DeviceSignals) -> Self {
        Self {
            signals,
            battery_level: None,
            visible: true,
            overrides: BudgetOverride {
                max_fps: None,
                particle_count: None,
                quality: None,
                reduced_motion: None,
                battery_saving: None,
            },
        }
    }

    /// The budget is a pure function of the stored state, so every
    /// mutation "re-derives" it for free.
    fn budget(&self) -> FrameBudget {
        let mut budget = if self.signals.is_low_end() {
            FrameBudget {
                max_fps: 30,
                particle_count: 50,
                quality: QualityTier::Low,
                reduced_motion: true,
                battery_saving: true,
            }
        } else if self.signals.mobile {
            FrameBudget {
                max_fps: 45,
                particle_count: 75,
                quality: QualityTier::Medium,
                battery_saving: true,
                ..FrameBudget::default()
            }
        } else {
            FrameBudget::default()
        };

        if self.battery_level.is_some_and(|level| level < 0.2) {
            budget.battery_saving = true;
            budget.max_fps = budget.max_fps.min(30);
            budget.particle_count /= 2;
        }

        if !self.visible {
            budget.max_fps = 10;
        }

        budget.merged(&self.overrides)
    }
}

/// Adaptive performance state shared by all players.
///
/// Use [`global`] in production code; tests construct their own via
/// [`Governor::with_signals`] to stay independent of the host machine.
#[derive(Debug)]
pub struct Governor {
    state: Mutex<State>,
}

static GOVERNOR: OnceLock<Governor> = OnceLock::new();

/// The process-wide governor, initialized from detected signals on first
/// use.
pub fn global() -> &'static Governor {
    GOVERNOR.get_or_init(|| Governor::with_signals(DeviceSignals::detect()))
}

impl Governor {
    /// A governor over explicit signals, unconnected to the global one.
    #[must_use]
    pub const fn with_signals(signals: DeviceSignals) -> Self {
        Self { state: Mutex::new(State::new(signals)) }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The budget currently in force.
    #[must_use]
    pub fn budget(&self) -> FrameBudget {
        self.state().budget()
    }

    /// The budget adjusted for one animation kind. Particle-heavy and
    /// grid-heavy kinds get tighter budgets on constrained devices; the
    /// shared budget is left untouched.
    #[must_use]
    pub fn budget_for(&self, kind: MotionKind) -> FrameBudget {
        let state = *self.state();
        let mut budget = state.budget();
        let low_end = state.signals.is_low_end();

        match kind {
            MotionKind::SpiralGalaxy | MotionKind::QuantumField => {
                if low_end {
                    budget.particle_count = 30;
                } else if state.signals.mobile {
                    budget.particle_count = 60;
                }
            }
            MotionKind::PulsingGrid | MotionKind::NeuralNetwork => {
                if low_end {
                    budget.quality = QualityTier::Low;
                    budget.max_fps = 20;
                }
            }
            MotionKind::WaveRipple | MotionKind::SpiralVortex => {
                if low_end {
                    budget.max_fps = 25;
                }
            }
            _ => {}
        }
        budget
    }

    /// Current frame rate ceiling.
    #[must_use]
    pub fn frame_rate(&self) -> u32 {
        self.budget().max_fps
    }

    /// `base` clamped to the budget's particle recommendation.
    #[must_use]
    pub fn particle_budget(&self, base: u32) -> u32 {
        base.min(self.budget().particle_count)
    }

    /// Whether hosts should prefer static or slowed rendering.
    #[must_use]
    pub fn reduce_motion(&self) -> bool {
        self.budget().reduced_motion
    }

    /// Whether the device is conserving power.
    #[must_use]
    pub fn battery_saving(&self) -> bool {
        self.budget().battery_saving
    }

    /// Report a battery level in `0.0..=1.0`. Levels below 0.2 put the
    /// budget into battery saving; out-of-range or non-finite levels are
    /// discarded.
    pub fn set_battery_level(&self, level: f32) {
        if !level.is_finite() || !(0.0..=1.0).contains(&level) {
            log::warn!("governor: discarding battery level {level}");
            return;
        }
        log::debug!("governor: battery level {level}");
        self.state().battery_level = Some(level);
    }

    /// Tell the governor whether the host surface is visible. Hidden
    /// hosts are throttled to 10 FPS; becoming visible restores the
    /// device-derived budget.
    pub fn set_visible(&self, visible: bool) {
        log::debug!("governor: visible = {visible}");
        self.state().visible = visible;
    }

    /// Replace the device signals and re-derive the budget from them.
    pub fn set_signals(&self, signals: DeviceSignals) {
        log::debug!("governor: signals = {signals:?}");
        self.state().signals = signals;
    }

    /// Merge a partial override over the derived budget. Repeated calls
    /// accumulate; `reset` clears them.
    pub fn apply_override(&self, overrides: &BudgetOverride) {
        log::debug!("governor: override {overrides:?}");
        self.state().overrides.fold(overrides);
    }

    /// Drop battery, visibility, and override state and re-detect the
    /// device signals.
    pub fn reset(&self) {
        log::debug!("governor: reset");
        *self.state() = State::new(DeviceSignals::detect());
    }

    /// Snapshot of signals, classification, and the budget in force.
    #[must_use]
    pub fn device_report(&self) -> DeviceReport {
        let state = *self.state();
        DeviceReport {
            signals: state.signals,
            low_end: state.signals.is_low_end(),
            battery_level: state.battery_level,
            budget: state.budget(),
        }
    }
}
