//! Procedural loading animations rendered onto in-memory RGBA surfaces.
//!
//! Halo ships fourteen canvas-style loading animations behind a single
//! factory. Hosts own the clock and the output: they attach surfaces to
//! a [`Mount`], drive rendering with their own timestamps, and read
//! finished frames back as raw pixels. A process-wide governor adapts
//! frame rates and particle counts to the device the host reports.
//!
//! # Key entry points
//!
//! - [`Loader`] - the factory facade; the only way to construct an
//!   animation
//! - [`Mount`] - where surfaces attach and hosts read frames back
//! - [`AnimationConfig`] - the live base configuration (size, speed,
//!   colors, opacity)
//! - [`governor`] - device-adaptive frame and particle budgets
//! - [`motion`] - the fourteen drawing strategies and their parameters
//!
//! # Architecture
//!
//! Nothing here spawns threads or sleeps. A [`Loader`] wraps a
//! [`Player`], which owns one generator, one surface and the pacing
//! state for that instance; each host tick either draws a frame or is
//! skipped by the pacer. The governor is consulted on every accepted
//! frame, so visibility and battery changes reach live instances
//! without any callback machinery.

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod governor;
pub mod loader;
pub mod motion;
pub mod mount;
pub mod player;
pub mod presets;
pub mod util;

pub use canvas::Canvas;
pub use color::{Color, Paint, Rgba};
pub use config::{AnimationConfig, ConfigPatch, Options};
pub use error::HaloError;
pub use governor::{DeviceSignals, FrameBudget, Governor, QualityTier};
pub use loader::{Loader, LoaderBuilder, LoaderOptions};
pub use motion::{Motion, MotionKind, MotionParams};
pub use mount::{Mount, MountSel};
pub use player::Player;
