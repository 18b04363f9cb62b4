//! Motion generators: the fourteen drawing strategies behind the engine.
//!
//! Each generator is an independent [`Motion`] implementation selected by
//! its [`MotionKind`] tag and constructed from its own parameter struct.
//! Generators only draw. Lifecycle, pacing state and the live
//! configuration belong to the player.

mod concentric_rings;
mod neural_network;
mod orbital_dance;
mod orbital_pulse;
mod oscillating_dots;
mod pendulum_wave;
mod pulse_wave;
mod pulsing_grid;
mod quantum_field;
mod radial_pulse;
mod sequential_pulse;
mod spiral_galaxy;
mod spiral_vortex;
mod wave_ripple;

use std::fmt;
use std::str::FromStr;

pub use concentric_rings::{ConcentricRings, ConcentricRingsParams};
pub use neural_network::{NeuralNetwork, NeuralNetworkParams};
pub use orbital_dance::{OrbitalDance, OrbitalDanceParams};
pub use orbital_pulse::{Orbit, OrbitalPulse, OrbitalPulseParams};
pub use oscillating_dots::{OscillatingDots, OscillatingDotsParams};
pub use pendulum_wave::{PendulumWave, PendulumWaveParams};
pub use pulse_wave::{DotRing, PulseWave, PulseWaveParams};
pub use pulsing_grid::{PulsingGrid, PulsingGridParams};
pub use quantum_field::{QuantumField, QuantumFieldParams};
pub use radial_pulse::{RadialPulse, RadialPulseParams};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use sequential_pulse::{SequentialPulse, SequentialPulseParams};
pub use spiral_galaxy::{SpiralGalaxy, SpiralGalaxyParams};
pub use spiral_vortex::{SpiralVortex, SpiralVortexParams};
pub use wave_ripple::{WaveRipple, WaveRippleParams};

use crate::canvas::Canvas;
use crate::color::Paint;
use crate::error::HaloError;

/// Everything a generator sees for one frame.
pub struct DrawContext<'a> {
    /// Drawing surface, already cleared to the background.
    pub canvas: &'a mut Canvas,
    /// Dilated elapsed time in seconds.
    pub time: f32,
    /// Configured color and opacity.
    pub paint: Paint,
}

/// A drawing strategy: pure geometry over `(time, parameters, surface)`.
///
/// Implementations may carry mutable state (particle fields, scratch
/// buffers) but seed randomness at construction only, keep per-frame
/// element counts stable, and never touch lifecycle or pacing.
pub trait Motion: Send {
    /// The kebab-case tag this generator answers to.
    fn name(&self) -> &'static str;

    /// Draw one frame.
    fn draw(&mut self, ctx: &mut DrawContext<'_>);
}

/// The closed set of animation kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum MotionKind {
    /// Expanding dotted rings that fade outward.
    RadialPulse,
    /// Concentric orbits with an outward-traveling pulse.
    OrbitalPulse,
    /// A row of pendulums swinging in unison.
    PendulumWave,
    /// Breathing dot rings with phase-chased alpha.
    PulseWave,
    /// Counter-rotating concentric dotted rings.
    ConcentricRings,
    /// A dotted circle with a chasing pulse and spokes.
    SequentialPulse,
    /// Rows of dots bobbing on offset sine waves.
    OscillatingDots,
    /// A breathing grid with radial waves and neighbor links.
    PulsingGrid,
    /// A rotating spiral starfield.
    SpiralGalaxy,
    /// Expanding rippled rings.
    WaveRipple,
    /// Dancers weaving along concentric orbits.
    OrbitalDance,
    /// A rigidly rotating Archimedean spiral of particles.
    SpiralVortex,
    /// A jittered quantum grid with tunneling flickers.
    QuantumField,
    /// Layered nodes with activation-weighted edges.
    NeuralNetwork,
}

impl MotionKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::RadialPulse,
        Self::OrbitalPulse,
        Self::PendulumWave,
        Self::PulseWave,
        Self::ConcentricRings,
        Self::SequentialPulse,
        Self::OscillatingDots,
        Self::PulsingGrid,
        Self::SpiralGalaxy,
        Self::WaveRipple,
        Self::OrbitalDance,
        Self::SpiralVortex,
        Self::QuantumField,
        Self::NeuralNetwork,
    ];

    /// The kebab-case identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::RadialPulse => "radial-pulse",
            Self::OrbitalPulse => "orbital-pulse",
            Self::PendulumWave => "pendulum-wave",
            Self::PulseWave => "pulse-wave",
            Self::ConcentricRings => "concentric-rings",
            Self::SequentialPulse => "sequential-pulse",
            Self::OscillatingDots => "oscillating-dots",
            Self::PulsingGrid => "pulsing-grid",
            Self::SpiralGalaxy => "spiral-galaxy",
            Self::WaveRipple => "wave-ripple",
            Self::OrbitalDance => "orbital-dance",
            Self::SpiralVortex => "spiral-vortex",
            Self::QuantumField => "quantum-field",
            Self::NeuralNetwork => "neural-network",
        }
    }

    /// Default parameters for this kind.
    #[must_use]
    pub fn default_params(self) -> MotionParams {
        match self {
            Self::RadialPulse => {
                MotionParams::RadialPulse(RadialPulseParams::default())
            }
            Self::OrbitalPulse => {
                MotionParams::OrbitalPulse(OrbitalPulseParams::default())
            }
            Self::PendulumWave => {
                MotionParams::PendulumWave(PendulumWaveParams::default())
            }
            Self::PulseWave => {
                MotionParams::PulseWave(PulseWaveParams::default())
            }
            Self::ConcentricRings => MotionParams::ConcentricRings(
                ConcentricRingsParams::default(),
            ),
            Self::SequentialPulse => MotionParams::SequentialPulse(
                SequentialPulseParams::default(),
            ),
            Self::OscillatingDots => MotionParams::OscillatingDots(
                OscillatingDotsParams::default(),
            ),
            Self::PulsingGrid => {
                MotionParams::PulsingGrid(PulsingGridParams::default())
            }
            Self::SpiralGalaxy => {
                MotionParams::SpiralGalaxy(SpiralGalaxyParams::default())
            }
            Self::WaveRipple => {
                MotionParams::WaveRipple(WaveRippleParams::default())
            }
            Self::OrbitalDance => {
                MotionParams::OrbitalDance(OrbitalDanceParams::default())
            }
            Self::SpiralVortex => {
                MotionParams::SpiralVortex(SpiralVortexParams::default())
            }
            Self::QuantumField => {
                MotionParams::QuantumField(QuantumFieldParams::default())
            }
            Self::NeuralNetwork => {
                MotionParams::NeuralNetwork(NeuralNetworkParams::default())
            }
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MotionKind {
    type Err = HaloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| HaloError::UnknownMotion(s.to_owned()))
    }
}

/// An animation kind together with its fixed parameters.
///
/// Serialized form carries the tag under `animation`, with the parameter
/// fields alongside it:
///
/// ```toml
/// animation = "spiral-galaxy"
/// particle_count = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "animation", rename_all = "kebab-case")]
pub enum MotionParams {
    /// Parameters for [`RadialPulse`].
    RadialPulse(RadialPulseParams),
    /// Parameters for [`OrbitalPulse`].
    OrbitalPulse(OrbitalPulseParams),
    /// Parameters for [`PendulumWave`].
    PendulumWave(PendulumWaveParams),
    /// Parameters for [`PulseWave`].
    PulseWave(PulseWaveParams),
    /// Parameters for [`ConcentricRings`].
    ConcentricRings(ConcentricRingsParams),
    /// Parameters for [`SequentialPulse`].
    SequentialPulse(SequentialPulseParams),
    /// Parameters for [`OscillatingDots`].
    OscillatingDots(OscillatingDotsParams),
    /// Parameters for [`PulsingGrid`].
    PulsingGrid(PulsingGridParams),
    /// Parameters for [`SpiralGalaxy`].
    SpiralGalaxy(SpiralGalaxyParams),
    /// Parameters for [`WaveRipple`].
    WaveRipple(WaveRippleParams),
    /// Parameters for [`OrbitalDance`].
    OrbitalDance(OrbitalDanceParams),
    /// Parameters for [`SpiralVortex`].
    SpiralVortex(SpiralVortexParams),
    /// Parameters for [`QuantumField`].
    QuantumField(QuantumFieldParams),
    /// Parameters for [`NeuralNetwork`].
    NeuralNetwork(NeuralNetworkParams),
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::RadialPulse(RadialPulseParams::default())
    }
}

impl MotionParams {
    /// The kind these parameters belong to.
    #[must_use]
    pub const fn kind(&self) -> MotionKind {
        match self {
            Self::RadialPulse(_) => MotionKind::RadialPulse,
            Self::OrbitalPulse(_) => MotionKind::OrbitalPulse,
            Self::PendulumWave(_) => MotionKind::PendulumWave,
            Self::PulseWave(_) => MotionKind::PulseWave,
            Self::ConcentricRings(_) => MotionKind::ConcentricRings,
            Self::SequentialPulse(_) => MotionKind::SequentialPulse,
            Self::OscillatingDots(_) => MotionKind::OscillatingDots,
            Self::PulsingGrid(_) => MotionKind::PulsingGrid,
            Self::SpiralGalaxy(_) => MotionKind::SpiralGalaxy,
            Self::WaveRipple(_) => MotionKind::WaveRipple,
            Self::OrbitalDance(_) => MotionKind::OrbitalDance,
            Self::SpiralVortex(_) => MotionKind::SpiralVortex,
            Self::QuantumField(_) => MotionKind::QuantumField,
            Self::NeuralNetwork(_) => MotionKind::NeuralNetwork,
        }
    }

    /// Construct the generator these parameters describe.
    #[must_use]
    pub fn build(&self) -> Box<dyn Motion> {
        match self {
            Self::RadialPulse(p) => Box::new(RadialPulse::new(*p)),
            Self::OrbitalPulse(p) => Box::new(OrbitalPulse::new(p.clone())),
            Self::PendulumWave(p) => Box::new(PendulumWave::new(*p)),
            Self::PulseWave(p) => Box::new(PulseWave::new(p.clone())),
            Self::ConcentricRings(p) => Box::new(ConcentricRings::new(*p)),
            Self::SequentialPulse(p) => Box::new(SequentialPulse::new(*p)),
            Self::OscillatingDots(p) => Box::new(OscillatingDots::new(*p)),
            Self::PulsingGrid(p) => Box::new(PulsingGrid::new(*p)),
            Self::SpiralGalaxy(p) => Box::new(SpiralGalaxy::new(*p)),
            Self::WaveRipple(p) => Box::new(WaveRipple::new(*p)),
            Self::OrbitalDance(p) => Box::new(OrbitalDance::new(*p)),
            Self::SpiralVortex(p) => Box::new(SpiralVortex::new(*p)),
            Self::QuantumField(p) => Box::new(QuantumField::new(*p)),
            Self::NeuralNetwork(p) => Box::new(NeuralNetwork::new(*p)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_parses_its_own_id() {
        for kind in MotionKind::ALL {
            assert_eq!(kind.id().parse::<MotionKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.id());
        }
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let err = "disco-ball".parse::<MotionKind>().unwrap_err();
        assert!(matches!(
            err,
            HaloError::UnknownMotion(tag) if tag == "disco-ball"
        ));
    }

    #[test]
    fn default_params_round_trip_their_kind() {
        for kind in MotionKind::ALL {
            let params = kind.default_params();
            assert_eq!(params.kind(), kind);
            let generator = params.build();
            assert_eq!(generator.name(), kind.id());
        }
    }

    #[test]
    fn params_serialize_with_the_animation_tag() {
        let params = MotionKind::SpiralGalaxy.default_params();
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["animation"], "spiral-galaxy");
        assert_eq!(value["particle_count"], 200);

        let back: MotionParams = serde_json::from_value(value).unwrap();
        assert_eq!(back, params);
    }
}
