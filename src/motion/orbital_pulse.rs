//! Concentric orbits with a pulse traveling outward through them.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// One orbit ring: its radius and how many dots ride it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Orbit {
    /// Orbit radius in pixels.
    pub radius: f32,
    /// Dots spaced evenly around the orbit.
    pub dot_count: u32,
}

/// Tunables for [`OrbitalPulse`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct OrbitalPulseParams {
    /// Pulse sweeps per second at speed 1.
    pub pulse_frequency: f32,
    /// Radial displacement of a fully pulsed dot, in pixels.
    pub pulse_amplitude: f32,
    /// The orbit rings, innermost first.
    pub orbits: Vec<Orbit>,
}

impl Default for OrbitalPulseParams {
    fn default() -> Self {
        Self {
            pulse_frequency: 0.5,
            pulse_amplitude: 2.0,
            orbits: vec![
                Orbit { radius: 15.0, dot_count: 6 },
                Orbit { radius: 25.0, dot_count: 10 },
                Orbit { radius: 35.0, dot_count: 14 },
                Orbit { radius: 45.0, dot_count: 18 },
                Orbit { radius: 55.0, dot_count: 22 },
                Orbit { radius: 65.0, dot_count: 26 },
            ],
        }
    }
}

/// Dotted orbits over faint guide circles; an outward pulse swells dot
/// size, radius, and alpha with a delay proportional to orbit radius.
#[derive(Debug, Clone)]
pub struct OrbitalPulse {
    params: OrbitalPulseParams,
}

/// Outer radius the pulse delay is normalized against.
const DELAY_NORM_RADIUS: f32 = 75.0;

impl OrbitalPulse {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: OrbitalPulseParams) -> Self {
        Self { params }
    }
}

impl Motion for OrbitalPulse {
    fn name(&self) -> &'static str {
        "orbital-pulse"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = &self.params;
        let center = ctx.canvas.center();

        for orbit in &p.orbits {
            ctx.canvas.stroke_circle(
                center,
                orbit.radius,
                1.0,
                ctx.paint.shade(0.05),
            );

            // Pulse runs outward: farther orbits fire later. Before its
            // first arrival the phase is negative and the effect clamps
            // to zero.
            let pulse_delay = orbit.radius / DELAY_NORM_RADIUS * 1.5;
            let pulse_phase =
                (ctx.time * p.pulse_frequency - pulse_delay) % 1.0;
            let pulse_effect =
                ((pulse_phase * PI).sin() * p.pulse_amplitude).max(0.0);
            let swell = if p.pulse_amplitude == 0.0 {
                0.0
            } else {
                pulse_effect / p.pulse_amplitude
            };

            for dot in 0..orbit.dot_count {
                let angle = dot as f32 / orbit.dot_count as f32 * TAU;
                let pos = center
                    + Vec2::from_angle(angle)
                        * (orbit.radius + pulse_effect);
                ctx.canvas.fill_circle(
                    pos,
                    2.0 + swell * 1.5,
                    ctx.paint.shade(0.7 + swell * 0.3),
                );
            }
        }
    }
}
