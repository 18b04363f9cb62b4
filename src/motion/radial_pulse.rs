//! Expanding dotted rings that fade as they travel outward.

use std::f32::consts::TAU;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// Tunables for [`RadialPulse`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct RadialPulseParams {
    /// Number of concurrently expanding rings.
    pub ring_count: u32,
    /// Dots drawn around each ring.
    pub dots_per_ring: u32,
    /// Radius at which a ring has fully faded.
    pub max_radius: f32,
    /// Outward sweeps per second at speed 1.
    pub pulse_speed: f32,
}

impl Default for RadialPulseParams {
    fn default() -> Self {
        Self {
            ring_count: 8,
            dots_per_ring: 12,
            max_radius: 75.0,
            pulse_speed: 0.35,
        }
    }
}

/// Waves of dots moving outward from the center, shrinking and fading as
/// they go. Ring phases are staggered so the pulse is continuous.
#[derive(Debug, Clone)]
pub struct RadialPulse {
    params: RadialPulseParams,
}

impl RadialPulse {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: RadialPulseParams) -> Self {
        Self { params }
    }
}

impl Motion for RadialPulse {
    fn name(&self) -> &'static str {
        "radial-pulse"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = &self.params;
        let center = ctx.canvas.center();

        for ring in 0..p.ring_count {
            let pulse_phase = (ctx.time * p.pulse_speed
                + ring as f32 / p.ring_count as f32)
                % 1.0;
            let ring_radius = pulse_phase * p.max_radius;

            // Rings that are just starting sit too close to the center.
            if ring_radius < 5.0 {
                continue;
            }

            let opacity = 1.0 - pulse_phase;
            let dot_size = 2.5 * (1.0 - pulse_phase * 0.5);

            for dot in 0..p.dots_per_ring {
                let angle = dot as f32 / p.dots_per_ring as f32 * TAU;
                let pos = center + Vec2::from_angle(angle) * ring_radius;
                ctx.canvas.fill_circle(
                    pos,
                    dot_size,
                    ctx.paint.shade(opacity),
                );
            }
        }
    }
}
