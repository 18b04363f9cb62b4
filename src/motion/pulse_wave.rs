//! Breathing dot rings with a phase-chased alpha wave.

use std::f32::consts::TAU;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// One fixed ring of dots: radius and dot count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct DotRing {
    /// Ring radius in pixels.
    pub radius: f32,
    /// Dots spaced evenly around the ring.
    pub count: u32,
}

/// Tunables for [`PulseWave`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct PulseWaveParams {
    /// The dot rings, innermost first.
    pub dot_rings: Vec<DotRing>,
}

impl Default for PulseWaveParams {
    fn default() -> Self {
        Self {
            dot_rings: vec![
                DotRing { radius: 15.0, count: 6 },
                DotRing { radius: 30.0, count: 12 },
                DotRing { radius: 45.0, count: 18 },
                DotRing { radius: 60.0, count: 24 },
                DotRing { radius: 75.0, count: 30 },
            ],
        }
    }
}

/// Concentric dot rings whose radii breathe and whose alphas chase around
/// each ring, offset ring to ring so the wave rolls outward.
#[derive(Debug, Clone)]
pub struct PulseWave {
    params: PulseWaveParams,
}

impl PulseWave {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: PulseWaveParams) -> Self {
        Self { params }
    }
}

impl Motion for PulseWave {
    fn name(&self) -> &'static str {
        "pulse-wave"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let center = ctx.canvas.center();

        for (ring_index, ring) in self.params.dot_rings.iter().enumerate() {
            let ring_phase = ctx.time * 2.0 - ring_index as f32 * 0.4;
            let radius_pulse = ring_phase.sin() * 3.0;

            for dot in 0..ring.count {
                let angle = dot as f32 / ring.count as f32 * TAU;
                let pos = center
                    + Vec2::from_angle(angle) * (ring.radius + radius_pulse);
                let opacity =
                    0.4 + (ring_phase + dot as f32 * 0.2).sin() * 0.6;
                ctx.canvas.fill_circle(pos, 2.0, ctx.paint.shade(opacity));
            }
        }
    }
}
