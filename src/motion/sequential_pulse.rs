//! A pulse chasing around a dotted circle, spokes flaring as it passes.

use std::f32::consts::TAU;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// Tunables for [`SequentialPulse`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct SequentialPulseParams {
    /// Resting radius of the dot circle in pixels.
    pub radius: f32,
    /// Dots spaced evenly around the circle.
    pub dot_count: u32,
}

impl Default for SequentialPulseParams {
    fn default() -> Self {
        Self { radius: 70.0, dot_count: 16 }
    }
}

/// Dots on a circle pulsing one after another, each tethered to the
/// center by a spoke that brightens with the pulse.
#[derive(Debug, Clone)]
pub struct SequentialPulse {
    params: SequentialPulseParams,
}

impl SequentialPulse {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: SequentialPulseParams) -> Self {
        Self { params }
    }
}

impl Motion for SequentialPulse {
    fn name(&self) -> &'static str {
        "sequential-pulse"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = self.params;
        let center = ctx.canvas.center();

        // Faint reference circle under the dots.
        ctx.canvas.stroke_circle(center, p.radius, 1.0, ctx.paint.shade(0.05));

        for dot in 0..p.dot_count {
            let angle = dot as f32 / p.dot_count as f32 * TAU;

            // The pulse wave travels once around the circle per two
            // seconds of animation time.
            let pulse_phase =
                (ctx.time * 0.5 + dot as f32 / p.dot_count as f32) % 1.0;
            let pulse = (pulse_phase * TAU).sin();

            let size = 2.0 + pulse * 2.0;
            let pos = center + Vec2::from_angle(angle) * (p.radius + pulse * 5.0);

            ctx.canvas.stroke_line(
                center,
                pos,
                1.0,
                ctx.paint.shade(0.1 + pulse * 0.2),
            );
            ctx.canvas.fill_circle(pos, size, ctx.paint.shade(0.9));
        }
    }
}
