//! A dense particle arm winding into a slowly turning vortex.

use std::f32::consts::PI;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// Tunables for [`SpiralVortex`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct SpiralVortexParams {
    /// Particles strung along the spiral.
    pub particle_count: u32,
    /// Angular speed of the whole vortex.
    pub vortex_speed: f32,
    /// How far the arm winds per unit of spiral parameter.
    pub spiral_tightness: f32,
    /// Radius of the arm's outer end in pixels.
    pub max_radius: f32,
}

impl Default for SpiralVortexParams {
    fn default() -> Self {
        Self {
            particle_count: 150,
            vortex_speed: 0.3,
            spiral_tightness: 0.15,
            max_radius: 80.0,
        }
    }
}

/// Particles laid out along an Archimedean arm, shrinking and fading with
/// distance, the whole arm rotating rigidly. Every third particle drags a
/// trail toward the center.
#[derive(Debug, Clone)]
pub struct SpiralVortex {
    params: SpiralVortexParams,
}

impl SpiralVortex {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: SpiralVortexParams) -> Self {
        Self { params }
    }
}

impl Motion for SpiralVortex {
    fn name(&self) -> &'static str {
        "spiral-vortex"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = self.params;
        let center = ctx.canvas.center();

        for i in 0..p.particle_count {
            let along = i as f32 / p.particle_count as f32 * 4.0 * PI;
            let radius = along / (4.0 * PI) * p.max_radius;
            let angle =
                along * p.spiral_tightness + ctx.time * p.vortex_speed;

            let pos = center + Vec2::from_angle(angle) * radius;
            let falloff = 1.0 - radius / p.max_radius;
            let size = 1.0 + falloff * 2.0;
            let opacity = falloff * 0.8;

            ctx.canvas.fill_circle(pos, size, ctx.paint.shade(opacity));

            if i % 3 == 0 {
                let trail =
                    center + Vec2::from_angle(angle - 0.2) * (radius - 5.0);
                ctx.canvas.stroke_line(
                    pos,
                    trail,
                    size * 0.5,
                    ctx.paint.shade(opacity * 0.5),
                );
            }
        }
    }
}
