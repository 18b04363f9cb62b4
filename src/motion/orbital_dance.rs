//! Dancers stepping in and out of concentric orbits.

use std::f32::consts::TAU;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// Tunables for [`OrbitalDance`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct OrbitalDanceParams {
    /// Number of concentric orbits.
    pub orbit_count: u32,
    /// Dancers per orbit.
    pub dancers_per_orbit: u32,
    /// Base angular speed; outer orbits run 20% faster per ring.
    pub dance_speed: f32,
    /// Radius of the outermost orbit in pixels.
    pub max_radius: f32,
}

impl Default for OrbitalDanceParams {
    fn default() -> Self {
        Self {
            orbit_count: 4,
            dancers_per_orbit: 8,
            dance_speed: 0.6,
            max_radius: 70.0,
        }
    }
}

/// Rings of dots circling at staggered speeds while each dot sways in and
/// out of its orbit, dragging a short trail behind it.
#[derive(Debug, Clone)]
pub struct OrbitalDance {
    params: OrbitalDanceParams,
}

impl OrbitalDance {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: OrbitalDanceParams) -> Self {
        Self { params }
    }
}

impl Motion for OrbitalDance {
    fn name(&self) -> &'static str {
        "orbital-dance"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = self.params;
        let center = ctx.canvas.center();

        for orbit in 0..p.orbit_count {
            let orbit_radius =
                (orbit + 1) as f32 / p.orbit_count as f32 * p.max_radius;
            let base_angle =
                ctx.time * p.dance_speed * (1.0 + orbit as f32 * 0.2);

            for dancer in 0..p.dancers_per_orbit {
                let angle = dancer as f32 / p.dancers_per_orbit as f32 * TAU
                    + base_angle;

                // Dancers step in and out of their orbit line.
                let dance_phase = (ctx.time * 2.0
                    + dancer as f32 * 0.5
                    + orbit as f32 * 0.3)
                    % 1.0;
                let sway = (dance_phase * TAU).sin();
                let dance_radius = orbit_radius + sway * 15.0;

                let pos = center + Vec2::from_angle(angle) * dance_radius;
                ctx.canvas.fill_circle(
                    pos,
                    2.0 + sway,
                    ctx.paint.shade(0.8 - orbit as f32 * 0.1),
                );

                let trail = center
                    + Vec2::from_angle(angle - 0.1) * (dance_radius - 8.0);
                ctx.canvas.stroke_line(pos, trail, 1.0, ctx.paint.shade(0.3));
            }
        }
    }
}
