//! Differentially rotating star field laid out on logarithmic spiral arms.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};
use crate::color::Rgba;

/// How tightly the arms wind.
const SPIRAL_TIGHTNESS: f32 = 0.2;

/// Per-frame angle step multiplier, tuned for a 60 fps cadence.
const FRAME_STEP: f32 = 16.67;

/// Tunables for [`SpiralGalaxy`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct SpiralGalaxyParams {
    /// Number of stars seeded at construction.
    pub particle_count: u32,
    /// Radius of the disc in pixels.
    pub max_radius: f32,
    /// Number of spiral arms the stars cluster on.
    pub spiral_arms: u32,
    /// Base angular speed of the rotation.
    pub rotation_speed: f32,
}

impl Default for SpiralGalaxyParams {
    fn default() -> Self {
        Self {
            particle_count: 200,
            max_radius: 75.0,
            spiral_arms: 3,
            rotation_speed: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Star {
    distance: f32,
    angle: f32,
    arm_index: u32,
    size: f32,
    opacity: f32,
    speed_factor: f32,
    tint: Rgba,
}

/// A galaxy of randomly seeded stars rotating differentially, inner stars
/// faster than outer ones, with each arm pulsing in turn. Stars keep their
/// own white-blue tints instead of the configured color.
#[derive(Debug, Clone)]
pub struct SpiralGalaxy {
    params: SpiralGalaxyParams,
    stars: Vec<Star>,
}

impl SpiralGalaxy {
    /// Generator from parameters. Stars are seeded once, here.
    #[must_use]
    pub fn new(params: SpiralGalaxyParams) -> Self {
        // A zero-arm galaxy degenerates to a single arm.
        let arms = params.spiral_arms.max(1);
        let mut rng = rand::rng();
        let stars = (0..params.particle_count)
            .map(|_| {
                // Square-root sampling keeps star density even over the
                // disc area.
                let distance = rng.random::<f32>().sqrt() * params.max_radius;
                let arm_index = rng.random_range(0..arms);
                let arm_offset = arm_index as f32 / arms as f32 * TAU;
                let spiral_angle = (distance / 5.0).ln() / SPIRAL_TIGHTNESS;
                Star {
                    distance,
                    angle: spiral_angle + arm_offset,
                    arm_index,
                    size: 1.0 + rng.random::<f32>() * 1.5,
                    opacity: 0.3 + rng.random::<f32>() * 0.7,
                    speed_factor: 0.8 + rng.random::<f32>() * 0.4,
                    tint: Rgba::from_u8(
                        220 + rng.random_range(0..35),
                        220 + rng.random_range(0..35),
                        255,
                        1.0,
                    ),
                }
            })
            .collect();
        Self { params, stars }
    }
}

impl Motion for SpiralGalaxy {
    fn name(&self) -> &'static str {
        "spiral-galaxy"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let center = ctx.canvas.center();
        let arms = self.params.spiral_arms.max(1) as f32;

        for star in &mut self.stars {
            // Keplerian rotation: closer stars orbit faster.
            let rotation_factor = 1.0 / (star.distance / 10.0).sqrt();
            star.angle += self.params.rotation_speed
                * rotation_factor
                * star.speed_factor
                * FRAME_STEP;

            let pos = center + Vec2::from_angle(star.angle) * star.distance;

            let arm_phase =
                (ctx.time * 0.5 + star.arm_index as f32 / arms) % 1.0;
            let pulse = (arm_phase * TAU).sin() * 0.3 + 0.7;

            let alpha = star.opacity * pulse;
            ctx.canvas.fill_circle(
                pos,
                star.size * pulse,
                star.tint.with_alpha(alpha),
            );

            // The larger stars drag a short inward trail.
            if star.size > 1.8 {
                let trail_angle = star.angle - 0.1 * rotation_factor;
                let trail = center
                    + Vec2::from_angle(trail_angle) * (star.distance * 0.85);
                ctx.canvas.stroke_line(
                    pos,
                    trail,
                    star.size * 0.5,
                    star.tint.with_alpha(alpha * 0.3),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::Paint;

    fn frame(generator: &mut SpiralGalaxy, time: f32) -> Canvas {
        let mut canvas = Canvas::new(180, 180).unwrap();
        let mut ctx = DrawContext {
            canvas: &mut canvas,
            time,
            paint: Paint::new(Rgba::WHITE, 0.9),
        };
        generator.draw(&mut ctx);
        canvas
    }

    #[test]
    fn the_star_count_is_fixed_at_construction() {
        let mut galaxy = SpiralGalaxy::new(SpiralGalaxyParams::default());
        assert_eq!(galaxy.stars.len(), 200);
        for _ in 0..3 {
            let _ = frame(&mut galaxy, 0.5);
        }
        assert_eq!(galaxy.stars.len(), 200);
    }

    #[test]
    fn stars_stay_inside_the_disc() {
        let mut galaxy = SpiralGalaxy::new(SpiralGalaxyParams::default());
        let canvas = frame(&mut galaxy, 0.0);
        let center = canvas.center();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.sample(x, y).a > 0.0 {
                    let pixel =
                        Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                    assert!(center.distance(pixel) < 80.0);
                }
            }
        }
    }

    #[test]
    fn the_galaxy_rotates_between_frames() {
        let mut galaxy = SpiralGalaxy::new(SpiralGalaxyParams::default());
        let first = frame(&mut galaxy, 1.0);
        let second = frame(&mut galaxy, 1.0);
        // Same animation time, but the stars have stepped forward.
        assert_ne!(first.pixels(), second.pixels());
    }
}
