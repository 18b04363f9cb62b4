//! Nested counter-rotating dot rings around a steady center dot.

use std::f32::consts::TAU;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// Tunables for [`ConcentricRings`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct ConcentricRingsParams {
    /// Number of nested rings.
    pub ring_count: u32,
    /// Radius of the outermost ring in pixels.
    pub max_radius: f32,
}

impl Default for ConcentricRingsParams {
    fn default() -> Self {
        Self { ring_count: 5, max_radius: 75.0 }
    }
}

/// Evenly spaced rings of dots, alternate rings spinning in opposite
/// directions, each ring breathing on its own phase.
#[derive(Debug, Clone)]
pub struct ConcentricRings {
    params: ConcentricRingsParams,
}

impl ConcentricRings {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: ConcentricRingsParams) -> Self {
        Self { params }
    }
}

impl Motion for ConcentricRings {
    fn name(&self) -> &'static str {
        "concentric-rings"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = self.params;
        let center = ctx.canvas.center();

        ctx.canvas.fill_circle(center, 3.0, ctx.paint.shade(0.9));

        let ring_count = p.ring_count as f32;
        for ring in 0..p.ring_count {
            let radius = (ring + 1) as f32 / ring_count * p.max_radius;
            // Outer rings carry more dots.
            let dot_count = 6 + ring * 6;

            // Even rings spin with time, odd rings against it.
            let spin = if ring % 2 == 0 {
                ctx.time * 0.2
            } else {
                -ctx.time * 0.2
            };

            let ring_phase = ctx.time + ring as f32 * 0.7;
            let swell = ring_phase.sin();
            let dot_radius = radius + swell * 3.0;
            let base_size = 2.0 + ring as f32 / (ring_count - 1.0);
            let dot_size = base_size + swell * base_size * 0.7;
            let alpha = 0.6 + swell * 0.4;

            for dot in 0..dot_count {
                let angle = dot as f32 / dot_count as f32 * TAU + spin;
                let pos = center + Vec2::from_angle(angle) * dot_radius;
                ctx.canvas.fill_circle(pos, dot_size, ctx.paint.shade(alpha));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::{Paint, Rgba};

    fn frame(params: ConcentricRingsParams, time: f32) -> Canvas {
        let mut canvas = Canvas::new(180, 180).unwrap();
        let mut generator = ConcentricRings::new(params);
        let mut ctx = DrawContext {
            canvas: &mut canvas,
            time,
            paint: Paint::new(Rgba::WHITE, 0.9),
        };
        generator.draw(&mut ctx);
        canvas
    }

    fn farthest_lit(canvas: &Canvas) -> f32 {
        let center = canvas.center();
        let mut farthest = 0.0_f32;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.sample(x, y).a > 0.0 {
                    let pixel =
                        Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                    farthest = farthest.max(center.distance(pixel));
                }
            }
        }
        farthest
    }

    #[test]
    fn center_dot_is_always_lit() {
        let canvas = frame(ConcentricRingsParams::default(), 0.0);
        assert!(canvas.sample(90, 90).a > 0.0);
    }

    #[test]
    fn rings_breathe_around_the_base_radius() {
        // Outermost ring phase is time + 2.8; pick times where it peaks
        // and bottoms out.
        let swollen = frame(
            ConcentricRingsParams::default(),
            std::f32::consts::FRAC_PI_2 + TAU - 2.8,
        );
        let shrunk = frame(
            ConcentricRingsParams::default(),
            1.5 * std::f32::consts::PI + TAU - 2.8,
        );
        let swollen_reach = farthest_lit(&swollen);
        let shrunk_reach = farthest_lit(&shrunk);
        // Swollen: radius 78, dot size ~5.1. Shrunk: radius 72, size ~0.9.
        assert!(swollen_reach > 80.0);
        assert!(shrunk_reach < 75.0);
    }

    #[test]
    fn a_single_ring_collapses_to_the_center_dot() {
        // ring_count == 1 makes the dot size formula divide zero by zero;
        // the non-finite size is dropped at the surface and only the
        // center dot survives.
        let params =
            ConcentricRingsParams { ring_count: 1, ..Default::default() };
        let canvas = frame(params, 1.0);
        assert!(canvas.lit_pixels() > 0);
        assert!(farthest_lit(&canvas) < 6.0);
    }
}
