//! Undulating rings rippling outward from the center.

use std::f32::consts::TAU;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// Segments approximating each ring outline.
const RING_SEGMENTS: u32 = 64;

/// Tunables for [`WaveRipple`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct WaveRippleParams {
    /// Concurrent ripple rings.
    pub wave_count: u32,
    /// How fast each ring sweeps from center to rim.
    pub ripple_speed: f32,
    /// Vertical bob amplitude in pixels; the outline undulates at a
    /// third of it.
    pub wave_amplitude: f32,
    /// Sweep radius in pixels.
    pub max_radius: f32,
}

impl Default for WaveRippleParams {
    fn default() -> Self {
        Self {
            wave_count: 5,
            ripple_speed: 0.8,
            wave_amplitude: 20.0,
            max_radius: 80.0,
        }
    }
}

/// Wavy rings that sweep outward and fade as they grow, each ring bobbing
/// vertically while its outline undulates.
#[derive(Debug, Clone)]
pub struct WaveRipple {
    params: WaveRippleParams,
}

impl WaveRipple {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: WaveRippleParams) -> Self {
        Self { params }
    }
}

impl Motion for WaveRipple {
    fn name(&self) -> &'static str {
        "wave-ripple"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = self.params;
        let center = ctx.canvas.center();

        for wave in 0..p.wave_count {
            let wave_phase = (ctx.time * p.ripple_speed
                + wave as f32 / p.wave_count as f32)
                % 1.0;
            let radius = wave_phase * p.max_radius;
            // Rings still forming near the center stay hidden.
            if radius < 5.0 {
                continue;
            }

            let bob = (ctx.time * 2.0 + wave as f32).sin() * p.wave_amplitude;
            let points: Vec<Vec2> = (0..=RING_SEGMENTS)
                .map(|segment| {
                    let angle =
                        segment as f32 / RING_SEGMENTS as f32 * TAU;
                    let wave_radius = radius
                        + (angle * 3.0 + ctx.time * 3.0).sin()
                            * (p.wave_amplitude * 0.3);
                    center
                        + Vec2::from_angle(angle) * wave_radius
                        + Vec2::new(0.0, bob)
                })
                .collect();

            ctx.canvas.stroke_polyline(
                &points,
                2.0,
                ctx.paint.shade(1.0 - wave_phase),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::{Paint, Rgba};

    fn frame(params: WaveRippleParams, time: f32) -> Canvas {
        let mut canvas = Canvas::new(180, 180).unwrap();
        let mut generator = WaveRipple::new(params);
        let mut ctx = DrawContext {
            canvas: &mut canvas,
            time,
            paint: Paint::new(Rgba::WHITE, 0.9),
        };
        generator.draw(&mut ctx);
        canvas
    }

    fn brightest(canvas: &Canvas) -> f32 {
        let mut brightest = 0.0_f32;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                brightest = brightest.max(canvas.sample(x, y).a);
            }
        }
        brightest
    }

    #[test]
    fn forming_rings_stay_hidden() {
        let params =
            WaveRippleParams { wave_count: 1, ..Default::default() };
        // Phase 0.04: radius 3.2, below the visibility threshold.
        assert_eq!(frame(params, 0.05).lit_pixels(), 0);
        // Phase 0.24: radius 19.2.
        assert!(frame(params, 0.3).lit_pixels() > 0);
    }

    #[test]
    fn rings_fade_as_they_expand() {
        let params =
            WaveRippleParams { wave_count: 1, ..Default::default() };
        let young = frame(params, 0.25 / 0.8);
        let old = frame(params, 0.95 / 0.8);
        assert!(brightest(&old) > 0.0);
        assert!(brightest(&young) > brightest(&old) + 0.3);
    }
}
