//! A row of pendulums swinging left and right in unison.

use std::f32::consts::PI;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// Tunables for [`PendulumWave`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct PendulumWaveParams {
    /// Number of pendulums in the row.
    pub pendulum_count: u32,
    /// Swing cycles per second at speed 1.
    pub base_frequency: f32,
    /// Arm length in pixels.
    pub pendulum_length: f32,
    /// Peak deflection from vertical, in radians.
    pub max_angle: f32,
}

impl Default for PendulumWaveParams {
    fn default() -> Self {
        Self {
            pendulum_count: 15,
            base_frequency: 0.5,
            pendulum_length: 90.0,
            max_angle: PI / 12.0,
        }
    }
}

/// Pendulums hung from a horizontal guide line, all sharing one angle so
/// the row sways as a sheet.
#[derive(Debug, Clone)]
pub struct PendulumWave {
    params: PendulumWaveParams,
}

impl PendulumWave {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: PendulumWaveParams) -> Self {
        Self { params }
    }
}

impl Motion for PendulumWave {
    fn name(&self) -> &'static str {
        "pendulum-wave"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = &self.params;
        let center = ctx.canvas.center();
        let count = p.pendulum_count as f32;
        let pivot_y = center.y - p.pendulum_length;

        // Horizontal guide line at pivot height.
        let half_span = count * 4.0;
        ctx.canvas.stroke_line(
            Vec2::new(center.x - half_span, pivot_y),
            Vec2::new(center.x + half_span, pivot_y),
            1.0,
            ctx.paint.shade(0.15),
        );

        // One shared angle: simple left-right motion.
        let angle =
            (ctx.time * p.base_frequency * PI).sin() * p.max_angle;
        let swing =
            Vec2::new(angle.sin(), angle.cos()) * p.pendulum_length;

        for i in 0..p.pendulum_count {
            let pivot =
                Vec2::new(center.x - count * 4.0 + i as f32 * 8.0, pivot_y);
            let bob = pivot + swing;

            ctx.canvas.stroke_line(pivot, bob, 1.0, ctx.paint.shade(0.4));
            ctx.canvas.fill_circle(bob, 3.0, ctx.paint.shade(0.9));
            ctx.canvas.fill_circle(pivot, 1.0, ctx.paint.shade(0.5));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::{Paint, Rgba};

    fn frame(time: f32, params: PendulumWaveParams) -> Canvas {
        let mut canvas = Canvas::new(240, 240).unwrap();
        let mut generator = PendulumWave::new(params);
        let mut ctx = DrawContext {
            canvas: &mut canvas,
            time,
            paint: Paint::new(Rgba::WHITE, 1.0),
        };
        generator.draw(&mut ctx);
        canvas
    }

    #[test]
    fn bobs_hang_straight_down_at_time_zero() {
        let params = PendulumWaveParams {
            pendulum_count: 1,
            pendulum_length: 60.0,
            ..PendulumWaveParams::default()
        };
        let canvas = frame(0.0, params);
        // Pivot at (116, 60), bob straight below at (116, 120).
        assert!(canvas.sample(116, 120).a > 0.5);
    }

    #[test]
    fn swing_peaks_at_a_quarter_period() {
        let params = PendulumWaveParams {
            pendulum_count: 1,
            pendulum_length: 60.0,
            ..PendulumWaveParams::default()
        };
        // sin(t * 0.5 * PI) peaks at t = 1: full deflection to the right.
        let canvas = frame(1.0, params);
        let deflect = params.max_angle.sin() * 60.0;
        let drop = params.max_angle.cos() * 60.0;
        let x = (116.0 + deflect) as u32;
        let y = (60.0 + drop) as u32;
        assert!(canvas.sample(x, y).a > 0.3);
        // The straight-down resting spot is dark once the bob swings away.
        assert!(canvas.sample(116, 120).a == 0.0);
    }

    #[test]
    fn guide_line_spans_the_row() {
        let canvas = frame(0.0, PendulumWaveParams::default());
        // Pivot height for the defaults on a 240 px surface: y = 30.
        assert!(canvas.sample(120, 30).a > 0.0);
        assert!(canvas.sample(70, 30).a > 0.0);
    }
}
