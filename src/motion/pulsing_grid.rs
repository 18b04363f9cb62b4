//! A breathing dot lattice crossed by a radial ripple.

use std::f32::consts::{SQRT_2, TAU};

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};
use crate::color::Rgba;

/// Tunables for [`PulsingGrid`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct PulsingGridParams {
    /// Cells per side of the square grid.
    pub grid_size: u32,
    /// Gap between cell baselines in pixels.
    pub spacing: f32,
    /// Speed of the whole-grid expand/contract cycle.
    pub breathing_speed: f32,
    /// Radial wave speed multiplier retained for preset compatibility.
    pub wave_speed: f32,
    /// Speed of the white-to-blue palette cycle.
    pub color_pulse_speed: f32,
}

impl Default for PulsingGridParams {
    fn default() -> Self {
        Self {
            grid_size: 5,
            spacing: 15.0,
            breathing_speed: 0.5,
            wave_speed: 1.2,
            color_pulse_speed: 1.0,
        }
    }
}

/// A square lattice of dots that breathes around a fixed center dot while
/// a ripple rolls outward through it. Grid dots slide between white and
/// pale blue on their own clock, ignoring the configured color.
#[derive(Debug, Clone)]
pub struct PulsingGrid {
    params: PulsingGridParams,
}

impl PulsingGrid {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: PulsingGridParams) -> Self {
        Self { params }
    }
}

impl Motion for PulsingGrid {
    fn name(&self) -> &'static str {
        "pulsing-grid"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = self.params;
        let center = ctx.canvas.center();

        // The whole grid expands and contracts as one.
        let breathing = (ctx.time * p.breathing_speed).sin() * 0.2 + 1.0;

        ctx.canvas.fill_circle(center, 3.0, ctx.paint.shade(0.9));

        let half_span = p.grid_size.saturating_sub(1) as f32 / 2.0;
        let max_distance = p.spacing * SQRT_2 * half_span;
        let mid = p.grid_size / 2;

        for row in 0..p.grid_size {
            for col in 0..p.grid_size {
                // The center cell belongs to the center dot.
                if row == mid && col == mid {
                    continue;
                }

                let base = Vec2::new(
                    (col as f32 - half_span) * p.spacing,
                    (row as f32 - half_span) * p.spacing,
                );
                let norm_distance = base.length() / max_distance;
                let angle = base.y.atan2(base.x);

                let radial_phase = (ctx.time - norm_distance) % 1.0;
                let radial_wave = (radial_phase * TAU).sin() * 4.0;

                let pos = center
                    + base * breathing
                    + Vec2::from_angle(angle) * radial_wave;

                let base_size = 1.5 + (1.0 - norm_distance) * 1.5;
                let pulse =
                    (ctx.time * 2.0 + norm_distance * 5.0).sin() * 0.6 + 1.0;

                let blue_amount = (ctx.time * p.color_pulse_speed
                    + norm_distance * 3.0)
                    .sin()
                    * 0.3
                    + 0.3;
                let whiteness = 1.0 - blue_amount;
                let fill = Rgba::new(
                    (255.0 * whiteness + 200.0 * blue_amount).floor() / 255.0,
                    (255.0 * whiteness + 220.0 * blue_amount).floor() / 255.0,
                    1.0,
                    0.5 + (ctx.time * 1.5 + angle * 3.0).sin() * 0.2
                        + norm_distance * 0.3,
                );

                // Interior cells link to their four neighbors; the far end
                // of each link breathes but does not ride the ripple.
                if row > 0
                    && col > 0
                    && row < p.grid_size - 1
                    && col < p.grid_size - 1
                {
                    // Adjacent cells sit one grid step apart.
                    let link = Rgba::new(
                        1.0,
                        1.0,
                        1.0,
                        0.1 + (ctx.time * 1.5 + 2.0).sin() * 0.05,
                    );
                    for (n_row, n_col) in [
                        (row - 1, col),
                        (row, col + 1),
                        (row + 1, col),
                        (row, col - 1),
                    ] {
                        if n_row == mid && n_col == mid {
                            continue;
                        }
                        let n_base = Vec2::new(
                            (n_col as f32 - half_span) * p.spacing,
                            (n_row as f32 - half_span) * p.spacing,
                        );
                        ctx.canvas.stroke_line(
                            pos,
                            center + n_base * breathing,
                            0.5,
                            link,
                        );
                    }
                }

                ctx.canvas.fill_circle(pos, base_size * pulse, fill);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{PI, SQRT_2};

    use super::*;
    use crate::canvas::Canvas;
    use crate::color::{Paint, Rgba};

    fn frame(time: f32) -> Canvas {
        let mut canvas = Canvas::new(180, 180).unwrap();
        let mut generator = PulsingGrid::new(PulsingGridParams::default());
        let mut ctx = DrawContext {
            canvas: &mut canvas,
            time,
            paint: Paint::new(Rgba::WHITE, 0.9),
        };
        generator.draw(&mut ctx);
        canvas
    }

    #[test]
    fn grid_dots_lean_blue() {
        // Time equal to the cell's normalized distance parks the ripple,
        // leaving the first off-center cell near (105, 90).
        let canvas = frame(15.0 / (15.0 * SQRT_2 * 2.0));
        let dot = canvas.sample(105, 90);
        assert!(dot.a > 0.5);
        assert!(dot.b > dot.r + 0.05);
    }

    #[test]
    fn the_lattice_breathes_in_and_out() {
        // The rightmost cell of the middle row sits at x = 127.6 when the
        // grid is fully inflated and pulls back past 113 when deflated.
        assert!(frame(PI).sample(127, 90).a > 0.3);
        assert!(frame(3.0 * PI).sample(127, 90).a == 0.0);
    }

    #[test]
    fn links_join_interior_cells_only() {
        let canvas = frame(0.0);
        // Between an interior cell and the edge cell above it.
        assert!(canvas.sample(90, 70).a > 0.0);
        // Between the corner cell and its neighbor: no link.
        assert!(canvas.sample(67, 60).a == 0.0);
    }
}
