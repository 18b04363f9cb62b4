//! Rows of dots bobbing on out-of-phase sine waves.

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// Tunables for [`OscillatingDots`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct OscillatingDotsParams {
    /// Dots per row.
    pub dot_count: u32,
    /// Number of rows.
    pub row_count: u32,
    /// Vertical gap between row baselines in pixels.
    pub spacing: f32,
}

impl Default for OscillatingDotsParams {
    fn default() -> Self {
        Self { dot_count: 20, row_count: 5, spacing: 15.0 }
    }
}

/// A lattice of dots where each row rides its own sine wave; lower rows
/// swing wider and faster, and each dot trails its neighbor slightly.
#[derive(Debug, Clone)]
pub struct OscillatingDots {
    params: OscillatingDotsParams,
}

impl OscillatingDots {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: OscillatingDotsParams) -> Self {
        Self { params }
    }
}

impl Motion for OscillatingDots {
    fn name(&self) -> &'static str {
        "oscillating-dots"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = self.params;
        let center = ctx.canvas.center();
        let color = ctx.paint.shade(0.9);

        for row in 0..p.row_count {
            let baseline = center.y
                - (p.row_count - 1) as f32 / 2.0 * p.spacing
                + row as f32 * p.spacing;

            let amplitude = 4.0 + row as f32 * 2.0;
            let frequency = 1.0 + row as f32 * 0.2;
            let row_phase = row as f32 * 0.5;

            for dot in 0..p.dot_count {
                // Dots sit on a fixed 8 px pitch; only y oscillates.
                let x = center.x - (p.dot_count - 1) as f32 / 2.0 * 8.0
                    + dot as f32 * 8.0;
                let offset = (ctx.time * frequency
                    + dot as f32 * 0.2
                    + row_phase)
                    .sin()
                    * amplitude;
                ctx.canvas.fill_circle(
                    Vec2::new(x, baseline + offset),
                    2.0,
                    color,
                );
            }
        }
    }
}
