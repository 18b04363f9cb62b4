//! A jittering particle grid whose members blink in and out of existence.

use std::f32::consts::TAU;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// Tunables for [`QuantumField`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct QuantumFieldParams {
    /// Grid columns; particles wrap onto successive rows.
    pub field_size: u32,
    /// Total particles in the field.
    pub particle_count: u32,
    /// Speed of the blink/tunnel cycle.
    pub quantum_speed: f32,
    /// Peak particle alpha.
    pub field_intensity: f32,
}

impl Default for QuantumFieldParams {
    fn default() -> Self {
        Self {
            field_size: 6,
            particle_count: 200,
            quantum_speed: 1.2,
            field_intensity: 0.8,
        }
    }
}

/// Grid-anchored particles that jitter around their cells, vanish when
/// their per-particle uncertainty dips, and occasionally link to the next
/// particle while highly certain.
#[derive(Debug, Clone)]
pub struct QuantumField {
    params: QuantumFieldParams,
}

impl QuantumField {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: QuantumFieldParams) -> Self {
        Self { params }
    }
}

fn particle_pos(center: Vec2, field_size: u32, index: u32, time: f32) -> Vec2 {
    let col = (index % field_size) as f32 - field_size as f32 / 2.0;
    let row = (index / field_size) as f32 - field_size as f32 / 2.0;
    center
        + Vec2::new(col * 20.0, row * 20.0)
        + Vec2::new(
            (time * 3.0 + index as f32).sin() * 8.0,
            (time * 2.0 + index as f32).cos() * 6.0,
        )
}

impl Motion for QuantumField {
    fn name(&self) -> &'static str {
        "quantum-field"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = self.params;
        let field_size = p.field_size.max(1);
        let center = ctx.canvas.center();

        for i in 0..p.particle_count {
            let quantum_phase =
                (ctx.time * p.quantum_speed + i as f32 * 0.1) % 1.0;

            // Particles blink out while their uncertainty dips.
            let uncertainty = (quantum_phase * TAU + i as f32 * 0.3).sin();
            if uncertainty < 0.3 {
                continue;
            }

            let pos = particle_pos(center, field_size, i, ctx.time);

            // Tunnelling swells and brightens each particle twice per
            // blink cycle.
            let tunnel = (quantum_phase * 2.0 * TAU).sin() * 0.5 + 0.5;
            ctx.canvas.fill_circle(
                pos,
                1.0 + tunnel * 2.0,
                ctx.paint.shade(tunnel * p.field_intensity),
            );

            if i % 4 == 0 && uncertainty > 0.7 {
                let partner = (i + 1) % p.particle_count;
                let partner_pos =
                    particle_pos(center, field_size, partner, ctx.time);
                ctx.canvas.stroke_line(
                    pos,
                    partner_pos,
                    0.5,
                    ctx.paint.shade(0.2),
                );
            }
        }
    }
}
