//! Layered rings of activating nodes wired to their neighbors.

use std::f32::consts::TAU;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DrawContext, Motion};

/// Tunables for [`NeuralNetwork`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct NeuralNetworkParams {
    /// Total nodes across all layers.
    pub node_count: u32,
    /// Concentric layers the nodes are spread over.
    pub layer_count: u32,
    /// Speed of the activation wave.
    pub activation_speed: f32,
    /// Radius of the outermost layer in pixels.
    pub max_radius: f32,
}

impl Default for NeuralNetworkParams {
    fn default() -> Self {
        Self {
            node_count: 12,
            layer_count: 3,
            activation_speed: 0.8,
            max_radius: 70.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    pos: Vec2,
    layer: u32,
    activation: f32,
}

/// Nodes arranged on slowly turning concentric layers, linked across
/// adjacent layers by edges whose weight follows the nodes' activation.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    params: NeuralNetworkParams,
    // Rebuilt every frame; kept to reuse the allocation.
    nodes: Vec<Node>,
}

impl NeuralNetwork {
    /// Generator from parameters.
    #[must_use]
    pub const fn new(params: NeuralNetworkParams) -> Self {
        Self { params, nodes: Vec::new() }
    }
}

impl Motion for NeuralNetwork {
    fn name(&self) -> &'static str {
        "neural-network"
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let p = self.params;
        let center = ctx.canvas.center();

        self.nodes.clear();
        for layer in 0..p.layer_count {
            let layer_radius =
                (layer + 1) as f32 / p.layer_count as f32 * p.max_radius;
            // The last layer absorbs the leftover nodes.
            let mut nodes_in_layer = p.node_count / p.layer_count;
            if layer == p.layer_count - 1 {
                nodes_in_layer += p.node_count % p.layer_count;
            }

            for i in 0..nodes_in_layer {
                let angle = i as f32 / nodes_in_layer as f32 * TAU
                    + ctx.time * 0.1;
                let activation_phase = (ctx.time * p.activation_speed
                    + i as f32 * 0.2
                    + layer as f32 * 0.5)
                    % 1.0;
                self.nodes.push(Node {
                    pos: center + Vec2::from_angle(angle) * layer_radius,
                    layer,
                    activation: (activation_phase * TAU).sin() * 0.5 + 0.5,
                });
            }
        }

        // Wire adjacent layers; edge weight follows the mean activation.
        for (i, a) in self.nodes.iter().enumerate() {
            for b in &self.nodes[i + 1..] {
                if a.layer.abs_diff(b.layer) == 1 {
                    let strength = (a.activation + b.activation) / 2.0;
                    ctx.canvas.stroke_line(
                        a.pos,
                        b.pos,
                        strength * 2.0,
                        ctx.paint.shade(strength * 0.3),
                    );
                }
            }
        }

        for node in &self.nodes {
            let size = 3.0 + node.activation * 3.0;
            ctx.canvas.fill_circle(
                node.pos,
                size,
                ctx.paint.shade(0.6 + node.activation * 0.4),
            );
            // Activation halo.
            ctx.canvas.stroke_circle(
                node.pos,
                size + 2.0,
                1.0,
                ctx.paint.shade(node.activation * 0.5),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::{Paint, Rgba};

    fn frame(params: NeuralNetworkParams, time: f32) -> Canvas {
        let mut canvas = Canvas::new(180, 180).unwrap();
        let mut generator = NeuralNetwork::new(params);
        let mut ctx = DrawContext {
            canvas: &mut canvas,
            time,
            paint: Paint::new(Rgba::WHITE, 0.9),
        };
        generator.draw(&mut ctx);
        canvas
    }

    #[test]
    fn nodes_ring_the_center_in_layers() {
        // Twelve nodes over three layers: the first node of the inner
        // layer sits at (113.3, 90), the outer one at (160, 90).
        let canvas = frame(NeuralNetworkParams::default(), 0.0);
        assert!(canvas.sample(113, 90).a > 0.5);
        assert!(canvas.sample(163, 90).a > 0.5);
    }

    #[test]
    fn edges_join_adjacent_layers_only() {
        // Two layers, one node each, both on the +x axis: the edge
        // between them crosses (140, 90).
        let two_layers = NeuralNetworkParams {
            node_count: 2,
            layer_count: 2,
            ..Default::default()
        };
        assert!(frame(two_layers, 0.0).sample(140, 90).a > 0.0);

        // A single layer has no adjacent layer to wire to.
        let one_layer = NeuralNetworkParams {
            node_count: 2,
            layer_count: 1,
            ..Default::default()
        };
        assert!(frame(one_layer, 0.0).sample(90, 90).a == 0.0);
    }

    #[test]
    fn activation_swells_nodes_and_their_halo() {
        let params = NeuralNetworkParams {
            node_count: 1,
            layer_count: 1,
            ..Default::default()
        };
        // Activation peaks at phase 0.25 and bottoms out at 0.75.
        let active = frame(params, 0.25 / 0.8);
        let idle = frame(params, 0.75 / 0.8);
        assert!(active.lit_pixels() > idle.lit_pixels() * 2);
    }
}
