//! Path geometry derived from neighbour lists.

use super::{Edge, Node, Point};
use tracing::warn;

impl Edge {
    /// The orthogonal trace: start, two elbows around `mid_x`, end.
    pub fn polyline(&self) -> [Point; 4] {
        [
            self.start,
            Point::new(self.mid_x, self.start.y),
            Point::new(self.mid_x, self.end.y),
            self.end,
        ]
    }

    /// Manhattan length of the trace in normalized units.
    pub fn length(&self) -> f64 {
        self.scaled_length(1.0, 1.0)
    }

    /// Trace length after scaling each axis, e.g. into pixels.
    ///
    /// `mid_x` lies between the endpoints, so the two horizontal runs add up
    /// to `|dx|`.
    pub fn scaled_length(&self, x_scale: f64, y_scale: f64) -> f64 {
        (self.end.x - self.start.x).abs() * x_scale + (self.end.y - self.start.y).abs() * y_scale
    }
}

/// Emit one edge per neighbour record, node-major then list order.
///
/// Edge ids count up from 0 in emission order; renderers stagger reveal
/// animations on them, so the order is part of the contract.
pub fn derive(nodes: &[Node]) -> Vec<Edge> {
    let total = nodes.iter().map(|n| n.neighbors.len()).sum();
    let mut edges = Vec::with_capacity(total);

    for node in nodes {
        for neighbor in &node.neighbors {
            let Some(target) = nodes.get(neighbor.target) else {
                warn!(
                    source = node.id,
                    target = neighbor.target,
                    "skipping edge to missing node"
                );
                continue;
            };
            let start = node.position;
            let end = target.position;
            edges.push(Edge {
                id: edges.len(),
                source: node.id,
                target: target.id,
                start,
                end,
                mid_x: start.x + (end.x - start.x) / 2.0,
                highlighted: neighbor.highlighted,
            });
        }
    }
    edges
}
