//! Grid placement with jitter and probabilistic pruning.

use super::{Decoration, GridSpacing, Node, Point, EXTENT, MAX_NODES};
use crate::random::RandomSource;

/// Grid shape for `count` slots: `cols = ceil(sqrt(count))`, `rows = ceil(count / cols)`.
///
/// `count` is capped at [`MAX_NODES`].
pub fn grid_dimensions(count: usize) -> (usize, usize) {
    let count = count.min(MAX_NODES);
    if count == 0 {
        return (0, 0);
    }
    let mut cols = (count as f64).sqrt().ceil() as usize;
    // Float sqrt can land one off for large perfect squares.
    while cols * cols < count {
        cols += 1;
    }
    while cols > 1 && (cols - 1) * (cols - 1) >= count {
        cols -= 1;
    }
    let rows = count.div_ceil(cols);
    (cols, rows)
}

/// Coordinate of cell `index` out of `cells` along one normalized axis.
pub fn axis_position(index: usize, cells: usize, spacing: GridSpacing) -> f64 {
    match spacing {
        GridSpacing::Padded => (index + 1) as f64 * EXTENT / (cells + 1) as f64,
        GridSpacing::Stretched if cells > 1 => index as f64 * EXTENT / (cells - 1) as f64,
        GridSpacing::Stretched => EXTENT / 2.0,
    }
}

/// Lay `count` slots out row-major on a jittered grid, then prune.
///
/// Draws per slot, in order: jitter x, jitter y, decoration, retention.
/// Survivors are re-indexed `0..M` in their original order and start with no
/// neighbours. `count` is capped at [`MAX_NODES`].
pub fn place(
    count: usize,
    noise: f64,
    keep_probability: f64,
    spacing: GridSpacing,
    decoration: Decoration,
    rng: &mut impl RandomSource,
) -> Vec<Node> {
    let count = count.min(MAX_NODES);
    let (cols, rows) = grid_dimensions(count);

    let mut nodes = Vec::with_capacity(count);
    for slot in 0..count {
        let col = slot % cols;
        let row = slot / cols;

        let x = axis_position(col, cols, spacing) + (rng.uniform() - 0.5) * noise;
        let y = axis_position(row, rows, spacing) + (rng.uniform() - 0.5) * noise;
        let decorated = rng.uniform() < decoration.probability && decoration.enabled;
        let keep = rng.uniform() < keep_probability;

        if keep {
            nodes.push(Node {
                id: nodes.len(),
                position: Point::new(x, y),
                decorated,
                neighbors: Vec::new(),
            });
        }
    }
    nodes
}
