//! Proximity edge selection.

use super::{Neighbor, Node, Point};
use crate::random::RandomSource;

/// Other nodes ordered by ascending distance from `origin`.
///
/// The sort is stable, so equal distances keep node order.
fn ranked_candidates(origin: usize, positions: &[Point]) -> Vec<(usize, f64)> {
    let here = positions[origin];
    let mut candidates: Vec<(usize, f64)> = positions
        .iter()
        .enumerate()
        .filter(|(id, _)| *id != origin)
        .map(|(id, p)| (id, here.distance(p)))
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
    candidates
}

/// Fill every node's neighbour list.
///
/// Each node links to its `k_nearest` closest peers (fewer if the graph is
/// smaller), then, with probability `far_edge_probability`, to the single
/// farthest peer as a highlighted edge. The far coin is only tossed when a
/// farthest peer exists outside the near set. Lists are directed and never
/// symmetrized.
pub fn connect(
    nodes: &mut [Node],
    k_nearest: usize,
    far_edge_probability: f64,
    rng: &mut impl RandomSource,
) {
    let positions: Vec<Point> = nodes.iter().map(|n| n.position).collect();

    for (origin, node) in nodes.iter_mut().enumerate() {
        let candidates = ranked_candidates(origin, &positions);
        let near_count = k_nearest.min(candidates.len());
        let (near, rest) = candidates.split_at(near_count);

        let mut neighbors: Vec<Neighbor> = near
            .iter()
            .map(|&(target, _)| Neighbor {
                target,
                highlighted: false,
            })
            .collect();

        if let Some(&(farthest, _)) = rest.last() {
            if rng.uniform() < far_edge_probability {
                neighbors.push(Neighbor {
                    target: farthest,
                    highlighted: true,
                });
            }
        }

        node.neighbors = neighbors;
    }
}
