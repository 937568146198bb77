//! Procedural circuit-board graph.
//!
//! Generation runs four ordered stages over normalized `[0,100]x[0,100]`
//! space (origin top-left):
//! - grid placement with jitter, decoration sampling and Bernoulli pruning
//! - proximity edges: `k` nearest neighbours plus an optional far edge
//! - orthogonal path derivation with stable, emission-ordered edge ids
//!
//! The output is regenerated wholesale on every run; nothing is updated in
//! place.

pub mod connect;
pub mod paths;
pub mod placement;

use crate::random::RandomSource;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

pub use connect::connect;
pub use paths::derive;
pub use placement::place;

/// Upper bound of the normalized coordinate space on both axes.
pub const EXTENT: f64 = 100.0;

/// Largest slot count a single pass will lay out. Larger requests are clamped.
pub const MAX_NODES: usize = 4096;

/// A position in normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Directed link from a node to one of its chosen neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Id of the target node in the same generation.
    pub target: usize,
    /// Set for the long-range bonus connection.
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Dense id, `0..M` after pruning.
    pub id: usize,
    pub position: Point,
    /// Carries a chip glyph when rendered.
    pub decorated: bool,
    pub neighbors: Vec<Neighbor>,
}

/// A renderable connection between two nodes.
///
/// Endpoints are copied out of the nodes at derivation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Emission order, starting at 0.
    pub id: usize,
    pub source: usize,
    pub target: usize,
    pub start: Point,
    pub end: Point,
    /// X of the vertical elbow segment.
    pub mid_x: f64,
    pub highlighted: bool,
}

/// How grid cells are spread across the normalized axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridSpacing {
    /// Cells at `(i+1)·100/(n+1)`, leaving a border on both sides.
    #[default]
    Padded,
    /// Cells at `i·100/(n-1)`, touching both borders. A single cell sits at 50.
    Stretched,
}

/// Layout knobs for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Requested grid slots before pruning. Zero or negative yields nothing.
    pub node_count: i64,
    /// Full width of the uniform jitter applied per axis.
    pub noise: f64,
    /// Probability that each slot survives pruning.
    pub keep_probability: f64,
    /// Guaranteed nearest connections per node.
    pub k_nearest: usize,
    /// Probability of an extra highlighted edge to the farthest node.
    pub far_edge_probability: f64,
    /// Probability that a node carries a chip glyph.
    pub decoration_probability: f64,
    /// Whether decoration flags are emitted at all.
    pub decorations: bool,
    pub spacing: GridSpacing,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            node_count: 30,
            noise: 8.0,
            keep_probability: 0.85,
            k_nearest: 2,
            far_edge_probability: 0.15,
            decoration_probability: 0.45,
            decorations: true,
            spacing: GridSpacing::Padded,
        }
    }
}

impl LayoutParams {
    /// Clamp every knob into its valid range.
    ///
    /// The generator is decorative and must never fail, so bad input is
    /// pulled back into range instead of being reported.
    pub fn sanitized(&self) -> Self {
        Self {
            node_count: self.node_count.clamp(0, MAX_NODES as i64),
            noise: if self.noise.is_finite() {
                self.noise.clamp(0.0, EXTENT)
            } else {
                0.0
            },
            keep_probability: probability(self.keep_probability),
            k_nearest: self.k_nearest,
            far_edge_probability: probability(self.far_edge_probability),
            decoration_probability: probability(self.decoration_probability),
            decorations: self.decorations,
            spacing: self.spacing,
        }
    }

    /// Node count as a slot count, zero for negative requests and capped at
    /// [`MAX_NODES`].
    pub fn slots(&self) -> usize {
        usize::try_from(self.node_count)
            .unwrap_or(0)
            .min(MAX_NODES)
    }
}

fn probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Finalized output of one generation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircuitGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl CircuitGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn highlighted_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.highlighted)
    }

    pub fn decorated_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.decorated)
    }

    /// SHA-256 digest of the geometry and flags.
    ///
    /// Renderers seed their own per-render randomness from this so that the
    /// same graph always animates the same way unless told otherwise.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for node in &self.nodes {
            hasher.update((node.id as u64).to_le_bytes());
            hasher.update(node.position.x.to_le_bytes());
            hasher.update(node.position.y.to_le_bytes());
            hasher.update([u8::from(node.decorated)]);
        }
        for edge in &self.edges {
            hasher.update((edge.source as u64).to_le_bytes());
            hasher.update((edge.target as u64).to_le_bytes());
            hasher.update([u8::from(edge.highlighted)]);
        }
        hasher.finalize().into()
    }

    /// First eight fingerprint bytes as a seed.
    pub fn seed(&self) -> u64 {
        let fingerprint = self.fingerprint();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&fingerprint[0..8]);
        u64::from_le_bytes(bytes)
    }
}

/// Runs placement, connection and derivation in order.
#[derive(Debug, Clone, Default)]
pub struct CircuitGenerator {
    pub params: LayoutParams,
}

impl CircuitGenerator {
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    pub fn generate(&self, rng: &mut impl RandomSource) -> CircuitGraph {
        let params = self.params.sanitized();
        let span = tracing::debug_span!("generate", node_count = params.node_count);
        let _enter = span.enter();

        let mut nodes = place(
            params.slots(),
            params.noise,
            params.keep_probability,
            params.spacing,
            Decoration::from_params(&params),
            rng,
        );
        debug!(
            requested = params.slots(),
            retained = nodes.len(),
            "placed nodes"
        );

        connect(&mut nodes, params.k_nearest, params.far_edge_probability, rng);
        let edges = derive(&nodes);
        debug!(
            edges = edges.len(),
            highlighted = edges.iter().filter(|e| e.highlighted).count(),
            "derived paths"
        );

        CircuitGraph { nodes, edges }
    }

    /// Generate from a `StdRng` seeded with `seed`.
    pub fn generate_seeded(&self, seed: u64) -> CircuitGraph {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }
}

/// Decoration sampling for a placement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub probability: f64,
    /// When false the draw still happens but the flag is never set.
    pub enabled: bool,
}

impl Decoration {
    pub fn from_params(params: &LayoutParams) -> Self {
        Self {
            probability: params.decoration_probability,
            enabled: params.decorations,
        }
    }
}
