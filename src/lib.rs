//! Circuitry - procedural circuit-board graphs.
//!
//! Nodes are scattered over a jittered grid, linked to their nearest
//! neighbours (plus the odd long-range highlighted link), and each link is
//! turned into an orthogonal trace ready for rendering. Everything lives in
//! a normalized `[0,100]x[0,100]` space; generators scale it to pixels.

pub mod circuit;
pub mod config;
pub mod generators;
pub mod random;

pub use circuit::{CircuitGenerator, CircuitGraph, Edge, LayoutParams, Node};
pub use config::CircuitryConfig;
pub use generators::Generator;
pub use random::RandomSource;
