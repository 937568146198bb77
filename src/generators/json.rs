//! JSON export of the node/edge contract.
//!
//! Coordinates stay in normalized `[0,100]` space; scaling to pixels is
//! left to whichever surface reads the file.

use crate::circuit::{CircuitGraph, Point};
use crate::generators::Generator;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub has_decoration: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub id: usize,
    pub source: usize,
    pub target: usize,
    pub start: Point,
    pub end: Point,
    pub mid_x: f64,
    pub is_highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl From<&CircuitGraph> for GraphRecord {
    fn from(graph: &CircuitGraph) -> Self {
        Self {
            nodes: graph
                .nodes
                .iter()
                .map(|n| NodeRecord {
                    id: n.id,
                    x: n.position.x,
                    y: n.position.y,
                    has_decoration: n.decorated,
                })
                .collect(),
            edges: graph
                .edges
                .iter()
                .map(|e| EdgeRecord {
                    id: e.id,
                    source: e.source,
                    target: e.target,
                    start: e.start,
                    end: e.end,
                    mid_x: e.mid_x,
                    is_highlighted: e.highlighted,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGenerator {
    pub pretty: bool,
}

impl JsonGenerator {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn to_json(&self, graph: &CircuitGraph) -> serde_json::Result<String> {
        let record = GraphRecord::from(graph);
        if self.pretty {
            serde_json::to_string_pretty(&record)
        } else {
            serde_json::to_string(&record)
        }
    }
}

impl Generator for JsonGenerator {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, graph: &CircuitGraph) -> String {
        self.to_json(graph).unwrap_or_else(|err| {
            warn!(%err, "failed to encode graph");
            String::from(r#"{"nodes":[],"edges":[]}"#)
        })
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{CircuitGenerator, LayoutParams};
    use serde_json::Value;

    fn sample() -> CircuitGraph {
        CircuitGenerator::new(LayoutParams {
            node_count: 9,
            keep_probability: 1.0,
            far_edge_probability: 0.5,
            ..LayoutParams::default()
        })
        .generate_seeded(21)
    }

    #[test]
    fn uses_consumer_field_names() {
        let json = JsonGenerator::default().generate(&sample());
        let value: Value = serde_json::from_str(&json).unwrap();
        let node = &value["nodes"][0];
        assert!(node.get("hasDecoration").is_some());
        assert!(node.get("x").is_some());
        let edge = &value["edges"][0];
        assert!(edge.get("midX").is_some());
        assert!(edge.get("isHighlighted").is_some());
        assert!(edge["start"].get("x").is_some());
    }

    #[test]
    fn record_matches_graph() {
        let graph = sample();
        let json = JsonGenerator::new(true).generate(&graph);
        let record: GraphRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.nodes.len(), graph.nodes.len());
        assert_eq!(record.edges.len(), graph.edges.len());
        for (record, edge) in record.edges.iter().zip(&graph.edges) {
            assert_eq!(record.id, edge.id);
            assert_eq!((record.source, record.target), (edge.source, edge.target));
            assert_eq!(record.is_highlighted, edge.highlighted);
        }
    }

    #[test]
    fn empty_graph_encodes() {
        let json = JsonGenerator::default().generate(&CircuitGraph::default());
        assert_eq!(json, r#"{"nodes":[],"edges":[]}"#);
    }
}
