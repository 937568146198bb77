//! Circuit board SVG generator.
//!
//! Draws each edge as an orthogonal trace through its elbow column, nodes as
//! glowing pads and decorated nodes as small chips. The animated style
//! staggers reveals by element id and sends a pulse along every highlighted
//! trace.

use crate::circuit::{CircuitGraph, Edge, Node, Point, EXTENT};
use crate::generators::palette::Palette;
use crate::generators::timing::{AnimationTiming, Pulse};
use crate::generators::{Generator, Viewport};
use crate::random::RandomSource;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Reveal duration for a single element, in seconds.
const REVEAL: f64 = 0.8;

/// Pins drawn along each long side of a chip.
const CHIP_PINS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardStyle {
    /// Fully drawn, no animation.
    Static,
    /// Staggered reveal plus travelling pulses.
    #[default]
    Animated,
}

#[derive(Debug, Clone)]
pub struct BoardGenerator {
    pub viewport: Viewport,
    pub style: BoardStyle,
    pub palette: Palette,
    pub timing: AnimationTiming,
    /// Seed for pulse timings; defaults to the graph's own seed.
    pub pulse_seed: Option<u64>,
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            style: BoardStyle::Animated,
            palette: Palette::default(),
            timing: AnimationTiming::default(),
            pulse_seed: None,
        }
    }
}

impl BoardGenerator {
    pub fn new(viewport: Viewport, style: BoardStyle) -> Self {
        Self {
            viewport,
            style,
            ..Self::default()
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_timing(mut self, timing: AnimationTiming) -> Self {
        self.timing = timing.sanitized();
        self
    }

    pub fn with_pulse_seed(mut self, seed: u64) -> Self {
        self.pulse_seed = Some(seed);
        self
    }

    /// Stroke scale relative to an 800px reference side.
    fn scale(&self) -> f64 {
        self.viewport.min_side() / 800.0
    }

    fn animated(&self) -> bool {
        self.style == BoardStyle::Animated
    }

    /// Pixel-space corners of an edge's trace.
    fn trace_points(&self, edge: &Edge) -> [Point; 4] {
        edge.polyline().map(|p| self.viewport.to_pixels(p))
    }

    fn trace_path(points: &[Point; 4]) -> String {
        let [a, b, c, d] = points;
        format!(
            "M {:.1} {:.1} L {:.1} {:.1} L {:.1} {:.1} L {:.1} {:.1}",
            a.x, a.y, b.x, b.y, c.x, c.y, d.x, d.y
        )
    }

    fn trace_length(&self, edge: &Edge) -> f64 {
        edge.scaled_length(self.viewport.width / EXTENT, self.viewport.height / EXTENT)
    }

    /// Draw every edge as an orthogonal trace.
    ///
    /// Highlighted traces get the highlight colour and the edge glow. In the
    /// animated style each trace draws itself in after `edge_delay(id)` and
    /// highlighted ones carry a pulse.
    fn draw_edges(&self, graph: &CircuitGraph, rng: &mut impl RandomSource) -> Vec<String> {
        let scale = self.scale();

        graph
            .edges
            .iter()
            .map(|edge| {
                let points = self.trace_points(edge);
                let d = Self::trace_path(&points);
                let (stroke, width, opacity, filter) = if edge.highlighted {
                    (&self.palette.highlight, 1.6 * scale, 0.85, r#" filter="url(#edgeGlow)""#)
                } else {
                    (&self.palette.trace, 1.0 * scale, 0.55, "")
                };

                if !self.animated() {
                    return format!(
                        r#"<path id="trace_{}" d="{}" fill="none" stroke="{}" stroke-width="{:.2}" opacity="{:.2}" stroke-linejoin="round"{}/>"#,
                        edge.id, d, stroke, width, opacity, filter
                    );
                }

                let length = self.trace_length(edge).max(1.0);
                let delay = self.timing.edge_delay(edge.id);
                let mut out = format!(
                    r#"<path id="trace_{}" d="{}" fill="none" stroke="{}" stroke-width="{:.2}" opacity="{:.2}" stroke-linejoin="round" stroke-dasharray="{:.1}" stroke-dashoffset="{:.1}"{}>
  <animate attributeName="stroke-dashoffset" from="{:.1}" to="0" begin="{:.2}s" dur="{:.2}s" fill="freeze"/>
</path>"#,
                    edge.id, d, stroke, width, opacity, length, length, filter, length, delay, REVEAL * 2.0
                );

                if edge.highlighted {
                    let pulse = self.timing.pulse(rng);
                    out.push('\n');
                    out.push_str(&self.draw_pulse(edge, &d, delay + REVEAL * 2.0, pulse));
                }
                out
            })
            .collect()
    }

    /// A glowing dot that travels the trace, then rests for the repeat delay.
    fn draw_pulse(&self, edge: &Edge, d: &str, begin: f64, pulse: Pulse) -> String {
        let scale = self.scale();
        let period = pulse.period();
        let travel = pulse.travel_fraction();
        format!(
            r#"<circle id="pulse_{}" r="{:.1}" fill="url(#pulseGrad)" filter="url(#edgeGlow)" opacity="0">
  <animateMotion path="{}" begin="{:.2}s" dur="{:.2}s" repeatCount="indefinite" calcMode="linear" keyPoints="0;1;1" keyTimes="0;{:.3};1"/>
  <animate attributeName="opacity" values="0;1;1;0;0" keyTimes="0;{:.3};{:.3};{:.3};1" begin="{:.2}s" dur="{:.2}s" repeatCount="indefinite"/>
</circle>"#,
            edge.id,
            3.0 * scale,
            d,
            begin,
            period,
            travel,
            travel * 0.1,
            travel * 0.9,
            travel,
            begin,
            period
        )
    }

    /// Draw nodes as pads, with a chip on every decorated node.
    fn draw_nodes(&self, graph: &CircuitGraph) -> Vec<String> {
        let scale = self.scale();

        graph
            .nodes
            .iter()
            .flat_map(|node| {
                let center = self.viewport.to_pixels(node.position);
                let radius = 2.5 * scale;
                let mut elements = Vec::new();

                elements.push(format!(
                    r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="url(#padGlow)"/>"#,
                    center.x,
                    center.y,
                    radius * 4.0
                ));

                if self.animated() {
                    let delay = self.timing.node_delay(node.id);
                    elements.push(format!(
                        r#"<circle id="pad_{}" cx="{:.1}" cy="{:.1}" r="0" fill="{}" filter="url(#softGlow)">
  <animate attributeName="r" from="0" to="{:.1}" begin="{:.2}s" dur="{:.2}s" fill="freeze"/>
</circle>"#,
                        node.id, center.x, center.y, self.palette.pad, radius, delay, REVEAL
                    ));
                } else {
                    elements.push(format!(
                        r#"<circle id="pad_{}" cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" filter="url(#softGlow)"/>"#,
                        node.id, center.x, center.y, radius, self.palette.pad
                    ));
                }

                if node.decorated {
                    elements.push(self.draw_chip(node, center));
                }
                elements
            })
            .collect()
    }

    /// A chip body with pins on its top and bottom edges.
    fn draw_chip(&self, node: &Node, center: Point) -> String {
        let scale = self.scale();
        let w = 16.0 * scale;
        let h = 10.0 * scale;
        let pin = 3.0 * scale;
        let left = center.x - w / 2.0;
        let top = center.y - h / 2.0;

        let mut parts = vec![format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{:.1}" fill="{}" stroke="{}" stroke-width="{:.2}"/>"#,
            left,
            top,
            w,
            h,
            1.5 * scale,
            self.palette.chip,
            self.palette.pad,
            0.8 * scale
        )];
        for i in 0..CHIP_PINS {
            let x = left + w * (i + 1) as f64 / (CHIP_PINS + 1) as f64;
            for (y1, y2) in [(top, top - pin), (top + h, top + h + pin)] {
                parts.push(format!(
                    r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.2}"/>"#,
                    x,
                    y1,
                    x,
                    y2,
                    self.palette.pad,
                    0.8 * scale
                ));
            }
        }

        let body = parts.join("\n  ");
        if self.animated() {
            let delay = self.timing.node_delay(node.id) + REVEAL / 2.0;
            format!(
                r#"<g id="chip_{}" opacity="0">
  {}
  <animate attributeName="opacity" from="0" to="1" begin="{:.2}s" dur="{:.2}s" fill="freeze"/>
</g>"#,
                node.id, body, delay, REVEAL
            )
        } else {
            format!(
                r#"<g id="chip_{}">
  {}
</g>"#,
                node.id, body
            )
        }
    }

    /// SVG filter and gradient definitions for glows and pulses.
    fn generate_defs(&self) -> String {
        let scale = self.scale();
        let mut defs = String::from("<defs>\n");

        // Soft glow filter - node pads
        defs.push_str(&format!(
            r#"  <filter id="softGlow" x="-100%" y="-100%" width="300%" height="300%">
    <feGaussianBlur in="SourceGraphic" stdDeviation="{:.1}" result="blur"/>
    <feMerge>
      <feMergeNode in="blur"/>
      <feMergeNode in="SourceGraphic"/>
    </feMerge>
  </filter>
"#,
            2.0 * scale
        ));

        // Edge glow filter - highlighted traces and pulses
        defs.push_str(&format!(
            r#"  <filter id="edgeGlow" x="-50%" y="-50%" width="200%" height="200%">
    <feGaussianBlur in="SourceGraphic" stdDeviation="{:.1}" result="blur"/>
    <feMerge>
      <feMergeNode in="blur"/>
      <feMergeNode in="blur"/>
      <feMergeNode in="SourceGraphic"/>
    </feMerge>
  </filter>
"#,
            3.0 * scale
        ));

        defs.push_str(&format!(
            r##"  <radialGradient id="padGlow">
    <stop offset="0%" stop-color="{}" stop-opacity="0.35"/>
    <stop offset="100%" stop-color="{}" stop-opacity="0"/>
  </radialGradient>
  <radialGradient id="pulseGrad">
    <stop offset="0%" stop-color="#ffffff"/>
    <stop offset="50%" stop-color="{}"/>
    <stop offset="100%" stop-color="{}" stop-opacity="0"/>
  </radialGradient>
  <linearGradient id="backdrop" x1="0%" y1="0%" x2="100%" y2="100%">
    <stop offset="0%" stop-color="{}"/>
    <stop offset="50%" stop-color="{}" stop-opacity="0.85"/>
    <stop offset="100%" stop-color="{}"/>
  </linearGradient>
"##,
            self.palette.pad,
            self.palette.pad,
            self.palette.highlight,
            self.palette.highlight,
            self.palette.background,
            self.palette.chip,
            self.palette.background
        ));

        defs.push_str("</defs>");
        defs
    }

    fn wrap_svg(&self, defs: &str, content: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.0} {:.0}" width="{:.0}" height="{:.0}">
  {}
  <!-- Background -->
  <rect width="100%" height="100%" fill="{}"/>
  <rect width="100%" height="100%" fill="url(#backdrop)"/>
  <!-- Circuit -->
  {}
</svg>"#,
            self.viewport.width,
            self.viewport.height,
            self.viewport.width,
            self.viewport.height,
            defs,
            self.palette.background,
            content
        )
    }
}

impl Generator for BoardGenerator {
    fn name(&self) -> &'static str {
        match self.style {
            BoardStyle::Static => "board_static",
            BoardStyle::Animated => "board_animated",
        }
    }

    fn generate(&self, graph: &CircuitGraph) -> String {
        let seed = self.pulse_seed.unwrap_or_else(|| graph.seed());
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

        let defs = self.generate_defs();
        let edges = self.draw_edges(graph, &mut rng);
        let nodes = self.draw_nodes(graph);

        self.wrap_svg(
            &defs,
            &format!("{}\n{}", edges.join("\n"), nodes.join("\n")),
        )
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{derive, CircuitGenerator, LayoutParams, Neighbor};
    use rstest::rstest;

    fn graph(far: f64) -> CircuitGraph {
        CircuitGenerator::new(LayoutParams {
            node_count: 16,
            keep_probability: 1.0,
            far_edge_probability: far,
            decoration_probability: 1.0,
            ..LayoutParams::default()
        })
        .generate_seeded(8)
    }

    #[rstest]
    #[case(BoardStyle::Static, "board_static")]
    #[case(BoardStyle::Animated, "board_animated")]
    fn names_follow_style(#[case] style: BoardStyle, #[case] name: &str) {
        let gen = BoardGenerator::new(Viewport::default(), style);
        assert_eq!(gen.name(), name);
        assert_eq!(gen.extension(), "svg");
    }

    #[test]
    fn reveal_dash_matches_pixel_trace_length() {
        let nodes = vec![
            Node {
                id: 0,
                position: Point::new(10.0, 15.0),
                decorated: false,
                neighbors: vec![Neighbor {
                    target: 1,
                    highlighted: false,
                }],
            },
            Node {
                id: 1,
                position: Point::new(30.0, 70.0),
                decorated: false,
                neighbors: vec![],
            },
        ];
        let edges = derive(&nodes);
        let graph = CircuitGraph { nodes, edges };
        let svg = BoardGenerator::new(Viewport::new(800.0, 600.0), BoardStyle::Animated)
            .generate(&graph);
        assert!(svg.contains(r#"stroke-dasharray="490.0" stroke-dashoffset="490.0""#));
        assert!(svg.contains(r#"from="490.0""#));
    }

    #[test]
    fn draws_one_trace_per_edge() {
        let graph = graph(0.0);
        let svg = BoardGenerator::new(Viewport::new(800.0, 600.0), BoardStyle::Static).generate(&graph);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
        assert_eq!(svg.matches("<path id=\"trace_").count(), graph.edges.len());
        assert_eq!(svg.matches("<g id=\"chip_").count(), graph.decorated_nodes().count());
        assert!(!svg.contains("<animate"));
    }

    #[test]
    fn traces_are_orthogonal_in_pixels() {
        let graph = graph(0.0);
        let gen = BoardGenerator::new(Viewport::new(1000.0, 500.0), BoardStyle::Static);
        let edge = &graph.edges[0];
        let [a, b, c, d] = gen.trace_points(edge);
        assert_eq!(a.y, b.y);
        assert_eq!(b.x, c.x);
        assert_eq!(c.y, d.y);
        assert_eq!(b.x, gen.viewport.to_pixels(Point::new(edge.mid_x, 0.0)).x);
    }

    #[test]
    fn animated_pulses_only_on_highlighted_edges() {
        let graph = graph(1.0);
        let svg = BoardGenerator::new(Viewport::default(), BoardStyle::Animated).generate(&graph);
        assert_eq!(svg.matches("<circle id=\"pulse_").count(), graph.highlighted_edges().count());
        assert_eq!(svg.matches("<animateMotion").count(), graph.highlighted_edges().count());
    }

    #[test]
    fn reveal_delays_follow_ids() {
        let graph = graph(0.0);
        let timing = AnimationTiming {
            edge_step: 0.5,
            node_step: 0.25,
            ..AnimationTiming::default()
        };
        let svg = BoardGenerator::new(Viewport::default(), BoardStyle::Animated)
            .with_timing(timing)
            .generate(&graph);
        assert!(svg.contains(r#"begin="1.50s""#));
        assert!(svg.contains(r#"begin="0.75s""#));
    }

    #[test]
    fn pulse_seed_controls_timings() {
        let graph = graph(1.0);
        let base = BoardGenerator::new(Viewport::default(), BoardStyle::Animated);
        let a = base.clone().generate(&graph);
        let b = base.clone().generate(&graph);
        let c = base.with_pulse_seed(12345).generate(&graph);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn empty_graph_still_renders() {
        let svg = BoardGenerator::default().generate(&CircuitGraph::default());
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("trace_"));
    }
}
