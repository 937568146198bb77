//! Output generators - each turns a finished circuit graph into an artifact.

pub mod board;
pub mod json;
pub mod palette;
pub mod timing;

use crate::circuit::{CircuitGraph, Point, EXTENT};
use serde::{Deserialize, Serialize};

pub use board::{BoardGenerator, BoardStyle};
pub use json::JsonGenerator;
pub use palette::Palette;
pub use timing::{AnimationTiming, Pulse};

/// Trait for all output generators.
pub trait Generator {
    /// Name of this generator style.
    fn name(&self) -> &'static str;

    /// Render the given graph.
    /// Returns the output as a string (SVG, JSON, etc.)
    fn generate(&self, graph: &CircuitGraph) -> String;

    /// File extension for this generator's output.
    fn extension(&self) -> &'static str;
}

/// Pixel dimensions of the rendering surface.
///
/// The graph lives in percent-of-viewport space; only renderers ever see
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    /// Build a viewport, clamping non-finite or non-positive sides to 1px.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: side(width),
            height: side(height),
        }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f64, height as f64)
    }

    /// Scale a normalized point into pixels.
    pub fn to_pixels(&self, point: Point) -> Point {
        Point::new(
            point.x * self.width / EXTENT,
            point.y * self.height / EXTENT,
        )
    }

    /// Pixel length of the shorter side.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

fn side(value: f64) -> f64 {
    if value.is_finite() && value >= 1.0 {
        value
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn scales_percent_space_to_pixels() {
        let viewport = Viewport::new(1920.0, 1080.0);
        assert_eq!(
            viewport.to_pixels(Point::new(50.0, 25.0)),
            Point::new(960.0, 270.0)
        );
        assert_eq!(viewport.to_pixels(Point::new(0.0, 0.0)), Point::new(0.0, 0.0));
        assert_eq!(
            viewport.to_pixels(Point::new(100.0, 100.0)),
            Point::new(1920.0, 1080.0)
        );
    }

    #[rstest]
    #[case(f64::NAN, 600.0, 1.0, 600.0)]
    #[case(-20.0, f64::INFINITY, 1.0, 1.0)]
    #[case(0.0, 0.0, 1.0, 1.0)]
    #[case(800.0, 600.0, 800.0, 600.0)]
    fn clamps_bad_dimensions(
        #[case] width: f64,
        #[case] height: f64,
        #[case] expected_width: f64,
        #[case] expected_height: f64,
    ) {
        let viewport = Viewport::new(width, height);
        assert_eq!(viewport.width, expected_width);
        assert_eq!(viewport.height, expected_height);
    }
}
