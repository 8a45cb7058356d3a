//! Circle Router
//!
//! Converts circles into closed regular polygons the mill can follow as
//! straight routes.
//!
//! The polygon has a fixed [`CIRCLE_SEGMENTS`] edges. Its worst-case
//! deviation from the true circle is the sagitta `r * (1 - cos(pi / n))`,
//! about `0.0031 * r` for 40 edges.

use brdmill_core::{Circle, RoutedCircle};

/// Number of edges each circle is discretized into
pub const CIRCLE_SEGMENTS: usize = 40;

/// Converts circles into routed polygon edges
#[derive(Debug)]
pub struct CircleRouter {
    segments: usize,
}

impl CircleRouter {
    /// Create a router producing [`CIRCLE_SEGMENTS`] edges per circle
    pub fn new() -> Self {
        Self {
            segments: CIRCLE_SEGMENTS,
        }
    }

    /// Maximum distance between the polygon and the circle it replaces
    pub fn max_deviation(&self, radius: f64) -> f64 {
        radius * (1.0 - (std::f64::consts::PI / self.segments as f64).cos())
    }

    /// Discretize one circle
    ///
    /// Edge `i` runs from angle `step * i` to `step * (i + 1)` where
    /// `step = 360 / segments` degrees, starting at angle 0. Edge `i` ends
    /// exactly where edge `(i + 1) % segments` starts.
    pub fn route(&self, circle: &Circle) -> Vec<RoutedCircle> {
        let step = 360.0 / self.segments as f64;

        let points: Vec<(f64, f64)> = (0..self.segments)
            .map(|i| {
                let angle = (step * i as f64).to_radians();
                (
                    circle.x + circle.radius * angle.cos(),
                    circle.y + circle.radius * angle.sin(),
                )
            })
            .collect();

        (0..self.segments)
            .map(|i| {
                let (x1, y1) = points[i];
                let (x2, y2) = points[(i + 1) % self.segments];
                RoutedCircle {
                    x1,
                    y1,
                    x2,
                    y2,
                    width: circle.width,
                    layer: circle.layer,
                }
            })
            .collect()
    }

    /// Discretize every circle, keeping circle order
    pub fn route_all(&self, circles: &[Circle]) -> Vec<RoutedCircle> {
        circles.iter().flat_map(|c| self.route(c)).collect()
    }
}

impl Default for CircleRouter {
    fn default() -> Self {
        Self::new()
    }
}
