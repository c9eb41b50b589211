//! Ring layout geometry
//!
//! All measurements derive from the canvas size each frame, so a resized
//! surface reflows on the very next draw. Radii are evenly spaced between an
//! inner floor and the outer clearance, proportional to 1/count.

use glam::DVec2;

/// Smallest ring radius as a fraction of the layout length
const INITIAL_RADIUS_RATIO: f64 = 0.05;
/// Clearance kept outside the outermost ring, as a fraction of length
const CLEARANCE_RATIO: f64 = 0.03;
/// Moving-dot radius as a fraction of length
const DOT_RADIUS_RATIO: f64 = 0.006;
/// Layout length as a fraction of the smaller canvas dimension
const LENGTH_RATIO: f64 = 0.9;
/// Central impact-axis line length as a fraction of the smaller dimension
const LINE_RATIO: f64 = 0.7;

/// Frame geometry derived from the canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Canvas midpoint
    pub center: DVec2,
    /// Working diameter of the ring stack
    pub length: f64,
    /// Radius of the innermost ring
    pub initial_radius: f64,
    /// Space reserved beyond the outermost ring
    pub clearance: f64,
    /// Radius of the moving dots
    pub dot_radius: f64,
    /// Length of the central impact-axis line
    pub line_length: f64,
}

impl Layout {
    /// Compute the layout for a canvas of `width` x `height`.
    pub fn compute(width: f64, height: f64) -> Self {
        let min_dim = width.min(height);
        let length = min_dim * LENGTH_RATIO;
        Self {
            center: DVec2::new(width / 2.0, height / 2.0),
            length,
            initial_radius: length * INITIAL_RADIUS_RATIO,
            clearance: length * CLEARANCE_RATIO,
            dot_radius: length * DOT_RADIUS_RATIO,
            line_length: min_dim * LINE_RATIO,
        }
    }

    /// Radial gap between adjacent rings for a population of `count`.
    pub fn spacing(&self, count: usize) -> f64 {
        (self.length - self.initial_radius - self.clearance) / 2.0 / count.max(1) as f64
    }

    /// Radius the arc at `index` should occupy in a population of `count`.
    pub fn target_radius(&self, index: usize, count: usize) -> f64 {
        self.initial_radius + self.spacing(count) * index as f64
    }
}
