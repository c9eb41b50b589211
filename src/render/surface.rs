//! Drawing surface abstraction
//!
//! The simulation never owns a canvas: each frame it issues immediate-mode
//! draw calls against whatever implements [`DrawSurface`]. The browser build
//! backs this with a 2D canvas context; tests record the calls instead.

use glam::DVec2;

use crate::palette::Color;

/// Stroke styling for lines and ring arcs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub alpha: f64,
    pub width: f64,
}

/// Fill styling for plain dots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Color,
    pub alpha: f64,
}

/// Fill styling for glow halos: a two-stop radial gradient plus shadow blur
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowFill {
    /// Gradient color at the halo center
    pub inner: Color,
    /// Gradient color at the halo edge
    pub outer: Color,
    /// Radius over which the gradient runs
    pub gradient_radius: f64,
    pub alpha: f64,
    pub shadow_blur: f64,
    pub shadow_color: Color,
}

/// A 2D immediate-mode drawing target.
///
/// Implementations hold no frame-to-frame state on behalf of the caller;
/// every frame is a full clear-and-redraw.
pub trait DrawSurface {
    /// Current drawable size in pixels
    fn size(&self) -> (f64, f64);
    /// Erase the whole surface
    fn clear(&mut self);
    /// Straight line segment
    fn line(&mut self, from: DVec2, to: DVec2, stroke: &Stroke);
    /// Circular arc from `start_angle` to `end_angle` (radians, clockwise)
    fn stroke_arc(
        &mut self,
        center: DVec2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        stroke: &Stroke,
    );
    /// Filled circle
    fn fill_circle(&mut self, center: DVec2, radius: f64, fill: &Fill);
    /// Filled circle rendered as a glow halo
    fn fill_circle_glow(&mut self, center: DVec2, radius: f64, glow: &GlowFill);
}

#[cfg(test)]
pub mod recording {
    //! A surface that records draw calls for assertions.

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        Clear,
        Line { from: DVec2, to: DVec2, stroke: Stroke },
        StrokeArc { center: DVec2, radius: f64, stroke: Stroke },
        FillCircle { center: DVec2, radius: f64, fill: Fill },
        GlowCircle { center: DVec2, radius: f64, glow: GlowFill },
    }

    #[derive(Debug, Clone)]
    pub struct RecordingSurface {
        pub width: f64,
        pub height: f64,
        pub ops: Vec<DrawOp>,
    }

    impl RecordingSurface {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                width,
                height,
                ops: Vec::new(),
            }
        }

        pub fn count<F: Fn(&DrawOp) -> bool>(&self, pred: F) -> usize {
            self.ops.iter().filter(|op| pred(op)).count()
        }
    }

    impl DrawSurface for RecordingSurface {
        fn size(&self) -> (f64, f64) {
            (self.width, self.height)
        }

        fn clear(&mut self) {
            self.ops.push(DrawOp::Clear);
        }

        fn line(&mut self, from: DVec2, to: DVec2, stroke: &Stroke) {
            self.ops.push(DrawOp::Line {
                from,
                to,
                stroke: *stroke,
            });
        }

        fn stroke_arc(
            &mut self,
            center: DVec2,
            radius: f64,
            _start_angle: f64,
            _end_angle: f64,
            stroke: &Stroke,
        ) {
            self.ops.push(DrawOp::StrokeArc {
                center,
                radius,
                stroke: *stroke,
            });
        }

        fn fill_circle(&mut self, center: DVec2, radius: f64, fill: &Fill) {
            self.ops.push(DrawOp::FillCircle {
                center,
                radius,
                fill: *fill,
            });
        }

        fn fill_circle_glow(&mut self, center: DVec2, radius: f64, glow: &GlowFill) {
            self.ops.push(DrawOp::GlowCircle {
                center,
                radius,
                glow: *glow,
            });
        }
    }
}
