//! Count-change overlay
//!
//! A purely presentational second pass that traces full circles gliding from
//! the old layout to the new one whenever the arc count changes. It runs on
//! its own wall-clock lifetime, independent of the canvas reflow it masks;
//! its idle state renders nothing at all.

use std::f64::consts::TAU;

use crate::consts::OVERLAY_TRANSITION_MS;
use crate::palette;
use crate::render::surface::{DrawSurface, Stroke};
use crate::sim::layout::Layout;

/// Stroke width of the overlay circles
const OVERLAY_STROKE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Animating { started_ms: f64, prev_count: usize },
}

/// Presentation-only transition between two ring layouts.
#[derive(Debug, Clone)]
pub struct OverlayTransition {
    state: State,
}

impl Default for OverlayTransition {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayTransition {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Start animating away from a layout of `prev_count` rings.
    pub fn begin(&mut self, now_ms: f64, prev_count: usize) {
        self.state = State::Animating {
            started_ms: now_ms,
            prev_count: prev_count.max(1),
        };
    }

    /// Expire the animation once its lifetime has passed.
    pub fn update(&mut self, now_ms: f64) {
        if let State::Animating { started_ms, .. } = self.state {
            if now_ms - started_ms >= OVERLAY_TRANSITION_MS {
                self.state = State::Idle;
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, State::Animating { .. })
    }

    /// Draw the overlay circles; a no-op while idle.
    pub fn draw(&self, surface: &mut dyn DrawSurface, layout: &Layout, count: usize, now_ms: f64) {
        let State::Animating {
            started_ms,
            prev_count,
        } = self.state
        else {
            return;
        };

        let t = ((now_ms - started_ms) / OVERLAY_TRANSITION_MS).clamp(0.0, 1.0);
        let eased = ease_in_out_cubic(t);

        let old_spacing = layout.spacing(prev_count);
        let old_outermost = layout.initial_radius + old_spacing * (prev_count - 1) as f64;

        for index in 0..count.max(prev_count) {
            let start_radius = if index < prev_count {
                layout.initial_radius + old_spacing * index as f64
            } else {
                // appearing rings depart from the old outermost position
                old_outermost
            };
            // disappearing rings collapse to the center
            let target_radius = if index < count {
                layout.target_radius(index, count)
            } else {
                0.0
            };
            let start_alpha = if index < prev_count { 1.0 } else { 0.0 };
            let target_alpha = if index < count { 1.0 } else { 0.0 };

            let radius = start_radius + (target_radius - start_radius) * eased;
            let alpha = start_alpha + (target_alpha - start_alpha) * eased;
            if radius <= f64::EPSILON || alpha <= f64::EPSILON {
                continue;
            }

            surface.stroke_arc(
                layout.center,
                radius,
                0.0,
                TAU,
                &Stroke {
                    color: palette::color_for(index),
                    alpha,
                    width: OVERLAY_STROKE_WIDTH,
                },
            );
        }
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::recording::{DrawOp, RecordingSurface};

    #[test]
    fn test_idle_renders_nothing() {
        let overlay = OverlayTransition::new();
        let layout = Layout::compute(800.0, 800.0);
        let mut surface = RecordingSurface::new(800.0, 800.0);

        overlay.draw(&mut surface, &layout, 6, 1000.0);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_animating_draws_one_circle_per_ring() {
        let mut overlay = OverlayTransition::new();
        let layout = Layout::compute(800.0, 800.0);
        let mut surface = RecordingSurface::new(800.0, 800.0);

        overlay.begin(1000.0, 6);
        overlay.draw(&mut surface, &layout, 7, 1100.0);
        assert_eq!(
            surface.count(|op| matches!(op, DrawOp::StrokeArc { .. })),
            7
        );
    }

    #[test]
    fn test_expires_back_to_idle() {
        let mut overlay = OverlayTransition::new();
        overlay.begin(1000.0, 6);
        assert!(overlay.is_animating());

        overlay.update(1000.0 + OVERLAY_TRANSITION_MS - 1.0);
        assert!(overlay.is_animating());

        overlay.update(1000.0 + OVERLAY_TRANSITION_MS);
        assert!(!overlay.is_animating());

        // terminal state renders nothing again
        let layout = Layout::compute(800.0, 800.0);
        let mut surface = RecordingSurface::new(800.0, 800.0);
        overlay.draw(&mut surface, &layout, 7, 1000.0 + OVERLAY_TRANSITION_MS);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
    }
}
