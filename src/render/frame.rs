//! Per-frame drawing pass
//!
//! Reads simulation state and issues draw calls; all state mutation happens
//! in the sim step beforehand. The one piece of state kept here is the
//! layout-wide reflow transition that masks ring repositioning whenever the
//! arc count changes.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use crate::consts::{LAYOUT_TRANSITION_MS, PULSE_WINDOW_MS};
use crate::palette::CENTRAL_LINE_COLOR;
use crate::position_on_circle;
use crate::render::surface::{DrawSurface, Fill, GlowFill, Stroke};
use crate::sim::kinematics;
use crate::sim::layout::Layout;
use crate::sim::population::Population;

/// Central line opacity
const LINE_ALPHA: f64 = 0.3;
/// Ring pulse opacity range
const RING_ALPHA_BASE: f64 = 0.15;
const RING_ALPHA_MAX: f64 = 0.65;
/// Impact point pulse opacity range
const POINT_ALPHA_BASE: f64 = 0.15;
const POINT_ALPHA_MAX: f64 = 0.85;

/// Reflow ease: sine in/out with a small elastic bump near the end.
///
/// Only evaluated for t in [0, 1); completion snaps rather than easing.
fn ease_reflow(t: f64) -> f64 {
    let mut progress = -((PI * t).cos() - 1.0) / 2.0;
    if t > 0.8 {
        progress += 2.0_f64.powf(-10.0 * (t - 1.0)) * ((t - 0.9) * 5.0 * PI).sin() * 0.05;
    }
    progress
}

/// Post-impact opacity pulse, decaying from `max` back to `base` over the
/// pulse window. Disabled pulsing pins the value at `base`.
fn pulse(now_ms: f64, last_impact_ms: f64, base: f64, max: f64, enabled: bool) -> f64 {
    if !enabled {
        return base;
    }
    let pct = ((now_ms - last_impact_ms) / PULSE_WINDOW_MS).clamp(0.0, 1.0);
    max - (max - base) * pct
}

/// Interpolates every ring from its pre-change radius to the new layout while
/// a count change settles.
#[derive(Debug, Clone, Default)]
struct LayoutTransition {
    started_ms: Option<f64>,
    /// Snapshot of the pre-change layout
    prev_count: usize,
    prev_initial_radius: f64,
    prev_spacing: f64,
    /// Eased progress of the running transition
    eased: f64,
}

impl LayoutTransition {
    /// Snapshot the outgoing layout once, at the moment the count changes.
    fn begin(&mut self, now_ms: f64, layout: &Layout, prev_count: usize) {
        self.started_ms = Some(now_ms);
        self.prev_count = prev_count.max(1);
        self.prev_initial_radius = layout.initial_radius;
        self.prev_spacing = layout.spacing(prev_count);
        self.eased = 0.0;
    }

    fn update(&mut self, now_ms: f64) {
        let Some(started_ms) = self.started_ms else {
            return;
        };
        let linear = (now_ms - started_ms) / LAYOUT_TRANSITION_MS;
        if linear >= 1.0 {
            self.started_ms = None;
            self.eased = 1.0;
        } else {
            self.eased = ease_reflow(linear.max(0.0));
        }
    }

    fn active(&self) -> bool {
        self.started_ms.is_some()
    }

    /// Radius to draw the arc at `index` this frame. Rings that existed
    /// before the change start from their old position; a freshly added ring
    /// starts where the old outermost one sat.
    fn display_radius(&self, index: usize, target: f64, settled: f64) -> f64 {
        if !self.active() {
            return settled;
        }
        let old_index = index.min(self.prev_count - 1);
        let old = self.prev_initial_radius + self.prev_spacing * old_index as f64;
        old + (target - old) * self.eased
    }
}

/// Stateful frame renderer for the main canvas.
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    transition: LayoutTransition,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note an arc-count change; the outgoing layout is captured once.
    pub fn begin_reflow(&mut self, now_ms: f64, layout: &Layout, prev_count: usize) {
        self.transition.begin(now_ms, layout, prev_count);
    }

    /// Draw one full frame: central line, rings, impact points, glows, dots.
    pub fn draw(
        &mut self,
        surface: &mut dyn DrawSurface,
        population: &Population,
        layout: &Layout,
        now_ms: f64,
        pulse_enabled: bool,
    ) {
        surface.clear();
        self.transition.update(now_ms);

        let half_line = DVec2::new(layout.line_length / 2.0, 0.0);
        surface.line(
            layout.center - half_line,
            layout.center + half_line,
            &Stroke {
                color: CENTRAL_LINE_COLOR,
                alpha: LINE_ALPHA,
                width: layout.line_length * 0.001,
            },
        );

        let elapsed = population.elapsed_secs(now_ms);
        let count = population.len();

        for (index, arc) in population.arcs().iter().enumerate() {
            let target = layout.target_radius(index, count);
            let radius = self
                .transition
                .display_radius(index, target, arc.current_radius);
            if radius <= f64::EPSILON {
                continue;
            }

            // ring halves, leaving a dot-sized gap on the impact axis
            let ring_alpha = arc.opacity
                * pulse(
                    now_ms,
                    arc.last_impact_ms,
                    RING_ALPHA_BASE,
                    RING_ALPHA_MAX,
                    pulse_enabled,
                );
            let ring_stroke = Stroke {
                color: arc.color,
                alpha: ring_alpha,
                width: layout.length * 0.002,
            };
            let gap = layout.dot_radius * (5.0 / 3.0) / radius;
            surface.stroke_arc(layout.center, radius, PI + gap, TAU - gap, &ring_stroke);
            surface.stroke_arc(layout.center, radius, gap, PI - gap, &ring_stroke);

            // fixed impact points on either side
            let point_alpha = arc.opacity
                * pulse(
                    now_ms,
                    arc.last_impact_ms,
                    POINT_ALPHA_BASE,
                    POINT_ALPHA_MAX,
                    pulse_enabled,
                );
            let point_fill = Fill {
                color: arc.color,
                alpha: point_alpha,
            };
            let point_radius = layout.dot_radius * 0.75;
            surface.fill_circle(
                position_on_circle(layout.center, radius, PI),
                point_radius,
                &point_fill,
            );
            surface.fill_circle(
                position_on_circle(layout.center, radius, TAU),
                point_radius,
                &point_fill,
            );

            let angle = kinematics::angular_position(arc.velocity, elapsed);
            let dot_pos = position_on_circle(layout.center, radius, angle);

            if let (Some(glow), Some(fade)) = (arc.glow, arc.glow_fade(now_ms)) {
                let gradient_radius = layout.dot_radius * 10.0 * fade;
                surface.fill_circle_glow(
                    dot_pos,
                    layout.dot_radius * (3.0 + fade * 2.0),
                    &GlowFill {
                        inner: glow.color_a,
                        outer: glow.color_b,
                        gradient_radius,
                        alpha: arc.opacity * 0.3 * fade,
                        shadow_blur: 20.0,
                        shadow_color: glow.color_a,
                    },
                );
                surface.fill_circle_glow(
                    dot_pos,
                    layout.dot_radius * (2.0 + fade),
                    &GlowFill {
                        inner: glow.color_a,
                        outer: glow.color_b,
                        gradient_radius,
                        alpha: arc.opacity * 0.5 * fade,
                        shadow_blur: 15.0,
                        shadow_color: glow.color_a,
                    },
                );
            }

            surface.fill_circle(
                dot_pos,
                layout.dot_radius,
                &Fill {
                    color: arc.color,
                    alpha: arc.opacity,
                },
            );
        }
    }
}
