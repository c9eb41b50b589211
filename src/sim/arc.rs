//! Arc entity and its per-frame animation state
//!
//! Each concentric ring is one `Arc`. Entrance fade and radius reflow are
//! modeled as explicit state machines so a settled arc cannot re-enter an
//! animation by accident; opacity and radius are always defined either way.

use crate::consts::{ENTRANCE_FADE_MS, GLOW_WINDOW_MS, RADIUS_EASE_MS};
use crate::palette::Color;
use crate::sim::kinematics;

/// Entrance fade-in: one-shot, irreversible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntranceState {
    /// Opacity ramping 0 → 1 with a cubic ease-in
    FadingIn { started_ms: f64, duration_ms: f64 },
    /// Fade complete, opacity frozen at 1
    Settled,
}

/// Radius reflow easing toward `target_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusState {
    /// Easing from wherever the radius currently is toward the target
    Easing { started_ms: f64, duration_ms: f64 },
    /// Radius at rest on the target
    Settled,
}

/// Transient post-impact emissive state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color_a: Color,
    pub color_b: Color,
    pub at_ms: f64,
}

/// One concentric ring with a moving dot.
#[derive(Debug, Clone)]
pub struct Arc {
    /// Display color
    pub color: Color,
    /// Fixed angular speed (radians/second), set at creation
    pub velocity: f64,
    /// Most recent confirmed impact (ms since epoch, 0 = never)
    pub last_impact_ms: f64,
    /// Predicted next impact (ms since epoch)
    pub next_impact_ms: f64,
    /// Whole rotations already evaluated for growth; never decreases
    pub last_checked_rotation: u64,
    /// Entrance fade sub-state
    pub entrance: EntranceState,
    /// Current entrance-fade opacity in [0, 1]
    pub opacity: f64,
    /// Radius reflow sub-state
    pub radius: RadiusState,
    /// Displayed radius, updated by the reflow ease
    pub current_radius: f64,
    /// Radius the layout wants this arc at
    pub target_radius: f64,
    /// Post-impact glow, ignored once faded out
    pub glow: Option<Glow>,
}

impl Arc {
    /// Create an arc.
    ///
    /// `impact_seed_ms` seeds the first impact prediction (the session start
    /// for initial arcs, the admission time for grown ones). When `animate`
    /// is false the arc appears fully opaque with no entrance fade. A radius
    /// ease starts only when `initial_radius` differs from `target_radius`.
    pub fn new(
        color: Color,
        velocity: f64,
        impact_seed_ms: f64,
        now_ms: f64,
        animate: bool,
        initial_radius: f64,
        target_radius: f64,
    ) -> Self {
        let resizing = (initial_radius - target_radius).abs() > f64::EPSILON;
        Self {
            color,
            velocity,
            last_impact_ms: 0.0,
            next_impact_ms: kinematics::next_impact_time_ms(impact_seed_ms, velocity),
            last_checked_rotation: 0,
            entrance: if animate {
                EntranceState::FadingIn {
                    started_ms: now_ms,
                    duration_ms: ENTRANCE_FADE_MS,
                }
            } else {
                EntranceState::Settled
            },
            opacity: if animate { 0.0 } else { 1.0 },
            radius: if resizing {
                RadiusState::Easing {
                    started_ms: now_ms,
                    duration_ms: RADIUS_EASE_MS,
                }
            } else {
                RadiusState::Settled
            },
            current_radius: initial_radius,
            target_radius,
            glow: None,
        }
    }

    /// Whether the entrance fade is still running.
    #[inline]
    pub fn fading_in(&self) -> bool {
        matches!(self.entrance, EntranceState::FadingIn { .. })
    }

    /// Whether a radius ease is still running.
    #[inline]
    pub fn resizing(&self) -> bool {
        matches!(self.radius, RadiusState::Easing { .. })
    }

    /// Advance both animation machines. Call exactly once per frame: the
    /// radius ease moves from the *current* radius each step, so double
    /// application within one frame would drift.
    pub fn step_animation(&mut self, now_ms: f64) {
        if let EntranceState::FadingIn {
            started_ms,
            duration_ms,
        } = self.entrance
        {
            let elapsed = now_ms - started_ms;
            if elapsed >= duration_ms {
                self.entrance = EntranceState::Settled;
                self.opacity = 1.0;
            } else {
                let progress = (elapsed / duration_ms).max(0.0);
                self.opacity = progress * progress * progress;
            }
        }

        if let RadiusState::Easing {
            started_ms,
            duration_ms,
        } = self.radius
        {
            let elapsed = now_ms - started_ms;
            if elapsed >= duration_ms {
                self.radius = RadiusState::Settled;
                self.current_radius = self.target_radius;
            } else {
                let progress = (elapsed / duration_ms).clamp(0.0, 1.0);
                let eased = 1.0 - (1.0 - progress).powi(3);
                self.current_radius += (self.target_radius - self.current_radius) * eased;
            }
        }
    }

    /// Retarget the radius with an animated ease from the current value.
    pub fn begin_resize(&mut self, target_radius: f64, now_ms: f64) {
        self.target_radius = target_radius;
        if (self.current_radius - target_radius).abs() > f64::EPSILON {
            self.radius = RadiusState::Easing {
                started_ms: now_ms,
                duration_ms: RADIUS_EASE_MS,
            };
        } else {
            self.radius = RadiusState::Settled;
        }
    }

    /// Jump straight to the target radius with no animation.
    pub fn snap_radius(&mut self, target_radius: f64) {
        self.current_radius = target_radius;
        self.target_radius = target_radius;
        self.radius = RadiusState::Settled;
    }

    /// Record a confirmed impact and reseed the next prediction.
    pub fn register_impact(&mut self, now_ms: f64) {
        self.last_impact_ms = now_ms;
        self.next_impact_ms = kinematics::next_impact_time_ms(now_ms, self.velocity);
    }

    /// Glow fade factor in (0, 1], or `None` once the glow has expired.
    ///
    /// Expired glow state stays on the arc; this gate is what retires it.
    pub fn glow_fade(&self, now_ms: f64) -> Option<f64> {
        let glow = self.glow.as_ref()?;
        let age = now_ms - glow.at_ms;
        if (0.0..GLOW_WINDOW_MS).contains(&age) {
            Some(1.0 - age / GLOW_WINDOW_MS)
        } else {
            None
        }
    }
}
