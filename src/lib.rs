//! Arc Chime - a polyrhythmic visualization
//!
//! Concentric arcs each carry a dot sweeping at its own angular velocity.
//! Dots periodically cross two fixed impact points on the horizontal axis,
//! sounding a synthesized chime and flashing a glow. The population of arcs
//! grows over time, reflowing the ring layout as it does.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, impacts, arc population)
//! - `render`: Frame drawing against an injected 2D surface
//! - `engine`: Cooperative frame-loop orchestration
//! - `audio`: Web Audio chime synthesis
//! - `settings`: Validated, persisted configuration

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod engine;
pub mod palette;
pub mod render;
pub mod settings;
pub mod sim;

pub use engine::{Engine, ToneSink};
pub use settings::Settings;

use glam::DVec2;

/// Timing and threshold constants
pub mod consts {
    /// Entrance fade-in duration (ms)
    pub const ENTRANCE_FADE_MS: f64 = 1500.0;
    /// Per-arc radius easing duration (ms)
    pub const RADIUS_EASE_MS: f64 = 1000.0;
    /// Post-impact glow window (ms)
    pub const GLOW_WINDOW_MS: f64 = 500.0;
    /// Minimum interval between confirmed impacts on one arc (ms)
    pub const MIN_IMPACT_INTERVAL_MS: f64 = 500.0;
    /// Angular window around an impact point (radians)
    pub const IMPACT_THRESHOLD: f64 = 0.05;
    /// Growth poll cadence driven by the host timer (ms)
    pub const GROWTH_POLL_MS: i32 = 100;
    /// Layout-wide reflow transition duration (ms)
    pub const LAYOUT_TRANSITION_MS: f64 = 1500.0;
    /// Overlay transition lifetime, slightly past the canvas reflow (ms)
    pub const OVERLAY_TRANSITION_MS: f64 = 1600.0;
    /// Ring/point pulse fade window after an impact (ms)
    pub const PULSE_WINDOW_MS: f64 = 1000.0;
    /// Opacity above which an arc's color is sampled for glows
    pub const GLOW_SAMPLE_OPACITY: f64 = 0.5;
    /// Opacity below which a reflow snaps instead of animating
    pub const REFLOW_SNAP_OPACITY: f64 = 0.1;
    /// Entrance-fade completion gate for sounding an impact
    pub const SOUND_GATE_OPACITY: f64 = 0.9;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_tau(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

/// Point on a circle of `radius` around `center` at `angle` radians
#[inline]
pub fn position_on_circle(center: DVec2, radius: f64, angle: f64) -> DVec2 {
    DVec2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_wrap_tau() {
        assert!((wrap_tau(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_tau(-PI) - PI).abs() < 1e-12);
        assert_eq!(wrap_tau(0.0), 0.0);
    }

    #[test]
    fn test_position_on_circle() {
        let center = DVec2::new(10.0, 20.0);
        let p = position_on_circle(center, 5.0, 0.0);
        assert!((p.x - 15.0).abs() < 1e-12);
        assert!((p.y - 20.0).abs() < 1e-12);

        let q = position_on_circle(center, 5.0, PI / 2.0);
        assert!((q.x - 10.0).abs() < 1e-9);
        assert!((q.y - 25.0).abs() < 1e-9);
    }
}
