//! Pure angular kinematics
//!
//! Every dot's position is fully determined by a fixed session start time and
//! a fixed per-arc velocity; nothing in this module holds state.

use std::f64::consts::{PI, TAU};

/// Angular velocity for the arc at `index` (radians/second).
///
/// The innermost arc (index 0) completes `max_cycles` full turns over
/// `duration_secs`; each subsequent arc completes one fewer turn, so outer
/// arcs always rotate slower and every pair's relative phase drifts
/// monotonically.
#[inline]
pub fn velocity(index: usize, max_cycles: usize, duration_secs: f64) -> f64 {
    let cycles = max_cycles.saturating_sub(index) as f64;
    cycles * TAU / duration_secs
}

/// Angular position after `elapsed_secs` at `velocity`, wrapped to [0, 2π).
///
/// The π offset places the starting phase at the left impact point. Negative
/// elapsed time (host clock skew) counts as zero distance traveled.
#[inline]
pub fn angular_position(velocity: f64, elapsed_secs: f64) -> f64 {
    let distance = velocity * elapsed_secs.max(0.0);
    (PI + distance).rem_euclid(TAU)
}

/// Predicted time of the next impact: half a revolution past `from_ms`.
#[inline]
pub fn next_impact_time_ms(from_ms: f64, velocity: f64) -> f64 {
    from_ms + (PI / velocity) * 1000.0
}

/// Whole rotations completed after `elapsed_secs` at `velocity`.
#[inline]
pub fn completed_rotations(velocity: f64, elapsed_secs: f64) -> u64 {
    let distance = velocity * elapsed_secs.max(0.0);
    (distance / TAU).floor() as u64
}
