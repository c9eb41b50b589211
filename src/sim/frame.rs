//! Per-frame simulation step
//!
//! One call per displayed frame: drain structural commands, then walk the
//! arcs in index order advancing animations and confirming impacts.
//! Simultaneous impacts across arcs are evaluated strictly in index order.

use crate::consts::{IMPACT_THRESHOLD, MIN_IMPACT_INTERVAL_MS, SOUND_GATE_OPACITY};
use crate::sim::arc::Glow;
use crate::sim::impact::{self, ImpactZone};
use crate::sim::kinematics;
use crate::sim::layout::Layout;
use crate::sim::population::Population;

/// A confirmed impact, reported to the host for tone triggering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactEvent {
    /// Index of the impacting arc
    pub index: usize,
    /// Which side of the axis was crossed
    pub zone: ImpactZone,
    /// Whether the arc has finished fading in and may sound
    pub audible: bool,
}

/// Result of one frame step.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// The arc count changed this frame (growth or reset applied)
    pub count_changed: bool,
    /// Impacts confirmed this frame, in index order
    pub impacts: Vec<ImpactEvent>,
}

/// Advance the simulation by one frame.
///
/// Structural changes land first, at the frame boundary, so the subsequent
/// iteration never sees a half-updated list. A missing entry is skipped for
/// the frame rather than aborting the loop.
pub fn advance(population: &mut Population, layout: &Layout, now_ms: f64) -> FrameReport {
    let count_changed = population.apply_pending(layout, now_ms);
    let elapsed = population.elapsed_secs(now_ms);

    let mut impacts = Vec::new();
    for index in 0..population.len() {
        let confirmed = {
            let Some(arc) = population.arcs_mut().get_mut(index) else {
                continue;
            };
            arc.step_animation(now_ms);

            let angle = kinematics::angular_position(arc.velocity, elapsed);
            match impact::check_impact(angle, IMPACT_THRESHOLD) {
                Some(zone)
                    if impact::debounce_elapsed(
                        now_ms,
                        arc.last_impact_ms,
                        MIN_IMPACT_INTERVAL_MS,
                    ) =>
                {
                    arc.register_impact(now_ms);
                    let audible = !arc.fading_in() && arc.opacity > SOUND_GATE_OPACITY;
                    Some((zone, audible))
                }
                _ => None,
            }
        };

        if let Some((zone, audible)) = confirmed {
            // glow colors come from whatever is visible right now
            let colors = population.pick_glow_colors();
            if let (Some((color_a, color_b)), Some(arc)) =
                (colors, population.arcs_mut().get_mut(index))
            {
                arc.glow = Some(Glow {
                    color_a,
                    color_b,
                    at_ms: now_ms,
                });
            }
            impacts.push(ImpactEvent {
                index,
                zone,
                audible,
            });
        }
    }

    FrameReport {
        count_changed,
        impacts,
    }
}
