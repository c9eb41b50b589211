//! Arc population ownership and growth
//!
//! The population owns the canonical arc list, the session clock, and the
//! seeded RNG. It is the only place arcs are created. Structural changes
//! (growth, reset) are queued as commands and drained once per frame at the
//! frame boundary: the growth poll runs on an independent host timer and must
//! never splice the list while a frame is iterating it.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::REFLOW_SNAP_OPACITY;
use crate::palette::{self, Color};
use crate::settings::Settings;
use crate::sim::arc::Arc;
use crate::sim::kinematics;
use crate::sim::layout::Layout;

/// Structural mutation applied between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Append one arc and retarget the rest
    Grow,
    /// Discard the population and start a fresh generation
    Reset,
}

/// The growing set of concentric arcs for one session.
#[derive(Debug, Clone)]
pub struct Population {
    arcs: Vec<Arc>,
    /// Session clock: every angle derives from this instant (ms since epoch)
    start_ms: f64,
    initial_count: usize,
    max_arcs: usize,
    max_cycles: usize,
    duration_secs: f64,
    /// Time of the last admission (ms since epoch)
    last_add_ms: f64,
    /// Admission cooldown currently in force (ms)
    cooldown_ms: f64,
    pending: Vec<Command>,
    rng: Pcg32,
}

impl Population {
    /// Build the initial generation. The first load path does not animate:
    /// every arc appears settled and fully opaque.
    pub fn new(settings: &Settings, layout: &Layout, start_ms: f64, seed: u64) -> Self {
        let mut population = Self {
            arcs: Vec::with_capacity(settings.max_arcs),
            start_ms,
            initial_count: settings.initial_arc_count,
            max_arcs: settings.max_arcs,
            max_cycles: settings.max_cycles(),
            duration_secs: settings.duration_secs,
            last_add_ms: 0.0,
            cooldown_ms: 0.0,
            pending: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        population.spawn_generation(layout, start_ms);
        population
    }

    fn spawn_generation(&mut self, layout: &Layout, start_ms: f64) {
        self.arcs.clear();
        for index in 0..self.initial_count {
            let velocity = kinematics::velocity(index, self.max_cycles, self.duration_secs);
            let radius = layout.target_radius(index, self.initial_count);
            self.arcs.push(Arc::new(
                palette::color_for(index),
                velocity,
                start_ms,
                start_ms,
                false,
                radius,
                radius,
            ));
        }
    }

    /// Arcs in index order (index encodes both velocity and radius rank).
    #[inline]
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    #[inline]
    pub fn arcs_mut(&mut self) -> &mut [Arc] {
        &mut self.arcs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    #[inline]
    pub fn max_arcs(&self) -> usize {
        self.max_arcs
    }

    /// Session clock origin (ms since epoch)
    #[inline]
    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Seconds elapsed on the session clock, clamped at zero
    #[inline]
    pub fn elapsed_secs(&self, now_ms: f64) -> f64 {
        ((now_ms - self.start_ms) / 1000.0).max(0.0)
    }

    /// Growth-eligibility check, driven by a host timer independent of the
    /// frame loop.
    ///
    /// Only the outermost (slowest) arc's rotation count is inspected. Its
    /// rotation bookkeeping always advances when a new whole rotation is
    /// seen, whether or not an admission follows; admission itself is a
    /// probability draw that rises with the rotations elapsed since the last
    /// check, capped at 0.7.
    pub fn poll_growth(&mut self, now_ms: f64) {
        if self.arcs.len() >= self.max_arcs {
            return;
        }
        if now_ms < self.last_add_ms + self.cooldown_ms {
            return;
        }
        let elapsed = ((now_ms - self.start_ms) / 1000.0).max(0.0);
        let Some(outer) = self.arcs.last_mut() else {
            return;
        };

        let completed = kinematics::completed_rotations(outer.velocity, elapsed);
        if completed <= outer.last_checked_rotation {
            return;
        }
        let since = completed - outer.last_checked_rotation;
        outer.last_checked_rotation = completed;

        let chance = (0.3 + 0.1 * since as f64).min(0.7);
        if self.rng.random::<f64>() < chance {
            let rotation_ms = TAU / outer.velocity * 1000.0;
            // cooldown worth 1-3 outermost rotations
            let multiplier = 1.0 + self.rng.random::<f64>() * 2.0;
            self.cooldown_ms = rotation_ms * multiplier;
            self.last_add_ms = now_ms;
            self.pending.push(Command::Grow);
            log::info!(
                "arc admitted after {completed} rotations, next admission possible in {:.1}s",
                self.cooldown_ms / 1000.0
            );
        }
    }

    /// Queue a full reset: fresh generation, fresh session clock.
    pub fn request_reset(&mut self) {
        self.pending.push(Command::Reset);
    }

    /// Drain queued structural changes. Called once per frame, before any
    /// arc iteration. Returns true when the arc count changed.
    pub fn apply_pending(&mut self, layout: &Layout, now_ms: f64) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        let before = self.arcs.len();
        let commands = std::mem::take(&mut self.pending);
        for command in commands {
            match command {
                Command::Grow => self.grow(layout, now_ms),
                Command::Reset => self.reset_now(layout, now_ms),
            }
        }
        self.arcs.len() != before
    }

    /// Append one arc and retarget every existing ring to the new layout.
    ///
    /// Existing visible arcs ease toward their new radius; arcs still too
    /// faint to see snap immediately. The new arc spawns already sized (its
    /// current radius equals its target) with only the entrance fade running.
    fn grow(&mut self, layout: &Layout, now_ms: f64) {
        if self.arcs.len() >= self.max_arcs {
            return;
        }
        let new_count = self.arcs.len() + 1;

        for (index, arc) in self.arcs.iter_mut().enumerate() {
            let target = layout.target_radius(index, new_count);
            if arc.opacity > REFLOW_SNAP_OPACITY {
                arc.begin_resize(target, now_ms);
            } else {
                arc.snap_radius(target);
            }
        }

        let index = new_count - 1;
        let velocity = kinematics::velocity(index, self.max_cycles, self.duration_secs);
        let radius = layout.target_radius(index, new_count);
        self.arcs.push(Arc::new(
            palette::color_for(index),
            velocity,
            now_ms,
            now_ms,
            true,
            radius,
            radius,
        ));
    }

    fn reset_now(&mut self, layout: &Layout, now_ms: f64) {
        self.start_ms = now_ms;
        self.last_add_ms = 0.0;
        self.cooldown_ms = 0.0;
        self.spawn_generation(layout, now_ms);
        log::info!("population reset to {} arcs", self.initial_count);
    }

    /// Two glow colors sampled from currently-visible arcs. The second pick
    /// is redrawn once if it matched the first, so distinct colors are
    /// preferred but not guaranteed.
    pub fn pick_glow_colors(&mut self) -> Option<(Color, Color)> {
        let visible: Vec<Color> = self
            .arcs
            .iter()
            .filter(|arc| arc.opacity > crate::consts::GLOW_SAMPLE_OPACITY)
            .map(|arc| arc.color)
            .collect();
        if visible.is_empty() {
            return None;
        }
        let first = self.rng.random_range(0..visible.len());
        let mut second = self.rng.random_range(0..visible.len());
        if second == first && visible.len() > 1 {
            second = self.rng.random_range(0..visible.len());
        }
        Some((visible[first], visible[second]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Settings, Layout) {
        (Settings::default(), Layout::compute(1000.0, 1000.0))
    }

    #[test]
    fn test_initial_generation_is_settled() {
        let (settings, layout) = setup();
        let population = Population::new(&settings, &layout, 10_000.0, 1);

        assert_eq!(population.len(), 6);
        for (index, arc) in population.arcs().iter().enumerate() {
            assert_eq!(arc.opacity, 1.0);
            assert!(!arc.fading_in());
            assert!(!arc.resizing());
            assert_eq!(arc.current_radius, layout.target_radius(index, 6));
        }
        // outer arcs strictly slower
        for pair in population.arcs().windows(2) {
            assert!(pair[1].velocity < pair[0].velocity);
        }
    }

    #[test]
    fn test_poll_alone_never_mutates_structure() {
        let (settings, layout) = setup();
        let mut population = Population::new(&settings, &layout, 0.0, 7);

        // poll across plenty of outer-arc rotations without draining
        for step in 0..10_000 {
            population.poll_growth(step as f64 * 100.0);
            assert_eq!(population.len(), 6);
        }
    }

    #[test]
    fn test_rotation_bookkeeping_always_advances() {
        let (settings, layout) = setup();
        let mut population = Population::new(&settings, &layout, 0.0, 7);

        let outer_velocity = population.arcs().last().unwrap().velocity;
        let rotation_secs = TAU / outer_velocity;

        // land the clock just past the third rotation
        let now_ms = (rotation_secs * 3.0 + 0.1) * 1000.0;
        population.poll_growth(now_ms);
        assert_eq!(population.arcs().last().unwrap().last_checked_rotation, 3);
    }

    #[test]
    fn test_growth_is_monotonic_and_bounded() {
        let (settings, layout) = setup();
        let mut population = Population::new(&settings, &layout, 0.0, 42);

        let mut last_len = population.len();
        // ~half an hour of simulated 100ms polls with per-frame drains
        for step in 0..18_000 {
            let now_ms = step as f64 * 100.0;
            population.poll_growth(now_ms);
            population.apply_pending(&layout, now_ms);

            assert!(population.len() >= last_len);
            assert!(population.len() <= settings.max_arcs);
            last_len = population.len();
        }
        // the admission draw is seeded, so growth is deterministic here
        assert!(population.len() > settings.initial_arc_count);
    }

    #[test]
    fn test_admitted_arc_fades_in_already_sized() {
        let (settings, layout) = setup();
        let mut population = Population::new(&settings, &layout, 0.0, 42);

        let mut grew_at = None;
        for step in 0..18_000 {
            let now_ms = step as f64 * 100.0;
            population.poll_growth(now_ms);
            if population.apply_pending(&layout, now_ms) {
                grew_at = Some(now_ms);
                break;
            }
        }
        assert!(grew_at.is_some(), "population never grew");

        let new_count = population.len();
        let newest = population.arcs().last().unwrap();
        assert!(newest.fading_in());
        assert_eq!(newest.opacity, 0.0);
        assert!(!newest.resizing());
        assert_eq!(
            newest.current_radius,
            layout.target_radius(new_count - 1, new_count)
        );

        // every pre-existing (visible) arc eases toward a tighter radius
        for (index, arc) in population.arcs().iter().enumerate().take(new_count - 1) {
            assert_eq!(arc.target_radius, layout.target_radius(index, new_count));
            if index > 0 {
                assert!(arc.resizing());
            }
        }
    }

    #[test]
    fn test_admission_respects_cooldown() {
        let (settings, layout) = setup();
        let mut population = Population::new(&settings, &layout, 0.0, 42);

        let mut admissions = Vec::new();
        let mut last_len = population.len();
        for step in 0..36_000 {
            let now_ms = step as f64 * 100.0;
            population.poll_growth(now_ms);
            population.apply_pending(&layout, now_ms);
            if population.len() > last_len {
                admissions.push(now_ms);
                last_len = population.len();
            }
        }
        assert!(admissions.len() >= 2, "need two admissions to compare");

        // a cooldown is at least one outermost rotation
        let outer_velocity = population.arcs().last().unwrap().velocity;
        let min_gap_ms = TAU / outer_velocity * 1000.0;
        for pair in admissions.windows(2) {
            assert!(pair[1] - pair[0] >= min_gap_ms * 0.9);
        }
    }

    #[test]
    fn test_reflow_two_to_three_shrinks_targets() {
        let (mut settings, layout) = setup();
        settings.initial_arc_count = 2;
        let mut population = Population::new(&settings, &layout, 0.0, 3);
        assert_eq!(population.arcs()[0].color, "#66b2b2");
        assert_eq!(population.arcs()[1].color, "#9b59b6");

        let old_targets: Vec<f64> = population.arcs().iter().map(|a| a.target_radius).collect();
        population.pending.push(Command::Grow);
        assert!(population.apply_pending(&layout, 1000.0));

        assert_eq!(population.len(), 3);
        for (index, arc) in population.arcs().iter().enumerate().take(2) {
            assert_eq!(arc.target_radius, layout.target_radius(index, 3));
            if index > 0 {
                // spacing divisor moved from 2 to 3
                assert!(arc.target_radius < old_targets[index]);
            }
        }
    }

    #[test]
    fn test_reset_starts_a_fresh_generation() {
        let (settings, layout) = setup();
        let mut population = Population::new(&settings, &layout, 0.0, 42);

        // grow at least once first
        for step in 0..18_000 {
            let now_ms = step as f64 * 100.0;
            population.poll_growth(now_ms);
            population.apply_pending(&layout, now_ms);
            if population.len() > settings.initial_arc_count {
                break;
            }
        }
        assert!(population.len() > 6);

        population.request_reset();
        population.apply_pending(&layout, 2_000_000.0);

        assert_eq!(population.len(), 6);
        assert_eq!(population.start_ms(), 2_000_000.0);
        for arc in population.arcs() {
            assert_eq!(arc.opacity, 1.0);
            assert!(!arc.fading_in());
            assert_eq!(arc.last_checked_rotation, 0);
        }
    }

    #[test]
    fn test_glow_colors_prefer_distinct_picks() {
        let (settings, layout) = setup();
        let mut population = Population::new(&settings, &layout, 0.0, 9);

        for _ in 0..100 {
            let (a, b) = population.pick_glow_colors().unwrap();
            let palette: Vec<_> = population.arcs().iter().map(|arc| arc.color).collect();
            assert!(palette.contains(&a));
            assert!(palette.contains(&b));
        }
    }
}
