//! Frame-loop orchestration
//!
//! The engine ties the simulation, the renderer, and the external tone
//! trigger together behind two host entry points: `frame`, called once per
//! display refresh, and `poll_growth`, called on an independent fixed
//! interval. Hosts own the actual scheduling, so tests can step frames with
//! synthetic clocks and the browser build can chain animation-frame
//! callbacks; a stopped engine ignores both entry points and the host stops
//! rescheduling.

use crate::render::overlay::OverlayTransition;
use crate::render::surface::DrawSurface;
use crate::render::FrameRenderer;
use crate::settings::{ConfigError, Settings};
use crate::sim::layout::Layout;
use crate::sim::population::Population;
use crate::sim::{self, FrameReport};

/// Fire-and-forget tone trigger. The engine never observes a result; a
/// failing implementation must swallow its own errors.
pub trait ToneSink {
    fn trigger_tone(&self, index: usize, volume: f64);
}

/// Silent sink for headless and test use.
pub struct NullTones;

impl ToneSink for NullTones {
    fn trigger_tone(&self, _index: usize, _volume: f64) {}
}

/// The visualization engine: one population, one renderer, one overlay.
pub struct Engine {
    settings: Settings,
    layout: Layout,
    population: Population,
    renderer: FrameRenderer,
    overlay: OverlayTransition,
    sound_enabled: bool,
    running: bool,
}

impl Engine {
    /// Validate `settings` and build the initial generation.
    pub fn new(
        settings: Settings,
        width: f64,
        height: f64,
        now_ms: f64,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let layout = Layout::compute(width, height);
        let population = Population::new(&settings, &layout, now_ms, seed);
        log::info!(
            "engine started: {} arcs, growing to {}",
            settings.initial_arc_count,
            settings.max_arcs
        );
        Ok(Self {
            settings,
            layout,
            population,
            renderer: FrameRenderer::new(),
            overlay: OverlayTransition::new(),
            sound_enabled: false,
            running: true,
        })
    }

    /// Advance and draw one frame.
    ///
    /// Geometry is re-derived from the surface each frame, so a resized
    /// canvas reflows on its next frame with no extra plumbing.
    pub fn frame(&mut self, surface: &mut dyn DrawSurface, tones: &dyn ToneSink, now_ms: f64) {
        if !self.running {
            return;
        }
        let (width, height) = surface.size();
        self.layout = Layout::compute(width, height);

        let prev_count = self.population.len();
        let report: FrameReport = sim::advance(&mut self.population, &self.layout, now_ms);

        if report.count_changed {
            self.renderer.begin_reflow(now_ms, &self.layout, prev_count);
            self.overlay.begin(now_ms, prev_count);
        }

        for event in &report.impacts {
            if self.sound_enabled && event.audible {
                tones.trigger_tone(event.index, self.settings.volume);
            }
        }

        self.renderer.draw(
            surface,
            &self.population,
            &self.layout,
            now_ms,
            self.settings.pulse_enabled,
        );
        self.overlay.update(now_ms);
        self.overlay
            .draw(surface, &self.layout, self.population.len(), now_ms);
    }

    /// Growth-eligibility poll; host-driven on a fixed interval.
    pub fn poll_growth(&mut self, now_ms: f64) {
        if self.running {
            self.population.poll_growth(now_ms);
        }
    }

    /// Queue a restart; the fresh generation lands on the next frame.
    pub fn reset(&mut self) {
        self.population.request_reset();
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Cancel the loop: subsequent frames and polls become no-ops and the
    /// host should stop scheduling.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
