//! Chime synthesis using the Web Audio API
//!
//! Procedurally generated handpan-style tones - no sample files needed.
//! Every call is fire-and-forget: oscillator setup failures are swallowed so
//! the frame loop never observes an audio error.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::engine::ToneSink;

/// D minor handpan scale (a common tuning), low to high.
const HANDPAN_HZ: [f32; 9] = [
    146.83, // D3
    174.61, // F3
    196.00, // G3
    220.00, // A3
    293.66, // D4
    349.23, // F4
    392.00, // G4
    440.00, // A4
    587.33, // D5
];

/// Partials layered over the fundamental: (frequency multiple, gain share).
const VOICE_PARTIALS: [(f32, f32); 3] = [(1.0, 0.6), (2.0, 0.3), (3.0, 0.1)];

/// Audio manager for the visualization
pub struct AudioManager {
    ctx: Option<AudioContext>,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, muted: false }
    }

    /// Resume the audio context (required after a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Pitch for the arc at `index`: scale degree, shifted up an octave each
    /// time the index wraps past the table.
    fn frequency_for(index: usize) -> f32 {
        let base = HANDPAN_HZ[index % HANDPAN_HZ.len()];
        let octave = (index / HANDPAN_HZ.len()) as i32;
        base * 2.0_f32.powi(octave)
    }

    /// Create an oscillator wired through its own gain to the destination
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Play one handpan strike: fundamental plus two harmonics, each with a
    /// fast attack and a long ringing release.
    fn play_note(&self, index: usize, volume: f64) {
        if self.muted || volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend contexts until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let freq = Self::frequency_for(index);
        let t = ctx.current_time();

        for (multiple, share) in VOICE_PARTIALS {
            let Some((osc, gain)) = self.create_osc(ctx, freq * multiple, OscillatorType::Sine)
            else {
                continue;
            };
            let peak = volume as f32 * share;

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(peak, t + 0.02)
                .ok();
            gain.gain()
                .linear_ramp_to_value_at_time(peak * 0.8, t + 0.1)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time((peak * 0.3).max(0.0001), t + 1.0)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, t + 3.0)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 3.1).ok();
        }
    }
}

impl ToneSink for AudioManager {
    fn trigger_tone(&self, index: usize, volume: f64) {
        self.play_note(index, volume);
    }
}
