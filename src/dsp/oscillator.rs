//! Anti-aliased oscillators using PolyBLEP.

use crate::params::Waveform;

/// Lowest frequency an oscillator will run at.
pub const MIN_FREQ: f64 = 10.0;
/// Frequency used when modulation produced a non-finite value.
const FALLBACK_FREQ: f64 = 100.0;

/// Map a normalized knob position to Hz: 20 Hz .. 20 kHz, exponential.
pub fn knob_to_freq(param: f64) -> f64 {
    20.0 * 1000.0_f64.powf(param)
}

/// A band-limited oscillator with anti-aliasing (PolyBLEP).
#[derive(Debug, Clone)]
pub struct Oscillator {
    phase: f64,
    sample_rate: f64,
    wrapped: bool,
}

impl Oscillator {
    pub fn new(sample_rate: f64) -> Self {
        Oscillator {
            phase: 0.0,
            sample_rate,
            wrapped: false,
        }
    }

    /// Clamp a requested frequency into the playable band.
    #[inline]
    pub fn clamp_freq(&self, freq: f64) -> f64 {
        if !freq.is_finite() {
            return FALLBACK_FREQ;
        }
        freq.clamp(MIN_FREQ, self.sample_rate * 0.48)
    }

    /// Advance the phase and generate the next sample.
    #[inline]
    pub fn next_sample(&mut self, freq: f64, waveform: Waveform) -> f64 {
        let inc = self.clamp_freq(freq) / self.sample_rate;

        self.phase += inc;
        self.wrapped = self.phase >= 1.0;
        if self.wrapped {
            self.phase -= 1.0;
        }

        let value = match waveform {
            Waveform::Triangle => self.triangle(),
            Waveform::Pulse => self.pulse(inc),
        };
        if value.is_finite() { value } else { 0.0 }
    }

    /// Piecewise linear: +1 at the cycle edges, -1 in the middle.
    fn triangle(&self) -> f64 {
        4.0 * (self.phase - 0.5).abs() - 1.0
    }

    /// Square wave with PolyBLEP at both edges.
    fn pulse(&self, inc: f64) -> f64 {
        let mut value = if self.phase < 0.5 { 1.0 } else { -1.0 };
        value += poly_blep(self.phase, inc);
        value -= poly_blep((self.phase + 0.5) % 1.0, inc);
        value
    }

    /// Whether the last sample crossed the end of a cycle.
    pub fn wrapped(&self) -> bool {
        self.wrapped
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Hard-sync to a master oscillator's phase.
    #[inline]
    pub fn sync_to(&mut self, phase: f64) {
        self.phase = phase;
    }
}

/// PolyBLEP (Polynomial Band-Limited Step) anti-aliasing correction.
///
/// `t` is the phase [0, 1), `dt` is the phase increment per sample.
/// Returns a correction value to add at a rising step.
fn poly_blep(t: f64, dt: f64) -> f64 {
    if t < dt {
        // Just after the discontinuity
        let t = t / dt;
        2.0 * t - t * t - 1.0
    } else if t > 1.0 - dt {
        // Just before the next discontinuity
        let t = (t - 1.0) / dt;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}
