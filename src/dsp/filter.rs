//! Master-stage filters: resonant biquad lowpass and a one-pole lowpass.

use std::f64::consts::PI;

/// Normalized biquad lowpass coefficients.
///
/// Coefficient formulas from the Audio EQ Cookbook (Robert Bristow-Johnson).
/// Computed once per block and shared by both channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowpassCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl LowpassCoeffs {
    /// `freq` is clamped to [20 Hz, 0.45 * sample_rate].
    pub fn new(sample_rate: f64, freq: f64, q: f64) -> Self {
        let fc = freq.clamp(20.0, sample_rate * 0.45);
        let w0 = 2.0 * PI * fc / sample_rate;
        let cos_w0 = w0.cos();
        let sin_w0 = w0.sin();
        let alpha = sin_w0 / (2.0 * q.max(0.1));

        let b1 = 1.0 - cos_w0;
        let b0 = b1 / 2.0;
        let b2 = b0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_w0;
        let a2 = 1.0 - alpha;

        // Normalize by a0
        LowpassCoeffs {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Direct Form I state for one channel.
#[derive(Debug, Clone, Default)]
pub struct BiquadState {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadState {
    /// Process a single sample. A non-finite result is stored and returned as 0.
    #[inline]
    pub fn process(&mut self, c: &LowpassCoeffs, input: f64) -> f64 {
        let y = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = if input.is_finite() { input } else { 0.0 };
        self.y2 = self.y1;
        self.y1 = if y.is_finite() { y } else { 0.0 };
        self.y1
    }
}

/// One-pole lowpass with the coefficient `2*pi*f/sr` clamped to [0, 1].
#[derive(Debug, Clone, Default)]
pub struct OnePole {
    value: f64,
}

impl OnePole {
    #[inline]
    pub fn coeff(freq: f64, sample_rate: f64) -> f64 {
        (2.0 * PI * freq / sample_rate).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn process(&mut self, input: f64, coeff: f64) -> f64 {
        self.value += coeff * (input - self.value);
        if !self.value.is_finite() {
            self.value = 0.0;
        }
        self.value
    }
}
