//! Delay effect: tempo-synced stereo delay with cross feedback.

use crate::params::{ParamId, ParamStore};

use super::smooth::{SMOOTH_COEFF, SmoothValue};

/// Feedback ceiling; keeps the cross-coupled loop gain below one.
pub const MAX_FEEDBACK: f64 = 0.95;

/// Length of a whole note in seconds at `tempo` BPM.
#[inline]
pub fn whole_note_seconds(tempo: f64) -> f64 {
    240.0 / tempo.clamp(40.0, 300.0)
}

/// Block-rate delay settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaySettings {
    pub tempo: f64,
    pub feedback: f64,
    pub width: f64,
    pub wet: f64,
}

impl DelaySettings {
    pub fn from_params(p: &ParamStore) -> Self {
        DelaySettings {
            tempo: p.get(ParamId::Tempo),
            feedback: p.get(ParamId::DelayFdbk).min(MAX_FEEDBACK),
            width: p.get(ParamId::DelayWidth),
            wet: p.get(ParamId::DelayWet),
        }
    }
}

/// A stereo delay whose time is a smoothed fraction of a whole note.
///
/// Each channel's tap feeds the opposite channel's line, so echoes
/// ping-pong between left and right. The right tap is stretched by the
/// width setting, up to one and a half times the left.
#[derive(Debug, Clone)]
pub struct Delay {
    buffer_l: Vec<f32>,
    buffer_r: Vec<f32>,
    write_pos: usize,
    sample_rate: f64,
    rate: SmoothValue,
    delay_samples: f64,
}

impl Delay {
    /// Create a delay able to hold `max_delay_seconds`, starting at `rate`
    /// (fraction of a whole note).
    pub fn new(sample_rate: f64, max_delay_seconds: f64, rate: f64) -> Self {
        let buffer_size = ((sample_rate * max_delay_seconds).ceil() as usize).max(4);
        Self {
            buffer_l: vec![0.0; buffer_size],
            buffer_r: vec![0.0; buffer_size],
            write_pos: 0,
            sample_rate,
            rate: SmoothValue::new(rate),
            delay_samples: 0.0,
        }
    }

    /// Retarget the delay time; the change glides in over a few thousand samples.
    pub fn set_rate(&mut self, rate: f64) {
        self.rate.set(rate);
    }

    /// Left-channel delay in samples as of the last processed frame.
    pub fn delay_samples(&self) -> f64 {
        self.delay_samples
    }

    /// Read `delay` samples behind the write head, interpolating linearly.
    #[inline]
    fn read(buffer: &[f32], write_pos: usize, delay: f64) -> f64 {
        let len = buffer.len();
        let delay = if delay.is_finite() && delay > 0.0 { delay } else { 0.0 };
        let mut pos = write_pos as f64 - delay;
        if pos < 0.0 {
            pos += len as f64;
        }
        let idx_a = (pos.floor() as usize) % len;
        let idx_b = (idx_a + 1) % len;
        let frac = pos - pos.floor();
        buffer[idx_a] as f64 * (1.0 - frac) + buffer[idx_b] as f64 * frac
    }

    #[inline]
    fn sanitize(x: f64) -> f32 {
        if x.is_finite() { x.clamp(-1.0, 1.0) as f32 } else { 0.0 }
    }

    /// Process a stereo sample pair, returning dry plus wet.
    #[inline]
    pub fn process(&mut self, left: f64, right: f64, s: &DelaySettings) -> (f64, f64) {
        let rate = self.rate.next(SMOOTH_COEFF);
        let max_samples = (self.buffer_l.len() - 2) as f64;
        let samps_l = (whole_note_seconds(s.tempo) * rate * self.sample_rate).min(max_samples);
        let samps_r = (samps_l * (1.0 + s.width * 0.5)).min(max_samples);
        self.delay_samples = samps_l;

        let tap_l = Self::read(&self.buffer_l, self.write_pos, samps_l);
        let tap_r = Self::read(&self.buffer_r, self.write_pos, samps_r);

        self.buffer_l[self.write_pos] = Self::sanitize(left + tap_r * s.feedback);
        self.buffer_r[self.write_pos] = Self::sanitize(right + tap_l * s.feedback);
        self.write_pos = (self.write_pos + 1) % self.buffer_l.len();

        (left + tap_l * s.wet, right + tap_r * s.wet)
    }
}
