//! Master tone stage: subtractive high-pass, resonant low-pass, output clip.

use crate::params::{ParamId, ParamStore};

use super::filter::{BiquadState, LowpassCoeffs, OnePole};
use super::oscillator::knob_to_freq;

const OUTPUT_DRIVE: f64 = 1.1;

/// Q for a master resonance knob position.
pub fn master_q(resonance: f64) -> f64 {
    0.5 + resonance.clamp(0.0, 1.0) * 5.5
}

/// Coefficients for one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasterSettings {
    pub hp_coeff: f64,
    pub lowpass: LowpassCoeffs,
    pub gain: f64,
}

impl MasterSettings {
    pub fn from_params(p: &ParamStore, sample_rate: f64) -> Self {
        let hp_freq = knob_to_freq(p.get(ParamId::MasterHp));
        let lp_freq = knob_to_freq(p.get(ParamId::MasterLp));
        MasterSettings {
            hp_coeff: OnePole::coeff(hp_freq, sample_rate),
            lowpass: LowpassCoeffs::new(sample_rate, lp_freq, master_q(p.get(ParamId::MasterRes))),
            gain: OUTPUT_DRIVE * p.get(ParamId::Volume),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MasterTone {
    hp_l: OnePole,
    hp_r: OnePole,
    lp_l: BiquadState,
    lp_r: BiquadState,
}

impl MasterTone {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn process(&mut self, left: f64, right: f64, s: &MasterSettings) -> (f64, f64) {
        // High-pass as the signal minus its own lowpassed copy.
        let hp_l = left - self.hp_l.process(left, s.hp_coeff);
        let hp_r = right - self.hp_r.process(right, s.hp_coeff);

        let lp_l = self.lp_l.process(&s.lowpass, hp_l);
        let lp_r = self.lp_r.process(&s.lowpass, hp_r);

        ((lp_l * s.gain).tanh(), (lp_r * s.gain).tanh())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 44100.0;

    fn run_sine(p: &ParamStore, freq: f64) -> f64 {
        let s = MasterSettings::from_params(p, SR);
        let mut m = MasterTone::new();
        let mut peak = 0.0_f64;
        for i in 0..8820 {
            let x = (2.0 * std::f64::consts::PI * freq * i as f64 / SR).sin() * 0.3;
            let (l, _) = m.process(x, x, &s);
            if i > 4410 {
                peak = peak.max(l.abs());
            }
        }
        peak
    }

    #[test]
    fn default_settings_pass_midrange() {
        let p = ParamStore::default();
        let peak = run_sine(&p, 1000.0);
        let expected = (0.3 * 1.1 * 0.8_f64).tanh();
        assert!((peak - expected).abs() < 0.02, "expected ~{expected}, got {peak}");
    }

    #[test]
    fn high_pass_removes_lows() {
        let mut p = ParamStore::default();
        p.set(ParamId::MasterHp, 0.6);
        let open = run_sine(&ParamStore::default(), 50.0);
        let cut = run_sine(&p, 50.0);
        assert!(cut < open * 0.2, "open {open}, cut {cut}");
    }

    #[test]
    fn low_pass_removes_highs() {
        let mut p = ParamStore::default();
        p.set(ParamId::MasterLp, 0.2);
        let cut = run_sine(&p, 8000.0);
        assert!(cut < 0.01, "8 kHz should be gone, got {cut}");
    }

    #[test]
    fn output_is_bounded() {
        let mut p = ParamStore::default();
        p.set(ParamId::Volume, 1.0);
        p.set(ParamId::MasterRes, 1.0);
        let s = MasterSettings::from_params(&p, SR);
        let mut m = MasterTone::new();
        for i in 0..10_000 {
            let x = if i % 50 < 25 { 5.0 } else { -5.0 };
            let (l, r) = m.process(x, x, &s);
            assert!(l.abs() <= 1.0 && r.abs() <= 1.0);
        }
    }

    #[test]
    fn q_range() {
        assert_eq!(master_q(0.0), 0.5);
        assert_eq!(master_q(1.0), 6.0);
    }
}
