//! Four-stage nonlinear ladder lowpass.
//!
//! Each stage is a one-pole integrator with tanh saturation on both its
//! input and its own state; the last stage is fed back into the first,
//! which is where the resonance comes from.

/// Resonance knob scaling into the feedback gain.
const RESONANCE_GAIN: f64 = 3.8;
/// Largest per-stage integration coefficient.
const MAX_COEFF: f64 = 0.98;

#[derive(Debug, Clone)]
pub struct LadderFilter {
    s: [f64; 4],
    sample_rate: f64,
}

impl LadderFilter {
    pub fn new(sample_rate: f64) -> Self {
        LadderFilter {
            s: [0.0; 4],
            sample_rate,
        }
    }

    /// Filter one sample. `resonance` is the normalized knob value.
    #[inline]
    pub fn process(&mut self, input: f64, cutoff_hz: f64, resonance: f64) -> f64 {
        let input = if input.is_finite() { input } else { 0.0 };
        let nyquist_ish = self.sample_rate * 0.48;
        let cutoff = if cutoff_hz.is_finite() {
            cutoff_hz.clamp(10.0, nyquist_ish)
        } else {
            10.0
        };

        let f = (2.0 * std::f64::consts::PI * cutoff / self.sample_rate).clamp(0.0, MAX_COEFF);
        let r = resonance.clamp(0.0, 1.0) * RESONANCE_GAIN;
        // More drive at low cutoff to keep the level up as resonance thins it out.
        let drive = 0.6 + (1.0 - (cutoff / nyquist_ish).min(1.0)) * 0.4;
        let x = input * drive - r * self.s[3].tanh();

        let [s1, s2, s3, s4] = &mut self.s;
        *s1 += f * (x.tanh() - s1.tanh());
        *s2 += f * (s1.tanh() - s2.tanh());
        *s3 += f * (s2.tanh() - s3.tanh());
        *s4 += f * (s3.tanh() - s4.tanh());

        if !self.s[3].is_finite() {
            self.reset();
            return 0.0;
        }
        self.s[3]
    }

    pub fn reset(&mut self) {
        self.s = [0.0; 4];
    }

    pub fn state(&self) -> [f64; 4] {
        self.s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::knob_to_freq;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    const SR: f64 = 44100.0;

    #[test]
    fn passes_dc_below_cutoff() {
        let mut f = LadderFilter::new(SR);
        let mut out = 0.0;
        for _ in 0..20_000 {
            out = f.process(0.3, 5000.0, 0.0);
        }
        assert!(out > 0.1, "DC should pass the lowpass, got {out}");
    }

    #[test]
    fn attenuates_high_frequencies() {
        let measure = |cutoff: f64| {
            let mut f = LadderFilter::new(SR);
            let mut peak = 0.0_f64;
            for i in 0..8820 {
                let x = (2.0 * std::f64::consts::PI * 8000.0 * i as f64 / SR).sin() * 0.5;
                let y = f.process(x, cutoff, 0.0);
                if i > 4000 {
                    peak = peak.max(y.abs());
                }
            }
            peak
        };
        let open = measure(18000.0);
        let closed = measure(200.0);
        assert!(closed < open * 0.05, "200 Hz cutoff should kill 8 kHz: open {open}, closed {closed}");
    }

    #[test]
    fn high_resonance_rings() {
        let mut f = LadderFilter::new(SR);
        f.process(1.0, 1000.0, 1.0);
        let mut late = 0.0_f64;
        for i in 0..4410 {
            let y = f.process(0.0, 1000.0, 1.0);
            if i > 2000 {
                late = late.max(y.abs());
            }
        }
        assert!(late > 1e-3, "full resonance should sustain ringing, got {late}");
    }

    #[test]
    fn non_finite_input_is_absorbed() {
        let mut f = LadderFilter::new(SR);
        assert!(f.process(f64::NAN, 1000.0, 0.5).is_finite());
        assert!(f.process(f64::INFINITY, f64::NAN, 0.5).is_finite());
        assert!(f.state().iter().all(|s| s.is_finite()));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(6))]

        /// Any finite input and in-range settings stay finite for a million samples.
        #[test]
        fn ladder_stability(
            seed in any::<u64>(),
            cutoff in 0.0f64..=1.0,
            resonance in 0.0f64..=1.0,
            gain in 0.0f64..100.0,
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut f = LadderFilter::new(SR);
            let hz = knob_to_freq(cutoff);
            for i in 0..1_000_000u32 {
                let x = rng.gen_range(-1.0f64..1.0) * gain;
                let y = f.process(x, hz, resonance);
                prop_assert!(y.is_finite(), "non-finite output {} at sample {}", y, i);
            }
        }
    }
}
