//! Mixer: sums both oscillators and white noise ahead of the filter.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Per-source weights before the soft clipper.
const OSC_WEIGHT: f64 = 0.7;
const NOISE_WEIGHT: f64 = 0.5;
/// Gain into the tanh stage.
const MIX_DRIVE: f64 = 1.5;

/// Uniform white noise in [-1, 1).
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: SmallRng,
}

impl NoiseSource {
    pub fn new(seed: u64) -> Self {
        NoiseSource {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        self.rng.gen_range(-1.0..1.0)
    }
}

/// Source levels for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixLevels {
    pub osc1: f64,
    pub osc2: f64,
    pub noise: f64,
}

/// Weighted sum of the three sources, soft-clipped.
#[inline]
pub fn mix(osc1: f64, osc2: f64, noise: f64, levels: &MixLevels) -> f64 {
    let sum = osc1 * levels.osc1 * OSC_WEIGHT
        + osc2 * levels.osc2 * OSC_WEIGHT
        + noise * levels.noise * NOISE_WEIGHT;
    if !sum.is_finite() {
        return 0.0;
    }
    soft_clip(sum * MIX_DRIVE)
}

/// Soft clipper using tanh to prevent harsh digital clipping.
#[inline]
pub fn soft_clip(x: f64) -> f64 {
    x.tanh()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: MixLevels = MixLevels { osc1: 1.0, osc2: 1.0, noise: 1.0 };

    #[test]
    fn silent_sources_mix_to_zero() {
        assert_eq!(mix(0.0, 0.0, 0.0, &FULL), 0.0);
        let muted = MixLevels { osc1: 0.0, osc2: 0.0, noise: 0.0 };
        assert_eq!(mix(1.0, -1.0, 0.7, &muted), 0.0);
    }

    #[test]
    fn weights_are_applied_before_clipping() {
        let only1 = MixLevels { osc1: 1.0, osc2: 0.0, noise: 0.0 };
        assert!((mix(0.5, 0.0, 0.0, &only1) - soft_clip(0.5 * 0.7 * 1.5)).abs() < 1e-12);
        let only_noise = MixLevels { osc1: 0.0, osc2: 0.0, noise: 1.0 };
        assert!((mix(0.0, 0.0, 0.5, &only_noise) - soft_clip(0.5 * 0.5 * 1.5)).abs() < 1e-12);
    }

    #[test]
    fn soft_clip_prevents_overflow() {
        let out = mix(1e6, 1e6, 1e6, &FULL);
        assert!(out.abs() <= 1.0, "Soft clip should keep output <= 1.0, got {out}");
        assert_eq!(mix(f64::NAN, 0.0, 0.0, &FULL), 0.0);
    }

    #[test]
    fn noise_is_bounded_and_seeded() {
        let mut a = NoiseSource::new(7);
        let mut b = NoiseSource::new(7);
        let mut sum = 0.0;
        for _ in 0..10_000 {
            let s = a.next_sample();
            assert!((-1.0..1.0).contains(&s));
            assert_eq!(s, b.next_sample());
            sum += s;
        }
        assert!((sum / 10_000.0).abs() < 0.05, "noise should be roughly zero-mean");
    }
}
