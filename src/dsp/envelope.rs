//! Attack/decay envelope generator.

/// Envelope stages. There is no release: a trigger restarts the attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    Idle,
    Attack,
    Decay,
}

/// Linear-attack, exponential-decay envelope.
///
/// Rates are handed in per sample (see [`EnvelopeRates`]) so the costly
/// `exp` is paid once per block instead of once per sample.
#[derive(Debug, Clone)]
pub struct Envelope {
    stage: Stage,
    level: f64,
}

/// Per-sample rates derived from the attack time and decay parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeRates {
    /// Level added per sample during the attack.
    pub attack_inc: f64,
    /// Multiplier applied per sample during the decay.
    pub decay_mul: f64,
}

/// Shortest attack accepted, in seconds.
pub const MIN_ATTACK: f64 = 0.001;

/// Decay time in seconds for a normalized decay parameter.
///
/// Cubic so the low end of the knob stays fine-grained.
pub fn decay_seconds(decay_param: f64) -> f64 {
    let d = decay_param.clamp(0.0, 1.0);
    0.01 + d * d * d * 1.5
}

impl EnvelopeRates {
    pub fn new(attack_seconds: f64, decay_param: f64, sample_rate: f64) -> Self {
        let attack = attack_seconds.max(MIN_ATTACK);
        EnvelopeRates {
            attack_inc: 1.0 / (attack * sample_rate),
            decay_mul: (-1.0 / (decay_seconds(decay_param) * sample_rate)).exp(),
        }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}

impl Envelope {
    pub fn new() -> Self {
        Envelope { stage: Stage::Idle, level: 0.0 }
    }

    /// Restart the attack from the current level, whatever the stage.
    pub fn trigger(&mut self) {
        self.stage = Stage::Attack;
    }

    /// Generate the next envelope sample [0, 1].
    #[inline]
    pub fn next_sample(&mut self, rates: &EnvelopeRates) -> f64 {
        match self.stage {
            Stage::Idle => {}
            Stage::Attack => {
                self.level += rates.attack_inc;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = Stage::Decay;
                }
            }
            Stage::Decay => {
                self.level *= rates.decay_mul;
            }
        }
        self.level
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 44100.0;

    #[test]
    fn starts_idle_and_silent() {
        let mut env = Envelope::new();
        let rates = EnvelopeRates::new(0.01, 0.5, SR);
        assert_eq!(env.stage(), Stage::Idle);
        for _ in 0..100 {
            assert_eq!(env.next_sample(&rates), 0.0);
        }
    }

    #[test]
    fn attack_reaches_peak_in_time() {
        for attack in [0.001, 0.003, 0.01, 0.05, 0.4] {
            let rates = EnvelopeRates::new(attack, 0.5, SR);
            let mut env = Envelope::new();
            env.trigger();
            let budget = (attack * SR).ceil() as usize;
            let mut peak = 0.0_f64;
            for _ in 0..budget {
                peak = peak.max(env.next_sample(&rates));
            }
            assert!(peak >= 0.999, "attack {attack}: peak {peak} after {budget} samples");
        }
    }

    #[test]
    fn decays_monotonically_after_peak() {
        let rates = EnvelopeRates::new(0.003, 0.4, SR);
        let mut env = Envelope::new();
        env.trigger();
        while env.stage() == Stage::Attack {
            env.next_sample(&rates);
        }
        let mut prev = env.level();
        for _ in 0..SR as usize {
            let s = env.next_sample(&rates);
            assert!(s <= prev, "decay rose from {prev} to {s}");
            assert!(s >= 0.0);
            prev = s;
        }
        assert!(prev < 0.01, "envelope still at {prev} after a second");
    }

    #[test]
    fn retrigger_restarts_attack_from_current_level() {
        let rates = EnvelopeRates::new(0.01, 0.2, SR);
        let mut env = Envelope::new();
        env.trigger();
        for _ in 0..2000 {
            env.next_sample(&rates);
        }
        let before = env.level();
        assert_eq!(env.stage(), Stage::Decay);
        env.trigger();
        let after = env.next_sample(&rates);
        assert_eq!(env.stage(), Stage::Attack);
        assert!((after - (before + rates.attack_inc)).abs() < 1e-12);
    }

    #[test]
    fn decay_curve_is_cubic() {
        assert!((decay_seconds(0.0) - 0.01).abs() < 1e-12);
        assert!((decay_seconds(1.0) - 1.51).abs() < 1e-12);
        assert!((decay_seconds(0.5) - (0.01 + 0.125 * 1.5)).abs() < 1e-12);
    }

    #[test]
    fn attack_floor_applies() {
        let rates = EnvelopeRates::new(0.0, 0.0, SR);
        assert!((rates.attack_inc - 1.0 / (MIN_ATTACK * SR)).abs() < 1e-12);
    }
}
