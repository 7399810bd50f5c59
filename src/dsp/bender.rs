//! Data-bender: sample-and-hold, bit reduction, random dropouts and drive.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::params::{ParamId, ParamStore};

/// Mix at or below this passes the input through untouched.
const BYPASS_MIX: f64 = 0.0001;
const MIN_BITS: u32 = 3;

/// Block-rate settings derived from the five bender knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenderSettings {
    pub mix: f64,
    /// Quantization levels minus one.
    pub steps: f64,
    /// Samples the held value is repeated for, minus one.
    pub hold: u32,
    pub drop: f64,
    pub drive: f64,
}

/// Bit depth for a crush amount: 16 bits at 0, never below 3.
pub fn bit_depth(crush: f64) -> u32 {
    let bits = (16.0 - crush.clamp(0.0, 1.0) * 12.0).floor() as u32;
    bits.max(MIN_BITS)
}

impl BenderSettings {
    pub fn from_params(p: &ParamStore) -> Self {
        let bits = bit_depth(p.get(ParamId::DataBenderCrush));
        BenderSettings {
            mix: p.get(ParamId::DataBenderMix),
            steps: ((1u32 << bits) - 1) as f64,
            hold: 1 + (1.0 + p.get(ParamId::DataBenderRate) * 96.0).floor() as u32,
            drop: p.get(ParamId::DataBenderDrop),
            drive: 1.0 + p.get(ParamId::DataBenderDrive) * 6.0,
        }
    }

    pub fn bypassed(&self) -> bool {
        self.mix <= BYPASS_MIX
    }
}

#[derive(Debug, Clone)]
pub struct DataBender {
    rng: SmallRng,
    counter: u32,
    held_l: f64,
    held_r: f64,
}

impl DataBender {
    pub fn new(seed: u64) -> Self {
        DataBender {
            rng: SmallRng::seed_from_u64(seed),
            counter: 0,
            held_l: 0.0,
            held_r: 0.0,
        }
    }

    #[inline]
    fn crush(x: f64, steps: f64) -> f64 {
        let clipped = x.clamp(-1.0, 1.0);
        ((clipped * 0.5 + 0.5) * steps).round() / steps * 2.0 - 1.0
    }

    /// Process one stereo frame.
    #[inline]
    pub fn process(&mut self, left: f64, right: f64, s: &BenderSettings) -> (f64, f64) {
        if s.bypassed() {
            return (left, right);
        }

        if self.counter == 0 {
            self.counter = s.hold;
            self.held_l = left;
            self.held_r = right;
        } else {
            self.counter -= 1;
        }

        let mut out_l = Self::crush(self.held_l, s.steps);
        let mut out_r = Self::crush(self.held_r, s.steps);

        let chance = s.drop * 0.12 + self.rng.gen_range(0.0f64..1.0) * s.drop * 0.02;
        if self.rng.gen_range(0.0f64..1.0) < chance {
            out_l = 0.0;
            out_r = 0.0;
        }

        out_l = (out_l * s.drive).tanh();
        out_r = (out_r * s.drive).tanh();

        (left + (out_l - left) * s.mix, right + (out_r - right) * s.mix)
    }
}
