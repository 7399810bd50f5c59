//! The factory bank.
//!
//! Presets whose steps (or settings) were rolled at random are drawn from a
//! fixed seed, so the bank is the same on every load.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::dsp::sequencer::{STEP_COUNT, Step};
use crate::params::ParamId::*;

use super::Patch;

const BANK_SEED: u64 = 0x6a72_6f6f_6d7a_0040;

fn fixed(pairs: [(f64, f64); STEP_COUNT]) -> Vec<Step> {
    pairs.iter().map(|&(p, v)| Step::new(p, v)).collect()
}

fn rolled(
    rng: &mut SmallRng,
    mut step: impl FnMut(&mut SmallRng, usize) -> Step,
) -> Vec<Step> {
    (0..STEP_COUNT).map(|i| step(rng, i)).collect()
}

fn unit(rng: &mut SmallRng) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// `value` with probability `p`, otherwise 0.
fn gate(rng: &mut SmallRng, p: f64, value: f64) -> f64 {
    if rng.gen_bool(p) { value } else { 0.0 }
}

/// The factory bank, DEFAULT first.
pub fn factory_presets() -> Vec<Patch> {
    let mut rng = SmallRng::seed_from_u64(BANK_SEED);
    vec![
        Patch::default(),
        Patch::from_partial(
            "THUMP-THUMP",
            &[
                (Tempo, 128.0), (Vco1Freq, 0.2), (Vco1Wave, 1.0), (Vco1Level, 0.9),
                (Vco1EgAmt, 0.5), (Vco2Freq, 0.7), (Vco2Wave, 0.0), (Vco2Level, 0.4),
                (Vco2EgAmt, 0.5), (VcoDecay, 0.3), (Cutoff, 0.25), (Resonance, 0.3),
                (VcfEgAmt, 0.5), (VcaDecay, 0.2), (VcaAttack, 0.003), (Volume, 0.9),
                (ReverbMix, 0.0), (DelayWet, 0.0), (MasterHp, 0.0), (MasterLp, 1.0),
            ],
            &fixed([
                (0.5, 0.9), (0.5, 0.0), (0.5, 0.0), (0.5, 0.0),
                (0.5, 0.9), (0.5, 0.0), (0.5, 0.0), (0.5, 0.0),
            ]),
        ),
        Patch::from_partial(
            "METAL-HATS",
            &[
                (Tempo, 128.0), (Vco1Level, 0.0), (Vco2Level, 0.0), (NoiseLevel, 1.0),
                (Cutoff, 0.85), (Resonance, 0.3), (VcaDecay, 0.08), (VcaAttack, 0.001),
                (DelayWet, 0.0), (MasterHp, 0.6), (MasterLp, 1.0), (Volume, 0.7),
            ],
            &fixed([
                (0.5, 0.6), (0.5, 0.4), (0.5, 0.7), (0.5, 0.5),
                (0.5, 0.6), (0.5, 0.4), (0.5, 0.7), (0.5, 0.5),
            ]),
        ),
        Patch::from_partial(
            "TOM-TOM-CLUB",
            &[
                (Tempo, 115.0), (Vco1Freq, 0.35), (Vco1Wave, 1.0), (Vco1Level, 0.9),
                (Vco1EgAmt, 0.7), (VcoDecay, 0.35), (Cutoff, 0.4), (Resonance, 0.6),
                (VcfEgAmt, 0.6), (VcaDecay, 0.3), (VcaAttack, 0.005), (ReverbMix, 0.15),
                (MasterHp, 0.0), (MasterLp, 1.0),
            ],
            &fixed([
                (0.4, 0.8), (0.0, 0.0), (0.5, 0.7), (0.0, 0.0),
                (0.3, 0.9), (0.0, 0.0), (0.6, 0.6), (0.4, 0.5),
            ]),
        ),
        Patch::from_partial(
            "ROLL-CALL",
            &[
                (Tempo, 140.0), (Vco1Freq, 0.5), (Vco1Wave, 0.0), (Vco1Level, 0.5),
                (NoiseLevel, 0.6), (Cutoff, 0.65), (Resonance, 0.4), (VcfEgAmt, 0.5),
                (VcaDecay, 0.12), (VcaAttack, 0.002), (ReverbMix, 0.2), (MasterHp, 0.2),
                (MasterLp, 1.0),
            ],
            &fixed([
                (0.5, 0.7), (0.5, 0.75), (0.5, 0.8), (0.5, 0.85),
                (0.5, 0.9), (0.5, 0.85), (0.5, 0.8), (0.5, 0.9),
            ]),
        ),
        Patch::from_partial(
            "KICK-FLIP",
            &[
                (Tempo, 128.0), (Vco1Freq, 0.18), (Vco1Wave, 1.0), (Vco1Level, 1.0),
                (Vco1EgAmt, 0.6), (VcoDecay, 0.25), (Cutoff, 0.3), (Resonance, 0.25),
                (VcfEgAmt, 0.7), (VcaDecay, 0.2), (VcaAttack, 0.003), (DelayWet, 0.0),
                (MasterHp, 0.0), (MasterLp, 1.0),
            ],
            &fixed([
                (0.5, 0.9), (0.0, 0.0), (0.5, 0.0), (0.0, 0.0),
                (0.5, 0.9), (0.5, 0.6), (0.5, 0.0), (0.5, 0.7),
            ]),
        ),
        Patch::from_partial(
            "DOUBLE-TAP",
            &[
                (Tempo, 128.0), (Vco1Freq, 0.16), (Vco1Wave, 1.0), (Vco1Level, 1.0),
                (Vco1EgAmt, 0.5), (VcoDecay, 0.28), (Cutoff, 0.25), (Resonance, 0.3),
                (VcfEgAmt, 0.6), (VcaDecay, 0.22), (VcaAttack, 0.003), (DelayWet, 0.0),
                (MasterHp, 0.0), (MasterLp, 1.0),
            ],
            &fixed([
                (0.5, 0.9), (0.5, 0.8), (0.5, 0.0), (0.5, 0.0),
                (0.5, 0.9), (0.5, 0.0), (0.5, 0.7), (0.5, 0.0),
            ]),
        ),
        Patch::from_partial(
            "CLOSED-CASE",
            &[
                (Tempo, 135.0), (Vco1Level, 0.0), (Vco2Level, 0.0), (NoiseLevel, 1.0),
                (Cutoff, 0.75), (Resonance, 0.2), (VcaDecay, 0.04), (VcaAttack, 0.001),
                (DelayWet, 0.0), (MasterHp, 0.7), (MasterLp, 1.0), (Volume, 0.7),
            ],
            &fixed([
                (0.5, 0.0), (0.5, 0.7), (0.5, 0.0), (0.5, 0.8),
                (0.5, 0.0), (0.5, 0.7), (0.5, 0.0), (0.5, 0.8),
            ]),
        ),
        Patch::from_partial(
            "RIM-SHOT-CITY",
            &[
                (Tempo, 120.0), (Vco1Freq, 0.6), (Vco1Wave, 0.0), (Vco1Level, 0.7),
                (NoiseLevel, 0.4), (Vco1EgAmt, 0.7), (VcoDecay, 0.06), (Cutoff, 0.6),
                (Resonance, 0.5), (VcaDecay, 0.06), (VcaAttack, 0.001), (ReverbMix, 0.1),
                (MasterHp, 0.3), (MasterLp, 1.0),
            ],
            &fixed([
                (0.5, 0.0), (0.5, 0.0), (0.6, 0.9), (0.5, 0.0),
                (0.5, 0.0), (0.5, 0.0), (0.6, 0.9), (0.5, 0.0),
            ]),
        ),
        Patch::from_partial(
            "SNARE-TRAP",
            &[
                (Tempo, 128.0), (Vco1Freq, 0.45), (Vco1Wave, 0.0), (Vco1Level, 0.6),
                (NoiseLevel, 0.7), (Vco1EgAmt, 0.6), (VcoDecay, 0.15), (Cutoff, 0.55),
                (Resonance, 0.35), (VcfEgAmt, 0.6), (VcaDecay, 0.15), (VcaAttack, 0.002),
                (ReverbMix, 0.15), (MasterHp, 0.15), (MasterLp, 1.0),
            ],
            &fixed([
                (0.5, 0.0), (0.5, 0.0), (0.5, 0.9), (0.5, 0.0),
                (0.5, 0.0), (0.5, 0.0), (0.5, 0.9), (0.5, 0.3),
            ]),
        ),
        Patch::from_partial(
            "CRASH-LANDING",
            &[
                (Tempo, 100.0), (Vco1Level, 0.0), (Vco2Level, 0.0), (NoiseLevel, 1.0),
                (Cutoff, 0.9), (Resonance, 0.5), (VcaDecay, 0.6), (VcaAttack, 0.005),
                (ReverbMix, 0.4), (ReverbDecay, 0.8), (DelayWet, 0.0), (MasterHp, 0.4),
                (MasterLp, 1.0), (Volume, 0.75),
            ],
            &fixed([
                (0.5, 0.9), (0.5, 0.0), (0.5, 0.0), (0.5, 0.0),
                (0.5, 0.0), (0.5, 0.0), (0.5, 0.0), (0.5, 0.0),
            ]),
        ),
        Patch::from_partial(
            "OPEN-WINDOW",
            &[
                (Tempo, 128.0), (Vco1Level, 0.0), (Vco2Level, 0.0), (NoiseLevel, 1.0),
                (Cutoff, 0.8), (Resonance, 0.4), (VcaDecay, 0.25), (VcaAttack, 0.002),
                (DelayWet, 0.0), (ReverbMix, 0.1), (MasterHp, 0.5), (MasterLp, 1.0),
                (Volume, 0.7),
            ],
            &fixed([
                (0.5, 0.0), (0.5, 0.0), (0.5, 0.8), (0.5, 0.0),
                (0.5, 0.0), (0.5, 0.0), (0.5, 0.8), (0.5, 0.0),
            ]),
        ),
        Patch::from_partial(
            "SNAP-CRACKLE",
            &[
                (Tempo, 110.0), (Vco1Freq, 0.6), (NoiseLevel, 0.6), (Cutoff, 0.6),
                (VcfDecay, 0.1), (VcaDecay, 0.1), (ReverbMix, 0.1), (DelayWet, 0.0),
                (MasterHp, 0.2), (MasterLp, 1.0), (VcaAttack, 0.003),
            ],
            &fixed([
                (0.5, 0.8), (0.5, 0.2), (0.6, 0.9), (0.5, 0.3),
                (0.5, 0.8), (0.5, 0.2), (0.7, 0.9), (0.5, 0.1),
            ]),
        ),
        Patch::from_partial(
            "WOBBLE-GHOST",
            &[
                (Tempo, 75.0), (Vco1Freq, 0.2), (Vco2Freq, 0.21), (Vco1Wave, 1.0),
                (FmAmount, 0.3), (Cutoff, 0.35), (Resonance, 0.6), (VcfEgAmt, 0.4),
                (VcaAttack, 0.05), (VcaDecay, 0.6), (ReverbMix, 0.4), (ReverbDecay, 0.8),
                (DelayWet, 0.3), (DelayRate, 0.5), (MasterHp, 0.0), (MasterLp, 0.8),
            ],
            &rolled(&mut rng, |r, _| Step::new(r.gen_range(0.3..0.7), r.gen_range(0.4..0.9))),
        ),
        Patch::from_partial(
            "LASER-TAG",
            &[
                (Tempo, 145.0), (Vco1Freq, 0.6), (Vco2Freq, 0.8), (HardSync, 1.0),
                (Vco2EgAmt, 0.9), (VcoDecay, 0.2), (Cutoff, 0.8), (Resonance, 0.1),
                (VcaDecay, 0.1), (DelayWet, 0.2), (DelayRate, 0.125), (DelayFdbk, 0.6),
                (MasterHp, 0.0), (MasterLp, 1.0), (VcaAttack, 0.003),
            ],
            &fixed([
                (0.8, 0.9), (0.1, 0.0), (0.7, 0.8), (0.1, 0.0),
                (0.9, 0.9), (0.1, 0.0), (0.6, 0.8), (0.1, 0.0),
            ]),
        ),
        Patch::from_partial(
            "RUST-BUCKET",
            &[
                (Tempo, 90.0), (Vco1Wave, 1.0), (Vco2Wave, 1.0), (FmAmount, 0.8),
                (NoiseLevel, 0.3), (Cutoff, 0.7), (Resonance, 0.7), (VcaDecay, 0.2),
                (DelayWet, 0.1), (MasterHp, 0.1), (MasterLp, 0.9), (VcaAttack, 0.003),
            ],
            &rolled(&mut rng, |r, _| Step::new(unit(r), gate(r, 0.7, 0.7))),
        ),
        Patch::from_partial(
            "DEEP-DIVE",
            &[
                (Tempo, 60.0), (Vco1Freq, 0.05), (Vco1Wave, 0.0), (Cutoff, 0.2),
                (VcfEgAmt, 0.1), (VcaAttack, 0.02), (VcaDecay, 0.9), (ReverbMix, 0.6),
                (ReverbDecay, 0.9), (DelayWet, 0.0), (MasterHp, 0.0), (MasterLp, 0.4),
            ],
            &fixed([
                (0.5, 0.8), (0.5, 0.0), (0.4, 0.0), (0.5, 0.0),
                (0.6, 0.7), (0.5, 0.0), (0.3, 0.0), (0.5, 0.0),
            ]),
        ),
        Patch::from_partial(
            "DATA-SKIP",
            &[
                (Tempo, 100.0), (Vco1Freq, 0.4), (FmAmount, 0.5), (SeqPitchMod, 1.0),
                (Cutoff, 0.5), (VcfEgAmt, 0.8), (VcfDecay, 0.1), (VcaDecay, 0.1),
                (DelayWet, 0.3), (DelayRate, 0.125), (DelayWidth, 0.9), (MasterHp, 0.1),
                (MasterLp, 1.0), (VcaAttack, 0.003),
            ],
            &rolled(&mut rng, |r, _| Step::new(unit(r), gate(r, 0.6, 0.8))),
        ),
        Patch::from_partial(
            "PING-PONGER",
            &[
                (Tempo, 125.0), (Vco1Freq, 0.7), (VcoDecay, 0.05), (Cutoff, 0.8),
                (VcaDecay, 0.05), (DelayWet, 0.5), (DelayFdbk, 0.7), (DelayRate, 0.25),
                (DelayWidth, 1.0), (MasterHp, 0.0), (MasterLp, 1.0), (VcaAttack, 0.003),
            ],
            &fixed([
                (0.9, 0.9), (0.0, 0.0), (0.0, 0.0), (0.8, 0.7),
                (0.0, 0.0), (0.9, 0.9), (0.0, 0.0), (0.7, 0.7),
            ]),
        ),
        Patch::from_partial(
            "ACID-RAIN",
            &[
                (Tempo, 135.0), (Vco1Freq, 0.3), (Vco1Wave, 1.0), (Cutoff, 0.3),
                (Resonance, 0.85), (VcfEgAmt, 0.7), (VcfDecay, 0.3), (DelayWet, 0.3),
                (DelayRate, 0.25), (MasterHp, 0.0), (MasterLp, 1.0), (VcaAttack, 0.003),
            ],
            &rolled(&mut rng, |r, _| Step::new(unit(r), 0.8)),
        ),
        Patch::from_partial(
            "STATIC-SHOCK",
            &[
                (Tempo, 150.0), (NoiseLevel, 1.0), (Vco1Level, 0.0), (Vco2Level, 0.0),
                (Cutoff, 0.9), (Resonance, 0.4), (VcaDecay, 0.05), (DelayWet, 0.0),
                (MasterHp, 0.5), (MasterLp, 1.0), (VcaAttack, 0.001),
            ],
            &rolled(&mut rng, |r, _| Step::new(0.5, gate(r, 0.5, 0.9))),
        ),
        Patch::from_partial(
            "WOOD-BLOCK",
            &[
                (Tempo, 128.0), (Vco1Freq, 0.5), (Vco1Wave, 0.0), (Vco1EgAmt, 0.6),
                (VcoDecay, 0.05), (Cutoff, 0.5), (Resonance, 0.5), (VcaDecay, 0.05),
                (ReverbMix, 0.2), (MasterHp, 0.1), (MasterLp, 1.0), (VcaAttack, 0.003),
            ],
            &fixed([
                (0.5, 0.9), (0.6, 0.7), (0.4, 0.8), (0.7, 0.6),
                (0.5, 0.9), (0.8, 0.5), (0.4, 0.8), (0.6, 0.7),
            ]),
        ),
        Patch::from_partial(
            "SUB-ORBITAL",
            &[
                (Tempo, 50.0), (Vco1Freq, 0.1), (Vco2Freq, 0.15), (FmAmount, 0.2),
                (Cutoff, 0.25), (Resonance, 0.6), (VcaAttack, 0.05), (VcaDecay, 0.8),
                (DelayWet, 0.4), (DelayRate, 1.0), (ReverbMix, 0.5), (MasterHp, 0.0),
                (MasterLp, 0.3),
            ],
            &fixed([
                (0.2, 0.8), (0.0, 0.0), (0.3, 0.0), (0.0, 0.0),
                (0.25, 0.7), (0.0, 0.0), (0.1, 0.0), (0.0, 0.0),
            ]),
        ),
        Patch::from_partial(
            "KLAXON-ALARM",
            &[
                (Tempo, 160.0), (Vco1Freq, 0.5), (Vco2Freq, 0.52), (Vco1Wave, 1.0),
                (Vco2Wave, 1.0), (Cutoff, 1.0), (VcaDecay, 0.5), (DelayWet, 0.0),
                (MasterHp, 0.0), (MasterLp, 1.0), (VcaAttack, 0.005),
            ],
            &fixed([
                (0.8, 0.9), (0.8, 0.9), (0.0, 0.0), (0.0, 0.0),
                (0.8, 0.9), (0.8, 0.9), (0.0, 0.0), (0.0, 0.0),
            ]),
        ),
        Patch::from_partial(
            "DATA-STREAM",
            &[
                (Tempo, 140.0), (Vco1Freq, 0.8), (FmAmount, 0.9), (Vco2Freq, 0.1),
                (Cutoff, 0.6), (VcfEgAmt, 0.9), (VcfDecay, 0.05), (VcaDecay, 0.05),
                (DelayWet, 0.2), (MasterHp, 0.0), (MasterLp, 1.0), (VcaAttack, 0.003),
            ],
            &rolled(&mut rng, |r, _| Step::new(unit(r), unit(r))),
        ),
        Patch::from_partial(
            "CAVE-DRIP",
            &[
                (Tempo, 80.0), (Vco1Freq, 0.8), (Vco1Wave, 0.0), (VcoDecay, 0.1),
                (Cutoff, 0.4), (Resonance, 0.8), (VcfEgAmt, 0.6), (ReverbMix, 0.8),
                (ReverbDecay, 0.9), (DelayWet, 0.0), (MasterHp, 0.1), (MasterLp, 1.0),
                (VcaAttack, 0.003),
            ],
            &fixed([
                (0.9, 0.8), (0.0, 0.0), (0.0, 0.0), (0.8, 0.6),
                (0.0, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0),
            ]),
        ),
        Patch::from_partial(
            "MECHA-STOMP",
            &[
                (Tempo, 70.0), (Vco1Freq, 0.15), (Vco1Wave, 1.0), (NoiseLevel, 0.4),
                (Cutoff, 0.4), (VcfEgAmt, 0.8), (VcfDecay, 0.4), (VcaDecay, 0.4),
                (DelayWet, 0.2), (DelayRate, 0.125), (MasterHp, 0.0), (MasterLp, 1.0),
                (VcaAttack, 0.01),
            ],
            &fixed([
                (0.5, 0.9), (0.0, 0.0), (0.5, 0.9), (0.0, 0.0),
                (0.5, 0.9), (0.0, 0.0), (0.6, 0.9), (0.2, 0.3),
            ]),
        ),
        Patch::from_partial(
            "SWARM-HIVE",
            &[
                (Tempo, 170.0), (Vco1Freq, 0.4), (Vco2Freq, 0.43), (FmAmount, 0.4),
                (NoiseLevel, 0.2), (Cutoff, 0.6), (VcfEgAmt, 0.2), (VcaAttack, 0.02),
                (VcaDecay, 0.2), (DelayWet, 0.5), (DelayRate, 0.0625), (DelayFdbk, 0.8),
                (MasterHp, 0.0), (MasterLp, 1.0),
            ],
            &rolled(&mut rng, |r, _| Step::new(r.gen_range(0.5..0.7), 0.7)),
        ),
        Patch::from_partial(
            "VOID-CALLER",
            &[
                (Tempo, 40.0), (Vco1Freq, 0.1), (Vco2Freq, 0.105), (Vco1Wave, 0.0),
                (Vco2Wave, 0.0), (Cutoff, 0.2), (Resonance, 0.3), (VcaAttack, 0.05),
                (VcaDecay, 1.0), (ReverbMix, 0.9), (ReverbDecay, 1.0), (DelayWet, 0.6),
                (DelayRate, 1.0), (MasterHp, 0.0), (MasterLp, 1.0),
            ],
            &fixed([
                (0.1, 0.9), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0),
                (0.2, 0.8), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0),
            ]),
        ),
        Patch::from_partial(
            "BRAIN-MELT",
            &[
                (Tempo, 220.0), (Vco1Freq, 0.5), (Vco2Freq, 0.9), (FmAmount, 1.0),
                (HardSync, 1.0), (NoiseLevel, 0.5), (Cutoff, 0.8), (Resonance, 0.9),
                (NoiseVcfMod, 0.8), (VcaDecay, 0.3), (DelayWet, 0.4), (DelayRate, 0.125),
                (DelayFdbk, 0.9), (ReverbMix, 0.3), (MasterHp, 0.0), (MasterLp, 1.0),
                (VcaAttack, 0.003),
            ],
            &rolled(&mut rng, |r, _| Step::new(unit(r), unit(r))),
        ),
        Patch::from_partial(
            "FREQUENCY-DRIFT",
            &[
                (Tempo, 55.0), (Vco1Freq, 0.3), (Vco2Freq, 0.305), (Vco1Wave, 1.0),
                (Vco2Wave, 1.0), (FmAmount, 0.6), (SeqPitchMod, 1.0), (Cutoff, 0.4),
                (Resonance, 0.5), (VcfEgAmt, 0.3), (VcaAttack, 0.03), (VcaDecay, 0.7),
                (ReverbMix, 0.7), (DelayWet, 0.5), (DelayRate, 0.75), (MasterHp, 0.0),
                (MasterLp, 0.7),
            ],
            &rolled(&mut rng, |r, i| {
                Step::new(0.3 + i as f64 * 0.08, r.gen_range(0.6..0.9))
            }),
        ),
        Patch::from_partial(
            "GLITCH-STORM",
            &[
                (Tempo, 180.0), (Vco1Freq, 0.7), (NoiseLevel, 0.4), (Cutoff, 0.7),
                (VcfDecay, 0.03), (VcaDecay, 0.03), (DataBenderMix, 0.8), (DataBenderCrush, 0.9),
                (DataBenderDrop, 0.7), (DataBenderDrive, 0.8), (DelayWet, 0.3), (DelayFdbk, 0.5),
                (MasterHp, 0.2), (MasterLp, 1.0), (VcaAttack, 0.001),
            ],
            &rolled(&mut rng, |r, _| {
                let pitch = unit(r);
                let velocity = if r.gen_bool(0.8) { unit(r) } else { 0.0 };
                Step::new(pitch, velocity)
            }),
        ),
        Patch::from_partial(
            "REVERB-TUNNEL",
            &[
                (Tempo, 95.0), (Vco1Freq, 0.4), (Vco1Wave, 0.0), (VcoDecay, 0.2),
                (Cutoff, 0.5), (VcfEgAmt, 0.4), (VcaDecay, 0.2), (ReverbMix, 0.95),
                (ReverbDecay, 1.0), (DelayWet, 0.7), (DelayFdbk, 0.85), (DelayRate, 0.5),
                (MasterHp, 0.0), (MasterLp, 0.9), (VcaAttack, 0.01),
            ],
            &fixed([
                (0.6, 0.8), (0.0, 0.0), (0.0, 0.0), (0.4, 0.6),
                (0.0, 0.0), (0.7, 0.7), (0.0, 0.0), (0.0, 0.0),
            ]),
        ),
        Patch::from_partial(
            "CHAOS-THEORY",
            &[
                (Tempo, 155.0),
                (Vco1Freq, rng.gen_range(0.2..0.8)),
                (Vco2Freq, rng.gen_range(0.2..0.8)),
                (Vco1Wave, gate(&mut rng, 0.5, 1.0)),
                (HardSync, gate(&mut rng, 0.5, 1.0)),
                (FmAmount, rng.gen_range(0.0..0.8)),
                (NoiseLevel, rng.gen_range(0.0..0.6)),
                (Cutoff, unit(&mut rng)),
                (Resonance, rng.gen_range(0.0..0.7)),
                (VcaDecay, rng.gen_range(0.0..0.5)),
                (DelayWet, rng.gen_range(0.0..0.5)),
                (MasterHp, 0.0),
                (MasterLp, 1.0),
                (VcaAttack, 0.003),
            ],
            &rolled(&mut rng, |r, _| Step::new(unit(r), unit(r))),
        ),
        Patch::from_partial(
            "BIT-CRUSHER",
            &[
                (Tempo, 130.0), (Vco1Freq, 0.35), (Vco1Wave, 0.0), (Vco1Level, 0.9),
                (Cutoff, 0.6), (Resonance, 0.3), (VcaDecay, 0.15), (DataBenderMix, 1.0),
                (DataBenderCrush, 0.95), (DataBenderDrop, 0.3), (DataBenderDrive, 0.7),
                (DataBenderRate, 0.2),
                (MasterHp, 0.0), (MasterLp, 1.0), (VcaAttack, 0.003),
            ],
            &fixed([
                (0.5, 0.9), (0.5, 0.0), (0.6, 0.7), (0.4, 0.5),
                (0.5, 0.9), (0.5, 0.0), (0.7, 0.8), (0.3, 0.6),
            ]),
        ),
        Patch::from_partial(
            "ECHO-CHAMBER",
            &[
                (Tempo, 105.0), (Vco1Freq, 0.55), (VcoDecay, 0.08), (Cutoff, 0.75),
                (VcfDecay, 0.1), (VcaDecay, 0.08), (DelayWet, 0.9), (DelayFdbk, 0.9),
                (DelayRate, 0.375), (DelayWidth, 1.0), (ReverbMix, 0.5), (MasterHp, 0.0),
                (MasterLp, 1.0), (VcaAttack, 0.003),
            ],
            &fixed([
                (0.8, 0.8), (0.0, 0.0), (0.6, 0.7), (0.0, 0.0),
                (0.0, 0.0), (0.9, 0.8), (0.0, 0.0), (0.5, 0.6),
            ]),
        ),
        Patch::from_partial(
            "PHASE-SHIFTER",
            &[
                (Tempo, 118.0), (Vco1Freq, 0.45), (Vco2Freq, 0.453), (Vco1Wave, 1.0),
                (Vco2Wave, 1.0), (Vco1Level, 0.8), (Vco2Level, 0.8), (FmAmount, 0.15),
                (Cutoff, 0.6), (Resonance, 0.55), (VcfEgAmt, 0.5), (VcaDecay, 0.25),
                (DelayWet, 0.4), (DelayRate, 0.25), (MasterHp, 0.0), (MasterLp, 1.0),
                (VcaAttack, 0.003),
            ],
            &rolled(&mut rng, |_, i| {
                let velocity = if i % 2 == 0 { 0.8 } else { 0.0 };
                Step::new(0.4 + (i % 4) as f64 * 0.1, velocity)
            }),
        ),
        Patch::from_partial(
            "NOISE-FLOOR",
            &[
                (Tempo, 140.0), (Vco1Level, 0.2), (Vco2Level, 0.0), (NoiseLevel, 1.0),
                (Cutoff, 0.65), (Resonance, 0.6), (VcfEgAmt, 0.7), (VcfDecay, 0.12),
                (VcaDecay, 0.12), (NoiseVcfMod, 0.6), (DelayWet, 0.2), (MasterHp, 0.3),
                (MasterLp, 1.0), (VcaAttack, 0.002),
            ],
            &fixed([
                (0.5, 0.8), (0.5, 0.5), (0.5, 0.0), (0.5, 0.9),
                (0.5, 0.0), (0.5, 0.7), (0.5, 0.6), (0.5, 0.0),
            ]),
        ),
        Patch::from_partial(
            "COSMIC-DUST",
            &[
                (Tempo, 45.0), (Vco1Freq, 0.6), (Vco1Wave, 0.0), (Vco1Level, 0.5),
                (NoiseLevel, 0.3), (VcoDecay, 0.15), (Cutoff, 0.7), (Resonance, 0.7),
                (VcfEgAmt, 0.5), (VcaAttack, 0.02), (VcaDecay, 0.4), (ReverbMix, 0.85),
                (ReverbDecay, 1.0), (DelayWet, 0.6), (DelayRate, 1.0), (MasterHp, 0.2),
                (MasterLp, 0.9),
            ],
            &fixed([
                (0.8, 0.7), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0),
                (0.0, 0.0), (0.6, 0.5), (0.0, 0.0), (0.0, 0.0),
            ]),
        ),
        Patch::from_partial(
            "TIME-WARP",
            &[
                (Tempo, 165.0), (Vco1Freq, 0.4), (Vco2Freq, 0.6), (Vco1Wave, 1.0),
                (FmAmount, 0.5), (Cutoff, 0.55), (Resonance, 0.4), (VcfEgAmt, 0.6),
                (VcaDecay, 0.18), (DelayWet, 0.8), (DelayFdbk, 0.75), (DelayRate, 0.1875),
                (DelayWidth, 0.8), (ReverbMix, 0.3), (MasterHp, 0.0), (MasterLp, 1.0),
                (VcaAttack, 0.003),
            ],
            &fixed([
                (0.3, 0.9), (0.5, 0.7), (0.7, 0.8), (0.4, 0.0),
                (0.6, 0.9), (0.3, 0.0), (0.8, 0.8), (0.2, 0.6),
            ]),
        ),
    ]
}

/// Look up a factory preset by name.
pub fn factory_preset(name: &str) -> Option<Patch> {
    factory_presets().into_iter().find(|p| p.name == name)
}
