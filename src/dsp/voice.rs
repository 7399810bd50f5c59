//! Voice: the monophonic signal path from oscillators to VCA.

use crate::params::{ParamId, ParamStore, SeqPitchMode, VelModTarget, Waveform};

use super::envelope::{Envelope, EnvelopeRates};
use super::ladder::LadderFilter;
use super::mixer::{MixLevels, NoiseSource, mix, soft_clip};
use super::oscillator::{Oscillator, knob_to_freq};
use super::smooth::{SMOOTH_COEFF, SmoothValue};

/// Octaves of pitch sweep at full envelope depth.
const PITCH_EG_OCTAVES: f64 = 4.0;
/// Octaves spanned by the sequencer pitch lane.
const SEQ_PITCH_OCTAVES: f64 = 10.0;
/// Hz of oscillator-2 deviation per unit of FM.
const FM_DEPTH_HZ: f64 = 4000.0;

/// Parameter snapshot taken once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceBlock {
    pub vco_rates: EnvelopeRates,
    pub vcf_rates: EnvelopeRates,
    pub vca_rates: EnvelopeRates,
    pub osc1_freq: f64,
    pub osc2_freq: f64,
    /// Bipolar pitch-envelope depths in [-1, 1].
    pub osc1_eg: f64,
    pub osc2_eg: f64,
    pub osc1_wave: Waveform,
    pub osc2_wave: Waveform,
    pub hard_sync: bool,
    pub fm_amount: f64,
    pub seq_pitch: SeqPitchMode,
    pub levels: MixLevels,
    pub cutoff: f64,
    pub resonance: f64,
    /// Bipolar filter-envelope depth in [-1, 1].
    pub vcf_eg: f64,
    pub noise_vcf_mod: f64,
    pub vel_target: VelModTarget,
}

fn bipolar(v: f64) -> f64 {
    (v - 0.5) * 2.0
}

impl VoiceBlock {
    pub fn from_params(p: &ParamStore, sample_rate: f64) -> Self {
        // One attack time drives all three generators.
        let attack = p.get(ParamId::VcaAttack);
        VoiceBlock {
            vco_rates: EnvelopeRates::new(attack, p.get(ParamId::VcoDecay), sample_rate),
            vcf_rates: EnvelopeRates::new(attack, p.get(ParamId::VcfDecay), sample_rate),
            vca_rates: EnvelopeRates::new(attack, p.get(ParamId::VcaDecay), sample_rate),
            osc1_freq: knob_to_freq(p.get(ParamId::Vco1Freq)),
            osc2_freq: knob_to_freq(p.get(ParamId::Vco2Freq)),
            osc1_eg: bipolar(p.get(ParamId::Vco1EgAmt)),
            osc2_eg: bipolar(p.get(ParamId::Vco2EgAmt)),
            osc1_wave: p.waveform(ParamId::Vco1Wave),
            osc2_wave: p.waveform(ParamId::Vco2Wave),
            hard_sync: p.flag(ParamId::HardSync),
            fm_amount: p.get(ParamId::FmAmount),
            seq_pitch: p.seq_pitch_mode(),
            levels: MixLevels {
                osc1: p.get(ParamId::Vco1Level),
                osc2: p.get(ParamId::Vco2Level),
                noise: p.get(ParamId::NoiseLevel),
            },
            cutoff: p.get(ParamId::Cutoff),
            resonance: p.get(ParamId::Resonance),
            vcf_eg: bipolar(p.get(ParamId::VcfEgAmt)),
            noise_vcf_mod: p.get(ParamId::NoiseVcfMod),
            vel_target: p.vel_mod_target(),
        }
    }

    /// FM amount and resonance after velocity modulation.
    #[inline]
    pub fn velocity_routing(&self, vel: f64) -> (f64, f64) {
        match self.vel_target {
            VelModTarget::Volume => (self.fm_amount, self.resonance),
            VelModTarget::Resonance => {
                (self.fm_amount, self.resonance + 0.5 * vel * (1.0 - self.resonance))
            }
            VelModTarget::Fm => ((self.fm_amount * (1.0 + vel)).min(1.0), self.resonance),
        }
    }

    /// Normalized cutoff after filter-envelope and noise modulation.
    #[inline]
    pub fn modulated_cutoff(&self, vcf_env: f64, vel: f64, noise: f64) -> f64 {
        let eg_mod = self.vcf_eg * vcf_env * vel;
        (self.cutoff + eg_mod * 0.5 + self.noise_vcf_mod * noise * 0.2).clamp(0.001, 0.999)
    }
}

/// Two oscillators, noise, ladder filter and VCA, plus the three envelopes
/// and the pitch/velocity smoothers that feed them.
#[derive(Debug, Clone)]
pub struct Voice {
    osc1: Oscillator,
    osc2: Oscillator,
    noise: NoiseSource,
    filter: LadderFilter,
    pub vco_eg: Envelope,
    pub vcf_eg: Envelope,
    pub vca_eg: Envelope,
    pitch: SmoothValue,
    velocity: SmoothValue,
}

impl Voice {
    pub fn new(sample_rate: f64, seed: u64) -> Self {
        Voice {
            osc1: Oscillator::new(sample_rate),
            osc2: Oscillator::new(sample_rate),
            noise: NoiseSource::new(seed),
            filter: LadderFilter::new(sample_rate),
            vco_eg: Envelope::new(),
            vcf_eg: Envelope::new(),
            vca_eg: Envelope::new(),
            pitch: SmoothValue::new(0.5),
            velocity: SmoothValue::new(0.5),
        }
    }

    /// Restart all three envelopes.
    pub fn trigger(&mut self) {
        self.vco_eg.trigger();
        self.vcf_eg.trigger();
        self.vca_eg.trigger();
    }

    /// Render one sample.
    ///
    /// `step_pitch` is the current step's pitch and `velocity` the last
    /// triggered velocity; both are smoothed here.
    #[inline]
    pub fn next_sample(&mut self, b: &VoiceBlock, step_pitch: f64, velocity: f64) -> f64 {
        let vco_env = self.vco_eg.next_sample(&b.vco_rates);
        let vcf_env = self.vcf_eg.next_sample(&b.vcf_rates);
        let vca_env = self.vca_eg.next_sample(&b.vca_rates);

        self.velocity.set(velocity);
        let vel = self.velocity.next(SMOOTH_COEFF);
        self.pitch.set(step_pitch);
        let pitch = self.pitch.next(SMOOTH_COEFF);

        let mut f1 = b.osc1_freq * 2.0_f64.powf(b.osc1_eg * PITCH_EG_OCTAVES * vco_env * vel);
        let mut f2 = b.osc2_freq * 2.0_f64.powf(b.osc2_eg * PITCH_EG_OCTAVES * vco_env * vel);
        let seq_factor = 2.0_f64.powf((pitch - 0.5) * SEQ_PITCH_OCTAVES);
        match b.seq_pitch {
            SeqPitchMode::Off => {}
            SeqPitchMode::Both => {
                f1 *= seq_factor;
                f2 *= seq_factor;
            }
            SeqPitchMode::Osc2Only => f2 *= seq_factor,
        }

        let (fm_amount, resonance) = b.velocity_routing(vel);

        let o1 = self.osc1.next_sample(f1, b.osc1_wave);
        let fm = o1 * fm_amount * FM_DEPTH_HZ;
        if fm.is_finite() {
            f2 += fm;
        }
        if b.hard_sync && self.osc1.wrapped() {
            self.osc2.sync_to(self.osc1.phase());
        }
        let o2 = self.osc2.next_sample(f2, b.osc2_wave);
        let noise = self.noise.next_sample();

        let pre = mix(o1, o2, noise, &b.levels);

        let cutoff = b.modulated_cutoff(vcf_env, vel, noise);
        let filtered = self.filter.process(pre, knob_to_freq(cutoff), resonance);

        soft_clip(filtered * vca_env * vel)
    }

    pub fn smoothed_velocity(&self) -> f64 {
        self.velocity.value()
    }
}
