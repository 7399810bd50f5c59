//! Parameter table: every control the voice reads, indexed by a closed enum.
//!
//! Control values arrive by name on the wire (`"vco1Freq"`, `"delayRate"`, ...)
//! and are resolved to a [`ParamId`] once, on the control side. The render
//! thread only ever indexes a flat array.

/// Number of parameters in the table.
pub const PARAM_COUNT: usize = 38;

/// Identifier of a single voice parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Vco1Freq,
    Vco1Wave,
    Vco1Level,
    Vco1EgAmt,
    Vco2Freq,
    Vco2Wave,
    Vco2Level,
    Vco2EgAmt,
    HardSync,
    FmAmount,
    VcoDecay,
    SeqPitchMod,
    NoiseLevel,
    Cutoff,
    Resonance,
    VcfEgAmt,
    VcfDecay,
    NoiseVcfMod,
    VcaAttack,
    VcaDecay,
    VelModTarget,
    Volume,
    Tempo,
    Run,
    ReverbDecay,
    ReverbMix,
    DataBenderMix,
    DataBenderCrush,
    DataBenderDrop,
    DataBenderDrive,
    DataBenderRate,
    DelayRate,
    DelayFdbk,
    DelayWidth,
    DelayWet,
    MasterHp,
    MasterLp,
    MasterRes,
}

/// Static description of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub id: ParamId,
    /// Wire name used by the control plane and the patch format.
    pub name: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    /// Stepped parameters only take integer values (switches, modes).
    pub stepped: bool,
}

const fn cont(id: ParamId, name: &'static str, default: f64) -> ParamSpec {
    ParamSpec { id, name, default, min: 0.0, max: 1.0, stepped: false }
}

const fn ranged(id: ParamId, name: &'static str, default: f64, min: f64, max: f64) -> ParamSpec {
    ParamSpec { id, name, default, min, max, stepped: false }
}

const fn switch(id: ParamId, name: &'static str, default: f64, max: f64) -> ParamSpec {
    ParamSpec { id, name, default, min: 0.0, max, stepped: true }
}

/// The parameter table, in `ParamId` declaration order.
pub const PARAMS: [ParamSpec; PARAM_COUNT] = [
    cont(ParamId::Vco1Freq, "vco1Freq", 0.35),
    switch(ParamId::Vco1Wave, "vco1Wave", 0.0, 1.0),
    cont(ParamId::Vco1Level, "vco1Level", 1.0),
    cont(ParamId::Vco1EgAmt, "vco1EgAmt", 0.2),
    cont(ParamId::Vco2Freq, "vco2Freq", 0.35),
    switch(ParamId::Vco2Wave, "vco2Wave", 0.0, 1.0),
    cont(ParamId::Vco2Level, "vco2Level", 0.3),
    cont(ParamId::Vco2EgAmt, "vco2EgAmt", 0.5),
    switch(ParamId::HardSync, "hardSync", 0.0, 1.0),
    cont(ParamId::FmAmount, "fmAmount", 0.2),
    cont(ParamId::VcoDecay, "vcoDecay", 0.4),
    switch(ParamId::SeqPitchMod, "seqPitchMod", 1.0, 2.0),
    cont(ParamId::NoiseLevel, "noiseLevel", 0.0),
    cont(ParamId::Cutoff, "cutoff", 0.45),
    cont(ParamId::Resonance, "resonance", 0.2),
    cont(ParamId::VcfEgAmt, "vcfEgAmt", 0.7),
    cont(ParamId::VcfDecay, "vcfDecay", 0.35),
    cont(ParamId::NoiseVcfMod, "noiseVcfMod", 0.2),
    ranged(ParamId::VcaAttack, "vcaAttack", 0.003, 0.001, 0.4),
    cont(ParamId::VcaDecay, "vcaDecay", 0.0),
    switch(ParamId::VelModTarget, "velModTarget", 0.0, 2.0),
    cont(ParamId::Volume, "volume", 0.8),
    ranged(ParamId::Tempo, "tempo", 128.0, 40.0, 300.0),
    switch(ParamId::Run, "run", 0.0, 1.0),
    cont(ParamId::ReverbDecay, "reverbDecay", 0.7),
    cont(ParamId::ReverbMix, "reverbMix", 0.0),
    cont(ParamId::DataBenderMix, "dataBenderMix", 0.0),
    cont(ParamId::DataBenderCrush, "dataBenderCrush", 0.6),
    cont(ParamId::DataBenderDrop, "dataBenderDrop", 0.25),
    cont(ParamId::DataBenderDrive, "dataBenderDrive", 0.5),
    cont(ParamId::DataBenderRate, "dataBenderRate", 0.35),
    ranged(ParamId::DelayRate, "delayRate", 0.25, 1.0 / 64.0, 1.0),
    cont(ParamId::DelayFdbk, "delayFdbk", 0.4),
    cont(ParamId::DelayWidth, "delayWidth", 0.5),
    cont(ParamId::DelayWet, "delayWet", 0.0),
    cont(ParamId::MasterHp, "masterHP", 0.0),
    cont(ParamId::MasterLp, "masterLP", 1.0),
    cont(ParamId::MasterRes, "masterRes", 0.2),
];

/// Delay times as fractions of a whole note, shortest first.
pub const DELAY_DIVISIONS: [f64; 12] = [
    1.0 / 64.0,
    1.0 / 32.0,
    3.0 / 64.0,
    1.0 / 16.0,
    1.0 / 12.0,
    3.0 / 32.0,
    1.0 / 8.0,
    3.0 / 16.0,
    1.0 / 4.0,
    3.0 / 8.0,
    1.0 / 2.0,
    1.0,
];

/// Snap a whole-note fraction to the nearest musical division.
pub fn quantize_delay_rate(value: f64) -> f64 {
    let mut best = DELAY_DIVISIONS[0];
    let mut best_diff = (value - best).abs();
    for &d in &DELAY_DIVISIONS[1..] {
        let diff = (value - d).abs();
        if diff < best_diff {
            best = d;
            best_diff = diff;
        }
    }
    best
}

impl ParamId {
    /// Every id, in table order.
    pub fn all() -> impl Iterator<Item = ParamId> {
        PARAMS.iter().map(|p| p.id)
    }

    pub fn spec(self) -> &'static ParamSpec {
        &PARAMS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Resolve a wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<ParamId> {
        PARAMS.iter().find(|p| p.name == name).map(|p| p.id)
    }
}

/// Oscillator waveform switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Triangle,
    Pulse,
}

/// Where the sequencer's per-step pitch is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqPitchMode {
    Off,
    Both,
    Osc2Only,
}

/// What step velocity drives beyond the amplitude envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelModTarget {
    Volume,
    Resonance,
    Fm,
}

/// Flat store of every parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamStore {
    values: [f64; PARAM_COUNT],
}

impl Default for ParamStore {
    fn default() -> Self {
        let mut values = [0.0; PARAM_COUNT];
        for p in &PARAMS {
            values[p.id as usize] = p.default;
        }
        ParamStore { values }
    }
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, id: ParamId) -> f64 {
        self.values[id as usize]
    }

    /// Store a value, coerced into the parameter's valid range.
    ///
    /// Returns the value actually stored. Non-finite input leaves the
    /// previous value in place.
    pub fn set(&mut self, id: ParamId, value: f64) -> f64 {
        if let Some(v) = coerce(id, value) {
            self.values[id as usize] = v;
        }
        self.values[id as usize]
    }

    #[inline]
    pub fn flag(&self, id: ParamId) -> bool {
        self.get(id) >= 0.5
    }

    pub fn waveform(&self, id: ParamId) -> Waveform {
        if self.get(id) >= 0.5 {
            Waveform::Pulse
        } else {
            Waveform::Triangle
        }
    }

    pub fn seq_pitch_mode(&self) -> SeqPitchMode {
        match self.get(ParamId::SeqPitchMod) as u8 {
            0 => SeqPitchMode::Off,
            1 => SeqPitchMode::Both,
            _ => SeqPitchMode::Osc2Only,
        }
    }

    pub fn vel_mod_target(&self) -> VelModTarget {
        match self.get(ParamId::VelModTarget) as u8 {
            0 => VelModTarget::Volume,
            1 => VelModTarget::Resonance,
            _ => VelModTarget::Fm,
        }
    }

    /// `(id, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamId, f64)> + '_ {
        ParamId::all().map(|id| (id, self.get(id)))
    }
}

fn coerce(id: ParamId, value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let spec = id.spec();
    let mut v = value.clamp(spec.min, spec.max);
    if spec.stepped {
        v = v.round();
    }
    if id == ParamId::DelayRate {
        v = quantize_delay_rate(v);
    }
    Some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_enum_order() {
        for (i, p) in PARAMS.iter().enumerate() {
            assert_eq!(p.id as usize, i, "{} is out of place", p.name);
            assert!(p.default >= p.min && p.default <= p.max, "{} default out of range", p.name);
        }
    }

    #[test]
    fn names_round_trip() {
        for id in ParamId::all() {
            assert_eq!(ParamId::from_name(id.name()), Some(id));
        }
        assert_eq!(ParamId::from_name("masterHP"), Some(ParamId::MasterHp));
        assert_eq!(ParamId::from_name("notAParam"), None);
    }

    #[test]
    fn out_of_range_values_clamp() {
        let mut p = ParamStore::new();
        assert_eq!(p.set(ParamId::Tempo, 1000.0), 300.0);
        assert_eq!(p.set(ParamId::Tempo, 10.0), 40.0);
        assert_eq!(p.set(ParamId::Cutoff, -0.5), 0.0);
        assert_eq!(p.set(ParamId::VcaAttack, 0.0), 0.001);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut p = ParamStore::new();
        p.set(ParamId::Volume, 0.5);
        assert_eq!(p.set(ParamId::Volume, f64::NAN), 0.5);
        assert_eq!(p.set(ParamId::Volume, f64::INFINITY), 0.5);
    }

    #[test]
    fn stepped_params_round() {
        let mut p = ParamStore::new();
        p.set(ParamId::SeqPitchMod, 1.6);
        assert_eq!(p.seq_pitch_mode(), SeqPitchMode::Osc2Only);
        p.set(ParamId::SeqPitchMod, 0.2);
        assert_eq!(p.seq_pitch_mode(), SeqPitchMode::Off);
        p.set(ParamId::Vco2Wave, 0.9);
        assert_eq!(p.waveform(ParamId::Vco2Wave), Waveform::Pulse);
        p.set(ParamId::VelModTarget, 7.0);
        assert_eq!(p.vel_mod_target(), VelModTarget::Fm);
    }

    #[test]
    fn delay_rate_snaps_to_divisions() {
        let mut p = ParamStore::new();
        assert_eq!(p.set(ParamId::DelayRate, 0.26), 0.25);
        assert_eq!(p.set(ParamId::DelayRate, 0.19), 3.0 / 16.0);
        assert_eq!(p.set(ParamId::DelayRate, 0.0), 1.0 / 64.0);
        assert_eq!(p.set(ParamId::DelayRate, 5.0), 1.0);
        assert_eq!(quantize_delay_rate(0.085), 1.0 / 12.0);
    }

    #[test]
    fn defaults_are_the_factory_patch() {
        let p = ParamStore::default();
        assert_eq!(p.get(ParamId::Tempo), 128.0);
        assert!(!p.flag(ParamId::Run));
        assert_eq!(p.seq_pitch_mode(), SeqPitchMode::Both);
        assert_eq!(p.vel_mod_target(), VelModTarget::Volume);
        assert_eq!(p.iter().count(), PARAM_COUNT);
    }
}
