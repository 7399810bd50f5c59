//! Patches: the `{name, params, steps}` save format and the factory bank.
//!
//! Any JSON object is accepted as a patch. A missing `params` object or
//! `steps` array reads as empty, and anything partial or malformed is merged
//! onto the defaults rather than rejected.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::dsp::sequencer::{DEFAULT_STEPS, STEP_COUNT, Step, normalize_steps};
use crate::error::SynthError;
use crate::params::{ParamId, ParamStore};

mod factory;

pub use factory::{factory_preset, factory_presets};

/// Attack used for patches saved with the old slow envelope switch.
const LEGACY_SLOW_ATTACK: f64 = 0.02;
const LEGACY_FAST_ATTACK: f64 = 0.003;

/// A complete voice setup.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub name: String,
    pub params: ParamStore,
    pub steps: [Step; STEP_COUNT],
}

impl Default for Patch {
    fn default() -> Self {
        Patch {
            name: "DEFAULT".to_string(),
            params: ParamStore::default(),
            steps: DEFAULT_STEPS,
        }
    }
}

/// Wire form written by [`Patch::to_json`].
#[derive(Serialize)]
struct PatchFile<'a> {
    name: &'a str,
    params: BTreeMap<&'static str, f64>,
    steps: &'a [Step],
}

impl Patch {
    /// Parse a saved patch.
    pub fn from_json(json: &str) -> Result<Self, SynthError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, SynthError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SynthError::InvalidPatch("patch must be a JSON object".into()))?;
        let empty = Map::new();
        let params = obj.get("params").and_then(Value::as_object).unwrap_or_else(|| {
            log::debug!("patch has no 'params' object, using defaults");
            &empty
        });
        let steps = obj.get("steps").and_then(Value::as_array).map_or(&[][..], Vec::as_slice);

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("UNTITLED")
            .to_string();

        Ok(Patch {
            name,
            params: merge_params(params),
            steps: normalize_steps(&steps_from_values(steps)),
        })
    }

    pub fn to_json(&self) -> Result<String, SynthError> {
        let file = PatchFile {
            name: &self.name,
            params: self.params.iter().map(|(id, v)| (id.name(), v)).collect(),
            steps: &self.steps,
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Build a patch from a partial parameter list over the defaults.
    fn from_partial(name: &str, params: &[(ParamId, f64)], steps: &[Step]) -> Self {
        let mut store = ParamStore::default();
        for &(id, v) in params {
            store.set(id, v);
        }
        Patch {
            name: name.to_string(),
            params: store,
            steps: normalize_steps(steps),
        }
    }
}

fn merge_params(map: &Map<String, Value>) -> ParamStore {
    let mut store = ParamStore::default();
    for (key, value) in map {
        let Some(id) = ParamId::from_name(key) else {
            if key != "vcaEgMode" {
                log::debug!("ignoring unknown patch parameter '{key}'");
            }
            continue;
        };
        match value.as_f64() {
            Some(v) => {
                store.set(id, v);
            }
            None => log::debug!("ignoring non-numeric value for '{key}'"),
        }
    }
    if !map.contains_key(ParamId::VcaAttack.name())
        && let Some(mode) = map.get("vcaEgMode")
    {
        let attack = if mode.as_f64() == Some(1.0) {
            LEGACY_SLOW_ATTACK
        } else {
            LEGACY_FAST_ATTACK
        };
        log::debug!("migrating vcaEgMode {mode} to vcaAttack {attack}");
        store.set(ParamId::VcaAttack, attack);
    }
    store
}

/// Read up to eight `{pitch, velocity}` objects; a missing or non-numeric
/// field takes the default for that index.
pub fn steps_from_values(values: &[Value]) -> Vec<Step> {
    if values.len() != STEP_COUNT {
        log::debug!("got {} steps, expected {STEP_COUNT}", values.len());
    }
    values
        .iter()
        .take(STEP_COUNT)
        .enumerate()
        .map(|(i, v)| {
            let field = |name: &str, fallback: f64| {
                v.get(name).and_then(Value::as_f64).unwrap_or(fallback)
            };
            Step::new(
                field("pitch", DEFAULT_STEPS[i].pitch),
                field("velocity", DEFAULT_STEPS[i].velocity),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_params_merge_onto_defaults() {
        let patch = Patch::from_json(
            r#"{"name": "T", "params": {"cutoff": 0.9, "tempo": 90}, "steps": []}"#,
        )
        .unwrap();
        assert_eq!(patch.name, "T");
        assert_eq!(patch.params.get(ParamId::Cutoff), 0.9);
        assert_eq!(patch.params.get(ParamId::Tempo), 90.0);
        assert_eq!(patch.params.get(ParamId::Resonance), 0.2);
        assert_eq!(patch.steps, DEFAULT_STEPS);
    }

    #[test]
    fn malformed_fields_are_coerced() {
        let patch = Patch::from_json(
            r#"{
                "params": {"cutoff": "loud", "wobble": 3, "resonance": 7},
                "steps": [{"pitch": 0.1}, {"velocity": 0.9}, {}, {"pitch": 0.2, "velocity": 0.3},
                          {}, {}, {}, {}, {"pitch": 1.0, "velocity": 1.0}]
            }"#,
        )
        .unwrap();
        assert_eq!(patch.name, "UNTITLED");
        assert_eq!(patch.params.get(ParamId::Cutoff), 0.45);
        assert_eq!(patch.params.get(ParamId::Resonance), 1.0);
        assert_eq!(patch.steps[0], Step::new(0.1, DEFAULT_STEPS[0].velocity));
        assert_eq!(patch.steps[1], Step::new(DEFAULT_STEPS[1].pitch, 0.9));
        assert_eq!(patch.steps[2], DEFAULT_STEPS[2]);
        assert_eq!(patch.steps[3], Step::new(0.2, 0.3));
    }

    #[test]
    fn legacy_envelope_mode_migrates() {
        let slow = Patch::from_json(r#"{"params": {"vcaEgMode": 1}, "steps": []}"#).unwrap();
        assert_eq!(slow.params.get(ParamId::VcaAttack), LEGACY_SLOW_ATTACK);

        let fast = Patch::from_json(r#"{"params": {"vcaEgMode": 0}, "steps": []}"#).unwrap();
        assert_eq!(fast.params.get(ParamId::VcaAttack), LEGACY_FAST_ATTACK);

        let explicit =
            Patch::from_json(r#"{"params": {"vcaEgMode": 1, "vcaAttack": 0.1}, "steps": []}"#)
                .unwrap();
        assert_eq!(explicit.params.get(ParamId::VcaAttack), 0.1);
    }

    #[test]
    fn missing_params_or_steps_fall_back_to_defaults() {
        let no_steps = Patch::from_json(r#"{"name": "X", "params": {"tempo": 90}}"#).unwrap();
        assert_eq!(no_steps.params.get(ParamId::Tempo), 90.0);
        assert_eq!(no_steps.steps, DEFAULT_STEPS);

        let no_params = Patch::from_json(
            r#"{"name": "Y", "steps": [{"pitch": 0.1, "velocity": 0.2}]}"#,
        )
        .unwrap();
        assert_eq!(no_params.params, ParamStore::default());
        assert_eq!(no_params.steps[0], Step::new(0.1, 0.2));
        assert_eq!(no_params.steps[1], DEFAULT_STEPS[1]);

        let wrong_types = Patch::from_json(r#"{"params": [1, 2], "steps": "none"}"#).unwrap();
        assert_eq!(wrong_types.params, ParamStore::default());
        assert_eq!(wrong_types.steps, DEFAULT_STEPS);

        assert_eq!(Patch::from_json("{}").unwrap().name, "UNTITLED");
    }

    #[test]
    fn non_object_documents_are_rejected() {
        for bad in ["not json", "[]", "42", r#""patch""#] {
            let err = Patch::from_json(bad).unwrap_err();
            assert!(matches!(err, SynthError::InvalidPatch(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn saved_patch_loads_back() {
        let patch = factory_preset("LASER-TAG").expect("factory preset");
        let json = patch.to_json().unwrap();
        assert!(json.contains("\"delayRate\""));
        assert_eq!(Patch::from_json(&json).unwrap(), patch);
    }

    #[test]
    fn factory_bank_starts_with_default() {
        let bank = factory_presets();
        assert_eq!(bank[0], Patch::default());
        assert_eq!(bank.len(), 40);
        let kick = factory_preset("KICK-FLIP").unwrap();
        assert_eq!(kick.params.get(ParamId::Vco1Freq), 0.18);
        assert_eq!(kick.params.get(ParamId::Vco2Level), 0.3);
        assert_eq!(kick.steps[1], Step::new(0.0, 0.0));
        assert!(factory_preset("NOPE").is_none());
    }

    #[test]
    fn factory_names_are_unique() {
        let bank = factory_presets();
        let names: std::collections::BTreeSet<&str> =
            bank.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), bank.len());
        for name in ["DATA-SKIP", "PING-PONGER", "BIT-CRUSHER", "ECHO-CHAMBER", "REVERB-TUNNEL"] {
            assert!(names.contains(name), "{name} missing from the bank");
        }
    }

    #[test]
    fn rolled_presets_are_stable_across_loads() {
        assert_eq!(factory_presets(), factory_presets());

        let chaos = factory_preset("CHAOS-THEORY").unwrap();
        assert_eq!(chaos.params.get(ParamId::Tempo), 155.0);
        let fm = chaos.params.get(ParamId::FmAmount);
        assert!((0.0..0.8).contains(&fm));
        assert!([0.0, 1.0].contains(&chaos.params.get(ParamId::HardSync)));

        let drift = factory_preset("FREQUENCY-DRIFT").unwrap();
        for (i, step) in drift.steps.iter().enumerate() {
            assert!((step.pitch - (0.3 + i as f64 * 0.08)).abs() < 1e-12);
            assert!((0.6..0.9).contains(&step.velocity));
        }

        let skip = factory_preset("DATA-SKIP").unwrap();
        assert!(skip.steps.iter().all(|s| s.velocity == 0.0 || s.velocity == 0.8));
    }
}
