pub mod config;
pub mod control;
pub mod dsp;
pub mod error;
pub mod params;
pub mod preset;

use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::control::Controller;
use crate::dsp::engine::SynthEngine;
use crate::error::SynthError;
use crate::preset::Patch;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the jroomz-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: the factory preset bank as a JSON array of patches.
#[wasm_bindgen]
pub fn factory_presets_json() -> Result<String, JsValue> {
    let patches: Result<Vec<Value>, SynthError> = preset::factory_presets()
        .iter()
        .map(|p| Ok(serde_json::from_str(&p.to_json()?)?))
        .collect();
    let patches = patches.map_err(to_js)?;
    serde_json::to_string(&patches).map_err(|e| JsValue::from_str(&format!("{e}")))
}

fn to_js(e: SynthError) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}

/// Engine plus controller, packaged for an AudioWorklet processor.
///
/// The worklet's message handler calls the `post_*` methods and its
/// `process` callback calls [`WorkletSynth::render`], so both ends of the
/// command ring live on the audio thread here.
#[wasm_bindgen]
pub struct WorkletSynth {
    engine: SynthEngine,
    controller: Controller,
}

#[wasm_bindgen]
impl WorkletSynth {
    #[wasm_bindgen(constructor)]
    pub fn new(sample_rate: f64) -> WorkletSynth {
        let (engine, controller) = SynthEngine::new(EngineConfig::with_sample_rate(sample_rate));
        WorkletSynth { engine, controller }
    }

    /// Fill one output block.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.engine.render_block(left, right);
    }

    pub fn post_param(&mut self, id: &str, value: f64) -> Result<(), JsValue> {
        self.controller.set_param_by_name(id, value).map_err(to_js)
    }

    /// Replace the step table from a JSON array of `{pitch, velocity}`.
    pub fn post_steps(&mut self, steps_json: &str) -> Result<(), JsValue> {
        self.apply_steps_json(steps_json).map_err(to_js)
    }

    pub fn trigger(&mut self) -> Result<(), JsValue> {
        self.controller.trigger().map_err(to_js)
    }

    pub fn set_step(&mut self, step: usize) -> Result<(), JsValue> {
        self.controller.set_step(step).map_err(to_js)
    }

    pub fn load_patch(&mut self, patch_json: &str) -> Result<(), JsValue> {
        self.apply_patch_json(patch_json).map_err(to_js)
    }

    /// Step events since the last call, as a JSON array.
    pub fn take_step_events(&mut self) -> String {
        self.step_events_json()
    }

    pub fn current_time(&self) -> f64 {
        self.engine.current_time()
    }
}

impl WorkletSynth {
    fn apply_steps_json(&mut self, steps_json: &str) -> Result<(), SynthError> {
        let value: Value = serde_json::from_str(steps_json)?;
        let values = value
            .as_array()
            .ok_or_else(|| SynthError::InvalidPatch("steps must be a JSON array".into()))?;
        let steps = preset::steps_from_values(values);
        self.controller.set_steps(&steps)
    }

    fn apply_patch_json(&mut self, patch_json: &str) -> Result<(), SynthError> {
        let patch = Patch::from_json(patch_json)?;
        self.controller.load_patch(&patch)
    }

    fn step_events_json(&mut self) -> String {
        let events = self.controller.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }
}
