//! Synth engine: owns the whole signal chain and renders blocks.
//!
//! Commands from the [`Controller`] are drained at the top of every block.
//! Block-rate coefficients are then computed once, and the chain runs frame
//! by frame: sequencer, voice, data-bender, delay, reverb, master stage.
//! Nothing in here allocates, locks or logs once construction is done.

use crate::config::EngineConfig;
use crate::control::{self, Command, Controller, EngineLink, StepEvent};
use crate::params::{ParamId, ParamStore};

use super::bender::{BenderSettings, DataBender};
use super::delay::{Delay, DelaySettings};
use super::master::{MasterSettings, MasterTone};
use super::reverb::Reverb;
use super::sequencer::{Sequencer, normalize_steps, phase_increment};
use super::voice::{Voice, VoiceBlock};

/// Reverb return level at full `reverbMix`.
const REVERB_RETURN: f64 = 1.5;

/// Offsets the bender's dropout generator from the noise source.
const BENDER_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct SynthEngine {
    config: EngineConfig,
    params: ParamStore,
    sequencer: Sequencer,
    voice: Voice,
    bender: DataBender,
    delay: Delay,
    reverb: Reverb,
    master: MasterTone,
    link: EngineLink,
    frames_rendered: u64,
    blocks_rendered: u64,
}

impl SynthEngine {
    /// Build an engine and the controller that drives it.
    ///
    /// Invalid config fields are replaced by their defaults.
    pub fn new(config: EngineConfig) -> (Self, Controller) {
        if let Err(e) = config.validate() {
            log::warn!("{e}; using defaults for invalid fields");
        }
        let config = config.sanitized();
        let sr = config.sample_rate;
        let (controller, link) = control::channel(config.command_capacity, config.event_capacity);

        let params = ParamStore::default();
        let mut reverb = Reverb::new(sr);
        reverb.update_decay(params.get(ParamId::ReverbDecay));

        let engine = SynthEngine {
            sequencer: Sequencer::new(),
            voice: Voice::new(sr, config.seed),
            bender: DataBender::new(config.seed ^ BENDER_SEED_SALT),
            delay: Delay::new(sr, config.max_delay_seconds, params.get(ParamId::DelayRate)),
            reverb,
            master: MasterTone::new(),
            params,
            link,
            frames_rendered: 0,
            blocks_rendered: 0,
            config,
        };
        log::info!(
            "synth engine ready: {} Hz, {:.1}s delay, {} command slots, {} event slots",
            sr,
            engine.config.max_delay_seconds,
            engine.config.command_capacity,
            engine.config.event_capacity
        );
        (engine, controller)
    }

    /// Apply one command immediately.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetParam { id, value } => self.set_param(id, value),
            Command::SetSteps(steps) => self.sequencer.set_steps(normalize_steps(&steps)),
            Command::Trigger => {
                self.sequencer.audition();
                self.voice.trigger();
            }
            Command::SetStep(step) => self.sequencer.set_step(step),
        }
    }

    fn set_param(&mut self, id: ParamId, value: f64) {
        let stored = self.params.set(id, value);
        match id {
            ParamId::Run => self.sequencer.set_running(stored >= 0.5),
            ParamId::DelayRate => self.delay.set_rate(stored),
            _ => {}
        }
    }

    /// Render one block into the two channel buffers.
    ///
    /// Renders `min(left.len(), right.len())` frames.
    pub fn render_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        while let Some(command) = self.link.next_command() {
            self.apply(command);
        }

        let sr = self.config.sample_rate;
        let voice_block = VoiceBlock::from_params(&self.params, sr);
        let bender = BenderSettings::from_params(&self.params);
        let delay = DelaySettings::from_params(&self.params);
        let master = MasterSettings::from_params(&self.params, sr);
        self.reverb.update_decay(self.params.get(ParamId::ReverbDecay));
        let reverb_return = self.params.get(ParamId::ReverbMix) * REVERB_RETURN;
        let clock = phase_increment(self.params.get(ParamId::Tempo), sr);

        let frames = left.len().min(right.len());
        for (i, (out_l, out_r)) in left.iter_mut().zip(right.iter_mut()).enumerate() {
            if let Some(advance) = self.sequencer.tick(clock) {
                if advance.triggered {
                    self.voice.trigger();
                }
                let frame = self.frames_rendered + i as u64;
                let step = self.sequencer.current();
                self.link.post(StepEvent {
                    step: advance.step,
                    pitch: step.pitch,
                    velocity: step.velocity,
                    frame,
                    time: frame as f64 / sr,
                });
            }

            let pitch = self.sequencer.current().pitch;
            let dry = self
                .voice
                .next_sample(&voice_block, pitch, self.sequencer.last_velocity());
            let (bent_l, bent_r) = self.bender.process(dry, dry, &bender);
            let (del_l, del_r) = self.delay.process(bent_l, bent_r, &delay);
            let (rev_l, rev_r) = self.reverb.process(del_l, del_r);
            let (l, r) = self.master.process(
                del_l + rev_l * reverb_return,
                del_r + rev_r * reverb_return,
                &master,
            );
            *out_l = l as f32;
            *out_r = r as f32;
        }

        self.frames_rendered += frames as u64;
        self.blocks_rendered += 1;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f64 {
        self.config.sample_rate
    }

    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn voice(&self) -> &Voice {
        &self.voice
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn blocks_rendered(&self) -> u64 {
        self.blocks_rendered
    }

    /// Output time in seconds of the next frame to be rendered.
    pub fn current_time(&self) -> f64 {
        self.frames_rendered as f64 / self.config.sample_rate
    }
}
