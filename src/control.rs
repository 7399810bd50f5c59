//! Control plane: commands into the engine and step events back out.
//!
//! Both directions are bounded lock-free SPSC rings allocated up front. The
//! [`Controller`] lives on the control thread; the engine holds the other
//! ends and only ever uses the non-blocking `try_*` calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use serde::Serialize;

use crate::dsp::sequencer::{STEP_COUNT, Step, normalize_steps};
use crate::error::SynthError;
use crate::params::{PARAM_COUNT, ParamId};
use crate::preset::Patch;

/// A control message for the render thread. Plain data, no allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetParam { id: ParamId, value: f64 },
    SetSteps([Step; STEP_COUNT]),
    Trigger,
    SetStep(usize),
}

/// Posted by the engine each time the sequencer advances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepEvent {
    /// Step advanced to.
    pub step: usize,
    pub pitch: f64,
    pub velocity: f64,
    /// Absolute output frame of the advance.
    pub frame: u64,
    /// `frame` in seconds of output time.
    pub time: f64,
}

/// Engine-side ends of the two rings.
pub(crate) struct EngineLink {
    pub commands: HeapCons<Command>,
    pub events: HeapProd<StepEvent>,
    pub dropped_events: Arc<AtomicU64>,
}

impl EngineLink {
    #[inline]
    pub fn next_command(&mut self) -> Option<Command> {
        self.commands.try_pop()
    }

    /// Post a step event, counting it as dropped if the ring is full.
    #[inline]
    pub fn post(&mut self, event: StepEvent) {
        if self.events.try_push(event).is_err() {
            self.dropped_events.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Commands sent by [`Controller::load_patch`]: every parameter but `run`,
/// plus the step table.
pub const PATCH_COMMANDS: usize = PARAM_COUNT;

/// Create a connected controller and engine link.
pub(crate) fn channel(command_capacity: usize, event_capacity: usize) -> (Controller, EngineLink) {
    let (cmd_prod, cmd_cons) = HeapRb::<Command>::new(command_capacity).split();
    let (evt_prod, evt_cons) = HeapRb::<StepEvent>::new(event_capacity).split();
    let dropped = Arc::new(AtomicU64::new(0));
    (
        Controller {
            commands: cmd_prod,
            events: evt_cons,
            dropped_events: Arc::clone(&dropped),
        },
        EngineLink {
            commands: cmd_cons,
            events: evt_prod,
            dropped_events: dropped,
        },
    )
}

/// Control-thread handle to a running engine.
pub struct Controller {
    commands: HeapProd<Command>,
    events: HeapCons<StepEvent>,
    dropped_events: Arc<AtomicU64>,
}

impl Controller {
    /// Queue a command for the next render block.
    pub fn send(&mut self, command: Command) -> Result<(), SynthError> {
        self.commands.try_push(command).map_err(|_| {
            let capacity = self.commands.capacity().get();
            log::warn!("command queue full ({capacity}), dropping {command:?}");
            SynthError::QueueFull { capacity }
        })
    }

    pub fn set_param(&mut self, id: ParamId, value: f64) -> Result<(), SynthError> {
        self.send(Command::SetParam { id, value })
    }

    /// Set a parameter by its wire name. Unknown names are rejected here so
    /// the render thread never sees them.
    pub fn set_param_by_name(&mut self, name: &str, value: f64) -> Result<(), SynthError> {
        let Some(id) = ParamId::from_name(name) else {
            log::warn!("rejecting unknown parameter '{name}'");
            return Err(SynthError::UnknownParam(name.to_string()));
        };
        self.set_param(id, value)
    }

    /// Replace the step table; short, long or malformed input is coerced.
    pub fn set_steps(&mut self, steps: &[Step]) -> Result<(), SynthError> {
        if steps.len() != STEP_COUNT {
            log::debug!("step table of {} entries padded/truncated to {STEP_COUNT}", steps.len());
        }
        self.send(Command::SetSteps(normalize_steps(steps)))
    }

    pub fn trigger(&mut self) -> Result<(), SynthError> {
        self.send(Command::Trigger)
    }

    pub fn set_step(&mut self, step: usize) -> Result<(), SynthError> {
        self.send(Command::SetStep(step))
    }

    /// Send every parameter of a patch except `run`, then its steps.
    ///
    /// Nothing is sent unless the whole patch fits in the queue.
    pub fn load_patch(&mut self, patch: &Patch) -> Result<(), SynthError> {
        let free = self.commands.vacant_len();
        if free < PATCH_COMMANDS {
            let capacity = self.commands.capacity().get();
            log::warn!(
                "patch '{}' needs {PATCH_COMMANDS} command slots, {free} free",
                patch.name
            );
            return Err(SynthError::QueueFull { capacity });
        }
        log::info!("loading patch '{}'", patch.name);
        for (id, value) in patch.params.iter() {
            if id != ParamId::Run {
                self.set_param(id, value)?;
            }
        }
        self.set_steps(&patch.steps)
    }

    pub fn poll_event(&mut self) -> Option<StepEvent> {
        self.events.try_pop()
    }

    pub fn drain_events(&mut self) -> Vec<StepEvent> {
        self.events.pop_iter().collect()
    }

    /// Step events lost because the event ring was full.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events.load(Ordering::Relaxed)
    }
}
