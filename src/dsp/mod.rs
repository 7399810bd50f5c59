//! DSP: the voice, its effects and the engine that runs them.
//!
//! Everything here runs on the audio thread. State is allocated when the
//! engine is built and only mutated afterwards.

pub mod bender;
pub mod delay;
pub mod engine;
pub mod envelope;
pub mod filter;
pub mod ladder;
pub mod master;
pub mod mixer;
pub mod oscillator;
pub mod renderer;
pub mod reverb;
pub mod sequencer;
pub mod smooth;
pub mod voice;
