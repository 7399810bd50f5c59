//! Engine construction settings.

use serde::{Deserialize, Serialize};

use crate::control::PATCH_COMMANDS;
use crate::error::SynthError;

/// Settings fixed for the lifetime of an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: f64,
    /// Frames per render block when rendering offline.
    pub block_size: usize,
    /// Slots in the control-to-engine command ring.
    pub command_capacity: usize,
    /// Slots in the engine-to-control step event ring.
    pub event_capacity: usize,
    /// Longest delay line, in seconds.
    pub max_delay_seconds: f64,
    /// Seed for the noise source and the dropout generator.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            sample_rate: 44100.0,
            block_size: 128,
            command_capacity: 256,
            event_capacity: 64,
            max_delay_seconds: 12.0,
            seed: 0x6a72_6f6f_6d7a,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(sample_rate: f64) -> Self {
        EngineConfig { sample_rate, ..Self::default() }
    }

    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SynthError> {
        serde_json::from_str(json).map_err(|e| SynthError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(SynthError::InvalidConfig(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.block_size == 0 {
            return Err(SynthError::InvalidConfig("block_size must be non-zero".into()));
        }
        if self.command_capacity < PATCH_COMMANDS {
            return Err(SynthError::InvalidConfig(format!(
                "command_capacity must hold a whole patch ({PATCH_COMMANDS}), got {}",
                self.command_capacity
            )));
        }
        if self.event_capacity == 0 {
            return Err(SynthError::InvalidConfig("event_capacity must be non-zero".into()));
        }
        if !(self.max_delay_seconds.is_finite() && self.max_delay_seconds > 0.0) {
            return Err(SynthError::InvalidConfig(format!(
                "max_delay_seconds must be positive, got {}",
                self.max_delay_seconds
            )));
        }
        Ok(())
    }

    /// Replace every invalid field with its default.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let positive = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        let nonzero = |v: usize, fallback: usize| if v > 0 { v } else { fallback };
        EngineConfig {
            sample_rate: positive(self.sample_rate, d.sample_rate),
            block_size: nonzero(self.block_size, d.block_size),
            command_capacity: if self.command_capacity >= PATCH_COMMANDS {
                self.command_capacity
            } else {
                d.command_capacity
            },
            event_capacity: nonzero(self.event_capacity, d.event_capacity),
            max_delay_seconds: positive(self.max_delay_seconds, d.max_delay_seconds),
            seed: self.seed,
        }
    }
}
