//! 8-step sequencer driven by a free-running phase accumulator.

use serde::{Deserialize, Serialize};

/// Number of steps in the sequence.
pub const STEP_COUNT: usize = 8;

/// Steps at or below this velocity advance silently.
pub const TRIGGER_THRESHOLD: f64 = 0.05;

/// Phase preloaded when the clock starts so the first step fires at once.
const START_PHASE: f64 = 0.99;

/// One sequencer step. Both fields are normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub pitch: f64,
    pub velocity: f64,
}

impl Step {
    pub const fn new(pitch: f64, velocity: f64) -> Self {
        Step { pitch, velocity }
    }
}

/// Factory step table.
pub const DEFAULT_STEPS: [Step; STEP_COUNT] = [
    Step::new(0.5, 0.5),
    Step::new(0.5, 0.4),
    Step::new(0.7, 0.7),
    Step::new(0.6, 0.2),
    Step::new(0.5, 0.5),
    Step::new(0.4, 0.2),
    Step::new(0.5, 0.6),
    Step::new(0.6, 0.3),
];

/// Coerce an arbitrary list of steps into a full table.
///
/// Missing entries come from [`DEFAULT_STEPS`], extra entries are dropped,
/// non-finite fields fall back to the default for that index and the rest
/// are clamped into [0, 1].
pub fn normalize_steps(steps: &[Step]) -> [Step; STEP_COUNT] {
    let mut out = DEFAULT_STEPS;
    for (i, (slot, s)) in out.iter_mut().zip(steps.iter()).enumerate() {
        *slot = Step::new(
            unit_or(s.pitch, DEFAULT_STEPS[i].pitch),
            unit_or(s.velocity, DEFAULT_STEPS[i].velocity),
        );
    }
    out
}

fn unit_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { fallback }
}

/// A step advance produced by [`Sequencer::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    pub step: usize,
    /// Whether the new step was loud enough to fire the envelopes.
    pub triggered: bool,
}

/// Sequencer state: step table, position and clock phase.
#[derive(Debug, Clone)]
pub struct Sequencer {
    steps: [Step; STEP_COUNT],
    current: usize,
    phase: f64,
    running: bool,
    last_velocity: f64,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    pub fn new() -> Self {
        Sequencer {
            steps: DEFAULT_STEPS,
            current: 0,
            phase: 0.0,
            running: false,
            last_velocity: 0.5,
        }
    }

    /// Start or stop the clock. Starting from stopped preloads the phase.
    pub fn set_running(&mut self, run: bool) {
        if run && !self.running {
            self.phase = START_PHASE;
        }
        self.running = run;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Replace the whole step table.
    pub fn set_steps(&mut self, steps: [Step; STEP_COUNT]) {
        self.steps = steps;
    }

    pub fn steps(&self) -> &[Step; STEP_COUNT] {
        &self.steps
    }

    /// Jump to a step (wrapped into range) and reset the clock phase.
    pub fn set_step(&mut self, step: usize) {
        self.current = step % STEP_COUNT;
        self.phase = 0.0;
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Step {
        self.steps[self.current]
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Velocity of the most recent trigger.
    pub fn last_velocity(&self) -> f64 {
        self.last_velocity
    }

    /// Audition the current step without moving the clock.
    pub fn audition(&mut self) -> f64 {
        self.last_velocity = self.current().velocity;
        self.last_velocity
    }

    /// Advance the clock by one sample. `phase_inc` is steps per sample.
    #[inline]
    pub fn tick(&mut self, phase_inc: f64) -> Option<Advance> {
        if !self.running {
            return None;
        }
        self.phase += phase_inc;
        if self.phase < 1.0 {
            return None;
        }
        self.phase -= 1.0;
        self.current = (self.current + 1) % STEP_COUNT;
        let step = self.steps[self.current];
        let triggered = step.velocity > TRIGGER_THRESHOLD;
        if triggered {
            self.last_velocity = step.velocity;
        }
        Some(Advance { step: self.current, triggered })
    }
}

/// Clock increment per sample for a tempo in BPM (four steps per beat).
#[inline]
pub fn phase_increment(tempo: f64, sample_rate: f64) -> f64 {
    (tempo * 4.0 / 60.0) / sample_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_clock_never_advances() {
        let mut seq = Sequencer::new();
        for _ in 0..100_000 {
            assert!(seq.tick(0.01).is_none());
        }
        assert_eq!(seq.current_step(), 0);
    }

    #[test]
    fn start_fires_first_step_almost_immediately() {
        let mut seq = Sequencer::new();
        seq.set_running(true);
        let inc = phase_increment(120.0, 44100.0);
        let mut n = 0;
        while seq.tick(inc).is_none() {
            n += 1;
        }
        assert!(n < 600, "first step took {n} samples");
        assert_eq!(seq.current_step(), 1);
    }

    #[test]
    fn restarting_a_running_clock_keeps_phase() {
        let mut seq = Sequencer::new();
        seq.set_running(true);
        seq.tick(0.5);
        let phase = seq.phase();
        seq.set_running(true);
        assert_eq!(seq.phase(), phase);
    }

    #[test]
    fn advance_interval_matches_tempo() {
        let sr = 44100.0;
        for tempo in [40.0, 97.0, 128.0, 300.0] {
            let mut seq = Sequencer::new();
            seq.set_running(true);
            let inc = phase_increment(tempo, sr);
            let expected = sr * 60.0 / (tempo * 4.0);
            let mut last = None;
            for i in 0..(sr as usize * 2) {
                if seq.tick(inc).is_some() {
                    if let Some(prev) = last {
                        let gap = (i - prev) as f64;
                        assert!((gap - expected).abs() <= 1.0, "tempo {tempo}: gap {gap}, expected {expected}");
                    }
                    last = Some(i);
                }
            }
        }
    }

    #[test]
    fn quiet_steps_do_not_trigger() {
        let mut seq = Sequencer::new();
        let mut steps = DEFAULT_STEPS;
        steps[1].velocity = 0.05;
        steps[2].velocity = 0.9;
        seq.set_steps(steps);
        seq.set_running(true);
        let a = loop {
            if let Some(a) = seq.tick(0.1) {
                break a;
            }
        };
        assert_eq!(a, Advance { step: 1, triggered: false });
        assert_eq!(seq.last_velocity(), 0.5);
        let b = loop {
            if let Some(b) = seq.tick(0.1) {
                break b;
            }
        };
        assert_eq!(b, Advance { step: 2, triggered: true });
        assert_eq!(seq.last_velocity(), 0.9);
    }

    #[test]
    fn wraps_after_eight_steps() {
        let mut seq = Sequencer::new();
        seq.set_running(true);
        let mut seen = Vec::new();
        for _ in 0..2000 {
            if let Some(a) = seq.tick(0.1) {
                seen.push(a.step);
            }
        }
        assert_eq!(&seen[..9], &[1, 2, 3, 4, 5, 6, 7, 0, 1]);
    }

    #[test]
    fn set_step_wraps_and_resets_phase() {
        let mut seq = Sequencer::new();
        seq.set_running(true);
        seq.set_step(11);
        assert_eq!(seq.current_step(), 3);
        assert_eq!(seq.phase(), 0.0);
    }

    #[test]
    fn audition_uses_current_velocity() {
        let mut seq = Sequencer::new();
        seq.set_step(2);
        assert_eq!(seq.audition(), 0.7);
        assert_eq!(seq.current_step(), 2);
    }

    #[test]
    fn normalize_pads_truncates_and_coerces() {
        let short = [Step::new(0.1, 0.9), Step::new(f64::NAN, 2.0)];
        let out = normalize_steps(&short);
        assert_eq!(out[0], Step::new(0.1, 0.9));
        assert_eq!(out[1], Step::new(DEFAULT_STEPS[1].pitch, 1.0));
        assert_eq!(out[2..], DEFAULT_STEPS[2..]);

        let long = [Step::new(0.3, 0.3); 12];
        assert_eq!(normalize_steps(&long), [Step::new(0.3, 0.3); STEP_COUNT]);
    }
}
