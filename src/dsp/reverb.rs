//! Reverb effect: 8-line feedback delay network.
//!
//! A mono send goes through a shared pre-delay, then through one short
//! allpass diffuser per line into the network. Each line feeds back through
//! a one-pole damping lowpass scaled to the mid decay, plus a low shelf
//! below the crossover that lifts the gain to the low-band decay at DC.
//! A Householder matrix mixes the lines before they are written back.

use std::f64::consts::PI;

/// Number of lines in the network.
const LINES: usize = 8;

/// Line lengths at 44.1 kHz, mutually prime.
const BASE_DELAYS: [usize; LINES] = [1087, 1283, 1511, 1777, 1987, 2243, 2503, 2719];

/// Diffuser lengths at 44.1 kHz.
const DIFFUSER_DELAYS: [usize; LINES] = [113, 151, 197, 233, 271, 311, 353, 389];
const DIFFUSER_FEEDBACK: f32 = 0.5;

const PREDELAY_SECONDS: f64 = 0.02;
const CROSSOVER_HZ: f64 = 250.0;
/// Frequency at which the damping filter hits the high-band decay target.
const DAMPING_HZ: f64 = 6000.0;
/// High-band decay time relative to the mid band.
const HF_RATIO: f64 = 0.5;
/// Low-band decay time relative to the mid band.
const LOW_RATIO: f64 = 1.3;

const INPUT_GAIN: f64 = 0.353_553_390_593_273_8; // 1/sqrt(8)
const OUTPUT_GAIN: f64 = 0.25;

/// Decay parameter changes smaller than this keep the current coefficients.
const DECAY_EPSILON: f64 = 1e-3;

/// Map the normalized decay knob to (low, mid) RT60 in seconds.
pub fn decay_times(param: f64) -> (f64, f64) {
    let mid = 0.5 * 20.0_f64.powf(param.clamp(0.0, 1.0));
    (mid * LOW_RATIO, mid)
}

/// Per-sample gain of a loop of `length` samples that decays 60 dB in `rt60` seconds.
#[inline]
pub fn loop_gain(length: usize, rt60: f64, sample_rate: f64) -> f64 {
    10.0_f64.powf(-3.0 * length as f64 / (sample_rate * rt60.max(1e-3)))
}

/// One-pole lowpass coefficient `a` (for `y = (1-a)x + a y'`) whose gain at
/// normalized frequency `w` equals `target`, with unity gain at DC.
pub fn damping_coeff(target: f64, w: f64) -> f64 {
    if target >= 0.9999 {
        return 0.0;
    }
    let t2 = target * target;
    let b = 1.0 - t2 * w.cos();
    let d = 1.0 - t2;
    let disc = (b * b - d * d).max(0.0);
    ((b - disc.sqrt()) / d).clamp(0.0, 0.9999)
}

/// Allpass diffuser.
#[derive(Debug, Clone)]
struct AllpassFilter {
    buffer: Vec<f32>,
    index: usize,
}

impl AllpassFilter {
    fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            index: 0,
        }
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let bufout = self.buffer[self.index];
        let output = bufout - input;

        self.buffer[self.index] = input + bufout * DIFFUSER_FEEDBACK;
        self.index = (self.index + 1) % self.buffer.len();

        output
    }

    fn clear(&mut self) {
        self.buffer.fill(0.0);
    }
}

/// One recirculating line with its band split and feedback gains.
#[derive(Debug, Clone)]
struct Line {
    buffer: Vec<f32>,
    index: usize,
    low: f64,
    damp: f64,
    low_gain: f64,
    mid_gain: f64,
    damp_coeff: f64,
}

impl Line {
    fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            index: 0,
            low: 0.0,
            damp: 0.0,
            low_gain: 0.0,
            mid_gain: 0.0,
            damp_coeff: 0.0,
        }
    }

    #[inline]
    fn output(&self) -> f64 {
        self.buffer[self.index] as f64
    }

    /// Damp and attenuate this sample's line output.
    ///
    /// Gain is `low_gain` at DC, `mid_gain` through the mids and falls to the
    /// high-band target at the damping frequency.
    #[inline]
    fn feedback(&mut self, y: f64, crossover: f64) -> f64 {
        self.low += crossover * (y - self.low);
        self.damp = (1.0 - self.damp_coeff) * y + self.damp_coeff * self.damp;
        self.mid_gain * self.damp + (self.low_gain - self.mid_gain) * self.low
    }

    #[inline]
    fn write(&mut self, value: f64) {
        self.buffer[self.index] = value as f32;
        self.index = (self.index + 1) % self.buffer.len();
    }

    fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.low = 0.0;
        self.damp = 0.0;
    }
}

/// Stereo FDN reverb. Returns the wet signal only.
#[derive(Debug, Clone)]
pub struct Reverb {
    predelay: Vec<f32>,
    predelay_index: usize,
    diffusers: [AllpassFilter; LINES],
    lines: [Line; LINES],
    crossover: f64,
    sample_rate: f64,
    decay_param: Option<f64>,
}

impl Reverb {
    /// Create a reverb with the default decay setting.
    pub fn new(sample_rate: f64) -> Self {
        let scale = sample_rate / 44100.0;
        let scaled = |base: usize| ((base as f64 * scale).round() as usize).max(1);

        let mut reverb = Self {
            predelay: vec![0.0; ((PREDELAY_SECONDS * sample_rate).round() as usize).max(1)],
            predelay_index: 0,
            diffusers: std::array::from_fn(|i| AllpassFilter::new(scaled(DIFFUSER_DELAYS[i]))),
            lines: std::array::from_fn(|i| Line::new(scaled(BASE_DELAYS[i]))),
            crossover: 1.0 - (-2.0 * PI * CROSSOVER_HZ / sample_rate).exp(),
            sample_rate,
            decay_param: None,
        };
        reverb.update_decay(0.7);
        reverb
    }

    /// Create a reverb with explicit decay times. `hf_ratio` scales the mid
    /// RT60 to get the decay at the damping frequency; 1.0 disables damping.
    pub fn with_params(sample_rate: f64, low_rt60: f64, mid_rt60: f64, hf_ratio: f64) -> Self {
        let mut r = Self::new(sample_rate);
        r.set_decay_times(low_rt60, mid_rt60, hf_ratio);
        r
    }

    /// Derive every line's gains and damping from the requested decay times.
    pub fn set_decay_times(&mut self, low_rt60: f64, mid_rt60: f64, hf_ratio: f64) {
        let hf_rt60 = mid_rt60 * hf_ratio.clamp(0.01, 1.0);
        let w = 2.0 * PI * DAMPING_HZ / self.sample_rate;
        for line in &mut self.lines {
            let len = line.buffer.len();
            line.low_gain = loop_gain(len, low_rt60, self.sample_rate);
            line.mid_gain = loop_gain(len, mid_rt60, self.sample_rate);
            let hf_gain = loop_gain(len, hf_rt60, self.sample_rate);
            line.damp_coeff = damping_coeff(hf_gain / line.mid_gain, w);
        }
    }

    /// Follow the decay knob; coefficients only change when it moves.
    pub fn update_decay(&mut self, param: f64) {
        if let Some(last) = self.decay_param
            && (param - last).abs() <= DECAY_EPSILON
        {
            return;
        }
        self.decay_param = Some(param);
        let (low, mid) = decay_times(param);
        self.set_decay_times(low, mid, HF_RATIO);
    }

    /// Process a stereo sample pair into the wet stereo signal.
    #[inline]
    pub fn process(&mut self, left: f64, right: f64) -> (f64, f64) {
        let send = (left + right) * 0.5;
        let send = if send.is_finite() { send } else { 0.0 };

        let predelayed = self.predelay[self.predelay_index];
        self.predelay[self.predelay_index] = send as f32;
        self.predelay_index = (self.predelay_index + 1) % self.predelay.len();

        // Read every line before writing any of them.
        let mut y = [0.0; LINES];
        for (out, line) in y.iter_mut().zip(&self.lines) {
            *out = line.output();
        }

        let mut fb = [0.0; LINES];
        let mut sum = 0.0;
        for i in 0..LINES {
            fb[i] = self.lines[i].feedback(y[i], self.crossover);
            sum += fb[i];
        }
        let reflect = sum * 2.0 / LINES as f64;

        let input = predelayed * INPUT_GAIN as f32;
        for i in 0..LINES {
            let diffused = self.diffusers[i].process(input) as f64;
            self.lines[i].write(fb[i] - reflect + diffused);
        }

        let out_l = (y[0] + y[1] + y[2] + y[3] - y[4] - y[5] - y[6] - y[7]) * OUTPUT_GAIN;
        let out_r = (y[0] - y[1] + y[2] - y[3] + y[4] - y[5] + y[6] - y[7]) * OUTPUT_GAIN;

        if !(out_l.is_finite() && out_r.is_finite()) {
            self.clear();
            return (0.0, 0.0);
        }
        (out_l, out_r)
    }

    /// Clear all internal buffers.
    pub fn clear(&mut self) {
        self.predelay.fill(0.0);
        for d in &mut self.diffusers {
            d.clear();
        }
        for line in &mut self.lines {
            line.clear();
        }
    }
}
