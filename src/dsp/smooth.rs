//! One-pole parameter smoother.

/// Per-sample smoothing coefficient shared by the pitch, velocity and
/// delay-time smoothers.
pub const SMOOTH_COEFF: f64 = 0.005;

/// Exponentially approaches a target value, one step per call.
#[derive(Debug, Clone, Copy)]
pub struct SmoothValue {
    value: f64,
    target: f64,
}

impl SmoothValue {
    pub fn new(value: f64) -> Self {
        SmoothValue { value, target: value }
    }

    #[inline]
    pub fn set(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    #[inline]
    pub fn next(&mut self, coeff: f64) -> f64 {
        self.value += coeff * (self.target - self.value);
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_target() {
        let mut s = SmoothValue::new(0.0);
        s.set(1.0);
        let first = s.next(SMOOTH_COEFF);
        assert!((first - 0.005).abs() < 1e-12);
        for _ in 0..10_000 {
            s.next(SMOOTH_COEFF);
        }
        assert!((s.value() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ignores_non_finite_targets() {
        let mut s = SmoothValue::new(0.25);
        s.set(f64::NAN);
        assert_eq!(s.target(), 0.25);
        assert_eq!(s.next(SMOOTH_COEFF), 0.25);
    }
}
