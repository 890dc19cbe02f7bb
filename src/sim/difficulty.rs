//! Difficulty curve
//!
//! Linear ramp in game time, clamped to `[1, cap]`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyModel {
    /// Multiplier growth per second
    pub rate: f32,
    /// Ceiling (>= 1)
    pub cap: f32,
}

impl DifficultyModel {
    pub fn new(rate: f32, cap: f32) -> Self {
        Self {
            rate: rate.max(0.0),
            cap: cap.max(1.0),
        }
    }

    /// Multiplier after `elapsed` seconds; negative time counts as zero
    #[inline]
    pub fn compute(&self, elapsed: f32) -> f32 {
        (1.0 + elapsed.max(0.0) * self.rate).clamp(1.0, self.cap)
    }

    /// Seconds until the cap is reached, `None` if it never is
    pub fn time_to_cap(&self) -> Option<f32> {
        (self.rate > 0.0).then(|| (self.cap - 1.0) / self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_at_one() {
        let model = DifficultyModel::new(0.05, 3.0);
        assert_eq!(model.compute(0.0), 1.0);
        assert_eq!(model.compute(-5.0), 1.0);
    }

    #[test]
    fn test_linear_then_capped() {
        let model = DifficultyModel::new(0.1, 2.0);
        assert!((model.compute(5.0) - 1.5).abs() < 1e-6);
        assert_eq!(model.compute(10.0), 2.0);
        assert_eq!(model.compute(1000.0), 2.0);
        assert!((model.time_to_cap().unwrap() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_rate_is_flat() {
        let model = DifficultyModel::new(0.0, 2.0);
        assert_eq!(model.compute(1e6), 1.0);
        assert_eq!(model.time_to_cap(), None);
    }

    proptest! {
        #[test]
        fn prop_monotonic_and_capped(
            rate in 0.0f32..1.0,
            cap in 1.0f32..10.0,
            a in 0.0f32..10_000.0,
            b in 0.0f32..10_000.0,
        ) {
            let model = DifficultyModel::new(rate, cap);
            let (e1, e2) = if a <= b { (a, b) } else { (b, a) };
            let m1 = model.compute(e1);
            let m2 = model.compute(e2);
            prop_assert!(m1 >= 1.0);
            prop_assert!(m1 <= m2);
            prop_assert!(m2 <= cap);
        }
    }
}
