use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("no selectable amount: maximum {max} is below minimum {min}")]
    Empty { min: u64, max: u64 },
    #[error("amount step must be greater than zero")]
    ZeroStep,
}

/// Bounds of an amount slider: `[min, max]` in increments of `step` from `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange {
    min: u64,
    max: u64,
    step: u64,
}

impl AmountRange {
    pub fn new(min: u64, max: u64, step: u64) -> Result<Self, RangeError> {
        if step == 0 {
            return Err(RangeError::ZeroStep);
        }
        if max < min {
            return Err(RangeError::Empty { min, max });
        }
        Ok(Self { min, max, step })
    }

    /// Range whose upper bound is `value * ratio`, e.g. an appraisal capped by LTV.
    pub fn capped(value: u64, ratio: f64, min: u64, step: u64) -> Result<Self, RangeError> {
        let max = (value as f64 * ratio).round().max(0.0) as u64;
        Self::new(min, max, step)
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn contains(&self, value: u64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Highest stop: `max` rounded down onto the step grid.
    pub fn top(&self) -> u64 {
        self.min + (self.max - self.min) / self.step * self.step
    }

    /// Round `raw` to the nearest step from `min`, then clamp to `[min, top]`.
    /// An unaligned `max` is never selectable.
    pub fn snap(&self, raw: u64) -> u64 {
        let offset = raw.saturating_sub(self.min);
        let rem = offset % self.step;
        // ties round up
        let steps = offset / self.step + u64::from(rem >= self.step - rem);
        self.min
            .saturating_add(steps.saturating_mul(self.step))
            .min(self.top())
    }

    /// Every value the slider can stop on, from `min` to [`top`](Self::top).
    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        (self.min..=self.top()).step_by(usize::try_from(self.step).unwrap_or(usize::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert_eq!(
            AmountRange::new(100_000, 50_000, 100_000),
            Err(RangeError::Empty {
                min: 100_000,
                max: 50_000
            })
        );
    }

    #[test]
    fn capped_by_ratio() {
        let range = AmountRange::capped(15_000_000, 0.6, 100_000, 100_000).unwrap();
        assert_eq!(range.max(), 9_000_000);
        let range = AmountRange::capped(6_400_000, 0.8, 100_000, 100_000).unwrap();
        assert_eq!(range.max(), 5_120_000);
    }

    #[test]
    fn snap_rounds_to_nearest_step_and_clamps() {
        let range = AmountRange::new(100_000, 5_120_000, 100_000).unwrap();
        assert_eq!(range.snap(0), 100_000);
        assert_eq!(range.snap(149_999), 100_000);
        assert_eq!(range.snap(150_000), 200_000);
        assert_eq!(range.snap(5_100_000), 5_100_000);
        assert_eq!(range.snap(5_110_000), 5_100_000);
        assert_eq!(range.snap(5_120_000), 5_100_000);
        assert_eq!(range.snap(u64::MAX), 5_100_000);
    }

    #[test]
    fn unaligned_max_is_not_a_stop() {
        let range = AmountRange::new(100_000, 350_000, 100_000).unwrap();
        assert_eq!(range.top(), 300_000);
        let values: Vec<_> = range.values().collect();
        assert_eq!(values, vec![100_000, 200_000, 300_000]);
        assert!(values.iter().all(|v| range.contains(*v)));
        assert!(values.iter().all(|v| range.snap(*v) == *v));
    }
}
