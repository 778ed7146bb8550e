use serde::{Deserialize, Serialize};

use crate::core::{
    config::LendingConfig,
    range::{AmountRange, RangeError},
};

/// Fragment value preselected on the fractionalization screen.
pub const DEFAULT_FRAGMENT_VALUE: u64 = 2_000_000;

const MILLION: f64 = 1_000_000.0;

/// How an asset's value splits into fNFT fragments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionPlan {
    pub asset_value: u64,
    pub fragment_value: u64,
    pub fragment_count: u64,
    /// Zero when there are no fragments.
    pub value_per_fragment: f64,
    pub remaining_value: u64,
}

impl FractionPlan {
    pub fn new(asset_value: u64, fragment_value: u64, fragments_per_million: u32) -> Self {
        let fragment_count =
            (fragment_value as f64 / MILLION * f64::from(fragments_per_million)).floor() as u64;
        let value_per_fragment = if fragment_count > 0 {
            fragment_value as f64 / fragment_count as f64
        } else {
            0.0
        };
        Self {
            asset_value,
            fragment_value,
            fragment_count,
            value_per_fragment,
            remaining_value: asset_value.saturating_sub(fragment_value),
        }
    }

    pub fn used_percentage(&self) -> f64 {
        percentage(self.fragment_value, self.asset_value)
    }

    pub fn remaining_percentage(&self) -> f64 {
        percentage(self.remaining_value, self.asset_value)
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionCalculator {
    asset_value: u64,
    max_ltv: f64,
    fragments_per_million: u32,
    range: AmountRange,
}

impl FractionCalculator {
    pub fn new(asset_value: u64, lending: &LendingConfig) -> Result<Self, RangeError> {
        let range = AmountRange::capped(
            asset_value,
            lending.fraction_max_ltv,
            lending.min_amount,
            lending.amount_step,
        )?;
        Ok(Self {
            asset_value,
            max_ltv: lending.fraction_max_ltv,
            fragments_per_million: lending.fragments_per_million,
            range,
        })
    }

    pub fn asset_value(&self) -> u64 {
        self.asset_value
    }

    pub fn max_ltv(&self) -> f64 {
        self.max_ltv
    }

    pub fn max_fragment_value(&self) -> u64 {
        self.range.max()
    }

    pub fn range(&self) -> AmountRange {
        self.range
    }

    /// Plan for `fragment_value` snapped onto the slider range.
    pub fn plan(&self, fragment_value: u64) -> FractionPlan {
        FractionPlan::new(
            self.asset_value,
            self.range.snap(fragment_value),
            self.fragments_per_million,
        )
    }

    pub fn default_plan(&self) -> FractionPlan {
        self.plan(DEFAULT_FRAGMENT_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_million_makes_one_hundred_fragments() {
        let plan = FractionPlan::new(6_400_000, 2_000_000, 50);
        assert_eq!(plan.fragment_count, 100);
        assert_eq!(plan.value_per_fragment, 20_000.0);
        assert_eq!(plan.remaining_value, 4_400_000);
        assert!((plan.used_percentage() - 31.25).abs() < 1e-9);
    }

    #[test]
    fn zero_fragments_do_not_divide() {
        let plan = FractionPlan::new(6_400_000, 19_999, 50);
        assert_eq!(plan.fragment_count, 0);
        assert_eq!(plan.value_per_fragment, 0.0);
    }

    #[test]
    fn calculator_caps_at_eighty_percent() {
        let calc = FractionCalculator::new(6_400_000, &LendingConfig::default()).unwrap();
        assert_eq!(calc.max_fragment_value(), 5_120_000);
        assert_eq!(calc.plan(9_000_000).fragment_value, 5_100_000);
        assert_eq!(calc.default_plan().fragment_value, 2_000_000);
    }
}
