//! Mergeable scalar statistic: sum, sum of squares, and observation count.
//!
//! Every timing field in the call graph is an `EnsembleValue` so that graphs
//! from different threads and runs can be folded together while keeping
//! enough state to recover the cross-sample mean and standard deviation.
//! Merging is pointwise addition, so it is associative and commutative by
//! construction.

use serde::{Deserialize, Serialize};

/// Policy for the average of a value that holds zero observations.
///
/// The 0.0 default matches the behavior profiles have historically relied
/// on; it is a policy choice, not a mathematical necessity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroCountPolicy {
    /// Report 0.0 for an empty value
    #[default]
    Zero,
    /// Propagate NaN so absence is visible downstream
    Nan,
}

/// A value that can compute average and standard deviation on itself
///
/// **Public** - the building block of every graph statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleValue {
    total: f64,
    total_sq: f64,
    count: u64,
}

impl EnsembleValue {
    /// An empty value: zero observations
    ///
    /// This is the valid padding state; `avg()` on it follows the
    /// zero-count policy.
    pub fn zero() -> Self {
        Self {
            total: 0.0,
            total_sq: 0.0,
            count: 0,
        }
    }

    /// A value holding exactly one observation
    pub fn from_scalar(value: f64) -> Self {
        Self {
            total: value,
            total_sq: value * value,
            count: 1,
        }
    }

    /// Reset to a fresh single observation
    ///
    /// Only used before real ensemble data arrives (e.g. re-seeding a
    /// derived self-time accumulator during graph construction).
    pub fn set(&mut self, value: f64) {
        self.total = value;
        self.total_sq = value * value;
        self.count = 1;
    }

    /// Merge another value into this one
    pub fn add(&mut self, other: &EnsembleValue) {
        self.total += other.total;
        self.total_sq += other.total_sq;
        self.count += other.count;
    }

    /// Merge a raw scalar, treated as a single observation
    pub fn add_scalar(&mut self, value: f64) {
        self.total += value;
        self.total_sq += value * value;
        self.count += 1;
    }

    /// Merge `multiplier` identical observations of `value`
    ///
    /// `add_weighted(0.0, n)` is the instance-padding primitive: n
    /// zero-weighted samples that dilute the average without touching the
    /// totals.
    pub fn add_weighted(&mut self, value: f64, multiplier: u64) {
        self.total += value * multiplier as f64;
        self.total_sq += value * value * multiplier as f64;
        self.count += multiplier;
    }

    /// Sum of all observations
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Sum of squared observations
    pub fn total_sq(&self) -> f64 {
        self.total_sq
    }

    /// Number of observations folded in (including zero-weighted padding)
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Average over all observations, 0.0 when empty
    pub fn avg(&self) -> f64 {
        self.avg_or(ZeroCountPolicy::Zero)
    }

    /// Average under an explicit zero-count policy
    pub fn avg_or(&self, policy: ZeroCountPolicy) -> f64 {
        if self.count == 0 {
            return match policy {
                ZeroCountPolicy::Zero => 0.0,
                ZeroCountPolicy::Nan => f64::NAN,
            };
        }
        self.total / self.count as f64
    }

    /// Population standard deviation, 0.0 when empty
    ///
    /// Negative variance from floating-point cancellation clamps to zero.
    pub fn std_dev(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let avg = self.total / self.count as f64;
        let variance = self.total_sq / self.count as f64 - avg * avg;
        variance.max(0.0).sqrt()
    }
}

impl Default for EnsembleValue {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scalar() {
        let v = EnsembleValue::from_scalar(3.0);
        assert_eq!(v.total(), 3.0);
        assert_eq!(v.total_sq(), 9.0);
        assert_eq!(v.count(), 1);
        assert_eq!(v.avg(), 3.0);
        assert_eq!(v.std_dev(), 0.0);
    }

    #[test]
    fn test_add_merges_pointwise() {
        let mut a = EnsembleValue::from_scalar(2.0);
        a.add(&EnsembleValue::from_scalar(4.0));
        assert_eq!(a.total(), 6.0);
        assert_eq!(a.total_sq(), 20.0);
        assert_eq!(a.count(), 2);
        assert_eq!(a.avg(), 3.0);
        // variance = 20/2 - 9 = 1
        assert!((a.std_dev() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_add_is_commutative() {
        let mut ab = EnsembleValue::from_scalar(1.5);
        ab.add(&EnsembleValue::from_scalar(7.25));
        let mut ba = EnsembleValue::from_scalar(7.25);
        ba.add(&EnsembleValue::from_scalar(1.5));
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_padding_dilutes_average() {
        let mut v = EnsembleValue::from_scalar(10.0);
        v.add_weighted(0.0, 4);
        assert_eq!(v.total(), 10.0);
        assert_eq!(v.count(), 5);
        assert_eq!(v.avg(), 2.0);
    }

    #[test]
    fn test_zero_count_policy() {
        // 0.0 on empty is a policy choice, not a discovered requirement.
        let v = EnsembleValue::zero();
        assert_eq!(v.avg(), 0.0);
        assert_eq!(v.std_dev(), 0.0);
        assert!(v.avg_or(ZeroCountPolicy::Nan).is_nan());
    }

    #[test]
    fn test_negative_variance_clamps() {
        // Construct cancellation by hand: totals consistent with a single
        // value but a slightly undershooting sum of squares.
        let mut v = EnsembleValue::zero();
        v.add_weighted(1.0, 2);
        // total = 2, total_sq = 2, count = 2 -> variance = 1 - 1 = 0 exactly;
        // nudge through another merge that keeps variance at the boundary.
        v.add(&EnsembleValue::zero());
        assert_eq!(v.std_dev(), 0.0);
    }

    #[test]
    fn test_set_resets_to_fresh_scalar() {
        let mut v = EnsembleValue::from_scalar(5.0);
        v.add_scalar(5.0);
        v.set(2.0);
        assert_eq!(v.total(), 2.0);
        assert_eq!(v.total_sq(), 4.0);
        assert_eq!(v.count(), 1);
    }
}
