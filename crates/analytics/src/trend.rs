//! Volume trend over an ordered sequence of time buckets.
//!
//! The sequence is split at `n / 2`; the second half receives the middle bucket
//! when `n` is odd. The second-half mean has to move more than 10% away from the
//! first-half mean before the trend counts as directional.

use crate::aggregate::{mean, Engagement};
use crate::normalize::NormalizedBucket;
use crate::select::top_or_placeholder;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Second half must exceed the first half times this to be increasing.
pub const INCREASE_FACTOR: Decimal = dec!(1.1);
/// Second half must fall below the first half times this to be decreasing.
pub const DECREASE_FACTOR: Decimal = dec!(0.9);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendAnalysis {
    pub trend: Trend,
    /// Index of the first bucket of the second half.
    pub split_index: usize,
    pub first_half_mean: Decimal,
    pub second_half_mean: Decimal,
    /// Busiest bucket; the earliest one on ties.
    pub peak: NormalizedBucket,
}

pub fn analyze(buckets: &[NormalizedBucket]) -> TrendAnalysis {
    let split_index = buckets.len() / 2;
    let (first, second) = buckets.split_at(split_index);

    let first_half_mean = mean(first.iter().map(Engagement::total));
    let second_half_mean = mean(second.iter().map(Engagement::total));

    TrendAnalysis {
        trend: classify(first_half_mean, second_half_mean),
        split_index,
        first_half_mean,
        second_half_mean,
        peak: top_or_placeholder(buckets),
    }
}

/// Applies the ±10% rule. Both comparisons are strict.
pub fn classify(first_half_mean: Decimal, second_half_mean: Decimal) -> Trend {
    if second_half_mean > first_half_mean * INCREASE_FACTOR {
        Trend::Increasing
    } else if second_half_mean < first_half_mean * DECREASE_FACTOR {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}
