use crate::dimension::Dimension;
use crate::group::{Bucket, group_by};
use core_types::WagerUnit;
use core_types::money::percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bucket of a fixed-dimension breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub key: String,
    pub count: usize,
    pub profit: Decimal,
    pub wins: usize,
    pub staked: Decimal,
}

impl BreakdownEntry {
    fn empty(key: String) -> Self {
        Self {
            key,
            count: 0,
            profit: Decimal::ZERO,
            wins: 0,
            staked: Decimal::ZERO,
        }
    }

    /// Share of units in this bucket that made money, 0..100.
    pub fn win_rate(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.wins) / Decimal::from(self.count) * Decimal::ONE_HUNDRED
    }

    pub fn roi(&self) -> Decimal {
        percentage(self.profit, self.staked)
    }
}

/// The bucket a consolidated unit falls into.
///
/// A parlay whose legs disagree on the dimension goes to the dimension's
/// mixed bucket rather than being split across categories.
pub fn unit_bucket(unit: &WagerUnit, dimension: Dimension) -> Bucket {
    match unit {
        WagerUnit::Single(leg) => dimension.bucket(leg),
        WagerUnit::Parlay(parlay) => {
            let mut buckets = parlay.legs().iter().map(|leg| dimension.bucket(leg));
            let Some(first) = buckets.next() else {
                return Bucket::unknown();
            };
            if buckets.all(|b| b == first) {
                first
            } else {
                Bucket::mixed(dimension.mixed_label())
            }
        }
    }
}

/// Groups consolidated units by `dimension`; each unit lands in exactly one bucket.
pub fn breakdown(units: &[WagerUnit], dimension: Dimension) -> Vec<BreakdownEntry> {
    let entries: Vec<BreakdownEntry> = group_by(units.iter(), |unit| unit_bucket(unit, dimension))
        .into_iter()
        .map(|group| {
            group
                .items
                .into_iter()
                .fold(BreakdownEntry::empty(group.bucket.label), |mut entry, unit| {
                    let profit = unit.profit();
                    entry.count += 1;
                    entry.profit = entry.profit.saturating_add(profit);
                    entry.staked = entry.staked.saturating_add(unit.stake());
                    if profit > Decimal::ZERO {
                        entry.wins += 1;
                    }
                    entry
                })
        })
        .collect();

    tracing::debug!(
        dimension = %dimension,
        units = units.len(),
        buckets = entries.len(),
        "Built breakdown."
    );
    entries
}
