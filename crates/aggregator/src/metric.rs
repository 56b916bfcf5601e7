use crate::error::AggregatorError;
use core_types::money::{percentage, saturating_sum};
use core_types::{BetStatus, WagerLeg};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The reduction a custom chart applies to each bucket of legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "clap", value(rename_all = "snake_case"))]
pub enum Metric {
    Count,
    WinsCount,
    LossesCount,
    WinRate,
    Profit,
    Roi,
    TotalStaked,
    AverageStake,
    AverageOdds,
    MedianOdds,
    VoidCount,
    LongshotHitRate,
    ChalkHitRate,
    MaxWin,
    MaxLoss,
    ProfitVariance,
}

impl Metric {
    pub const ALL: [Metric; 16] = [
        Metric::Count,
        Metric::WinsCount,
        Metric::LossesCount,
        Metric::WinRate,
        Metric::Profit,
        Metric::Roi,
        Metric::TotalStaked,
        Metric::AverageStake,
        Metric::AverageOdds,
        Metric::MedianOdds,
        Metric::VoidCount,
        Metric::LongshotHitRate,
        Metric::ChalkHitRate,
        Metric::MaxWin,
        Metric::MaxLoss,
        Metric::ProfitVariance,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::Count => "count",
            Metric::WinsCount => "wins_count",
            Metric::LossesCount => "losses_count",
            Metric::WinRate => "win_rate",
            Metric::Profit => "profit",
            Metric::Roi => "roi",
            Metric::TotalStaked => "total_staked",
            Metric::AverageStake => "average_stake",
            Metric::AverageOdds => "average_odds",
            Metric::MedianOdds => "median_odds",
            Metric::VoidCount => "void_count",
            Metric::LongshotHitRate => "longshot_hit_rate",
            Metric::ChalkHitRate => "chalk_hit_rate",
            Metric::MaxWin => "max_win",
            Metric::MaxLoss => "max_loss",
            Metric::ProfitVariance => "profit_variance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Count => "Bets",
            Metric::WinsCount => "Wins",
            Metric::LossesCount => "Losses",
            Metric::WinRate => "Win Rate %",
            Metric::Profit => "Profit",
            Metric::Roi => "ROI %",
            Metric::TotalStaked => "Total Staked",
            Metric::AverageStake => "Average Stake",
            Metric::AverageOdds => "Average Odds",
            Metric::MedianOdds => "Median Odds",
            Metric::VoidCount => "Voids",
            Metric::LongshotHitRate => "Longshot Hit Rate %",
            Metric::ChalkHitRate => "Chalk Hit Rate %",
            Metric::MaxWin => "Biggest Win",
            Metric::MaxLoss => "Biggest Loss",
            Metric::ProfitVariance => "Profit Std Dev",
        }
    }

    /// Reduces a bucket of legs to one number. Empty denominators yield zero.
    pub fn reduce(&self, legs: &[&WagerLeg]) -> Decimal {
        match self {
            Metric::Count => Decimal::from(legs.len()),
            Metric::WinsCount => Decimal::from(count_status(legs, BetStatus::Won)),
            Metric::LossesCount => Decimal::from(count_status(legs, BetStatus::Lost)),
            Metric::WinRate => hit_rate(legs.iter().copied()),
            Metric::Profit => total_profit(legs),
            Metric::Roi => percentage(total_profit(legs), total_staked(legs)),
            Metric::TotalStaked => total_staked(legs),
            Metric::AverageStake => mean(legs.iter().map(|leg| leg.stake)),
            Metric::AverageOdds => mean(legs.iter().filter_map(|leg| leg.odds)),
            Metric::MedianOdds => median(legs.iter().filter_map(|leg| leg.odds).collect()),
            Metric::VoidCount => Decimal::from(
                legs.iter()
                    .filter(|leg| leg.status.is_void_or_cancelled())
                    .count(),
            ),
            Metric::LongshotHitRate => hit_rate(
                legs.iter()
                    .copied()
                    .filter(|leg| leg.odds.is_some_and(|o| o >= Decimal::from(200))),
            ),
            Metric::ChalkHitRate => hit_rate(
                legs.iter()
                    .copied()
                    .filter(|leg| leg.odds.is_some_and(|o| o <= Decimal::from(-150))),
            ),
            Metric::MaxWin => legs
                .iter()
                .map(|leg| leg.resolved_profit())
                .fold(Decimal::ZERO, Decimal::max),
            Metric::MaxLoss => legs
                .iter()
                .map(|leg| leg.resolved_profit())
                .fold(Decimal::ZERO, Decimal::min)
                .abs(),
            Metric::ProfitVariance => population_std_dev(legs),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = AggregatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.key() == key)
            .ok_or_else(|| AggregatorError::UnknownMetric(s.to_string()))
    }
}

fn count_status(legs: &[&WagerLeg], status: BetStatus) -> usize {
    legs.iter().filter(|leg| leg.status == status).count()
}

fn total_profit(legs: &[&WagerLeg]) -> Decimal {
    saturating_sum(legs.iter().map(|leg| leg.resolved_profit()))
}

fn total_staked(legs: &[&WagerLeg]) -> Decimal {
    saturating_sum(legs.iter().map(|leg| leg.stake))
}

/// Wins over won+lost, as a percentage.
fn hit_rate<'a>(legs: impl Iterator<Item = &'a WagerLeg>) -> Decimal {
    let (wins, settled) = legs
        .filter(|leg| leg.status.is_settled())
        .fold((0usize, 0usize), |(wins, settled), leg| {
            (wins + usize::from(leg.status == BetStatus::Won), settled + 1)
        });
    percentage(Decimal::from(wins), Decimal::from(settled))
}

fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let values: Vec<Decimal> = values.collect();
    if values.is_empty() {
        return Decimal::ZERO;
    }
    saturating_sum(values.iter().copied()) / Decimal::from(values.len())
}

fn median(mut values: Vec<Decimal>) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.sort();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        midpoint(values[mid - 1], values[mid])
    } else {
        values[mid]
    }
}

/// Midpoint of `low <= high` without leaving the representable range.
fn midpoint(low: Decimal, high: Decimal) -> Decimal {
    if low.is_sign_negative() != high.is_sign_negative() {
        (low + high) / Decimal::TWO
    } else {
        low + (high - low) / Decimal::TWO
    }
}

/// Computed on profits scaled into [-1, 1] so squaring cannot overflow.
fn population_std_dev(legs: &[&WagerLeg]) -> Decimal {
    let profits: Vec<Decimal> = legs.iter().map(|leg| leg.resolved_profit()).collect();
    let scale = profits
        .iter()
        .map(|p| p.abs())
        .max()
        .unwrap_or(Decimal::ZERO);
    if scale.is_zero() {
        return Decimal::ZERO;
    }

    let scaled: Vec<Decimal> = profits.iter().map(|p| *p / scale).collect();
    let mean = mean(scaled.iter().copied());
    let variance = mean_of_squares(&scaled, mean);
    variance
        .sqrt()
        .map(|std_dev| std_dev.saturating_mul(scale))
        .unwrap_or(Decimal::ZERO)
}

fn mean_of_squares(values: &[Decimal], mean: Decimal) -> Decimal {
    let sum: Decimal = values.iter().map(|v| (*v - mean) * (*v - mean)).sum();
    sum / Decimal::from(values.len())
}
