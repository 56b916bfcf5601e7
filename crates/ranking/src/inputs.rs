use analytics::WagerMetrics;
use chrono::{DateTime, Utc};
use core_types::lenient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A read-only performance snapshot of one published strategy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankingInputs {
    /// Return on stake, in percent.
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub roi_percentage: Decimal,
    /// Fraction of settled wagers won, 0..1.
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub win_rate: Decimal,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub total_bets: u64,
    /// When the strategy started tracking; absent or unparseable means no longevity credit.
    #[serde(default, deserialize_with = "lenient::optional_utc_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub subscriber_count: u64,
}

impl RankingInputs {
    /// Builds inputs from a metrics report, whose win rate is a percentage.
    pub fn from_metrics(
        metrics: &WagerMetrics,
        start_date: Option<DateTime<Utc>>,
        subscriber_count: u64,
    ) -> Self {
        Self {
            roi_percentage: metrics.roi,
            win_rate: metrics.win_rate / Decimal::ONE_HUNDRED,
            total_bets: metrics.total_bets as u64,
            start_date,
            subscriber_count,
        }
    }
}

/// A strategy as listed in the marketplace, ready to be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySnapshot {
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub strategy_id: String,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub name: String,
    #[serde(default)]
    pub inputs: RankingInputs,
}
