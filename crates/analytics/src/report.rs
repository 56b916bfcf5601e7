use core_types::StreakType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate performance of one wager snapshot.
///
/// This struct is the output of the `AnalyticsEngine` and the input to the
/// marketplace ranking. Counts are per unit (a parlay is one bet) except
/// `void_count`, which counts raw legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagerMetrics {
    // I. Volume
    pub total_bets: usize,
    pub straight_count: usize,
    pub parlay_count: usize,
    pub void_count: usize,

    // II. Outcomes
    pub wins: usize,
    pub losses: usize,
    pub win_rate: Decimal, // percentage of settled units, 0..100

    // III. Money
    pub total_profit: Decimal,
    pub total_stake: Decimal,
    pub roi: Decimal, // percentage of total stake
    pub avg_stake: Decimal,
    pub biggest_win: Decimal,
    pub biggest_loss: Decimal, // positive magnitude

    // IV. Form
    pub current_streak: usize,
    pub streak_type: StreakType,
}

impl WagerMetrics {
    /// Creates a zeroed-out report, the result for an empty snapshot.
    pub fn new() -> Self {
        Self {
            total_bets: 0,
            straight_count: 0,
            parlay_count: 0,
            void_count: 0,
            wins: 0,
            losses: 0,
            win_rate: Decimal::ZERO,
            total_profit: Decimal::ZERO,
            total_stake: Decimal::ZERO,
            roi: Decimal::ZERO,
            avg_stake: Decimal::ZERO,
            biggest_win: Decimal::ZERO,
            biggest_loss: Decimal::ZERO,
            current_streak: 0,
            streak_type: StreakType::None,
        }
    }

    /// A copy with every ratio and money field rounded to cents for display.
    pub fn rounded(&self) -> Self {
        Self {
            win_rate: self.win_rate.round_dp(2),
            total_profit: self.total_profit.round_dp(2),
            total_stake: self.total_stake.round_dp(2),
            roi: self.roi.round_dp(2),
            avg_stake: self.avg_stake.round_dp(2),
            biggest_win: self.biggest_win.round_dp(2),
            biggest_loss: self.biggest_loss.round_dp(2),
            ..self.clone()
        }
    }
}

impl Default for WagerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
