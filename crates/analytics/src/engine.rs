use crate::consolidator::consolidate_units;
use crate::report::WagerMetrics;
use core_types::money::{percentage, saturating_sum};
use core_types::{BetStatus, StreakType, WagerLeg, WagerUnit};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// A stateless calculator for deriving performance metrics from consolidated wagers.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `units` - Consolidated wagers; a parlay counts as one bet.
    ///
    /// # Returns
    ///
    /// A `WagerMetrics` report. An empty slice yields the zeroed report.
    pub fn calculate(&self, units: &[WagerUnit]) -> WagerMetrics {
        let mut report = WagerMetrics::new();

        if units.is_empty() {
            return report;
        }

        self.calculate_volume(units, &mut report);
        self.calculate_profitability(units, &mut report);
        self.calculate_streak(units, &mut report);

        tracing::debug!(
            total_bets = report.total_bets,
            total_profit = %report.total_profit,
            roi = %report.roi,
            "Calculated wager metrics."
        );

        report
    }

    /// Consolidates raw legs first, then calculates.
    pub fn calculate_from_legs(&self, legs: &[WagerLeg]) -> WagerMetrics {
        self.calculate(&consolidate_units(legs))
    }

    fn calculate_volume(&self, units: &[WagerUnit], report: &mut WagerMetrics) {
        report.total_bets = units.len();
        report.parlay_count = units.iter().filter(|u| u.is_parlay()).count();
        report.straight_count = report.total_bets - report.parlay_count;
        // Counted per leg, not per unit.
        report.void_count = units
            .iter()
            .flat_map(WagerUnit::legs)
            .filter(|leg| leg.status.is_void_or_cancelled())
            .count();
    }

    fn calculate_profitability(&self, units: &[WagerUnit], report: &mut WagerMetrics) {
        let mut biggest_win = Decimal::ZERO;
        let mut worst_result = Decimal::ZERO;

        report.total_profit = saturating_sum(units.iter().map(WagerUnit::profit));
        report.total_stake = saturating_sum(units.iter().map(WagerUnit::stake));

        for unit in units {
            let profit = unit.profit();

            match unit.status() {
                BetStatus::Won => report.wins += 1,
                BetStatus::Lost => report.losses += 1,
                _ => {}
            }

            biggest_win = biggest_win.max(profit);
            worst_result = worst_result.min(profit);
        }

        report.biggest_win = biggest_win;
        report.biggest_loss = worst_result.abs();

        // --- Ratios ---
        let settled = report.wins + report.losses;
        if settled > 0 {
            report.win_rate =
                Decimal::from(report.wins) / Decimal::from(settled) * Decimal::ONE_HUNDRED;
        }

        if report.total_stake > Decimal::ZERO {
            report.roi = percentage(report.total_profit, report.total_stake);
        }

        if report.total_bets > 0 {
            report.avg_stake = report.total_stake / Decimal::from(report.total_bets);
        }
    }

    /// Length of the run of identical outcomes ending at the most recent settled unit.
    fn calculate_streak(&self, units: &[WagerUnit], report: &mut WagerMetrics) {
        let mut settled: Vec<(Option<_>, BetStatus)> = units
            .iter()
            .filter(|u| u.status().is_settled())
            .map(|u| (u.sort_time(), u.status()))
            .collect();

        // Newest first; undated units go last in their original order.
        settled.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        let Some(&(_, latest)) = settled.first() else {
            return;
        };

        report.current_streak = settled
            .iter()
            .take_while(|(_, status)| *status == latest)
            .count();
        report.streak_type = if latest == BetStatus::Won {
            StreakType::Win
        } else {
            StreakType::Loss
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidator::consolidate;
    use rust_decimal_macros::dec;

    fn single(id: &str, status: BetStatus, stake: Decimal, payout: Decimal) -> WagerLeg {
        WagerLeg::new(id).with_status(status).with_stake(stake, payout)
    }

    fn dated(leg: WagerLeg, game_date: &str) -> WagerLeg {
        leg.with_dates(None, Some(game_date))
    }

    #[test]
    fn test_empty_input_yields_zeroed_report() {
        let report = AnalyticsEngine::new().calculate(&[]);
        assert_eq!(report, WagerMetrics::new());
        assert_eq!(report.streak_type, StreakType::None);
    }

    #[test]
    fn test_parlay_counts_as_one_bet() {
        let legs = vec![
            single("s1", BetStatus::Won, dec!(10), dec!(20)),
            WagerLeg::new("a")
                .in_parlay("p")
                .with_status(BetStatus::Won)
                .with_stake(dec!(5), dec!(30)),
            WagerLeg::new("b").in_parlay("p").with_status(BetStatus::Won),
            WagerLeg::new("c").in_parlay("p").with_status(BetStatus::Void),
        ];
        let consolidation = consolidate(&legs);
        let report = AnalyticsEngine::new().calculate(&consolidation.units());

        assert_eq!(report.total_bets, consolidation.singles.len() + consolidation.parlays.len());
        assert_eq!(report.total_bets, 2);
        assert_eq!(report.straight_count, 1);
        assert_eq!(report.parlay_count, 1);
        assert_eq!(report.void_count, 1);
        assert_eq!(report.total_profit, dec!(35));
        assert_eq!(report.total_stake, dec!(15));
        assert_eq!(report.avg_stake, dec!(7.5));
    }

    #[test]
    fn test_win_rate_and_roi() {
        let legs = vec![
            single("w1", BetStatus::Won, dec!(100), dec!(190)),
            single("w2", BetStatus::Won, dec!(100), dec!(190)),
            single("l1", BetStatus::Lost, dec!(100), dec!(190)),
            single("p1", BetStatus::Pending, dec!(100), dec!(190)),
        ];
        let report = AnalyticsEngine::new().calculate_from_legs(&legs);

        assert_eq!(report.wins, 2);
        assert_eq!(report.losses, 1);
        assert_eq!(report.win_rate.round_dp(2), dec!(66.67));
        assert_eq!(report.total_profit, dec!(80));
        assert_eq!(report.roi, dec!(20));
        assert_eq!(report.biggest_win, dec!(90));
        assert_eq!(report.biggest_loss, dec!(100));
    }

    #[test]
    fn test_roi_is_zero_without_stake() {
        let legs = vec![WagerLeg::new("free")
            .with_status(BetStatus::Won)
            .with_profit(Some(dec!(50)))];
        let report = AnalyticsEngine::new().calculate_from_legs(&legs);
        assert_eq!(report.total_profit, dec!(50));
        assert_eq!(report.roi, Decimal::ZERO);
        assert_eq!(report.avg_stake, Decimal::ZERO);
    }

    #[test]
    fn test_extremes_clamp_to_zero() {
        let only_losses = vec![single("l", BetStatus::Lost, dec!(30), dec!(60))];
        let report = AnalyticsEngine::new().calculate_from_legs(&only_losses);
        assert_eq!(report.biggest_win, Decimal::ZERO);
        assert_eq!(report.biggest_loss, dec!(30));

        let only_wins = vec![single("w", BetStatus::Won, dec!(30), dec!(60))];
        let report = AnalyticsEngine::new().calculate_from_legs(&only_wins);
        assert_eq!(report.biggest_loss, Decimal::ZERO);
    }

    #[test]
    fn test_streak_counts_most_recent_run() {
        // Most recent first: won, won, lost.
        let legs = vec![
            dated(single("old", BetStatus::Lost, dec!(10), dec!(20)), "2024-01-01"),
            dated(single("mid", BetStatus::Won, dec!(10), dec!(20)), "2024-01-02"),
            dated(single("new", BetStatus::Won, dec!(10), dec!(20)), "2024-01-03"),
            dated(single("open", BetStatus::Pending, dec!(10), dec!(20)), "2024-01-04"),
        ];
        let report = AnalyticsEngine::new().calculate_from_legs(&legs);
        assert_eq!(report.current_streak, 2);
        assert_eq!(report.streak_type, StreakType::Win);
    }

    #[test]
    fn test_streak_uses_parsed_time_not_string_order() {
        let legs = vec![
            single("a", BetStatus::Won, dec!(10), dec!(20))
                .with_dates(Some("2024-01-09 12:00:00"), None),
            single("b", BetStatus::Lost, dec!(10), dec!(20))
                .with_dates(Some("2024-01-10T08:00:00Z"), None),
            single("c", BetStatus::Lost, dec!(10), dec!(20)),
        ];
        let report = AnalyticsEngine::new().calculate_from_legs(&legs);
        assert_eq!(report.streak_type, StreakType::Loss);
        assert_eq!(report.current_streak, 1);
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let legs = vec![
            dated(single("a", BetStatus::Won, dec!(12), dec!(30)), "2024-03-01"),
            dated(single("b", BetStatus::Lost, dec!(8), dec!(16)), "2024-03-02"),
            WagerLeg::new("c").in_parlay("p").with_status(BetStatus::Lost),
        ];
        let engine = AnalyticsEngine::new();
        assert_eq!(engine.calculate_from_legs(&legs), engine.calculate_from_legs(&legs));
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let legs = vec![
            single("w1", BetStatus::Won, dec!(1), Decimal::MAX),
            single("w2", BetStatus::Won, dec!(1), Decimal::MAX),
        ];
        let report = AnalyticsEngine::new().calculate_from_legs(&legs);
        assert_eq!(report.wins, 2);
        assert_eq!(report.total_profit, Decimal::MAX);
        assert_eq!(report.total_stake, dec!(2));
        assert_eq!(report.roi, Decimal::MAX);
        assert_eq!(report.biggest_win, Decimal::MAX - Decimal::ONE);
        assert_eq!(report.avg_stake, dec!(1));
    }

    #[test]
    fn test_rounded_view() {
        let legs = vec![
            single("w", BetStatus::Won, dec!(3), dec!(4)),
            single("l1", BetStatus::Lost, dec!(3), dec!(4)),
            single("l2", BetStatus::Lost, dec!(3), dec!(4)),
        ];
        let report = AnalyticsEngine::new().calculate_from_legs(&legs).rounded();
        assert_eq!(report.win_rate, dec!(33.33));
        assert_eq!(report.roi, dec!(-55.56));
    }
}
