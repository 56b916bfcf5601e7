//! # WagerLens Marketplace Ranking
//!
//! Turns a strategy's performance snapshot into one composite score used to
//! order the public marketplace. Five 0–100 sub-scores (ROI, win rate, volume,
//! longevity, subscribers) are weighted, then penalised for negative ROI and
//! for high ROI built on a low win rate.
//!
//! The reference time is an explicit argument; nothing here reads the clock.

use crate::error::RankingError;
use chrono::{DateTime, Utc};
use configuration::{PenaltyConfig, RankingConfig, RankingWeights};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

pub mod error;
pub mod inputs;

pub use inputs::{RankingInputs, StrategySnapshot};

const MAX_SUB_SCORE: Decimal = Decimal::ONE_HUNDRED;

/// Every component of a strategy's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingScore {
    pub roi_score: Decimal,
    pub winrate_score: Decimal,
    pub volume_score: Decimal,
    pub longevity_score: Decimal,
    pub subscriber_score: Decimal,
    /// Weighted sum before penalties.
    pub weighted: Decimal,
    /// Final score, rounded to 2 decimal places.
    pub total: Decimal,
}

/// A scored marketplace entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStrategy {
    pub rank: usize,
    pub strategy_id: String,
    pub name: String,
    pub score: RankingScore,
}

/// The marketplace ranking engine.
#[derive(Debug, Clone, Default)]
pub struct RankingScorer {
    config: RankingConfig,
}

impl RankingScorer {
    /// Creates a scorer, rejecting weights that do not sum to one and penalties out of range.
    pub fn new(config: RankingConfig) -> Result<Self, RankingError> {
        config.weights.validate().map_err(RankingError::InvalidWeights)?;
        config
            .penalties
            .validate()
            .map_err(RankingError::InvalidPenalty)?;
        Ok(Self { config })
    }

    /// The composite score, rounded to 2 decimal places.
    pub fn score(&self, inputs: &RankingInputs, now: DateTime<Utc>) -> Decimal {
        self.evaluate(inputs, now).total
    }

    /// Computes every sub-score and the penalised, rounded total.
    pub fn evaluate(&self, inputs: &RankingInputs, now: DateTime<Utc>) -> RankingScore {
        let roi = inputs.roi_percentage;
        let win_rate = inputs.win_rate.max(Decimal::ZERO).min(Decimal::ONE);

        let roi_score = clamp(roi_score(roi));
        let winrate_score = clamp(win_rate * Decimal::ONE_HUNDRED);
        let volume_score = clamp(volume_score(inputs.total_bets, roi));
        let longevity_score = clamp(longevity_score(inputs.start_date, now));
        let subscriber_score = clamp(subscriber_score(inputs.subscriber_count));

        let weighted = weighted_sum(
            &self.config.weights,
            [roi_score, winrate_score, volume_score, longevity_score, subscriber_score],
        );
        let penalised = apply_penalties(&self.config.penalties, weighted, roi, win_rate);

        RankingScore {
            roi_score,
            winrate_score,
            volume_score,
            longevity_score,
            subscriber_score,
            weighted,
            total: penalised.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        }
    }

    /// Scores a batch of strategies and orders them best first.
    ///
    /// Ties are broken by strategy id so the order is deterministic.
    pub fn rank(&self, strategies: Vec<StrategySnapshot>, now: DateTime<Utc>) -> Vec<RankedStrategy> {
        let total = strategies.len();
        let mut scored: Vec<(StrategySnapshot, RankingScore)> = strategies
            .into_iter()
            .map(|s| {
                let score = self.evaluate(&s.inputs, now);
                (s, score)
            })
            .collect();

        scored.sort_by(|(a, a_score), (b, b_score)| {
            b_score
                .total
                .cmp(&a_score.total)
                .then_with(|| a.strategy_id.cmp(&b.strategy_id))
        });

        tracing::info!(strategies = total, "Ranked marketplace strategies.");

        scored
            .into_iter()
            .enumerate()
            .map(|(i, (snapshot, score))| RankedStrategy {
                rank: i + 1,
                strategy_id: snapshot.strategy_id,
                name: snapshot.name,
                score,
            })
            .collect()
    }
}

fn clamp(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(MAX_SUB_SCORE)
}

fn roi_score(roi: Decimal) -> Decimal {
    if roi < Decimal::ZERO {
        return Decimal::ZERO;
    }
    if roi >= dec!(20) {
        return MAX_SUB_SCORE;
    }
    (roi + dec!(20)) * dec!(2.5)
}

fn volume_score(total_bets: u64, roi: Decimal) -> Decimal {
    let base = match total_bets {
        1000.. => dec!(100),
        500.. => dec!(85),
        250.. => dec!(70),
        100.. => dec!(55),
        50.. => dec!(40),
        20.. => dec!(25),
        n => Decimal::from(n) * dec!(1.25),
    };
    if roi > Decimal::ZERO {
        let boost = (Decimal::ONE + roi / Decimal::ONE_HUNDRED).min(dec!(1.5));
        (base * boost).min(MAX_SUB_SCORE)
    } else {
        base
    }
}

fn longevity_score(start_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Decimal {
    let Some(start) = start_date else {
        return Decimal::ZERO;
    };
    match (now - start).num_days() {
        730.. => dec!(100),
        365.. => dec!(90),
        180.. => dec!(70),
        90.. => dec!(50),
        30.. => dec!(30),
        days => Decimal::from(days).max(dec!(5)),
    }
}

fn subscriber_score(subscriber_count: u64) -> Decimal {
    match subscriber_count {
        1000.. => dec!(100),
        500.. => dec!(85),
        100.. => dec!(70),
        25.. => dec!(50),
        5.. => dec!(30),
        n => Decimal::from(n) * dec!(6),
    }
}

fn weighted_sum(weights: &RankingWeights, scores: [Decimal; 5]) -> Decimal {
    let [roi, winrate, volume, longevity, subscribers] = scores;
    weights.roi * roi
        + weights.win_rate * winrate
        + weights.volume * volume
        + weights.longevity * longevity
        + weights.subscribers * subscribers
}

fn apply_penalties(
    penalties: &PenaltyConfig,
    score: Decimal,
    roi: Decimal,
    win_rate: Decimal,
) -> Decimal {
    let mut score = score;
    if roi < Decimal::ZERO {
        score *= penalties.negative_roi_multiplier;
    }
    if win_rate < penalties.low_win_rate_threshold && roi > penalties.low_win_rate_min_roi {
        let shortfall = penalties.low_win_rate_threshold - win_rate;
        let multiplier =
            (Decimal::ONE - shortfall.saturating_mul(penalties.low_win_rate_slope))
                .max(penalties.low_win_rate_floor);
        score *= multiplier;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn inputs(roi: Decimal, win_rate: Decimal, bets: u64, days: i64, subs: u64) -> RankingInputs {
        RankingInputs {
            roi_percentage: roi,
            win_rate,
            total_bets: bets,
            start_date: Some(now() - Duration::days(days)),
            subscriber_count: subs,
        }
    }

    #[test]
    fn test_reference_score() {
        let score = RankingScorer::default().evaluate(&inputs(dec!(5), dec!(0.5), 100, 400, 50), now());
        assert_eq!(score.roi_score, dec!(62.5));
        assert_eq!(score.winrate_score, dec!(50));
        assert_eq!(score.volume_score, dec!(57.75));
        assert_eq!(score.longevity_score, dec!(90));
        assert_eq!(score.subscriber_score, dec!(50));
        assert_eq!(score.total, dec!(64.94));
    }

    #[test]
    fn test_negative_roi_penalty_cuts_score_by_over_80_percent() {
        let scorer = RankingScorer::default();
        let positive = scorer.score(&inputs(dec!(5), dec!(0.5), 100, 400, 50), now());
        let negative = scorer.score(&inputs(dec!(-5), dec!(0.5), 100, 400, 50), now());
        assert_eq!(negative, dec!(3.93));
        assert!(negative < positive * dec!(0.2));
    }

    #[test]
    fn test_score_is_monotone_in_non_negative_roi() {
        let scorer = RankingScorer::default();
        let mut previous = Decimal::MIN;
        for roi in (0..=200).map(Decimal::from) {
            let score = scorer.score(&inputs(roi, dec!(0.45), 120, 200, 10), now());
            assert!(score >= previous, "score dropped at roi {roi}");
            previous = score;
        }
    }

    #[test]
    fn test_low_win_rate_penalty() {
        let scorer = RankingScorer::default();
        let lucky = scorer.evaluate(&inputs(dec!(40), dec!(0.2), 300, 365, 100), now());
        // Multiplier: max(0.6, 1 - 0.1 * 2) = 0.8.
        let expected = (lucky.weighted * dec!(0.8))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(lucky.total, expected);

        let floored = scorer.evaluate(&inputs(dec!(40), dec!(0.05), 300, 365, 100), now());
        let expected = (floored.weighted * dec!(0.6))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(floored.total, expected);

        // At or below 15% ROI the penalty does not apply.
        let modest = scorer.evaluate(&inputs(dec!(15), dec!(0.2), 300, 365, 100), now());
        assert_eq!(modest.weighted, dec!(78.625));
        assert_eq!(modest.total, dec!(78.63));
    }

    #[test]
    fn test_volume_steps_and_boost() {
        assert_eq!(volume_score(1000, Decimal::ZERO), dec!(100));
        assert_eq!(volume_score(999, Decimal::ZERO), dec!(85));
        assert_eq!(volume_score(19, Decimal::ZERO), dec!(23.75));
        assert_eq!(volume_score(0, dec!(10)), Decimal::ZERO);
        // Boost caps at 1.5x and the result at 100.
        assert_eq!(volume_score(250, dec!(80)), dec!(100));
        assert_eq!(volume_score(50, dec!(80)), dec!(60));
    }

    #[test]
    fn test_longevity_steps() {
        let at = |days| longevity_score(Some(now() - Duration::days(days)), now());
        assert_eq!(at(730), dec!(100));
        assert_eq!(at(729), dec!(90));
        assert_eq!(at(30), dec!(30));
        assert_eq!(at(12), dec!(12));
        assert_eq!(at(2), dec!(5));
        assert_eq!(longevity_score(None, now()), Decimal::ZERO);
    }

    #[test]
    fn test_subscriber_steps() {
        assert_eq!(subscriber_score(1000), dec!(100));
        assert_eq!(subscriber_score(25), dec!(50));
        assert_eq!(subscriber_score(4), dec!(24));
        assert_eq!(subscriber_score(0), Decimal::ZERO);
    }

    #[test]
    fn test_roi_score_caps_at_100() {
        assert_eq!(roi_score(dec!(-0.01)), Decimal::ZERO);
        assert_eq!(roi_score(Decimal::ZERO), dec!(50));
        assert_eq!(roi_score(dec!(20)), dec!(100));
        assert_eq!(roi_score(dec!(500)), dec!(100));
    }

    #[test]
    fn test_empty_inputs_score_low_without_error() {
        let score = RankingScorer::default().evaluate(&RankingInputs::default(), now());
        // Only the ROI component (roi = 0 -> 50) contributes.
        assert_eq!(score.total, dec!(20));
    }

    #[test]
    fn test_rank_orders_best_first_with_id_tiebreak() {
        let snapshot = |id: &str, roi| StrategySnapshot {
            strategy_id: id.to_string(),
            name: format!("Strategy {id}"),
            inputs: inputs(roi, dec!(0.55), 500, 400, 30),
        };
        let ranked = RankingScorer::default().rank(
            vec![
                snapshot("b", dec!(2)),
                snapshot("c", dec!(12)),
                snapshot("a", dec!(2)),
                snapshot("d", dec!(-3)),
            ],
            now(),
        );
        let order: Vec<&str> = ranked.iter().map(|r| r.strategy_id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b", "d"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[3].rank, 4);
    }

    #[test]
    fn test_new_validates_config() {
        let mut config = RankingConfig::default();
        config.weights.roi = dec!(0.5);
        assert!(matches!(
            RankingScorer::new(config),
            Err(RankingError::InvalidWeights(_))
        ));

        let mut config = RankingConfig::default();
        config.penalties.low_win_rate_floor = dec!(-0.1);
        assert!(matches!(
            RankingScorer::new(config),
            Err(RankingError::InvalidPenalty(_))
        ));

        let mut config = RankingConfig::default();
        config.penalties.low_win_rate_slope = dec!(-2);
        assert!(matches!(
            RankingScorer::new(config),
            Err(RankingError::InvalidPenalty(_))
        ));

        let mut config = RankingConfig::default();
        config.penalties.low_win_rate_threshold = dec!(30);
        assert!(matches!(
            RankingScorer::new(config),
            Err(RankingError::InvalidPenalty(_))
        ));

        assert!(RankingScorer::new(RankingConfig::default()).is_ok());
    }

    #[test]
    fn test_extreme_inputs_stay_in_range() {
        let scorer = RankingScorer::default();
        let huge = scorer.evaluate(&inputs(Decimal::MAX, Decimal::MAX, u64::MAX, 5000, u64::MAX), now());
        assert_eq!(huge.roi_score, dec!(100));
        assert_eq!(huge.winrate_score, dec!(100));
        assert_eq!(huge.total, dec!(100));

        let tiny = scorer.evaluate(&inputs(Decimal::MAX, Decimal::MIN, 0, 0, 0), now());
        assert_eq!(tiny.winrate_score, Decimal::ZERO);
        assert!(tiny.total >= Decimal::ZERO && tiny.total <= dec!(100));

        let mut config = RankingConfig::default();
        config.penalties.low_win_rate_slope = Decimal::MAX;
        let steep = RankingScorer::new(config).unwrap();
        let floored = steep.evaluate(&inputs(dec!(40), dec!(0.1), 300, 365, 100), now());
        assert_eq!(
            floored.total,
            (floored.weighted * dec!(0.6)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        );
    }

    #[test]
    fn test_scores_are_idempotent() {
        let scorer = RankingScorer::default();
        let input = inputs(dec!(7.3), dec!(0.52), 321, 95, 12);
        assert_eq!(scorer.evaluate(&input, now()), scorer.evaluate(&input, now()));
    }
}
