use aggregator::{ChartConfig, Dimension, Metric, breakdown};
use analytics::{AnalyticsEngine, consolidate, consolidate_units};
use chrono::{DateTime, TimeZone, Utc};
use core_types::{StreakType, WagerLeg};
use ranking::{RankingScorer, StrategySnapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const LEGS: &str = include_str!("../../../demos/legs.json");
const STRATEGIES: &str = include_str!("../../../demos/strategies.json");

fn legs() -> Vec<WagerLeg> {
    serde_json::from_str(LEGS).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_snapshot_consolidates_into_units() {
    let legs = legs();
    assert_eq!(legs.len(), 9);

    let consolidation = consolidate(&legs);
    assert_eq!(consolidation.singles.len(), 5);
    assert_eq!(consolidation.parlays.len(), 2);
    assert_eq!(consolidation.total_units(), 7);
}

#[test]
fn test_metrics_for_snapshot() {
    let metrics = AnalyticsEngine::new().calculate_from_legs(&legs()).rounded();

    assert_eq!(metrics.total_bets, 7);
    assert_eq!(metrics.straight_count, 5);
    assert_eq!(metrics.parlay_count, 2);
    assert_eq!(metrics.void_count, 1);
    assert_eq!(metrics.wins, 3);
    assert_eq!(metrics.losses, 2);
    assert_eq!(metrics.win_rate, dec!(60));
    assert_eq!(metrics.total_profit, dec!(162.5));
    assert_eq!(metrics.total_stake, dec!(285));
    assert_eq!(metrics.roi, dec!(57.02));
    assert_eq!(metrics.avg_stake, dec!(40.71));
    assert_eq!(metrics.biggest_win, dec!(100));
    assert_eq!(metrics.biggest_loss, dec!(50));
    assert_eq!(metrics.current_streak, 2);
    assert_eq!(metrics.streak_type, StreakType::Win);
}

#[test]
fn test_breakdown_counts_each_unit_once() {
    let units = consolidate_units(&legs());
    let entries = breakdown(&units, Dimension::Sport);

    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["NBA", "NFL", "NHL", "Multi-Sport Parlays"]);

    let total: usize = entries.iter().map(|e| e.count).sum();
    assert_eq!(total, units.len());

    let nfl = &entries[1];
    assert_eq!(nfl.count, 4);
    assert_eq!(nfl.wins, 2);
    assert_eq!(nfl.profit, dec!(112.5));
    assert_eq!(nfl.staked, dec!(185));
}

#[test]
fn test_chart_counts_parlay_legs_individually() {
    let legs = legs();
    let config = ChartConfig {
        dimension: Dimension::Sport,
        metric: Metric::Count,
    };
    let points = config.apply(&legs);

    let counts: Vec<(&str, Decimal)> = points.iter().map(|p| (p.label.as_str(), p.value)).collect();
    assert_eq!(
        counts,
        vec![("NBA", dec!(2)), ("NFL", dec!(6)), ("NHL", dec!(1))]
    );
    let total: usize = points.iter().map(|p| p.count).sum();
    assert_eq!(total, legs.len());
}

#[test]
fn test_every_dimension_partitions_all_units() {
    let units = consolidate_units(&legs());
    for dimension in Dimension::ALL {
        let total: usize = breakdown(&units, dimension).iter().map(|e| e.count).sum();
        assert_eq!(total, units.len(), "dimension {dimension}");
    }
}

#[test]
fn test_strategies_rank_in_score_order() {
    let strategies: Vec<StrategySnapshot> = serde_json::from_str(STRATEGIES).unwrap();
    let ranked = RankingScorer::default().rank(strategies, now());

    let order: Vec<(&str, Decimal)> = ranked
        .iter()
        .map(|r| (r.strategy_id.as_str(), r.score.total))
        .collect();
    assert_eq!(
        order,
        vec![
            ("longshot-lotto", dec!(70.4)),
            ("sharp-totals", dec!(64.94)),
            ("fresh-start", dec!(20)),
            ("cold-streak", dec!(3.93)),
        ]
    );
}
