use crate::dimension::Dimension;
use crate::group::group_by;
use crate::metric::Metric;
use core_types::WagerLeg;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One point of a user-configured chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Decimal,
    /// Legs that fell into this bucket.
    pub count: usize,
}

/// A dimension/metric pair chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub dimension: Dimension,
    pub metric: Metric,
}

impl ChartConfig {
    pub fn apply(&self, legs: &[WagerLeg]) -> Vec<ChartPoint> {
        custom_aggregate(legs, self.dimension, self.metric)
    }
}

/// Buckets raw legs by `dimension` and reduces each bucket with `metric`.
///
/// Parlay legs are counted individually here, unlike in a breakdown.
pub fn custom_aggregate(legs: &[WagerLeg], dimension: Dimension, metric: Metric) -> Vec<ChartPoint> {
    let points: Vec<ChartPoint> = group_by(legs.iter(), |leg| dimension.bucket(leg))
        .into_iter()
        .map(|group| ChartPoint {
            value: metric.reduce(&group.items),
            count: group.items.len(),
            label: group.bucket.label,
        })
        .collect();

    tracing::debug!(
        dimension = %dimension,
        metric = %metric,
        legs = legs.len(),
        points = points.len(),
        "Built custom chart."
    );
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::BetStatus;
    use rust_decimal_macros::dec;

    fn leg(id: &str, game_date: &str, status: BetStatus) -> WagerLeg {
        WagerLeg::new(id)
            .with_status(status)
            .with_stake(dec!(10), dec!(20))
            .with_dates(None, Some(game_date))
    }

    #[test]
    fn test_chart_by_date_is_chronological() {
        let legs = vec![
            leg("c", "2024-02-10", BetStatus::Won),
            leg("a", "2023-12-31", BetStatus::Lost),
            leg("b", "2024-01-05", BetStatus::Won),
            leg("d", "not a date", BetStatus::Won),
            leg("e", "2024-01-05", BetStatus::Won),
        ];
        let points = custom_aggregate(&legs, Dimension::Date, Metric::Profit);

        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2023-12-31", "2024-01-05", "2024-02-10", "Unknown"]);
        assert_eq!(points[1].value, dec!(20));
        assert_eq!(points[1].count, 2);
    }

    #[test]
    fn test_chart_does_not_collapse_parlays() {
        let legs = vec![
            WagerLeg::new("a").in_parlay("p").with_sport("NBA").with_status(BetStatus::Won),
            WagerLeg::new("b").in_parlay("p").with_sport("NBA").with_status(BetStatus::Won),
            WagerLeg::new("c").with_sport("NBA").with_status(BetStatus::Lost),
        ];
        let points = ChartConfig {
            dimension: Dimension::Sport,
            metric: Metric::Count,
        }
        .apply(&legs);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, dec!(3));
    }

    #[test]
    fn test_day_of_week_is_sunday_first() {
        let legs = vec![
            leg("sat", "2024-03-16", BetStatus::Won),
            leg("mon", "2024-03-11", BetStatus::Won),
            leg("sun", "2024-03-17", BetStatus::Lost),
        ];
        let points = custom_aggregate(&legs, Dimension::DayOfWeek, Metric::WinRate);
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Sunday", "Monday", "Saturday"]);
        assert_eq!(points[0].value, Decimal::ZERO);
        assert_eq!(points[2].value, dec!(100));
    }

    #[test]
    fn test_canonical_stake_order() {
        let legs = vec![
            WagerLeg::new("big").with_stake(dec!(500), dec!(900)),
            WagerLeg::new("small").with_stake(dec!(5), dec!(9)),
            WagerLeg::new("mid").with_stake(dec!(50), dec!(90)),
        ];
        let points = custom_aggregate(&legs, Dimension::StakeSize, Metric::TotalStaked);
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["$0-25", "$25-100", "$100+"]);
    }

    #[test]
    fn test_status_keeps_insertion_order() {
        let legs = vec![
            WagerLeg::new("1").with_status(BetStatus::Void),
            WagerLeg::new("2").with_status(BetStatus::Won),
            WagerLeg::new("3").with_status(BetStatus::Void),
        ];
        let points = custom_aggregate(&legs, Dimension::Status, Metric::VoidCount);
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Void", "Won"]);
        assert_eq!(points[0].value, dec!(2));
    }

    #[test]
    fn test_empty_input_has_no_points() {
        assert!(custom_aggregate(&[], Dimension::Month, Metric::Roi).is_empty());
    }
}
