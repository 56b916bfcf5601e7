use crate::error::AggregatorError;
use crate::group::{Bucket, OrderKey};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use core_types::{BetStatus, WagerLeg};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const TIMES_OF_DAY: [&str; 4] = ["Morning", "Afternoon", "Evening", "Late Night"];
const STAKE_SIZES: [&str; 3] = ["$0-25", "$25-100", "$100+"];
const ODDS_RANGES: [&str; 3] = ["Chalk", "Even Money", "Longshot"];

/// The attribute a breakdown or custom chart partitions wagers by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "clap", value(rename_all = "snake_case"))]
pub enum Dimension {
    Sport,
    League,
    BetType,
    Side,
    Sportsbook,
    PropType,
    Player,
    HomeTeam,
    AwayTeam,
    Status,
    BetKind,
    Date,
    Week,
    Month,
    DayOfWeek,
    TimeOfDay,
    StakeSize,
    OddsRange,
}

impl Dimension {
    pub const ALL: [Dimension; 18] = [
        Dimension::Sport,
        Dimension::League,
        Dimension::BetType,
        Dimension::Side,
        Dimension::Sportsbook,
        Dimension::PropType,
        Dimension::Player,
        Dimension::HomeTeam,
        Dimension::AwayTeam,
        Dimension::Status,
        Dimension::BetKind,
        Dimension::Date,
        Dimension::Week,
        Dimension::Month,
        Dimension::DayOfWeek,
        Dimension::TimeOfDay,
        Dimension::StakeSize,
        Dimension::OddsRange,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Dimension::Sport => "sport",
            Dimension::League => "league",
            Dimension::BetType => "bet_type",
            Dimension::Side => "side",
            Dimension::Sportsbook => "sportsbook",
            Dimension::PropType => "prop_type",
            Dimension::Player => "player",
            Dimension::HomeTeam => "home_team",
            Dimension::AwayTeam => "away_team",
            Dimension::Status => "status",
            Dimension::BetKind => "bet_kind",
            Dimension::Date => "date",
            Dimension::Week => "week",
            Dimension::Month => "month",
            Dimension::DayOfWeek => "day_of_week",
            Dimension::TimeOfDay => "time_of_day",
            Dimension::StakeSize => "stake_size",
            Dimension::OddsRange => "odds_range",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Sport => "Sport",
            Dimension::League => "League",
            Dimension::BetType => "Bet Type",
            Dimension::Side => "Side",
            Dimension::Sportsbook => "Sportsbook",
            Dimension::PropType => "Prop Type",
            Dimension::Player => "Player",
            Dimension::HomeTeam => "Home Team",
            Dimension::AwayTeam => "Away Team",
            Dimension::Status => "Status",
            Dimension::BetKind => "Bet Kind",
            Dimension::Date => "Date",
            Dimension::Week => "Week",
            Dimension::Month => "Month",
            Dimension::DayOfWeek => "Day of Week",
            Dimension::TimeOfDay => "Time of Day",
            Dimension::StakeSize => "Stake Size",
            Dimension::OddsRange => "Odds Range",
        }
    }

    /// Label of the bucket for parlays whose legs disagree, e.g. "Multi-Sport Parlays".
    pub fn mixed_label(&self) -> String {
        format!("Multi-{} Parlays", self.label())
    }

    /// The bucket a single leg falls into.
    pub fn bucket(&self, leg: &WagerLeg) -> Bucket {
        match self {
            Dimension::Sport => text_bucket(&leg.sport),
            Dimension::League => text_bucket(&leg.league),
            Dimension::BetType => text_bucket(&leg.bet_type),
            Dimension::Side => text_bucket(&leg.side),
            Dimension::Sportsbook => text_bucket(&leg.sportsbook),
            Dimension::PropType => text_bucket(&leg.prop_type),
            Dimension::Player => text_bucket(&leg.player_name),
            Dimension::HomeTeam => text_bucket(&leg.home_team),
            Dimension::AwayTeam => text_bucket(&leg.away_team),
            Dimension::Status => Bucket::known(status_label(leg.status), OrderKey::Seen),
            Dimension::BetKind => {
                let label = if leg.parlay_group().is_some() { "Parlay" } else { "Straight" };
                Bucket::known(label, OrderKey::Seen)
            }
            Dimension::Date => dated_bucket(leg, leg.event_time(), |dt| {
                let day = dt.date();
                (day.format("%Y-%m-%d").to_string(), day)
            }),
            Dimension::Week => dated_bucket(leg, leg.event_time(), |dt| {
                let day = dt.date();
                let monday = day - Duration::days(i64::from(day.weekday().num_days_from_monday()));
                (monday.format("%Y-%m-%d").to_string(), monday)
            }),
            Dimension::Month => dated_bucket(leg, leg.event_time(), |dt| {
                let first = NaiveDate::from_ymd_opt(dt.year(), dt.month(), 1).unwrap_or(dt.date());
                (first.format("%Y-%m").to_string(), first)
            }),
            Dimension::DayOfWeek => match leg.event_time() {
                Some(dt) => {
                    let position = dt.weekday().num_days_from_sunday() as u8;
                    canonical(&WEEKDAYS, position)
                }
                None => Bucket::unknown(),
            },
            Dimension::TimeOfDay => match leg.placed_time() {
                Some(dt) => canonical(&TIMES_OF_DAY, time_of_day(dt.hour())),
                None => Bucket::unknown(),
            },
            Dimension::StakeSize => canonical(&STAKE_SIZES, stake_size(leg.stake)),
            Dimension::OddsRange => match leg.odds {
                Some(odds) => canonical(&ODDS_RANGES, odds_range(odds)),
                None => Bucket::unknown(),
            },
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Dimension {
    type Err = AggregatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Dimension::ALL
            .into_iter()
            .find(|d| d.key() == key)
            .ok_or_else(|| AggregatorError::UnknownDimension(s.to_string()))
    }
}

fn text_bucket(value: &Option<String>) -> Bucket {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Bucket::known(text, OrderKey::Alpha(text.to_lowercase())),
        _ => Bucket::unknown(),
    }
}

fn dated_bucket<F>(leg: &WagerLeg, time: Option<NaiveDateTime>, render: F) -> Bucket
where
    F: Fn(NaiveDateTime) -> (String, NaiveDate),
{
    match time {
        Some(dt) => {
            let (label, day) = render(dt);
            Bucket::known(label, OrderKey::Time(day))
        }
        None => {
            if leg.game_date.is_some() || leg.placed_at.is_some() {
                tracing::warn!(leg_id = %leg.id, "Unparsable wager date, bucketing as Unknown.");
            }
            Bucket::unknown()
        }
    }
}

fn canonical(labels: &[&'static str], position: u8) -> Bucket {
    Bucket::known(labels[usize::from(position)], OrderKey::Position(position))
}

fn status_label(status: BetStatus) -> &'static str {
    match status {
        BetStatus::Pending => "Pending",
        BetStatus::Won => "Won",
        BetStatus::Lost => "Lost",
        BetStatus::Void => "Void",
        BetStatus::Cancelled => "Cancelled",
        BetStatus::Push => "Push",
    }
}

fn time_of_day(hour: u32) -> u8 {
    match hour {
        6..=11 => 0,
        12..=17 => 1,
        18..=21 => 2,
        _ => 3,
    }
}

fn stake_size(stake: Decimal) -> u8 {
    if stake <= Decimal::from(25) {
        0
    } else if stake <= Decimal::ONE_HUNDRED {
        1
    } else {
        2
    }
}

fn odds_range(odds: Decimal) -> u8 {
    if odds <= Decimal::from(-150) {
        0
    } else if odds >= Decimal::from(150) {
        2
    } else {
        1
    }
}
