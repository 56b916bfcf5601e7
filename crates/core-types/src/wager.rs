use crate::enums::BetStatus;
use crate::lenient;
use crate::time;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One raw wager row as handed over by the store, possibly one leg of a parlay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WagerLeg {
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub user_id: String,

    // --- Category fields ---
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub sport: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub league: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub bet_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub side: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub sportsbook: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub prop_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub player_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub home_team: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub away_team: Option<String>,

    // --- Money ---
    /// American odds, e.g. -110 or +250.
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub odds: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub stake: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub potential_payout: Decimal,
    /// Recorded profit. `None` until the store has graded the wager.
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub profit: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient::status")]
    pub status: BetStatus,

    // --- Timestamps (raw ISO-8601, parsed on demand) ---
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub placed_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub game_date: Option<String>,

    // --- Parlay linkage ---
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub parlay_group_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_parlay: bool,
}

impl WagerLeg {
    /// Creates a pending leg with zero stake; fill the rest with the `with_*` setters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: BetStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_stake(mut self, stake: Decimal, potential_payout: Decimal) -> Self {
        self.stake = stake;
        self.potential_payout = potential_payout;
        self
    }

    pub fn with_profit(mut self, profit: Option<Decimal>) -> Self {
        self.profit = profit;
        self
    }

    pub fn with_odds(mut self, odds: Decimal) -> Self {
        self.odds = Some(odds);
        self
    }

    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = Some(sport.into());
        self
    }

    pub fn with_bet_type(mut self, bet_type: impl Into<String>) -> Self {
        self.bet_type = Some(bet_type.into());
        self
    }

    pub fn with_dates(mut self, placed_at: Option<&str>, game_date: Option<&str>) -> Self {
        self.placed_at = placed_at.map(str::to_string);
        self.game_date = game_date.map(str::to_string);
        self
    }

    pub fn in_parlay(mut self, group_id: impl Into<String>) -> Self {
        self.parlay_group_id = Some(group_id.into());
        self.is_parlay = true;
        self
    }

    /// A leg is consolidated only when it both names a group and is flagged as a parlay.
    pub fn parlay_group(&self) -> Option<&str> {
        match (&self.parlay_group_id, self.is_parlay) {
            (Some(group), true) => Some(group.as_str()),
            _ => None,
        }
    }

    /// Recorded profit, or the profit implied by the settlement when none is recorded.
    pub fn resolved_profit(&self) -> Decimal {
        if let Some(profit) = self.profit {
            return profit;
        }
        match self.status {
            BetStatus::Won => self.potential_payout.saturating_sub(self.stake),
            BetStatus::Lost => -self.stake,
            _ => Decimal::ZERO,
        }
    }

    /// When the wager is decided: the game date, falling back to the placement time.
    pub fn event_time(&self) -> Option<NaiveDateTime> {
        time::parse_optional(self.game_date.as_deref())
            .or_else(|| time::parse_optional(self.placed_at.as_deref()))
    }

    pub fn placed_time(&self) -> Option<NaiveDateTime> {
        time::parse_optional(self.placed_at.as_deref())
    }
}
