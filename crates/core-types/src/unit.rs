use crate::enums::BetStatus;
use crate::wager::WagerLeg;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// A group of legs sharing one `parlay_group_id`, settled as a single wager.
///
/// Stake, payout, status and profit belong to the group and are fixed when the
/// parlay is built; they are never re-derived from individual legs afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parlay {
    group_id: String,
    legs: Vec<WagerLeg>,
    stake: Decimal,
    potential_payout: Decimal,
    status: BetStatus,
    profit: Decimal,
}

impl Parlay {
    /// Returns `None` for an empty leg list; a parlay always has at least one leg.
    pub fn new(
        group_id: impl Into<String>,
        legs: Vec<WagerLeg>,
        stake: Decimal,
        potential_payout: Decimal,
        status: BetStatus,
        profit: Decimal,
    ) -> Option<Self> {
        if legs.is_empty() {
            return None;
        }
        Some(Self {
            group_id: group_id.into(),
            legs,
            stake,
            potential_payout,
            status,
            profit,
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn legs(&self) -> &[WagerLeg] {
        &self.legs
    }

    pub fn stake(&self) -> Decimal {
        self.stake
    }

    pub fn potential_payout(&self) -> Decimal {
        self.potential_payout
    }

    pub fn status(&self) -> BetStatus {
        self.status
    }

    pub fn profit(&self) -> Decimal {
        self.profit
    }
}

/// The countable unit of betting activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "wager", rename_all = "lowercase")]
pub enum WagerUnit {
    Single(WagerLeg),
    Parlay(Parlay),
}

impl WagerUnit {
    pub fn stake(&self) -> Decimal {
        match self {
            WagerUnit::Single(leg) => leg.stake,
            WagerUnit::Parlay(parlay) => parlay.stake(),
        }
    }

    pub fn status(&self) -> BetStatus {
        match self {
            WagerUnit::Single(leg) => leg.status,
            WagerUnit::Parlay(parlay) => parlay.status(),
        }
    }

    /// Resolved profit: the group profit for a parlay, the leg fallback rule for a single.
    pub fn profit(&self) -> Decimal {
        match self {
            WagerUnit::Single(leg) => leg.resolved_profit(),
            WagerUnit::Parlay(parlay) => parlay.profit(),
        }
    }

    pub fn legs(&self) -> &[WagerLeg] {
        match self {
            WagerUnit::Single(leg) => std::slice::from_ref(leg),
            WagerUnit::Parlay(parlay) => parlay.legs(),
        }
    }

    pub fn leg_count(&self) -> usize {
        self.legs().len()
    }

    pub fn is_parlay(&self) -> bool {
        matches!(self, WagerUnit::Parlay(_))
    }

    /// Ordering key for recency. A parlay is decided by its last game.
    pub fn sort_time(&self) -> Option<NaiveDateTime> {
        match self {
            WagerUnit::Single(leg) => leg.event_time(),
            WagerUnit::Parlay(parlay) => parlay.legs().iter().filter_map(WagerLeg::event_time).max(),
        }
    }
}
