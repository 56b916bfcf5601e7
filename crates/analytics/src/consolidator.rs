use core_types::{BetStatus, Parlay, WagerLeg, WagerUnit};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Raw legs split into parlay groups and straight wagers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consolidation {
    /// Ordered by the first appearance of each group id.
    pub parlays: Vec<Parlay>,
    /// In input order.
    pub singles: Vec<WagerLeg>,
}

impl Consolidation {
    /// Singles first, then parlays.
    pub fn units(&self) -> Vec<WagerUnit> {
        self.singles
            .iter()
            .cloned()
            .map(WagerUnit::Single)
            .chain(self.parlays.iter().cloned().map(WagerUnit::Parlay))
            .collect()
    }

    pub fn total_units(&self) -> usize {
        self.singles.len() + self.parlays.len()
    }
}

/// Groups raw legs into parlays and singles and resolves every parlay's outcome.
pub fn consolidate(legs: &[WagerLeg]) -> Consolidation {
    let mut singles = Vec::new();
    let mut group_order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<WagerLeg>> = HashMap::new();

    for leg in legs {
        match leg.parlay_group() {
            Some(group_id) => {
                groups
                    .entry(group_id)
                    .or_insert_with(|| {
                        group_order.push(group_id);
                        Vec::new()
                    })
                    .push(leg.clone());
            }
            None => singles.push(leg.clone()),
        }
    }

    let parlays: Vec<Parlay> = group_order
        .into_iter()
        .filter_map(|group_id| {
            let members = groups.remove(group_id)?;
            resolve_parlay(group_id, members)
        })
        .collect();

    tracing::debug!(
        legs = legs.len(),
        parlays = parlays.len(),
        singles = singles.len(),
        "Consolidated wager legs."
    );

    Consolidation { parlays, singles }
}

/// Like [`consolidate`], but keeps every unit at the position of its first leg.
pub fn consolidate_units(legs: &[WagerLeg]) -> Vec<WagerUnit> {
    let Consolidation { parlays, singles } = consolidate(legs);
    let mut parlays: HashMap<String, Parlay> = parlays
        .into_iter()
        .map(|p| (p.group_id().to_string(), p))
        .collect();
    let mut singles = singles.into_iter();

    let mut units = Vec::with_capacity(singles.len() + parlays.len());
    for leg in legs {
        match leg.parlay_group() {
            Some(group_id) => {
                // Only the first leg of a group finds the parlay still in the map.
                if let Some(parlay) = parlays.remove(group_id) {
                    units.push(WagerUnit::Parlay(parlay));
                }
            }
            None => {
                if let Some(single) = singles.next() {
                    units.push(WagerUnit::Single(single));
                }
            }
        }
    }
    units
}

/// Picks the group's representative values and settles it.
fn resolve_parlay(group_id: &str, legs: Vec<WagerLeg>) -> Option<Parlay> {
    let first_positive = |value: fn(&WagerLeg) -> Decimal| {
        legs.iter()
            .map(value)
            .find(|v| *v > Decimal::ZERO)
            .unwrap_or(Decimal::ZERO)
    };
    let stake = first_positive(|leg| leg.stake);
    let potential_payout = first_positive(|leg| leg.potential_payout);

    let recorded_profit = legs
        .iter()
        .filter_map(|leg| leg.profit)
        .find(|profit| !profit.is_zero());

    let (status, profit) = match recorded_profit {
        Some(profit) if profit > Decimal::ZERO => (BetStatus::Won, profit),
        Some(profit) => (BetStatus::Lost, profit),
        None => settle_from_statuses(&legs, stake, potential_payout),
    };

    Parlay::new(group_id, legs, stake, potential_payout, status, profit)
}

fn settle_from_statuses(
    legs: &[WagerLeg],
    stake: Decimal,
    potential_payout: Decimal,
) -> (BetStatus, Decimal) {
    let count = |status: BetStatus| legs.iter().filter(|leg| leg.status == status).count();
    let graded = legs.iter().filter(|leg| leg.status.is_graded()).count();
    let won = count(BetStatus::Won);
    let lost = count(BetStatus::Lost);
    let void = count(BetStatus::Void);

    // One losing leg sinks the parlay even while siblings are still open.
    if lost > 0 {
        (BetStatus::Lost, -stake)
    } else if graded < legs.len() {
        (BetStatus::Pending, Decimal::ZERO)
    } else if void == legs.len() {
        (BetStatus::Void, Decimal::ZERO)
    } else if won == legs.len() - void {
        (BetStatus::Won, potential_payout.saturating_sub(stake))
    } else {
        // Graded pushes mixed with wins: no rule prices these.
        (BetStatus::Pending, Decimal::ZERO)
    }
}
