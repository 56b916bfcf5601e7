use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Settlement state of a wager leg or a consolidated unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum BetStatus {
    #[default]
    Pending,
    Won,
    Lost,
    Void,
    Cancelled,
    Push,
}

impl BetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetStatus::Pending => "pending",
            BetStatus::Won => "won",
            BetStatus::Lost => "lost",
            BetStatus::Void => "void",
            BetStatus::Cancelled => "cancelled",
            BetStatus::Push => "push",
        }
    }

    /// Won or lost. Only these count toward win rates and streaks.
    pub fn is_settled(&self) -> bool {
        matches!(self, BetStatus::Won | BetStatus::Lost)
    }

    /// Whether a parlay leg in this state has finished grading.
    pub fn is_graded(&self) -> bool {
        matches!(
            self,
            BetStatus::Won | BetStatus::Lost | BetStatus::Void | BetStatus::Push
        )
    }

    pub fn is_void_or_cancelled(&self) -> bool {
        matches!(self, BetStatus::Void | BetStatus::Cancelled)
    }
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BetStatus::Pending),
            "won" => Ok(BetStatus::Won),
            "lost" => Ok(BetStatus::Lost),
            "void" => Ok(BetStatus::Void),
            "cancelled" | "canceled" => Ok(BetStatus::Cancelled),
            "push" => Ok(BetStatus::Push),
            _ => Err(CoreError::UnknownStatus(s.to_string())),
        }
    }
}

/// Lenient conversion used when decoding store rows: anything unrecognised is pending.
impl From<String> for BetStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|e: CoreError| {
            tracing::warn!(error = %e, "Treating unrecognised status as pending.");
            BetStatus::Pending
        })
    }
}

/// Outcome of the current run of consecutive settled units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakType {
    Win,
    Loss,
    #[default]
    None,
}

impl StreakType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakType::Win => "win",
            StreakType::Loss => "loss",
            StreakType::None => "none",
        }
    }
}
