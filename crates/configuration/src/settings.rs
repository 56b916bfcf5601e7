use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ranking: RankingConfig,
    pub logging: LoggingConfig,
}

/// Parameters of the marketplace ranking score.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub weights: RankingWeights,
    pub penalties: PenaltyConfig,
}

/// Weights of the five sub-scores. Must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub roi: Decimal,
    pub win_rate: Decimal,
    pub volume: Decimal,
    pub longevity: Decimal,
    pub subscribers: Decimal,
}

impl RankingWeights {
    fn all(&self) -> [Decimal; 5] {
        [self.roi, self.win_rate, self.volume, self.longevity, self.subscribers]
    }

    pub fn total(&self) -> Decimal {
        self.all()
            .into_iter()
            .fold(Decimal::ZERO, |acc, w| acc.saturating_add(w))
    }

    pub fn all_non_negative(&self) -> bool {
        self.all().iter().all(|w| !w.is_sign_negative())
    }

    /// Rejects negative weights and weights that do not sum to exactly 1.0.
    pub fn validate(&self) -> Result<(), String> {
        if !self.all_non_negative() {
            return Err("ranking weights must not be negative".to_string());
        }
        if self.total() != Decimal::ONE {
            return Err(format!("ranking weights must sum to 1.0, got {}", self.total()));
        }
        Ok(())
    }
}

impl PenaltyConfig {
    /// Multipliers and the win-rate threshold must lie in [0, 1] and the slope must not
    /// be negative. `low_win_rate_min_roi` is a percentage and may take any value.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("negative_roi_multiplier", self.negative_roi_multiplier),
            ("low_win_rate_threshold", self.low_win_rate_threshold),
            ("low_win_rate_floor", self.low_win_rate_floor),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(format!("{name} must be between 0 and 1, got {value}"));
            }
        }
        if self.low_win_rate_slope < Decimal::ZERO {
            return Err(format!(
                "low_win_rate_slope must not be negative, got {}",
                self.low_win_rate_slope
            ));
        }
        Ok(())
    }
}

/// Multipliers applied to the weighted score after the sub-scores are combined.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    /// Applied to the whole score when ROI is negative.
    pub negative_roi_multiplier: Decimal,
    /// Win rate (0..1) below which a high-ROI record is treated as luck-driven.
    pub low_win_rate_threshold: Decimal,
    /// ROI percentage above which the low-win-rate penalty applies.
    pub low_win_rate_min_roi: Decimal,
    /// Score reduction per unit of win rate below the threshold.
    pub low_win_rate_slope: Decimal,
    /// The low-win-rate multiplier never goes below this.
    pub low_win_rate_floor: Decimal,
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_name: String,
    pub ansi: bool,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml and still have it work.

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            roi: dec!(0.4),
            win_rate: dec!(0.1),
            volume: dec!(0.25),
            longevity: dec!(0.2),
            subscribers: dec!(0.05),
        }
    }
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            negative_roi_multiplier: dec!(0.1),
            low_win_rate_threshold: dec!(0.3),
            low_win_rate_min_roi: dec!(15),
            low_win_rate_slope: dec!(2),
            low_win_rate_floor: dec!(0.6),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_name: "wagerlens.log".to_string(),
            ansi: true,
        }
    }
}
