//! # WagerLens Core Types
//!
//! Layer 0 of the workspace: the raw `WagerLeg` record, its settlement status,
//! and the `WagerUnit` sum type every downstream calculation counts in.
//!
//! Nothing here performs aggregation. The crate owns decoding (store rows are
//! messy, see [`lenient`]), timestamp parsing, and the single-leg profit
//! fallback rule that both the metrics and chart paths share.

pub mod enums;
pub mod error;
pub mod lenient;
pub mod money;
pub mod time;
pub mod unit;
pub mod wager;

// Re-export the core types to provide a clean public API.
pub use enums::{BetStatus, StreakType};
pub use error::CoreError;
pub use unit::{Parlay, WagerUnit};
pub use wager::WagerLeg;
