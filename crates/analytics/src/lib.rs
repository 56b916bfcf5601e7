//! # WagerLens Analytics Engine
//!
//! This crate turns raw wager legs into countable units and derives the
//! performance numbers shown on the dashboard.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Total Functions:** Nothing here returns an error. Malformed records degrade their own
//!   contribution and an empty snapshot yields a zeroed report.
//!
//! ## Public API
//!
//! - `consolidate` / `consolidate_units`: the parlay consolidator.
//! - `AnalyticsEngine`: the metrics calculator.
//! - `WagerMetrics`: the report it produces.

// Declare the modules that constitute this crate.
pub mod consolidator;
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use consolidator::{Consolidation, consolidate, consolidate_units};
pub use engine::AnalyticsEngine;
pub use report::WagerMetrics;
