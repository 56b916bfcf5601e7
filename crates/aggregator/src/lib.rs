//! # WagerLens Dimensional Aggregator
//!
//! One group-and-reduce engine behind both the fixed breakdown views and the
//! user-configurable charts.
//!
//! - **Breakdown mode** works on consolidated `WagerUnit`s: every parlay lands
//!   in exactly one bucket.
//! - **Custom-chart mode** works on raw legs, so each parlay leg is counted on
//!   its own. The two modes can therefore report different counts for the
//!   same snapshot.
//!
//! Dimension and metric keys form closed sets. Parse them with `FromStr`
//! before invoking the engine; an unknown key is the only error this crate has.

pub mod breakdown;
pub mod chart;
pub mod dimension;
pub mod error;
pub mod group;
pub mod metric;

pub use breakdown::{BreakdownEntry, breakdown, unit_bucket};
pub use chart::{ChartConfig, ChartPoint, custom_aggregate};
pub use dimension::Dimension;
pub use error::AggregatorError;
pub use group::{Bucket, BucketOrder, Group, OrderKey, UNKNOWN, group_by};
pub use metric::Metric;
