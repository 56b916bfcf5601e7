use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregatorError {
    #[error("Unknown dimension key: '{0}'")]
    UnknownDimension(String),

    #[error("Unknown metric key: '{0}'")]
    UnknownMetric(String),
}
