use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankingError {
    #[error("Ranking weights are invalid: {0}")]
    InvalidWeights(String),

    #[error("Ranking penalty is invalid: {0}")]
    InvalidPenalty(String),
}
