use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, LoggingConfig, PenaltyConfig, RankingConfig, RankingWeights};

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. A missing file is
/// not an error: every section falls back to its defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Loads configuration from `path`, layered under `WAGERLENS_`-prefixed environment
/// variables (e.g. `WAGERLENS_RANKING__WEIGHTS__ROI=0.5`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("WAGERLENS")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}

impl Config {
    /// Checks the ranking weights and penalty parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ranking
            .weights
            .validate()
            .and_then(|()| self.ranking.penalties.validate())
            .map_err(ConfigError::ValidationError)
    }
}
