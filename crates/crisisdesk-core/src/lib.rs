pub mod app_config;
pub mod config;
pub mod crises;
pub mod records;

pub use app_config::AnalysisConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use crises::{load_crises, CrisesFile, CrisisConfig};
pub use records::{DatasetKind, Record, Sentiment};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read crises file {path}: {source}")]
    CrisesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse crises file: {0}")]
    CrisesFileParse(#[from] serde_yaml::Error),

    #[error("crises validation failed: {0}")]
    Validation(String),
}
