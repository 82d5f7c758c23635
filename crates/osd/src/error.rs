//! CLI error types.

use osd_config::ConfigError;
use osd_query::QueryError;
use osd_site::FlattenError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Flatten(#[from] FlattenError),

    #[error("{0}")]
    Query(#[from] QueryError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
