use thiserror::Error;

/// Top-level error type for the Sahayak agent.
///
/// Covers the process-boundary concerns: loading configuration, reading the
/// scheme catalog, and serializing summaries. The dialogue core itself never
/// fails; its crate-level error converts from this one so that `?` works
/// across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for AgentError {
    fn from(err: toml::de::Error) -> Self {
        AgentError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AgentError {
    fn from(err: toml::ser::Error) -> Self {
        AgentError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Sahayak operations.
pub type Result<T> = std::result::Result<T, AgentError>;
