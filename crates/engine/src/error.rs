use crate::source::SourceName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{name}: {source}")]
    Open {
        name: SourceName,
        #[source]
        source: std::io::Error,
    },

    #[error("{name}: read failed: {source}")]
    Read {
        name: SourceName,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    /// Source the error is about, if any.
    #[must_use]
    pub const fn source_name(&self) -> Option<&SourceName> {
        match self {
            Self::Open { name, .. } | Self::Read { name, .. } => Some(name),
            Self::Config(_) => None,
        }
    }
}

impl From<crate::config::ConfigBuilderError> for EngineError {
    fn from(e: crate::config::ConfigBuilderError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
