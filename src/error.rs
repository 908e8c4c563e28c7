//! Error types for scoop.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoopError>;

#[derive(Error, Debug)]
pub enum ScoopError {
    #[error("no arms to select from: add at least one flavor first")]
    EmptyModel,

    #[error("arm index {index} out of range (model has {arms} arms)")]
    OutOfRange { index: usize, arms: usize },

    #[error("invalid outcome counts: {0}")]
    InvalidCounts(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("flavor already exists: {0}")]
    FlavorExists(String),

    #[error("flavor not found: {0}")]
    FlavorNotFound(String),

    #[error("authentication required: {0}")]
    AuthRequired(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScoopError {
    /// Stable machine-readable code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyModel => "empty_model",
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidCounts(_) => "invalid_counts",
            Self::InvalidInput(_) => "invalid_input",
            Self::FlavorExists(_) => "flavor_exists",
            Self::FlavorNotFound(_) => "flavor_not_found",
            Self::AuthRequired(_) => "auth_required",
            Self::Config(_) => "config",
            Self::Serialization(_) | Self::Json(_) => "serialization",
            Self::Io(_) => "io",
            Self::Database(_) => "database",
        }
    }
}
