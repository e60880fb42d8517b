use crate::domain::{Category, StagingField};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Missing required fields: {}", join_fields(.missing))]
    Validation { missing: Vec<StagingField> },

    #[error("Operation '{operation}' requires an administrator")]
    Unauthorized { operation: String },

    #[error("An authenticated session is required")]
    Unauthenticated,

    #[error("An add or edit is already in progress")]
    EditInProgress,

    #[error("No item at position {position} in '{category}' ({len} items)")]
    InvalidPosition {
        category: Category,
        position: usize,
        len: usize,
    },

    #[error("No item with id {id} in '{category}'")]
    UnknownItem { category: Category, id: Uuid },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown staging field: {0}")]
    UnknownField(String),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MenuError {
    pub fn unauthorized(operation: &str) -> Self {
        MenuError::Unauthorized {
            operation: operation.to_string(),
        }
    }

    /// Short machine-readable tag, used for metrics labels and API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            MenuError::Validation { .. } => "validation",
            MenuError::Unauthorized { .. } => "unauthorized",
            MenuError::Unauthenticated => "unauthenticated",
            MenuError::EditInProgress => "edit_in_progress",
            MenuError::InvalidPosition { .. } => "invalid_position",
            MenuError::UnknownItem { .. } => "unknown_item",
            MenuError::UnknownCategory(_) => "unknown_category",
            MenuError::UnknownField(_) => "unknown_field",
            MenuError::Storage { .. } | MenuError::Sqlite(_) => "storage",
            MenuError::Json(_) | MenuError::Toml(_) | MenuError::Io(_) => "io",
            MenuError::Config(_) => "config",
        }
    }
}

fn join_fields(fields: &[StagingField]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, MenuError>;
