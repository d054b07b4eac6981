use rust_decimal::Decimal;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RmcError {
    #[error("no trial mix recipe found for TM number '{tm_number}'")]
    MissingRecipe { tm_number: String },

    #[error("no tare weight recorded for miller '{miller_number}'")]
    MissingTareWeight { miller_number: String },

    #[error("tare weight for miller '{miller_number}' must be greater than zero, got {value}")]
    InvalidTareWeight {
        miller_number: String,
        value: Decimal,
    },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("failed to load recipe book from {path}: {reason}")]
    RecipeLoad { path: PathBuf, reason: String },

    #[error("invalid recipe: {0}")]
    RecipeInvalid(String),

    #[error("invalid weightment entry id: {0}")]
    InvalidEntryId(String),

    #[error("weightment entry {0} not found")]
    EntryNotFound(Uuid),

    #[error("numeric overflow computing {0}")]
    Overflow(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
