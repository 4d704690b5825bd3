//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid resource id '{id}': expected <name>/<namespace>")]
    InvalidId { id: String },

    #[error("attribute '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("attribute '{path}': {message}")]
    InvalidValue { path: String, message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
