//! CLI error types with exit code handling
//!
//! Provider diagnostics are printed as they are produced; the error returned
//! to `main` only carries what is needed for the final report and the exit
//! code.

use crdform_core::Diagnostics;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// Summaries the framework emits when a configuration does not match its schema
const VALIDATION_SUMMARIES: &[&str] = &[
    "Missing required argument",
    "Unsupported argument",
    "Incorrect attribute value type",
    "Invalid configuration for computed attribute",
    "Invalid attribute value",
    "Invalid resource identity",
    "Error parsing ID",
];

/// Summaries reported when no cluster can be reached
const UNAVAILABLE_SUMMARIES: &[&str] = &[
    "Provider in offline mode",
    "Unconfigured HTTP Client",
    "Unable to create Kubernetes client",
];

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// The configuration does not match the schema
    #[error("Validation failed with {errors} error(s)")]
    #[diagnostic(code(crdform::cli::validation))]
    Validation {
        errors: usize,
        #[help]
        help: Option<String>,
    },

    /// The object does not exist in the cluster
    #[error("{message}")]
    #[diagnostic(code(crdform::cli::not_found))]
    NotFound { message: String },

    /// No cluster is available
    #[error("{message}")]
    #[diagnostic(
        code(crdform::cli::unavailable),
        help("Check --kubeconfig and --context, or drop --offline")
    )]
    Unavailable { message: String },

    /// The provider configuration is invalid
    #[error("Invalid provider configuration: {message}")]
    #[diagnostic(code(crdform::cli::config))]
    Config { message: String },

    /// The provider reported errors during an operation
    #[error("{operation} failed with {errors} error(s)")]
    #[diagnostic(code(crdform::cli::provider))]
    Provider { operation: String, errors: usize },

    /// No data source or resource is registered under this name
    #[error("Unknown type: {type_name}")]
    #[diagnostic(code(crdform::cli::unknown_type))]
    UnknownType {
        type_name: String,
        #[help]
        help: Option<String>,
    },

    /// An input file could not be parsed
    #[error("Invalid input: {message}")]
    #[diagnostic(code(crdform::cli::input))]
    Input { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(crdform::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(crdform::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::Unavailable { .. } => exit_codes::UNAVAILABLE,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Provider { .. } => exit_codes::ERROR,
            CliError::UnknownType { .. } => exit_codes::USAGE_ERROR,
            CliError::Input { .. } => exit_codes::DATA_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an input error (user provided an unreadable file)
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Create an unknown type error, suggesting the `list` command
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            help: Some("Run 'crdform list' to see the available types".to_string()),
        }
    }

    /// Classify the error diagnostics of a failed operation
    ///
    /// The first error decides the kind; the diagnostics themselves are
    /// expected to have been printed already.
    pub fn from_diagnostics(operation: &str, diagnostics: &Diagnostics) -> Self {
        let errors = diagnostics.errors().count();
        let Some(first) = diagnostics.errors().next() else {
            return Self::Provider {
                operation: operation.to_string(),
                errors,
            };
        };

        let summary = first.summary.as_str();
        if summary == "Unable to find resource" {
            Self::NotFound {
                message: first.detail.clone(),
            }
        } else if UNAVAILABLE_SUMMARIES.contains(&summary) {
            Self::Unavailable {
                message: summary.to_string(),
            }
        } else if summary == "Invalid provider configuration" {
            Self::Config {
                message: first.detail.clone(),
            }
        } else if VALIDATION_SUMMARIES.contains(&summary) {
            Self::Validation { errors, help: None }
        } else {
            Self::Provider {
                operation: operation.to_string(),
                errors,
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Internal {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
