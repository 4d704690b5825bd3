//! Error types for crdform-kube

use thiserror::Error;

/// Result type for crdform-kube operations
pub type Result<T> = std::result::Result<T, KubeError>;

/// Errors that can occur during Kubernetes operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KubeError {
    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    /// Kubeconfig could not be loaded
    #[error("kubeconfig error: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    /// No usable cluster configuration was found
    #[error("unable to infer cluster configuration: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Watching for a condition failed
    #[error("wait error: {0}")]
    Wait(String),

    /// Timeout
    #[error("operation timed out after {0}")]
    Timeout(String),
}

impl From<serde_json::Error> for KubeError {
    fn from(e: serde_json::Error) -> Self {
        KubeError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for KubeError {
    fn from(e: serde_yaml::Error) -> Self {
        KubeError::Serialization(e.to_string())
    }
}

impl From<crdform_core::CoreError> for KubeError {
    fn from(e: crdform_core::CoreError) -> Self {
        KubeError::InvalidConfig(e.to_string())
    }
}

impl KubeError {
    /// Check if this is a Kubernetes 404 Not Found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, KubeError::Api(kube::Error::Api(resp)) if resp.code == 404)
    }

    /// Check if this is a conflict error (409)
    pub fn is_conflict(&self) -> bool {
        matches!(self, KubeError::Api(kube::Error::Api(resp)) if resp.code == 409)
    }

    /// Build an API error the way the API server reports it
    pub fn api_status(code: u16, reason: &str, message: impl Into<String>) -> Self {
        let status = serde_json::json!({
            "status": "Failure",
            "message": message.into(),
            "reason": reason,
            "code": code,
        });
        match serde_json::from_value::<kube::error::ErrorResponse>(status) {
            Ok(resp) => KubeError::Api(kube::Error::Api(resp)),
            Err(e) => KubeError::Serialization(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        let err = KubeError::api_status(404, "NotFound", "grafanas \"x\" not found");
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_is_conflict() {
        let err = KubeError::api_status(409, "Conflict", "field manager conflict");
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_other_errors_are_not_not_found() {
        assert!(!KubeError::Timeout("5s".into()).is_not_found());
        assert!(!KubeError::api_status(500, "InternalError", "boom").is_not_found());
    }
}
