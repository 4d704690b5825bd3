//! Resource identity
//!
//! A namespaced object is identified by `(namespace, name)`. Terraform sees
//! this as a single opaque id of the form `<name>/<namespace>`.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::validation::{validate_namespace, validate_resource_name};

/// Identity of a namespaced Kubernetes object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub name: String,
    pub namespace: String,
}

impl ResourceId {
    /// Create an id, both components must be non-empty
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let namespace = namespace.into();
        if name.is_empty() {
            return Err(CoreError::MissingField {
                field: "metadata.name".to_string(),
            });
        }
        if namespace.is_empty() {
            return Err(CoreError::MissingField {
                field: "metadata.namespace".to_string(),
            });
        }
        Ok(Self { name, namespace })
    }

    /// Check both components against the Kubernetes name formats
    pub fn validate(&self) -> Result<()> {
        validate_resource_name(&self.name).map_err(|message| CoreError::InvalidValue {
            path: "metadata.name".to_string(),
            message,
        })?;
        validate_namespace(&self.namespace).map_err(|message| CoreError::InvalidValue {
            path: "metadata.namespace".to_string(),
            message,
        })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.namespace)
    }
}

impl FromStr for ResourceId {
    type Err = CoreError;

    fn from_str(id: &str) -> Result<Self> {
        match id.split_once('/') {
            Some((name, namespace)) if !name.is_empty() && !namespace.is_empty() => {
                Self::new(name, namespace)
            }
            _ => Err(CoreError::InvalidId { id: id.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let id = ResourceId::new("grafana", "monitoring").unwrap();
        assert_eq!(id.to_string(), "grafana/monitoring");
    }

    #[test]
    fn test_parse() {
        let id: ResourceId = "grafana/monitoring".parse().unwrap();
        assert_eq!(id.name, "grafana");
        assert_eq!(id.namespace, "monitoring");
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = ResourceId::new("my-dashboard", "default").unwrap();
        let parsed: ResourceId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "grafana", "/monitoring", "grafana/", "/"] {
            assert!(
                matches!(bad.parse::<ResourceId>(), Err(CoreError::InvalidId { .. })),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_keeps_extra_separators_in_namespace() {
        // Only the first separator splits; validation rejects the result
        let id: ResourceId = "a/b/c".parse().unwrap();
        assert_eq!(id.namespace, "b/c");
        assert!(id.validate().is_err());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(ResourceId::new("", "default").is_err());
        assert!(ResourceId::new("grafana", "").is_err());
    }

    #[test]
    fn test_validate() {
        assert!(ResourceId::new("grafana", "monitoring").unwrap().validate().is_ok());
        assert!(ResourceId::new("Grafana", "monitoring").unwrap().validate().is_err());
    }
}
