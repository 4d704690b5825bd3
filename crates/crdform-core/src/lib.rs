//! crdform Core - core types for exposing Kubernetes CRDs as Terraform entities
//!
//! This crate provides the foundational, cluster-independent pieces:
//! - `Schema`: declarative attribute descriptors mirroring a CRD's OpenAPI tree
//! - `naming`: the snake_case transliteration of upstream JSON names
//! - `state`: transcoding between Terraform state and Kubernetes wire JSON
//! - `Diagnostics`: user-facing errors and warnings
//! - `ResourceId`: the `<name>/<namespace>` identity
//! - `validation`: Kubernetes name formats and config validation

pub mod diagnostics;
pub mod error;
pub mod identity;
pub mod metadata;
pub mod naming;
pub mod schema;
pub mod state;
pub mod validation;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{CoreError, Result};
pub use identity::ResourceId;
pub use metadata::SchemaVariant;
pub use naming::{PROVIDER_TYPE_NAME, attribute_name, manifest_type_name, type_name};
pub use schema::{AccessMode, Attribute, AttributeType, ElementType, Schema};
pub use validation::{Validator, validate_config};
