//! crdform Kube - Kubernetes integration for crdform
//!
//! This crate provides:
//! - **Dynamic Client**: GET/apply/DELETE on untyped objects, with a mock for tests
//! - **Provider**: configuration block, client construction, offline mode
//! - **Framework**: the data source and managed resource traits
//! - **Adapters**: generic data source, resource and manifest adapters over typed CRDs

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod framework;
pub mod mock;
pub mod provider;

pub use adapter::{CrdDataSource, CrdManifest, CrdResource, CustomResourceKind};
pub use client::{ApplyOptions, DEFAULT_FIELD_MANAGER, DynamicClient, KubeDynamicClient};
pub use config::ProviderConfig;
pub use error::{KubeError, Result};
pub use framework::{
    CreateRequest, DataSource, DeleteRequest, ImportStateRequest, ManagedResource, ProviderData,
    ReadDataSourceRequest, ReadRequest, StateResponse, UpdateRequest,
};
pub use mock::{MockDynamicClient, OperationCounts};
pub use provider::{DataSourceFactory, Provider, ProviderMetadata, ResourceFactory};
