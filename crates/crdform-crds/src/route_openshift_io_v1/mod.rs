//! `route.openshift.io/v1`

mod route;

pub use route::{Route, RoutePort, RouteSpec, RouteTargetReference, TlsConfig, route_spec_attributes};
