//! Attribute and type naming
//!
//! Terraform attribute names are snake_case transliterations of the upstream
//! CamelCase JSON field names. The mapping has to stay bit-exact, existing
//! configurations depend on it:
//!
//! ```text
//! imagePullPolicy           -> image_pull_policy
//! externalIPs               -> external_i_ps
//! destinationCACertificate  -> destination_ca_certificate
//! ```

use heck::ToSnakeCase;

/// Type name prefix registered by the provider
pub const PROVIDER_TYPE_NAME: &str = "k8s";

/// Suffix appended to the type name of manifest data sources
pub const MANIFEST_SUFFIX: &str = "_manifest";

/// Convert an upstream JSON field name into its Terraform attribute name
#[must_use]
pub fn attribute_name(json_name: &str) -> String {
    json_name.to_snake_case()
}

/// Build the Terraform type name of a CRD version
///
/// `("k8s", "grafana.integreatly.org", "GrafanaDashboard", "v1beta1")`
/// becomes `k8s_grafana_integreatly_org_grafana_dashboard_v1beta1`.
#[must_use]
pub fn type_name(provider: &str, group: &str, kind: &str, version: &str) -> String {
    let group = group.replace(['.', '-'], "_");
    let kind = kind.to_snake_case();
    if group.is_empty() {
        format!("{}_{}_{}", provider, kind, version)
    } else {
        format!("{}_{}_{}_{}", provider, group, kind, version)
    }
}

/// Type name of the manifest data source paired with `type_name`
#[must_use]
pub fn manifest_type_name(type_name: &str) -> String {
    format!("{}{}", type_name, MANIFEST_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_name_simple() {
        assert_eq!(attribute_name("imagePullPolicy"), "image_pull_policy");
        assert_eq!(attribute_name("apiVersion"), "api_version");
        assert_eq!(attribute_name("name"), "name");
        assert_eq!(attribute_name("json"), "json");
    }

    #[test]
    fn test_attribute_name_acronyms() {
        assert_eq!(attribute_name("externalIPs"), "external_i_ps");
        assert_eq!(attribute_name("hostIPC"), "host_ipc");
        assert_eq!(attribute_name("clusterIP"), "cluster_ip");
        assert_eq!(
            attribute_name("destinationCACertificate"),
            "destination_ca_certificate"
        );
        assert_eq!(attribute_name("homeDashboardUID"), "home_dashboard_uid");
    }

    #[test]
    fn test_attribute_name_is_idempotent() {
        for name in [
            "imagePullPolicy",
            "externalIPs",
            "hostIPC",
            "insecureEdgeTerminationPolicy",
            "persistentVolumeClaim",
            "allowCrossNamespaceImport",
        ] {
            let once = attribute_name(name);
            assert_eq!(attribute_name(&once), once, "not idempotent for {}", name);
        }
    }

    #[test]
    fn test_attribute_name_is_deterministic() {
        assert_eq!(
            attribute_name("serviceAccountName"),
            attribute_name("serviceAccountName")
        );
    }

    #[test]
    fn test_type_name() {
        assert_eq!(
            type_name("k8s", "grafana.integreatly.org", "Grafana", "v1beta1"),
            "k8s_grafana_integreatly_org_grafana_v1beta1"
        );
        assert_eq!(
            type_name("k8s", "grafana.integreatly.org", "GrafanaDashboard", "v1beta1"),
            "k8s_grafana_integreatly_org_grafana_dashboard_v1beta1"
        );
        assert_eq!(
            type_name("k8s", "route.openshift.io", "Route", "v1"),
            "k8s_route_openshift_io_route_v1"
        );
    }

    #[test]
    fn test_type_name_core_group() {
        assert_eq!(type_name("k8s", "", "ConfigMap", "v1"), "k8s_config_map_v1");
    }

    #[test]
    fn test_manifest_type_name() {
        assert_eq!(
            manifest_type_name("k8s_route_openshift_io_route_v1"),
            "k8s_route_openshift_io_route_v1_manifest"
        );
    }
}
