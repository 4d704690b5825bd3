use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crdform_core::{Attribute, ElementType, Validator};
use crdform_kube::CustomResourceKind;

use crate::common::{
    EmbeddedMetadata, KeySelector, LabelSelector, LocalObjectReference, PodSpec, ResourceRequirements,
    embedded_metadata_attribute, key_selector_attributes, label_selector_attributes,
    local_object_reference_attributes, pod_spec_attributes, resource_requirements_attribute,
};
use crate::route_openshift_io_v1::{RouteSpec, route_spec_attributes};

/// GrafanaSpec defines the desired state of Grafana
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "grafana.integreatly.org",
    version = "v1beta1",
    kind = "Grafana",
    plural = "grafanas",
    namespaced,
    schema = "disabled",
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<GrafanaClient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<BTreeMap<String, BTreeMap<String, String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<DeploymentConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<External>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim: Option<PersistentVolumeClaimConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<ServiceAccountConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaClient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_ingress: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
}

// Deployment

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EmbeddedMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<DeploymentSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ready_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<DeploymentStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplate>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStrategy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_update: Option<RollingUpdateDeployment>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub type_: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RollingUpdateDeployment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_surge: Option<IntOrString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EmbeddedMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<PodSpec>,
}

fn deployment_attribute() -> Attribute {
    Attribute::single_nested(
        "deployment",
        vec![
            embedded_metadata_attribute(),
            Attribute::single_nested(
                "spec",
                vec![
                    Attribute::int32("minReadySeconds"),
                    Attribute::int32("replicas"),
                    Attribute::int32("revisionHistoryLimit"),
                    Attribute::single_nested(
                        "strategy",
                        vec![
                            Attribute::single_nested(
                                "rollingUpdate",
                                vec![
                                    Attribute::int_or_string("maxSurge").describe(
                                        "The maximum number of pods that can be scheduled above the desired number of pods.",
                                    ),
                                    Attribute::int_or_string("maxUnavailable").describe(
                                        "The maximum number of pods that can be unavailable during the update.",
                                    ),
                                ],
                            )
                            .describe("Rolling update config params. Present only if DeploymentStrategyType = RollingUpdate."),
                            Attribute::string("type")
                                .validate(Validator::OneOf(vec![
                                    "Recreate".to_string(),
                                    "RollingUpdate".to_string(),
                                ]))
                                .describe("Type of deployment. Can be 'Recreate' or 'RollingUpdate'."),
                        ],
                    ),
                    Attribute::single_nested(
                        "template",
                        vec![
                            embedded_metadata_attribute(),
                            Attribute::single_nested("spec", pod_spec_attributes()),
                        ],
                    ),
                ],
            ),
        ],
    )
    .describe("Deployment sets how the deployment object should look like with your grafana instance, contains a number of defaults.")
}

// External instance

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct External {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<KeySelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_user: Option<KeySelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<KeySelector>,
    pub url: String,
}

fn external_attribute() -> Attribute {
    Attribute::single_nested(
        "external",
        vec![
            Attribute::single_nested("adminPassword", key_selector_attributes())
                .describe("AdminPassword key to talk to the external grafana instance."),
            Attribute::single_nested("adminUser", key_selector_attributes())
                .describe("AdminUser key to talk to the external grafana instance."),
            Attribute::single_nested("apiKey", key_selector_attributes())
                .describe("The API key to talk to the external grafana instance, you need to define ether apiKey or adminUser/adminPassword."),
            Attribute::string("url")
                .required()
                .describe("URL of the external grafana instance you want to manage."),
        ],
    )
    .describe("External enables you to configure external grafana instances that is not managed by the operator.")
}

// Ingress

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EmbeddedMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<IngressSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_backend: Option<IngressBackend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<IngressRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<Vec<IngressTls>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpIngressRuleValue>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressRuleValue {
    pub paths: Vec<HttpIngressPath>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressPath {
    pub backend: IngressBackend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub path_type: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressBackend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<TypedLocalObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<IngressServiceBackend>,
}

/// Reference to an object of any kind in the same namespace
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypedLocalObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_group: Option<String>,
    pub kind: String,
    pub name: String,
}

fn typed_local_object_reference_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("apiGroup").describe(
            "APIGroup is the group for the resource being referenced. If not specified, the \
             specified Kind must be in the core API group.",
        ),
        Attribute::string("kind")
            .required()
            .describe("Kind is the type of resource being referenced"),
        Attribute::string("name")
            .required()
            .describe("Name is the name of resource being referenced"),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressServiceBackend {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<ServiceBackendPort>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBackendPort {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressTls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}

fn ingress_backend_attributes() -> Vec<Attribute> {
    vec![
        Attribute::single_nested("resource", typed_local_object_reference_attributes())
            .describe("resource is an ObjectRef to another Kubernetes resource in the namespace of the Ingress object."),
        Attribute::single_nested(
            "service",
            vec![
                Attribute::string("name")
                    .required()
                    .describe("name is the referenced service. The service must exist in the same namespace as the Ingress object."),
                Attribute::single_nested(
                    "port",
                    vec![Attribute::string("name"), Attribute::int32("number")],
                )
                .describe("port of the referenced service."),
            ],
        ),
    ]
}

fn ingress_attribute() -> Attribute {
    let backend = Attribute::single_nested("backend", ingress_backend_attributes())
        .required()
        .describe("backend defines the referenced service endpoint to which the traffic will be forwarded to.");

    let rules = Attribute::list_nested(
        "rules",
        vec![
            Attribute::string("host").describe("host is the fully qualified domain name of a network host, as defined by RFC 3986."),
            Attribute::single_nested(
                "http",
                vec![Attribute::list_nested(
                    "paths",
                    vec![
                        backend,
                        Attribute::string("path"),
                        Attribute::string("pathType")
                            .required()
                            .validate(Validator::OneOf(vec![
                                "Exact".to_string(),
                                "Prefix".to_string(),
                                "ImplementationSpecific".to_string(),
                            ]))
                            .describe("pathType determines the interpretation of the path matching."),
                    ],
                )
                .required()],
            ),
        ],
    )
    .describe("rules is a list of host rules used to configure the Ingress.");

    Attribute::single_nested(
        "ingress",
        vec![
            embedded_metadata_attribute(),
            Attribute::single_nested(
                "spec",
                vec![
                    Attribute::single_nested("defaultBackend", ingress_backend_attributes()).describe(
                        "defaultBackend is the backend that should handle requests that don't match any rule.",
                    ),
                    Attribute::string("ingressClassName"),
                    rules,
                    Attribute::list_nested(
                        "tls",
                        vec![
                            Attribute::string_list("hosts"),
                            Attribute::string("secretName"),
                        ],
                    ),
                ],
            )
            .describe("IngressSpec describes the Ingress the user wishes to exist."),
        ],
    )
    .describe("Ingress sets how the ingress object should look like with your grafana instance.")
}

// PersistentVolumeClaim

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EmbeddedMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<PersistentVolumeClaimSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_modes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<TypedLocalObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_name: Option<String>,
}

fn persistent_volume_claim_attribute() -> Attribute {
    Attribute::single_nested(
        "persistentVolumeClaim",
        vec![
            embedded_metadata_attribute(),
            Attribute::single_nested(
                "spec",
                vec![
                    Attribute::string_list("accessModes")
                        .describe("accessModes contains the desired access modes the volume should have."),
                    Attribute::single_nested("dataSource", typed_local_object_reference_attributes())
                        .describe("dataSource field can be used to specify an existing VolumeSnapshot or PVC to populate the volume from."),
                    resource_requirements_attribute(),
                    Attribute::single_nested("selector", label_selector_attributes())
                        .describe("selector is a label query over volumes to consider for binding."),
                    Attribute::string("storageClassName"),
                    Attribute::string("volumeMode"),
                    Attribute::string("volumeName"),
                ],
            ),
        ],
    )
    .describe("PersistentVolumeClaim creates a PVC if you need to attach one to your grafana instance.")
}

// Route

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EmbeddedMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<RouteSpec>,
}

fn route_attribute() -> Attribute {
    Attribute::single_nested(
        "route",
        vec![
            embedded_metadata_attribute(),
            Attribute::single_nested("spec", route_spec_attributes()),
        ],
    )
    .describe("Route sets how the ingress object should look like with your grafana instance, this only works in Openshift.")
}

// Service

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EmbeddedMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<ServiceSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "clusterIP")]
    pub cluster_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "clusterIPs")]
    pub cluster_ips: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "externalIPs")]
    pub external_ips: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_traffic_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_traffic_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_families: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_family_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "loadBalancerIP")]
    pub load_balancer_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_source_ranges: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<ServicePort>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_affinity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub type_: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_port: Option<i32>,
    pub port: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<IntOrString>,
}

fn service_attribute() -> Attribute {
    Attribute::single_nested(
        "service",
        vec![
            embedded_metadata_attribute(),
            Attribute::single_nested(
                "spec",
                vec![
                    Attribute::string("clusterIP")
                        .describe("clusterIP is the IP address of the service and is usually assigned randomly."),
                    Attribute::string_list("clusterIPs").describe(
                        "ClusterIPs is a list of IP addresses assigned to this service, and are usually \
                         assigned randomly.",
                    ),
                    Attribute::string_list("externalIPs").describe(
                        "externalIPs is a list of IP addresses for which nodes in the cluster will \
                         also accept traffic for this service.",
                    ),
                    Attribute::string("externalName"),
                    Attribute::string("externalTrafficPolicy")
                        .validate(Validator::OneOf(vec!["Cluster".to_string(), "Local".to_string()]))
                        .describe("externalTrafficPolicy describes how nodes distribute service traffic they receive on one of the Service's externally-facing addresses."),
                    Attribute::string("internalTrafficPolicy")
                        .validate(Validator::OneOf(vec!["Cluster".to_string(), "Local".to_string()])),
                    Attribute::string_list("ipFamilies").describe(
                        "IPFamilies is a list of IP families (e.g. IPv4, IPv6) assigned to this service.",
                    ),
                    Attribute::string("ipFamilyPolicy").validate(Validator::OneOf(vec![
                        "SingleStack".to_string(),
                        "PreferDualStack".to_string(),
                        "RequireDualStack".to_string(),
                    ])),
                    Attribute::string("loadBalancerIP"),
                    Attribute::string_list("loadBalancerSourceRanges"),
                    Attribute::list_nested(
                        "ports",
                        vec![
                            Attribute::string("name"),
                            Attribute::int32("nodePort"),
                            Attribute::int32("port")
                                .required()
                                .describe("The port that will be exposed by this service."),
                            Attribute::string("protocol"),
                            Attribute::int_or_string("targetPort").describe(
                                "Number or name of the port to access on the pods targeted by the service.",
                            ),
                        ],
                    )
                    .describe("The list of ports that are exposed by this service."),
                    Attribute::map("selector", ElementType::String),
                    Attribute::string("sessionAffinity"),
                    Attribute::string("type").validate(Validator::OneOf(vec![
                        "ClusterIP".to_string(),
                        "ExternalName".to_string(),
                        "LoadBalancer".to_string(),
                        "NodePort".to_string(),
                    ])),
                ],
            )
            .describe("ServiceSpec describes the attributes that a user creates on a service."),
        ],
    )
    .describe("Service sets how the service object should look like with your grafana instance, contains a number of defaults.")
}

// ServiceAccount

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automount_service_account_token: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_secrets: Option<Vec<LocalObjectReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EmbeddedMetadata>,
}

fn service_account_attribute() -> Attribute {
    Attribute::single_nested(
        "serviceAccount",
        vec![
            Attribute::bool("automountServiceAccountToken"),
            Attribute::list_nested("imagePullSecrets", local_object_reference_attributes()),
            embedded_metadata_attribute(),
        ],
    )
    .describe("ServiceAccount sets how the ServiceAccount object should look like with your grafana instance, contains a number of defaults.")
}

impl CustomResourceKind for Grafana {
    fn description() -> &'static str {
        "Grafana is the Schema for the grafanas API"
    }

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::single_nested(
                "client",
                vec![
                    Attribute::bool("preferIngress")
                        .describe("If the operator should send it's request through the grafana instances ingress object instead of through the service."),
                    Attribute::int64("timeout"),
                ],
            )
            .describe("Client defines how the grafana-operator talks to the grafana instance."),
            Attribute::map("config", ElementType::Map(Box::new(ElementType::String)))
                .describe("Config defines how your grafana ini file should looks like."),
            deployment_attribute(),
            external_attribute(),
            ingress_attribute(),
            persistent_volume_claim_attribute(),
            route_attribute(),
            service_attribute(),
            service_account_attribute(),
            Attribute::string("version").describe(
                "Version specifies the version of Grafana to use for this deployment. It can \
                 either be a version number or an image with a tag.",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Container, ContainerPort};
    use crdform_core::state::{from_wire, to_wire};
    use serde_json::json;

    fn grafana_json() -> serde_json::Value {
        json!({
            "apiVersion": "grafana.integreatly.org/v1beta1",
            "kind": "Grafana",
            "metadata": {"name": "grafana", "namespace": "monitoring", "labels": {"dashboards": "grafana"}},
            "spec": {
                "config": {
                    "log": {"mode": "console"},
                    "auth": {"disable_login_form": "false"}
                },
                "deployment": {
                    "spec": {
                        "replicas": 2,
                        "strategy": {"type": "RollingUpdate", "rollingUpdate": {"maxSurge": "25%", "maxUnavailable": 1}},
                        "template": {
                            "spec": {
                                "hostIPC": false,
                                "containers": [{
                                    "name": "grafana",
                                    "image": "grafana/grafana:11.3.0",
                                    "ports": [{"containerPort": 3000, "name": "grafana-http"}],
                                    "resources": {"limits": {"cpu": "500m"}}
                                }],
                                "securityContext": {"runAsUser": 472, "fsGroup": 472}
                            }
                        }
                    }
                },
                "ingress": {
                    "spec": {
                        "defaultBackend": {"service": {"name": "grafana-service", "port": {"name": "grafana"}}},
                        "ingressClassName": "nginx",
                        "rules": [{
                            "host": "grafana.example.com",
                            "http": {"paths": [{
                                "path": "/",
                                "pathType": "Prefix",
                                "backend": {"service": {"name": "grafana-service", "port": {"number": 3000}}}
                            }]}
                        }],
                        "tls": [{"hosts": ["grafana.example.com"], "secretName": "grafana-tls"}]
                    }
                },
                "persistentVolumeClaim": {
                    "spec": {
                        "accessModes": ["ReadWriteOnce"],
                        "resources": {"requests": {"storage": "1Gi"}},
                        "selector": {"matchExpressions": [{"key": "tier", "operator": "In", "values": ["fast"]}]},
                        "dataSource": {"apiGroup": "snapshot.storage.k8s.io", "kind": "VolumeSnapshot", "name": "grafana-snap"}
                    }
                },
                "route": {
                    "spec": {"port": {"targetPort": 3000}, "tls": {"termination": "edge"}}
                },
                "service": {
                    "metadata": {"annotations": {"prometheus.io/scrape": "true"}},
                    "spec": {
                        "type": "LoadBalancer",
                        "clusterIPs": ["10.96.0.10", "fd00::10"],
                        "externalIPs": ["10.1.2.3"],
                        "externalTrafficPolicy": "Local",
                        "ipFamilies": ["IPv4", "IPv6"],
                        "ipFamilyPolicy": "PreferDualStack",
                        "ports": [{"name": "grafana", "port": 3000, "targetPort": "grafana-http"}]
                    }
                },
                "serviceAccount": {"automountServiceAccountToken": false},
                "version": "11.3.0"
            }
        })
    }

    #[test]
    fn test_json_round_trip() {
        let grafana: Grafana = serde_json::from_value(grafana_json()).unwrap();

        let service = grafana.spec.service.as_ref().unwrap().spec.as_ref().unwrap();
        assert_eq!(service.type_.as_deref(), Some("LoadBalancer"));
        assert_eq!(service.external_ips, Some(vec!["10.1.2.3".to_string()]));
        assert_eq!(
            service.ports.as_ref().unwrap()[0].target_port,
            Some(IntOrString::String("grafana-http".to_string()))
        );

        assert_eq!(service.external_traffic_policy.as_deref(), Some("Local"));

        let strategy = grafana.spec.deployment.as_ref().unwrap().spec.as_ref().unwrap().strategy.as_ref().unwrap();
        let rolling = strategy.rolling_update.as_ref().unwrap();
        assert_eq!(rolling.max_surge, Some(IntOrString::String("25%".to_string())));
        assert_eq!(rolling.max_unavailable, Some(IntOrString::Int(1)));

        let back: Grafana = serde_json::from_value(serde_json::to_value(&grafana).unwrap()).unwrap();
        assert_eq!(back, grafana);
    }

    #[test]
    fn test_unset_and_empty_are_distinct() {
        let mut spec = GrafanaSpec {
            service_account: Some(ServiceAccountConfig::default()),
            ..Default::default()
        };
        let wire = serde_json::to_value(&spec).unwrap();
        assert_eq!(wire, json!({"serviceAccount": {}}));

        spec.service_account = None;
        assert_eq!(serde_json::to_value(&spec).unwrap(), json!({}));
    }

    #[test]
    fn test_descriptor_covers_typed_fields() {
        let spec = grafana_json()["spec"].clone();
        let typed: GrafanaSpec = serde_json::from_value(spec.clone()).unwrap();
        let wire = serde_json::to_value(&typed).unwrap();

        let attrs = Grafana::spec_attributes();
        let state = from_wire(&attrs, &wire).unwrap();
        assert_eq!(
            state["deployment"]["spec"]["template"]["spec"]["host_ipc"],
            json!(false)
        );
        assert_eq!(state["service"]["spec"]["external_i_ps"], json!(["10.1.2.3"]));
        assert_eq!(state["route"]["spec"]["port"]["target_port"], 3000);
        assert_eq!(
            state["deployment"]["spec"]["strategy"]["rolling_update"],
            json!({"max_surge": "25%", "max_unavailable": 1})
        );
        assert_eq!(
            state["ingress"]["spec"]["default_backend"]["service"]["name"],
            "grafana-service"
        );
        assert_eq!(state["service"]["spec"]["ip_families"], json!(["IPv4", "IPv6"]));
        assert_eq!(
            state["persistent_volume_claim"]["spec"]["data_source"]["kind"],
            "VolumeSnapshot"
        );

        assert_eq!(to_wire(&attrs, &state).unwrap(), spec);
    }

    #[test]
    fn test_typed_construction_serializes_camel_case() {
        let spec = GrafanaSpec {
            deployment: Some(DeploymentConfig {
                spec: Some(DeploymentSpec {
                    template: Some(PodTemplate {
                        spec: Some(PodSpec {
                            host_ipc: Some(true),
                            containers: Some(vec![Container {
                                name: "grafana".to_string(),
                                ports: Some(vec![ContainerPort {
                                    container_port: 3000,
                                    ..Default::default()
                                }]),
                                ..Default::default()
                            }]),
                            ..Default::default()
                        }),
                        metadata: None,
                    }),
                    ..Default::default()
                }),
                metadata: None,
            }),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({"deployment": {"spec": {"template": {"spec": {
                "containers": [{"name": "grafana", "ports": [{"containerPort": 3000}]}],
                "hostIPC": true
            }}}}})
        );
    }
}
