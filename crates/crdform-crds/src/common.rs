//! Kubernetes core types embedded in CRD specs
//!
//! Only the fields the embedding CRDs expose are declared; the descriptor
//! functions next to each struct list the same fields.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde::{Deserialize, Serialize};

use crdform_core::{Attribute, ElementType};

/// Labels and annotations applied to a generated object
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

pub fn embedded_metadata_attribute() -> Attribute {
    Attribute::single_nested(
        "metadata",
        vec![
            Attribute::string_map("labels"),
            Attribute::string_map("annotations"),
        ],
    )
    .describe("ObjectMeta contains only a subset of the fields included in k8s.io/apimachinery/pkg/apis/meta/v1.ObjectMeta.")
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeySelector {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

/// `SecretKeySelector` and `ConfigMapKeySelector` share this shape
pub fn key_selector_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("key")
            .required()
            .describe("The key to select."),
        Attribute::string("name").describe("Name of the referent."),
        Attribute::bool("optional").describe("Specify whether the referent or its key must be defined"),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub fn local_object_reference_attributes() -> Vec<Attribute> {
    vec![Attribute::string("name").describe("Name of the referent.")]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_key_ref: Option<KeySelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<KeySelector>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<EnvVarSource>,
}

fn env_var_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("name")
            .required()
            .describe("Name of the environment variable. Must be a C_IDENTIFIER."),
        Attribute::string("value"),
        Attribute::single_nested(
            "valueFrom",
            vec![
                Attribute::single_nested("configMapKeyRef", key_selector_attributes())
                    .describe("Selects a key of a ConfigMap."),
                Attribute::single_nested("secretKeyRef", key_selector_attributes())
                    .describe("Selects a key of a secret in the pod's namespace"),
            ],
        )
        .describe("Source for the environment variable's value. Cannot be used if value is not empty."),
    ]
}

/// `ConfigMapEnvSource` and `SecretEnvSource` share this shape
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvSourceReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvFromSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_ref: Option<EnvSourceReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<EnvSourceReference>,
}

fn env_from_source_attributes() -> Vec<Attribute> {
    let reference = || {
        vec![
            Attribute::string("name").describe("Name of the referent."),
            Attribute::bool("optional"),
        ]
    };
    vec![
        Attribute::single_nested("configMapRef", reference())
            .describe("The ConfigMap to select from"),
        Attribute::string("prefix")
            .describe("An optional identifier to prepend to each key in the ConfigMap. Must be a C_IDENTIFIER."),
        Attribute::single_nested("secretRef", reference()).describe("The Secret to select from"),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    pub container_port: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

fn container_port_attributes() -> Vec<Attribute> {
    vec![
        Attribute::int32("containerPort")
            .required()
            .describe("Number of port to expose on the pod's IP address."),
        Attribute::int32("hostPort"),
        Attribute::string("name"),
        Attribute::string("protocol").describe("Protocol for port. Must be UDP, TCP, or SCTP."),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<BTreeMap<String, String>>,
}

pub fn resource_requirements_attribute() -> Attribute {
    Attribute::single_nested(
        "resources",
        vec![
            Attribute::string_map("limits")
                .describe("Limits describes the maximum amount of compute resources allowed."),
            Attribute::string_map("requests")
                .describe("Requests describes the minimum amount of compute resources required."),
        ],
    )
    .describe("Compute Resources required by this container.")
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub mount_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_propagation: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,
}

fn volume_mount_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("mountPath")
            .required()
            .describe("Path within the container at which the volume should be mounted. Must not contain ':'."),
        Attribute::string("mountPropagation"),
        Attribute::string("name")
            .required()
            .describe("This must match the Name of a Volume."),
        Attribute::bool("readOnly"),
        Attribute::string("subPath"),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpGetAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_headers: Option<Vec<HttpHeader>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub port: IntOrString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TcpSocketAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub port: IntOrString,
}

/// Liveness, readiness and startup probes share this shape
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_get: Option<HttpGetAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_threshold: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_socket: Option<TcpSocketAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_grace_period_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
}

fn probe_attribute(json_name: &str, description: &str) -> Attribute {
    Attribute::single_nested(
        json_name,
        vec![
            Attribute::single_nested(
                "exec",
                vec![Attribute::string_list("command")
                    .describe("Command is the command line to execute inside the container.")],
            )
            .describe("Exec specifies the action to take."),
            Attribute::int32("failureThreshold")
                .describe("Minimum consecutive failures for the probe to be considered failed after having succeeded."),
            Attribute::single_nested(
                "httpGet",
                vec![
                    Attribute::string("host"),
                    Attribute::list_nested(
                        "httpHeaders",
                        vec![
                            Attribute::string("name").required(),
                            Attribute::string("value").required(),
                        ],
                    ),
                    Attribute::string("path").describe("Path to access on the HTTP server."),
                    Attribute::int_or_string("port")
                        .required()
                        .describe("Name or number of the port to access on the container."),
                    Attribute::string("scheme").describe("Scheme to use for connecting to the host. Defaults to HTTP."),
                ],
            )
            .describe("HTTPGet specifies the http request to perform."),
            Attribute::int32("initialDelaySeconds")
                .describe("Number of seconds after the container has started before liveness probes are initiated."),
            Attribute::int32("periodSeconds").describe("How often (in seconds) to perform the probe."),
            Attribute::int32("successThreshold"),
            Attribute::single_nested(
                "tcpSocket",
                vec![
                    Attribute::string("host"),
                    Attribute::int_or_string("port").required(),
                ],
            )
            .describe("TCPSocket specifies an action involving a TCP port."),
            Attribute::int64("terminationGracePeriodSeconds"),
            Attribute::int32("timeoutSeconds")
                .describe("Number of seconds after which the probe times out."),
        ],
    )
    .describe(description)
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_privilege_escalation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_root_filesystem: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_group: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_non_root: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_user: Option<i64>,
}

fn security_context_attributes() -> Vec<Attribute> {
    vec![
        Attribute::bool("allowPrivilegeEscalation"),
        Attribute::single_nested(
            "capabilities",
            vec![
                Attribute::string_list("add").describe("Added capabilities"),
                Attribute::string_list("drop").describe("Removed capabilities"),
            ],
        ),
        Attribute::bool("privileged"),
        Attribute::bool("readOnlyRootFilesystem"),
        Attribute::int64("runAsGroup"),
        Attribute::bool("runAsNonRoot"),
        Attribute::int64("runAsUser"),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_from: Option<Vec<EnvFromSource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<ContainerPort>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<Probe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<SecurityContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_probe: Option<Probe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_mounts: Option<Vec<VolumeMount>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
}

fn container_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("name")
            .required()
            .describe("Name of the container specified as a DNS_LABEL."),
        Attribute::string("image").describe("Container image name."),
        Attribute::string("imagePullPolicy")
            .describe("Image pull policy. One of Always, Never, IfNotPresent."),
        Attribute::string_list("args").describe("Arguments to the entrypoint."),
        Attribute::string_list("command").describe("Entrypoint array. Not executed within a shell."),
        Attribute::list_nested("env", env_var_attributes())
            .describe("List of environment variables to set in the container."),
        Attribute::list_nested("envFrom", env_from_source_attributes())
            .describe("List of sources to populate environment variables in the container."),
        probe_attribute("livenessProbe", "Periodic probe of container liveness."),
        Attribute::list_nested("ports", container_port_attributes())
            .describe("List of ports to expose from the container."),
        probe_attribute("readinessProbe", "Periodic probe of container service readiness."),
        resource_requirements_attribute(),
        Attribute::single_nested("securityContext", security_context_attributes())
            .describe("SecurityContext defines the security options the container should be run with."),
        probe_attribute(
            "startupProbe",
            "StartupProbe indicates that the Pod has successfully initialized.",
        ),
        Attribute::list_nested("volumeMounts", volume_mount_attributes())
            .describe("Pod volumes to mount into the container's filesystem."),
        Attribute::string("workingDir"),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurityContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_group: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_group: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_non_root: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_user: Option<i64>,
}

fn pod_security_context_attributes() -> Vec<Attribute> {
    vec![
        Attribute::int64("fsGroup"),
        Attribute::int64("runAsGroup"),
        Attribute::bool("runAsNonRoot"),
        Attribute::int64("runAsUser"),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyToPath {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<i32>,
    pub path: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapVolumeSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<KeyToPath>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolumeSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<KeyToPath>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmptyDirVolumeSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimVolumeSource {
    pub claim_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

/// A named volume; exactly one source is expected to be set
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<ConfigMapVolumeSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_dir: Option<EmptyDirVolumeSource>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim: Option<PersistentVolumeClaimVolumeSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<SecretVolumeSource>,
}

fn volume_attributes() -> Vec<Attribute> {
    let items = || {
        Attribute::list_nested(
            "items",
            vec![
                Attribute::string("key").required().describe("key is the key to project."),
                Attribute::int32("mode"),
                Attribute::string("path")
                    .required()
                    .describe("path is the relative path of the file to map the key to."),
            ],
        )
    };
    vec![
        Attribute::single_nested(
            "configMap",
            vec![
                Attribute::int32("defaultMode"),
                items(),
                Attribute::string("name").describe("Name of the referent."),
                Attribute::bool("optional"),
            ],
        )
        .describe("configMap represents a configMap that should populate this volume"),
        Attribute::single_nested(
            "emptyDir",
            vec![Attribute::string("medium"), Attribute::string("sizeLimit")],
        )
        .describe("emptyDir represents a temporary directory that shares a pod's lifetime."),
        Attribute::string("name")
            .required()
            .describe("name of the volume. Must be a DNS_LABEL and unique within the pod."),
        Attribute::single_nested(
            "persistentVolumeClaim",
            vec![
                Attribute::string("claimName")
                    .required()
                    .describe("claimName is the name of a PersistentVolumeClaim in the same namespace as the pod using this volume."),
                Attribute::bool("readOnly"),
            ],
        ),
        Attribute::single_nested(
            "secret",
            vec![
                Attribute::int32("defaultMode"),
                items(),
                Attribute::bool("optional"),
                Attribute::string("secretName")
                    .describe("secretName is the name of the secret in the pod's namespace to use."),
            ],
        )
        .describe("secret represents a secret that should populate this volume."),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Toleration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toleration_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

fn toleration_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("effect")
            .describe("Effect indicates the taint effect to match. Empty means match all taint effects."),
        Attribute::string("key").describe("Key is the taint key that the toleration applies to."),
        Attribute::string("operator")
            .describe("Operator represents a key's relationship to the value. Exists or Equal."),
        Attribute::int64("tolerationSeconds"),
        Attribute::string("value"),
    ]
}

/// Label and node selector requirements share this shape
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectorRequirement {
    pub key: String,
    pub operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

fn selector_requirement_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("key").required(),
        Attribute::string("operator")
            .required()
            .describe("Represents a key's relationship to a set of values."),
        Attribute::string_list("values"),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeSelectorTerm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_expressions: Option<Vec<SelectorRequirement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_fields: Option<Vec<SelectorRequirement>>,
}

fn node_selector_term_attributes() -> Vec<Attribute> {
    vec![
        Attribute::list_nested("matchExpressions", selector_requirement_attributes())
            .describe("A list of node selector requirements by node's labels."),
        Attribute::list_nested("matchFields", selector_requirement_attributes())
            .describe("A list of node selector requirements by node's fields."),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeSelector {
    pub node_selector_terms: Vec<NodeSelectorTerm>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferredSchedulingTerm {
    pub preference: NodeSelectorTerm,
    pub weight: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeAffinity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_during_scheduling_ignored_during_execution: Option<Vec<PreferredSchedulingTerm>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_during_scheduling_ignored_during_execution: Option<NodeSelector>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodAffinityTerm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<LabelSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Vec<String>>,
    pub topology_key: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightedPodAffinityTerm {
    pub pod_affinity_term: PodAffinityTerm,
    pub weight: i32,
}

/// `PodAffinity` and `PodAntiAffinity` share this shape
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodAffinity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_during_scheduling_ignored_during_execution: Option<Vec<WeightedPodAffinityTerm>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_during_scheduling_ignored_during_execution: Option<Vec<PodAffinityTerm>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Affinity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_affinity: Option<NodeAffinity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_affinity: Option<PodAffinity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_anti_affinity: Option<PodAffinity>,
}

fn affinity_attribute() -> Attribute {
    let weight = || {
        Attribute::int32("weight")
            .required()
            .describe("Weight associated with matching the corresponding term, in the range 1-100.")
    };
    let pod_affinity_term = || {
        vec![
            Attribute::single_nested("labelSelector", label_selector_attributes())
                .describe("A label query over a set of resources, in this case pods."),
            Attribute::string_list("namespaces"),
            Attribute::string("topologyKey")
                .required()
                .describe("This pod should be co-located (affinity) or not co-located (anti-affinity) with the pods matching the labelSelector."),
        ]
    };
    let pod_affinity = |json_name: &str| {
        Attribute::single_nested(
            json_name,
            vec![
                Attribute::list_nested(
                    "preferredDuringSchedulingIgnoredDuringExecution",
                    vec![
                        Attribute::single_nested("podAffinityTerm", pod_affinity_term()).required(),
                        weight(),
                    ],
                ),
                Attribute::list_nested(
                    "requiredDuringSchedulingIgnoredDuringExecution",
                    pod_affinity_term(),
                ),
            ],
        )
    };

    Attribute::single_nested(
        "affinity",
        vec![
            Attribute::single_nested(
                "nodeAffinity",
                vec![
                    Attribute::list_nested(
                        "preferredDuringSchedulingIgnoredDuringExecution",
                        vec![
                            Attribute::single_nested("preference", node_selector_term_attributes())
                                .required(),
                            weight(),
                        ],
                    ),
                    Attribute::single_nested(
                        "requiredDuringSchedulingIgnoredDuringExecution",
                        vec![Attribute::list_nested(
                            "nodeSelectorTerms",
                            node_selector_term_attributes(),
                        )
                        .required()],
                    ),
                ],
            )
            .describe("Describes node affinity scheduling rules for the pod."),
            pod_affinity("podAffinity").describe("Describes pod affinity scheduling rules."),
            pod_affinity("podAntiAffinity").describe("Describes pod anti-affinity scheduling rules."),
        ],
    )
    .describe("If specified, the pod's scheduling constraints")
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<Affinity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<Container>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_containers: Option<Vec<Container>>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "hostIPC")]
    pub host_ipc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_network: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "hostPID")]
    pub host_pid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_secrets: Option<Vec<LocalObjectReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<PodSecurityContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_grace_period_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<Volume>>,
}

pub fn pod_spec_attributes() -> Vec<Attribute> {
    vec![
        affinity_attribute(),
        Attribute::list_nested("containers", container_attributes())
            .describe("List of containers belonging to the pod."),
        Attribute::list_nested("initContainers", container_attributes())
            .describe("List of initialization containers belonging to the pod."),
        Attribute::bool("hostIPC").describe("Use the host's ipc namespace. Optional: Default to false."),
        Attribute::bool("hostNetwork").describe("Host networking requested for this pod."),
        Attribute::bool("hostPID").describe("Use the host's pid namespace. Optional: Default to false."),
        Attribute::list_nested("imagePullSecrets", local_object_reference_attributes()),
        Attribute::string("nodeName")
            .describe("NodeName is a request to schedule this pod onto a specific node."),
        Attribute::string_map("nodeSelector"),
        Attribute::string("priorityClassName"),
        Attribute::single_nested("securityContext", pod_security_context_attributes())
            .describe("SecurityContext holds pod-level security attributes and common container settings."),
        Attribute::string("serviceAccountName"),
        Attribute::int64("terminationGracePeriodSeconds")
            .describe("Optional duration in seconds the pod needs to terminate gracefully."),
        Attribute::list_nested("tolerations", toleration_attributes())
            .describe("If specified, the pod's tolerations."),
        Attribute::list_nested("volumes", volume_attributes())
            .describe("List of volumes that can be mounted by containers belonging to the pod."),
    ]
}

/// Selector matching objects by label
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_expressions: Option<Vec<SelectorRequirement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,
}

pub fn label_selector_attributes() -> Vec<Attribute> {
    vec![
        Attribute::list_nested("matchExpressions", selector_requirement_attributes())
            .describe("matchExpressions is a list of label selector requirements. The requirements are ANDed."),
        Attribute::map("matchLabels", ElementType::String)
            .describe("matchLabels is a map of {key,value} pairs."),
    ]
}
