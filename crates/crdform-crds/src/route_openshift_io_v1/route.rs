use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crdform_core::{Attribute, Validator};
use crdform_kube::CustomResourceKind;

/// A route allows developers to expose services through an HTTP(S) aware
/// load balancing and proxy layer via a public DNS entry.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "route.openshift.io",
    version = "v1",
    kind = "Route",
    plural = "routes",
    namespaced,
    schema = "disabled",
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_backends: Option<Vec<RouteTargetReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<RoutePort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<RouteTargetReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard_policy: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteTargetReference {
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutePort {
    pub target_port: IntOrString,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "destinationCACertificate")]
    pub destination_ca_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_edge_termination_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub termination: String,
}

fn target_reference_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("kind")
            .required()
            .validate(Validator::OneOf(vec!["Service".to_string(), "".to_string()]))
            .describe("The kind of target that the route is referring to. Currently, only 'Service' is allowed"),
        Attribute::string("name")
            .required()
            .describe("name of the service/target that is being referred to. e.g. name of the service"),
        Attribute::int32("weight").describe(
            "weight as an integer between 0 and 256, default 100, that specifies the target's \
             relative weight against other target reference objects.",
        ),
    ]
}

/// Attributes of a `RouteSpec`, shared with resources embedding a route
pub fn route_spec_attributes() -> Vec<Attribute> {
    vec![
        Attribute::list_nested("alternateBackends", target_reference_attributes()).describe(
            "alternateBackends allows up to 3 additional backends to be assigned to the route.",
        ),
        Attribute::string("host").describe(
            "host is an alias/DNS that points to the service. Optional. If not specified a route \
             name will typically be automatically chosen.",
        ),
        Attribute::string("path")
            .describe("path that the router watches for, to route traffic for to the service. Optional"),
        Attribute::single_nested(
            "port",
            vec![Attribute::int_or_string("targetPort").required().describe(
                "The target port on pods selected by the service this route points to. If this \
                 is a string, it will be looked up as a named port in the target endpoints port list.",
            )],
        )
        .describe("If specified, the port to be used by the router."),
        Attribute::string("subdomain").describe(
            "subdomain is a DNS subdomain that is requested within the ingress controller's domain.",
        ),
        Attribute::single_nested(
            "tls",
            vec![
                Attribute::string("caCertificate")
                    .describe("caCertificate provides the cert authority certificate contents"),
                Attribute::string("certificate").describe(
                    "certificate provides certificate contents. This should be a single serving \
                     certificate, not a certificate chain.",
                ),
                Attribute::string("destinationCACertificate").describe(
                    "destinationCACertificate provides the contents of the ca certificate of the \
                     final destination.",
                ),
                Attribute::string("insecureEdgeTerminationPolicy")
                    .validate(Validator::OneOf(vec![
                        "Allow".to_string(),
                        "None".to_string(),
                        "Redirect".to_string(),
                        "".to_string(),
                    ]))
                    .describe("insecureEdgeTerminationPolicy indicates the desired behavior for insecure connections to a route."),
                Attribute::string("key")
                    .sensitive()
                    .describe("key provides key file contents"),
                Attribute::string("termination")
                    .required()
                    .validate(Validator::OneOf(vec![
                        "edge".to_string(),
                        "reencrypt".to_string(),
                        "passthrough".to_string(),
                    ]))
                    .describe("termination indicates termination type."),
            ],
        )
        .describe("The tls field provides the ability to configure certificates and termination for the route."),
        Attribute::single_nested("to", target_reference_attributes()).describe(
            "to is an object the route should use as the primary backend. Only the Service kind \
             is allowed, and it will be defaulted to Service.",
        ),
        Attribute::string("wildcardPolicy")
            .validate(Validator::OneOf(vec!["None".to_string(), "Subdomain".to_string()]))
            .describe("Wildcard policy if any for the route."),
    ]
}

impl CustomResourceKind for Route {
    fn description() -> &'static str {
        "A route allows developers to expose services through an HTTP(S) aware load balancing \
         and proxy layer via a public DNS entry."
    }

    fn spec_attributes() -> Vec<Attribute> {
        route_spec_attributes()
    }
}
