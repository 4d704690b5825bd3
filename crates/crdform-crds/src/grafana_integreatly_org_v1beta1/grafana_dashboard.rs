use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crdform_core::Attribute;
use crdform_kube::CustomResourceKind;

use crate::common::{LabelSelector, label_selector_attributes};

/// GrafanaDashboardSpec defines the desired state of GrafanaDashboard
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[kube(
    group = "grafana.integreatly.org",
    version = "v1beta1",
    kind = "GrafanaDashboard",
    plural = "grafanadashboards",
    namespaced,
    schema = "disabled",
    derive = "PartialEq",
    derive = "Default"
)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaDashboardSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_cross_namespace_import: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasources: Option<Vec<DashboardDatasource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grafana_com: Option<GrafanaComDashboardReference>,
    /// Required by the schema; optional here so objects read back without it still parse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_selector: Option<LabelSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resync_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDatasource {
    pub datasource_name: String,
    pub input_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaComDashboardReference {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
}

impl CustomResourceKind for GrafanaDashboard {
    fn description() -> &'static str {
        "GrafanaDashboard is the Schema for the grafanadashboards API"
    }

    fn spec_attributes() -> Vec<Attribute> {
        vec![
            Attribute::bool("allowCrossNamespaceImport").describe(
                "allow to import this resources from an operator in a different namespace",
            ),
            Attribute::list_nested(
                "datasources",
                vec![
                    Attribute::string("datasourceName").required(),
                    Attribute::string("inputName").required(),
                ],
            )
            .describe("maps required data sources to existing ones"),
            Attribute::string("folder").describe("folder assignment for dashboard"),
            Attribute::single_nested(
                "grafanaCom",
                vec![Attribute::int64("id").required(), Attribute::int64("revision")],
            )
            .describe("grafanaCom contains the reference to the dashboard on grafana.com"),
            Attribute::single_nested("instanceSelector", label_selector_attributes())
                .required()
                .describe("selects Grafanas for import"),
            Attribute::string("json").describe("dashboard json"),
            Attribute::string("resyncPeriod")
                .describe("how often the dashboard is refreshed, defaults to 5m if not set"),
            Attribute::string("url").describe("dashboard url"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crdform_core::state::{from_wire, to_wire};
    use serde_json::json;

    fn dashboard_spec() -> serde_json::Value {
        json!({
            "instanceSelector": {"matchLabels": {"dashboards": "grafana"}},
            "folder": "Kubernetes",
            "resyncPeriod": "30s",
            "url": "https://grafana.com/api/dashboards/1860/revisions/37/download",
            "datasources": [{"inputName": "DS_PROMETHEUS", "datasourceName": "Prometheus"}],
            "allowCrossNamespaceImport": true
        })
    }

    #[test]
    fn test_json_round_trip() {
        let spec: GrafanaDashboardSpec = serde_json::from_value(dashboard_spec()).unwrap();
        assert_eq!(
            spec.datasources.as_ref().unwrap()[0],
            DashboardDatasource {
                datasource_name: "Prometheus".to_string(),
                input_name: "DS_PROMETHEUS".to_string(),
            }
        );
        assert_eq!(serde_json::to_value(&spec).unwrap(), dashboard_spec());
    }

    #[test]
    fn test_instance_selector_is_required_by_descriptor() {
        let spec: GrafanaDashboardSpec = serde_json::from_value(json!({"folder": "x"})).unwrap();
        assert_eq!(spec.instance_selector, None);

        let diags = crdform_core::validate_config(
            &GrafanaDashboard::spec_attributes(),
            &json!({"folder": "x"}),
        );
        assert_eq!(diags.summaries(), vec!["Missing required argument"]);
    }

    #[test]
    fn test_descriptor_covers_typed_fields() {
        let attrs = GrafanaDashboard::spec_attributes();
        let state = from_wire(&attrs, &dashboard_spec()).unwrap();
        assert_eq!(state["instance_selector"]["match_labels"]["dashboards"], "grafana");
        assert_eq!(state["grafana_com"], serde_json::Value::Null);
        assert_eq!(to_wire(&attrs, &state).unwrap(), dashboard_spec());
    }
}
