//! `grafana.integreatly.org/v1beta1`

mod grafana;
mod grafana_dashboard;

pub use grafana::*;
pub use grafana_dashboard::{
    DashboardDatasource, GrafanaComDashboardReference, GrafanaDashboard, GrafanaDashboardSpec,
};
