//! Table rows for listed resources
//!
//! Each row holds the already-formatted columns kubectl would print, so
//! every output format (table, JSON, YAML) shows the same values.

use chrono::{DateTime, Utc};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Pod, Service, ServicePort};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;

use crate::output::TableRow;
use crate::status::{
    ReplicaCounts, age::age_since, resolve_deployment_status, resolve_error_message,
    resolve_external_ip, resolve_owner_info, resolve_restarts, resolve_status,
};

const NONE: &str = "<none>";
const DEFAULT_NAMESPACE: &str = "default";

/// One line of `get pods`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodRow {
    pub namespace: String,
    pub name: String,
    pub ready: String,
    pub status: String,
    pub restarts: String,
    pub age: String,
    pub ip: String,
    pub node: String,
    pub controlled_by: String,
    pub message: String,
}

impl PodRow {
    pub fn from_pod(pod: &Pod, now: DateTime<Utc>) -> Self {
        let (ready, total) = ready_containers(pod);
        let status = pod.status.as_ref();

        Self {
            namespace: namespace_of(&pod.metadata),
            name: name_of(&pod.metadata),
            ready: format!("{}/{}", ready, total),
            status: resolve_status(pod),
            restarts: resolve_restarts(pod).display(now),
            age: age_since(pod.metadata.creation_timestamp.as_ref(), now),
            ip: status
                .and_then(|s| s.pod_ip.clone())
                .filter(|ip| !ip.is_empty())
                .unwrap_or_else(|| NONE.to_string()),
            node: pod
                .spec
                .as_ref()
                .and_then(|s| s.node_name.clone())
                .unwrap_or_else(|| NONE.to_string()),
            controlled_by: resolve_owner_info(&pod.metadata)
                .map(|owner| format!("{}/{}", owner.kind, owner.name))
                .unwrap_or_else(|| NONE.to_string()),
            message: resolve_error_message(pod).unwrap_or_default(),
        }
    }
}

impl TableRow for PodRow {
    fn headers(wide: bool) -> Vec<&'static str> {
        let mut headers = vec!["NAME", "READY", "STATUS", "RESTARTS", "AGE"];
        if wide {
            headers.extend(["IP", "NODE", "CONTROLLED BY", "MESSAGE"]);
        }
        headers
    }

    fn cells(&self, wide: bool) -> Vec<String> {
        let mut cells = vec![
            self.name.clone(),
            self.ready.clone(),
            self.status.clone(),
            self.restarts.clone(),
            self.age.clone(),
        ];
        if wide {
            cells.extend([
                self.ip.clone(),
                self.node.clone(),
                self.controlled_by.clone(),
                self.message.clone(),
            ]);
        }
        cells
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// One line of `get deployments`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRow {
    pub namespace: String,
    pub name: String,
    pub ready: String,
    pub up_to_date: i32,
    pub available: i32,
    pub status: String,
    pub age: String,
}

impl DeploymentRow {
    pub fn from_deployment(deployment: &Deployment, now: DateTime<Utc>) -> Self {
        let counts = ReplicaCounts::of(deployment);
        Self {
            namespace: namespace_of(&deployment.metadata),
            name: name_of(&deployment.metadata),
            ready: format!("{}/{}", counts.ready, counts.desired),
            up_to_date: counts.updated,
            available: counts.available,
            status: resolve_deployment_status(deployment).to_string(),
            age: age_since(deployment.metadata.creation_timestamp.as_ref(), now),
        }
    }
}

impl TableRow for DeploymentRow {
    fn headers(_wide: bool) -> Vec<&'static str> {
        vec!["NAME", "READY", "UP-TO-DATE", "AVAILABLE", "STATUS", "AGE"]
    }

    fn cells(&self, _wide: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.ready.clone(),
            self.up_to_date.to_string(),
            self.available.to_string(),
            self.status.clone(),
            self.age.clone(),
        ]
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// One line of `get services`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRow {
    pub namespace: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub cluster_ip: String,
    pub external_ip: String,
    pub ports: String,
    pub age: String,
}

impl ServiceRow {
    pub fn from_service(service: &Service, now: DateTime<Utc>) -> Self {
        let spec = service.spec.as_ref();
        Self {
            namespace: namespace_of(&service.metadata),
            name: name_of(&service.metadata),
            type_: spec
                .and_then(|s| s.type_.clone())
                .unwrap_or_else(|| NONE.to_string()),
            cluster_ip: spec
                .and_then(|s| s.cluster_ip.clone())
                .filter(|ip| !ip.is_empty())
                .unwrap_or_else(|| NONE.to_string()),
            external_ip: resolve_external_ip(service),
            ports: format_ports(spec.and_then(|s| s.ports.as_deref()).unwrap_or_default()),
            age: age_since(service.metadata.creation_timestamp.as_ref(), now),
        }
    }
}

impl TableRow for ServiceRow {
    fn headers(_wide: bool) -> Vec<&'static str> {
        vec!["NAME", "TYPE", "CLUSTER-IP", "EXTERNAL-IP", "PORT(S)", "AGE"]
    }

    fn cells(&self, _wide: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.type_.clone(),
            self.cluster_ip.clone(),
            self.external_ip.clone(),
            self.ports.clone(),
            self.age.clone(),
        ]
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// Ready and total container counts, sidecar init containers included
fn ready_containers(pod: &Pod) -> (usize, usize) {
    let spec = pod.spec.as_ref();
    let status = pod.status.as_ref();

    let sidecars: Vec<&str> = spec
        .and_then(|s| s.init_containers.as_deref())
        .unwrap_or_default()
        .iter()
        .filter(|c| c.restart_policy.as_deref() == Some("Always"))
        .map(|c| c.name.as_str())
        .collect();

    let main_statuses = status
        .and_then(|s| s.container_statuses.as_deref())
        .unwrap_or_default();
    let main_total = spec
        .map(|s| s.containers.len())
        .filter(|n| *n > 0)
        .unwrap_or(main_statuses.len());

    let ready_sidecars = status
        .and_then(|s| s.init_container_statuses.as_deref())
        .unwrap_or_default()
        .iter()
        .filter(|c| sidecars.contains(&c.name.as_str()) && c.ready && c.started == Some(true))
        .count();
    let ready_main = main_statuses.iter().filter(|c| c.ready).count();

    (ready_main + ready_sidecars, main_total + sidecars.len())
}

/// kubectl's PORT(S) column: `80/TCP,443:30443/TCP`
fn format_ports(ports: &[ServicePort]) -> String {
    if ports.is_empty() {
        return NONE.to_string();
    }
    ports
        .iter()
        .map(|p| {
            let protocol = p.protocol.as_deref().unwrap_or("TCP");
            match p.node_port {
                Some(node_port) if node_port > 0 => {
                    format!("{}:{}/{}", p.port, node_port, protocol)
                }
                _ => format!("{}/{}", p.port, protocol),
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn namespace_of(metadata: &ObjectMeta) -> String {
    metadata
        .namespace
        .clone()
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
}

fn name_of(metadata: &ObjectMeta) -> String {
    metadata.name.clone().unwrap_or_default()
}
