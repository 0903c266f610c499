//! Rows built from cluster objects and their rendered output.

use chrono::{DateTime, TimeZone, Utc};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Pod, Service};
use kubestatus::config::OutputFormat;
use kubestatus::output::{TableOptions, render};
use kubestatus::services::{DeploymentRow, PodRow, ServiceRow};
use serde_json::json;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn web_pod() -> Pod {
    serde_json::from_value(json!({
        "metadata": {
            "name": "web-0",
            "namespace": "shop",
            "creationTimestamp": "2024-04-29T12:00:00Z",
            "ownerReferences": [{
                "apiVersion": "apps/v1",
                "kind": "ReplicaSet",
                "name": "web-5d9c7",
                "uid": "0f3a",
                "controller": true
            }]
        },
        "spec": {
            "nodeName": "node-a",
            "containers": [{"name": "web", "image": "nginx:1.27"}]
        },
        "status": {
            "phase": "Running",
            "podIP": "10.1.0.7",
            "containerStatuses": [{
                "name": "web",
                "image": "nginx:1.27",
                "imageID": "",
                "ready": true,
                "restartCount": 1,
                "state": {"running": {"startedAt": "2024-05-01T11:00:05Z"}},
                "lastState": {"terminated": {
                    "exitCode": 137,
                    "reason": "OOMKilled",
                    "finishedAt": "2024-05-01T11:00:00Z"
                }}
            }]
        }
    }))
    .unwrap()
}

fn pending_pod() -> Pod {
    serde_json::from_value(json!({
        "metadata": {"name": "worker", "namespace": "jobs"},
        "spec": {"containers": [{"name": "worker"}, {"name": "metrics"}]},
        "status": {
            "phase": "Pending",
            "containerStatuses": [{
                "name": "worker",
                "image": "worker:dev",
                "imageID": "",
                "ready": false,
                "restartCount": 0,
                "state": {"waiting": {"reason": "ErrImagePull", "message": "pull access denied"}}
            }]
        }
    }))
    .unwrap()
}

fn edge_service() -> Service {
    serde_json::from_value(json!({
        "metadata": {"name": "edge", "creationTimestamp": "2024-05-01T11:58:30Z"},
        "spec": {
            "type": "LoadBalancer",
            "clusterIP": "10.96.0.10",
            "ports": [
                {"port": 443, "nodePort": 30443, "protocol": "TCP"},
                {"port": 80}
            ]
        },
        "status": {"loadBalancer": {}}
    }))
    .unwrap()
}

fn api_deployment() -> Deployment {
    serde_json::from_value(json!({
        "metadata": {
            "name": "api",
            "namespace": "shop",
            "creationTimestamp": "2024-05-01T09:30:00Z"
        },
        "spec": {
            "replicas": 3,
            "selector": {"matchLabels": {"app": "api"}},
            "template": {"spec": {"containers": [{"name": "api"}]}}
        },
        "status": {
            "replicas": 3,
            "readyReplicas": 2,
            "availableReplicas": 2,
            "updatedReplicas": 3
        }
    }))
    .unwrap()
}

#[test]
fn test_pod_row_json() {
    let row = PodRow::from_pod(&web_pod(), now());
    insta::assert_snapshot!(serde_json::to_string_pretty(&row).unwrap(), @r#"
    {
      "namespace": "shop",
      "name": "web-0",
      "ready": "1/1",
      "status": "Running",
      "restarts": "1 (60m ago)",
      "age": "2d",
      "ip": "10.1.0.7",
      "node": "node-a",
      "controlledBy": "ReplicaSet/web-5d9c7",
      "message": ""
    }
    "#);
}

#[test]
fn test_pending_pod_row_defaults() {
    let row = PodRow::from_pod(&pending_pod(), now());
    assert_eq!(row.ready, "0/2");
    assert_eq!(row.status, "ErrImagePull");
    assert_eq!(row.restarts, "0");
    assert_eq!(row.age, "<unknown>");
    assert_eq!(row.ip, "<none>");
    assert_eq!(row.node, "<none>");
    assert_eq!(row.controlled_by, "<none>");
    assert_eq!(row.message, "pull access denied");
}

#[test]
fn test_service_row_json() {
    let row = ServiceRow::from_service(&edge_service(), now());
    insta::assert_snapshot!(serde_json::to_string_pretty(&row).unwrap(), @r#"
    {
      "namespace": "default",
      "name": "edge",
      "type": "LoadBalancer",
      "clusterIp": "10.96.0.10",
      "externalIp": "<pending>",
      "ports": "443:30443/TCP,80/TCP",
      "age": "90s"
    }
    "#);
}

#[test]
fn test_deployment_row_json() {
    let row = DeploymentRow::from_deployment(&api_deployment(), now());
    insta::assert_snapshot!(serde_json::to_string_pretty(&row).unwrap(), @r#"
    {
      "namespace": "shop",
      "name": "api",
      "ready": "2/3",
      "upToDate": 3,
      "available": 2,
      "status": "Progressing",
      "age": "150m"
    }
    "#);
}

#[test]
fn test_wide_table_with_namespaces() {
    let rows = vec![
        PodRow::from_pod(&web_pod(), now()),
        PodRow::from_pod(&pending_pod(), now()),
    ];
    let options = TableOptions {
        wide: true,
        show_namespace: true,
        ..Default::default()
    };
    let output = render(&rows, OutputFormat::Table, options).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    let header: Vec<&str> = lines[0].split_whitespace().collect();
    assert_eq!(
        header,
        vec![
            "NAMESPACE", "NAME", "READY", "STATUS", "RESTARTS", "AGE", "IP", "NODE", "CONTROLLED",
            "BY", "MESSAGE"
        ]
    );
    assert!(lines[1].starts_with("shop"));
    assert!(lines[1].contains("1 (60m ago)"));
    assert!(lines[1].contains("ReplicaSet/web-5d9c7"));
    assert!(lines[2].starts_with("jobs"));
    assert!(lines[2].ends_with("pull access denied"));

    let status_col = lines[0].find("STATUS").unwrap();
    assert_eq!(lines[1].find("Running"), Some(status_col));
    assert_eq!(lines[2].find("ErrImagePull"), Some(status_col));
}

#[test]
fn test_table_without_headers() {
    let rows = vec![ServiceRow::from_service(&edge_service(), now())];
    let options = TableOptions {
        no_headers: true,
        ..Default::default()
    };
    let output = render(&rows, OutputFormat::Table, options).unwrap();
    assert_eq!(output.lines().count(), 1);
    assert!(output.starts_with("edge"));
    assert!(!output.contains("CLUSTER-IP"));
}

#[test]
fn test_empty_result_message() {
    let rows: Vec<DeploymentRow> = Vec::new();
    let output = render(&rows, OutputFormat::Table, TableOptions::default()).unwrap();
    assert_eq!(output, "No resources found.");

    assert_eq!(render(&rows, OutputFormat::Json, TableOptions::default()).unwrap(), "[]");
}

#[test]
fn test_yaml_output() {
    let rows = vec![DeploymentRow::from_deployment(&api_deployment(), now())];
    let output = render(&rows, OutputFormat::Yaml, TableOptions::default()).unwrap();
    assert!(output.starts_with("- namespace: shop\n"));
    assert!(output.contains("upToDate: 3\n"));
    assert!(output.contains("status: Progressing\n"));
}
