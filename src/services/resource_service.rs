//! Resource service
//!
//! Turns snapshots from a `ResourceSource` into output rows and status
//! summaries. Row building never fails; only fetching does.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::rows::{DeploymentRow, PodRow, ServiceRow};
use super::source::ResourceSource;
use crate::kube::NamespaceScope;
use crate::models::ResourceKind;
use crate::output::TableRow;
use crate::status::{resolve_deployment_status, resolve_status};

/// Number of resources of one kind sharing a status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub kind: String,
    pub status: String,
    pub count: usize,
}

impl TableRow for SummaryRow {
    fn headers(_wide: bool) -> Vec<&'static str> {
        vec!["KIND", "STATUS", "COUNT"]
    }

    fn cells(&self, _wide: bool) -> Vec<String> {
        vec![self.kind.clone(), self.status.clone(), self.count.to_string()]
    }

    fn namespace(&self) -> &str {
        ""
    }
}

/// Service for building resource views
pub struct ResourceService<S> {
    source: S,
}

impl<S: ResourceSource> ResourceService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn pod_rows(&self, scope: &NamespaceScope, now: DateTime<Utc>) -> Result<Vec<PodRow>> {
        let pods = self
            .source
            .list_pods(scope)
            .await
            .context("Failed to fetch pods")?;
        Ok(pods.iter().map(|pod| PodRow::from_pod(pod, now)).collect())
    }

    pub async fn deployment_rows(
        &self,
        scope: &NamespaceScope,
        now: DateTime<Utc>,
    ) -> Result<Vec<DeploymentRow>> {
        let deployments = self
            .source
            .list_deployments(scope)
            .await
            .context("Failed to fetch deployments")?;
        Ok(deployments
            .iter()
            .map(|deployment| DeploymentRow::from_deployment(deployment, now))
            .collect())
    }

    pub async fn service_rows(
        &self,
        scope: &NamespaceScope,
        now: DateTime<Utc>,
    ) -> Result<Vec<ServiceRow>> {
        let services = self
            .source
            .list_services(scope)
            .await
            .context("Failed to fetch services")?;
        Ok(services
            .iter()
            .map(|service| ServiceRow::from_service(service, now))
            .collect())
    }

    /// Count resources per kind and status; services are grouped by type
    pub async fn summary(&self, scope: &NamespaceScope) -> Result<Vec<SummaryRow>> {
        let (pods, deployments, services) = futures::try_join!(
            self.source.list_pods(scope),
            self.source.list_deployments(scope),
            self.source.list_services(scope),
        )
        .context("Failed to fetch resources for summary")?;

        let mut rows = Vec::new();
        rows.extend(count_by(ResourceKind::Pod, pods.iter().map(resolve_status)));
        rows.extend(count_by(
            ResourceKind::Deployment,
            deployments
                .iter()
                .map(|d| resolve_deployment_status(d).to_string()),
        ));
        rows.extend(count_by(
            ResourceKind::Service,
            services.iter().map(|s| {
                s.spec
                    .as_ref()
                    .and_then(|spec| spec.type_.clone())
                    .unwrap_or_else(|| "<none>".to_string())
            }),
        ));
        Ok(rows)
    }
}

fn count_by(kind: ResourceKind, labels: impl Iterator<Item = String>) -> Vec<SummaryRow> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(status, count)| SummaryRow {
            kind: kind.as_str().to_string(),
            status,
            count,
        })
        .collect()
}
