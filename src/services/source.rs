//! Where resources come from
//!
//! `ResourceSource` is the seam between row building and I/O: the CLI uses
//! the cluster-backed `KubeSource` or the file-backed `ManifestSource`,
//! tests use a mock.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Pod, Service};

use crate::kube::{self as k8s, NamespaceScope};
use crate::models::{Manifest, load_manifests};

/// A provider of resource snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceSource: Send + Sync {
    async fn list_pods(&self, scope: &NamespaceScope) -> Result<Vec<Pod>>;
    async fn list_deployments(&self, scope: &NamespaceScope) -> Result<Vec<Deployment>>;
    async fn list_services(&self, scope: &NamespaceScope) -> Result<Vec<Service>>;
}

/// Live resources from the API server
pub struct KubeSource {
    client: ::kube::Client,
}

impl KubeSource {
    pub fn new(client: ::kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSource for KubeSource {
    async fn list_pods(&self, scope: &NamespaceScope) -> Result<Vec<Pod>> {
        k8s::list_pods(&self.client, scope).await
    }

    async fn list_deployments(&self, scope: &NamespaceScope) -> Result<Vec<Deployment>> {
        k8s::list_deployments(&self.client, scope).await
    }

    async fn list_services(&self, scope: &NamespaceScope) -> Result<Vec<Service>> {
        k8s::list_services(&self.client, scope).await
    }
}

/// Resources read from manifest files
#[derive(Debug, Clone, Default)]
pub struct ManifestSource {
    manifests: Vec<Manifest>,
}

impl ManifestSource {
    pub fn new(manifests: Vec<Manifest>) -> Self {
        for skipped in manifests.iter().filter(|m| matches!(m, Manifest::Other { .. })) {
            tracing::debug!("Skipping unsupported kind {}", skipped.kind());
        }
        Self { manifests }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let manifests = load_manifests(path)
            .with_context(|| format!("Failed to load manifests from {}", path.display()))?;
        Ok(Self::new(manifests))
    }

    fn in_scope<'a>(&'a self, scope: &'a NamespaceScope) -> impl Iterator<Item = &'a Manifest> {
        self.manifests
            .iter()
            .filter(move |m| scope.contains(m.namespace()))
    }
}

#[async_trait]
impl ResourceSource for ManifestSource {
    async fn list_pods(&self, scope: &NamespaceScope) -> Result<Vec<Pod>> {
        Ok(self
            .in_scope(scope)
            .filter_map(|m| match m {
                Manifest::Pod(pod) => Some(pod.as_ref().clone()),
                _ => None,
            })
            .collect())
    }

    async fn list_deployments(&self, scope: &NamespaceScope) -> Result<Vec<Deployment>> {
        Ok(self
            .in_scope(scope)
            .filter_map(|m| match m {
                Manifest::Deployment(deployment) => Some(deployment.as_ref().clone()),
                _ => None,
            })
            .collect())
    }

    async fn list_services(&self, scope: &NamespaceScope) -> Result<Vec<Service>> {
        Ok(self
            .in_scope(scope)
            .filter_map(|m| match m {
                Manifest::Service(service) => Some(service.as_ref().clone()),
                _ => None,
            })
            .collect())
    }
}
