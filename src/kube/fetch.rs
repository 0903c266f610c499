//! Resource fetching utilities
//!
//! Lists pods, deployments and services from the Kubernetes API, either
//! in one namespace or across the whole cluster.

use std::fmt;

use anyhow::{Context, Result};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Pod, Service};
use k8s_openapi::NamespaceResourceScope;
use kube::api::ListParams;
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;

/// Which namespaces a listing covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceScope {
    All,
    Namespace(String),
}

impl NamespaceScope {
    /// Whether an object in `namespace` falls inside this scope
    pub fn contains(&self, namespace: Option<&str>) -> bool {
        match self {
            NamespaceScope::All => true,
            NamespaceScope::Namespace(ns) => namespace.unwrap_or("default") == ns,
        }
    }
}

impl fmt::Display for NamespaceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceScope::All => write!(f, "all namespaces"),
            NamespaceScope::Namespace(ns) => write!(f, "namespace '{}'", ns),
        }
    }
}

fn scoped_api<K>(client: &Client, scope: &NamespaceScope) -> Api<K>
where
    K: Resource<Scope = NamespaceResourceScope>,
    <K as Resource>::DynamicType: Default,
{
    match scope {
        NamespaceScope::All => Api::all(client.clone()),
        NamespaceScope::Namespace(ns) => Api::namespaced(client.clone(), ns),
    }
}

async fn list<K>(client: &Client, scope: &NamespaceScope) -> Result<Vec<K>>
where
    K: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + fmt::Debug,
    <K as Resource>::DynamicType: Default,
{
    let api: Api<K> = scoped_api(client, scope);
    let kind = K::kind(&Default::default()).to_string();
    let list = api
        .list(&ListParams::default())
        .await
        .with_context(|| format!("Failed to list {} in {}", kind, scope))?;

    tracing::debug!("Discovered {} {}(s) in {}", list.items.len(), kind, scope);
    Ok(list.items)
}

/// List pods in the given scope
pub async fn list_pods(client: &Client, scope: &NamespaceScope) -> Result<Vec<Pod>> {
    list(client, scope).await
}

/// List deployments in the given scope
pub async fn list_deployments(client: &Client, scope: &NamespaceScope) -> Result<Vec<Deployment>> {
    list(client, scope).await
}

/// List services in the given scope
pub async fn list_services(client: &Client, scope: &NamespaceScope) -> Result<Vec<Service>> {
    list(client, scope).await
}
