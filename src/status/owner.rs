//! Owner reference resolution
//!
//! Turns the first owner reference of an object into a link path the
//! resource browser understands. Built-in kinds live under their plural
//! name, everything else under `/crds/<plural>.<group>`.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;

/// Plural names of built-in kinds that have their own browser route
const BUILTIN_RESOURCES: &[&str] = &[
    "pods",
    "deployments",
    "replicasets",
    "statefulsets",
    "daemonsets",
    "jobs",
    "cronjobs",
    "services",
    "configmaps",
    "secrets",
    "persistentvolumeclaims",
    "persistentvolumes",
    "nodes",
    "namespaces",
    "serviceaccounts",
];

/// The controlling parent of an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerInfo {
    pub kind: String,
    pub name: String,
    pub path: String,
    pub controller: bool,
}

/// Resolve the first owner reference of an object, if any
pub fn resolve_owner_info(metadata: &ObjectMeta) -> Option<OwnerInfo> {
    let owner = metadata.owner_references.as_ref()?.first()?;
    let namespace = metadata.namespace.as_deref().unwrap_or_default();
    let plural = format!("{}s", owner.kind.to_lowercase());

    let path = if BUILTIN_RESOURCES.contains(&plural.as_str()) {
        format!("/{}/{}/{}", plural, namespace, owner.name)
    } else {
        format!(
            "/crds/{}.{}/{}/{}",
            plural,
            api_group(&owner.api_version),
            namespace,
            owner.name
        )
    };

    Some(OwnerInfo {
        kind: owner.kind.clone(),
        name: owner.name.clone(),
        path,
        controller: owner.controller.unwrap_or(false),
    })
}

/// Group part of an apiVersion; core (`v1`) has none
fn api_group(api_version: &str) -> &str {
    match api_version.split_once('/') {
        Some((group, _)) => group,
        None => "",
    }
}
