//! Manifest loading
//!
//! Reads Kubernetes objects from YAML or JSON files so status columns can
//! be derived from saved snapshots (`kubectl get -o yaml` output, CI
//! artifacts) without a live cluster. Multi-document streams and `List`
//! wrappers are both supported.

use std::io::Read;
use std::path::{Path, PathBuf};

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Pod, Service};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ResourceKind;

/// Errors raised while loading manifests
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in document {document}: {source}")]
    Yaml {
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Document {document} has no kind")]
    MissingKind { document: usize },

    #[error("Failed to decode {kind} in document {document}: {source}")]
    Decode {
        kind: String,
        document: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// A single object read from a manifest
#[derive(Debug, Clone)]
pub enum Manifest {
    Pod(Box<Pod>),
    Deployment(Box<Deployment>),
    Service(Box<Service>),
    /// Kinds without status columns; kept so callers can report them
    Other { kind: String, name: Option<String> },
}

impl Manifest {
    pub fn kind(&self) -> &str {
        match self {
            Manifest::Pod(_) => ResourceKind::Pod.as_str(),
            Manifest::Deployment(_) => ResourceKind::Deployment.as_str(),
            Manifest::Service(_) => ResourceKind::Service.as_str(),
            Manifest::Other { kind, .. } => kind,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Manifest::Pod(p) => p.metadata.namespace.as_deref(),
            Manifest::Deployment(d) => d.metadata.namespace.as_deref(),
            Manifest::Service(s) => s.metadata.namespace.as_deref(),
            Manifest::Other { .. } => None,
        }
    }
}

/// Load manifests from a file, or from stdin when the path is `-`
pub fn load_manifests(path: &Path) -> Result<Vec<Manifest>, ManifestError> {
    let io_error = |source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_error)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_error)?
    };

    let manifests = parse_manifests(&contents)?;
    tracing::debug!(
        "Loaded {} object(s) from {}",
        manifests.len(),
        path.display()
    );
    Ok(manifests)
}

/// Parse a (possibly multi-document) YAML or JSON string
pub fn parse_manifests(contents: &str) -> Result<Vec<Manifest>, ManifestError> {
    let mut manifests = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(contents).enumerate() {
        let document_number = index + 1;
        let value = Value::deserialize(document).map_err(|source| ManifestError::Yaml {
            document: document_number,
            source,
        })?;
        if value.is_null() {
            continue;
        }
        collect_object(value, document_number, &mut manifests)?;
    }

    Ok(manifests)
}

fn collect_object(
    value: Value,
    document: usize,
    out: &mut Vec<Manifest>,
) -> Result<(), ManifestError> {
    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ManifestError::MissingKind { document })?;

    if let Some(list_kind) = kind.strip_suffix("List") {
        if let Some(items) = value.get("items").and_then(Value::as_array) {
            // Typed lists (PodList, ...) omit the kind on their items
            let item_kind = Some(list_kind).filter(|k| !k.is_empty());
            for item in items {
                let mut item = item.clone();
                if item.get("kind").is_none() {
                    if let (Some(k), Some(obj)) = (item_kind, item.as_object_mut()) {
                        obj.insert("kind".to_string(), Value::String(k.to_string()));
                    }
                }
                collect_object(item, document, out)?;
            }
            return Ok(());
        }
    }

    let manifest = match ResourceKind::from_kind(&kind) {
        Some(ResourceKind::Pod) => Manifest::Pod(Box::new(decode(value, &kind, document)?)),
        Some(ResourceKind::Deployment) => {
            Manifest::Deployment(Box::new(decode(value, &kind, document)?))
        }
        Some(ResourceKind::Service) => {
            Manifest::Service(Box::new(decode(value, &kind, document)?))
        }
        None => Manifest::Other {
            name: value
                .pointer("/metadata/name")
                .and_then(Value::as_str)
                .map(str::to_string),
            kind,
        },
    };
    out.push(manifest);
    Ok(())
}

fn decode<T: DeserializeOwned>(value: Value, kind: &str, document: usize) -> Result<T, ManifestError> {
    serde_json::from_value(value).map_err(|source| ManifestError::Decode {
        kind: kind.to_string(),
        document,
        source,
    })
}
