//! Resource kind definitions
//!
//! Centralised enum for the Kubernetes kinds kubestatus can list, so
//! command parsing, manifest loading and output share one vocabulary.

use std::fmt;
use std::str::FromStr;

/// Kubernetes kinds with derived status columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Pod,
    Deployment,
    Service,
}

impl ResourceKind {
    /// Kind name as it appears in manifests
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Pod => "Pod",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
        }
    }

    /// Lowercase plural used in API paths
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Pod => "pods",
            ResourceKind::Deployment => "deployments",
            ResourceKind::Service => "services",
        }
    }

    /// Short names accepted on the command line besides singular and plural
    pub fn short_names(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Pod => &["po"],
            ResourceKind::Deployment => &["deploy"],
            ResourceKind::Service => &["svc"],
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::Pod,
            ResourceKind::Deployment,
            ResourceKind::Service,
        ]
    }

    /// Match a manifest `kind` exactly
    pub fn from_kind(kind: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.as_str() == kind)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    /// Parse a command line name: singular, plural or short name, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| {
                lower == kind.as_str().to_lowercase()
                    || lower == kind.plural()
                    || kind.short_names().contains(&lower.as_str())
            })
            .ok_or_else(|| {
                format!(
                    "Unknown resource kind: {} (expected one of: {})",
                    s,
                    Self::all()
                        .iter()
                        .map(|k| k.plural())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}
