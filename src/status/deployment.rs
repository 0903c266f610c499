//! Deployment rollout status

use std::fmt;

use k8s_openapi::api::apps::v1::Deployment;
use serde::Serialize;

/// Summarised state of a deployment rollout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DeploymentStatus {
    Unknown,
    Paused,
    #[serde(rename = "Scaled Down")]
    ScaledDown,
    Progressing,
    Terminating,
    Available,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Unknown => "Unknown",
            DeploymentStatus::Paused => "Paused",
            DeploymentStatus::ScaledDown => "Scaled Down",
            DeploymentStatus::Progressing => "Progressing",
            DeploymentStatus::Terminating => "Terminating",
            DeploymentStatus::Available => "Available",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replica counts of a deployment with absent fields read as zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplicaCounts {
    pub desired: i32,
    pub actual: i32,
    pub ready: i32,
    pub available: i32,
    pub updated: i32,
}

impl ReplicaCounts {
    pub fn of(deployment: &Deployment) -> Self {
        let spec = deployment.spec.as_ref();
        let status = deployment.status.as_ref();
        Self {
            desired: spec.and_then(|s| s.replicas).unwrap_or(0),
            actual: status.and_then(|s| s.replicas).unwrap_or(0),
            ready: status.and_then(|s| s.ready_replicas).unwrap_or(0),
            available: status.and_then(|s| s.available_replicas).unwrap_or(0),
            updated: status.and_then(|s| s.updated_replicas).unwrap_or(0),
        }
    }
}

/// Derive the rollout status of a deployment; first matching rule wins
pub fn resolve_deployment_status(deployment: &Deployment) -> DeploymentStatus {
    if deployment.metadata.deletion_timestamp.is_some() {
        return DeploymentStatus::Terminating;
    }
    if deployment
        .spec
        .as_ref()
        .and_then(|s| s.paused)
        .unwrap_or(false)
    {
        return DeploymentStatus::Paused;
    }

    let counts = ReplicaCounts::of(deployment);
    if counts.actual == 0 {
        return DeploymentStatus::ScaledDown;
    }
    if counts.desired != counts.actual {
        return DeploymentStatus::Progressing;
    }
    if counts.available != counts.actual || counts.ready != counts.actual {
        return DeploymentStatus::Progressing;
    }
    if counts.ready == counts.desired && counts.available == counts.desired {
        return DeploymentStatus::Available;
    }
    DeploymentStatus::Unknown
}
