//! Resource status resolution
//!
//! Pure functions deriving the human readable columns kubectl shows for
//! pods, deployments, services and owner references. They borrow a
//! snapshot of the object, never fail, and fall back to documented
//! defaults ("Unknown", "-", empty) when fields are missing.

pub mod age;
pub mod deployment;
pub mod owner;
pub mod pod;
pub mod service;

pub use deployment::{DeploymentStatus, ReplicaCounts, resolve_deployment_status};
pub use owner::{OwnerInfo, resolve_owner_info};
pub use pod::{RestartSummary, resolve_error_message, resolve_restarts, resolve_status};
pub use service::resolve_external_ip;
