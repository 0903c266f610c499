//! kubestatus library
//!
//! Derives the status columns kubectl shows for pods, deployments and
//! services from object snapshots, either fetched from a cluster or loaded
//! from manifest files. The binary is a thin wrapper around [`cli`].

pub mod cli;
pub mod config;
pub mod kube;
pub mod models;
pub mod output;
pub mod services;
pub mod status;

// Re-export the resolvers for convenience
pub use status::{
    DeploymentStatus, OwnerInfo, RestartSummary, resolve_deployment_status, resolve_error_message,
    resolve_external_ip, resolve_owner_info, resolve_restarts, resolve_status,
};
