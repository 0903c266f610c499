//! Service layer
//!
//! Sits between the CLI and the data: a `ResourceSource` supplies object
//! snapshots (cluster or manifest files) and `ResourceService` turns them
//! into rows with derived status columns.

pub mod resource_service;
pub mod rows;
pub mod source;

pub use resource_service::{ResourceService, SummaryRow};
pub use rows::{DeploymentRow, PodRow, ServiceRow};
pub use source::{KubeSource, ManifestSource, ResourceSource};
