//! Resource model layer
//!
//! - `resource_kind.rs` - the kinds kubestatus knows how to summarise
//! - `manifest.rs` - typed objects loaded from YAML/JSON files

pub mod manifest;
pub mod resource_kind;

pub use manifest::{Manifest, ManifestError, load_manifests, parse_manifests};
pub use resource_kind::ResourceKind;
