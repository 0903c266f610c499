//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and provides a
//! configured client for listing resources.
//!
//! HTTP/HTTPS proxies are honoured through kube-rs (`HTTP_PROXY`,
//! `HTTPS_PROXY`, `NO_PROXY`).

pub mod fetch;

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

pub use fetch::{NamespaceScope, list_deployments, list_pods, list_services};

/// Initialize and return a Kubernetes client
///
/// Without an explicit context the default loading strategy is used:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
///
/// With a context the kubeconfig is read and that context selected.
pub async fn create_client(context: Option<&str>) -> Result<Client> {
    let config = match context {
        Some(context) => {
            let options = KubeConfigOptions {
                context: Some(context.to_string()),
                ..Default::default()
            };
            Config::from_kubeconfig(&options)
                .await
                .with_context(|| format!("Failed to load kubeconfig context '{}'", context))?
        }
        None => Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration")?,
    };

    tracing::debug!("Connecting to {}", config.cluster_url);
    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(client)
}

/// Name of the current kubeconfig context, if a kubeconfig is available
pub fn current_context() -> Option<String> {
    match Kubeconfig::read() {
        Ok(kubeconfig) => kubeconfig.current_context,
        Err(e) => {
            tracing::debug!("No kubeconfig available: {}", e);
            None
        }
    }
}

/// Namespace recorded on a kubeconfig context, if any
pub fn context_namespace(context: &str) -> Option<String> {
    let kubeconfig = Kubeconfig::read().ok()?;
    kubeconfig
        .contexts
        .iter()
        .find(|named| named.name == context)
        .and_then(|named| named.context.as_ref())
        .and_then(|ctx| ctx.namespace.clone())
}
