//! `get` and `summary` command handlers

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Args;

use crate::config::{Config, OutputFormat};
use crate::kube::{self as k8s, NamespaceScope};
use crate::models::ResourceKind;
use crate::output::{self, TableOptions};
use crate::services::{KubeSource, ManifestSource, ResourceService, ResourceSource};

/// Where to read resources from and which namespaces to show
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Namespace to list (defaults to the context's namespace)
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// List across all namespaces
    #[arg(short = 'A', long, conflicts_with = "namespace")]
    pub all_namespaces: bool,

    /// Read objects from a YAML/JSON manifest instead of the cluster ("-" for stdin)
    #[arg(short = 'f', long)]
    pub filename: Option<PathBuf>,
}

/// Arguments of `get`
#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    /// Resource kind: pods (po), deployments (deploy) or services (svc)
    pub kind: ResourceKind,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Show additional columns
    #[arg(long)]
    pub wide: bool,

    /// Don't print the header row
    #[arg(long)]
    pub no_headers: bool,
}

/// Arguments of `summary`
#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputFormat>,
}

/// Decide which namespaces to list
///
/// Precedence: `-A`, `-n`, manifest files (everything in the file), the
/// `allNamespaces` setting, the kubeconfig context namespace, then
/// `defaultNamespace`.
pub fn resolve_scope(
    args: &SourceArgs,
    config: &Config,
    context_namespace: Option<String>,
) -> NamespaceScope {
    if args.all_namespaces {
        return NamespaceScope::All;
    }
    if let Some(namespace) = &args.namespace {
        return NamespaceScope::Namespace(namespace.clone());
    }
    if args.filename.is_some() || config.all_namespaces {
        return NamespaceScope::All;
    }
    NamespaceScope::Namespace(
        context_namespace.unwrap_or_else(|| config.default_namespace.clone()),
    )
}

/// Handle `get <kind>`
pub async fn handle_get(args: GetArgs, config: &Config, context: Option<&str>) -> Result<()> {
    let scope = scope_for(&args.source, config, context);
    let format = args.output.unwrap_or(config.output.format);
    let options = TableOptions {
        wide: args.wide || config.output.wide,
        no_headers: args.no_headers || config.output.no_headers,
        show_namespace: scope == NamespaceScope::All,
    };
    tracing::debug!("get {} in {} as {}", args.kind, scope, format);

    let rendered = match &args.source.filename {
        Some(path) => {
            let service = ResourceService::new(ManifestSource::from_path(path)?);
            render_kind(&service, args.kind, &scope, format, options).await?
        }
        None => {
            let client = k8s::create_client(context).await?;
            let service = ResourceService::new(KubeSource::new(client));
            render_kind(&service, args.kind, &scope, format, options).await?
        }
    };

    println!("{}", rendered);
    Ok(())
}

/// Handle `summary`
pub async fn handle_summary(args: SummaryArgs, config: &Config, context: Option<&str>) -> Result<()> {
    let scope = scope_for(&args.source, config, context);
    let format = args.output.unwrap_or(config.output.format);
    let options = TableOptions::default();

    let rows = match &args.source.filename {
        Some(path) => {
            ResourceService::new(ManifestSource::from_path(path)?)
                .summary(&scope)
                .await?
        }
        None => {
            let client = k8s::create_client(context).await?;
            ResourceService::new(KubeSource::new(client))
                .summary(&scope)
                .await?
        }
    };

    println!("{}", output::render(&rows, format, options)?);
    Ok(())
}

fn scope_for(args: &SourceArgs, config: &Config, context: Option<&str>) -> NamespaceScope {
    // Manifests are read offline, so the kubeconfig is only consulted for live listings
    let context_namespace = if args.filename.is_none() {
        context.and_then(k8s::context_namespace)
    } else {
        None
    };
    resolve_scope(args, config, context_namespace)
}

async fn render_kind<S: ResourceSource>(
    service: &ResourceService<S>,
    kind: ResourceKind,
    scope: &NamespaceScope,
    format: OutputFormat,
    options: TableOptions,
) -> Result<String> {
    let now = Utc::now();
    match kind {
        ResourceKind::Pod => output::render(&service.pod_rows(scope, now).await?, format, options),
        ResourceKind::Deployment => {
            output::render(&service.deployment_rows(scope, now).await?, format, options)
        }
        ResourceKind::Service => {
            output::render(&service.service_rows(scope, now).await?, format, options)
        }
    }
}
