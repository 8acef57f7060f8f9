//! NineCluster inspection commands

use super::commands::GlobalArgs;
use super::display::TableRenderer;
use crate::domain::cluster::NineClusterInspector;
use crate::domain::config::{NineConf, OutputFormat};
use crate::infrastructure::kubernetes::{kube_host, KubeConfigSource, NineCluster};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct ListCommand {
    /// NineCluster name; lists every cluster when omitted
    #[arg(long, short = 'c')]
    pub cluster: Option<String>,

    /// Kubernetes namespace
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// List across all namespaces
    #[arg(long, short = 'A', conflicts_with = "namespace")]
    pub all_namespaces: bool,
}

#[derive(Parser, Debug)]
pub struct ShowCommand {
    /// NineCluster name
    #[arg(long, short = 'c')]
    pub cluster: String,

    /// Kubernetes namespace
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ToolsCommand {
    /// NineCluster name; covers every cluster when omitted
    #[arg(long, short = 'c')]
    pub cluster: Option<String>,

    /// Kubernetes namespace
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Look across all namespaces
    #[arg(long, short = 'A', conflicts_with = "namespace")]
    pub all_namespaces: bool,
}

#[derive(Parser, Debug)]
pub struct ThriftCommand {
    /// NineCluster name
    #[arg(long, short = 'c')]
    pub cluster: String,

    /// Kubernetes namespace
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DrivesCommand {}

/// Settings resolved for one command invocation.
pub struct CommandContext {
    pub conf: NineConf,
    pub source: KubeConfigSource,
    pub output: OutputFormat,
}

impl CommandContext {
    pub fn resolve(global: &GlobalArgs) -> anyhow::Result<Self> {
        let conf = NineConf::load(global.conf.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        let source = conf.kube_config_source(global.kubeconfig.as_deref(), global.context.as_deref());
        let output = conf.output_or(global.output);
        Ok(Self {
            conf,
            source,
            output,
        })
    }

    /// Namespace to query; `None` means all namespaces.
    pub fn namespace<'a>(&'a self, namespace: Option<&'a str>, all: bool) -> Option<&'a str> {
        if all {
            None
        } else {
            Some(self.conf.namespace_or(namespace))
        }
    }

    pub async fn inspector(&self) -> anyhow::Result<NineClusterInspector> {
        tracing::debug!("Using API server {}", kube_host(&self.source).await);
        NineClusterInspector::new_with_config(&self.source, &self.conf.helm_bin)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create Kubernetes client: {}", e))
    }

    pub fn renderer(&self) -> TableRenderer {
        TableRenderer::new(self.output)
    }
}

fn no_cluster_message(namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) => format!("No NineCluster found in namespace {}", ns),
        None => "No NineCluster found in any namespace".to_string(),
    }
}

async fn find_clusters(
    inspector: &NineClusterInspector,
    cluster: Option<&str>,
    namespace: Option<&str>,
) -> anyhow::Result<Vec<NineCluster>> {
    inspector
        .find_clusters(cluster, namespace)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to get NineClusters: {}", e))
}

impl ListCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let ctx = CommandContext::resolve(global)?;
        let namespace = ctx.namespace(self.namespace.as_deref(), self.all_namespaces);
        let inspector = ctx.inspector().await?;

        let clusters = find_clusters(&inspector, self.cluster.as_deref(), namespace).await?;
        if clusters.is_empty() {
            println!("{}", no_cluster_message(namespace));
            return Ok(());
        }

        let rows = inspector.cluster_rows(&clusters).await;
        print!("{}", ctx.renderer().render_clusters_list(&rows));
        Ok(())
    }
}

impl ShowCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let ctx = CommandContext::resolve(global)?;
        let namespace = ctx.conf.namespace_or(self.namespace.as_deref());
        let inspector = ctx.inspector().await?;

        let clusters = find_clusters(&inspector, Some(&self.cluster), Some(namespace)).await?;
        let cluster = clusters.first().ok_or_else(|| {
            anyhow::anyhow!("NineCluster {} not found in namespace {}", self.cluster, namespace)
        })?;

        let renderer = ctx.renderer();
        let projects = inspector.project_rows(cluster).await;
        print!("{}", renderer.render_projects(&projects));

        let tools = inspector.tool_rows(std::slice::from_ref(cluster)).await;
        if !tools.is_empty() {
            println!();
            print!("{}", renderer.render_tools(&tools));
        }
        Ok(())
    }
}

impl ToolsCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let ctx = CommandContext::resolve(global)?;
        let namespace = ctx.namespace(self.namespace.as_deref(), self.all_namespaces);
        let inspector = ctx.inspector().await?;

        let clusters = find_clusters(&inspector, self.cluster.as_deref(), namespace).await?;
        if clusters.is_empty() {
            println!("{}", no_cluster_message(namespace));
            return Ok(());
        }

        let rows = inspector.tool_rows(&clusters).await;
        print!("{}", ctx.renderer().render_tools(&rows));
        Ok(())
    }
}

impl ThriftCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let ctx = CommandContext::resolve(global)?;
        let namespace = ctx.conf.namespace_or(self.namespace.as_deref());
        let inspector = ctx.inspector().await?;

        let clusters = find_clusters(&inspector, Some(&self.cluster), Some(namespace)).await?;
        if clusters.is_empty() {
            anyhow::bail!("NineCluster {} not found in namespace {}", self.cluster, namespace);
        }

        let endpoint = inspector.thrift_endpoint(&self.cluster, namespace).await;
        if endpoint.ip.is_empty() || endpoint.port == 0 {
            anyhow::bail!(
                "Thrift endpoint of NineCluster {} is not available yet",
                self.cluster
            );
        }
        println!("{}", endpoint);
        Ok(())
    }
}

impl DrivesCommand {
    pub async fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        let ctx = CommandContext::resolve(global)?;
        let inspector = ctx.inspector().await?;

        let rows = inspector
            .drive_rows()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to list DirectPV drives: {}", e))?;
        if rows.is_empty() {
            println!("No DirectPV drives found");
            return Ok(());
        }
        print!("{}", ctx.renderer().render_drives(&rows));
        Ok(())
    }
}
