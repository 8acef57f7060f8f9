// CLI command definitions

use super::k8s::{DrivesCommand, ListCommand, ShowCommand, ThriftCommand, ToolsCommand};
use crate::domain::config::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "nine-kube",
    version,
    about = "Inspect NineClusters and their tools on Kubernetes",
    long_about = "A standalone CLI tool for checking the readiness of NineClusters, their projects and the tools installed next to them"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubernetes context to use
    /// If not specified, uses current context from kubeconfig
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Path to a nine-kube TOML config file with defaults
    #[arg(long, global = true)]
    pub conf: Option<PathBuf>,

    /// Output style: plain or table
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// Log requests and external commands to stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// List NineClusters and whether they are ready
    List(ListCommand),

    /// Show the projects of one NineCluster
    Show(ShowCommand),

    /// List the tools installed next to NineClusters
    Tools(ToolsCommand),

    /// Print the Kyuubi thrift endpoint of a NineCluster
    Thrift(ThriftCommand),

    /// List drives managed by DirectPV
    Drives(DrivesCommand),
}
