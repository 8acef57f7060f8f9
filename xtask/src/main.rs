//! Build automation for nine-kube
//!
//! Usage: cargo xtask <command>
//!
//! Available commands:
//! - build: Build the nine-kube binary
//! - test: Run unit and/or integration tests
//! - smoke: Run the read-only commands against a live cluster
//! - dist: Package the release binary
//! - ci: Run format, clippy and test checks

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const BIN: &str = "nine-kube";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for nine-kube")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the nine-kube binary
    Build {
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Only the unit tests inside src/
        #[arg(long, conflicts_with = "integration")]
        unit: bool,
        /// Only the tests under tests/
        #[arg(long)]
        integration: bool,
    },
    /// Run list, tools and drives against the cluster in a kubeconfig
    Smoke {
        #[arg(long)]
        kubeconfig: Option<PathBuf>,
        #[arg(long)]
        context: Option<String>,
    },
    /// Package the release binary as a tarball under dist/
    Dist {
        /// Target triple (e.g., x86_64-unknown-linux-gnu)
        #[arg(long)]
        target: Option<String>,
    },
    /// Run CI checks (format, clippy, test)
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    sh.change_dir(project_root()?);

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { unit, integration } => test(&sh, unit, integration),
        Commands::Smoke {
            kubeconfig,
            context,
        } => smoke(&sh, kubeconfig, context),
        Commands::Dist { target } => dist(&sh, target),
        Commands::Ci => ci(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    if release {
        cmd!(sh, "cargo build --release --bin {BIN}").run()?;
        println!("Release build: target/release/{}", BIN);
    } else {
        cmd!(sh, "cargo build --bin {BIN}").run()?;
        println!("Debug build: target/debug/{}", BIN);
    }
    Ok(())
}

fn test(sh: &Shell, unit: bool, integration: bool) -> Result<()> {
    if unit {
        cmd!(sh, "cargo test --lib --bins").run()?;
    } else if integration {
        cmd!(sh, "cargo test --test '*'").run()?;
    } else {
        cmd!(sh, "cargo test --workspace").run()?;
    }
    Ok(())
}

fn smoke(sh: &Shell, kubeconfig: Option<PathBuf>, context: Option<String>) -> Result<()> {
    build(sh, false)?;
    let binary = project_root()?.join("target/debug").join(BIN);

    let mut global = Vec::new();
    if let Some(path) = kubeconfig {
        global.push("--kubeconfig".to_string());
        global.push(path.display().to_string());
    }
    if let Some(ctx) = context {
        global.push("--context".to_string());
        global.push(ctx);
    }

    let runs: [&[&str]; 3] = [&["list", "-A"], &["tools", "-A"], &["drives"]];
    for sub in runs {
        cmd!(sh, "{binary} {global...} {sub...}")
            .run()
            .with_context(|| format!("nine-kube {} failed", sub.join(" ")))?;
    }
    Ok(())
}

fn dist(sh: &Shell, target: Option<String>) -> Result<()> {
    let root = project_root()?;
    let binary_src = match &target {
        Some(triple) => {
            cmd!(sh, "cargo build --release --bin {BIN} --target {triple}").run()?;
            root.join(format!("target/{}/release/{}", triple, BIN))
        }
        None => {
            cmd!(sh, "cargo build --release --bin {BIN}").run()?;
            root.join(format!("target/release/{}", BIN))
        }
    };
    if !binary_src.exists() {
        bail!("Release binary not found at {}", binary_src.display());
    }

    let dist_dir = root.join("dist");
    sh.create_dir(&dist_dir)?;
    sh.copy_file(&binary_src, dist_dir.join(BIN))?;

    let version = env!("CARGO_PKG_VERSION");
    let archive_name = match &target {
        Some(triple) => format!("{}-{}-{}.tar.gz", BIN, version, triple),
        None => format!("{}-{}.tar.gz", BIN, version),
    };
    cmd!(sh, "tar -czf {archive_name} -C dist {BIN}")
        .run()
        .context("Failed to create tarball")?;

    println!("Distribution package: {}", archive_name);
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check").run()?;
    cmd!(
        sh,
        "cargo clippy --all-targets --all-features -- -D warnings"
    )
    .run()?;
    test(sh, false, false)?;
    println!("All CI checks passed");
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live inside the workspace")
}
