//! Development tasks for ketch-provider
//!
//! Usage: cargo xtask <command>
//!
//! - check: fmt, clippy and the offline test suite
//! - live: the ignored integration tests against a real cluster
//! - crds: regenerate deploy/crds.yaml from the CustomResource types

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for ketch-provider")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Formatting, lints and tests that need no cluster
    Check {
        /// Rewrite files instead of failing on formatting drift
        #[arg(long)]
        fix: bool,
    },
    /// Run the ignored live-cluster tests
    Live {
        /// Provider configuration (TOML), exported as KETCH_PROVIDER_CONF
        #[arg(long)]
        config: Option<String>,
    },
    /// Write the Ketch CRDs to deploy/crds.yaml
    Crds,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;
    sh.change_dir(project_root()?);

    match cli.command {
        Commands::Check { fix } => check(&sh, fix),
        Commands::Live { config } => live(&sh, config),
        Commands::Crds => crds(&sh),
    }
}

fn check(sh: &Shell, fix: bool) -> Result<()> {
    if fix {
        cmd!(sh, "cargo fmt --all").run()?;
    } else {
        cmd!(sh, "cargo fmt --all -- --check").run()?;
    }
    cmd!(sh, "cargo clippy --all-targets -- -D warnings").run()?;
    cmd!(sh, "cargo test --all").run()?;
    println!("✅ ketch-provider checks passed");
    Ok(())
}

fn live(sh: &Shell, config: Option<String>) -> Result<()> {
    let _env = config.map(|path| sh.push_env("KETCH_PROVIDER_CONF", path));
    cmd!(sh, "cargo test --test integration_test -- --ignored")
        .run()
        .context("Live tests failed; is a cluster with the Ketch CRDs reachable?")?;
    println!("✅ Live-cluster tests passed");
    Ok(())
}

fn crds(sh: &Shell) -> Result<()> {
    let manifests = cmd!(sh, "cargo run --quiet --bin ketch-provider -- crds")
        .read()
        .context("Failed to render CRDs")?;

    let deploy_dir = project_root()?.join("deploy");
    sh.create_dir(&deploy_dir)?;
    let output = deploy_dir.join("crds.yaml");
    sh.write_file(&output, format!("{}\n", manifests))?;
    println!("✅ CRDs written to: {}", output.display());
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live inside the workspace")
}
