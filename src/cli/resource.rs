//! Resource lifecycle commands

use super::display::TableRenderer;
use super::manifest::ResourceManifest;
use crate::domain::config::ProviderConf;
use crate::domain::resource::{KetchProvider, Operation, ResourceData};
use crate::infrastructure::kubernetes::crd::{KetchApp, KetchFramework, KetchJob};
use crate::shared::Diagnostics;
use clap::{Args, Parser, ValueEnum};
use kube::CustomResourceExt;

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Path to provider configuration file (TOML)
    /// If not provided, reads KETCH_PROVIDER_CONF, then falls back to defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    /// If not specified, uses current context from kubeconfig
    #[arg(long)]
    pub context: Option<String>,
}

impl ConnectionArgs {
    pub fn load_conf(&self) -> anyhow::Result<ProviderConf> {
        let conf = ProviderConf::load(self.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load provider configuration: {}", e))?;
        Ok(conf.with_overrides(self.kubeconfig.clone(), self.context.clone()))
    }

    async fn provider(&self) -> anyhow::Result<KetchProvider> {
        let conf = self.load_conf()?;
        KetchProvider::configure(&conf)
            .await
            .map_err(|diagnostics| report(&diagnostics, "configure provider"))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Yaml,
    Json,
    #[default]
    Table,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateCommand {
    /// Manifest file (YAML or JSON) with `resource` and the resource block
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateCommand {
    /// Manifest file (YAML or JSON) with `resource` and the resource block
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct ReadCommand {
    /// Resource type (ketch_app, ketch_job, ketch_framework)
    pub resource: String,

    /// Resource name
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// Resource type (ketch_app, ketch_job, ketch_framework)
    pub resource: String,

    /// Resource name
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportCommand {
    /// Resource type (ketch_app, ketch_job, ketch_framework)
    pub resource: String,

    /// Resource name
    pub name: String,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct CrdsCommand {}

impl CreateCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let manifest = ResourceManifest::from_file(&self.file)?;
        let provider = self.connection.provider().await?;

        let mut data = ResourceData::new(manifest.body);
        let diagnostics = provider
            .invoke(Operation::Create, &manifest.resource, &mut data)
            .await;
        check(&diagnostics, "create")?;

        print_resource(&provider, &manifest.resource, &data, self.output)
    }
}

impl UpdateCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let manifest = ResourceManifest::from_file(&self.file)?;
        let provider = self.connection.provider().await?;
        let schema_key = provider.resource(&manifest.resource)?.schema_key();
        let name = manifest
            .name(schema_key)
            .ok_or_else(|| anyhow::anyhow!("{}.name is required in {}", schema_key, self.file))?
            .to_string();

        // Refresh the current state first so unchanged manifests only read.
        let mut data = ResourceData::imported(name);
        let diagnostics = provider
            .invoke(Operation::Read, &manifest.resource, &mut data)
            .await;
        check(&diagnostics, "update")?;

        data.set_config(manifest.body);
        let diagnostics = provider
            .invoke(Operation::Update, &manifest.resource, &mut data)
            .await;
        check(&diagnostics, "update")?;

        print_resource(&provider, &manifest.resource, &data, self.output)
    }
}

impl ReadCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let provider = self.connection.provider().await?;

        let mut data = ResourceData::imported(&self.name);
        let diagnostics = provider
            .invoke(Operation::Read, &self.resource, &mut data)
            .await;
        check(&diagnostics, "read")?;

        print_resource(&provider, &self.resource, &data, self.output)
    }
}

impl DeleteCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let provider = self.connection.provider().await?;

        let mut data = ResourceData::imported(&self.name);
        let diagnostics = provider
            .invoke(Operation::Delete, &self.resource, &mut data)
            .await;
        check(&diagnostics, "delete")?;

        println!(
            "{}",
            TableRenderer::new()
                .render_success(&format!("{} {} deleted", self.resource, self.name))
        );
        Ok(())
    }
}

impl ImportCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let provider = self.connection.provider().await?;

        let mut data = ResourceData::imported(&self.name);
        let diagnostics = provider
            .invoke(Operation::Import, &self.resource, &mut data)
            .await;
        check(&diagnostics, "import")?;

        print_resource(&provider, &self.resource, &data, self.output)
    }
}

impl CrdsCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let crds = [KetchApp::crd(), KetchJob::crd(), KetchFramework::crd()];
        let documents = crds
            .iter()
            .map(serde_yaml::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        print!("{}", documents.join("---\n"));
        Ok(())
    }
}

/// Print any diagnostics; fail only when one of them is an error.
fn check(diagnostics: &Diagnostics, action: &str) -> anyhow::Result<()> {
    if diagnostics.has_error() {
        return Err(report(diagnostics, action));
    }
    if !diagnostics.is_empty() {
        eprint!("{}", TableRenderer::new().render_diagnostics(diagnostics));
    }
    Ok(())
}

fn report(diagnostics: &Diagnostics, action: &str) -> anyhow::Error {
    eprint!("{}", TableRenderer::new().render_diagnostics(diagnostics));
    anyhow::anyhow!("Failed to {}", action)
}

fn print_resource(
    provider: &KetchProvider,
    resource: &str,
    data: &ResourceData,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let schema_key = provider.resource(resource)?.schema_key();
    let state = data.state().cloned().unwrap_or_default();

    match output {
        OutputFormat::Yaml => {
            let manifest = ResourceManifest::new(resource, state);
            print!("{}", serde_yaml::to_string(&manifest)?);
        }
        OutputFormat::Json => {
            let manifest = ResourceManifest::new(resource, state);
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        OutputFormat::Table => {
            let output = TableRenderer::new().render_resource(
                resource,
                data.id(),
                state.get(schema_key),
                data.created(),
            );
            println!("{}", output);
        }
    }
    Ok(())
}
