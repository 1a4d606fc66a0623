// CLI command definitions

use super::resource::{
    CreateCommand, CrdsCommand, DeleteCommand, ImportCommand, ReadCommand, UpdateCommand,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ketch-provider",
    version,
    about = "Manage Ketch apps, jobs and frameworks on Kubernetes",
    long_about = "Runs the Ketch resource lifecycle (create, read, update, delete, import) \
                  against the theketch.io custom resources of a Kubernetes cluster"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create a resource from a manifest file
    Create(CreateCommand),

    /// Update a resource from a manifest file (full spec replacement)
    Update(UpdateCommand),

    /// Read a resource back from the cluster
    Read(ReadCommand),

    /// Delete a resource
    Delete(DeleteCommand),

    /// Import an existing resource by name
    Import(ImportCommand),

    /// Print the CustomResourceDefinitions for the Ketch resources
    Crds(CrdsCommand),
}
