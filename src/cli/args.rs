//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, credentials::CredentialsArgs, import_csv::ImportCsvArgs,
    import_demo::ImportDemoArgs, install::InstallArgs, remove_demo::RemoveDemoArgs,
    uninstall::UninstallArgs,
};

#[derive(Parser)]
#[command(name = "demodata")]
#[command(author, version, about = "Demo product data importer")]
#[command(
    long_about = "Imports demo product data from CSV files into a product catalog, marks every created product with a custom field, and removes the whole batch again on request."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Catalog database file (default: catalog.db)
    #[arg(long, global = true, env = "DEMODATA_DB")]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prepare the catalog: schema, baseline data and the demo marker field
    Install(InstallArgs),

    /// Remove the demo marker field registration from the catalog
    Uninstall(UninstallArgs),

    /// Import products from a CSV file with configurable column indices
    ImportCsv(ImportCsvArgs),

    /// Import demo products into the catalog
    ImportDemo(ImportDemoArgs),

    /// Remove all demo products that were imported by this tool
    RemoveDemo(RemoveDemoArgs),

    /// Use the demo credentials for the product data webservice
    Credentials(CredentialsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable styled output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}
