//! `demodata install` - prepare the catalog for imports

use console::style;
use miette::Result;

use crate::cli::helpers::open_catalog;
use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct InstallArgs {}

pub fn run(_args: InstallArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    catalog.install().map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        let path = global
            .db
            .clone()
            .unwrap_or_else(|| Config::load().database());
        println!(
            "{} Catalog ready at {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
        println!("  Baseline taxes, sales channel and categories are in place.");
        println!("  Demo marker custom field registered.");
    }

    Ok(())
}
