//! `demodata remove-demo` - delete every product carrying the demo marker

use console::style;
use miette::Result;

use crate::catalog::ProductStore;
use crate::cli::helpers::{confirm_proceed, open_catalog};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct RemoveDemoArgs {
    /// Do not ask for confirmation and delete products immediately
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub fn run(args: RemoveDemoArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;

    let ids = catalog
        .demo_product_ids()
        .map_err(|e| miette::miette!("{}", e))?;

    if ids.is_empty() {
        if !global.quiet {
            println!(
                "{} No demo products found to remove.",
                style("✓").green()
            );
        }
        return Ok(());
    }

    if !global.quiet {
        println!(
            "{} {} demo product(s) will be permanently deleted.",
            style("!").yellow(),
            style(ids.len()).cyan()
        );
    }

    if !args.force && !confirm_proceed("Are you sure you want to proceed?")? {
        println!("Aborted.");
        return Ok(());
    }

    let deleted = catalog
        .delete_products(&ids)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Successfully deleted {} demo product(s).",
            style("✓").green(),
            style(deleted).cyan()
        );
    }

    Ok(())
}
