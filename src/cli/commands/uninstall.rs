//! `demodata uninstall` - remove the demo marker field registration

use console::style;
use miette::Result;

use crate::cli::helpers::open_catalog;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct UninstallArgs {
    /// Keep the custom field registration and all imported data in place
    #[arg(long)]
    pub keep_user_data: bool,
}

pub fn run(args: UninstallArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    catalog
        .uninstall(args.keep_user_data)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        if args.keep_user_data {
            println!(
                "{} Uninstalled; user data kept as requested.",
                style("✓").green()
            );
        } else {
            println!(
                "{} Demo marker custom field removed from the catalog.",
                style("✓").green()
            );
        }
    }

    Ok(())
}
