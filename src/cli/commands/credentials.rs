//! `demodata credentials` - configure the demo webservice credentials

use console::style;
use miette::Result;

use crate::cli::helpers::open_catalog;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct CredentialsArgs {
    /// Force overriding of credentials that already exist in the catalog
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub fn run(args: CredentialsArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;

    let exist = catalog
        .demo_credentials_exist()
        .map_err(|e| miette::miette!("{}", e))?;
    if exist && !args.force {
        return Err(miette::miette!(
            "Credentials already exist. Use --force to override."
        ));
    }

    catalog
        .seed_demo_credentials()
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!("{} Credentials set", style("✓").green());
    }

    Ok(())
}
