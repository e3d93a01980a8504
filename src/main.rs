use clap::Parser;
use demodata::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Install(args) => demodata::cli::commands::install::run(args, &global),
        Commands::Uninstall(args) => demodata::cli::commands::uninstall::run(args, &global),
        Commands::ImportCsv(args) => demodata::cli::commands::import_csv::run(args, &global),
        Commands::ImportDemo(args) => demodata::cli::commands::import_demo::run(args, &global),
        Commands::RemoveDemo(args) => demodata::cli::commands::remove_demo::run(args, &global),
        Commands::Credentials(args) => demodata::cli::commands::credentials::run(args, &global),
        Commands::Completions(args) => demodata::cli::commands::completions::run(args),
    }
}
