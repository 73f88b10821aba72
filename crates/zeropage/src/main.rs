mod cli;

use clap::Parser;
use zeropage_lib::Result;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Run {
            folders,
            scope,
            dry_run: _,
            execute,
            yes,
            json,
        } => cli::run::handle_run_command(
            cli.config,
            cli::run::RunArgs {
                folders,
                scope,
                execute,
                yes,
                json,
            },
            cli.verbose,
            cli.quiet,
        ),

        cli::Commands::Check { names, scope, json } => {
            cli::check::handle_check_command(cli.config, names, scope, json, cli.verbose)
        }

        cli::Commands::Config { action } => {
            cli::config::handle_config_command(cli.config, action)
        }
    }
}
