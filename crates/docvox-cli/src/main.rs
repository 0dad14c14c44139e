//! CLI entry point.
//!
//! Sets up logging and the environment, parses arguments, composes the
//! pipeline through `bootstrap` and dispatches to a handler.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use docvox_cli::{Cli, CliError, Commands, RunOptions, bootstrap, handlers, load_settings};

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,docvox_core=debug,docvox_document=debug,docvox_tts=debug,docvox_audio=debug,docvox_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = cli.config.as_deref();
    match command {
        Commands::Convert { file, options } => {
            let settings = load_settings(config, &options)?;
            let ctx = bootstrap(settings, !options.no_prompt)?;
            handlers::convert::execute(&ctx, file).await?;
        }
        Commands::Resume {
            work_dir,
            output,
            options,
        } => {
            let settings = load_settings(config, &options)?;
            let ctx = bootstrap(settings, !options.no_prompt)?;
            handlers::resume::execute(&ctx, &work_dir, output).await?;
        }
        Commands::Check {
            work_dir,
            bytes_per_word,
            json,
        } => {
            let options = RunOptions {
                bytes_per_word,
                ..RunOptions::default()
            };
            let settings = load_settings(config, &options)?;
            handlers::check::execute(&work_dir, settings.effective_bytes_per_word(), json)?;
        }
        Commands::Paths => {
            let settings = load_settings(config, &RunOptions::default())?;
            handlers::paths::execute(&settings)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads DOCVOX_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
