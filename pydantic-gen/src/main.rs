// pydantic-gen/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

use pydantic_gen_core::GeneratorError;
use pydantic_gen_core::infrastructure::error::InfrastructureError;

fn main() {
    let cli = Cli::parse();

    // 1. Setup Logging (Tracing) on stderr: stdout may carry generated code.
    // RUST_LOG=debug pydantic-gen generate ... to see the registry decisions
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        report(err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config.as_deref();

    match cli.command {
        // --- USE CASE: GENERATE ---
        Commands::Generate {
            input,
            output,
            runtime_import,
            with_defaults,
            no_init,
            stdout,
        } => commands::generate::execute(
            config,
            input,
            output,
            runtime_import,
            with_defaults,
            no_init,
            stdout,
        ),

        // --- USE CASE: CONVERT ---
        Commands::Convert { input, output } => commands::convert::execute(input, output),

        // --- USE CASE: INSPECT ---
        Commands::Inspect { input, format } => commands::inspect::execute(config, input, format),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Core errors get miette's report (code, help, cause chain), anything else
/// a one-line message.
fn report(err: anyhow::Error) {
    let err = match err.downcast::<GeneratorError>() {
        Ok(core) => {
            eprintln!("{:?}", miette::Report::new(core));
            return;
        }
        Err(err) => err,
    };
    match err.downcast::<InfrastructureError>() {
        Ok(infra) => eprintln!("{:?}", miette::Report::new(infra)),
        Err(other) => eprintln!("{:#}", other),
    }
}
