mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    init_tracing(args.verbose, args.quiet);
    cli::context::init(args.home.as_deref(), args.store);

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(args.verbose),
        Commands::Set { key, value } => cli::commands::credentials::execute_set(key, value),
        Commands::Get { key } => cli::commands::credentials::execute_get(key),
        Commands::Remove { key } => cli::commands::credentials::execute_remove(key),
        Commands::Keys { action } => cli::commands::keys::execute(action),
        Commands::Encrypt { text } => cli::commands::encrypt::execute(text, args.quiet),
        Commands::Decrypt { ciphertext } => {
            cli::commands::decrypt::execute(ciphertext, args.quiet)
        }
        Commands::Protect { action } => cli::commands::protect::execute(action),
        Commands::Clip { action } => cli::commands::clip::execute(action),
        Commands::Log {
            action,
            since,
            last,
        } => cli::commands::log::execute(action.as_deref(), since.as_deref(), *last),
        Commands::Demo => cli::commands::demo::execute(),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
