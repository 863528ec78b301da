// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, build the API
//   client and credential store from the environment, then hand off to `ui`.
// - Any failure is printed as a single line and exits with status 1.

use bobolink::cli::Cli;
use bobolink::{ui, ApiClient, Config, CredentialStore};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let action = cli.command.action();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error while {}: {:#}", action, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env();
    let api = ApiClient::new(&config)?;
    let store = CredentialStore::in_dir(config.home_dir());
    ui::run(cli.command, &api, &store)
}

/// Logs go to stderr so they never mix with command output. `RUST_LOG`
/// wins over the `--verbose` default.
fn init_logging(verbose: bool) {
    let default = if verbose { "bobolink=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
