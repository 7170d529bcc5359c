//! `mural`: terminal client for the Mural forum API.
//!
//! Shares the session core with the web client: the token lives in a file
//! instead of `localStorage`, and every run bootstraps the session before
//! dispatching the requested command.

mod commands;
mod config;
mod error;
mod render;
mod token_file;
mod transport;

#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use clap::Parser;
use session::{ApiClient, BootstrapOutcome, SessionStore};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::config::{Config, Options};
use crate::error::CliError;
use crate::token_file::FileTokenStore;
use crate::transport::ReqwestTransport;

#[derive(Parser, Debug)]
#[command(name = "mural", version, about = "Mural forum client")]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::resolve(cli.options, dirs::config_dir())?;
    init_tracing(&config);

    let transport = ReqwestTransport::new(&config.api_url)?;
    let tokens = FileTokenStore::new(config.token_file.clone());
    let store = SessionStore::new(ApiClient::new(transport, tokens).with_timeout(config.timeout));

    match store.bootstrap().await {
        BootstrapOutcome::Purged(error) => {
            tracing::warn!(%error, "stored session is no longer valid; signed out");
        }
        outcome => tracing::debug!(?outcome, "session bootstrapped"),
    }

    let prompt = || rpassword::prompt_password("Password: ");
    let output = commands::run(&store, cli.command, &prompt).await?;
    output.print(config.json)
}

fn init_tracing(config: &Config) {
    let filter = if config.verbose > 0 {
        EnvFilter::new(config.log_filter())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
