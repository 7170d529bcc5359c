//! Terminal client configuration: global flags with env fallbacks.
//!
//! - `MURAL_API_URL`: API base URL (default `http://127.0.0.1:8000`)
//! - `MURAL_TOKEN_FILE`: token file (default `<config dir>/mural/token`)
//! - `MURAL_TIMEOUT_SECS`: per-request timeout (default 15)

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args};

use crate::error::CliError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Args, Debug, Clone)]
pub struct Options {
    /// Forum API base URL.
    #[arg(long, env = "MURAL_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Where the bearer token is kept between runs.
    #[arg(long, env = "MURAL_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    /// Seconds before a request is abandoned.
    #[arg(long, env = "MURAL_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Print raw JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub token_file: PathBuf,
    pub timeout: Duration,
    pub json: bool,
    pub verbose: u8,
}

impl Config {
    /// Resolve options against the platform config directory.
    ///
    /// # Errors
    ///
    /// [`CliError::NoConfigDir`] when no token file was given and the
    /// platform has no config directory.
    pub fn resolve(options: Options, config_dir: Option<PathBuf>) -> Result<Self, CliError> {
        let token_file = match options.token_file {
            Some(path) => path,
            None => config_dir.ok_or(CliError::NoConfigDir)?.join("mural").join("token"),
        };
        Ok(Self {
            api_url: options.api_url.trim_end_matches('/').to_owned(),
            token_file,
            timeout: Duration::from_secs(options.timeout_secs.max(1)),
            json: options.json,
            verbose: options.verbose,
        })
    }

    /// Default log filter when `RUST_LOG` is unset or overridden by `-v`.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose > 0 { "debug" } else { "warn" }
    }
}
