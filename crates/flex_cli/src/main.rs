//! `flex-theme` command line tool
//!
//! Runs the theming facade against a JSON state file so themes, locales and
//! presets persist between invocations the way they do in browser storage.

mod cli;
mod commands;
mod file_host;

use std::io;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use flex_app::{FlexConfig, FlexTheme};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::file_host::{languages_from_env, FileHost};

const DEFAULT_CONFIG_FILE: &str = "flex-theme.toml";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let host = FileHost::open(&cli.state)
        .with_context(|| format!("failed to open state file {}", cli.state.display()))?
        .with_system_scheme(cli.system.map(Into::into))
        .with_languages(languages_from_env());

    let flex = FlexTheme::new(Rc::new(host), config);
    flex.initialize();

    let stdout = io::stdout();
    commands::run(cli.command, &flex, &mut stdout.lock())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_env("FLEX_THEME_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<FlexConfig> {
    if let Some(path) = explicit {
        return FlexConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.exists() {
        debug!("using {}", fallback.display());
        return FlexConfig::load(fallback)
            .with_context(|| format!("failed to load config {}", fallback.display()));
    }
    Ok(FlexConfig::default())
}
