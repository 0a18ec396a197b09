//! Command implementations. Each returns the text to print on stdout.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use okna_core::config::SiteConfig;
use okna_core::error::OknaError;
use okna_core::format::{group_thousands, CURRENCY};
use okna_core::models::{Extra, PriceTable, Quantity, SelectionState, ServiceKind, SizeKind};
use thiserror::Error;

use crate::cli::{Cli, Commands, ConfigCommands};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Okna(#[from] OknaError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} already exists; pass --force to overwrite")]
    ConfigExists(PathBuf),
}

pub fn run(cli: &Cli) -> Result<String, CliError> {
    let path = cli.config.clone().unwrap_or_else(SiteConfig::config_path);
    match &cli.command {
        Commands::Quote {
            service,
            size,
            quantity,
            extras,
            json,
        } => {
            let selection = SelectionState {
                service: Some(*service),
                size: Some(*size),
                quantity: Quantity::new(*quantity),
                extras: extras.iter().copied().collect(),
            };
            quote(&SiteConfig::load_from(&path)?.prices, &selection, *json)
        }
        Commands::Prices { json } => prices(&SiteConfig::load_from(&path)?.prices, *json),
        Commands::Config { action } => match action {
            ConfigCommands::Path => Ok(path.display().to_string()),
            ConfigCommands::Init { force } => init(&path, *force),
            ConfigCommands::Validate => validate(&path),
        },
    }
}

pub fn quote(prices: &PriceTable, selection: &SelectionState, json: bool) -> Result<String, CliError> {
    let quote = prices.quote(selection);
    tracing::debug!(?selection, total = quote.total, "Quoted");
    if json {
        Ok(serde_json::to_string_pretty(&quote)?)
    } else {
        Ok(quote.label)
    }
}

pub fn prices(prices: &PriceTable, json: bool) -> Result<String, CliError> {
    if json {
        return Ok(serde_json::to_string_pretty(prices)?);
    }

    let mut out = String::new();
    let mut section = |title: &str, rows: Vec<(&str, u64)>| {
        let _ = writeln!(out, "{title}");
        for (key, amount) in rows {
            let _ = writeln!(out, "  {key:<10} {:>8} {CURRENCY}", group_thousands(amount));
        }
    };
    section(
        "service",
        ServiceKind::ALL.iter().map(|k| (k.as_key(), prices.service.get(*k))).collect(),
    );
    section(
        "size",
        SizeKind::ALL.iter().map(|k| (k.as_key(), prices.size.get(*k))).collect(),
    );
    section(
        "extras",
        Extra::ALL.iter().map(|e| (e.as_key(), prices.extras.get(*e))).collect(),
    );
    Ok(out.trim_end().to_string())
}

pub fn init(path: &Path, force: bool) -> Result<String, CliError> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path.to_path_buf()));
    }
    SiteConfig::default().save_to(path)?;
    tracing::info!(path = %path.display(), "Wrote default config");
    Ok(format!("Wrote {}", path.display()))
}

pub fn validate(path: &Path) -> Result<String, CliError> {
    if !path.exists() {
        return Ok(format!("{} does not exist; built-in defaults are used", path.display()));
    }
    SiteConfig::load_from(path)?;
    Ok(format!("{} is valid", path.display()))
}
