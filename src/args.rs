pub mod database;
pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs, FileConfig};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::fs;

use types::{DEFAULT_BIND, DEFAULT_PORT};

/// Parse the command line and fold in the optional TOML file.
///
/// # Errors
///
/// Will return `Err` if the config file is unreadable or a setting is invalid
pub fn args_checks() -> Result<CleanArgs> {
    clean_args(Args::parse())
}

/// # Errors
///
/// Will return `Err` if the config file is unreadable or a setting is invalid
pub fn clean_args(args: Args) -> Result<CleanArgs> {
    let file_config = match args.config_toml.as_ref() {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("read config toml {}", path.display()))?;
            toml::from_str::<FileConfig>(&contents)
                .with_context(|| format!("parse config toml {}", path.display()))?
        }
        None => FileConfig::default(),
    };

    let merged = Args {
        db_name: args.db_name.or(file_config.db_name),
        bind: args.bind.or(file_config.bind),
        port: args.port.or(file_config.port),
        db_populate_json: match args.db_populate_json {
            Some(seed) => Some(seed),
            None => match file_config.db_populate_json {
                Some(path) => Some(validation::load_prefill(&path).map_err(|e| anyhow!(e))?),
                None => None,
            },
        },
        config_toml: args.config_toml,
    };
    merged.validate().map_err(|e| anyhow!(e))?;

    Ok(CleanArgs {
        db_name: merged
            .db_name
            .ok_or_else(|| anyhow!("missing --db-name"))?,
        bind: merged.bind.unwrap_or_else(|| DEFAULT_BIND.to_string()),
        port: merged.port.unwrap_or(DEFAULT_PORT),
        db_populate_json: merged.db_populate_json,
    })
}
