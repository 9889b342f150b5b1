use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

use crate::controller::prefill::PrefillFile;

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8081;
pub const MEMORY_DB: &str = ":memory:";

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Sqlite filename. `:memory:` keeps everything in process and is lost on exit.
    #[arg(short = 'n', long, value_name = "DATABASE_NAME")]
    pub db_name: Option<String>,
    #[arg(short = 'b', long, value_name = "BIND_ADDRESS")]
    pub bind: Option<String>,
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,
    /// Courses and events to create on startup.
    #[arg(
        long,
        value_name = "DATABASE_POPULATE_JSON",
        value_parser = crate::args::validation::check_readable_file_and_json
    )]
    pub db_populate_json: Option<PrefillFile>,
    /// TOML file with any of the settings above. Command line flags win.
    #[arg(
        long,
        value_name = "CONFIG_TOML",
        value_parser = crate::args::validation::check_readable_file
    )]
    pub config_toml: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub db_name: Option<String>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub db_populate_json: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub db_name: String,
    pub bind: String,
    pub port: u16,
    pub db_populate_json: Option<PrefillFile>,
}
