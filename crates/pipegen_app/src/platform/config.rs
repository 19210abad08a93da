use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use pipegen_engine::{GeneratorSettings, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use pipegen_logging::LogDestination;

/// Compose a CI/CD pipeline interactively and have it written as .gitlab-ci.yml.
#[derive(Parser)]
#[command(name = "pipegen", version)]
pub struct Config {
    /// API key for the generation service.
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model identifier sent with every request.
    #[arg(long, env = "PIPEGEN_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Chat-completions endpoint.
    #[arg(long, env = "PIPEGEN_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Directory the generated pipeline is saved into.
    #[arg(long, env = "PIPEGEN_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    #[arg(long, default_value_t = 60)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "PIPEGEN_LOG", default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,

    #[arg(long, default_value = "pipegen.log")]
    pub log_file: PathBuf,

    /// Also log to the terminal.
    #[arg(long)]
    pub log_to_terminal: bool,
}

impl Config {
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..GeneratorSettings::default()
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_to_terminal {
            LogDestination::Both
        } else {
            LogDestination::File
        }
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse()
        .map_err(|_| format!("unknown log level {raw:?} (off, error, warn, info, debug, trace)"))
}
