//! CLI argument definitions for the Sahayak agent.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the conversation gets its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Live conversation over the terminal.
    Voice,
    /// Replay the built-in Telugu demo script.
    Demo,
}

/// Sahayak, a Telugu assistant for government welfare schemes.
#[derive(Parser, Debug)]
#[command(name = "sahayak", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Conversation mode.
    #[arg(long = "mode", value_enum, default_value_t = Mode::Demo)]
    pub mode: Mode,

    /// Print a JSON summary of the conversation when it ends.
    #[arg(long = "json")]
    pub json: bool,

    /// Write the default configuration to the config path and exit.
    #[arg(long = "init-config")]
    pub init_config: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SAHAYAK_CONFIG env var > ~/.sahayak/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SAHAYAK_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".sahayak").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".sahayak").join("config.toml");
    }
    PathBuf::from("config.toml")
}
