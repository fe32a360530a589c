use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::script::runner::RunSettings;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "widget-replay",
    version,
    about = "Record/replay automation engine for widget UIs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: widget-replay.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run replay scripts against the built-in demo application
    Run {
        /// Path to a script YAML file or a directory of YAML files
        #[arg(long)]
        script: String,

        /// Output format: console, junit
        #[arg(long, default_value = "console")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// JSONL trace file path (tracing disabled when omitted)
        #[arg(long)]
        trace: Option<String>,

        /// Resolution retry attempts
        #[arg(long)]
        retrieval_attempts: Option<u32>,

        /// Sleep between resolution attempts, in milliseconds
        #[arg(long)]
        retrieval_interval_ms: Option<u64>,

        /// Ceiling for the post-action settle wait, in milliseconds
        #[arg(long)]
        settle_timeout_ms: Option<u64>,

        /// Log per-line elapsed time to stderr
        #[arg(long, default_value_t = false)]
        show_elapsed: bool,
    },

    /// Statically validate scripts: addresses parse, verbs are known,
    /// argument shapes match; nothing is executed
    Check {
        /// Path to a script YAML file or a directory of YAML files
        #[arg(long)]
        script: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `widget-replay.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub run: RunSettings,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or
/// malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("widget-replay.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings resolution (merge CLI args with config file)
// ============================================================================

/// Build the effective RunSettings: CLI flag > config file > default,
/// clamped to the documented minimums.
pub fn build_run_settings(
    config: &AppConfig,
    retrieval_attempts: Option<u32>,
    retrieval_interval_ms: Option<u64>,
    settle_timeout_ms: Option<u64>,
    show_elapsed: bool,
) -> RunSettings {
    RunSettings {
        retrieval_attempts: retrieval_attempts.unwrap_or(config.run.retrieval_attempts),
        retrieval_interval_ms: retrieval_interval_ms.unwrap_or(config.run.retrieval_interval_ms),
        settle_timeout_ms: settle_timeout_ms.unwrap_or(config.run.settle_timeout_ms),
        show_elapsed: show_elapsed || config.run.show_elapsed,
    }
    .normalized()
}
