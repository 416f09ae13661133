///! Cloudsim CLI
///!
///! Runs declarative scenarios against the in-memory compute, storage and pod simulators

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use cloudsim_core::SimConfig;
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (TOML); standard locations are searched when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file (.yaml, .yml, .toml or .json)
    Run {
        /// Scenario file path
        file: PathBuf,
        /// Keep going after a failing step
        #[arg(long)]
        continue_on_error: bool,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show how to drive a simulator
    Usage {
        /// Simulator to describe; all when omitted
        #[arg(value_enum)]
        kind: Option<ResourceKind>,
    },
    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print a sample configuration file
    Sample,
    /// Print the effective configuration
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResourceKind {
    Compute,
    Storage,
    Orchestration,
}

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load_from_file(path)?,
        None => SimConfig::load()?,
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let _log_guard = config
        .logging
        .init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    tracing::debug!(config = ?cli.config, output = ?cli.output, "Configuration loaded");

    match cli.command {
        Commands::Run {
            file,
            continue_on_error,
        } => commands::run::handle_run_command(&file, continue_on_error, &config, cli.output)?,
        Commands::Config { command } => {
            commands::config::handle_config_command(command, &config, cli.output)?
        }
        Commands::Usage { kind } => commands::usage::handle_usage_command(kind),
        Commands::Completions { shell } => generate_completions(shell),
    }

    Ok(())
}

/// Generate shell completions
fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut io::stdout());
}
