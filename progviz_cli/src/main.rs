use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;

use progviz_cli::config::{AppConfig, ConfigManager};
use progviz_cli::demo::{self, DemoArgs};
use progviz_cli::error::{CliError, CliResult, ErrorContext, ExitCode};

#[derive(Parser)]
#[command(name = "progviz")]
#[command(author, version, about = "Single-line colorized progress bar for the terminal", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count up under a progress bar, printing every K-th number
    Demo(DemoArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the resolved configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },

    /// Print the configuration file path
    Path,

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., bar.done_color)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., bar.done_color)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ConfigFormat {
    Toml,
    Json,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("progviz_core", log::LevelFilter::Debug)
            .filter_module("progviz_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match run(cli.command) {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => {
            log::debug!("Command failed: {e}");
            eprint!("{}", e.format_for_user(cli.debug));
            e.exit_code().into()
        }
    }
}

fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Demo(args) => demo::run(load_config()?, &args),
        Commands::Config { command } => config_command(command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

fn load_config() -> CliResult<AppConfig> {
    let manager = ConfigManager::new();
    manager.load().map_err(|e| {
        CliError::configuration(&format!("{e:#}"))
            .with_context("config file", &manager.get_config_path().display().to_string())
    })
}

fn config_command(command: ConfigCommand) -> CliResult<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Show { format } => {
            let config = load_config()?;
            let rendered = match format {
                ConfigFormat::Toml => toml::to_string_pretty(&config)
                    .map_err(|e| CliError::general(&format!("Failed to render TOML: {e}")))?,
                ConfigFormat::Json => serde_json::to_string_pretty(&config)
                    .map_err(|e| CliError::general(&format!("Failed to render JSON: {e}")))?,
            };
            println!("{}", rendered.trim_end());
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
        ConfigCommand::Get { key } => {
            let value = manager
                .get(&key)
                .map_err(|e| CliError::configuration(&format!("{e:#}")))?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            manager
                .set(&key, &value)
                .map_err(|e| CliError::configuration(&format!("{e:#}")))?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager
                .list()
                .map_err(|e| CliError::configuration(&format!("{e:#}")))?;
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            let mut current_section = None;
            for (key, value) in items {
                let (section, field) = key.split_once('.').unwrap_or(("general", key.as_str()));
                if current_section != Some(section.to_string()) {
                    if current_section.is_some() {
                        eprintln!();
                    }
                    eprintln!("[{}]", section.yellow());
                    current_section = Some(section.to_string());
                }
                eprintln!("  {} = {}", field.cyan(), value);
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
