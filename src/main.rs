//! led-volume-logger: change logging for LED-wall video processors
//!
//! Polls Megapixel Helios and Brompton Tessera processors and records every
//! telemetry field that changes between polls.

#![allow(clippy::too_many_lines, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use led_volume_logger::{
    cli::{self, DiffOptions},
    config::{
        discover_config_file, generate_example_config, generate_json_schema, AppConfig,
        ChangeLogFormat, ConfigOverrides, LogLevel, DATE_FORMAT,
    },
    watch::parse_duration,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "led-volume-logger")]
#[command(author = "Dark Bay")]
#[command(version)]
#[command(about = "Log configuration changes on LED-wall video processors", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success / no changes
    1  Changes detected (diff) / host not identified (probe)
    2  Error occurred

EXAMPLES:
    # Watch two processors, logging changes to a file
    led-volume-logger watch 10.0.0.0 10.0.0.1 -l /var/log/led-volume.log

    # Poll every 10 seconds with debug output
    led-volume-logger -d watch 10.0.0.0 -i 10s -l -

    # Check which vendor API a host speaks
    led-volume-logger probe 10.0.0.0

    # Compare two saved payloads
    led-volume-logger diff before.json after.json")]
struct Cli {
    /// Show informational messages
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show debug messages
    #[arg(short, long, global = true)]
    debug: bool,

    /// Path to a config file (default: auto-discovered)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll processors and log configuration changes until interrupted
    Watch(WatchArgs),

    /// Detect the vendor API of each host without polling
    Probe {
        /// Processor hosts (IP address or hostname)
        #[arg(required = true)]
        hosts: Vec<String>,
    },

    /// Compare two saved processor payloads
    Diff {
        /// Older JSON payload
        old: PathBuf,

        /// Newer JSON payload
        new: PathBuf,

        /// Label printed in place of a processor id
        #[arg(long, default_value = "diff")]
        label: String,

        /// Report fields the built-in rules would suppress
        #[arg(long)]
        no_veto: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct WatchArgs {
    /// Processor hosts, appended to those in the config file
    hosts: Vec<String>,

    /// Change log file (`-` for stdout)
    #[arg(short, long)]
    logfile: Option<PathBuf>,

    /// Poll interval (e.g. 30, 2.5, 500ms, 5m)
    #[arg(short, long, value_parser = parse_duration)]
    interval: Option<Duration>,

    /// Samples kept per processor (2 to 1000)
    #[arg(long)]
    max_samples: Option<usize>,

    /// Sample all processors concurrently each cycle
    #[arg(long)]
    parallel: bool,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Change log format
    #[arg(long, value_enum)]
    format: Option<ChangeLogFormat>,

    /// Stop after this many poll cycles
    #[arg(long)]
    cycles: Option<u64>,
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example led-volume-logger.yaml in the current directory
    Init,
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            2
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut overrides = ConfigOverrides {
        level: LogLevel::from_flags(cli.quiet, cli.verbose, cli.debug),
        ..Default::default()
    };
    let mut max_cycles = None;
    if let Commands::Watch(args) = &cli.command {
        overrides.hosts.clone_from(&args.hosts);
        overrides.interval_secs = args.interval.map(|d| d.as_secs_f64());
        overrides.max_samples = args.max_samples;
        overrides.parallel = args.parallel;
        overrides.request_timeout_secs = args.timeout;
        overrides.log_file.clone_from(&args.logfile);
        overrides.format = args.format;
        max_cycles = args.cycles;
    }

    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides)
            .context("failed to load configuration")?;

    init_logging(config.logging.level);
    if let Some(path) = &loaded_from {
        tracing::info!("Using config file {}", path.display());
    }

    match cli.command {
        Commands::Watch(_) => {
            cli::run_watch(&config, max_cycles)?;
            Ok(0)
        }

        Commands::Probe { hosts } => cli::run_probe(&hosts, &config.polling),

        Commands::Diff {
            old,
            new,
            label,
            no_veto,
        } => {
            let options = DiffOptions {
                label,
                builtin_veto: !no_veto,
                extra_patterns: config.veto.extra_patterns.clone(),
            };
            cli::run_diff(&old, &new, &options)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "led-volume-logger", &mut io::stdout());
            Ok(0)
        }

        Commands::ConfigSchema { output } => {
            let schema = generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(0)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(0)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("led-volume-logger").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in led_volume_logger::config::file::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(0)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join("led-volume-logger.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(0)
            }
        },
    }
}

/// Operational log on stderr; `RUST_LOG` takes precedence over the level.
fn init_logging(level: LogLevel) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.as_filter().to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
                    DATE_FORMAT.to_string(),
                )),
        )
        .init();
}
