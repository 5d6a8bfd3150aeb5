use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use pgsnap::commands;
use pgsnap::config;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = "pgsnap.yaml", global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for pgsnap diff
#[derive(Parser, Debug)]
struct DiffCommandArgs {
    /// Snapshot describing the current schema (JSON)
    from: String,

    /// Snapshot describing the desired schema (JSON)
    to: String,

    /// Save SQL output to file
    #[arg(long)]
    output_sql: Option<String>,

    #[command(flatten)]
    diff_args: config::DiffArgs,

    #[command(flatten)]
    object_filter_args: config::ObjectFilterArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two schema snapshots and print the change statements
    Diff(DiffCommandArgs),
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    // stdout carries the diff itself
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_main(cli: Cli) -> Result<()> {
    let file_config = config::load_config(&cli.config_file)?;

    match cli.command {
        Commands::Diff(args) => {
            let cli_config = config::ConfigInput {
                objects: Some(args.object_filter_args.into()),
                diff: Some((&args.diff_args).into()),
                output: Some((&args.diff_args).into()),
            };

            let config = config::ConfigBuilder::new()
                .with_file(file_config)
                .with_cli_args(cli_config)
                .resolve()?;
            debug!("Resolved configuration: {:?}", config);

            commands::cmd_diff(
                &config,
                commands::diff::DiffArgs {
                    from: args.from,
                    to: args.to,
                    output_sql: args.output_sql,
                },
            )
        }
    }
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);
    run_main(cli)
}
