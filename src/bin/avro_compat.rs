//! Avro Compatibility CLI
//!
//! Checks a candidate schema against a schema chronology under a compatibility mode.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use avro_compatibility::config::{CompatConfig, OutputFormat};
use avro_compatibility::history::{load_history, load_history_dir, parse_schema_file};
use avro_compatibility::{CompatibilityReport, Mode, SchemaFingerprint};

#[derive(Parser)]
#[command(name = "avro-compat")]
#[command(about = "Check Avro schema evolution against a schema chronology")]
struct Cli {
    /// Config file (defaults to compat.toml and friends)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a candidate schema against earlier schemas
    Check {
        /// Candidate schema file
        #[arg(short = 'c', long)]
        candidate: PathBuf,

        /// Earlier schema files, oldest first
        #[arg(long, num_args = 1..)]
        history: Vec<PathBuf>,

        /// Directory of versioned schema files (e.g. v1.2.0.avsc)
        #[arg(long)]
        history_dir: Option<PathBuf>,

        /// Compatibility mode, e.g. backward, full-transitive, CAN_READ_ALL
        #[arg(short, long)]
        mode: Option<String>,

        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Report incompatibilities without failing
        #[arg(long)]
        no_fail: bool,
    },

    /// List the available compatibility modes
    Modes,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

/// Returns `Ok(false)` when the candidate is incompatible and failing is enabled.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = CompatConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Modes => {
            for mode in Mode::ALL {
                println!(
                    "{:<24} {:<20} {} / {}",
                    mode.as_str(),
                    mode.alias(),
                    mode.direction(),
                    mode.scope()
                );
            }
            Ok(true)
        }

        Commands::Check {
            candidate,
            history,
            history_dir,
            mode,
            format,
            no_fail,
        } => {
            let mode = match mode {
                Some(name) => name.parse::<Mode>()?,
                None => config.policy.mode,
            };
            let format = match format {
                Some(Format::Text) => OutputFormat::Text,
                Some(Format::Json) => OutputFormat::Json,
                None => config.output.format,
            };

            let candidate_schema = parse_schema_file(&candidate)?;
            let schemas = match (history.is_empty(), history_dir) {
                (false, Some(_)) => bail!("--history and --history-dir cannot be combined"),
                (false, None) => load_history(&history)?,
                (true, dir) => match dir.or(config.history.dir.clone()) {
                    Some(dir) => load_history_dir(&dir, &config.history.extension)?,
                    None => bail!("no schema history given: use --history or --history-dir"),
                },
            };
            if schemas.is_empty() {
                warn!("schema history is empty, every mode holds vacuously");
            }

            let fingerprint = SchemaFingerprint::of(&candidate_schema)?;
            info!(
                %mode,
                candidate = %fingerprint.short(),
                history = schemas.len(),
                "checking compatibility"
            );
            let result = mode.check(&candidate_schema, schemas.as_slice())?;

            match format {
                OutputFormat::Text => println!("{}", result.describe()),
                OutputFormat::Json => {
                    println!("{}", CompatibilityReport::from_result(&result)?.to_json(config.output.pretty)?)
                }
            }

            let fail = config.policy.fail_on_incompatible && !no_fail;
            Ok(!fail || result.is_compatible())
        }
    }
}
