// groupstage entry point.
//
// Startup sequence:
// 1. Take the input path from the first argument (exit -1 when missing)
// 2. Load groupstage.toml, initialize tracing (stderr or log file)
// 3. Open the input file (exit -2 when it cannot be opened)
// 4. Run every data set, writing standings and pairings to stdout
//    (exit -3 on malformed input)

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use groupstage_core::config::{self, ConfigError, LoggingConfig};
use groupstage_core::tournament::{self, InputError};
use thiserror::Error;
use tracing::{info, warn};

const EXIT_USAGE: i32 = -1;
const EXIT_IO: i32 = -2;
const EXIT_SYNTAX: i32 = -3;

#[derive(Debug, Error)]
enum CliError {
    #[error("source file path not provided")]
    MissingPath,

    #[error("cannot open file: {}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize logging: {0:#}")]
    Logging(anyhow::Error),

    #[error("invalid input file syntax")]
    Syntax(#[source] InputError),

    #[error("{0}")]
    Io(#[source] InputError),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingPath => EXIT_USAGE,
            CliError::Syntax(_) => EXIT_SYNTAX,
            CliError::Open { .. } | CliError::Config(_) | CliError::Logging(_) | CliError::Io(_) => {
                EXIT_IO
            }
        }
    }
}

fn main() {
    if let Err(e) = run() {
        // stdout may be the broken stream that caused the failure.
        let _ = writeln!(io::stdout(), "{e}");
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(CliError::MissingPath)?;

    let config = config::load_config()?;
    init_tracing(&config.logging).map_err(CliError::Logging)?;
    info!("groupstage starting, input file {}", path.display());

    let file = File::open(&path).map_err(|source| CliError::Open {
        path: path.clone(),
        source,
    })?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match tournament::run(BufReader::new(file), &mut out, &config.output) {
        Ok(summary) => {
            info!(
                "Finished: {} data set(s) processed",
                summary.data_sets_processed()
            );
            Ok(())
        }
        Err(e) => {
            warn!("Aborting run: {}", e);
            if e.is_syntax() {
                Err(CliError::Syntax(e))
            } else {
                Err(CliError::Io(e))
            }
        }
    }
}

/// Initialize tracing. Logs never go to stdout, which carries the program
/// output.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    match &logging.file {
        Some(log_path) => {
            if let Some(dir) = log_path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            }
            let log_file = File::create(log_path)
                .with_context(|| format!("failed to create log file {}", log_path.display()))?;
            let subscriber = builder
                .with_writer(log_file)
                .with_ansi(false)
                .with_line_number(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("failed to set tracing subscriber")?;
        }
        None => {
            let subscriber = builder.with_writer(io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("failed to set tracing subscriber")?;
        }
    }

    Ok(())
}
