// src/main.rs
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cut_it_now::api::{self, CutRequest};
use cut_it_now::config::AppConfig;
use cut_it_now::optimizer::{CancelToken, CutConfig, CutEvent};
use cut_it_now::runner::optimize_stream;

/// Guillotine sheet cutting optimizer.
///
/// Reads a cutting request as JSON and writes the layout as JSON.
#[derive(Debug, Parser)]
#[command(name = "cut-it-now", version)]
struct Cli {
    /// Request file; stdin when omitted or "-"
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Response file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Upper bound on opened sheets
    #[arg(long)]
    max_sheets: Option<usize>,

    /// Forbid 90 degree rotation for all pieces
    #[arg(long)]
    no_rotation: bool,

    /// Abort the run after this many milliseconds (0 disables)
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Print progress events as JSON lines instead of the response
    #[arg(long)]
    events: bool,

    /// Pretty-print the response
    #[arg(long)]
    pretty: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply_overrides(&self, mut config: CutConfig) -> CutConfig {
        if self.no_rotation {
            config.allow_rotation = false;
        }
        if let Some(max_sheets) = self.max_sheets {
            config.max_sheets = max_sheets;
        }
        config
    }

    fn deadline(&self, fallback: Option<Duration>) -> Option<Duration> {
        match self.deadline_ms {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => fallback,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_error = match dotenvy::dotenv() {
        Err(err)
            if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound) =>
        {
            Some(err)
        }
        _ => None,
    };

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Some(err) = dotenv_error {
        warn!("Could not load .env: {}", err);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let app_config = AppConfig::from_env();
    let body = read_input(cli.input.as_deref())?;
    let output = cli.output.as_deref();

    let request = match api::parse_request(&body) {
        Ok(request) => request,
        Err(err) => {
            write_json(output, &err, cli.pretty)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = cli.apply_overrides(app_config.optimizer.cut_config());
    let deadline = cli.deadline(app_config.runner.deadline());

    if cli.events {
        let succeeded = stream_events(request, config, deadline, output).await?;
        return Ok(if succeeded {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    match api::handle_cut_with_deadline(request, config, deadline).await {
        Ok(response) => {
            write_json(output, &response, cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            write_json(output, &err, cli.pretty)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn stream_events(
    request: CutRequest,
    config: CutConfig,
    deadline: Option<Duration>,
    output: Option<&Path>,
) -> Result<bool> {
    let job = request.into_job(config);
    let cancel = CancelToken::new();
    if let Some(limit) = deadline {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            cancel.cancel();
        });
    }

    let mut events = optimize_stream(job.sheet, job.pieces, job.config, cancel);
    let mut out = open_output(output)?;
    let mut failed = false;
    while let Some(event) = events.next().await {
        failed = matches!(event, CutEvent::Failed { .. });
        serde_json::to_writer(&mut out, &event).context("Could not encode event")?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(!failed)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut body = String::new();
    match path {
        Some(path) if path != Path::new("-") => {
            File::open(path)
                .and_then(|mut file| file.read_to_string(&mut body))
                .with_context(|| format!("Could not read request from {}", path.display()))?;
        }
        _ => {
            io::stdin()
                .read_to_string(&mut body)
                .context("Could not read request from stdin")?;
        }
    }
    Ok(body)
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Could not create output file {}", path.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    })
}

fn write_json<T: Serialize>(path: Option<&Path>, value: &T, pretty: bool) -> Result<()> {
    let mut out = open_output(path)?;
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)
    } else {
        serde_json::to_writer(&mut out, value)
    }
    .context("Could not encode response")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
