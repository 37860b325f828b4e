use anyhow::{Context, Result, bail};
use clap::Parser;
use daylog::{Logger, LoggerConfig, Severity, SeverityFilter, Status};
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Append stdin lines to today's log file
#[derive(Debug, Parser)]
#[command(name = "daylog")]
#[command(version)]
struct Args {
    /// TOML config file (directory, severity, date_format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log directory, overrides the config
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Threshold from 0 (EMERG) to 8 (OFF), overrides the config
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=8))]
    threshold: Option<u8>,

    /// Severity of each line from 0 (EMERG) to 7 (DEBUG)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=7))]
    level: Option<u8>,
}

impl Args {
    fn threshold(&self) -> Result<Option<SeverityFilter>> {
        self.threshold.map(SeverityFilter::try_from).transpose()
    }

    fn level(&self) -> Result<Severity> {
        Ok(self
            .level
            .map(Severity::try_from)
            .transpose()?
            .unwrap_or(Severity::Info))
    }
}

fn main() -> Result<()> {
    // Enable better panic messages
    better_panic::install();

    setup_log();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LoggerConfig::load_from_file(path)?,
        None => LoggerConfig::default(),
    };
    if let Some(dir) = &args.dir {
        config.directory = Some(dir.clone());
    }
    if let Some(threshold) = args.threshold()? {
        config.severity = threshold;
    }
    let level = args.level()?;

    let mut logger = Logger::from_config(&config)?;
    log::info!("Logging to {}", logger.file_path().display());

    if logger.status() == Status::Open {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            logger.log_text(level, &line);
        }
    }

    for message in logger.get_messages() {
        eprintln!("{message}");
    }

    if logger.status() == Status::OpenFailed {
        bail!("Log file {} was not opened", logger.file_path().display());
    }

    Ok(())
}

fn setup_log() {
    use env_logger::{Builder, Env, Target};

    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .init();
}
