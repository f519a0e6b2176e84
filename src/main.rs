use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use stacklog::config::{config_dir, FilesConfig, LoggerConfig};
use stacklog::{LogLevel, Logger};

/// Stacklog - log stdin lines with timestamps, levels and a name stack
#[derive(Parser, Debug)]
#[command(name = "stacklog")]
#[command(about = "Log lines read from stdin to the terminal and per-level files")]
struct Args {
    /// Config file (defaults to ~/.stacklog/config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Logger name
    #[arg(short, long)]
    name: Option<String>,

    /// Level every line is logged at
    #[arg(short, long, default_value = "info")]
    level: LogLevel,

    /// Write per-level files under this folder
    #[arg(short, long)]
    folder: Option<PathBuf>,

    /// Do not print to the terminal
    #[arg(long)]
    no_console: bool,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(args: &Args) -> Result<LoggerConfig> {
    let mut config = match &args.config {
        Some(path) => LoggerConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => LoggerConfig::load_default().context("Failed to load default config")?,
    };
    apply_overrides(&mut config, args);
    Ok(config)
}

/// Command-line flags win over the config file
fn apply_overrides(config: &mut LoggerConfig, args: &Args) {
    if let Some(name) = &args.name {
        config.name = Some(name.clone());
    }
    if let Some(folder) = &args.folder {
        let files = config.files.get_or_insert_with(FilesConfig::default);
        files.folder = folder.clone();
    }
    if args.no_console {
        config.console.enabled = false;
    }
}

/// Log every line of `input` at `level`; invalid UTF-8 is replaced, not fatal
fn log_lines(mut input: impl BufRead, logger: &mut Logger, level: LogLevel) -> Result<usize> {
    let mut buf = Vec::new();
    let mut count = 0;
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).context("Failed to read stdin")? == 0 {
            return Ok(count);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        logger.log(level, String::from_utf8_lossy(&buf));
        count += 1;
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stacklog=warn".into()),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    if args.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    tracing::debug!("Config directory: {}", config_dir().display());

    let mut logger = config.build().context("Failed to set up logger")?;

    let count = log_lines(io::stdin().lock(), &mut logger, args.level)?;
    tracing::debug!("Logged {} lines from stdin", count);

    logger.end().context("Failed to flush logs")?;
    Ok(())
}
