use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chartspec::{build_spec, ChartProps};
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Build a Vega specification from a JSON chart description
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chart description file, `-` reads from stdin
    #[arg(default_value = "-")]
    input: String,

    /// Write the specification here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indent the output
    #[arg(long)]
    pretty: bool,

    /// Log build steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read chart description from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read chart description from {input}"))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = read_input(&cli.input)?;
    let props: ChartProps =
        serde_json::from_str(&source).context("Invalid chart description")?;
    let spec = build_spec(&props).context("Failed to build specification")?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&spec)?
    } else {
        serde_json::to_string(&spec)?
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote specification to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
