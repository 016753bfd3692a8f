//! GetCapabilities inspection CLI.
//!
//! Reads a WMS or WFS GetCapabilities XML document from a file or stdin,
//! runs the extraction pipeline, and prints the JSON model (or a summary)
//! to stdout. Logs go to stderr so stdout stays machine-readable.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ogc_common::CapabilitiesError;
use ogc_protocol::{
    parse_wfs_capabilities, parse_wms_capabilities, simple_view, summarize, to_json_pretty,
    validate,
};

#[derive(Parser, Debug)]
#[command(name = "capabilities")]
#[command(about = "Parse OGC WMS/WFS GetCapabilities documents into JSON")]
struct Args {
    /// Capabilities XML file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Which pipeline to run
    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Print summary statistics instead of the full model (WFS only)
    #[arg(long)]
    summary: bool,

    /// Print the flattened legacy view instead of the full model (WFS only)
    #[arg(long)]
    simple: bool,

    /// Run required-field validation and report failures (WFS only)
    #[arg(long)]
    check: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Try WFS first, fall back to WMS when the document isn't WFS
    Auto,
    Wms,
    Wfs,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let text = read_input(args.input.as_deref())?;
    debug!(bytes = text.len(), "read capabilities document");

    match args.mode {
        Mode::Wms => run_wms(&text),
        Mode::Wfs => run_wfs(&text, &args),
        Mode::Auto => match run_wfs(&text, &args) {
            Err(err) if is_not_wfs(&err) => {
                info!("not a WFS document, trying the WMS pipeline");
                run_wms(&text)
            }
            other => other,
        },
    }
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn run_wms(text: &str) -> Result<()> {
    let capabilities = parse_wms_capabilities(text)?;
    info!(
        layers = capabilities.layers.len(),
        "extracted WMS capabilities"
    );
    println!("{}", serde_json::to_string_pretty(&capabilities)?);
    Ok(())
}

fn run_wfs(text: &str, args: &Args) -> Result<()> {
    let capabilities = parse_wfs_capabilities(text)?;
    info!(
        operations = capabilities.operations.len(),
        feature_types = capabilities.feature_types.len(),
        "extracted WFS capabilities"
    );

    if args.check {
        let report = validate(&capabilities);
        if !report.valid {
            for error in &report.errors {
                warn!(%error, "validation failure");
            }
            anyhow::bail!("validation failed with {} error(s)", report.errors.len());
        }
        info!("validation passed");
    }

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&summarize(&capabilities))?);
    } else if args.simple {
        println!("{}", serde_json::to_string_pretty(&simple_view(&capabilities))?);
    } else {
        println!("{}", to_json_pretty(&capabilities)?);
    }
    Ok(())
}

fn is_not_wfs(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<CapabilitiesError>(),
        Some(CapabilitiesError::NotWfsCapabilities)
    )
}
