//! `asciispan` command-line host.
//!
//! Converts one AsciiDoc file, given a JSON dump of the document tree the
//! AsciiDoc processor produced for it, and prints the span-annotated AST.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use asciispan::processor::{AsciidocProcessor, JsonTreeLoader, ProcessorConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asciispan")]
#[command(version)]
#[command(about = "Print the span-annotated AST of an AsciiDoc file", long_about = None)]
struct Cli {
    /// AsciiDoc source file
    input: PathBuf,

    /// JSON dump of the document tree parsed from INPUT
    #[arg(short, long)]
    tree: PathBuf,

    /// Processor configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Convert even when INPUT has no recognised extension
    #[arg(long)]
    force: bool,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ProcessorConfig::from_json(&read(path)?)
            .with_context(|| format!("parsing config {}", path.display()))?,
        None => ProcessorConfig::default(),
    };
    let loader = JsonTreeLoader::from_json(&read(&cli.tree)?)
        .with_context(|| format!("parsing document tree {}", cli.tree.display()))?;
    let processor = AsciidocProcessor::new(config, loader);

    if !cli.force && !processor.supports(&cli.input) {
        bail!(
            "{} is not an AsciiDoc file (expected one of: {})",
            cli.input.display(),
            processor.available_extensions().join(", ")
        );
    }

    let text = read(&cli.input)?;
    let document = processor.pre_process(text, Some(&cli.input))?;
    tracing::info!(
        nodes = document.root().descendants().count(),
        "converted {}",
        cli.input.display()
    );

    let output = if cli.pretty {
        serde_json::to_string_pretty(document.root())?
    } else {
        serde_json::to_string(document.root())?
    };
    println!("{output}");
    Ok(())
}
