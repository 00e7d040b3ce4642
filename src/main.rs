//! # Glyphpad
//!
//! Command-line front end for the glyphpad editing engine: loads a shader
//! source, colorizes it batch by batch the way an interactive host would
//! once per frame, and prints the result.
//!
//! ## Quick Start
//!
//! ```bash
//! # Highlight a file in the terminal
//! cargo run -- path/to/effect.fx
//!
//! # Print the color-class runs instead
//! cargo run -- --dump path/to/effect.fx
//!
//! # Read from stdin
//! cat effect.fxh | cargo run -- --lang fxh
//! ```

mod render;

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glyphpad_core::{Config, Editor};
use glyphpad_syntax::{Colorizer, DEFAULT_BATCH_LINES};

/// Glyphpad - incremental shader syntax colorization
#[derive(Parser, Debug)]
#[command(name = "glyphpad")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source file to highlight (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Language name; defaults to the file extension, then `fx`
    #[arg(short, long)]
    lang: Option<String>,

    /// Print color-class runs instead of colored text
    #[arg(short, long)]
    dump: bool,

    /// Lines recolored per batch
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BATCH_LINES)]
    batch_lines: usize,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// The language to colorize as.
    fn language(&self) -> String {
        self.lang
            .clone()
            .or_else(|| {
                self.file
                    .as_ref()
                    .and_then(|p| p.extension())
                    .map(|ext| ext.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "fx".to_string())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Glyphpad v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };

    let source = match &args.file {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            bytes
        }
    };

    let language = args.language();
    let colorizer = Colorizer::for_language(&language)
        .with_context(|| format!("Cannot highlight {}", language))?
        .with_batch_lines(args.batch_lines);

    let mut editor = Editor::with_config(config.editor).with_colorizer(colorizer);
    editor.set_bytes(&source);

    let mut batches = 0;
    while let Some(batch) = editor.colorize() {
        tracing::debug!(begin = batch.start, end = batch.end, "batch done");
        batches += 1;
    }
    tracing::info!(lines = editor.buffer().line_count(), batches, "colorized");

    let output = if args.dump {
        render::class_dump(editor.buffer())
    } else {
        render::highlighted(editor.buffer(), editor.tab_size())
    };
    print!("{}", output);

    Ok(())
}
