//! RDF Consolidation CLI
//!
//! Command-line tool merging a folder of RDF files into one JSON-LD dataset.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rdf_consolidate::{
    consolidate, ConsolidateError, ConsolidateOptions, ConsolidateStats, LoadedFile, Reporter,
};

#[derive(Parser)]
#[command(name = "rdf-consolidate")]
#[command(about = "Merge a folder of RDF files into a single JSON-LD dataset")]
#[command(version)]
struct Cli {
    /// Folder scanned recursively for .ttl, .rdf, .owl, .nt, .nq, .trig and .jsonld files
    #[arg(long, value_name = "PATH")]
    input_folder: PathBuf,

    /// Output file for the merged JSON-LD
    #[arg(long, value_name = "PATH")]
    out_jsonld: PathBuf,

    /// Optional N-Quads output for faster parsing downstream
    #[arg(long, value_name = "PATH")]
    out_nq: Option<PathBuf>,

    /// Optional JSON index with one search document per ontology element
    #[arg(long, value_name = "PATH")]
    out_docs: Option<PathBuf>,

    /// Write JSON-LD on a single line instead of indenting it
    #[arg(long)]
    compact: bool,
}

/// Prints one line per loaded file and per written output
struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn loaded(&mut self, file: &LoadedFile) {
        println!("Loaded {} ({})", file.path.display(), file.format);
    }

    fn wrote(&mut self, path: &Path) {
        println!("Wrote {}", path.display());
    }
}

fn print_summary(stats: &ConsolidateStats) {
    eprintln!(
        "Consolidated {} files, {} quads ({} duplicates merged, {} named graphs)",
        stats.files_loaded, stats.total_quads, stats.duplicate_quads, stats.named_graphs
    );
}

fn run(cli: Cli) -> Result<(), ConsolidateError> {
    let options = ConsolidateOptions {
        input_folder: cli.input_folder,
        out_jsonld: cli.out_jsonld,
        out_nq: cli.out_nq,
        out_docs: cli.out_docs,
        pretty: !cli.compact,
    };

    let result = consolidate(&options, &mut StdoutReporter)?;
    print_summary(&result.stats);
    Ok(())
}

fn main() {
    // Logs go to stderr; stdout carries the progress lines. Override with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
