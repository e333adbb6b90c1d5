//! Error types for RDF consolidation

use std::path::PathBuf;
use thiserror::Error;

use crate::format::RdfSyntax;

#[derive(Error, Debug)]
pub enum ConsolidateError {
    #[error("No RDF files found in {}", .0.display())]
    NoRdfFiles(PathBuf),

    #[error("Failed parsing {} as {format}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        format: RdfSyntax,
        reason: String,
    },

    #[error("Failed serializing dataset as {format}: {reason}")]
    Serialize { format: RdfSyntax, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
