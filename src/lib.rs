//! RDF Consolidation Library
//!
//! This library merges a directory of RDF serializations into a single
//! dataset and writes it out as JSON-LD, and optionally as N-Quads.
//!
//! # Overview
//!
//! A run is a linear pipeline:
//!
//! 1. Recursively collect files whose extension names an RDF syntax
//!    (`.ttl`, `.rdf`, `.owl`, `.nt`, `.nq`, `.trig`, `.jsonld`)
//! 2. Parse each file, in traversal order, into one shared dataset
//! 3. Serialize the merged dataset to JSON-LD (and N-Quads if requested)
//! 4. Optionally extract one search document per ontology element
//!
//! Merging is set union: a statement present in several files appears once.
//! Blank nodes are scoped to the file they were read from. The first file
//! that fails to parse aborts the run before anything is written.
//!
//! # Usage
//!
//! ```ignore
//! use rdf_consolidate::{consolidate, ConsolidateOptions, NoOpReporter};
//!
//! let mut options = ConsolidateOptions::new("ontologies/", "dist/graph.jsonld");
//! options.out_nq = Some("dist/graph.nq".into());
//!
//! let result = consolidate(&options, &mut NoOpReporter)?;
//! println!("{} quads", result.stats.total_quads);
//! ```

pub mod collect;
pub mod consolidate;
pub mod error;
pub mod extract;
pub mod format;
pub mod loader;
pub mod serialize;

// Re-export main types for convenience
pub use crate::collect::{collect_rdf_files, RdfFiles};
pub use crate::consolidate::{
    consolidate, ConsolidateOptions, ConsolidateResult, ConsolidateStats, NoOpReporter, Reporter,
};
pub use crate::error::ConsolidateError;
pub use crate::extract::{
    compute_namespace, extract_documents, infer_element_type, map_by_iri, to_documents_string,
    ElementType, OntologyDocument,
};
pub use crate::format::{is_rdf_file_name, resolve_format, RdfSyntax, EXTENSION_FORMATS};
pub use crate::loader::{build_graph, load_file, LoadedFile, MergedGraph};
pub use crate::serialize::{to_jsonld_string, to_nquads_string, write_output};
