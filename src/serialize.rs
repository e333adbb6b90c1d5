//! Serialization of the merged dataset and output file writing

use std::fs;
use std::path::Path;

use oxrdf::{Dataset, QuadRef};
use oxrdfio::RdfSerializer;
use serde_json::Value;
use tracing::debug;

use crate::error::ConsolidateError;
use crate::format::RdfSyntax;

fn serialize_dataset(dataset: &Dataset, syntax: RdfSyntax) -> Result<Vec<u8>, ConsolidateError> {
    let serialize_error = |e: std::io::Error| ConsolidateError::Serialize {
        format: syntax,
        reason: e.to_string(),
    };

    // Default graph first, then each named graph, with the quads of a subject
    // and predicate kept together so the JSON-LD serializer emits one node
    // object per subject and graph
    let mut quads: Vec<QuadRef<'_>> = dataset.iter().collect();
    quads.sort_by_cached_key(|quad| {
        (
            !quad.graph_name.is_default_graph(),
            quad.graph_name.to_string(),
            quad.subject.to_string(),
            quad.predicate.as_str().to_owned(),
        )
    });

    let mut serializer = RdfSerializer::from_format(syntax.to_rdf_format()).for_writer(Vec::new());
    for quad in quads {
        serializer.serialize_quad(quad).map_err(serialize_error)?;
    }
    serializer.finish().map_err(serialize_error)
}

/// Serialize the dataset as a JSON-LD document
///
/// Each subject of a graph becomes a single node object. With `pretty`, the
/// document is re-indented with two spaces; key order is kept as written by
/// the serializer.
pub fn to_jsonld_string(dataset: &Dataset, pretty: bool) -> Result<String, ConsolidateError> {
    let bytes = serialize_dataset(dataset, RdfSyntax::JsonLd)?;
    let doc: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Array(Vec::new())
    } else {
        serde_json::from_slice(&bytes)?
    };

    if pretty {
        Ok(serde_json::to_string_pretty(&doc)?)
    } else {
        Ok(serde_json::to_string(&doc)?)
    }
}

/// Serialize the dataset as N-Quads, one statement per line
pub fn to_nquads_string(dataset: &Dataset) -> Result<String, ConsolidateError> {
    let bytes = serialize_dataset(dataset, RdfSyntax::NQuads)?;
    String::from_utf8(bytes).map_err(|e| ConsolidateError::Serialize {
        format: RdfSyntax::NQuads,
        reason: e.to_string(),
    })
}

/// Write `content` to `path`, creating the parent directory if missing
pub fn write_output(path: &Path, content: &str) -> Result<(), ConsolidateError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "wrote output");
    Ok(())
}
