//! Main consolidation logic
//!
//! Linear pipeline: collect the input files, merge them into one dataset,
//! then write JSON-LD, optionally N-Quads and a search document index.
//! Any error aborts the run.

use std::path::{Path, PathBuf};

use oxrdf::Dataset;
use tracing::{debug, info};

use crate::collect::collect_rdf_files;
use crate::error::ConsolidateError;
use crate::extract::{extract_documents, to_documents_string};
use crate::loader::{build_graph, LoadedFile};
use crate::serialize::{to_jsonld_string, to_nquads_string, write_output};

/// Options for a consolidation run
#[derive(Debug, Clone)]
pub struct ConsolidateOptions {
    /// Root directory scanned for RDF files
    pub input_folder: PathBuf,
    /// Destination of the merged JSON-LD document
    pub out_jsonld: PathBuf,
    /// Destination of the merged N-Quads, skipped when `None`
    pub out_nq: Option<PathBuf>,
    /// Destination of the search document index, skipped when `None`
    pub out_docs: Option<PathBuf>,
    /// Indent the JSON outputs
    pub pretty: bool,
}

impl ConsolidateOptions {
    pub fn new(input_folder: impl Into<PathBuf>, out_jsonld: impl Into<PathBuf>) -> Self {
        Self {
            input_folder: input_folder.into(),
            out_jsonld: out_jsonld.into(),
            out_nq: None,
            out_docs: None,
            pretty: true,
        }
    }
}

/// Receives progress notifications during consolidation
pub trait Reporter {
    /// Called once per file, after it was merged into the dataset
    fn loaded(&mut self, file: &LoadedFile);

    /// Called once per output file, after it was written
    fn wrote(&mut self, path: &Path);
}

/// A reporter that discards all notifications
pub struct NoOpReporter;

impl Reporter for NoOpReporter {
    fn loaded(&mut self, _file: &LoadedFile) {}

    fn wrote(&mut self, _path: &Path) {}
}

/// Result of consolidation
#[derive(Debug)]
pub struct ConsolidateResult {
    /// The merged dataset
    pub dataset: Dataset,
    /// Files written, in write order
    pub written: Vec<PathBuf>,
    /// Statistics about the run
    pub stats: ConsolidateStats,
}

/// Statistics from consolidation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConsolidateStats {
    /// Number of input files loaded
    pub files_loaded: usize,
    /// Quads read over all files, duplicates included
    pub parsed_quads: usize,
    /// Quads in the merged dataset
    pub total_quads: usize,
    /// Parsed quads collapsed by set union
    pub duplicate_quads: usize,
    /// Distinct named graphs in the merged dataset
    pub named_graphs: usize,
}

/// Run the whole pipeline
pub fn consolidate(
    options: &ConsolidateOptions,
    reporter: &mut dyn Reporter,
) -> Result<ConsolidateResult, ConsolidateError> {
    let files: Vec<PathBuf> = collect_rdf_files(&options.input_folder).collect();
    if files.is_empty() {
        return Err(ConsolidateError::NoRdfFiles(options.input_folder.clone()));
    }

    let merged = build_graph(&files, reporter)?;

    let stats = ConsolidateStats {
        files_loaded: merged.loaded.len(),
        parsed_quads: merged.parsed_quads(),
        total_quads: merged.dataset.len(),
        duplicate_quads: merged.parsed_quads().saturating_sub(merged.dataset.len()),
        named_graphs: merged.named_graph_count(),
    };

    let mut written = Vec::new();

    let jsonld = to_jsonld_string(&merged.dataset, options.pretty)?;
    write_output(&options.out_jsonld, &jsonld)?;
    reporter.wrote(&options.out_jsonld);
    written.push(options.out_jsonld.clone());

    if let Some(out_nq) = &options.out_nq {
        let nquads = to_nquads_string(&merged.dataset)?;
        write_output(out_nq, &nquads)?;
        reporter.wrote(out_nq);
        written.push(out_nq.clone());
    }

    if let Some(out_docs) = &options.out_docs {
        let documents = extract_documents(&merged.dataset);
        debug!(documents = documents.len(), "extracted search documents");
        write_output(out_docs, &to_documents_string(&documents, options.pretty)?)?;
        reporter.wrote(out_docs);
        written.push(out_docs.clone());
    }

    info!(
        files = stats.files_loaded,
        quads = stats.total_quads,
        duplicates = stats.duplicate_quads,
        named_graphs = stats.named_graphs,
        "consolidated dataset"
    );

    Ok(ConsolidateResult {
        dataset: merged.dataset,
        written,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::RdfSyntax;
    use oxrdfio::RdfParser;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    #[derive(Default)]
    struct RecordingReporter {
        loaded: Vec<String>,
        wrote: Vec<PathBuf>,
    }

    impl Reporter for RecordingReporter {
        fn loaded(&mut self, file: &LoadedFile) {
            self.loaded.push(format!("{} ({})", file.path.display(), file.format));
        }

        fn wrote(&mut self, path: &Path) {
            self.wrote.push(path.to_path_buf());
        }
    }

    const TURTLE: &str = r#"
        @prefix ex: <http://example.com/> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        ex:Dog a rdfs:Class ; rdfs:label "Dog"@en .
    "#;

    const RDF_XML: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#">
  <rdf:Description rdf:about="http://example.com/Cat">
    <rdfs:label xml:lang="en">Cat</rdfs:label>
  </rdf:Description>
</rdf:RDF>
"#;

    const NQUADS: &str = "<http://example.com/Dog> <http://example.com/sound> \"woof\" <http://example.com/g> .\n";

    const JSONLD: &str = r#"{
  "@id": "http://example.com/Bird",
  "http://www.w3.org/2000/01/rdf-schema#label": "Bird"
}"#;

    fn input_folder() -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("dog.ttl"), TURTLE).unwrap();
        fs::create_dir_all(dir.path().join("more")).unwrap();
        fs::write(dir.path().join("more/cat.RDF"), RDF_XML).unwrap();
        fs::write(dir.path().join("more/sounds.nq"), NQUADS).unwrap();
        fs::write(dir.path().join("bird.jsonld"), JSONLD).unwrap();
        fs::write(dir.path().join("notes.txt"), "not rdf at all").unwrap();
        dir
    }

    #[test]
    fn test_consolidate_merges_all_formats() {
        let input = input_folder();
        let output = tempdir().unwrap();
        let mut options =
            ConsolidateOptions::new(input.path(), output.path().join("out/all.jsonld"));
        options.out_nq = Some(output.path().join("out/all.nq"));

        let mut reporter = RecordingReporter::default();
        let result = consolidate(&options, &mut reporter).unwrap();

        assert_eq!(result.stats.files_loaded, 4);
        assert_eq!(result.stats.total_quads, 5);
        assert_eq!(result.stats.duplicate_quads, 0);
        assert_eq!(result.stats.named_graphs, 1);
        assert_eq!(reporter.loaded.len(), 4);
        assert!(reporter.loaded.iter().any(|l| l.ends_with("cat.RDF (xml)")));
        assert_eq!(reporter.wrote, result.written);
        assert_eq!(result.written.len(), 2);

        let jsonld = fs::read(&options.out_jsonld).unwrap();
        let from_jsonld: Dataset = RdfParser::from_format(RdfSyntax::JsonLd.to_rdf_format())
            .for_slice(&jsonld)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(from_jsonld, result.dataset);

        let nquads = fs::read(options.out_nq.as_ref().unwrap()).unwrap();
        let from_nquads: Dataset = RdfParser::from_format(RdfSyntax::NQuads.to_rdf_format())
            .for_slice(&nquads)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(from_nquads, result.dataset);
    }

    #[test]
    fn test_load_order_does_not_matter() {
        let first = tempdir().unwrap();
        fs::write(first.path().join("a.ttl"), TURTLE).unwrap();
        fs::write(first.path().join("b.nq"), NQUADS).unwrap();

        let second = tempdir().unwrap();
        fs::write(second.path().join("b.ttl"), TURTLE).unwrap();
        fs::write(second.path().join("a.nq"), NQUADS).unwrap();

        let output = tempdir().unwrap();
        let one = consolidate(
            &ConsolidateOptions::new(first.path(), output.path().join("one.jsonld")),
            &mut NoOpReporter,
        )
        .unwrap();
        let two = consolidate(
            &ConsolidateOptions::new(second.path(), output.path().join("two.jsonld")),
            &mut NoOpReporter,
        )
        .unwrap();

        assert_eq!(one.dataset, two.dataset);
    }

    #[test]
    fn test_no_rdf_files() {
        let input = tempdir().unwrap();
        fs::write(input.path().join("readme.md"), "# nothing").unwrap();
        let output = tempdir().unwrap();
        let options = ConsolidateOptions::new(input.path(), output.path().join("out.jsonld"));

        let result = consolidate(&options, &mut NoOpReporter);

        assert!(matches!(result, Err(ConsolidateError::NoRdfFiles(_))));
        assert!(!options.out_jsonld.exists());
    }

    #[test]
    fn test_parse_failure_writes_nothing() {
        let input = input_folder();
        fs::write(input.path().join("more/broken.trig"), "ex:g { ").unwrap();
        let output = tempdir().unwrap();
        let mut options = ConsolidateOptions::new(input.path(), output.path().join("out.jsonld"));
        options.out_nq = Some(output.path().join("out.nq"));

        let result = consolidate(&options, &mut NoOpReporter);

        match result {
            Err(ConsolidateError::Parse { path, format, .. }) => {
                assert!(path.ends_with("more/broken.trig"));
                assert_eq!(format.name(), "trig");
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(!options.out_jsonld.exists());
        assert!(!output.path().join("out.nq").exists());
    }

    #[test]
    fn test_duplicates_within_and_across_files_are_counted() {
        let input = tempdir().unwrap();
        let line = "<http://example.com/a> <http://example.com/p> \"x\" .\n";
        fs::write(input.path().join("twice.nt"), line.repeat(2)).unwrap();
        fs::write(input.path().join("once.nt"), line).unwrap();
        let output = tempdir().unwrap();
        let options = ConsolidateOptions::new(input.path(), output.path().join("out.jsonld"));

        let result = consolidate(&options, &mut NoOpReporter).unwrap();

        assert_eq!(result.stats.parsed_quads, 3);
        assert_eq!(result.stats.total_quads, 1);
        assert_eq!(result.stats.duplicate_quads, 2);
    }

    #[test]
    fn test_document_index_written_last() {
        let input = input_folder();
        let output = tempdir().unwrap();
        let mut options = ConsolidateOptions::new(input.path(), output.path().join("all.jsonld"));
        options.out_docs = Some(output.path().join("index/docs.json"));

        let mut reporter = RecordingReporter::default();
        let result = consolidate(&options, &mut reporter).unwrap();

        assert_eq!(reporter.wrote, result.written);
        assert_eq!(result.written.last(), options.out_docs.as_ref());

        let docs: serde_json::Value =
            serde_json::from_slice(&fs::read(output.path().join("index/docs.json")).unwrap())
                .unwrap();
        let labels: Vec<&str> = docs
            .as_array()
            .unwrap()
            .iter()
            .map(|doc| doc["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, ["Bird", "Cat", "Dog"]);
        assert_eq!(docs[2]["type"], "Other");
    }

    #[test]
    fn test_nquads_skipped_when_not_requested() {
        let input = input_folder();
        let output = tempdir().unwrap();
        let options = ConsolidateOptions::new(input.path(), output.path().join("only.jsonld"));

        let result = consolidate(&options, &mut NoOpReporter).unwrap();

        assert_eq!(result.written, vec![options.out_jsonld.clone()]);
        let entries: Vec<_> = fs::read_dir(output.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
    }
}
