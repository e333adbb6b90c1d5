//! Format resolution for RDF input files
//!
//! Maps lowercase file extensions to the serialization used to parse them.
//! The same table drives both the collector's filter and the resolver, so
//! every collected file resolves to a known syntax.

use std::fmt;
use std::path::Path;

use oxrdfio::RdfFormat;

/// An RDF serialization recognized by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfSyntax {
    Turtle,
    RdfXml,
    NTriples,
    NQuads,
    TriG,
    JsonLd,
}

/// Extension (lowercase, without dot) to syntax. Keys are unique.
pub const EXTENSION_FORMATS: [(&str, RdfSyntax); 7] = [
    ("ttl", RdfSyntax::Turtle),
    ("rdf", RdfSyntax::RdfXml),
    ("owl", RdfSyntax::RdfXml),
    ("nt", RdfSyntax::NTriples),
    ("nq", RdfSyntax::NQuads),
    ("trig", RdfSyntax::TriG),
    ("jsonld", RdfSyntax::JsonLd),
];

/// Syntax used when a path has no recognized extension
pub const FALLBACK_SYNTAX: RdfSyntax = RdfSyntax::Turtle;

impl RdfSyntax {
    /// Short identifier used in progress and error messages
    pub fn name(self) -> &'static str {
        match self {
            RdfSyntax::Turtle => "turtle",
            RdfSyntax::RdfXml => "xml",
            RdfSyntax::NTriples => "nt",
            RdfSyntax::NQuads => "nquads",
            RdfSyntax::TriG => "trig",
            RdfSyntax::JsonLd => "json-ld",
        }
    }

    /// Look up an extension, ignoring case and an optional leading dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        EXTENSION_FORMATS
            .iter()
            .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
            .map(|(_, syntax)| *syntax)
    }

    /// The oxrdfio format used to parse or serialize this syntax
    pub fn to_rdf_format(self) -> RdfFormat {
        match self {
            RdfSyntax::Turtle => RdfFormat::Turtle,
            RdfSyntax::RdfXml => RdfFormat::RdfXml,
            RdfSyntax::NTriples => RdfFormat::NTriples,
            RdfSyntax::NQuads => RdfFormat::NQuads,
            RdfSyntax::TriG => RdfFormat::TriG,
            RdfSyntax::JsonLd => RdfFormat::JsonLd {
                profile: Default::default(),
            },
        }
    }
}

impl fmt::Display for RdfSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn syntax_for_path(path: &Path) -> Option<RdfSyntax> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(RdfSyntax::from_extension)
}

/// Resolve the syntax for a path, falling back to Turtle
///
/// Never fails: paths without an extension, with a non UTF-8 extension or
/// with an unknown one all resolve to [`FALLBACK_SYNTAX`].
pub fn resolve_format(path: &Path) -> RdfSyntax {
    syntax_for_path(path).unwrap_or(FALLBACK_SYNTAX)
}

/// Check if a path carries one of the recognized RDF extensions
pub fn is_rdf_file_name(path: &Path) -> bool {
    syntax_for_path(path).is_some()
}
