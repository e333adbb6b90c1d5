//! Search documents extracted from the merged dataset
//!
//! Every subject IRI becomes one [`OntologyDocument`]: an element type
//! inferred from its OWL `rdf:type`, a display label, alternative labels,
//! a namespace, and the textual annotations a search index needs.
//! Only literal values are read; IRIs in annotation position are ignored.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Dataset, TermRef};
use serde::Serialize;

use crate::error::ConsolidateError;

const OWL: &str = "http://www.w3.org/2002/07/owl#";

const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
const SKOS_ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";
const SKOS_DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";
const SKOS_EXAMPLE: &str = "http://www.w3.org/2004/02/skos/core#example";
const SKOS_NOTE: &str = "http://www.w3.org/2004/02/skos/core#note";
const IAO_DEFINITION: &str = "http://purl.obolibrary.org/obo/IAO_0000115";
const DCTERMS_CITATION: &str = "http://purl.org/dc/terms/bibliographicCitation";

/// Kind of ontology element, from the most to the least specific
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementType {
    Ontology,
    Class,
    ObjectProperty,
    DatatypeProperty,
    AnnotationProperty,
    NamedIndividual,
    Other,
}

impl ElementType {
    /// Checked in this order; the first match wins
    const PRECEDENCE: [ElementType; 6] = [
        ElementType::Ontology,
        ElementType::Class,
        ElementType::ObjectProperty,
        ElementType::DatatypeProperty,
        ElementType::AnnotationProperty,
        ElementType::NamedIndividual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Ontology => "Ontology",
            ElementType::Class => "Class",
            ElementType::ObjectProperty => "ObjectProperty",
            ElementType::DatatypeProperty => "DatatypeProperty",
            ElementType::AnnotationProperty => "AnnotationProperty",
            ElementType::NamedIndividual => "NamedIndividual",
            ElementType::Other => "Other",
        }
    }

    fn matches(self, type_iri: &str) -> bool {
        let local = self.as_str();
        type_iri
            .strip_prefix(OWL)
            .or_else(|| type_iri.strip_prefix("owl:"))
            .is_some_and(|name| name == local)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A searchable card describing one ontology element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologyDocument {
    pub iri: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// First preferred label, else first label, else the IRI
    pub label: String,
    pub alt_labels: Vec<String>,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    /// Values of `skos:note`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clarifications: Vec<String>,
}

/// Infer the element type from `rdf:type` IRIs (full or `owl:` prefixed)
pub fn infer_element_type<'a>(types: impl IntoIterator<Item = &'a str>) -> ElementType {
    let types: Vec<&str> = types.into_iter().collect();
    ElementType::PRECEDENCE
        .into_iter()
        .find(|candidate| types.iter().any(|t| candidate.matches(t)))
        .unwrap_or(ElementType::Other)
}

/// Namespace of an IRI: up to the last `#`, else up to the last `/`
///
/// The separator is kept. An IRI with neither is its own namespace.
pub fn compute_namespace(iri: &str) -> &str {
    match iri.rfind('#').or_else(|| iri.rfind('/')) {
        Some(index) => &iri[..=index],
        None => iri,
    }
}

#[derive(Default)]
struct SubjectValues<'a> {
    types: Vec<&'a str>,
    literals: HashMap<&'a str, Vec<&'a str>>,
}

impl SubjectValues<'_> {
    /// Literal values of the given predicates, sorted and deduplicated per predicate
    fn strings(&self, predicates: &[&str]) -> Vec<String> {
        let mut out = Vec::new();
        for predicate in predicates {
            if let Some(values) = self.literals.get(predicate) {
                let mut values = values.clone();
                values.sort_unstable();
                values.dedup();
                out.extend(values.into_iter().map(str::to_owned));
            }
        }
        out
    }
}

fn to_document(iri: &str, values: &SubjectValues<'_>) -> OntologyDocument {
    let pref_labels = values.strings(&[SKOS_PREF_LABEL]);
    let labels = values.strings(&[rdfs::LABEL.as_str()]);
    let label = pref_labels
        .first()
        .or_else(|| labels.first())
        .map_or_else(|| iri.to_owned(), String::clone);

    let mut alt_labels = values.strings(&[SKOS_ALT_LABEL]);
    alt_labels.extend(labels.iter().skip(1).cloned());
    alt_labels.extend(pref_labels.iter().skip(1).cloned());

    OntologyDocument {
        iri: iri.to_owned(),
        element_type: infer_element_type(values.types.iter().copied()),
        label,
        alt_labels,
        namespace: compute_namespace(iri).to_owned(),
        definition: values
            .strings(&[SKOS_DEFINITION, IAO_DEFINITION])
            .into_iter()
            .next(),
        citations: values.strings(&[DCTERMS_CITATION, rdfs::SEE_ALSO.as_str()]),
        examples: values.strings(&[SKOS_EXAMPLE]),
        clarifications: values.strings(&[SKOS_NOTE]),
    }
}

/// Build one document per `http` subject IRI, sorted by IRI
///
/// Statements about a subject are gathered across all graphs. Blank node
/// subjects and other IRI schemes are skipped.
pub fn extract_documents(dataset: &Dataset) -> Vec<OntologyDocument> {
    let mut subjects: BTreeMap<&str, SubjectValues<'_>> = BTreeMap::new();
    for quad in dataset {
        let TermRef::NamedNode(subject) = TermRef::from(quad.subject) else {
            continue;
        };
        if !subject.as_str().starts_with("http") {
            continue;
        }
        let values = subjects.entry(subject.as_str()).or_default();
        match quad.object {
            TermRef::NamedNode(object) if quad.predicate == rdf::TYPE => {
                values.types.push(object.as_str());
            }
            TermRef::Literal(literal) => {
                values
                    .literals
                    .entry(quad.predicate.as_str())
                    .or_default()
                    .push(literal.value());
            }
            _ => {}
        }
    }

    subjects
        .iter()
        .map(|(iri, values)| to_document(iri, values))
        .collect()
}

/// Serialize documents as a JSON array
pub fn to_documents_string(
    documents: &[OntologyDocument],
    pretty: bool,
) -> Result<String, ConsolidateError> {
    if pretty {
        Ok(serde_json::to_string_pretty(documents)?)
    } else {
        Ok(serde_json::to_string(documents)?)
    }
}

/// Index documents by IRI
pub fn map_by_iri(documents: &[OntologyDocument]) -> HashMap<&str, &OntologyDocument> {
    documents
        .iter()
        .map(|document| (document.iri.as_str(), document))
        .collect()
}
