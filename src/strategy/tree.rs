//! Tree Strategy
//!
//! Reads the whole input, builds the full `XmlDocument`, then answers the
//! question with tree queries. Serves as the reference result the streaming
//! engine is checked against, and as the memory-hungry side of the
//! comparison.

use std::fs::File;
use std::path::Path;

use tracing::{debug, info};

use crate::config::ExtractConfig;
use crate::dom::{NodeId, XmlDocument};
use crate::error::Result;
use crate::extract::{Category, CategoryBest, Extraction, Field, MaximaTable, RunStats};
use crate::reader::read_all;

/// Why a term element was skipped by the tree strategy
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermError {
    #[error("term has no <{0}> element")]
    MissingField(&'static str),

    #[error("first child of <{0}> is not text")]
    NotText(&'static str),
}

/// Parse a complete document and extract from its tree
pub fn extract_bytes(input: &[u8], config: &ExtractConfig) -> Result<Extraction> {
    let doc = XmlDocument::parse(input)?;
    info!(
        bytes = input.len(),
        nodes = doc.node_count(),
        text_bytes = doc.text_bytes(),
        "document tree built"
    );
    Ok(extract_document(&doc, config))
}

/// Read all of `path` into memory, then run the tree strategy
pub fn extract_path(path: impl AsRef<Path>, config: &ExtractConfig) -> Result<Extraction> {
    let path = path.as_ref();
    info!(path = %path.display(), "tree pass");
    let input = read_all(File::open(path)?)?;
    extract_bytes(&input, config)
}

/// Fold every well-formed term of an already built tree
pub fn extract_document(doc: &XmlDocument, config: &ExtractConfig) -> Extraction {
    let mut table = MaximaTable::new();
    let mut stats = RunStats::default();

    let terms = doc.elements_by_tag_name(doc.document_id(), &config.record_tag);
    for (index, &term) in terms.iter().enumerate() {
        stats.records_seen += 1;

        let (namespace, candidate) = match read_term(doc, term, config) {
            Ok(found) => found,
            Err(err) => {
                stats.records_rejected += 1;
                debug!(%err, term = index + 1, "term skipped");
                continue;
            }
        };

        if Category::from_key(&namespace).is_none() {
            stats.records_rejected += 1;
            debug!(namespace = %namespace, term = index + 1, "term skipped: unknown namespace");
            continue;
        }
        stats.records_folded += 1;
        if table.update(&namespace, candidate) {
            stats.table_updates += 1;
        }
    }

    info!(
        records = stats.records_seen,
        rejected = stats.records_rejected,
        "tree pass complete"
    );
    Extraction { table, stats }
}

/// Trimmed namespace and candidate for one term
fn read_term(
    doc: &XmlDocument,
    term: NodeId,
    config: &ExtractConfig,
) -> std::result::Result<(String, CategoryBest), TermError> {
    let [namespace, name, identifier] =
        Field::ALL.map(|field| field_text(doc, term, config, field));
    let (namespace, name, identifier) = (namespace?, name?, identifier?);

    let parents = doc.elements_by_tag_name(term, &config.marker_tag).len();
    let parent_count = u32::try_from(parents).unwrap_or(u32::MAX);

    Ok((
        namespace.trim().to_string(),
        CategoryBest::new(name.trim(), identifier.trim(), parent_count),
    ))
}

/// Text of the first child of the first `field` element under `term`
fn field_text<'d>(
    doc: &'d XmlDocument,
    term: NodeId,
    config: &ExtractConfig,
    field: Field,
) -> std::result::Result<&'d str, TermError> {
    let element = doc
        .first_element_by_tag_name(term, config.tag_for(field))
        .ok_or(TermError::MissingField(field.label()))?;
    doc.first_child(element)
        .and_then(|child| doc.node_value(child))
        .ok_or(TermError::NotText(field.label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(xml: &str) -> Extraction {
        extract_bytes(xml.as_bytes(), &ExtractConfig::default()).unwrap()
    }

    #[test]
    fn test_scenario() {
        let extraction = run("<obo>\
            <term><id>GO:1</id><name>spindle</name><namespace>biological_process</namespace>\
              <is_a/><is_a/><is_a/></term>\
            <term><id>GO:2</id><name>wall</name><namespace>cellular_component</namespace>\
              <is_a/><is_a/><is_a/><is_a/><is_a/><is_a/><is_a/></term>\
            </obo>");
        assert_eq!(
            extraction.table.get(Category::BiologicalProcess),
            &CategoryBest::new("spindle", "GO:1", 3)
        );
        assert_eq!(
            extraction.table.get(Category::MolecularFunction),
            &CategoryBest::default()
        );
        assert_eq!(
            extraction.table.get(Category::CellularComponent),
            &CategoryBest::new("wall", "GO:2", 7)
        );
    }

    #[test]
    fn test_missing_field_skipped() {
        let extraction = run("<obo>\
            <term><name>no id</name><namespace>biological_process</namespace><is_a/></term>\
            </obo>");
        assert_eq!(extraction.table, MaximaTable::new());
        assert_eq!(extraction.stats.records_rejected, 1);
    }

    #[test]
    fn test_empty_field_skipped() {
        let extraction = run("<obo>\
            <term><id>GO:1</id><name></name><namespace>molecular_function</namespace><is_a/></term>\
            </obo>");
        assert_eq!(extraction.stats.records_rejected, 1);
        assert_eq!(extraction.stats.records_folded, 0);
    }

    #[test]
    fn test_read_term_errors() {
        let doc = XmlDocument::parse(
            b"<obo><term><id><b>x</b></id><name>n</name><namespace>biological_process</namespace></term></obo>",
        )
        .unwrap();
        let term = doc.first_element_by_tag_name(doc.document_id(), "term").unwrap();
        assert_eq!(
            read_term(&doc, term, &ExtractConfig::default()),
            Err(TermError::NotText("id"))
        );

        let doc = XmlDocument::parse(b"<obo><term><id>GO:1</id></term></obo>").unwrap();
        let term = doc.first_element_by_tag_name(doc.document_id(), "term").unwrap();
        assert_eq!(
            read_term(&doc, term, &ExtractConfig::default()),
            Err(TermError::MissingField("namespace"))
        );
    }

    #[test]
    fn test_values_trimmed_and_unknown_namespace_ignored() {
        let extraction = run("<obo>\
            <term><id> GO:1 </id><name>\n binding\n</name><namespace>  molecular_function\n</namespace><is_a/></term>\
            <term><id>GO:2</id><name>old</name><namespace>obsolete</namespace><is_a/><is_a/></term>\
            </obo>");
        assert_eq!(
            extraction.table.get(Category::MolecularFunction),
            &CategoryBest::new("binding", "GO:1", 1)
        );
        assert_eq!(extraction.stats.records_rejected, 1);
    }

    #[test]
    fn test_first_child_stops_at_cdata() {
        let extraction = run("<obo>\
            <term><id>GO:1</id><name>a <![CDATA[b]]> c</name><namespace>biological_process</namespace><is_a/></term>\
            <term><id>GO:2</id><name><![CDATA[whole]]></name><namespace>cellular_component</namespace><is_a/></term>\
            </obo>");
        assert_eq!(extraction.table.get(Category::BiologicalProcess).name, "a");
        assert_eq!(extraction.table.get(Category::CellularComponent).name, "whole");
    }

    #[test]
    fn test_tie_keeps_first() {
        let extraction = run("<obo>\
            <term><id>GO:1</id><name>first</name><namespace>biological_process</namespace><is_a/></term>\
            <term><id>GO:2</id><name>second</name><namespace>biological_process</namespace><is_a/></term>\
            </obo>");
        assert_eq!(extraction.table.get(Category::BiologicalProcess).name, "first");
    }

    #[test]
    fn test_parse_error_propagates() {
        let err = extract_bytes(b"<obo><term>", &ExtractConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("parse failed"));
    }
}
