//! Extraction configuration
//!
//! Element names the engine reacts to, and the chunk size of the streaming
//! reader. The defaults describe the Gene Ontology OBO-XML dump.

use crate::extract::Field;
use crate::reader::DEFAULT_CHUNK_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Element delimiting one record
    pub record_tag: String,
    /// Element whose occurrences count as parent relations
    pub marker_tag: String,
    pub name_tag: String,
    pub id_tag: String,
    /// Element holding the record's category
    pub namespace_tag: String,
    /// Bytes read per chunk by the streaming strategy
    pub chunk_size: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            record_tag: "term".to_string(),
            marker_tag: "is_a".to_string(),
            name_tag: "name".to_string(),
            id_tag: "id".to_string(),
            namespace_tag: "namespace".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ExtractConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_record_tag(mut self, tag: impl Into<String>) -> Self {
        self.record_tag = tag.into();
        self
    }

    pub fn with_marker_tag(mut self, tag: impl Into<String>) -> Self {
        self.marker_tag = tag.into();
        self
    }

    /// The record field whose text `tag` carries, if any
    pub fn field_for(&self, tag: &str) -> Option<Field> {
        if tag == self.name_tag {
            Some(Field::Name)
        } else if tag == self.id_tag {
            Some(Field::Id)
        } else if tag == self.namespace_tag {
            Some(Field::Namespace)
        } else {
            None
        }
    }

    /// Element name carrying `field`
    pub fn tag_for(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name_tag,
            Field::Id => &self.id_tag,
            Field::Namespace => &self.namespace_tag,
        }
    }
}
