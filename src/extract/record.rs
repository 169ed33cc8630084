//! Term Accumulator
//!
//! Scratch state for the record currently being read. Fields are built by
//! concatenation because one text value may arrive in several pieces.

use super::table::{Category, CategoryBest};

/// Record fields that collect text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Id,
    Namespace,
}

impl Field {
    /// Order in which the tree strategy reads fields
    pub const ALL: [Field; 3] = [Field::Namespace, Field::Name, Field::Id];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Id => "id",
            Field::Namespace => "namespace",
        }
    }
}

/// Why a finished record cannot be folded into the table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record has no namespace")]
    EmptyCategory,

    #[error("unknown namespace {0:?}")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermAccumulator {
    name: String,
    identifier: String,
    namespace: String,
    parent_count: u32,
}

impl TermAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all fields; string capacity is kept for the next record
    pub fn reset(&mut self) {
        self.name.clear();
        self.identifier.clear();
        self.namespace.clear();
        self.parent_count = 0;
    }

    pub fn append(&mut self, field: Field, text: &str) {
        let target = match field {
            Field::Name => &mut self.name,
            Field::Id => &mut self.identifier,
            Field::Namespace => &mut self.namespace,
        };
        target.push_str(text);
    }

    pub fn count_parent(&mut self) {
        self.parent_count = self.parent_count.saturating_add(1);
    }

    pub fn parent_count(&self) -> u32 {
        self.parent_count
    }

    /// Raw (untrimmed) text collected for `field`
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Id => &self.identifier,
            Field::Namespace => &self.namespace,
        }
    }

    /// Trim the collected fields and resolve the category
    ///
    /// Missing name or id is not an error; the candidate carries empty
    /// strings for them.
    pub fn candidate(&self) -> Result<(Category, CategoryBest), RecordError> {
        let namespace = self.namespace.trim();
        if namespace.is_empty() {
            return Err(RecordError::EmptyCategory);
        }
        let category = Category::from_key(namespace)
            .ok_or_else(|| RecordError::UnknownCategory(namespace.to_string()))?;

        Ok((
            category,
            CategoryBest::new(self.name.trim(), self.identifier.trim(), self.parent_count),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_concatenates() {
        let mut record = TermAccumulator::new();
        record.append(Field::Name, "Al");
        record.append(Field::Name, "pha");
        record.append(Field::Name, " Process");
        assert_eq!(record.field(Field::Name), "Alpha Process");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut record = TermAccumulator::new();
        record.append(Field::Id, "GO:0000001");
        record.append(Field::Namespace, "biological_process");
        record.count_parent();
        record.reset();
        assert_eq!(record, TermAccumulator::new());
    }

    #[test]
    fn test_candidate_trims() {
        let mut record = TermAccumulator::new();
        record.append(Field::Namespace, "  molecular_function\n");
        record.append(Field::Name, "\n  kinase activity ");
        record.append(Field::Id, " GO:0016301");
        record.count_parent();
        record.count_parent();

        let (category, best) = record.candidate().unwrap();
        assert_eq!(category, Category::MolecularFunction);
        assert_eq!(best, CategoryBest::new("kinase activity", "GO:0016301", 2));
    }

    #[test]
    fn test_candidate_without_name_or_id() {
        let mut record = TermAccumulator::new();
        record.append(Field::Namespace, "cellular_component");
        record.count_parent();

        let (_, best) = record.candidate().unwrap();
        assert_eq!(best, CategoryBest::new("", "", 1));
    }

    #[test]
    fn test_candidate_errors() {
        let mut record = TermAccumulator::new();
        assert_eq!(record.candidate(), Err(RecordError::EmptyCategory));

        record.append(Field::Namespace, " obsolete ");
        assert_eq!(
            record.candidate(),
            Err(RecordError::UnknownCategory("obsolete".to_string()))
        );
    }
}
