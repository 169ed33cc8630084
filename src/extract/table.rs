//! Category Maxima Table
//!
//! One `CategoryBest` per known category. Entries only ever move to a
//! strictly higher parent count, so the first record reaching a given count
//! keeps its place.

use std::fmt;

/// The closed set of ontology namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    BiologicalProcess,
    MolecularFunction,
    CellularComponent,
}

impl Category {
    /// All categories, in report order
    pub const ALL: [Category; 3] = [
        Category::BiologicalProcess,
        Category::MolecularFunction,
        Category::CellularComponent,
    ];

    /// The namespace text identifying this category
    pub fn as_str(self) -> &'static str {
        match self {
            Category::BiologicalProcess => "biological_process",
            Category::MolecularFunction => "molecular_function",
            Category::CellularComponent => "cellular_component",
        }
    }

    /// Exact (already trimmed) namespace lookup
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best record seen so far for one category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBest {
    pub name: String,
    pub identifier: String,
    pub parent_count: u32,
}

impl CategoryBest {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>, parent_count: u32) -> Self {
        CategoryBest {
            name: name.into(),
            identifier: identifier.into(),
            parent_count,
        }
    }
}

/// Per-category maxima, all starting at `("", "", 0)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaximaTable {
    entries: [CategoryBest; 3],
}

impl MaximaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a candidate under a namespace key
    ///
    /// Keys outside the known categories are ignored. Returns whether the
    /// stored entry changed.
    pub fn update(&mut self, category: &str, candidate: CategoryBest) -> bool {
        match Category::from_key(category) {
            Some(category) => self.fold(category, candidate),
            None => false,
        }
    }

    /// Replace the entry for `category` if `candidate` has strictly more parents
    pub fn fold(&mut self, category: Category, candidate: CategoryBest) -> bool {
        let slot = &mut self.entries[category.index()];
        if candidate.parent_count > slot.parent_count {
            *slot = candidate;
            true
        } else {
            false
        }
    }

    pub fn get(&self, category: Category) -> &CategoryBest {
        &self.entries[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryBest)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}
