//! Sorting types for runtime-built queries.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A sort specification consisting of a field name and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Field name to sort by.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// An ordered list of sort fields; earlier fields take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort(pub Vec<SortField>);

impl Sort {
    /// No ordering; storage-default order.
    pub fn unsorted() -> Self {
        Self(Vec::new())
    }

    /// Sort by a single field.
    pub fn by(field: SortField) -> Self {
        Self(vec![field])
    }

    /// Append a tie-breaking field.
    pub fn and(mut self, field: SortField) -> Self {
        self.0.push(field);
        self
    }

    /// Whether any ordering was requested.
    pub fn is_unsorted(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the sort fields in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &SortField> {
        self.0.iter()
    }
}
