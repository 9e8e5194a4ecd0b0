//! Rows and row identifiers

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable row identifier, never reused within one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    /// Wraps a raw id, as read back from markup
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a row came into the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowOrigin {
    /// Present in the markup before initialization
    Static,
    /// Appended by `autoAddRow` at initialization
    AutoAdded,
    /// Appended by an add-row request
    Added,
}

/// One table row: id, cell values and draft tracking.
///
/// Edit mode is not stored here; the controller owns the single
/// editing-row pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    id: RowId,
    origin: RowOrigin,
    values: HashMap<String, String>,
    untouched_draft: bool,
}

impl Row {
    /// Creates a row from pre-existing values
    #[must_use]
    pub fn with_values(id: RowId, values: HashMap<String, String>) -> Self {
        Self {
            id,
            origin: RowOrigin::Static,
            values,
            untouched_draft: false,
        }
    }

    /// Creates a blank draft row
    #[must_use]
    pub fn draft(id: RowId, origin: RowOrigin) -> Self {
        Self {
            id,
            origin,
            values: HashMap::new(),
            untouched_draft: true,
        }
    }

    /// Row id
    #[must_use]
    pub const fn id(&self) -> RowId {
        self.id
    }

    /// Row origin
    #[must_use]
    pub const fn origin(&self) -> RowOrigin {
        self.origin
    }

    /// Value of a field, empty when never set
    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    /// Records a field edit. The first edit ends draft status, even when the
    /// value is empty.
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) {
        self.untouched_draft = false;
        self.values.insert(field.to_string(), value.into());
    }

    /// Overwrites a computed value without counting as a user edit
    pub(crate) fn set_computed(&mut self, field: &str, value: String) {
        self.values.insert(field.to_string(), value);
    }

    /// True while the row was added blank and has never been edited
    #[must_use]
    pub const fn is_untouched_draft(&self) -> bool {
        self.untouched_draft
    }

    /// True when any field holds a non-blank value
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.values.values().any(|v| !v.trim().is_empty())
    }

    /// Serializable view of this row
    #[must_use]
    pub fn snapshot(&self, editing: bool) -> RowSnapshot {
        RowSnapshot {
            id: self.id,
            origin: self.origin,
            editing,
            values: self
                .values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Serializable row record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    /// Row id
    pub id: RowId,
    /// Row origin
    pub origin: RowOrigin,
    /// Whether the row was in edit mode
    pub editing: bool,
    /// Field values by name
    pub values: BTreeMap<String, String>,
}
