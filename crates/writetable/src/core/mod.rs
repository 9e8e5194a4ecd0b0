//! Core table model with the row edit-mode state machine
//!
//! Everything in here is platform independent: the DOM binding in
//! [`crate::wasm`] and the browser bindings only translate events into
//! controller calls and controller state into markup.

pub mod column;
pub mod config;
pub mod controller;
pub mod literal;
mod money;
pub mod observer;
pub mod row;

pub use column::{ColumnDef, ColumnType};
pub use config::{TableConfig, TableOptions, TotalRule};
pub use controller::{AddRowOutcome, Command, ControllerBuilder, EditController};
pub use money::{format_money, parse_amount};
pub use observer::{AddRowRejection, ObserverEvent, RecordingObserver, TableObserver};
pub use row::{Row, RowId, RowOrigin, RowSnapshot};

use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised by configuration, controller and DOM binding.
///
/// Redundant requests (disabled add-row, a second draft, re-selecting the
/// editing row) are not errors; they are absorbed and reported through
/// [`AddRowOutcome`] and [`TableObserver`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Metadata literal could not be parsed
    #[error("Invalid metadata at offset {position}: {message}")]
    InvalidMetadata {
        /// Byte offset into the literal
        position: usize,
        /// What went wrong
        message: String,
    },

    /// Options did not match the expected shape
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),

    /// No table name was given by options or metadata
    #[error("Table name is required")]
    MissingTableName,

    /// Column list is empty
    #[error("Table needs at least one column")]
    NoColumns,

    /// Two columns share a field name
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// Row id does not belong to this table
    #[error("Unknown row {0}")]
    UnknownRow(RowId),

    /// Field name does not match any column
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// Column cannot be edited
    #[error("Column '{0}' is not editable")]
    ReadOnlyColumn(String),

    /// Edit targeted a row that is not in edit mode
    #[error("Row {0} is not in edit mode")]
    RowNotEditing(RowId),

    /// Removal of the editing row while it holds entered data
    #[error("Row {0} is being edited and holds data")]
    RowLocked(RowId),

    /// Command verb is not recognised
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// Markup element is missing
    #[error("Element '{0}' not found")]
    ElementNotFound(String),
}
