//! Writetable - editable HTML tables with single-row edit mode
//!
//! A table's rows are static text until one is selected; the selected row
//! switches into edit mode and renders an input per editable column. At
//! most one row edits at a time. New rows start as drafts that vanish
//! again if focus moves away before anything was typed into them.
//!
//! # Example
//!
//! ```rust
//! use writetable::prelude::*;
//!
//! let config = TableOptions::from_metadata(
//!     "{tableName:'players', autoAddRow:false, columns:[{name:'name'}, {name:'total'}]}",
//! )
//! .unwrap()
//! .normalize()
//! .unwrap();
//!
//! let mut table = EditController::builder(config)
//!     .static_row(["Anvil", "$8429.90"])
//!     .build();
//! assert_eq!(table.editing_row(), None);
//!
//! let first = table.rows()[0].id();
//! table.select_row(first).unwrap();
//! assert!(table.is_editing(first));
//!
//! let draft = table.add_row().added().unwrap();
//! assert_eq!(table.editing_row(), Some(draft));
//!
//! // The untouched draft is discarded once another row is selected
//! table.select_row(first).unwrap();
//! assert_eq!(table.len(), 1);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod render;

/// WASM module - always available for testing
/// (Mock DOM allows testing without actual browser bindings)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        format_money, AddRowOutcome, AddRowRejection, ColumnDef, ColumnType, Command,
        EditController, ObserverEvent, RecordingObserver, Row, RowId, RowOrigin, TableConfig,
        TableError, TableObserver, TableOptions, TableResult, TotalRule,
    };
    pub use crate::driver::{ControllerDriver, TableDriver};
    pub use crate::render::{body_html, RowRenderer};

    #[cfg(feature = "wasm")]
    pub use crate::wasm::BrowserTable;

    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver, WritableTable};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let config = TableOptions::new("t")
            .with_columns(vec![ColumnDef::new("a"), ColumnDef::new("b")])
            .normalize()
            .unwrap();
        let table = EditController::new(config);
        assert_eq!(table.len(), 1);
        assert_eq!(table.editable_count(), 1);
    }

    #[test]
    fn test_metadata_and_explicit_paths_agree() {
        let from_metadata = TableOptions::from_metadata(
            "{tableName:'players', enableAddRow:true, autoAddRow:false, \
             columns:[{name:'name', type:'text'}, {name:'total', editable:false}]}",
        )
        .unwrap()
        .normalize()
        .unwrap();
        let explicit = TableOptions::new("players")
            .enable_add_row(true)
            .auto_add_row(false)
            .with_columns(vec![ColumnDef::new("name"), ColumnDef::new("total").read_only()])
            .normalize()
            .unwrap();
        assert_eq!(from_metadata, explicit);
    }

    #[test]
    fn test_rejected_add_row_is_observable() {
        let config = TableOptions::new("t")
            .enable_add_row(false)
            .auto_add_row(false)
            .with_columns(vec![ColumnDef::new("a"), ColumnDef::new("b")])
            .normalize()
            .unwrap();
        let observer = RecordingObserver::new();
        let mut table = EditController::builder(config)
            .observer(observer.clone())
            .build();
        assert_eq!(
            table.add_row(),
            AddRowOutcome::Rejected(AddRowRejection::Disabled)
        );
        assert_eq!(observer.rejections(), vec![AddRowRejection::Disabled]);
    }

    #[test]
    fn test_error_display() {
        let err = TableError::UnknownCommand("dance".into());
        assert!(err.to_string().contains("dance"));
        assert_eq!(format_money(12.5), "$12.50");
    }
}
