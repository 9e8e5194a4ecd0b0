//! Unified table driver
//!
//! The same interaction scenarios run against the bare controller and
//! against the DOM-backed widget, so rendered markup and controller state
//! are held to identical expectations.

use crate::core::{EditController, RowId, TableError, TableResult};

/// Abstract driver for table interactions
pub trait TableDriver {
    /// Row ids in display order
    fn row_ids(&self) -> Vec<RowId>;

    /// Rows currently shown in edit mode
    fn editing_rows(&self) -> Vec<RowId>;

    /// Clicks a row; ids with no row in the table are `UnknownRow` errors
    fn click_row(&mut self, id: RowId) -> TableResult<()>;

    /// Issues the `addRow` command
    fn add_row(&mut self) -> TableResult<()>;

    /// Types a value into a cell of the editing row
    fn type_into(&mut self, id: RowId, field: &str, value: &str) -> TableResult<()>;

    /// Displayed text of a cell
    fn cell_text(&self, id: RowId, field: &str) -> Option<String>;

    /// Number of rows
    fn row_count(&self) -> usize {
        self.row_ids().len()
    }
}

/// Driver operating directly on an [`EditController`]
#[derive(Debug)]
pub struct ControllerDriver {
    controller: EditController,
}

impl ControllerDriver {
    /// Wraps a controller
    #[must_use]
    pub fn new(controller: EditController) -> Self {
        Self { controller }
    }

    /// The wrapped controller
    #[must_use]
    pub fn controller(&self) -> &EditController {
        &self.controller
    }
}

impl TableDriver for ControllerDriver {
    fn row_ids(&self) -> Vec<RowId> {
        self.controller.rows().iter().map(|row| row.id()).collect()
    }

    fn editing_rows(&self) -> Vec<RowId> {
        self.controller.editing_row().into_iter().collect()
    }

    fn click_row(&mut self, id: RowId) -> TableResult<()> {
        self.controller.select_row(id).map(|_| ())
    }

    fn add_row(&mut self) -> TableResult<()> {
        self.controller.invoke("addRow")
    }

    fn type_into(&mut self, id: RowId, field: &str, value: &str) -> TableResult<()> {
        self.controller.edit_cell(id, field, value)
    }

    fn cell_text(&self, id: RowId, field: &str) -> Option<String> {
        self.controller
            .row(id)
            .map(|row| row.value(field).to_string())
    }
}

// ===== Unified Test Scenarios =====
// Each expects a table with exactly two static rows, `autoAddRow` off and
// `enableAddRow` on, whose last column is `total`.

/// Clicking rows moves edit mode; exactly one row edits at a time
pub fn verify_row_selection<D: TableDriver>(driver: &mut D) {
    let ids = driver.row_ids();
    assert_eq!(ids.len(), 2, "fixture should start with two rows");
    assert!(driver.editing_rows().is_empty());

    let (first, second) = (ids[0], ids[1]);
    let first_total = driver.cell_text(first, "total");

    driver.click_row(first).unwrap();
    assert_eq!(driver.editing_rows(), vec![first]);
    assert_eq!(driver.cell_text(first, "total"), first_total);

    driver.click_row(second).unwrap();
    assert_eq!(driver.editing_rows(), vec![second]);

    driver.click_row(first).unwrap();
    assert_eq!(driver.editing_rows(), vec![first]);

    // Clicking the editing row again changes nothing
    driver.click_row(first).unwrap();
    assert_eq!(driver.editing_rows(), vec![first]);
    assert_eq!(driver.row_count(), 2);
}

/// A second add-row without edits is ignored
pub fn verify_add_row_gating<D: TableDriver>(driver: &mut D) {
    let before = driver.row_count();
    driver.add_row().unwrap();
    assert_eq!(driver.row_count(), before + 1);
    assert_eq!(driver.editing_rows().len(), 1);

    driver.add_row().unwrap();
    assert_eq!(driver.row_count(), before + 1);
    assert_eq!(driver.editing_rows().len(), 1);

    let first = driver.row_ids()[0];
    driver.click_row(first).unwrap();
    assert_eq!(driver.row_count(), before);
}

/// An untouched draft disappears when another row is clicked
pub fn verify_draft_discard<D: TableDriver>(driver: &mut D) {
    let ids = driver.row_ids();
    let before = ids.len();

    driver.add_row().unwrap();
    assert_eq!(driver.row_count(), before + 1);

    driver.click_row(ids[0]).unwrap();
    assert_eq!(driver.row_count(), before);
    assert_eq!(driver.editing_rows(), vec![ids[0]]);
}

/// Clicking the fresh draft itself keeps it
pub fn verify_draft_reselect<D: TableDriver>(driver: &mut D) {
    let before = driver.row_count();
    driver.add_row().unwrap();
    let draft = *driver.row_ids().last().unwrap();

    driver.click_row(draft).unwrap();
    assert_eq!(driver.row_count(), before + 1);
    assert_eq!(driver.editing_rows(), vec![draft]);

    // Leave it again so the next scenario starts clean
    let first = driver.row_ids()[0];
    driver.click_row(first).unwrap();
    assert_eq!(driver.row_count(), before);
}

/// A draft that received input is kept as a normal row
pub fn verify_edited_draft_kept<D: TableDriver>(driver: &mut D) {
    let before = driver.row_count();
    driver.add_row().unwrap();
    let draft = *driver.row_ids().last().unwrap();
    driver.type_into(draft, "name", "Crate").unwrap();

    let first = driver.row_ids()[0];
    driver.click_row(first).unwrap();
    assert_eq!(driver.row_count(), before + 1);
    assert_eq!(driver.cell_text(draft, "name").as_deref(), Some("Crate"));
    assert_eq!(driver.editing_rows(), vec![first]);
}

/// Clicking a row that does not exist is an error and changes nothing
pub fn verify_unknown_row_rejected<D: TableDriver>(driver: &mut D) {
    let ids = driver.row_ids();
    let editing = driver.editing_rows();
    let missing = RowId::from_raw(ids.iter().map(|id| id.raw()).max().unwrap_or(0) + 100);

    assert_eq!(driver.click_row(missing), Err(TableError::UnknownRow(missing)));
    assert_eq!(driver.row_ids(), ids);
    assert_eq!(driver.editing_rows(), editing);
}

/// Complete verification suite - runs every scenario in order
pub fn run_full_suite<D: TableDriver>(driver: &mut D) {
    verify_row_selection(driver);
    verify_unknown_row_rejected(driver);
    verify_draft_discard(driver);
    verify_draft_reselect(driver);
    verify_add_row_gating(driver);
    verify_edited_draft_kept(driver);
}
