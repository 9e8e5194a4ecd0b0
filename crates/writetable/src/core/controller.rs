//! Row edit-mode controller
//!
//! Owns every row of one table and the single editing-row pointer.
//!
//! Rules enforced here:
//! - at most one row is in edit mode;
//! - a row that loses edit mode while still an untouched draft is removed,
//!   any other row is simply rendered static again;
//! - add-row is refused while disabled or while a draft is pending.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use super::config::TableConfig;
use super::money::format_money;
use super::observer::{AddRowRejection, TableObserver};
use super::row::{Row, RowId, RowOrigin, RowSnapshot};
use super::{TableError, TableResult};

/// Result of an add-row request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddRowOutcome {
    /// A blank row was appended and put into edit mode
    Added(RowId),
    /// The request was absorbed without changing anything
    Rejected(AddRowRejection),
}

impl AddRowOutcome {
    /// Id of the new row, if one was added
    #[must_use]
    pub const fn added(self) -> Option<RowId> {
        match self {
            Self::Added(id) => Some(id),
            Self::Rejected(_) => None,
        }
    }
}

/// Verbs accepted by the command surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `addRow`
    AddRow,
    /// `deselect`
    Deselect,
}

impl FromStr for Command {
    type Err = TableError;

    fn from_str(verb: &str) -> Result<Self, Self::Err> {
        match verb.trim() {
            "addRow" => Ok(Self::AddRow),
            "deselect" => Ok(Self::Deselect),
            other => Err(TableError::UnknownCommand(other.to_string())),
        }
    }
}

/// Builds an [`EditController`] from configuration and pre-existing rows
pub struct ControllerBuilder {
    config: TableConfig,
    static_rows: Vec<Vec<String>>,
    observer: Option<Box<dyn TableObserver>>,
}

impl fmt::Debug for ControllerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerBuilder")
            .field("config", &self.config)
            .field("static_rows", &self.static_rows)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl ControllerBuilder {
    /// Adds a pre-existing row; cells are given in column order
    #[must_use]
    pub fn static_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.static_rows
            .push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Adds several pre-existing rows
    #[must_use]
    pub fn static_rows<R, I, S>(self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        rows.into_iter().fold(self, |builder, row| builder.static_row(row))
    }

    /// Attaches an observer before initialization runs
    #[must_use]
    pub fn observer(mut self, observer: impl TableObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Initializes the table: static rows first, then the optional
    /// auto-added row, which starts in edit mode.
    #[must_use]
    pub fn build(self) -> EditController {
        let mut controller = EditController {
            config: self.config,
            rows: Vec::new(),
            editing: None,
            next_id: 0,
            observer: self.observer,
        };

        for cells in self.static_rows {
            let id = controller.allocate_id();
            let values: HashMap<String, String> = controller
                .config
                .columns()
                .iter()
                .zip(cells)
                .map(|(column, value)| (column.name.clone(), value))
                .collect();
            controller.rows.push(Row::with_values(id, values));
        }

        if controller.config.auto_add_row() {
            let id = controller.append_draft(RowOrigin::AutoAdded);
            controller.transfer_edit_mode(id);
        }

        debug!(
            table = controller.config.table_name(),
            rows = controller.rows.len(),
            editing = ?controller.editing,
            "table initialized"
        );
        controller
    }
}

/// Row edit-mode controller for one table instance
pub struct EditController {
    config: TableConfig,
    rows: Vec<Row>,
    editing: Option<RowId>,
    next_id: u64,
    observer: Option<Box<dyn TableObserver>>,
}

impl fmt::Debug for EditController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditController")
            .field("table", &self.config.table_name())
            .field("rows", &self.rows)
            .field("editing", &self.editing)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl EditController {
    /// Starts building a controller
    #[must_use]
    pub fn builder(config: TableConfig) -> ControllerBuilder {
        ControllerBuilder {
            config,
            static_rows: Vec::new(),
            observer: None,
        }
    }

    /// Creates a controller with no pre-existing rows
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        Self::builder(config).build()
    }

    /// Replaces the observer
    pub fn set_observer(&mut self, observer: impl TableObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Table configuration
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Rows in display order
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Looks up a row
    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row in edit mode
    #[must_use]
    pub const fn editing_row(&self) -> Option<RowId> {
        self.editing
    }

    /// Whether `id` is the row in edit mode
    #[must_use]
    pub fn is_editing(&self, id: RowId) -> bool {
        self.editing == Some(id)
    }

    /// Number of rows in edit mode, zero or one
    #[must_use]
    pub fn editable_count(&self) -> usize {
        usize::from(self.editing.is_some())
    }

    /// The editing row, if it is an untouched draft
    #[must_use]
    pub fn draft_pending(&self) -> Option<RowId> {
        self.editing
            .and_then(|id| self.row(id))
            .filter(|row| row.is_untouched_draft())
            .map(Row::id)
    }

    /// Puts `id` into edit mode, taking it away from the current row.
    ///
    /// Returns `Ok(false)` when `id` is already editing; the row is left
    /// untouched and no exit check runs.
    pub fn select_row(&mut self, id: RowId) -> TableResult<bool> {
        if self.row(id).is_none() {
            return Err(TableError::UnknownRow(id));
        }
        if self.editing == Some(id) {
            trace!(row = %id, "row already in edit mode");
            return Ok(false);
        }
        self.transfer_edit_mode(id);
        Ok(true)
    }

    /// Appends a blank row in edit mode, unless adding is disabled or an
    /// untouched draft is still pending.
    pub fn add_row(&mut self) -> AddRowOutcome {
        let rejection = if !self.config.enable_add_row() {
            Some(AddRowRejection::Disabled)
        } else {
            self.draft_pending().map(AddRowRejection::DraftPending)
        };

        if let Some(reason) = rejection {
            debug!(%reason, "add-row ignored");
            if let Some(observer) = self.observer.as_mut() {
                observer.add_row_rejected(reason);
            }
            return AddRowOutcome::Rejected(reason);
        }

        let id = self.append_draft(RowOrigin::Added);
        self.transfer_edit_mode(id);
        AddRowOutcome::Added(id)
    }

    /// Leaves edit mode without selecting another row. Returns whether a
    /// row was editing.
    pub fn deselect(&mut self) -> bool {
        let Some(previous) = self.editing.take() else {
            return false;
        };
        self.leave_edit_mode(previous);
        if let Some(observer) = self.observer.as_mut() {
            observer.edit_mode_changed(Some(previous), None);
        }
        true
    }

    /// Records a field edit on the editing row
    pub fn edit_cell(&mut self, id: RowId, field: &str, value: &str) -> TableResult<()> {
        let column = self
            .config
            .column(field)
            .ok_or_else(|| TableError::UnknownColumn(field.to_string()))?;
        if !column.editable {
            return Err(TableError::ReadOnlyColumn(field.to_string()));
        }
        if self.row(id).is_none() {
            return Err(TableError::UnknownRow(id));
        }
        if self.editing != Some(id) {
            return Err(TableError::RowNotEditing(id));
        }

        let total = self.compute_total(id, field, value);
        let total_field = self.config.total_column().map(|c| c.name.clone());
        let row = self
            .row_mut(id)
            .ok_or(TableError::UnknownRow(id))?;
        row.set_value(field, value);
        if let (Some(total), Some(total_field)) = (total, total_field) {
            row.set_computed(&total_field, total);
        }
        trace!(row = %id, field, "cell edited");
        Ok(())
    }

    /// Removes a row on request.
    ///
    /// The editing row can only be removed while it holds no data.
    pub fn remove_row(&mut self, id: RowId) -> TableResult<()> {
        let index = self
            .position(id)
            .ok_or(TableError::UnknownRow(id))?;
        if self.editing == Some(id) {
            if self.rows[index].has_data() {
                return Err(TableError::RowLocked(id));
            }
            self.editing = None;
            if let Some(observer) = self.observer.as_mut() {
                observer.edit_mode_changed(Some(id), None);
            }
        }
        self.rows.remove(index);
        debug!(row = %id, "row removed");
        if let Some(observer) = self.observer.as_mut() {
            observer.row_removed(id);
        }
        Ok(())
    }

    /// Dispatches a command verb such as `addRow`
    pub fn invoke(&mut self, verb: &str) -> TableResult<()> {
        let command: Command = verb.parse()?;
        debug!(?command, "command dispatched");
        match command {
            Command::AddRow => {
                self.add_row();
            }
            Command::Deselect => {
                self.deselect();
            }
        }
        Ok(())
    }

    /// Editable values as `(input name, value)` pairs, in row order
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.rows
            .iter()
            .filter(|row| !row.is_untouched_draft())
            .flat_map(|row| {
                self.config
                    .columns()
                    .iter()
                    .filter(|column| column.editable)
                    .map(move |column| {
                        (
                            self.config.input_name(row.id(), &column.name),
                            row.value(&column.name).to_string(),
                        )
                    })
            })
            .collect()
    }

    /// Serializable view of every row
    #[must_use]
    pub fn snapshot(&self) -> Vec<RowSnapshot> {
        self.rows
            .iter()
            .map(|row| row.snapshot(self.is_editing(row.id())))
            .collect()
    }

    fn allocate_id(&mut self) -> RowId {
        let id = RowId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| row.id() == id)
    }

    fn append_draft(&mut self, origin: RowOrigin) -> RowId {
        let id = self.allocate_id();
        self.rows.push(Row::draft(id, origin));
        debug!(row = %id, ?origin, "row appended");
        if let Some(observer) = self.observer.as_mut() {
            observer.row_added(id);
        }
        id
    }

    /// Moves edit mode to `id`, running the exit check on the previous row
    fn transfer_edit_mode(&mut self, id: RowId) {
        let previous = self.editing.take();
        if let Some(previous) = previous {
            self.leave_edit_mode(previous);
        }
        self.editing = Some(id);
        debug!(from = ?previous, to = %id, "edit mode moved");
        if let Some(observer) = self.observer.as_mut() {
            observer.edit_mode_changed(previous, Some(id));
        }
    }

    /// Exit check for a row losing edit mode
    fn leave_edit_mode(&mut self, id: RowId) {
        let Some(index) = self.position(id) else {
            return;
        };
        if self.rows[index].is_untouched_draft() {
            self.rows.remove(index);
            debug!(row = %id, "untouched draft discarded");
            if let Some(observer) = self.observer.as_mut() {
                observer.row_discarded(id);
            }
        } else {
            trace!(row = %id, "row back to static");
        }
    }

    /// Line total after `field` takes `value`, when a total rule applies
    fn compute_total(&self, id: RowId, field: &str, value: &str) -> Option<String> {
        let rule = self.config.total()?;
        if field != rule.price && field != rule.quantity {
            return None;
        }
        let row = self.row(id)?;
        let read = |name: &str| -> Option<f64> {
            let raw = if name == field { value } else { row.value(name) };
            let column = self.config.column(name)?;
            if column.kind.is_numeric() {
                column.kind.parse_number(raw)
            } else {
                raw.trim().parse::<f64>().ok()
            }
        };
        let total = read(&rule.price)
            .zip(read(&rule.quantity))
            .map(|(price, quantity)| price * quantity)
            .filter(|total| total.is_finite());
        Some(total.map(format_money).unwrap_or_default())
    }
}
