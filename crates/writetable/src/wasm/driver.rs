//! WASM Driver - Unified Testing Interface
//!
//! Implements [`TableDriver`] on top of the mock DOM. Every query reads the
//! rendered markup rather than controller state, so the unified scenarios
//! check what a user would actually see.

use super::dom::{DomElement, DomEvent, MockDom};
use super::table::WritableTable;
use crate::core::{RowId, TableError, TableOptions, TableResult};
use crate::driver::TableDriver;

/// WASM Driver wrapping the table widget and its mock DOM
#[derive(Debug)]
pub struct WasmDriver {
    /// The widget
    table: WritableTable,
    /// Mock DOM for testing
    dom: MockDom,
}

impl WasmDriver {
    /// Attaches a widget to `table_id` inside `dom`
    pub fn attach(
        mut dom: MockDom,
        table_id: &str,
        options: Option<TableOptions>,
    ) -> TableResult<Self> {
        let table = WritableTable::attach(&mut dom, table_id, options)?;
        Ok(Self { table, dom })
    }

    /// Returns a reference to the widget
    #[must_use]
    pub fn table(&self) -> &WritableTable {
        &self.table
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Dispatches an event to the DOM and the widget
    pub fn dispatch(&mut self, event: DomEvent) -> TableResult<()> {
        self.dom.dispatch_event(event.clone());
        self.table.handle_event(&mut self.dom, &event)
    }

    /// Issues a command verb
    pub fn invoke(&mut self, verb: &str) -> TableResult<()> {
        self.table.invoke(&mut self.dom, verb)
    }

    /// Rendered body rows, in order
    #[must_use]
    pub fn body_rows(&self) -> Vec<&DomElement> {
        self.dom
            .get_element(self.table.table_id())
            .and_then(|table| table.first_descendant("tbody"))
            .map(|body| body.children_with_tag("tr").collect())
            .unwrap_or_default()
    }

    /// Rendered row element for `id`
    #[must_use]
    pub fn row_element(&self, id: RowId) -> Option<&DomElement> {
        let config = self.table.controller().config();
        self.dom.get_element(&config.row_element_id(id))
    }
}

impl TableDriver for WasmDriver {
    fn row_ids(&self) -> Vec<RowId> {
        self.body_rows()
            .iter()
            .filter_map(|tr| tr.get_attr("rowId"))
            .filter_map(|raw| raw.parse::<u64>().ok())
            .map(RowId::from_raw)
            .collect()
    }

    fn editing_rows(&self) -> Vec<RowId> {
        let marker = self.table.controller().config().edit_mode_class();
        self.body_rows()
            .iter()
            .filter(|tr| tr.has_class(marker))
            .filter_map(|tr| tr.get_attr("rowId"))
            .filter_map(|raw| raw.parse::<u64>().ok())
            .map(RowId::from_raw)
            .collect()
    }

    fn click_row(&mut self, id: RowId) -> TableResult<()> {
        let element_id = self.table.controller().config().row_element_id(id);
        if self.dom.get_element(&element_id).is_none() {
            return Err(TableError::UnknownRow(id));
        }
        self.dispatch(DomEvent::click(&element_id))
    }

    fn add_row(&mut self) -> TableResult<()> {
        self.invoke("addRow")
    }

    fn type_into(&mut self, id: RowId, field: &str, value: &str) -> TableResult<()> {
        let input_id = self.table.controller().config().input_name(id, field);
        self.dispatch(DomEvent::input(&input_id, value))
    }

    fn cell_text(&self, id: RowId, field: &str) -> Option<String> {
        let index = self
            .table
            .controller()
            .config()
            .columns()
            .iter()
            .position(|column| column.name == field)?;
        let td = self.row_element(id)?.children_with_tag("td").nth(index)?;
        match td.children_with_tag("input").next() {
            Some(input) => input.get_attr("value").map(str::to_string),
            None => Some(td.text_content.clone()),
        }
    }
}
