//! Table widget bound to a DOM fixture
//!
//! Reads configuration and static rows from the markup, owns the
//! controller and re-renders the table body after every operation.

use tracing::debug;

use super::dom::{DomElement, DomEvent, MockDom};
use crate::core::config::resolve_config;
use crate::core::{AddRowOutcome, EditController, RowId, TableError, TableOptions, TableResult};
use crate::render::RowRenderer;

/// Editable table attached to a `<table>` element
#[derive(Debug)]
pub struct WritableTable {
    table_id: String,
    controller: EditController,
}

impl WritableTable {
    /// Initializes the widget on `table_id`.
    ///
    /// Without `options` the configuration comes entirely from the markup:
    /// the table's `data` literal and, for columns, the header cells'
    /// `data` literals. Explicit options override metadata field by field.
    pub fn attach(
        dom: &mut MockDom,
        table_id: &str,
        options: Option<TableOptions>,
    ) -> TableResult<Self> {
        let table = dom
            .get_element(table_id)
            .ok_or_else(|| TableError::ElementNotFound(table_id.to_string()))?;

        let header_literals: Vec<String> = table
            .descendants("th")
            .iter()
            .filter_map(|th| th.get_attr("data").map(str::to_string))
            .collect();
        let config = resolve_config(table.get_attr("data"), &header_literals, options)?;

        let static_rows: Vec<Vec<String>> = table
            .first_descendant("tbody")
            .map(|body| {
                body.children_with_tag("tr")
                    .map(|tr| {
                        tr.children_with_tag("td")
                            .map(|td| td.text_content.trim().to_string())
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default();

        debug!(table = table_id, rows = static_rows.len(), "attaching table");
        let controller = EditController::builder(config)
            .static_rows(static_rows)
            .build();
        let table = Self {
            table_id: table_id.to_string(),
            controller,
        };
        table.render(dom)?;
        Ok(table)
    }

    /// Element id of the bound table
    #[must_use]
    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// The controller
    #[must_use]
    pub fn controller(&self) -> &EditController {
        &self.controller
    }

    /// Mutable controller access; call [`WritableTable::render`] afterwards
    pub fn controller_mut(&mut self) -> &mut EditController {
        &mut self.controller
    }

    /// Writes the current rows into the table body
    pub fn render(&self, dom: &mut MockDom) -> TableResult<()> {
        let rows = RowRenderer::new(self.controller.config()).render_rows(&self.controller);
        let table = dom
            .get_element_mut(&self.table_id)
            .ok_or_else(|| TableError::ElementNotFound(self.table_id.clone()))?;
        match table.first_descendant_mut("tbody") {
            Some(body) => body.children = rows,
            None => table.children.push(DomElement {
                children: rows,
                ..DomElement::new("tbody")
            }),
        }
        Ok(())
    }

    /// Selects a row and re-renders
    pub fn select_row(&mut self, dom: &mut MockDom, id: RowId) -> TableResult<()> {
        self.controller.select_row(id)?;
        self.render(dom)
    }

    /// Adds a row and re-renders
    pub fn add_row(&mut self, dom: &mut MockDom) -> TableResult<AddRowOutcome> {
        let outcome = self.controller.add_row();
        self.render(dom)?;
        Ok(outcome)
    }

    /// Command surface, e.g. `invoke(dom, "addRow")`
    pub fn invoke(&mut self, dom: &mut MockDom, verb: &str) -> TableResult<()> {
        self.controller.invoke(verb)?;
        self.render(dom)
    }

    /// Routes a DOM event to the controller.
    ///
    /// Clicks on a row (or anything inside it) select that row; input
    /// events on a cell input edit the cell. Events on unrelated elements
    /// are ignored.
    pub fn handle_event(&mut self, dom: &mut MockDom, event: &DomEvent) -> TableResult<()> {
        match event {
            DomEvent::Click { element_id } => match self.row_for_element(dom, element_id) {
                Some(id) => self.select_row(dom, id),
                None => Ok(()),
            },
            DomEvent::Input { element_id, value } => {
                let Some((id, field)) = self.controller.config().parse_input_name(element_id)
                else {
                    return Ok(());
                };
                self.controller.edit_cell(id, field, value)?;
                self.render(dom)
            }
        }
    }

    /// Finds the row whose `tr`, or a descendant of it, has `element_id`
    fn row_for_element(&self, dom: &MockDom, element_id: &str) -> Option<RowId> {
        let config = self.controller.config();
        self.controller.rows().iter().map(|row| row.id()).find(|id| {
            dom.get_element(&config.row_element_id(*id))
                .is_some_and(|tr| tr.find(element_id).is_some())
        })
    }
}
