//! Row renderer
//!
//! Turns a row, its edit-mode flag and the column definitions into cell
//! markup. Editable cells carry an input plus a hidden span with the same
//! value, so the static snapshot and the input always agree. Cells that
//! are not editable carry only the static text.

use crate::core::{ColumnDef, EditController, Row, TableConfig};
use crate::wasm::DomElement;

/// Renders rows of one table
#[derive(Debug, Clone, Copy)]
pub struct RowRenderer<'a> {
    config: &'a TableConfig,
}

impl<'a> RowRenderer<'a> {
    /// Creates a renderer for the given configuration
    #[must_use]
    pub const fn new(config: &'a TableConfig) -> Self {
        Self { config }
    }

    /// Renders one `tr`
    #[must_use]
    pub fn render_row(&self, row: &Row, editing: bool) -> DomElement {
        let mut tr = DomElement::new("tr")
            .with_id(&self.config.row_element_id(row.id()))
            .with_attr("rowId", &row.id().to_string());
        if editing {
            tr.add_class(self.config.edit_mode_class());
        }
        for column in self.config.columns() {
            tr.children.push(self.render_cell(row, column, editing));
        }
        tr
    }

    fn render_cell(&self, row: &Row, column: &ColumnDef, editing: bool) -> DomElement {
        let value = row.value(&column.name);
        if !(editing && column.editable) {
            return DomElement::new("td").with_text(value);
        }

        let name = self.config.input_name(row.id(), &column.name);
        let mut input = DomElement::new("input")
            .with_id(&name)
            .with_attr("type", "text")
            .with_attr("name", &name)
            .with_attr("value", value);
        if let Some(class) = &column.css_class {
            input.add_class(class);
        }
        if let Some(placeholder) = &column.placeholder {
            input.set_attr("placeholder", placeholder);
        }
        let display = DomElement::new("span").with_text(value).hidden();

        DomElement::new("td").with_child(input).with_child(display)
    }

    /// Renders every row of the controller, in order
    #[must_use]
    pub fn render_rows(&self, controller: &EditController) -> Vec<DomElement> {
        controller
            .rows()
            .iter()
            .map(|row| self.render_row(row, controller.is_editing(row.id())))
            .collect()
    }
}

/// Markup for the whole table body content
#[must_use]
pub fn body_html(controller: &EditController) -> String {
    RowRenderer::new(controller.config())
        .render_rows(controller)
        .iter()
        .map(DomElement::to_html)
        .collect()
}
