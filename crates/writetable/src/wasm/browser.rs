//! Browser WASM bindings for the editable table
//!
//! Binds the controller to a real `<table>` element through `web-sys`.
//! Page script forwards row clicks and input events; every call re-renders
//! the table body from controller state.

// Compiled only with the `wasm` feature, see mod.rs

use wasm_bindgen::prelude::*;
use web_sys::{console, Document, Element, HtmlCollection};

use crate::core::config::resolve_config;
use crate::core::{EditController, RowId, TableError, TableOptions, TableResult};
use crate::render::body_html;

/// Browser table - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserTable {
    table_id: String,
    controller: EditController,
}

#[wasm_bindgen]
impl BrowserTable {
    /// Attach to the table with id `table_id`.
    ///
    /// `options_json` holds explicit options in the same camelCase shape
    /// as the metadata literal; they override the markup field by field.
    #[wasm_bindgen(constructor)]
    pub fn new(table_id: &str, options_json: Option<String>) -> Result<BrowserTable, JsValue> {
        console_error_panic_hook::set_once();

        let document = document().map_err(to_js)?;
        let table = document
            .get_element_by_id(table_id)
            .ok_or_else(|| to_js(TableError::ElementNotFound(table_id.to_string())))?;

        let explicit = options_json
            .as_deref()
            .map(TableOptions::from_json)
            .transpose()
            .map_err(to_js)?;
        let header_literals: Vec<String> = elements(&table.get_elements_by_tag_name("th"))
            .iter()
            .filter_map(|th| th.get_attribute("data"))
            .collect();
        let config = resolve_config(
            table.get_attribute("data").as_deref(),
            &header_literals,
            explicit,
        )
        .map_err(to_js)?;

        let static_rows: Vec<Vec<String>> = elements(&table.get_elements_by_tag_name("tbody"))
            .first()
            .map(|body| {
                elements(&body.get_elements_by_tag_name("tr"))
                    .iter()
                    .map(|tr| {
                        elements(&tr.get_elements_by_tag_name("td"))
                            .iter()
                            .map(|td| td.text_content().unwrap_or_default().trim().to_string())
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default();

        let this = Self {
            table_id: table_id.to_string(),
            controller: EditController::builder(config)
                .static_rows(static_rows)
                .build(),
        };
        this.render()?;
        Ok(this)
    }

    /// Put a row into edit mode
    pub fn select_row(&mut self, row_id: u64) -> Result<(), JsValue> {
        self.controller
            .select_row(RowId::from_raw(row_id))
            .map_err(to_js)?;
        self.render()
    }

    /// Write a value into a cell of the editing row
    pub fn edit_cell(&mut self, row_id: u64, field: &str, value: &str) -> Result<(), JsValue> {
        self.controller
            .edit_cell(RowId::from_raw(row_id), field, value)
            .map_err(to_js)?;
        self.render()
    }

    /// Handle an input event on a rendered cell input, by input name
    pub fn handle_input(&mut self, input_name: &str, value: &str) -> Result<(), JsValue> {
        let Some((id, field)) = self.controller.config().parse_input_name(input_name) else {
            return Ok(());
        };
        self.controller.edit_cell(id, field, value).map_err(to_js)?;
        self.render()
    }

    /// Command surface, e.g. `invoke("addRow")`
    pub fn invoke(&mut self, verb: &str) -> Result<(), JsValue> {
        self.controller.invoke(verb).map_err(to_js)?;
        self.render()
    }

    /// Current table body markup
    pub fn html(&self) -> String {
        body_html(&self.controller)
    }

    /// Row id in edit mode, if any
    #[wasm_bindgen(getter)]
    pub fn editing_row(&self) -> Option<u64> {
        self.controller.editing_row().map(RowId::raw)
    }

    /// Number of rows
    #[wasm_bindgen(getter)]
    pub fn row_count(&self) -> usize {
        self.controller.len()
    }

    /// Rows as JSON records
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.controller.snapshot()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Form fields as a JSON array of `[name, value]` pairs
    pub fn form_fields_json(&self) -> String {
        serde_json::to_string(&self.controller.form_fields()).unwrap_or_else(|_| "[]".to_string())
    }

    fn render(&self) -> Result<(), JsValue> {
        let document = document().map_err(to_js)?;
        let table = document
            .get_element_by_id(&self.table_id)
            .ok_or_else(|| to_js(TableError::ElementNotFound(self.table_id.clone())))?;
        let body = match elements(&table.get_elements_by_tag_name("tbody")).into_iter().next() {
            Some(body) => body,
            None => {
                let body = document.create_element("tbody")?;
                table.append_child(&body)?;
                body
            }
        };
        body.set_inner_html(&self.html());
        Ok(())
    }
}

fn document() -> TableResult<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| TableError::ElementNotFound("document".to_string()))
}

fn elements(collection: &HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

fn to_js(err: TableError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Initialize the module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"writetable WASM initialized".into());
}
