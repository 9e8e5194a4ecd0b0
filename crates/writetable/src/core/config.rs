//! Table configuration and its single normalization step
//!
//! Options may come from code ([`TableOptions`] built directly or from JSON)
//! or from metadata literals attached to the markup. Both end up in
//! [`TableOptions`] and pass through [`TableOptions::normalize`], which
//! produces the canonical, immutable [`TableConfig`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::column::ColumnDef;
use super::literal::parse_literal;
use super::row::RowId;
use super::{TableError, TableResult};

/// Marker class added to the row that is in edit mode
pub const DEFAULT_EDIT_MODE_CLASS: &str = "cs-writeable-editmode";

/// Computes the last column as `price × quantity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalRule {
    /// Field holding the unit price
    pub price: String,
    /// Field holding the quantity
    pub quantity: String,
}

impl TotalRule {
    /// Creates a rule from the two source fields
    #[must_use]
    pub fn new(price: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            quantity: quantity.into(),
        }
    }
}

/// Raw, partially specified options.
///
/// Every field is optional so that metadata and explicit options can be
/// layered with [`TableOptions::merge`] before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    /// Prefix of every input name, e.g. `players`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Ordered column definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnDef>>,
    /// Append one blank editable row at initialization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_add_row: Option<bool>,
    /// Allow the add-row command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_add_row: Option<bool>,
    /// Marker class for the editing row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_mode_class: Option<String>,
    /// Line total rule for the last column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<TotalRule>,
}

impl TableOptions {
    /// Creates options naming the table
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: Some(table_name.into()),
            ..Self::default()
        }
    }

    /// Sets the columns
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<ColumnDef>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Sets `autoAddRow`
    #[must_use]
    pub fn auto_add_row(mut self, enabled: bool) -> Self {
        self.auto_add_row = Some(enabled);
        self
    }

    /// Sets `enableAddRow`
    #[must_use]
    pub fn enable_add_row(mut self, enabled: bool) -> Self {
        self.enable_add_row = Some(enabled);
        self
    }

    /// Sets the edit-mode marker class
    #[must_use]
    pub fn with_edit_mode_class(mut self, class: impl Into<String>) -> Self {
        self.edit_mode_class = Some(class.into());
        self
    }

    /// Sets the line total rule
    #[must_use]
    pub fn with_total(mut self, rule: TotalRule) -> Self {
        self.total = Some(rule);
        self
    }

    /// Reads options from a metadata literal such as
    /// `{tableName:'players', enableAddRow:true, autoAddRow:false}`
    pub fn from_metadata(literal: &str) -> TableResult<Self> {
        let value = parse_literal(literal)?;
        serde_json::from_value(value).map_err(|e| TableError::InvalidConfig(e.to_string()))
    }

    /// Reads options from JSON text
    pub fn from_json(json: &str) -> TableResult<Self> {
        serde_json::from_str(json).map_err(|e| TableError::InvalidConfig(e.to_string()))
    }

    /// Layers `overrides` on top of `self`, field by field
    #[must_use]
    pub fn merge(self, overrides: TableOptions) -> Self {
        Self {
            table_name: overrides.table_name.or(self.table_name),
            columns: overrides.columns.or(self.columns),
            auto_add_row: overrides.auto_add_row.or(self.auto_add_row),
            enable_add_row: overrides.enable_add_row.or(self.enable_add_row),
            edit_mode_class: overrides.edit_mode_class.or(self.edit_mode_class),
            total: overrides.total.or(self.total),
        }
    }

    /// Applies defaults and validates, producing the canonical configuration
    pub fn normalize(self) -> TableResult<TableConfig> {
        let table_name = self
            .table_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(TableError::MissingTableName)?;

        let mut columns = self.columns.unwrap_or_default();
        if columns.is_empty() {
            return Err(TableError::NoColumns);
        }

        {
            let mut seen = HashSet::new();
            for column in &columns {
                if column.name.trim().is_empty() {
                    return Err(TableError::InvalidConfig("column name is empty".into()));
                }
                if !seen.insert(column.name.as_str()) {
                    return Err(TableError::DuplicateColumn(column.name.clone()));
                }
            }

            if let Some(rule) = &self.total {
                for field in [&rule.price, &rule.quantity] {
                    if !seen.contains(field.as_str()) {
                        return Err(TableError::UnknownColumn(field.clone()));
                    }
                }
            }
        }

        // The trailing column is a computed passthrough.
        if let Some(last) = columns.last_mut() {
            last.editable = false;
        }

        Ok(TableConfig {
            table_name,
            columns,
            auto_add_row: self.auto_add_row.unwrap_or(true),
            enable_add_row: self.enable_add_row.unwrap_or(true),
            edit_mode_class: self
                .edit_mode_class
                .unwrap_or_else(|| DEFAULT_EDIT_MODE_CLASS.to_string()),
            total: self.total,
        })
    }
}

/// Resolves the configuration of a table declared in markup.
///
/// `table_literal` is the table element's metadata, `header_literals` the
/// metadata of its header cells in column order. Header columns are used
/// only when neither the table literal nor `explicit` provides columns.
pub fn resolve_config(
    table_literal: Option<&str>,
    header_literals: &[String],
    explicit: Option<TableOptions>,
) -> TableResult<TableConfig> {
    let mut options = match table_literal.map(str::trim).filter(|s| !s.is_empty()) {
        Some(literal) => TableOptions::from_metadata(literal)?,
        None => TableOptions::default(),
    };
    if let Some(explicit) = explicit {
        options = options.merge(explicit);
    }
    if options.columns.is_none() && !header_literals.is_empty() {
        let columns = header_literals
            .iter()
            .map(|literal| {
                let value = parse_literal(literal)?;
                serde_json::from_value::<ColumnDef>(value)
                    .map_err(|e| TableError::InvalidConfig(e.to_string()))
            })
            .collect::<TableResult<Vec<_>>>()?;
        options.columns = Some(columns);
    }
    options.normalize()
}

/// Canonical table configuration; immutable after initialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    table_name: String,
    columns: Vec<ColumnDef>,
    auto_add_row: bool,
    enable_add_row: bool,
    edit_mode_class: String,
    total: Option<TotalRule>,
}

impl TableConfig {
    /// Table name used as input name prefix
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Ordered columns
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Looks up a column by field name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether a blank row is appended at initialization
    #[must_use]
    pub const fn auto_add_row(&self) -> bool {
        self.auto_add_row
    }

    /// Whether add-row requests are honoured
    #[must_use]
    pub const fn enable_add_row(&self) -> bool {
        self.enable_add_row
    }

    /// Marker class for the editing row
    #[must_use]
    pub fn edit_mode_class(&self) -> &str {
        &self.edit_mode_class
    }

    /// Line total rule, if any
    #[must_use]
    pub fn total(&self) -> Option<&TotalRule> {
        self.total.as_ref()
    }

    /// The computed trailing column
    #[must_use]
    pub fn total_column(&self) -> Option<&ColumnDef> {
        self.columns.last()
    }

    /// Input name and id for a cell: `<tableName>[<rowId>].<fieldName>`
    #[must_use]
    pub fn input_name(&self, row: RowId, field: &str) -> String {
        format!("{}[{}].{}", self.table_name, row, field)
    }

    /// Splits an input name back into row id and field name
    #[must_use]
    pub fn parse_input_name<'n>(&self, name: &'n str) -> Option<(RowId, &'n str)> {
        let rest = name.strip_prefix(self.table_name.as_str())?.strip_prefix('[')?;
        let (id, field) = rest.split_once("].")?;
        let id = id.parse::<u64>().ok()?;
        self.column(field)?;
        Some((RowId::from_raw(id), field))
    }

    /// Element id of a row
    #[must_use]
    pub fn row_element_id(&self, row: RowId) -> String {
        format!("{}-row-{}", self.table_name, row)
    }
}
