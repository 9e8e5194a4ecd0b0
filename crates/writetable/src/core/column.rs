//! Column definitions

use serde::{Deserialize, Serialize};

use super::money::parse_amount;

/// Data type declared for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text
    #[default]
    Text,
    /// Currency amount, displayed as `$1234.50`
    Money,
    /// Whole number
    Integer,
    /// Decimal number
    Decimal,
    /// Calendar date
    Date,
    /// Any type name this widget does not interpret
    #[serde(other)]
    Other,
}

impl ColumnType {
    /// Returns true for types holding numbers
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Money | Self::Integer | Self::Decimal)
    }

    /// Reads a cell value as a number according to this type.
    ///
    /// Text-like types never yield a number.
    #[must_use]
    pub fn parse_number(self, value: &str) -> Option<f64> {
        match self {
            Self::Money => parse_amount(value),
            Self::Integer => value.trim().parse::<i64>().ok().map(|n| n as f64),
            Self::Decimal => value.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Text | Self::Date | Self::Other => None,
        }
    }
}

fn default_editable() -> bool {
    true
}

/// Static schema for one field of the table.
///
/// Deserializes from the same shape used in options and metadata:
/// `{type:'money', required:true, name:'price', cssClass:'required', placeholder:'Item Price'}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Field name, unique within the table
    pub name: String,
    /// Declared data type
    #[serde(rename = "type", default)]
    pub kind: ColumnType,
    /// Whether a value must be entered
    #[serde(default)]
    pub required: bool,
    /// Whether the cell renders as an input in edit mode
    #[serde(default = "default_editable")]
    pub editable: bool,
    /// Class applied to the cell input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    /// Placeholder shown by the cell input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl ColumnDef {
    /// Creates an editable text column
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnType::Text,
            required: false,
            editable: true,
            css_class: None,
            placeholder: None,
        }
    }

    /// Sets the data type
    #[must_use]
    pub fn with_type(mut self, kind: ColumnType) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the column as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the column as not editable
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Sets the input class
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Sets the input placeholder
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_new_defaults() {
        let col = ColumnDef::new("name");
        assert_eq!(col.kind, ColumnType::Text);
        assert!(col.editable);
        assert!(!col.required);
        assert!(col.css_class.is_none());
    }

    #[test]
    fn test_column_builder() {
        let col = ColumnDef::new("price")
            .with_type(ColumnType::Money)
            .required()
            .with_class("required")
            .with_placeholder("Item Price");
        assert_eq!(col.kind, ColumnType::Money);
        assert!(col.required);
        assert_eq!(col.css_class.as_deref(), Some("required"));
        assert_eq!(col.placeholder.as_deref(), Some("Item Price"));
    }

    #[test]
    fn test_column_deserialize_defaults() {
        let col: ColumnDef = serde_json::from_str(r#"{"name":"total","editable":false}"#).unwrap();
        assert_eq!(col.name, "total");
        assert!(!col.editable);
        assert_eq!(col.kind, ColumnType::Text);
    }

    #[test]
    fn test_column_deserialize_full() {
        let col: ColumnDef = serde_json::from_str(
            r#"{"type":"integer","name":"qty","cssClass":"quantity","placeholder":"Qty"}"#,
        )
        .unwrap();
        assert_eq!(col.kind, ColumnType::Integer);
        assert!(col.editable);
        assert_eq!(col.css_class.as_deref(), Some("quantity"));
    }

    #[test]
    fn test_column_type_unknown_is_other() {
        let col: ColumnDef = serde_json::from_str(r#"{"type":"percent","name":"p"}"#).unwrap();
        assert_eq!(col.kind, ColumnType::Other);
    }

    #[test]
    fn test_parse_number_by_type() {
        assert_eq!(ColumnType::Integer.parse_number(" 12 "), Some(12.0));
        assert_eq!(ColumnType::Integer.parse_number("1.5"), None);
        assert_eq!(ColumnType::Decimal.parse_number("1.5"), Some(1.5));
        assert_eq!(ColumnType::Money.parse_number("$1,250.10"), Some(1250.10));
        assert_eq!(ColumnType::Text.parse_number("12"), None);
    }

    #[test]
    fn test_is_numeric() {
        assert!(ColumnType::Money.is_numeric());
        assert!(!ColumnType::Date.is_numeric());
    }
}
