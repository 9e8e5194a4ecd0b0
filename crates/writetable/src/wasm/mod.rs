//! WASM frontend for the editable table
//!
//! The mock DOM and [`WritableTable`] let the widget run natively under
//! test; `BrowserTable` (feature `wasm`) binds the same controller to a
//! real document.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;
mod table;

#[cfg(feature = "wasm")]
pub use browser::BrowserTable;
pub use dom::{escape_html, DomElement, DomEvent, MockDom};
pub use driver::WasmDriver;
pub use table::WritableTable;
