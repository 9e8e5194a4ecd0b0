//! Example: Editable Table
//!
//! Demonstrates: metadata-driven setup, row selection, draft rows and the
//! line total, printing the table body after each step
//!
//! Run with: `RUST_LOG=debug cargo run --example table_demo`

use tracing_subscriber::EnvFilter;
use writetable::prelude::*;

fn print_body(step: &str, table: &WritableTable) {
    println!("\n{step}");
    println!(
        "   rows: {}, editing: {:?}",
        table.controller().len(),
        table.controller().editing_row()
    );
    println!("   {}", body_html(table.controller()));
}

fn main() -> TableResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Editable Table Example ===");

    let mut dom = MockDom::table(
        "players",
        &[
            "{type:'text', required:true, name:'name', cssClass:'important', placeholder:'Item Name Here'}",
            "{type:'money', required:true, name:'price', cssClass:'required', placeholder:'Item Price'}",
            "{type:'integer', name:'qty', cssClass:'quantity', placeholder:'Qty'}",
            "{editable:false, name:'total'}",
        ],
        &[
            &["Anvil", "842.99", "10", "$8429.90"],
            &["Bucket", "259.80", "10", "$2598.00"],
        ],
    );
    dom.set_attribute(
        "players",
        "data",
        "{tableName:'players', autoAddRow:false, total:{price:'price', quantity:'qty'}}",
    );

    let observer = RecordingObserver::new();
    let mut table = WritableTable::attach(&mut dom, "players", None)?;
    table.controller_mut().set_observer(observer.clone());
    print_body("1. Attached from markup", &table);

    let first = table.controller().rows()[0].id();
    table.select_row(&mut dom, first)?;
    print_body("2. First row selected", &table);

    let event = DomEvent::input(&format!("players[{first}].qty"), "3");
    dom.dispatch_event(event.clone());
    table.handle_event(&mut dom, &event)?;
    print_body("3. Quantity changed to 3", &table);

    table.invoke(&mut dom, "addRow")?;
    table.invoke(&mut dom, "addRow")?;
    print_body("4. addRow twice (second is ignored)", &table);

    table.select_row(&mut dom, first)?;
    print_body("5. Back to the first row (blank draft discarded)", &table);

    println!("\nObserved events:");
    for event in observer.events() {
        println!("   {event:?}");
    }
    Ok(())
}
