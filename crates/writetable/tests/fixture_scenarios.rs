//! Fixture scenarios for the table widget
//!
//! Each scenario runs twice: once configured through explicit options and
//! once through metadata literals in the markup. Both paths must produce
//! the same rendered table.

use writetable::prelude::*;

// ===== Fixture =====

const HEADERS: [&str; 4] = [
    "{type:'text', required:true, editable:true, name:'name', cssClass:'important', placeholder:'Item Name Here'}",
    "{type:'money', required:true, name:'price', cssClass:'required', placeholder:'Item Price'}",
    "{type:'integer', name:'qty', cssClass:'quantity', placeholder:'Qty'}",
    "{editable:false, name:'total'}",
];

const MARKER: &str = "cs-writeable-editmode";

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name")
            .required()
            .with_class("important")
            .with_placeholder("Item Name Here"),
        ColumnDef::new("price")
            .with_type(ColumnType::Money)
            .required()
            .with_class("required")
            .with_placeholder("Item Price"),
        ColumnDef::new("qty")
            .with_type(ColumnType::Integer)
            .with_class("quantity")
            .with_placeholder("Qty"),
        ColumnDef::new("total").read_only(),
    ]
}

/// Two static rows under header cells that carry column metadata
fn fixture_dom() -> MockDom {
    MockDom::table(
        "fixture",
        &HEADERS,
        &[
            &["Anvil", "842.99", "10", "$8429.90"],
            &["Bucket", "259.80", "10", "$2598.00"],
        ],
    )
}

/// Attaches the widget either from a table literal or from explicit options
fn attach(
    use_metadata: bool,
    literal: &str,
    explicit: TableOptions,
) -> (WritableTable, MockDom) {
    let mut dom = fixture_dom();
    let table = if use_metadata {
        dom.set_attribute("fixture", "data", literal);
        WritableTable::attach(&mut dom, "fixture", None).unwrap()
    } else {
        WritableTable::attach(&mut dom, "fixture", Some(explicit.with_columns(columns()))).unwrap()
    };
    (table, dom)
}

fn body_rows(dom: &MockDom) -> Vec<DomElement> {
    dom.get_element("fixture")
        .and_then(|table| table.first_descendant("tbody"))
        .map(|body| body.children_with_tag("tr").cloned().collect())
        .unwrap_or_default()
}

fn editable_rows(dom: &MockDom) -> Vec<DomElement> {
    body_rows(dom)
        .into_iter()
        .filter(|tr| tr.has_class(MARKER))
        .collect()
}

fn row_by_id(dom: &MockDom, id: RowId) -> DomElement {
    dom.get_element(&format!("players-row-{id}")).cloned().unwrap()
}

fn click(table: &mut WritableTable, dom: &mut MockDom, id: RowId) {
    let event = DomEvent::click(&format!("players-row-{id}"));
    dom.dispatch_event(event.clone());
    table.handle_event(dom, &event).unwrap();
}

/// Checks cell layout of a row; editing rows get inputs with the fixture's
/// classes and placeholders plus a hidden span holding the same value
fn verify_row(row: &DomElement, editing: bool) {
    let row_id = row.get_attr("rowId").unwrap();
    assert!(!row_id.trim().is_empty(), "row should have a rowId attribute");

    let cells: Vec<&DomElement> = row.children_with_tag("td").collect();
    assert_eq!(cells.len(), 4, "row should have 4 cells");
    assert_eq!(row.has_class(MARKER), editing);
    if !editing {
        assert!(row.descendants("input").is_empty());
        return;
    }

    let expected = [
        ("name", "important", "Item Name Here"),
        ("price", "required", "Item Price"),
        ("qty", "quantity", "Qty"),
    ];
    for (cell, (field, class, placeholder)) in cells.iter().zip(expected) {
        let inputs: Vec<&DomElement> = cell.children_with_tag("input").collect();
        assert_eq!(inputs.len(), 1, "cell should have a text input");
        let input = inputs[0];
        let name = format!("players[{row_id}].{field}");
        assert_eq!(input.get_attr("type"), Some("text"));
        assert_eq!(input.get_attr("name"), Some(name.as_str()));
        assert_eq!(input.id, name);
        assert_eq!(input.classes, vec![class.to_string()]);
        assert_eq!(input.get_attr("placeholder"), Some(placeholder));

        let spans: Vec<&DomElement> = cell.children_with_tag("span").collect();
        assert_eq!(spans.len(), 1, "cell should have a hidden span");
        assert!(!spans[0].visible);
        assert_eq!(Some(spans[0].text_content.as_str()), input.get_attr("value"));
    }
    assert!(
        cells[3].descendants("input").is_empty(),
        "total cell is not editable"
    );
}

// ===== Scenarios =====

fn scenario_create(use_metadata: bool) {
    let (_, dom) = attach(use_metadata, "{tableName:'players'}", TableOptions::new("players"));

    assert_eq!(body_rows(&dom).len(), 3, "default autoAddRow adds a row");
    let editing = editable_rows(&dom);
    assert_eq!(editing.len(), 1);
    verify_row(&editing[0], true);
}

fn scenario_auto_add_row_off(use_metadata: bool) {
    let (_, dom) = attach(
        use_metadata,
        "{tableName:'players', autoAddRow:false}",
        TableOptions::new("players").auto_add_row(false),
    );

    assert_eq!(body_rows(&dom).len(), 2);
    assert!(editable_rows(&dom).is_empty());
}

fn scenario_add_row_with_auto_add_off(use_metadata: bool) {
    let (mut table, mut dom) = attach(
        use_metadata,
        "{tableName:'players', enableAddRow:true, autoAddRow:false}",
        TableOptions::new("players")
            .enable_add_row(true)
            .auto_add_row(false),
    );
    assert_eq!(body_rows(&dom).len(), 2);
    assert!(editable_rows(&dom).is_empty());

    table.invoke(&mut dom, "addRow").unwrap();
    assert_eq!(body_rows(&dom).len(), 3);
    assert_eq!(editable_rows(&dom).len(), 1);

    // Nothing typed into the new row yet, so a second request is ignored
    table.invoke(&mut dom, "addRow").unwrap();
    assert_eq!(body_rows(&dom).len(), 3);
    assert_eq!(editable_rows(&dom).len(), 1);
}

fn scenario_add_row_disabled(use_metadata: bool) {
    let observer = RecordingObserver::new();
    let (mut table, mut dom) = attach(
        use_metadata,
        "{tableName:'players', enableAddRow:false, autoAddRow:false}",
        TableOptions::new("players")
            .enable_add_row(false)
            .auto_add_row(false),
    );
    table.controller_mut().set_observer(observer.clone());

    let rows = body_rows(&dom);
    assert_eq!(rows.len(), 2);
    assert!(editable_rows(&dom).is_empty());
    verify_row(&rows[0], false);
    verify_row(&rows[1], false);

    table.invoke(&mut dom, "addRow").unwrap();
    assert_eq!(body_rows(&dom).len(), 2);
    assert!(editable_rows(&dom).is_empty(), "edit state is unchanged");
    assert_eq!(observer.rejections(), vec![AddRowRejection::Disabled]);
}

fn scenario_row_selected(use_metadata: bool) {
    let (mut table, mut dom) = attach(
        use_metadata,
        "{tableName:'players', enableAddRow:true, autoAddRow:false}",
        TableOptions::new("players")
            .enable_add_row(true)
            .auto_add_row(false),
    );
    assert_eq!(body_rows(&dom).len(), 2);
    assert!(editable_rows(&dom).is_empty());

    let ids: Vec<RowId> = table.controller().rows().iter().map(Row::id).collect();
    let (row1, row2) = (ids[0], ids[1]);
    let total = |dom: &MockDom, id: RowId| row_by_id(dom, id).children[3].inner_html();

    click(&mut table, &mut dom, row1);
    verify_row(&row_by_id(&dom, row1), true);
    verify_row(&row_by_id(&dom, row2), false);
    assert_eq!(total(&dom, row1), "$8429.90");
    assert_eq!(editable_rows(&dom).len(), 1);

    click(&mut table, &mut dom, row2);
    verify_row(&row_by_id(&dom, row1), false);
    verify_row(&row_by_id(&dom, row2), true);
    assert_eq!(total(&dom, row2), "$2598.00");
    assert_eq!(editable_rows(&dom).len(), 1);

    click(&mut table, &mut dom, row1);
    verify_row(&row_by_id(&dom, row1), true);
    verify_row(&row_by_id(&dom, row2), false);
    assert_eq!(total(&dom, row1), "$8429.90");
    assert_eq!(editable_rows(&dom).len(), 1);

    // A blank row is removed once another row is clicked
    table.invoke(&mut dom, "addRow").unwrap();
    let rows = body_rows(&dom);
    assert_eq!(rows.len(), 3);
    verify_row(&rows[2], true);
    assert_eq!(editable_rows(&dom).len(), 1);
    click(&mut table, &mut dom, row1);
    assert_eq!(body_rows(&dom).len(), 2);
    assert_eq!(editable_rows(&dom).len(), 1);

    // Clicking the new row itself keeps it
    table.invoke(&mut dom, "addRow").unwrap();
    let rows = body_rows(&dom);
    assert_eq!(rows.len(), 3);
    verify_row(&rows[2], true);
    let row3 = table.controller().editing_row().unwrap();
    click(&mut table, &mut dom, row3);
    assert_eq!(body_rows(&dom).len(), 3);
    assert_eq!(editable_rows(&dom).len(), 1);
}

fn scenario_edits_update_total(use_metadata: bool) {
    let mut dom = fixture_dom();
    let table = if use_metadata {
        dom.set_attribute(
            "fixture",
            "data",
            "{tableName:'players', autoAddRow:false, total:{price:'price', quantity:'qty'}}",
        );
        WritableTable::attach(&mut dom, "fixture", None)
    } else {
        let options = TableOptions::new("players")
            .auto_add_row(false)
            .with_columns(columns())
            .with_total(TotalRule::new("price", "qty"));
        WritableTable::attach(&mut dom, "fixture", Some(options))
    };
    let mut table = table.unwrap();

    let row1 = table.controller().rows()[0].id();
    click(&mut table, &mut dom, row1);
    let event = DomEvent::input(&format!("players[{row1}].qty"), "3");
    dom.dispatch_event(event.clone());
    table.handle_event(&mut dom, &event).unwrap();

    assert_eq!(row_by_id(&dom, row1).children[3].inner_html(), "$2528.97");
    assert!(table
        .controller()
        .form_fields()
        .contains(&(format!("players[{row1}].qty"), "3".to_string())));
}

// ===== Explicit options =====

#[test]
fn test_create_explicit() {
    scenario_create(false);
}

#[test]
fn test_auto_add_row_off_explicit() {
    scenario_auto_add_row_off(false);
}

#[test]
fn test_add_row_with_auto_add_off_explicit() {
    scenario_add_row_with_auto_add_off(false);
}

#[test]
fn test_add_row_disabled_explicit() {
    scenario_add_row_disabled(false);
}

#[test]
fn test_row_selected_explicit() {
    scenario_row_selected(false);
}

#[test]
fn test_edits_update_total_explicit() {
    scenario_edits_update_total(false);
}

// ===== Metadata literals =====

#[test]
fn test_create_metadata() {
    scenario_create(true);
}

#[test]
fn test_auto_add_row_off_metadata() {
    scenario_auto_add_row_off(true);
}

#[test]
fn test_add_row_with_auto_add_off_metadata() {
    scenario_add_row_with_auto_add_off(true);
}

#[test]
fn test_add_row_disabled_metadata() {
    scenario_add_row_disabled(true);
}

#[test]
fn test_row_selected_metadata() {
    scenario_row_selected(true);
}

#[test]
fn test_edits_update_total_metadata() {
    scenario_edits_update_total(true);
}

// ===== Both paths agree =====

#[test]
fn test_paths_render_identically() {
    let literal = "{tableName:'players', enableAddRow:true, autoAddRow:true}";
    let explicit = TableOptions::new("players")
        .enable_add_row(true)
        .auto_add_row(true);
    let (from_markup, dom_a) = attach(true, literal, explicit.clone());
    let (from_options, dom_b) = attach(false, literal, explicit);

    assert_eq!(from_markup.controller().config(), from_options.controller().config());
    assert_eq!(body_rows(&dom_a), body_rows(&dom_b));
}
