use grocerygen::{format_csv, format_json, format_table, write_csv, GroceryRow, GroceryTable};

fn sample_table() -> GroceryTable {
    vec![
        GroceryRow::new("Rice", "Grains", "500g"),
        GroceryRow::new("Chicken", "Protein", "1kg"),
        GroceryRow::new("Oil", "General", "200ml"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_format_csv() {
    assert_eq!(
        format_csv(&sample_table()),
        "Item,Category,Quantity\nRice,Grains,500g\nChicken,Protein,1kg\nOil,General,200ml\n"
    );
}

#[test]
fn test_format_csv_empty_table_has_header() {
    assert_eq!(format_csv(&GroceryTable::new()), "Item,Category,Quantity\n");
}

#[test]
fn test_format_csv_quotes_commas() {
    let table: GroceryTable = vec![GroceryRow::new("Peppers, red", "Vegetable", "2")]
        .into_iter()
        .collect();
    assert_eq!(
        format_csv(&table),
        "Item,Category,Quantity\n\"Peppers, red\",Vegetable,2\n"
    );
}

#[test]
fn test_format_table() {
    let text = format_table(&sample_table());
    assert_eq!(
        text,
        "Item     Category  Quantity\n\
         -------  --------  --------\n\
         Rice     Grains    500g\n\
         Chicken  Protein   1kg\n\
         Oil      General   200ml\n"
    );
}

#[test]
fn test_format_table_aligns_unicode() {
    let table: GroceryTable = vec![
        GroceryRow::new("Jalapeño", "Vegetable", "2"),
        GroceryRow::new("Egg", "Dairy", "6"),
    ]
    .into_iter()
    .collect();
    let text = format_table(&table);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[2], "Jalapeño  Vegetable  2");
    assert_eq!(lines[3], "Egg       Dairy      6");
}

#[test]
fn test_format_json() {
    let json = format_json(&sample_table()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["Item"], "Rice");
    assert_eq!(value[2]["Category"], "General");
    assert_eq!(value.as_array().unwrap().len(), 3);
}

#[test]
fn test_write_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grocery_list.csv");
    write_csv(&path, &sample_table()).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("Item,Category,Quantity\nRice,Grains,500g\n"));
}
