use tracing::trace;

use crate::table::{GroceryRow, GroceryTable};

/// Parse a single line of model output into a grocery row.
///
/// The line is trimmed, every `-` is removed (bullets and any hyphen inside a
/// value alike, so `1-2 cups` becomes `12 cups`) and the result is trimmed
/// again. Lines that end up empty or contain no `|` are chatter and yield
/// `None`. Otherwise the line is split on `|` and handed to
/// [`GroceryRow::from_segments`].
pub fn parse_grocery_line(line: &str) -> Option<GroceryRow> {
    trace!(?line, "Parsing grocery line");
    let cleaned = line.trim().replace('-', "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || !cleaned.contains('|') {
        trace!("Ignoring line without row data");
        return None;
    }

    let segments: Vec<&str> = cleaned.split('|').map(str::trim).collect();
    let row = GroceryRow::from_segments(&segments);
    trace!(?row, "Parsed line");
    row
}

/// Parse the full model reply into a table, one row per data-bearing line in
/// order of appearance.
///
/// Text with nothing recognisable yields an empty table rather than an error;
/// callers compare against the raw text to tell "no text" from "no rows".
pub fn parse_grocery_output(text: &str) -> GroceryTable {
    let mut table = GroceryTable::new();
    for row in text.split('\n').filter_map(parse_grocery_line) {
        table.push(row);
    }
    trace!(rows = table.len(), "Parsed model output");
    table
}
