use anyhow::{Context, Result};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

use crate::table::{GroceryRow, GroceryTable};

struct TableFormatter;

impl TableFormatter {
    fn format_table(table: &GroceryTable) -> String {
        let mut widths = GroceryTable::COLUMNS.map(Self::width);
        for row in table {
            for (width, field) in widths.iter_mut().zip(Self::fields(row)) {
                *width = (*width).max(Self::width(field));
            }
        }

        let mut text = Self::format_line(&GroceryTable::COLUMNS, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
        text.push_str(&Self::format_line(&rule, &widths));
        for row in table {
            text.push_str(&Self::format_line(&Self::fields(row), &widths));
        }
        text
    }

    fn format_csv(table: &GroceryTable) -> String {
        let mut text = GroceryTable::COLUMNS.join(",");
        text.push('\n');
        for row in table {
            let fields: Vec<String> = Self::fields(row)
                .iter()
                .map(|f| Self::csv_field(f))
                .collect();
            text.push_str(&fields.join(","));
            text.push('\n');
        }
        text
    }

    fn format_line(fields: &[&str], widths: &[usize; 3]) -> String {
        let cells: Vec<String> = fields
            .iter()
            .zip(widths)
            .map(|(field, width)| {
                let pad = width.saturating_sub(Self::width(field));
                format!("{field}{}", " ".repeat(pad))
            })
            .collect();
        let mut line = cells.join("  ").trim_end().to_string();
        line.push('\n');
        line
    }

    fn fields(row: &GroceryRow) -> [&str; 3] {
        [&row.item, &row.category, &row.quantity]
    }

    fn width(text: &str) -> usize {
        text.graphemes(true).count()
    }

    fn csv_field(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

/// Render the table as aligned plain text with a header and rule line.
pub fn format_table(table: &GroceryTable) -> String {
    TableFormatter::format_table(table)
}

/// Render the table as CSV: `Item,Category,Quantity` header, one line per
/// row, no index column.
pub fn format_csv(table: &GroceryTable) -> String {
    TableFormatter::format_csv(table)
}

pub fn format_json(table: &GroceryTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

/// Write the CSV export to `path` as UTF-8.
pub fn write_csv(path: &Path, table: &GroceryTable) -> Result<()> {
    std::fs::write(path, format_csv(table))
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = table.len(), "Wrote CSV export");
    Ok(())
}
