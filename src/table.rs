//! Data types that flow through the grocery pipeline.

use serde::Serialize;
use std::num::NonZeroU32;

/// Category used when the model leaves it out.
pub const DEFAULT_CATEGORY: &str = "General";

/// One user invocation: what is being cooked and for how many people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryRequest {
    meal_description: String,
    servings: NonZeroU32,
}

impl GroceryRequest {
    pub fn new(meal_description: impl Into<String>, servings: NonZeroU32) -> Self {
        Self {
            meal_description: meal_description.into(),
            servings,
        }
    }

    pub fn meal_description(&self) -> &str {
        &self.meal_description
    }

    pub fn servings(&self) -> NonZeroU32 {
        self.servings
    }
}

/// A single grocery line. Every field is free text; the quantity is kept
/// exactly as the model wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroceryRow {
    pub item: String,
    pub category: String,
    pub quantity: String,
}

impl GroceryRow {
    pub fn new(
        item: impl Into<String>,
        category: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            category: category.into(),
            quantity: quantity.into(),
        }
    }

    /// Build a row from already trimmed `|` segments.
    ///
    /// Three or more segments map to item, category and quantity, extra
    /// segments are ignored. Two segments are item and quantity with the
    /// default category. Anything shorter yields `None`.
    pub fn from_segments(segments: &[&str]) -> Option<Self> {
        match segments {
            [item, category, quantity, ..] => Some(Self::new(*item, *category, *quantity)),
            [item, quantity] => Some(Self::new(*item, DEFAULT_CATEGORY, *quantity)),
            _ => None,
        }
    }
}

/// Ordered rows parsed from one model reply. Duplicates are kept and the
/// table may be empty; the column schema is fixed either way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroceryTable {
    rows: Vec<GroceryRow>,
}

impl GroceryTable {
    pub const COLUMNS: [&'static str; 3] = ["Item", "Category", "Quantity"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &'static [&'static str; 3] {
        &Self::COLUMNS
    }

    pub fn rows(&self) -> &[GroceryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroceryRow> {
        self.rows.iter()
    }

    pub(crate) fn push(&mut self, row: GroceryRow) {
        self.rows.push(row);
    }
}

impl FromIterator<GroceryRow> for GroceryTable {
    fn from_iter<I: IntoIterator<Item = GroceryRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for GroceryTable {
    type Item = GroceryRow;
    type IntoIter = std::vec::IntoIter<GroceryRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a GroceryTable {
    type Item = &'a GroceryRow;
    type IntoIter = std::slice::Iter<'a, GroceryRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
