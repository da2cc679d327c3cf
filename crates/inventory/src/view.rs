//! Derived views over a snapshot of items: search, sort, and the report.
//!
//! Everything here is a pure function of its input; the store is never touched.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Items with a quantity strictly below this are low on stock.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    Category,
    Description,
    Quantity,
    Price,
    Supplier,
    LastUpdated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort column of the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Header-click behavior: the active column flips direction, another
    /// column becomes active in ascending order.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.reversed();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Case-insensitive substring search on item names.
///
/// A blank term keeps every item; order is always preserved.
pub fn filter_by_name<'a>(items: impl IntoIterator<Item = &'a Item>, term: &str) -> Vec<&'a Item> {
    let needle = term.trim().to_lowercase();
    items
        .into_iter()
        .filter(|item| needle.is_empty() || item.name().to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort. Items comparing equal keep their input order in both directions.
pub fn sort_by<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a Item> {
    let mut sorted: Vec<&Item> = items.into_iter().collect();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

fn compare(a: &Item, b: &Item, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name().cmp(b.name()),
        SortField::Category => a.category().cmp(b.category()),
        SortField::Description => a.description().cmp(b.description()),
        SortField::Supplier => a.supplier().cmp(b.supplier()),
        SortField::Quantity => a.quantity().cmp(&b.quantity()),
        SortField::Price => a.price().total_cmp(&b.price()),
        SortField::LastUpdated => a.last_updated().cmp(&b.last_updated()),
    }
}

/// Per-category totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub value: f64,
}

/// Inventory report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_items: usize,
    /// Σ quantity × price.
    pub total_value: f64,
    /// Items below `LOW_STOCK_THRESHOLD`, in input order.
    pub low_stock: Vec<Item>,
    /// Highest value first; equal values keep first-seen order.
    pub category_breakdown: Vec<CategorySummary>,
}

pub fn aggregate<'a>(items: impl IntoIterator<Item = &'a Item>) -> Report {
    let mut total_items = 0;
    let mut total_value = 0.0;
    let mut low_stock = Vec::new();
    let mut breakdown: Vec<CategorySummary> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let value = item.value();
        total_items += 1;
        total_value += value;

        if item.quantity() < LOW_STOCK_THRESHOLD {
            low_stock.push(item.clone());
        }

        let slot = *slots.entry(item.category()).or_insert_with(|| {
            breakdown.push(CategorySummary {
                category: item.category().to_string(),
                count: 0,
                value: 0.0,
            });
            breakdown.len() - 1
        });
        breakdown[slot].count += 1;
        breakdown[slot].value += value;
    }

    breakdown.sort_by(|a, b| b.value.total_cmp(&a.value));

    Report {
        total_items,
        total_value,
        low_stock,
        category_breakdown: breakdown,
    }
}
