use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, impl_string_id};

/// Inventory item identifier. Opaque; assigned once by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl_string_id!(ItemId);

/// Recommended categories offered by the item form.
///
/// Items store their category as plain text, so values outside this set are
/// accepted as long as they are non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Furniture,
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
    Kitchen,
    Clothing,
    Tools,
    Books,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Furniture,
        Category::OfficeSupplies,
        Category::Kitchen,
        Category::Clothing,
        Category::Tools,
        Category::Books,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::OfficeSupplies => "Office Supplies",
            Category::Kitchen => "Kitchen",
            Category::Clothing => "Clothing",
            Category::Tools => "Tools",
            Category::Books => "Books",
            Category::Other => "Other",
        }
    }

    /// Exact (case-sensitive) match against the display names.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

/// Form fields of an item, as reported in field errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemField {
    Name,
    Description,
    Category,
    Quantity,
    Price,
    Supplier,
}

impl ItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Name => "name",
            ItemField::Description => "description",
            ItemField::Category => "category",
            ItemField::Quantity => "quantity",
            ItemField::Price => "price",
            ItemField::Supplier => "supplier",
        }
    }
}

/// A raw numeric form input: either an already-typed number or the text the
/// user entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Number(0.0)
    }
}

impl FormValue {
    /// Coerce to a number the way a browser number input does: surrounding
    /// whitespace is ignored and blank input reads as zero.
    ///
    /// Returns `None` for unparseable or non-finite input.
    pub fn coerce(&self) -> Option<f64> {
        let n = match self {
            FormValue::Number(n) => *n,
            FormValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>().ok()?
                }
            }
        };
        n.is_finite().then_some(n)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Number(value as f64)
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        FormValue::Number(f64::from(value))
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

/// Raw values of the add/edit item form, before validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDraft {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub quantity: FormValue,
    pub price: FormValue,
    pub supplier: Option<String>,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: impl Into<FormValue>,
        price: impl Into<FormValue>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            category: category.into(),
            quantity: quantity.into(),
            price: price.into(),
            supplier: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// Pre-fill an edit form from a stored item.
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: Some(item.description.clone()),
            category: item.category.clone(),
            quantity: FormValue::from(item.quantity),
            price: FormValue::Number(item.price),
            supplier: Some(item.supplier.clone()),
        }
    }
}

/// A fully-typed, normalized item payload. No id or timestamp yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedItem {
    pub name: String,
    pub description: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    pub supplier: String,
}

/// A stored inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    name: String,
    description: String,
    category: String,
    quantity: i64,
    price: f64,
    supplier: String,
    last_updated: DateTime<Utc>,
}

impl Item {
    pub fn new(id: ItemId, fields: ValidatedItem, last_updated: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            category: fields.category,
            quantity: fields.quantity,
            price: fields.price,
            supplier: fields.supplier,
            last_updated,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Stock value: quantity × unit price.
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price
    }

    /// Same record with new field values. The id never changes.
    pub(crate) fn replaced(&self, fields: ValidatedItem, at: DateTime<Utc>) -> Self {
        Self::new(self.id.clone(), fields, at)
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn laptop() -> Item {
        Item::new(
            ItemId::new("1"),
            ValidatedItem {
                name: "Laptop".into(),
                description: String::new(),
                category: "Electronics".into(),
                quantity: 15,
                price: 1200.0,
                supplier: String::new(),
            },
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn item_serializes_with_camel_case_timestamp() {
        let json = serde_json::to_value(laptop()).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["lastUpdated"], "2024-05-01T12:00:00Z");
        assert_eq!(json["quantity"], 15);
    }

    #[test]
    fn form_values_deserialize_from_numbers_or_text() {
        let draft: ItemDraft = serde_json::from_str(
            r#"{"name":"Desk","category":"Furniture","quantity":"3","price":99.5}"#,
        )
        .unwrap();

        assert_eq!(draft.quantity, FormValue::Text("3".into()));
        assert_eq!(draft.price, FormValue::Number(99.5));
        assert_eq!(draft.description, None);
    }

    #[test]
    fn coercion_treats_blank_as_zero_and_rejects_garbage() {
        assert_eq!(FormValue::from("  ").coerce(), Some(0.0));
        assert_eq!(FormValue::from(" 12.5 ").coerce(), Some(12.5));
        assert_eq!(FormValue::from("twelve").coerce(), None);
        assert_eq!(FormValue::from("inf").coerce(), None);
        assert_eq!(FormValue::Number(f64::NAN).coerce(), None);
    }

    #[test]
    fn edit_draft_round_trips_stored_values() {
        let draft = ItemDraft::from_item(&laptop());
        assert_eq!(draft.name, "Laptop");
        assert_eq!(draft.quantity, FormValue::Number(15.0));
        assert_eq!(draft.supplier.as_deref(), Some(""));
    }

    #[test]
    fn categories_parse_by_display_name() {
        assert_eq!(Category::parse("Office Supplies"), Some(Category::OfficeSupplies));
        assert_eq!(Category::parse("office supplies"), None);
        assert_eq!(Category::ALL.len(), 8);
    }
}
