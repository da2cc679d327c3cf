use chrono::{DateTime, Utc};

use stockroom_inventory::{Category, Item, ItemId, ValidatedItem};

/// The demo inventory a fresh session starts with.
pub fn default_items(at: DateTime<Utc>) -> Vec<Item> {
    [
        ("1", "Laptop", Category::Electronics, 15, 1200.0),
        ("2", "Office Chair", Category::Furniture, 25, 250.0),
        ("3", "Printer", Category::Electronics, 5, 350.0),
    ]
    .into_iter()
    .map(|(id, name, category, quantity, price)| {
        Item::new(
            ItemId::new(id),
            ValidatedItem {
                name: name.to_string(),
                description: String::new(),
                category: category.into(),
                quantity,
                price,
                supplier: String::new(),
            },
            at,
        )
    })
    .collect()
}
