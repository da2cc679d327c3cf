//! Item schema validation.
//!
//! Every field is checked independently and all violations are reported
//! together, so a form can highlight each bad field at once.

use stockroom_core::{Entity, FieldError};

use crate::item::{FormValue, Item, ItemDraft, ItemField, ItemId, ValidatedItem};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 20;

/// Validate a draft against the current collection.
///
/// `editing_id` names the item being replaced, which may keep its own name.
pub fn validate(
    draft: &ItemDraft,
    existing: &[Item],
    editing_id: Option<&ItemId>,
) -> Result<ValidatedItem, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = draft.name.trim();
    check_name(name, existing, editing_id, &mut errors);

    let category = draft.category.trim();
    if category.is_empty() {
        errors.push(error(ItemField::Category, "Please select a category"));
    }

    let quantity = coerce_quantity(&draft.quantity, &mut errors);
    let price = coerce_price(&draft.price, &mut errors);

    match (quantity, price) {
        (Some(quantity), Some(price)) if errors.is_empty() => Ok(ValidatedItem {
            name: name.to_string(),
            description: draft.description.clone().unwrap_or_default(),
            category: category.to_string(),
            quantity,
            price,
            supplier: draft.supplier.clone().unwrap_or_default(),
        }),
        _ => Err(errors),
    }
}

/// Case-insensitive name comparison used for uniqueness.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn check_name(
    name: &str,
    existing: &[Item],
    editing_id: Option<&ItemId>,
    errors: &mut Vec<FieldError>,
) {
    let len = name.chars().count();
    if len < NAME_MIN_LEN {
        errors.push(error(
            ItemField::Name,
            format!("Name must be at least {NAME_MIN_LEN} characters"),
        ));
    } else if len > NAME_MAX_LEN {
        errors.push(error(
            ItemField::Name,
            format!("Name cannot exceed {NAME_MAX_LEN} characters"),
        ));
    }

    let taken = existing
        .iter()
        .filter(|item| Some(item.id()) != editing_id)
        .any(|item| names_match(item.name(), name));
    if taken {
        errors.push(error(ItemField::Name, "An item with this name already exists"));
    }
}

fn coerce_quantity(value: &FormValue, errors: &mut Vec<FieldError>) -> Option<i64> {
    let Some(n) = value.coerce() else {
        errors.push(error(ItemField::Quantity, "Quantity must be a number"));
        return None;
    };
    if n.fract() != 0.0 {
        errors.push(error(ItemField::Quantity, "Quantity must be a whole number"));
        return None;
    }
    if n <= 0.0 {
        errors.push(error(ItemField::Quantity, "Quantity must be greater than 0"));
        return None;
    }
    // i64::MAX as f64 rounds up to 2^63, which does not fit
    if n >= i64::MAX as f64 {
        errors.push(error(ItemField::Quantity, "Quantity is too large"));
        return None;
    }
    Some(n as i64)
}

fn coerce_price(value: &FormValue, errors: &mut Vec<FieldError>) -> Option<f64> {
    let Some(n) = value.coerce() else {
        errors.push(error(ItemField::Price, "Price must be a number"));
        return None;
    };
    if n <= 0.0 {
        errors.push(error(ItemField::Price, "Price must be greater than 0"));
        return None;
    }
    Some(n)
}

fn error(field: ItemField, message: impl Into<String>) -> FieldError {
    FieldError::new(field.as_str(), message)
}
