use uuid::Uuid;

use crate::models::PriceInput;

pub const INVALID_ENTRY: &str = "Invalid entry";

pub fn non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Drops a missing or blank optional field.
pub fn required_text(value: Option<String>) -> Option<String> {
    value.filter(|value| non_empty(value))
}

pub fn is_well_formed_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

/// Accepts a finite, non-negative price and renders it with exactly two
/// fractional digits. Anything else is rejected.
pub fn normalize_price(price: &PriceInput) -> Option<String> {
    let value = match price {
        PriceInput::Number(value) => *value,
        PriceInput::Text(raw) => raw.trim().parse::<f64>().ok()?,
    };

    if !value.is_finite() || value < 0.0 {
        return None;
    }

    Some(format!("{value:.2}"))
}
