//! Custom field validators used by request DTOs via `#[validate(custom(...))]`.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

/// `NUMERIC(10, 2)`: at most 8 integer digits and 2 fractional digits.
const MAX_PRICE_SCALE: u32 = 2;
const MAX_PRICE_INTEGER_DIGITS: u32 = 8;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Validate a monetary amount against the `NUMERIC(10, 2)` column shape.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(error("price_negative", "Ensure this value is greater than or equal to 0."));
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(error(
            "price_scale",
            "Ensure that there are no more than 2 decimal places.",
        ));
    }
    let integer_part = price.trunc().abs();
    if integer_part >= Decimal::from(10_i64.pow(MAX_PRICE_INTEGER_DIGITS)) {
        return Err(error(
            "price_precision",
            "Ensure that there are no more than 10 digits in total.",
        ));
    }
    Ok(())
}

/// Reject strings made only of whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "This field may not be blank."));
    }
    Ok(())
}
