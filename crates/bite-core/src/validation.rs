//! # Validation Module
//!
//! Input validation for Yellow Bite.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form input (shell / web frontend)                            │
//! │  └── Type validation (parsing, deserialization)                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE: Business rule validation                        │
//! │  ├── Delivery address (ZIP, phone, lengths)                            │
//! │  ├── Registration (name, email, password)                              │
//! │  └── Persisted cart entries (structural check at the store boundary)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bite_core::validation::{validate_phone_number, validate_zip_code};
//!
//! assert!(validate_zip_code("10001-1234").is_ok());
//! assert!(validate_phone_number("+1 (555) 123-4567").is_ok());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartEntry, DeliveryAddress};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a menu search query.
pub const MAX_SEARCH_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn validate_min_len(field: &str, value: &str, min: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() < min {
        return Err(ValidationError::too_short(field, min));
    }

    Ok(())
}

/// Validates a menu search query and returns it trimmed.
///
/// Empty is fine (matches the whole menu).
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Delivery Address
// =============================================================================

/// Validates a US ZIP code: `12345` or `12345-6789`.
pub fn validate_zip_code(zip: &str) -> ValidationResult<()> {
    let zip = zip.trim();
    let all_digits = |s: &str, len: usize| s.len() == len && s.chars().all(|c| c.is_ascii_digit());

    let valid = match zip.split_once('-') {
        Some((base, plus4)) => all_digits(base, 5) && all_digits(plus4, 4),
        None => all_digits(zip, 5),
    };

    if !valid {
        return Err(ValidationError::invalid_format(
            "zipCode",
            "please enter a valid ZIP code",
        ));
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Optional leading `+`
/// - At least 10 characters after it, each a digit, space, `-`, `(` or `)`
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    let body = phone.strip_prefix('+').unwrap_or(phone);

    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')');

    if body.chars().count() < 10 || !body.chars().all(allowed) {
        return Err(ValidationError::invalid_format(
            "phoneNumber",
            "please enter a valid phone number",
        ));
    }

    Ok(())
}

/// Validates every field of a delivery address.
///
/// ## Rules
/// - street ≥ 5 characters, city ≥ 2, state ≥ 2
/// - ZIP and phone as in [`validate_zip_code`] / [`validate_phone_number`]
/// - landmark is free text
pub fn validate_address(address: &DeliveryAddress) -> ValidationResult<()> {
    validate_min_len("street", &address.street, 5)?;
    validate_min_len("city", &address.city, 2)?;
    validate_min_len("state", &address.state, 2)?;
    validate_zip_code(&address.zip_code)?;
    validate_phone_number(&address.phone_number)?;
    Ok(())
}

// =============================================================================
// Accounts
// =============================================================================

/// Minimal email shape check: `local@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    let invalid = || ValidationError::invalid_format("email", "please enter a valid email address");

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let domain_ok = !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));

    if local.is_empty() || !domain_ok {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a registration form.
///
/// ## Rules
/// - name ≥ 2 characters
/// - valid email
/// - password ≥ 6 characters
/// - confirmation equals password
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationResult<()> {
    validate_min_len("name", name, 2)?;
    validate_email(email)?;

    if password.chars().count() < 6 {
        return Err(ValidationError::too_short("password", 6));
    }

    if password != confirm_password {
        return Err(ValidationError::Mismatch {
            field: "confirmPassword".to_string(),
            other: "password".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Persisted Cart Entries
// =============================================================================

/// Structural check for entries read back from the durable store.
///
/// Serde already rejects records of the wrong shape. This catches records
/// that parse but break cart invariants.
///
/// ## Rules
/// - entry id and item id are non-empty
/// - quantity ≥ 1
/// - price ≥ 0
/// - every line total and the cart total fit in i64 cents
/// - no two entries share an entry id or an item id
pub fn validate_cart_entries(entries: &[CartEntry]) -> ValidationResult<()> {
    let mut seen_items = HashSet::with_capacity(entries.len());
    let mut seen_entries = HashSet::with_capacity(entries.len());
    let mut total = Money::zero();

    for entry in entries {
        if entry.id.trim().is_empty() {
            return Err(ValidationError::required("entry id"));
        }

        if entry.item.id.trim().is_empty() {
            return Err(ValidationError::required("item id"));
        }

        if entry.quantity == 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }

        if entry.item.price.is_negative() {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            });
        }

        total = entry
            .item
            .price
            .checked_multiply_quantity(entry.quantity as i64)
            .and_then(|line| total.checked_add(line))
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "cart total".to_string(),
            })?;

        if !seen_entries.insert(entry.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "entry id".to_string(),
                value: entry.id.clone(),
            });
        }

        if !seen_items.insert(entry.item.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: entry.item.id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::CatalogItem;

    fn address() -> DeliveryAddress {
        DeliveryAddress {
            street: "123 Main Street".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            landmark: None,
            phone_number: "+1 (555) 123-4567".to_string(),
            is_default: false,
        }
    }

    fn entry(id: &str, item_id: &str, quantity: u32, price: i64) -> CartEntry {
        CartEntry {
            id: id.to_string(),
            item: CatalogItem::new(item_id, "Dish", Money::from_cents(price)),
            quantity,
            special_instructions: None,
        }
    }

    #[test]
    fn test_validate_zip_code() {
        assert!(validate_zip_code("12345").is_ok());
        assert!(validate_zip_code("12345-6789").is_ok());

        assert!(validate_zip_code("1234").is_err());
        assert!(validate_zip_code("123456").is_err());
        assert!(validate_zip_code("12345-678").is_err());
        assert!(validate_zip_code("ABCDE").is_err());
        assert!(validate_zip_code("").is_err());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("5551234567").is_ok());
        assert!(validate_phone_number("+1 (555) 123-4567").is_ok());

        assert!(validate_phone_number("555-1234").is_err());
        assert!(validate_phone_number("555.123.4567").is_err());
        assert!(validate_phone_number("++15551234567").is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address(&address()).is_ok());

        let short_street = DeliveryAddress {
            street: "1 A".to_string(),
            ..address()
        };
        assert_eq!(
            validate_address(&short_street),
            Err(ValidationError::too_short("street", 5))
        );

        let no_city = DeliveryAddress {
            city: "  ".to_string(),
            ..address()
        };
        assert_eq!(
            validate_address(&no_city),
            Err(ValidationError::required("city"))
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane@example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("jane").is_err());
        assert!(validate_email("jane@example").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("jane doe@example.com").is_err());
        assert!(validate_email("jane@@example.com").is_err());
    }

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration("Jane", "jane@example.com", "secret1", "secret1").is_ok());

        assert!(validate_registration("J", "jane@example.com", "secret1", "secret1").is_err());
        assert!(validate_registration("Jane", "jane@example.com", "12345", "12345").is_err());
        assert!(matches!(
            validate_registration("Jane", "jane@example.com", "secret1", "secret2"),
            Err(ValidationError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  pizza ").unwrap(), "pizza");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_cart_entries() {
        assert!(validate_cart_entries(&[]).is_ok());
        assert!(validate_cart_entries(&[entry("e1", "p1", 1, 999), entry("e2", "p2", 3, 0)]).is_ok());

        assert!(validate_cart_entries(&[entry("e1", "p1", 0, 999)]).is_err());
        assert!(validate_cart_entries(&[entry("", "p1", 1, 999)]).is_err());
        assert!(validate_cart_entries(&[entry("e1", "p1", 1, -5)]).is_err());
        assert!(matches!(
            validate_cart_entries(&[entry("e1", "p1", 1, 999), entry("e2", "p1", 1, 999)]),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_cart_entries_rejects_shared_entry_id() {
        let err = validate_cart_entries(&[entry("e1", "p1", 1, 999), entry("e1", "p2", 1, 499)])
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Duplicate {
                field: "entry id".to_string(),
                value: "e1".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_cart_entries_rejects_overflowing_totals() {
        let line = entry("e1", "p1", 2, 5_000_000_000_000_000_000);
        assert!(matches!(
            validate_cart_entries(&[line]),
            Err(ValidationError::OutOfRange { .. })
        ));

        // Each line fits, the sum does not.
        let a = entry("e1", "p1", 1, i64::MAX - 10);
        let b = entry("e2", "p2", 1, 20);
        assert!(validate_cart_entries(&[a.clone()]).is_ok());
        assert!(matches!(
            validate_cart_entries(&[a, b]),
            Err(ValidationError::OutOfRange { .. })
        ));

        let max_qty = entry("e1", "p1", u32::MAX, 1299);
        assert!(validate_cart_entries(&[max_qty]).is_ok());
    }
}
