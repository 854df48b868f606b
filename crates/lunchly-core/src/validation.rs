//! # Validation Module
//!
//! Input validation run before anything is written to the database.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form                                                     │
//! │  └── Basic required-field checks                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called by save operations)                      │
//! │  ├── Names present and bounded                                         │
//! │  └── Party size positive                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK (num_guests > 0)                                            │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Phone numbers are deliberately free-form and not validated.

use crate::error::ValidationError;
use crate::types::{Customer, Reservation};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a first or last name.
///
/// ## Rules
/// - Must not be blank
/// - At most `MAX_NAME_LENGTH` characters
///
/// ## Example
/// ```rust
/// use lunchly_core::validation::validate_name;
///
/// assert!(validate_name("first_name", "Jane").is_ok());
/// assert!(validate_name("first_name", "  ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates the party size of a reservation (must be at least one guest).
pub fn validate_num_guests(num_guests: i64) -> ValidationResult<()> {
    if num_guests < 1 {
        return Err(ValidationError::MustBePositive {
            field: "num_guests".to_string(),
        });
    }

    Ok(())
}

/// Validates every user-editable field of a customer.
pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    validate_name("first_name", &customer.first_name)?;
    validate_name("last_name", &customer.last_name)
}

/// Validates a reservation before it is saved.
pub fn validate_reservation(reservation: &Reservation) -> ValidationResult<()> {
    validate_num_guests(reservation.num_guests)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("first_name", "Jane").is_ok());
        assert!(validate_name("first_name", "Ng").is_ok());

        assert_eq!(
            validate_name("first_name", ""),
            Err(ValidationError::Required {
                field: "first_name".to_string()
            })
        );
        assert!(validate_name("last_name", "   ").is_err());
        assert!(validate_name("last_name", &"a".repeat(MAX_NAME_LENGTH + 1)).is_err());
        assert!(validate_name("last_name", &"a".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_validate_num_guests() {
        assert!(validate_num_guests(1).is_ok());
        assert!(validate_num_guests(12).is_ok());
        assert!(validate_num_guests(0).is_err());
        assert!(validate_num_guests(-3).is_err());
    }

    #[test]
    fn test_validate_customer() {
        assert!(validate_customer(&Customer::new("Jane", "Doe", "", None)).is_ok());
        assert!(validate_customer(&Customer::new("Jane", "", "", None)).is_err());
        // Phone is free-form.
        assert!(validate_customer(&Customer::new("Jane", "Doe", "call me!", None)).is_ok());
    }
}
