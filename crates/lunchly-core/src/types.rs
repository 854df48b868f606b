//! # Domain Types
//!
//! Core domain types used throughout Lunchly.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │ RankedCustomer  │   │  Reservation    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (Option)    │◄──│  customer       │   │  id (Option)    │       │
//! │  │  first_name     │   │  amount (count) │   │  customer_id ───┼──►    │
//! │  │  last_name      │   └─────────────────┘   │  start_at       │       │
//! │  │  phone, notes   │                         │  num_guests     │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  CustomerRecord / ReservationRecord: typed rows read from storage.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are assigned by the store on first save. A value built from user
//! input has `id: None`; a value built from a record always has `Some(id)`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Store-assigned customer identifier.
pub type CustomerId = i64;

/// Store-assigned reservation identifier.
pub type ReservationId = i64;

// =============================================================================
// Customer
// =============================================================================

/// A persisted customer row, exactly as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub notes: Option<String>,
}

/// A customer of the restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned id; `None` until the first save.
    pub id: Option<CustomerId>,

    pub first_name: String,

    pub last_name: String,

    /// Free-form phone number (not validated).
    pub phone: String,

    pub notes: Option<String>,
}

impl Customer {
    /// Creates an unsaved customer from user input.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Customer {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            notes,
        }
    }

    /// Builds a persisted customer from a storage row.
    pub fn from_record(record: CustomerRecord) -> Self {
        Customer {
            id: Some(record.id),
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
            notes: record.notes,
        }
    }

    /// First and last name joined with `-` (e.g. `Jane-Doe`).
    pub fn full_name(&self) -> String {
        format!("{}-{}", self.first_name, self.last_name)
    }

    /// Whether this customer has been saved at least once.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the id, or an error naming the customer when it was never saved.
    pub fn require_id(&self) -> CoreResult<CustomerId> {
        self.id
            .ok_or_else(|| CoreError::UnsavedCustomer(self.full_name()))
    }
}

impl From<CustomerRecord> for Customer {
    fn from(record: CustomerRecord) -> Self {
        Customer::from_record(record)
    }
}

// =============================================================================
// Ranked Customer
// =============================================================================

/// Row shape of the ranking query: a customer plus its reservation count.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RankedCustomerRecord {
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub customer: CustomerRecord,
    pub amount: i64,
}

/// A customer together with how many reservations they have made.
///
/// Only produced by the "top customers" ranking; `amount` is derived and
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCustomer {
    pub customer: Customer,

    /// Number of reservations held by `customer`.
    pub amount: i64,
}

impl From<RankedCustomerRecord> for RankedCustomer {
    fn from(record: RankedCustomerRecord) -> Self {
        RankedCustomer {
            customer: Customer::from_record(record.customer),
            amount: record.amount,
        }
    }
}

// =============================================================================
// Reservation
// =============================================================================

/// A persisted reservation row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ReservationRecord {
    pub id: ReservationId,
    pub customer_id: CustomerId,
    pub start_at: NaiveDateTime,
    pub num_guests: i64,
    pub notes: Option<String>,
}

/// A table booking made by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Store-assigned id; `None` until the first save.
    pub id: Option<ReservationId>,
    pub customer_id: CustomerId,
    pub start_at: NaiveDateTime,
    pub num_guests: i64,
    pub notes: Option<String>,
}

impl Reservation {
    /// Creates an unsaved reservation for a saved customer.
    ///
    /// ## Errors
    /// `CoreError::UnsavedCustomer` when `customer` has no id yet.
    pub fn for_customer(
        customer: &Customer,
        start_at: NaiveDateTime,
        num_guests: i64,
        notes: Option<String>,
    ) -> CoreResult<Self> {
        Ok(Reservation {
            id: None,
            customer_id: customer.require_id()?,
            start_at,
            num_guests,
            notes,
        })
    }

    /// Builds a persisted reservation from a storage row.
    pub fn from_record(record: ReservationRecord) -> Self {
        Reservation {
            id: Some(record.id),
            customer_id: record.customer_id,
            start_at: record.start_at,
            num_guests: record.num_guests,
            notes: record.notes,
        }
    }
}

impl From<ReservationRecord> for Reservation {
    fn from(record: ReservationRecord) -> Self {
        Reservation::from_record(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_customer_is_unsaved() {
        let customer = Customer::new("Jane", "Doe", "555-0100", None);
        assert_eq!(customer.id, None);
        assert!(!customer.is_persisted());
        assert!(customer.require_id().is_err());
    }

    #[test]
    fn test_customer_from_record() {
        let customer = Customer::from_record(CustomerRecord {
            id: 7,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: "555-0100".to_string(),
            notes: Some("window seat".to_string()),
        });

        assert_eq!(customer.id, Some(7));
        assert_eq!(customer.require_id().unwrap(), 7);
        assert_eq!(customer.notes.as_deref(), Some("window seat"));
    }

    #[test]
    fn test_full_name() {
        let customer = Customer::new("Jane", "Doe", "", None);
        assert_eq!(customer.full_name(), "Jane-Doe");
    }

    #[test]
    fn test_ranked_customer_from_record() {
        let ranked = RankedCustomer::from(RankedCustomerRecord {
            customer: CustomerRecord {
                id: 3,
                first_name: "John".to_string(),
                last_name: "Doyle".to_string(),
                phone: String::new(),
                notes: None,
            },
            amount: 4,
        });

        assert_eq!(ranked.amount, 4);
        assert_eq!(ranked.customer.id, Some(3));
    }

    #[test]
    fn test_reservation_requires_saved_customer() {
        let unsaved = Customer::new("Jane", "Doe", "", None);
        let err = Reservation::for_customer(&unsaved, noon(), 2, None).unwrap_err();
        assert!(matches!(err, CoreError::UnsavedCustomer(_)));

        let saved = Customer {
            id: Some(11),
            ..unsaved
        };
        let reservation = Reservation::for_customer(&saved, noon(), 2, None).unwrap();
        assert_eq!(reservation.customer_id, 11);
        assert_eq!(reservation.id, None);
    }

    #[test]
    fn test_customer_serializes_with_optional_id() {
        let customer = Customer::new("Jane", "Doe", "555-0100", None);
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["id"], serde_json::Value::Null);
        assert_eq!(json["first_name"], "Jane");
    }
}
