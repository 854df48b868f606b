//! # Store Traits
//!
//! The seam between [`CustomerSearch`](crate::service::CustomerSearch) and
//! whatever holds the rows.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CustomerSearch<C, R>                                                   │
//! │       │                                                                 │
//! │       ├── C: CustomerStore ─────┬── CustomerRepository  (SQLite)       │
//! │       │                         └── InMemoryStore       (tests)        │
//! │       │                                                                 │
//! │       └── R: ReservationStore ──┬── ReservationRepository (SQLite)     │
//! │                                 └── InMemoryStore         (tests)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method is a single round trip. Implementations return an empty
//! `Vec` for "no rows"; deciding whether that is an error belongs to the
//! caller.

use std::sync::Arc;

use async_trait::async_trait;
use lunchly_core::{
    Customer, CustomerId, RankedCustomer, Reservation, ReservationId, SearchKeyword,
};

use crate::error::DbResult;

/// Customer persistence.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Every customer, ordered by last name then first name.
    async fn all_customers(&self) -> DbResult<Vec<Customer>>;

    async fn find_customer(&self, id: CustomerId) -> DbResult<Option<Customer>>;

    /// Customers whose first or last name contains either keyword token,
    /// case-insensitively, ordered by last name then first name.
    async fn search_customers(&self, keyword: &SearchKeyword) -> DbResult<Vec<Customer>>;

    /// Customers with at least one reservation, most reservations first,
    /// truncated to `limit`.
    async fn top_by_reservation_count(&self, limit: u32) -> DbResult<Vec<RankedCustomer>>;

    /// Inserts a new row and returns the id the store assigned.
    async fn insert_customer(&self, customer: &Customer) -> DbResult<CustomerId>;

    /// Overwrites name, phone and notes of an existing row.
    ///
    /// Fails with `NotFound` when no row has `customer.id`.
    async fn update_customer(&self, customer: &Customer) -> DbResult<()>;

    async fn count_customers(&self) -> DbResult<i64>;
}

/// Reservation persistence.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// All reservations of one customer, earliest first.
    async fn reservations_for_customer(&self, customer_id: CustomerId)
        -> DbResult<Vec<Reservation>>;

    async fn find_reservation(&self, id: ReservationId) -> DbResult<Option<Reservation>>;

    async fn insert_reservation(&self, reservation: &Reservation) -> DbResult<ReservationId>;

    async fn update_reservation(&self, reservation: &Reservation) -> DbResult<()>;
}

// Shared handles: one `Arc<InMemoryStore>` can serve as both stores.

#[async_trait]
impl<T: CustomerStore + ?Sized> CustomerStore for Arc<T> {
    async fn all_customers(&self) -> DbResult<Vec<Customer>> {
        (**self).all_customers().await
    }

    async fn find_customer(&self, id: CustomerId) -> DbResult<Option<Customer>> {
        (**self).find_customer(id).await
    }

    async fn search_customers(&self, keyword: &SearchKeyword) -> DbResult<Vec<Customer>> {
        (**self).search_customers(keyword).await
    }

    async fn top_by_reservation_count(&self, limit: u32) -> DbResult<Vec<RankedCustomer>> {
        (**self).top_by_reservation_count(limit).await
    }

    async fn insert_customer(&self, customer: &Customer) -> DbResult<CustomerId> {
        (**self).insert_customer(customer).await
    }

    async fn update_customer(&self, customer: &Customer) -> DbResult<()> {
        (**self).update_customer(customer).await
    }

    async fn count_customers(&self) -> DbResult<i64> {
        (**self).count_customers().await
    }
}

#[async_trait]
impl<T: ReservationStore + ?Sized> ReservationStore for Arc<T> {
    async fn reservations_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> DbResult<Vec<Reservation>> {
        (**self).reservations_for_customer(customer_id).await
    }

    async fn find_reservation(&self, id: ReservationId) -> DbResult<Option<Reservation>> {
        (**self).find_reservation(id).await
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> DbResult<ReservationId> {
        (**self).insert_reservation(reservation).await
    }

    async fn update_reservation(&self, reservation: &Reservation) -> DbResult<()> {
        (**self).update_reservation(reservation).await
    }
}
