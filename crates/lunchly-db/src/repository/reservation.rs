//! # Reservation Repository
//!
//! SQLite implementation of [`ReservationStore`]. This is the collaborator
//! that `CustomerSearch::get_reservations` delegates to.
//!
//! ## Reservation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Reservation Lifecycle                               │
//! │                                                                         │
//! │  1. BUILD                                                              │
//! │     └── Reservation::for_customer(&customer, start_at, guests, notes)  │
//! │         (customer must already be saved)                               │
//! │                                                                         │
//! │  2. SAVE                                                               │
//! │     └── id == None → INSERT ... RETURNING id                           │
//! │     └── id == Some → UPDATE ... WHERE id = ?                           │
//! │                                                                         │
//! │  3. READ                                                               │
//! │     └── reservations_for_customer(customer_id), earliest first         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::ReservationStore;
use lunchly_core::validation::validate_reservation;
use lunchly_core::{CustomerId, Reservation, ReservationId, ReservationRecord};

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Inserts or updates a reservation, assigning the new id on insert.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - fewer than one guest
    /// * `Err(DbError::NotFound)` - updating a reservation that no longer exists
    /// * `Err(DbError::Store)` - e.g. the customer does not exist (foreign key)
    pub async fn save(&self, reservation: &mut Reservation) -> DbResult<()> {
        validate_reservation(reservation)?;

        match reservation.id {
            None => {
                reservation.id = Some(self.insert_reservation(reservation).await?);
            }
            Some(_) => self.update_reservation(reservation).await?,
        }

        Ok(())
    }

    /// Counts total reservations (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ReservationStore for ReservationRepository {
    async fn reservations_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> DbResult<Vec<Reservation>> {
        debug!(customer_id = %customer_id, "Loading reservations for customer");

        let records = sqlx::query_as::<_, ReservationRecord>(
            r#"
            SELECT id, customer_id, start_at, num_guests, notes
            FROM reservations
            WHERE customer_id = ?1
            ORDER BY start_at, id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Reservation::from).collect())
    }

    async fn find_reservation(&self, id: ReservationId) -> DbResult<Option<Reservation>> {
        let record = sqlx::query_as::<_, ReservationRecord>(
            r#"
            SELECT id, customer_id, start_at, num_guests, notes
            FROM reservations
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Reservation::from))
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> DbResult<ReservationId> {
        debug!(customer_id = %reservation.customer_id, "Inserting reservation");

        let id: ReservationId = sqlx::query_scalar(
            r#"
            INSERT INTO reservations (customer_id, start_at, num_guests, notes)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(reservation.customer_id)
        .bind(reservation.start_at)
        .bind(reservation.num_guests)
        .bind(&reservation.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_reservation(&self, reservation: &Reservation) -> DbResult<()> {
        let Some(id) = reservation.id else {
            return Err(DbError::not_found("Reservation", "unsaved"));
        };

        debug!(id = %id, "Updating reservation");

        let result = sqlx::query(
            r#"
            UPDATE reservations SET
                customer_id = ?1,
                start_at = ?2,
                num_guests = ?3,
                notes = ?4
            WHERE id = ?5
            "#,
        )
        .bind(reservation.customer_id)
        .bind(reservation.start_at)
        .bind(reservation.num_guests)
        .bind(&reservation.notes)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Reservation", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use lunchly_core::Customer;

    use super::*;
    use crate::store::CustomerStore;
    use crate::{Database, DbConfig};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    async fn setup() -> (Database, Customer) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut customer = Customer::new("Jane", "Doe", "555-0100", None);
        customer.id = Some(db.customers().insert_customer(&customer).await.unwrap());
        (db, customer)
    }

    #[tokio::test]
    async fn test_save_inserts_then_updates() {
        let (db, customer) = setup().await;
        let repo = db.reservations();

        let mut reservation = Reservation::for_customer(&customer, at(3, 19), 4, None).unwrap();
        repo.save(&mut reservation).await.unwrap();
        let id = reservation.id.expect("id assigned on insert");

        reservation.num_guests = 6;
        reservation.notes = Some("birthday".to_string());
        repo.save(&mut reservation).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.find_reservation(id).await.unwrap(), Some(reservation));
    }

    #[tokio::test]
    async fn test_reservations_for_customer_are_chronological() {
        let (db, customer) = setup().await;
        let repo = db.reservations();

        for (day, hour) in [(9, 12), (2, 18), (5, 13)] {
            let mut r = Reservation::for_customer(&customer, at(day, hour), 2, None).unwrap();
            repo.save(&mut r).await.unwrap();
        }

        let found = repo
            .reservations_for_customer(customer.id.unwrap())
            .await
            .unwrap();
        let starts: Vec<NaiveDateTime> = found.iter().map(|r| r.start_at).collect();
        assert_eq!(starts, [at(2, 18), at(5, 13), at(9, 12)]);
    }

    #[tokio::test]
    async fn test_zero_guests_is_rejected() {
        let (db, customer) = setup().await;

        let mut reservation = Reservation::for_customer(&customer, at(1, 12), 0, None).unwrap();
        let err = db.reservations().save(&mut reservation).await.unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(reservation.id, None);
    }

    #[tokio::test]
    async fn test_unknown_customer_is_a_store_failure() {
        let (db, _) = setup().await;

        let mut stranger = Customer::new("Ghost", "Guest", "", None);
        stranger.id = Some(4242);
        let mut reservation = Reservation::for_customer(&stranger, at(1, 12), 2, None).unwrap();

        let err = db.reservations().save(&mut reservation).await.unwrap_err();
        assert!(matches!(err, DbError::Store(_)));
    }
}
