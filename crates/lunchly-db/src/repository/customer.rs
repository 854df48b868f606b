//! # Customer Repository
//!
//! SQLite implementation of [`CustomerStore`].
//!
//! ## Key Operations
//! - Fuzzy name search
//! - "Best customers" ranking by reservation count
//! - CRUD operations
//!
//! ## Name Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Name Search Works                                │
//! │                                                                         │
//! │  User types: "Jane Doyle"   →   ?1 = '%jane%'   ?2 = '%doyle%'         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WHERE first_name LIKE ?1 OR last_name LIKE ?1                         │
//! │     OR first_name LIKE ?2 OR last_name LIKE ?2                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ customers                               │                           │
//! │  │                                         │                           │
//! │  │ 1 | Jane  | Doe    │ ← first_name ~ ?1 │                           │
//! │  │ 2 | John  | Doyle  │ ← last_name  ~ ?2 │                           │
//! │  │ 3 | Alice | Smith  │                   │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: [Jane Doe, John Doyle]  (ORDER BY last_name, first_name)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! SQLite's `LIKE` ignores ASCII case, which gives the same behavior as
//! Postgres `ILIKE` for the lowercase ASCII tokens produced by
//! [`SearchKeyword`]. An absent token is bound as `NULL`; `x LIKE NULL`
//! is never true, so that branch drops out.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::CustomerStore;
use lunchly_core::{
    Customer, CustomerId, CustomerRecord, RankedCustomer, RankedCustomerRecord, SearchKeyword,
};

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// let matches = repo.search_customers(&SearchKeyword::parse("jane")).await?;
/// let best = repo.top_by_reservation_count(10).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn all_customers(&self) -> DbResult<Vec<Customer>> {
        let records = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT id, first_name, last_name, phone, notes
            FROM customers
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Customer::from).collect())
    }

    async fn find_customer(&self, id: CustomerId) -> DbResult<Option<Customer>> {
        let record = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT id, first_name, last_name, phone, notes
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Customer::from))
    }

    /// ## Arguments
    /// * `keyword` - Already-normalized keyword; its raw text is never
    ///   interpolated into SQL, only the bound `%token%` patterns.
    async fn search_customers(&self, keyword: &SearchKeyword) -> DbResult<Vec<Customer>> {
        let [first, second] = keyword.patterns();

        debug!(
            keyword = %keyword.raw(),
            first = ?first,
            second = ?second,
            "Searching customers"
        );

        let records = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT id, first_name, last_name, phone, notes
            FROM customers
            WHERE first_name LIKE ?1
               OR last_name LIKE ?1
               OR first_name LIKE ?2
               OR last_name LIKE ?2
            ORDER BY last_name, first_name
            "#,
        )
        .bind(first)
        .bind(second)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Search returned customers");
        Ok(records.into_iter().map(Customer::from).collect())
    }

    /// ## Ordering
    /// Count descending; ties fall back to last name, first name, id so the
    /// page is stable between calls.
    async fn top_by_reservation_count(&self, limit: u32) -> DbResult<Vec<RankedCustomer>> {
        debug!(limit = %limit, "Ranking customers by reservation count");

        let records = sqlx::query_as::<_, RankedCustomerRecord>(
            r#"
            SELECT
                c.id,
                c.first_name,
                c.last_name,
                c.phone,
                c.notes,
                COUNT(r.id) AS amount
            FROM customers c
            INNER JOIN reservations r ON r.customer_id = c.id
            GROUP BY c.id
            ORDER BY amount DESC, c.last_name, c.first_name, c.id
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(RankedCustomer::from).collect())
    }

    async fn insert_customer(&self, customer: &Customer) -> DbResult<CustomerId> {
        debug!(name = %customer.full_name(), "Inserting customer");

        let id: CustomerId = sqlx::query_scalar(
            r#"
            INSERT INTO customers (first_name, last_name, phone, notes)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.phone)
        .bind(&customer.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_customer(&self, customer: &Customer) -> DbResult<()> {
        let Some(id) = customer.id else {
            return Err(DbError::not_found("Customer", customer.full_name()));
        };

        debug!(id = %id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                first_name = ?1,
                last_name = ?2,
                phone = ?3,
                notes = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.phone)
        .bind(&customer.notes)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    async fn count_customers(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lunchly_core::Reservation;

    use super::*;
    use crate::store::ReservationStore;
    use crate::{Database, DbConfig};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn add(repo: &CustomerRepository, first: &str, last: &str) -> Customer {
        let mut customer = Customer::new(first, last, "555-0100", None);
        customer.id = Some(repo.insert_customer(&customer).await.unwrap());
        customer
    }

    async fn book(db: &Database, customer: &Customer, times: usize) {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        for _ in 0..times {
            let reservation = Reservation::for_customer(customer, start, 2, None).unwrap();
            db.reservations()
                .insert_reservation(&reservation)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = setup().await;
        let repo = db.customers();

        let mut customer = Customer::new("Jane", "Doe", "555-0100", Some("allergic to nuts".into()));
        let id = repo.insert_customer(&customer).await.unwrap();
        customer.id = Some(id);

        let found = repo.find_customer(id).await.unwrap();
        assert_eq!(found, Some(customer));
        assert_eq!(repo.find_customer(id + 1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_all_is_ordered_by_last_then_first_name() {
        let db = setup().await;
        let repo = db.customers();
        add(&repo, "Zoe", "Adams").await;
        add(&repo, "John", "Doyle").await;
        add(&repo, "Amy", "Adams").await;

        let names: Vec<String> = repo
            .all_customers()
            .await
            .unwrap()
            .iter()
            .map(Customer::full_name)
            .collect();

        assert_eq!(names, ["Amy-Adams", "Zoe-Adams", "John-Doyle"]);
    }

    #[tokio::test]
    async fn test_search_matches_either_token_in_either_column() {
        let db = setup().await;
        let repo = db.customers();
        add(&repo, "Jane", "Doe").await;
        add(&repo, "John", "Doyle").await;
        add(&repo, "Alice", "Smith").await;

        let found = repo
            .search_customers(&SearchKeyword::parse("Jane Doyle"))
            .await
            .unwrap();

        let last_names: Vec<&str> = found.iter().map(|c| c.last_name.as_str()).collect();
        assert_eq!(last_names, ["Doe", "Doyle"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let db = setup().await;
        let repo = db.customers();
        add(&repo, "Margaret", "O'Neil").await;

        let found = repo
            .search_customers(&SearchKeyword::parse("GARE"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let found = repo
            .search_customers(&SearchKeyword::parse("neil"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_search_with_no_tokens_matches_nothing() {
        let db = setup().await;
        let repo = db.customers();
        add(&repo, "Jane", "Doe").await;

        for raw in ["", "   ", "1234", "!!! ???"] {
            let found = repo
                .search_customers(&SearchKeyword::parse(raw))
                .await
                .unwrap();
            assert!(found.is_empty(), "{raw:?} should match nothing");
        }
    }

    #[tokio::test]
    async fn test_single_token_only_matches_that_token() {
        let db = setup().await;
        let repo = db.customers();
        add(&repo, "Jane", "Doe").await;
        add(&repo, "Alice", "Smith").await;

        let found = repo
            .search_customers(&SearchKeyword::parse("smi"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Alice");
    }

    #[tokio::test]
    async fn test_top_by_reservation_count() {
        let db = setup().await;
        let repo = db.customers();
        let jane = add(&repo, "Jane", "Doe").await;
        let john = add(&repo, "John", "Doyle").await;
        let _idle = add(&repo, "Ida", "Idle").await;

        book(&db, &jane, 1).await;
        book(&db, &john, 3).await;

        let ranked = repo.top_by_reservation_count(10).await.unwrap();

        assert_eq!(ranked.len(), 2, "customers without reservations are excluded");
        assert_eq!(ranked[0].customer.id, john.id);
        assert_eq!(ranked[0].amount, 3);
        assert_eq!(ranked[1].customer.id, jane.id);
        assert_eq!(ranked[1].amount, 1);
    }

    #[tokio::test]
    async fn test_top_respects_limit() {
        let db = setup().await;
        let repo = db.customers();
        for i in 0..12 {
            let customer = add(&repo, "Guest", &format!("Number{}", (b'a' + i) as char)).await;
            book(&db, &customer, 1 + i as usize % 3).await;
        }

        let ranked = repo.top_by_reservation_count(10).await.unwrap();
        assert_eq!(ranked.len(), 10);
        assert!(ranked.windows(2).all(|w| w[0].amount >= w[1].amount));
    }

    #[tokio::test]
    async fn test_top_is_empty_without_reservations() {
        let db = setup().await;
        let repo = db.customers();
        add(&repo, "Jane", "Doe").await;

        assert!(repo.top_by_reservation_count(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let db = setup().await;
        let repo = db.customers();
        let mut customer = add(&repo, "Jane", "Doe").await;

        customer.phone = "555-0199".to_string();
        customer.notes = Some("prefers patio".to_string());
        repo.update_customer(&customer).await.unwrap();

        assert_eq!(repo.count_customers().await.unwrap(), 1);
        let found = repo.find_customer(customer.id.unwrap()).await.unwrap();
        assert_eq!(found, Some(customer));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = setup().await;
        let repo = db.customers();

        let mut ghost = Customer::new("No", "Body", "", None);
        ghost.id = Some(999);
        let err = repo.update_customer(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
