//! # CustomerSearch
//!
//! The customer-facing operations of Lunchly: fuzzy name search, the "best
//! customers" ranking, and the plain get / list / save shell around them.
//!
//! ## Contracts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation                  │ No rows                                   │
//! │ ────────────────────────────┼────────────────────────────────────────── │
//! │  search(keyword)            │ Err(NoMatch { keyword })  (404)           │
//! │  get(id)                    │ Err(NotFound { "Customer", id }) (404)    │
//! │  top_customers()            │ Ok(vec![])                                │
//! │  all()                      │ Ok(vec![])                                │
//! │  get_reservations(customer) │ Ok(vec![])                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Search and ranking disagree on empty results on purpose; route handlers
//! depend on catching `NoMatch` to render the "no match" page.

use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{CustomerStore, ReservationStore};
use lunchly_core::validation::validate_customer;
use lunchly_core::{
    Customer, CustomerId, RankedCustomer, Reservation, SearchKeyword, DEFAULT_TOP_LIMIT,
};

/// Customer search, ranking and CRUD over injected stores.
///
/// ## Usage
/// ```rust,ignore
/// // Production: SQLite-backed
/// let service = db.customer_search();
///
/// // Tests: any CustomerStore + ReservationStore
/// let store = Arc::new(InMemoryStore::new());
/// let service = CustomerSearch::new(store.clone(), store);
///
/// match service.search("jane doe").await {
///     Ok(customers) => render_list(customers),
///     Err(e) if e.is_not_found() => render_404(e),
///     Err(e) => return Err(e),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CustomerSearch<C, R> {
    customers: C,
    reservations: R,
}

impl<C, R> CustomerSearch<C, R>
where
    C: CustomerStore,
    R: ReservationStore,
{
    pub fn new(customers: C, reservations: R) -> Self {
        CustomerSearch {
            customers,
            reservations,
        }
    }

    /// Finds customers whose first or last name contains either of the
    /// first two keyword tokens.
    ///
    /// ## Errors
    /// * `DbError::NoMatch` - nothing matched; carries `keyword` unchanged
    /// * `DbError::Store` - the query failed
    pub async fn search(&self, keyword: &str) -> DbResult<Vec<Customer>> {
        let parsed = SearchKeyword::parse(keyword);
        debug!(keyword = %keyword, tokens = ?parsed.tokens(), "Customer search");

        let customers = self.customers.search_customers(&parsed).await?;

        if customers.is_empty() {
            return Err(DbError::no_match(keyword));
        }

        Ok(customers)
    }

    /// The `DEFAULT_TOP_LIMIT` customers with the most reservations.
    pub async fn top_customers(&self) -> DbResult<Vec<RankedCustomer>> {
        self.top_by_reservation_count(DEFAULT_TOP_LIMIT).await
    }

    /// Customers ranked by reservation count, at most `limit` of them.
    ///
    /// Returns an empty list when nobody has a reservation.
    pub async fn top_by_reservation_count(&self, limit: u32) -> DbResult<Vec<RankedCustomer>> {
        let ranked = self.customers.top_by_reservation_count(limit).await?;
        debug!(limit = %limit, count = ranked.len(), "Ranked customers");
        Ok(ranked)
    }

    /// Every customer, ordered by last name then first name.
    pub async fn all(&self) -> DbResult<Vec<Customer>> {
        self.customers.all_customers().await
    }

    /// A single customer.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no customer has this id
    pub async fn get(&self, id: CustomerId) -> DbResult<Customer> {
        self.customers
            .find_customer(id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id))
    }

    /// Inserts a new customer or updates an existing one.
    ///
    /// A customer without an id is inserted and receives the id the store
    /// assigned. Otherwise its name, phone and notes overwrite the stored
    /// row (last write wins).
    pub async fn save(&self, customer: &mut Customer) -> DbResult<()> {
        validate_customer(customer)?;

        match customer.id {
            None => {
                let id = self.customers.insert_customer(customer).await?;
                debug!(id = %id, "Customer created");
                customer.id = Some(id);
            }
            Some(id) => {
                self.customers.update_customer(customer).await?;
                debug!(id = %id, "Customer updated");
            }
        }

        Ok(())
    }

    /// Reservations held by `customer`, earliest first.
    ///
    /// A customer that was never saved cannot have any.
    pub async fn get_reservations(&self, customer: &Customer) -> DbResult<Vec<Reservation>> {
        match customer.id {
            Some(id) => self.reservations.reservations_for_customer(id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Number of stored customers.
    pub async fn count(&self) -> DbResult<i64> {
        self.customers.count_customers().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
