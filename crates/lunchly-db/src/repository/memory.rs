//! In-memory [`CustomerStore`] and [`ReservationStore`] for tests and demos.
//!
//! Reproduces the SQLite repositories' ordering, matching and counting
//! rules without a database.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{DbError, DbResult};
use crate::store::{CustomerStore, ReservationStore};
use lunchly_core::{
    Customer, CustomerId, RankedCustomer, Reservation, ReservationId, SearchKeyword,
};

#[derive(Default)]
struct Tables {
    customers: BTreeMap<CustomerId, Customer>,
    reservations: BTreeMap<ReservationId, Reservation>,
    next_customer_id: CustomerId,
    next_reservation_id: ReservationId,
}

/// Customers and reservations held in a pair of maps behind one lock.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_name(a: &Customer, b: &Customer) -> Ordering {
    a.last_name
        .cmp(&b.last_name)
        .then_with(|| a.first_name.cmp(&b.first_name))
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn all_customers(&self) -> DbResult<Vec<Customer>> {
        let tables = self.tables.read().await;
        let mut customers: Vec<Customer> = tables.customers.values().cloned().collect();
        customers.sort_by(by_name);
        Ok(customers)
    }

    async fn find_customer(&self, id: CustomerId) -> DbResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.get(&id).cloned())
    }

    async fn search_customers(&self, keyword: &SearchKeyword) -> DbResult<Vec<Customer>> {
        let tables = self.tables.read().await;
        let mut customers: Vec<Customer> = tables
            .customers
            .values()
            .filter(|c| keyword.matches(&c.first_name) || keyword.matches(&c.last_name))
            .cloned()
            .collect();
        customers.sort_by(by_name);
        Ok(customers)
    }

    async fn top_by_reservation_count(&self, limit: u32) -> DbResult<Vec<RankedCustomer>> {
        let tables = self.tables.read().await;

        let mut counts: BTreeMap<CustomerId, i64> = BTreeMap::new();
        for reservation in tables.reservations.values() {
            *counts.entry(reservation.customer_id).or_default() += 1;
        }

        let mut ranked: Vec<RankedCustomer> = counts
            .into_iter()
            .filter_map(|(id, amount)| {
                tables.customers.get(&id).map(|customer| RankedCustomer {
                    customer: customer.clone(),
                    amount,
                })
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| by_name(&a.customer, &b.customer))
                .then_with(|| a.customer.id.cmp(&b.customer.id))
        });
        ranked.truncate(limit as usize);
        Ok(ranked)
    }

    async fn insert_customer(&self, customer: &Customer) -> DbResult<CustomerId> {
        let mut tables = self.tables.write().await;
        tables.next_customer_id += 1;
        let id = tables.next_customer_id;

        let mut stored = customer.clone();
        stored.id = Some(id);
        tables.customers.insert(id, stored);
        Ok(id)
    }

    async fn update_customer(&self, customer: &Customer) -> DbResult<()> {
        let Some(id) = customer.id else {
            return Err(DbError::not_found("Customer", customer.full_name()));
        };

        let mut tables = self.tables.write().await;
        match tables.customers.get_mut(&id) {
            Some(stored) => {
                *stored = customer.clone();
                Ok(())
            }
            None => Err(DbError::not_found("Customer", id)),
        }
    }

    async fn count_customers(&self) -> DbResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.customers.len() as i64)
    }
}

#[async_trait]
impl ReservationStore for InMemoryStore {
    async fn reservations_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> DbResult<Vec<Reservation>> {
        let tables = self.tables.read().await;
        let mut reservations: Vec<Reservation> = tables
            .reservations
            .values()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect();
        reservations.sort_by(|a, b| a.start_at.cmp(&b.start_at).then_with(|| a.id.cmp(&b.id)));
        Ok(reservations)
    }

    async fn find_reservation(&self, id: ReservationId) -> DbResult<Option<Reservation>> {
        let tables = self.tables.read().await;
        Ok(tables.reservations.get(&id).cloned())
    }

    async fn insert_reservation(&self, reservation: &Reservation) -> DbResult<ReservationId> {
        let mut tables = self.tables.write().await;
        if !tables.customers.contains_key(&reservation.customer_id) {
            return Err(DbError::not_found("Customer", reservation.customer_id));
        }

        tables.next_reservation_id += 1;
        let id = tables.next_reservation_id;

        let mut stored = reservation.clone();
        stored.id = Some(id);
        tables.reservations.insert(id, stored);
        Ok(id)
    }

    async fn update_reservation(&self, reservation: &Reservation) -> DbResult<()> {
        let Some(id) = reservation.id else {
            return Err(DbError::not_found("Reservation", "unsaved"));
        };

        let mut tables = self.tables.write().await;
        match tables.reservations.get_mut(&id) {
            Some(stored) => {
                *stored = reservation.clone();
                Ok(())
            }
            None => Err(DbError::not_found("Reservation", id)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use super::*;
    use crate::{Database, DbConfig};

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    /// Inserts each `(first, last, visits)` in order and books `visits`
    /// reservations for it.
    async fn seed(
        customers: &dyn CustomerStore,
        reservations: &dyn ReservationStore,
        rows: &[(&str, &str, u32)],
    ) {
        for (first, last, visits) in rows {
            let mut customer = Customer::new(*first, *last, "555-0100", None);
            customer.id = Some(customers.insert_customer(&customer).await.unwrap());

            for visit in 0..*visits {
                let start_at = noon() + Duration::days(i64::from(visit));
                let reservation = Reservation::for_customer(&customer, start_at, 2, None).unwrap();
                reservations.insert_reservation(&reservation).await.unwrap();
            }
        }
    }

    fn names(customers: &[Customer]) -> Vec<String> {
        customers.iter().map(Customer::full_name).collect()
    }

    #[tokio::test]
    async fn test_customer_round_trip() {
        let store = InMemoryStore::new();
        let mut customer = Customer::new("Jane", "Doe", "555-0100", None);

        let id = store.insert_customer(&customer).await.expect("insert");
        customer.id = Some(id);

        let found = store.find_customer(id).await.expect("find");
        assert_eq!(found, Some(customer));
    }

    #[tokio::test]
    async fn test_ids_are_distinct() {
        let store = InMemoryStore::new();
        let a = store
            .insert_customer(&Customer::new("A", "A", "", None))
            .await
            .unwrap();
        let b = store
            .insert_customer(&Customer::new("B", "B", "", None))
            .await
            .unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_ranking_skips_customers_without_reservations() {
        let store = InMemoryStore::new();
        seed(&store, &store, &[("Jane", "Doe", 1), ("Ida", "Idle", 0)]).await;

        let ranked = store.top_by_reservation_count(10).await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].customer.first_name, "Jane");
        assert_eq!(ranked[0].amount, 1);
    }

    #[tokio::test]
    async fn test_search_agrees_with_sqlite() {
        let rows: [(&str, &str, u32); 6] = [
            ("Jane", "Doe", 0),
            ("June", "Bloom", 0),
            ("John", "Doyle", 0),
            ("Lucy", "O'Connor", 0),
            ("Amelie", "Müller", 0),
            ("Jeanne", "Jne", 0),
        ];

        let memory = InMemoryStore::new();
        seed(&memory, &memory, &rows).await;

        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed(&db.customers(), &db.reservations(), &rows).await;
        let sqlite = db.customers();

        for raw in ["j_ne", "_", "DOE", "o'c", "muller", "jane doyle", "zzz", ""] {
            let keyword = SearchKeyword::parse(raw);
            let expected = sqlite.search_customers(&keyword).await.unwrap();
            let actual = memory.search_customers(&keyword).await.unwrap();
            assert_eq!(names(&actual), names(&expected), "keyword {:?}", raw);
        }

        let underscore = memory
            .search_customers(&SearchKeyword::parse("j_ne"))
            .await
            .unwrap();
        assert_eq!(names(&underscore), ["June-Bloom", "Jane-Doe"]);
    }

    #[tokio::test]
    async fn test_ranking_ties_break_by_name_then_id() {
        // Inserted out of name order.
        let rows: [(&str, &str, u32); 6] = [
            ("Zoe", "Young", 2),
            ("Anna", "Young", 2),
            ("Bob", "Adams", 2),
            ("Carl", "Brown", 3),
            ("Bob", "Adams", 2),
            ("Dana", "Cole", 1),
        ];

        let memory = InMemoryStore::new();
        seed(&memory, &memory, &rows).await;

        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed(&db.customers(), &db.reservations(), &rows).await;
        let sqlite = db.customers();

        for store in [&memory as &dyn CustomerStore, &sqlite as &dyn CustomerStore] {
            let ranked = store.top_by_reservation_count(10).await.unwrap();
            let order: Vec<(String, Option<CustomerId>, i64)> = ranked
                .iter()
                .map(|r| (r.customer.full_name(), r.customer.id, r.amount))
                .collect();

            assert_eq!(
                order,
                vec![
                    ("Carl-Brown".to_string(), Some(4), 3),
                    ("Bob-Adams".to_string(), Some(3), 2),
                    ("Bob-Adams".to_string(), Some(5), 2),
                    ("Anna-Young".to_string(), Some(2), 2),
                    ("Zoe-Young".to_string(), Some(1), 2),
                    ("Dana-Cole".to_string(), Some(6), 1),
                ]
            );

            let page = store.top_by_reservation_count(2).await.unwrap();
            assert_eq!(page[1].customer.id, Some(3));
        }
    }
}
