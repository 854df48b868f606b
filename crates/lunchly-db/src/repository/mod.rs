//! # Repository Module
//!
//! Store implementations for Lunchly.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Route handler                                                         │
//! │       │                                                                 │
//! │       │  db.customer_search().search("jane doe")                       │
//! │       ▼                                                                 │
//! │  CustomerSearch (service.rs)  ← keyword rules, NotFound contract       │
//! │       │                                                                 │
//! │       │  CustomerStore / ReservationStore traits                       │
//! │       ▼                                                                 │
//! │  CustomerRepository, ReservationRepository  ← SQL lives only here      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`] - Customer CRUD, search and ranking
//! - [`ReservationRepository`] - Reservations per customer
//! - [`InMemoryStore`] - Map-backed test double for both traits
//!
//! [`CustomerRepository`]: customer::CustomerRepository
//! [`ReservationRepository`]: reservation::ReservationRepository
//! [`InMemoryStore`]: memory::InMemoryStore

pub mod customer;
pub mod memory;
pub mod reservation;
