//! # lunchly-db: Database Layer for Lunchly
//!
//! This crate provides database access for the Lunchly reservation app.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lunchly Data Flow                                │
//! │                                                                         │
//! │  Route handler (GET /search?q=jane+doe)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    lunchly-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │   │ CustomerSearch │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │   │  (service.rs)  │   │  (embedded)  │   │   │
//! │  │   │               │   │       │        │   │              │   │   │
//! │  │   │ SqlitePool    │◄──│ CustomerRepo   │   │ 001_initial  │   │   │
//! │  │   │ DbConfig      │   │ ReservationRepo│   │  _schema.sql │   │   │
//! │  │   └───────────────┘   └────────────────┘   └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (./lunchly.db)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Pool configuration, from code or environment
//! - [`pool`] - Connection pool creation and the `Database` handle
//! - [`migrations`] - Embedded database schema
//! - [`error`] - Database error types
//! - [`store`] - `CustomerStore` / `ReservationStore` traits
//! - [`repository`] - SQLite and in-memory store implementations
//! - [`service`] - `CustomerSearch`: search, ranking, get/list/save
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lunchly_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//! let customers = db.customer_search();
//!
//! let matches = customers.search("jane doyle").await?;
//! let best = customers.top_customers().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult};
pub use pool::{Database, SqlCustomerSearch};
pub use service::CustomerSearch;
pub use store::{CustomerStore, ReservationStore};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::memory::InMemoryStore;
pub use repository::reservation::ReservationRepository;
