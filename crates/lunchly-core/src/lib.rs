//! # lunchly-core: Pure Domain Logic for Lunchly
//!
//! This crate holds the domain types and rules of the Lunchly reservation
//! app as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lunchly Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Web application (out of tree)                   │   │
//! │  │    /customers ──► /search?q= ──► /best ──► /customers/:id       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lunchly-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────────┐  ┌───────────┐              │   │
//! │  │   │   types   │  │    search     │  │ validation│              │   │
//! │  │   │ Customer  │  │ SearchKeyword │  │   rules   │              │   │
//! │  │   │Reservation│  │  tokens       │  │  checks   │              │   │
//! │  │   └───────────┘  └───────────────┘  └───────────┘              │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 lunchly-db (Database Layer)                     │   │
//! │  │        SQLite queries, schema, repositories, CustomerSearch     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, RankedCustomer, Reservation)
//! - [`search`] - Search keyword normalization
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use lunchly_core::search::SearchKeyword;
//!
//! let keyword = SearchKeyword::parse("Jane! Doe42");
//! assert_eq!(keyword.tokens(), ["jane", "doe"]);
//! assert_eq!(keyword.patterns()[0].as_deref(), Some("%jane%"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use search::SearchKeyword;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of customers returned by the "best customers" ranking.
pub const DEFAULT_TOP_LIMIT: u32 = 10;

/// Maximum number of keyword tokens a search matches against.
///
/// ## Why two?
/// A search box is expected to hold "first last". Both tokens are matched
/// against both name columns, so order does not matter.
pub const MAX_SEARCH_TOKENS: usize = 2;

/// Maximum length of a first or last name.
pub const MAX_NAME_LENGTH: usize = 100;
