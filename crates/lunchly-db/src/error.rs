//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error) ──────────────┐                            │
//! │  No row for id ───► NotFound              │                            │
//! │  Search matched nothing ───► NoMatch      ├──► DbError (this module)   │
//! │  ValidationError ───► Validation          │          │                 │
//! │                                           ┘          ▼                 │
//! │                                         Route handler picks a status   │
//! │                                         via status_code() (404/422/500)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store failures are carried unchanged in [`DbError::Store`]; nothing in
//! this crate retries or reinterprets them.

use lunchly_core::ValidationError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `get(id)` for an id with no row
    /// - Updating a row that no longer exists
    #[error("No such {entity}: {id}")]
    NotFound { entity: String, id: String },

    /// A customer search produced zero rows.
    ///
    /// Carries the keyword exactly as the user typed it.
    #[error("Your keywords didn't produce any match: {keyword}")]
    NoMatch { keyword: String },

    /// Input rejected before reaching the database.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Any error reported by the store, passed through untouched.
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a NoMatch error for a search keyword.
    pub fn no_match(keyword: impl Into<String>) -> Self {
        DbError::NoMatch {
            keyword: keyword.into(),
        }
    }

    /// True for both "no row for this id" and "search matched nothing".
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. } | DbError::NoMatch { .. })
    }

    /// HTTP status a route handler should answer with.
    ///
    /// ```text
    /// NotFound / NoMatch → 404
    /// Validation         → 422
    /// everything else    → 500
    /// ```
    pub fn status_code(&self) -> u16 {
        match self {
            DbError::NotFound { .. } | DbError::NoMatch { .. } => 404,
            DbError::Validation(_) => 422,
            _ => 500,
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
