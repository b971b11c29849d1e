//! Customer persistence layer.
//!
//! The [`CustomerStore`] trait is the capability abstraction the service
//! depends on: lookup by id, email, and address, an existence check, save,
//! and delete. Two implementations are provided:
//!
//! - [`PgCustomerStore`] - the real `PostgreSQL` adapter
//! - [`InMemoryCustomerStore`] - an in-process store for tests and local runs
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and applied at
//! startup when running on `PostgreSQL`.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crm_core::{Customer, CustomerId};

pub use memory::InMemoryCustomerStore;
pub use postgres::PgCustomerStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested record was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Persistence capabilities required by the customer service.
///
/// Implementations own the authoritative copy of every customer; the
/// service only holds transient references during a single operation.
/// Single `save` and `delete_by_id` calls are atomic, but no cross-call
/// isolation is provided.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers, in no guaranteed order.
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Customers whose address equals the given value exactly.
    async fn find_all_by_address(
        &self,
        address: &str,
    ) -> Result<Vec<Customer>, RepositoryError>;

    /// Look up a customer by id.
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Look up a customer by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError>;

    /// Whether a customer with the given id exists.
    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, RepositoryError>;

    /// Persist a customer: insert when the id is absent, otherwise overwrite
    /// the full record at that id. Returns the persisted value with the id
    /// populated.
    async fn save(&self, customer: Customer) -> Result<Customer, RepositoryError>;

    /// Delete the customer with the given id.
    async fn delete_by_id(&self, id: CustomerId) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
