//! Customer service errors.

use thiserror::Error;

use crm_core::CustomerId;

use crate::db::RepositoryError;

/// Errors raised by the customer service.
///
/// `NotFound` and `EmailUnavailable` are the domain failures; store-level
/// failures pass through unchanged as `Repository`.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// The requested identifier does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The requested email already belongs to a different customer.
    #[error("{0}")]
    EmailUnavailable(String),

    /// Store failure, propagated as-is.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CustomerError {
    /// Lookup or update target does not exist.
    #[must_use]
    pub fn not_found(id: CustomerId) -> Self {
        Self::NotFound(format!("Customer with id {id} doesn't found"))
    }

    /// Delete target does not exist.
    #[must_use]
    pub fn not_found_for_delete(id: CustomerId) -> Self {
        Self::NotFound(format!("Customer with id {id} doesn't exist."))
    }

    /// Email is taken at creation time.
    #[must_use]
    pub fn email_unavailable(email: &str) -> Self {
        Self::EmailUnavailable(format!("The email {email} unavailable."))
    }

    /// Email is taken by another customer at update time.
    #[must_use]
    pub fn email_unavailable_for_update(email: &str) -> Self {
        Self::EmailUnavailable(format!("The email \"{email}\" unavailable to update"))
    }
}
