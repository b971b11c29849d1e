//! Customer service.
//!
//! Orchestrates validation and mutation on top of a [`CustomerStore`]: email
//! uniqueness on create and on email-changing updates, merge-patch partial
//! updates, and existence-checked deletes. The service holds no state of its
//! own and is safe for concurrent use.
//!
//! The availability check and the following save are two separate store
//! calls; a concurrent writer can claim the email in between. The store's
//! unique constraint on `email` is the backstop for that race.

mod error;

pub use error::CustomerError;

use std::sync::Arc;

use crm_core::{Customer, CustomerId, CustomerPatch};

use crate::db::CustomerStore;

/// Customer domain service.
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    /// Create a new customer service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// All customers, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::Repository` if the store fails.
    pub async fn get_customers(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.store.find_all().await?)
    }

    /// Customers whose address equals the given value. An empty result is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::Repository` if the store fails.
    pub async fn get_customers_by_address(
        &self,
        address: &str,
    ) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.store.find_all_by_address(address).await?)
    }

    /// Look up a single customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if no customer has the given id.
    pub async fn get_customer_by_id(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CustomerError::not_found(id))
    }

    /// Create a customer with the given fields.
    ///
    /// The store assigns the identifier. No format validation is applied to
    /// any field; only email availability is checked.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::EmailUnavailable` if the email already
    /// belongs to a customer; nothing is created in that case.
    pub async fn create_customer(
        &self,
        name: String,
        email: String,
        address: String,
    ) -> Result<(), CustomerError> {
        if self.store.find_by_email(&email).await?.is_some() {
            return Err(CustomerError::email_unavailable(&email));
        }

        self.store
            .save(Customer::create(name, email, address))
            .await?;

        Ok(())
    }

    /// Apply a partial update to a customer.
    ///
    /// Patch fields left as `None` keep the stored value. When no field
    /// actually changes value - all omitted, or all supplied values equal
    /// the current ones - no save is issued, so an effect-free update never
    /// produces a write.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the id does not exist (checked
    /// before any field validation), or `CustomerError::EmailUnavailable`
    /// if the new email belongs to a different customer; nothing is
    /// persisted on failure.
    pub async fn update_customer(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<(), CustomerError> {
        let mut customer = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CustomerError::not_found(id))?;

        let mut changed = false;

        if let Some(name) = patch.name
            && name != customer.name
        {
            customer.name = name;
            changed = true;
        }

        if let Some(email) = patch.email
            && email != customer.email
        {
            // Taken only when the hit is a different customer; matching our
            // own record is not a collision.
            if let Some(existing) = self.store.find_by_email(&email).await?
                && existing.id != customer.id
            {
                return Err(CustomerError::email_unavailable_for_update(&email));
            }
            customer.email = email;
            changed = true;
        }

        if let Some(address) = patch.address
            && address != customer.address
        {
            customer.address = address;
            changed = true;
        }

        if changed {
            self.store.save(customer).await?;
        }

        Ok(())
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if the id does not exist; the
    /// underlying delete is never invoked in that case.
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), CustomerError> {
        if !self.store.exists_by_id(id).await? {
            return Err(CustomerError::not_found_for_delete(id));
        }

        self.store.delete_by_id(id).await?;

        Ok(())
    }
}
