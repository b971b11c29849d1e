//! In-memory customer store.
//!
//! Implements the same [`CustomerStore`] contract as the `PostgreSQL`
//! adapter, including the unique-email safety net, so the service can be
//! exercised without a live database. Also usable as a standalone backend
//! for local runs (`CRM_STORE=memory`).

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crm_core::{Customer, CustomerId};

use super::{CustomerStore, RepositoryError};

/// Customer store held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<i64, Customer>,
    next_id: i64,
}

impl InMemoryCustomerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        Ok(self.lock().rows.values().cloned().collect())
    }

    async fn find_all_by_address(
        &self,
        address: &str,
    ) -> Result<Vec<Customer>, RepositoryError> {
        Ok(self
            .lock()
            .rows
            .values()
            .filter(|c| c.address == address)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.lock().rows.get(&id.as_i64()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        Ok(self
            .lock()
            .rows
            .values()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        Ok(self.lock().rows.contains_key(&id.as_i64()))
    }

    async fn save(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        let mut inner = self.lock();

        // Same safety net as the UNIQUE constraint on the real table.
        let taken = inner
            .rows
            .values()
            .any(|c| c.email == customer.email && c.id != customer.id);
        if taken {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        match customer.id {
            None => {
                inner.next_id += 1;
                let id = inner.next_id;
                let persisted = Customer {
                    id: Some(CustomerId::new(id)),
                    ..customer
                };
                inner.rows.insert(id, persisted.clone());
                Ok(persisted)
            }
            Some(id) => {
                if !inner.rows.contains_key(&id.as_i64()) {
                    return Err(RepositoryError::NotFound);
                }
                inner.rows.insert(id.as_i64(), customer.clone());
                Ok(customer)
            }
        }
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), RepositoryError> {
        if self.lock().rows.remove(&id.as_i64()).is_none() {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
