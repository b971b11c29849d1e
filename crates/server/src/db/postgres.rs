//! `PostgreSQL` customer store.
//!
//! Queries are runtime-checked (`sqlx::query_as` with `.bind`), so the crate
//! builds without a live database. The `customer.email` column carries a
//! unique constraint as a safety net behind the service-level availability
//! check; violations surface as [`RepositoryError::Conflict`].

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crm_core::{Customer, CustomerId};

use super::{CustomerStore, RepositoryError};

/// Customer store backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    /// Create a new store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of the `customer` table.
#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    address: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: Some(CustomerId::new(row.id)),
            name: row.name,
            email: row.email,
            address: row.address,
        }
    }
}

const SELECT_CUSTOMER: &str = "SELECT id, name, email, address FROM customer";

/// Map a sqlx error, turning unique violations into `Conflict`.
fn map_save_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("email already exists".to_owned());
    }
    RepositoryError::Database(e)
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(SELECT_CUSTOMER)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_all_by_address(
        &self,
        address: &str,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_CUSTOMER} WHERE address = $1"))
                .bind(address)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_CUSTOMER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_CUSTOMER} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Customer::from))
    }

    async fn exists_by_id(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customer WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn save(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        match customer.id {
            None => {
                let row = sqlx::query_as::<_, CustomerRow>(
                    "INSERT INTO customer (name, email, address) \
                     VALUES ($1, $2, $3) \
                     RETURNING id, name, email, address",
                )
                .bind(&customer.name)
                .bind(&customer.email)
                .bind(&customer.address)
                .fetch_one(&self.pool)
                .await
                .map_err(map_save_error)?;

                Ok(Customer::from(row))
            }
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE customer SET name = $2, email = $3, address = $4 WHERE id = $1",
                )
                .bind(id)
                .bind(&customer.name)
                .bind(&customer.email)
                .bind(&customer.address)
                .execute(&self.pool)
                .await
                .map_err(map_save_error)?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound);
                }

                Ok(customer)
            }
        }
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
