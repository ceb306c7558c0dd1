//! Payment method display records.
//!
//! These are informational only: checkout never charges anything, it just
//! shows the shopper where to send a manual payment.

use sqlx::PgPool;

use himal_core::PaymentMethodId;

use super::RepositoryError;
use crate::models::PaymentMethod;

#[derive(sqlx::FromRow)]
struct PaymentMethodRow {
    id: i32,
    method_name: String,
    account_number: String,
    qr_image: Option<String>,
}

impl From<PaymentMethodRow> for PaymentMethod {
    fn from(row: PaymentMethodRow) -> Self {
        Self {
            id: PaymentMethodId::new(row.id),
            method_name: row.method_name,
            account_number: row.account_number,
            qr_image: row.qr_image,
        }
    }
}

/// Repository for manual payment methods.
pub struct PaymentMethodRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentMethodRepository<'a> {
    /// Create a new payment method repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all payment methods in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<PaymentMethod>, RepositoryError> {
        let rows = sqlx::query_as::<_, PaymentMethodRow>(
            "SELECT id, method_name, account_number, qr_image
             FROM payment_methods ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(PaymentMethod::from).collect())
    }

    /// Add a payment method (admin console).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        method_name: &str,
        account_number: &str,
        qr_image: Option<&str>,
    ) -> Result<PaymentMethod, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentMethodRow>(
            "INSERT INTO payment_methods (method_name, account_number, qr_image)
             VALUES ($1, $2, $3)
             RETURNING id, method_name, account_number, qr_image",
        )
        .bind(method_name)
        .bind(account_number)
        .bind(qr_image)
        .fetch_one(self.pool)
        .await?;

        Ok(PaymentMethod::from(row))
    }

    /// Delete a payment method (admin console).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: PaymentMethodId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM payment_methods WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
