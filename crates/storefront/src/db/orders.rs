//! Order repository: the Order Ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};

use himal_core::{OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::models::{NewOrder, Order, OrderStats};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    full_name: String,
    mobile: String,
    address: String,
    total_amount: Decimal,
    status: String,
    items_summary: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        // Status is stored as text but only the closed enum is ever written;
        // anything else in the column is corruption, not a new state.
        let status: OrderStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("order {}: {e}", row.id))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            full_name: row.full_name,
            mobile: row.mobile,
            address: row.address,
            total_amount: row.total_amount,
            status,
            items_summary: row.items_summary,
            created_at: row.created_at,
        })
    }
}

const ORDER_COLUMNS: &str =
    "id, user_id, full_name, mobile, address, total_amount, status, items_summary, created_at";

/// Repository for persisted orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order against any executor.
    ///
    /// Checkout calls this inside its commit transaction so the order
    /// insert and the profile update stand or fall together. There is no
    /// draft state: a returned `Order` is fully persisted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create<'e, E>(executor: E, new: NewOrder) -> Result<Order, RepositoryError>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (user_id, full_name, mobile, address, total_amount, items_summary)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(new.user_id)
        .bind(&new.full_name)
        .bind(&new.mobile)
        .bind(&new.address)
        .bind(new.total_amount)
        .bind(&new.items_summary)
        .fetch_one(executor)
        .await?;

        Order::try_from(row)
    }

    /// Orders placed by one user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for an unrecognized stored status.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// All orders, newest first (admin console).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for an unrecognized stored status.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Set the status of an order (admin console).
    ///
    /// The status arrives as the closed enum; free-text values are rejected
    /// before they reach this layer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Delete an order (admin console). Unconditional, no cascades.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Aggregate order count and earnings for the admin dashboard.
    ///
    /// `total_earnings` is `COALESCE(SUM(total_amount), 0)` - zero with no
    /// orders, never NULL.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn aggregate(&self) -> Result<OrderStats, RepositoryError> {
        let (count, total_earnings): (i64, Decimal) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(total_amount), 0) FROM orders",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(OrderStats {
            count,
            total_earnings,
        })
    }
}
