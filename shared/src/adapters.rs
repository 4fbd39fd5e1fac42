use crate::configuration::Configuration;
use crate::core::{Order, OrderRepository, OrderStatus, Product, RepositoryError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

const ORDER_COLUMNS: &str =
    "order_id, user_id, products, status, total_price, created_at, updated_at";

#[derive(Debug)]
pub struct PostgresOrderRepository {
    table_name: String,
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(table_name: String, pool: PgPool) -> Self {
        Self { table_name, pool }
    }

    /// The pool connects lazily, so a cold start does not wait on the database.
    pub fn from_configuration(configuration: &Configuration) -> Self {
        let options = PgConnectOptions::new()
            .host(&configuration.host)
            .port(configuration.port)
            .username(&configuration.user)
            .password(&configuration.password)
            .database(&configuration.database);
        let pool = PgPoolOptions::new()
            .max_connections(configuration.max_connections)
            .connect_lazy_with(options);

        Self::new(configuration.table_name.clone(), pool)
    }
}

#[derive(Debug, FromRow)]
struct OrderRow {
    order_id: String,
    user_id: String,
    products: Json<Vec<Product>>,
    status: String,
    total_price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<OrderStatus>()
            .map_err(|reason| RepositoryError::InvalidRecord {
                order_id: row.order_id.clone(),
                reason,
            })?;

        Ok(Order {
            order_id: row.order_id,
            user_id: row.user_id,
            products: row.products.0,
            status,
            total_price: row.total_price,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, RepositoryError> {
        let query = format!(
            "INSERT INTO {} (order_id, user_id, products, status, total_price) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            self.table_name, ORDER_COLUMNS
        );

        let row = sqlx::query_as::<_, OrderRow>(&query)
            .bind(&order.order_id)
            .bind(&order.user_id)
            .bind(Json(&order.products))
            .bind(order.status.as_str())
            .bind(order.total_price)
            .fetch_one(&self.pool)
            .await?;

        Order::try_from(row)
    }

    async fn get_by_id(&self, order_id: &str) -> Result<Option<Order>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM {} WHERE order_id = $1",
            ORDER_COLUMNS, self.table_name
        );

        sqlx::query_as::<_, OrderRow>(&query)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    async fn get_by_user_id(&self, user_id: &str) -> Result<Vec<Order>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM {} WHERE user_id = $1 ORDER BY created_at",
            ORDER_COLUMNS, self.table_name
        );

        sqlx::query_as::<_, OrderRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let query = format!(
            "UPDATE {} SET status = $2, updated_at = now() WHERE order_id = $1 RETURNING {}",
            self.table_name, ORDER_COLUMNS
        );

        sqlx::query_as::<_, OrderRow>(&query)
            .bind(order_id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    async fn delete(&self, order_id: &str) -> Result<(), RepositoryError> {
        let query = format!("DELETE FROM {} WHERE order_id = $1", self.table_name);

        sqlx::query(&query)
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
