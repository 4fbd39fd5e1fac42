use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cuid2::CuidConstructor;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::str::FromStr;
use thiserror::Error;

#[cfg(any(test, feature = "mocks"))]
use mockall::{automock, predicate::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Received,
    InPreparation,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Received,
        OrderStatus::InPreparation,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "RECEIVED",
            OrderStatus::InPreparation => "IN_PREPARATION",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown order status '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub user_id: String,
    pub products: Vec<Product>,
    pub status: OrderStatus,
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Builds an order that has not been persisted yet; timestamps are left to storage.
    pub fn new(order_id: String, user_id: String, products: Vec<Product>, status: OrderStatus) -> Self {
        let total_price = total_price(&products);
        Self {
            order_id,
            user_id,
            products,
            status,
            total_price,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Sum of `price * quantity` over every line item, without rounding.
pub fn total_price(products: &[Product]) -> f64 {
    products
        .iter()
        .fold(0.0, |total, product| total + product.price * f64::from(product.quantity))
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Order {order_id} could not be read: {reason}")]
    InvalidRecord { order_id: String, reason: String },
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait OrderRepository: Debug {
    async fn create(&self, order: Order) -> Result<Order, RepositoryError>;
    async fn get_by_id(&self, order_id: &str) -> Result<Option<Order>, RepositoryError>;
    async fn get_by_user_id(&self, user_id: &str) -> Result<Vec<Order>, RepositoryError>;
    async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError>;
    async fn delete(&self, order_id: &str) -> Result<(), RepositoryError>;
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
pub trait IdGenerator {
    fn generate_id(&self) -> String;
}

pub struct CuidGenerator {
    gen: CuidConstructor,
}

impl CuidGenerator {
    pub fn new() -> Self {
        Self {
            gen: CuidConstructor::new(),
        }
    }
}

impl Default for CuidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for CuidGenerator {
    fn generate_id(&self) -> String {
        self.gen.create_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: u32, price: f64) -> Product {
        Product {
            product_id: "p1".to_string(),
            name: "Product 1".to_string(),
            quantity,
            price,
        }
    }

    #[test]
    fn total_price_sums_price_times_quantity() {
        let products = vec![product(2, 10.0), product(3, 1.5)];

        assert_eq!(total_price(&products), 24.5);
    }

    #[test]
    fn total_price_of_no_products_is_zero() {
        assert_eq!(total_price(&[]), 0.0);
    }

    #[test]
    fn new_order_computes_total_and_leaves_timestamps_unset() {
        let order = Order::new(
            "order123".to_string(),
            "user1".to_string(),
            vec![product(2, 10.0)],
            OrderStatus::Received,
        );

        assert_eq!(order.total_price, 20.0);
        assert!(order.created_at.is_none());
        assert!(order.updated_at.is_none());
    }

    #[test]
    fn status_round_trips_through_wire_name() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("SHIPPED".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn order_serializes_with_camel_case_fields() {
        let order = Order::new(
            "order123".to_string(),
            "user1".to_string(),
            vec![product(1, 10.0)],
            OrderStatus::OutForDelivery,
        );

        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "orderId": "order123",
                "userId": "user1",
                "products": [{ "productId": "p1", "name": "Product 1", "quantity": 1, "price": 10.0 }],
                "status": "OUT_FOR_DELIVERY",
                "totalPrice": 10.0
            })
        );
    }

    #[test]
    fn cuid_generator_produces_distinct_ids() {
        let generator = CuidGenerator::new();

        let first = generator.generate_id();
        let second = generator.generate_id();

        assert!(!first.is_empty());
        assert_ne!(first, second);
    }
}
