use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

#[cfg(any(test, feature = "mocks"))]
use mockall::{automock, predicate::*};

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait ProductStore: Debug {
    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, String>;
    async fn scan_products(
        &self,
        limit: u32,
        start_key: Option<ProductKey>,
    ) -> Result<ProductPage, String>;
}

/// A catalog item. Only `id` is guaranteed; everything else the table
/// stores rides along as-is. Currency amounts are plain JSON floats by the
/// time they reach a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}

/// The store's native continuation token for a bounded scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductKey {
    pub id: String,
}

impl ProductKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// One page of a catalog listing. `next_key` is present iff the store
/// reported more items beyond this page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub next_key: Option<ProductKey>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub count: usize,
    #[serde(rename = "lastKey")]
    pub last_key: Option<String>,
}

/// An order event as delivered over SNS. Every field is optional; defaults
/// are resolved where the field is used, not scattered through handlers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderMessage {
    pub event_type: Option<String>,
    pub order_id: Option<String>,
    pub status: Option<String>,
    pub customer_email: Option<String>,
    pub tracking_number: Option<String>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    OrderCreated,
    OrderShipped,
    OrderDelivered,
    Unknown,
}

impl EventType {
    pub fn parse(value: &str) -> Self {
        match value {
            "order.created" => EventType::OrderCreated,
            "order.shipped" => EventType::OrderShipped,
            "order.delivered" => EventType::OrderDelivered,
            _ => EventType::Unknown,
        }
    }

    /// Fallback used when a message carries no declared event type.
    pub fn infer_from_status(status: Option<&str>) -> Self {
        match status {
            Some("confirmed") => EventType::OrderCreated,
            Some("shipped") => EventType::OrderShipped,
            Some("delivered") => EventType::OrderDelivered,
            _ => EventType::Unknown,
        }
    }
}
