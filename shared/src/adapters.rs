use crate::core::{Product, ProductKey, ProductPage, ProductStore};
use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

#[derive(Debug)]
pub struct DynamoDbProductStore {
    table_name: String,
    dynamodb_client: Client,
}

impl DynamoDbProductStore {
    pub fn new(table_name: String, dynamodb_client: Client) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }
}

#[async_trait]
impl ProductStore for DynamoDbProductStore {
    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, String> {
        let result = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(product_id.to_string()))
            .send()
            .await
            .map_err(|e| format!("Error fetching product: {:?}", e))?;

        match result.item {
            Some(item) => Product::try_from(item).map(Some),
            None => Ok(None),
        }
    }

    async fn scan_products(
        &self,
        limit: u32,
        start_key: Option<ProductKey>,
    ) -> Result<ProductPage, String> {
        let mut scan = self
            .dynamodb_client
            .scan()
            .table_name(&self.table_name)
            .limit(limit as i32);
        if let Some(start_key) = start_key {
            scan = scan.exclusive_start_key("id", AttributeValue::S(start_key.id));
        }
        let result = scan
            .send()
            .await
            .map_err(|e| format!("Error executing scan: {:?}", e))?;

        let mut products = vec![];
        if let Some(items) = result.items {
            for item in items {
                // ignore items that cannot be properly deserialized
                if let Ok(product) = Product::try_from(item) {
                    products.push(product);
                }
            }
        }
        let next_key = result
            .last_evaluated_key
            .unwrap_or_default()
            .get("id")
            .and_then(|v| v.as_s().ok())
            .map(|id| ProductKey::new(id.clone()));

        Ok(ProductPage {
            items: products,
            next_key,
        })
    }
}

impl TryFrom<HashMap<String, AttributeValue>> for Product {
    type Error = String;

    fn try_from(item: HashMap<String, AttributeValue>) -> Result<Self, Self::Error> {
        let id = item
            .get("id")
            .ok_or_else(|| "id not found".to_string())?
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| "id is not a String".to_string())?;

        let mut attributes = Map::new();
        for (name, value) in item {
            if name == "id" {
                continue;
            }
            attributes.insert(name, attribute_to_json(value));
        }

        Ok(Product { id, attributes })
    }
}

// DynamoDB numbers are arbitrary-precision strings; clients get plain
// floats, which is lossy on extreme precision but fine for display.
fn number_to_json(n: &str) -> Value {
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn attribute_to_json(value: AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => number_to_json(&n),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(list.into_iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => Value::Object(
            map.into_iter()
                .map(|(name, value)| (name, attribute_to_json(value)))
                .collect(),
        ),
        AttributeValue::Ss(set) => Value::Array(set.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(set) => {
            Value::Array(set.iter().map(|n| number_to_json(n)).collect())
        }
        _ => Value::Null,
    }
}
