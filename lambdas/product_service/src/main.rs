use lambda_http::{run, service_fn, tracing, Error};
use shared::adapters::DynamoDbProductStore;
use shared::metrics::EmfMetrics;

use crate::http_handler::{function_handler, HandlerDeps};

mod config;
mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&aws_config);
    let config = config::Config::load()?;

    let store = DynamoDbProductStore::new(config.products_table, dynamodb_client);
    let metrics = EmfMetrics::new("ShopFast/Application", "product-service");
    let deps = HandlerDeps { store, metrics };

    run(service_fn(|event| function_handler(&deps, event))).await
}
