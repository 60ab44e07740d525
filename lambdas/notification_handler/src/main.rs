use lambda_runtime::{run, service_fn, tracing, Error};
use shared::metrics::EmfMetrics;

use crate::event_handler::{function_handler, HandlerDeps};
use crate::sender::LoggingEmailSender;

mod config;
mod event_handler;
mod sender;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = config::Config::load()?;

    let sender = LoggingEmailSender::new(config.from_email);
    let metrics = EmfMetrics::new("ShopFast/Application", "notification-handler");
    let deps = HandlerDeps { sender, metrics };

    run(service_fn(|event| function_handler(&deps, event))).await
}
