use aws_lambda_events::event::sns::{MessageAttribute, SnsEvent, SnsMessage};
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;
use shared::core::{EventType, OrderMessage};
use shared::metrics::Metrics;
use std::collections::HashMap;

use crate::sender::NotificationSender;

pub(crate) struct HandlerDeps<N: NotificationSender, M: Metrics> {
    pub sender: N,
    pub metrics: M,
}

/// Tally of one dispatch invocation. Every record lands in exactly one
/// bucket; skips and no-ops count as processed.
#[derive(Debug, Default, Serialize)]
pub(crate) struct BatchOutcome {
    pub processed: u32,
    pub errors: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct DispatchResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
enum ProcessError {
    #[error("invalid message payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to send notification: {0}")]
    Send(String),
}

pub(crate) async fn function_handler<N: NotificationSender, M: Metrics>(
    deps: &HandlerDeps<N, M>,
    event: LambdaEvent<SnsEvent>,
) -> Result<DispatchResponse, Error> {
    let records = event.payload.records;
    tracing::info!(record_count = records.len(), "Notification handler invoked");

    let mut outcome = BatchOutcome::default();
    for record in records {
        // The only failure boundary: a record's result folds into the
        // tally here, and the batch always continues.
        match process_record(&deps.sender, &record.sns).await {
            Ok(()) => outcome.processed += 1,
            Err(e) => {
                outcome.errors += 1;
                let context: String = record.sns.message.chars().take(200).collect();
                tracing::error!(error = %e, record = %context, "Failed to process notification");
            }
        }
    }

    deps.metrics.count("NotificationsSent", outcome.processed as f64);
    if outcome.errors > 0 {
        deps.metrics.count("NotificationErrors", outcome.errors as f64);
    }
    tracing::info!(
        processed = outcome.processed,
        errors = outcome.errors,
        "Notification processing complete"
    );

    Ok(DispatchResponse {
        status_code: 200,
        body: serde_json::to_string(&outcome)?,
    })
}

async fn process_record<N: NotificationSender>(
    sender: &N,
    sns: &SnsMessage,
) -> Result<(), ProcessError> {
    let message: OrderMessage = serde_json::from_str(&sns.message)?;
    let event_type = resolve_event_type(&sns.message_attributes, &message);
    tracing::info!(
        event_type = ?event_type,
        order_id = message.order_id.as_deref().unwrap_or("unknown"),
        "Processing notification"
    );

    match event_type {
        EventType::OrderCreated => send_order_confirmation(sender, &message).await,
        EventType::OrderShipped => send_shipping_notification(sender, &message).await,
        EventType::OrderDelivered => send_delivery_notification(sender, &message).await,
        EventType::Unknown => {
            tracing::warn!(
                declared = message.event_type.as_deref().unwrap_or(""),
                status = message.status.as_deref().unwrap_or(""),
                "Unknown event type"
            );
            Ok(())
        }
    }
}

// The eventType message attribute wins; messages without one fall back to
// their declared type, then to the order status.
fn resolve_event_type(
    attributes: &HashMap<String, MessageAttribute>,
    message: &OrderMessage,
) -> EventType {
    if let Some(attribute) = attributes.get("eventType") {
        return EventType::parse(&attribute.value);
    }
    if let Some(declared) = message.event_type.as_deref() {
        return EventType::parse(declared);
    }
    EventType::infer_from_status(message.status.as_deref())
}

async fn send_order_confirmation<N: NotificationSender>(
    sender: &N,
    message: &OrderMessage,
) -> Result<(), ProcessError> {
    let order_id = message.order_id.as_deref().unwrap_or("unknown");
    let email = match message.customer_email.as_deref() {
        Some(email) => email,
        None => {
            tracing::warn!(order_id, "No customer email provided");
            return Ok(());
        }
    };

    let subject = format!("Order Confirmation - {order_id}");
    let body = format!(
        "Thank you for your order!\n\nOrder ID: {order_id}\nTotal: ${:.2}\n\nWe'll send you another email when your order ships.\n\nThanks for shopping with ShopFast!",
        message.total.unwrap_or(0.0)
    );

    sender
        .send(email, &subject, &body)
        .await
        .map_err(ProcessError::Send)
}

async fn send_shipping_notification<N: NotificationSender>(
    sender: &N,
    message: &OrderMessage,
) -> Result<(), ProcessError> {
    let order_id = message.order_id.as_deref().unwrap_or("unknown");
    let email = match message.customer_email.as_deref() {
        Some(email) => email,
        None => {
            tracing::warn!(order_id, "No customer email provided");
            return Ok(());
        }
    };

    let tracking_number = message.tracking_number.as_deref().unwrap_or("N/A");
    let subject = format!("Your Order Has Shipped - {order_id}");
    let body = format!(
        "Great news! Your order has shipped!\n\nOrder ID: {order_id}\nTracking Number: {tracking_number}\n\nThanks for shopping with ShopFast!"
    );

    sender
        .send(email, &subject, &body)
        .await
        .map_err(ProcessError::Send)
}

async fn send_delivery_notification<N: NotificationSender>(
    sender: &N,
    message: &OrderMessage,
) -> Result<(), ProcessError> {
    let order_id = message.order_id.as_deref().unwrap_or("unknown");
    let email = match message.customer_email.as_deref() {
        Some(email) => email,
        None => {
            tracing::warn!(order_id, "No customer email provided");
            return Ok(());
        }
    };

    let subject = format!("Your Order Has Been Delivered - {order_id}");
    let body = format!(
        "Your order has been delivered!\n\nOrder ID: {order_id}\n\nWe hope you love your purchase.\n\nThanks for shopping with ShopFast!"
    );

    sender
        .send(email, &subject, &body)
        .await
        .map_err(ProcessError::Send)
}
