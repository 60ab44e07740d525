use serde_json::{json, Value};
use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(any(test, feature = "mocks"))]
use mockall::automock;

/// Fire-and-forget metrics sink.
#[cfg_attr(any(test, feature = "mocks"), automock)]
pub trait Metrics: Debug {
    fn emit(&self, name: &str, value: f64, unit: &str);

    fn count(&self, name: &str, value: f64) {
        self.emit(name, value, "Count");
    }
}

/// Publishes CloudWatch metrics through the Embedded Metric Format: one
/// JSON line per observation on stdout, extracted by the log backend
/// rather than sent through a metrics API.
#[derive(Debug)]
pub struct EmfMetrics {
    namespace: String,
    service: String,
}

impl EmfMetrics {
    pub fn new(namespace: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            service: service.into(),
        }
    }

    fn envelope(&self, name: &str, value: f64, unit: &str, timestamp_ms: u64) -> Value {
        let mut envelope = json!({
            "_aws": {
                "Timestamp": timestamp_ms,
                "CloudWatchMetrics": [{
                    "Namespace": self.namespace,
                    "Dimensions": [["Service"]],
                    "Metrics": [{
                        "Name": name,
                        "Unit": unit
                    }]
                }]
            },
            "Service": self.service,
        });
        if let Some(fields) = envelope.as_object_mut() {
            fields.insert(name.to_string(), json!(value));
        }
        envelope
    }
}

impl Metrics for EmfMetrics {
    fn emit(&self, name: &str, value: f64, unit: &str) {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();
        println!("{}", self.envelope(name, value, unit, timestamp_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::EmfMetrics;
    use serde_json::json;

    #[test]
    fn when_metric_emitted_should_build_emf_envelope() {
        let metrics = EmfMetrics::new("ShopFast/Application", "product-service");

        let envelope = metrics.envelope("ProductViews", 3.0, "Count", 1704067200000);

        assert_eq!(envelope["_aws"]["Timestamp"], json!(1704067200000u64));
        assert_eq!(
            envelope["_aws"]["CloudWatchMetrics"][0]["Namespace"],
            "ShopFast/Application"
        );
        assert_eq!(
            envelope["_aws"]["CloudWatchMetrics"][0]["Dimensions"],
            json!([["Service"]])
        );
        assert_eq!(
            envelope["_aws"]["CloudWatchMetrics"][0]["Metrics"][0],
            json!({ "Name": "ProductViews", "Unit": "Count" })
        );
        assert_eq!(envelope["Service"], "product-service");
        assert_eq!(envelope["ProductViews"], json!(3.0));
    }
}
