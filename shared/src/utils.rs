use lambda_http::http::StatusCode;
use lambda_http::{Error, Response};
use serde::Serialize;
use serde_json::json;

// Every API Gateway response carries the same CORS header set, error
// responses included.

pub fn json_response(
    status: &StatusCode,
    body: &impl Serialize,
) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(serde_json::to_string(body)?)
        .map_err(Box::new)?;

    Ok(response)
}

pub fn error_response(status: &StatusCode, message: &str) -> Result<Response<String>, Error> {
    json_response(status, &json!({ "error": message }))
}
