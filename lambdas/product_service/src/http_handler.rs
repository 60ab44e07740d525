use lambda_http::RequestExt;
use lambda_http::{
    http::{Method, StatusCode},
    tracing, Error, IntoResponse, Request, Response,
};
use shared::core::{ProductListResponse, ProductStore};
use shared::cursor;
use shared::metrics::Metrics;
use shared::utils::{error_response, json_response};

const DEFAULT_PAGE_SIZE: u32 = 50;
const MAX_PAGE_SIZE: u32 = 100;

pub(crate) struct HandlerDeps<S: ProductStore, M: Metrics> {
    pub store: S,
    pub metrics: M,
}

// First match wins: the collection route, then any request carrying an `id`
// path parameter, then 404.
pub(crate) async fn function_handler<S: ProductStore, M: Metrics>(
    deps: &HandlerDeps<S, M>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    tracing::info!(method = %event.method(), path = %event.uri().path(), "Received request");

    if *event.method() != Method::GET {
        return error_response(&StatusCode::NOT_FOUND, "Not found");
    }
    if event.uri().path() == "/products" {
        return list_products(deps, &event).await;
    }

    let product_id = event
        .path_parameters_ref()
        .and_then(|params| params.first("id"))
        .map(|id| id.to_string());
    match product_id {
        Some(product_id) => get_product(deps, &product_id).await,
        None => error_response(&StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn list_products<S: ProductStore, M: Metrics>(
    deps: &HandlerDeps<S, M>,
    event: &Request,
) -> Result<Response<String>, Error> {
    let query_params = event.query_string_parameters();
    // Values above the cap are silently capped; anything unparseable falls
    // back to the default.
    let limit = query_params
        .first("limit")
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);
    let start_key = cursor::decode(query_params.first("lastKey"));

    match deps.store.scan_products(limit, start_key).await {
        Ok(page) => {
            tracing::info!(
                count = page.items.len(),
                has_more = page.next_key.is_some(),
                "Retrieved products"
            );
            deps.metrics.count("ProductViews", page.items.len() as f64);
            let body = ProductListResponse {
                count: page.items.len(),
                last_key: cursor::encode(page.next_key.as_ref()),
                products: page.items,
            };
            json_response(&StatusCode::OK, &body)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list products");
            deps.metrics.count("Errors", 1.0);
            error_response(&StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

async fn get_product<S: ProductStore, M: Metrics>(
    deps: &HandlerDeps<S, M>,
    product_id: &str,
) -> Result<Response<String>, Error> {
    match deps.store.get_product(product_id).await {
        Ok(Some(product)) => {
            deps.metrics.count("ProductViews", 1.0);
            json_response(&StatusCode::OK, &product)
        }
        Ok(None) => {
            tracing::warn!(product_id, "Product not found");
            error_response(&StatusCode::NOT_FOUND, "Product not found")
        }
        Err(e) => {
            tracing::error!(error = %e, product_id, "Failed to fetch product");
            deps.metrics.count("Errors", 1.0);
            error_response(&StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
