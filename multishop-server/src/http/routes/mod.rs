//! Route handlers organized by resource

pub mod addresses;
pub mod discounts;
pub mod health;
pub mod order_details;
pub mod orderings;

use std::sync::Arc;

use axum::Router;

use super::server::Service;
use crate::discount::DiscountService;
use crate::order::Mediator;

/// Discount service router: `/health` and `/api/discounts`
pub fn discount_app(service: Arc<dyn DiscountService>) -> Router {
    Router::new()
        .merge(health::router(Service::Discount))
        .merge(discounts::router())
        .with_state(service)
}

/// Order service router: `/health`, `/api/orderings`, `/api/orderdetails`
/// and `/api/addresses`, all dispatched through `mediator`
pub fn order_app(mediator: Arc<Mediator>) -> Router {
    Router::new()
        .merge(health::router(Service::Order))
        .merge(orderings::router())
        .merge(order_details::router())
        .merge(addresses::router())
        .with_state(mediator)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    /// Send one request and decode the body: JSON when it parses, the raw
    /// text otherwise, `Value::Null` when empty.
    pub async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        call_raw(app, method, uri, body.map(|json| json.to_string())).await
    }

    /// Like `call`, but the body is sent as-is with a JSON content type
    pub async fn call_raw(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(text) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(text))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }
}
