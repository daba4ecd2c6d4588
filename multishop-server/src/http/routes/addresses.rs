//! Address endpoints, dispatched through the mediator

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::order::features::address::{
    CreateAddressCommand, GetAddressByIdQuery, GetAddressByIdQueryResult, GetAddressQuery,
    GetAddressQueryResult, RemoveAddressCommand, UpdateAddressCommand,
};
use crate::order::Mediator;

async fn list_addresses(
    State(mediator): State<Arc<Mediator>>,
) -> Result<Json<Vec<GetAddressQueryResult>>, ApiError> {
    Ok(Json(mediator.send(GetAddressQuery).await?))
}

async fn get_address(
    State(mediator): State<Arc<Mediator>>,
    ValidId(id): ValidId,
) -> Result<Json<GetAddressByIdQueryResult>, ApiError> {
    Ok(Json(mediator.send(GetAddressByIdQuery { id }).await?))
}

async fn create_address(
    State(mediator): State<Arc<Mediator>>,
    ValidJson(command): ValidJson<CreateAddressCommand>,
) -> Result<StatusCode, ApiError> {
    mediator.send(command).await?;
    Ok(StatusCode::CREATED)
}

async fn update_address(
    State(mediator): State<Arc<Mediator>>,
    ValidJson(command): ValidJson<UpdateAddressCommand>,
) -> Result<StatusCode, ApiError> {
    mediator.send(command).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_address(
    State(mediator): State<Arc<Mediator>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    mediator.send(RemoveAddressCommand { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Address routes
pub fn router() -> Router<Arc<Mediator>> {
    Router::new()
        .route(
            "/api/addresses",
            get(list_addresses).post(create_address).put(update_address),
        )
        .route("/api/addresses/{id}", get(get_address).delete(remove_address))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::http::routes::order_app;
    use crate::http::routes::test_support::call;
    use crate::order::{build_mediator, OrderRepositories};

    #[tokio::test]
    async fn address_round_trip_over_http() {
        let app = order_app(Arc::new(build_mediator(&OrderRepositories::in_memory())));

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/addresses",
            Some(json!({
                "userId": "user-3",
                "district": "Nilufer",
                "city": "Bursa",
                "detail": "Apt 12"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = call(&app, Method::GET, "/api/addresses/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["addressId"], 1);
        assert_eq!(body["city"], "Bursa");

        let (status, _) = call(&app, Method::DELETE, "/api/addresses/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&app, Method::GET, "/api/addresses/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let app = order_app(Arc::new(build_mediator(&OrderRepositories::in_memory())));

        let (status, body) = call(&app, Method::POST, "/api/addresses", Some(json!({ "city": 3 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().starts_with("request body: "));
    }
}
