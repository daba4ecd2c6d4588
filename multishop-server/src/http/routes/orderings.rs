//! Ordering endpoints, dispatched through the mediator

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::order::features::ordering::{
    CreateOrderingCommand, GetOrderingByIdQuery, GetOrderingByIdQueryResult, GetOrderingQuery,
    GetOrderingQueryResult, RemoveOrderingCommand, UpdateOrderingCommand,
};
use crate::order::Mediator;

/// GET /api/orderings
async fn list_orderings(
    State(mediator): State<Arc<Mediator>>,
) -> Result<Json<Vec<GetOrderingQueryResult>>, ApiError> {
    Ok(Json(mediator.send(GetOrderingQuery).await?))
}

/// GET /api/orderings/{id}
async fn get_ordering(
    State(mediator): State<Arc<Mediator>>,
    ValidId(id): ValidId,
) -> Result<Json<GetOrderingByIdQueryResult>, ApiError> {
    Ok(Json(mediator.send(GetOrderingByIdQuery { id }).await?))
}

/// POST /api/orderings
async fn create_ordering(
    State(mediator): State<Arc<Mediator>>,
    ValidJson(command): ValidJson<CreateOrderingCommand>,
) -> Result<StatusCode, ApiError> {
    mediator.send(command).await?;
    Ok(StatusCode::CREATED)
}

/// PUT /api/orderings
async fn update_ordering(
    State(mediator): State<Arc<Mediator>>,
    ValidJson(command): ValidJson<UpdateOrderingCommand>,
) -> Result<StatusCode, ApiError> {
    mediator.send(command).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/orderings/{id}
async fn remove_ordering(
    State(mediator): State<Arc<Mediator>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    mediator.send(RemoveOrderingCommand { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Ordering routes
pub fn router() -> Router<Arc<Mediator>> {
    Router::new()
        .route(
            "/api/orderings",
            get(list_orderings).post(create_ordering).put(update_ordering),
        )
        .route("/api/orderings/{id}", get(get_ordering).delete(remove_ordering))
}
