//! Order line endpoints, dispatched through the mediator

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::order::features::order_detail::{
    CreateOrderDetailCommand, GetOrderDetailByIdQuery, GetOrderDetailByIdQueryResult,
    GetOrderDetailQuery, GetOrderDetailQueryResult, RemoveOrderDetailByIdCommand,
    UpdateOrderDetailCommand,
};
use crate::order::Mediator;

async fn list_order_details(
    State(mediator): State<Arc<Mediator>>,
) -> Result<Json<Vec<GetOrderDetailQueryResult>>, ApiError> {
    Ok(Json(mediator.send(GetOrderDetailQuery).await?))
}

async fn get_order_detail(
    State(mediator): State<Arc<Mediator>>,
    ValidId(id): ValidId,
) -> Result<Json<GetOrderDetailByIdQueryResult>, ApiError> {
    Ok(Json(mediator.send(GetOrderDetailByIdQuery { id }).await?))
}

async fn create_order_detail(
    State(mediator): State<Arc<Mediator>>,
    ValidJson(command): ValidJson<CreateOrderDetailCommand>,
) -> Result<StatusCode, ApiError> {
    mediator.send(command).await?;
    Ok(StatusCode::CREATED)
}

async fn update_order_detail(
    State(mediator): State<Arc<Mediator>>,
    ValidJson(command): ValidJson<UpdateOrderDetailCommand>,
) -> Result<StatusCode, ApiError> {
    mediator.send(command).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_order_detail(
    State(mediator): State<Arc<Mediator>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    mediator.send(RemoveOrderDetailByIdCommand::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Order line routes
pub fn router() -> Router<Arc<Mediator>> {
    Router::new()
        .route(
            "/api/orderdetails",
            get(list_order_details)
                .post(create_order_detail)
                .put(update_order_detail),
        )
        .route(
            "/api/orderdetails/{id}",
            get(get_order_detail).delete(remove_order_detail),
        )
}
