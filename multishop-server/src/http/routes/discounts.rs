//! Coupon endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::discount::DiscountService;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::models::{CreateCouponDto, GetByIdCouponDto, ResultCouponDto, UpdateCouponDto};

type DiscountState = Arc<dyn DiscountService>;

/// GET /api/discounts - every coupon, ordered by id
async fn list_coupons(
    State(service): State<DiscountState>,
) -> Result<Json<Vec<ResultCouponDto>>, ApiError> {
    Ok(Json(service.list_coupons().await?))
}

/// GET /api/discounts/{id}
async fn get_coupon(
    State(service): State<DiscountState>,
    ValidId(id): ValidId,
) -> Result<Json<GetByIdCouponDto>, ApiError> {
    let coupon = service
        .get_coupon(id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "coupon",
            id,
        })?;
    Ok(Json(coupon))
}

/// POST /api/discounts
async fn create_coupon(
    State(service): State<DiscountState>,
    ValidJson(dto): ValidJson<CreateCouponDto>,
) -> Result<StatusCode, ApiError> {
    service.create_coupon(dto).await?;
    Ok(StatusCode::CREATED)
}

/// PUT /api/discounts
async fn update_coupon(
    State(service): State<DiscountState>,
    ValidJson(dto): ValidJson<UpdateCouponDto>,
) -> Result<StatusCode, ApiError> {
    service.update_coupon(dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/discounts/{id}
async fn delete_coupon(
    State(service): State<DiscountState>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    service.delete_coupon(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Coupon routes
pub fn router() -> Router<DiscountState> {
    Router::new()
        .route(
            "/api/discounts",
            get(list_coupons).post(create_coupon).put(update_coupon),
        )
        .route("/api/discounts/{id}", get(get_coupon).delete(delete_coupon))
}
