//! Coupon DTOs
//!
//! Row columns are aliased to snake_case in every SELECT so `FromRow` maps
//! them directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Coupon as returned by `list_coupons`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResultCouponDto {
    pub coupon_id: i32,
    pub code: String,
    pub rate: i32,
    pub is_active: bool,
    pub valid_date: DateTime<Utc>,
}

/// Coupon as returned by `get_coupon`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GetByIdCouponDto {
    pub coupon_id: i32,
    pub code: String,
    pub rate: i32,
    pub is_active: bool,
    pub valid_date: DateTime<Utc>,
}

/// Parameters of the coupon INSERT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponDto {
    pub code: String,
    pub rate: i32,
    pub is_active: bool,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub valid_date: DateTime<Utc>,
}

/// Parameters of the coupon UPDATE; every mutable field is overwritten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCouponDto {
    pub coupon_id: i32,
    pub code: String,
    pub rate: i32,
    pub is_active: bool,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub valid_date: DateTime<Utc>,
}
