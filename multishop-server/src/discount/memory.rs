//! In-memory coupon store with the same observable semantics as the
//! Postgres service: ids start at 1, are never reused, listing is ordered
//! by id, and dates keep microsecond precision.

use std::collections::BTreeMap;
use std::sync::atomic::AtomicI32;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DiscountService;
use crate::db::keys::next_key;
use crate::db::StorageError;
use crate::models::{
    store_precision, CreateCouponDto, GetByIdCouponDto, ResultCouponDto, UpdateCouponDto,
};

#[derive(Debug)]
pub struct InMemoryDiscountService {
    coupons: RwLock<BTreeMap<i32, ResultCouponDto>>,
    next_id: AtomicI32,
}

impl InMemoryDiscountService {
    pub fn new() -> Self {
        Self {
            coupons: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryDiscountService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiscountService for InMemoryDiscountService {
    async fn create_coupon(&self, dto: CreateCouponDto) -> Result<(), StorageError> {
        let coupon_id = next_key(&self.next_id, "coupon")?;
        self.coupons.write().await.insert(
            coupon_id,
            ResultCouponDto {
                coupon_id,
                code: dto.code,
                rate: dto.rate,
                is_active: dto.is_active,
                valid_date: store_precision(dto.valid_date),
            },
        );
        Ok(())
    }

    async fn delete_coupon(&self, id: i32) -> Result<(), StorageError> {
        self.coupons.write().await.remove(&id);
        Ok(())
    }

    async fn list_coupons(&self) -> Result<Vec<ResultCouponDto>, StorageError> {
        Ok(self.coupons.read().await.values().cloned().collect())
    }

    async fn get_coupon(&self, id: i32) -> Result<Option<GetByIdCouponDto>, StorageError> {
        Ok(self.coupons.read().await.get(&id).map(|c| GetByIdCouponDto {
            coupon_id: c.coupon_id,
            code: c.code.clone(),
            rate: c.rate,
            is_active: c.is_active,
            valid_date: c.valid_date,
        }))
    }

    async fn update_coupon(&self, dto: UpdateCouponDto) -> Result<(), StorageError> {
        if let Some(coupon) = self.coupons.write().await.get_mut(&dto.coupon_id) {
            coupon.code = dto.code;
            coupon.rate = dto.rate;
            coupon.is_active = dto.is_active;
            coupon.valid_date = store_precision(dto.valid_date);
        }
        Ok(())
    }
}
