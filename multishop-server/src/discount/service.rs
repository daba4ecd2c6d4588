//! Coupon data access
//!
//! One method per verb. Each call acquires its own pooled connection, runs
//! exactly one statement and releases the connection on every exit path.

use async_trait::async_trait;

use crate::db::{DbContext, StorageError};
use crate::models::{
    store_precision, CreateCouponDto, GetByIdCouponDto, ResultCouponDto, UpdateCouponDto,
};

const INSERT_COUPON: &str = r#"
    INSERT INTO Coupons (Code, Rate, IsActive, ValidDate)
    VALUES ($1, $2, $3, $4)
"#;

const DELETE_COUPON: &str = "DELETE FROM Coupons WHERE CouponId = $1";

const SELECT_COUPONS: &str = r#"
    SELECT CouponId AS coupon_id, Code AS code, Rate AS rate,
           IsActive AS is_active, ValidDate AS valid_date
    FROM Coupons
    ORDER BY CouponId
"#;

const SELECT_COUPON_BY_ID: &str = r#"
    SELECT CouponId AS coupon_id, Code AS code, Rate AS rate,
           IsActive AS is_active, ValidDate AS valid_date
    FROM Coupons
    WHERE CouponId = $1
"#;

const UPDATE_COUPON: &str = r#"
    UPDATE Coupons
    SET Code = $1, Rate = $2, IsActive = $3, ValidDate = $4
    WHERE CouponId = $5
"#;

/// Coupon operations exposed to the HTTP layer
#[async_trait]
pub trait DiscountService: Send + Sync {
    /// Insert a coupon. The generated id is not returned.
    async fn create_coupon(&self, dto: CreateCouponDto) -> Result<(), StorageError>;

    /// Delete by id. Zero matching rows is not an error.
    async fn delete_coupon(&self, id: i32) -> Result<(), StorageError>;

    /// Every coupon, ordered by id
    async fn list_coupons(&self) -> Result<Vec<ResultCouponDto>, StorageError>;

    async fn get_coupon(&self, id: i32) -> Result<Option<GetByIdCouponDto>, StorageError>;

    /// Overwrite code, rate, activity and validity. Unknown ids are ignored.
    async fn update_coupon(&self, dto: UpdateCouponDto) -> Result<(), StorageError>;
}

/// PostgreSQL-backed coupon store
#[derive(Debug, Clone)]
pub struct PgDiscountService {
    db: DbContext,
}

impl PgDiscountService {
    pub fn new(db: DbContext) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DiscountService for PgDiscountService {
    async fn create_coupon(&self, dto: CreateCouponDto) -> Result<(), StorageError> {
        let mut conn = self.db.acquire().await?;

        sqlx::query(INSERT_COUPON)
            .bind(&dto.code)
            .bind(dto.rate)
            .bind(dto.is_active)
            .bind(store_precision(dto.valid_date))
            .execute(&mut *conn)
            .await?;

        tracing::debug!(code = %dto.code, "coupon created");
        Ok(())
    }

    async fn delete_coupon(&self, id: i32) -> Result<(), StorageError> {
        let mut conn = self.db.acquire().await?;

        let result = sqlx::query(DELETE_COUPON)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        tracing::debug!(id, rows = result.rows_affected(), "coupon deleted");
        Ok(())
    }

    async fn list_coupons(&self) -> Result<Vec<ResultCouponDto>, StorageError> {
        let mut conn = self.db.acquire().await?;

        let coupons = sqlx::query_as::<_, ResultCouponDto>(SELECT_COUPONS)
            .fetch_all(&mut *conn)
            .await?;

        tracing::debug!(count = coupons.len(), "coupons listed");
        Ok(coupons)
    }

    async fn get_coupon(&self, id: i32) -> Result<Option<GetByIdCouponDto>, StorageError> {
        let mut conn = self.db.acquire().await?;

        let coupon = sqlx::query_as::<_, GetByIdCouponDto>(SELECT_COUPON_BY_ID)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        tracing::debug!(id, found = coupon.is_some(), "coupon fetched");
        Ok(coupon)
    }

    async fn update_coupon(&self, dto: UpdateCouponDto) -> Result<(), StorageError> {
        let mut conn = self.db.acquire().await?;

        let result = sqlx::query(UPDATE_COUPON)
            .bind(&dto.code)
            .bind(dto.rate)
            .bind(dto.is_active)
            .bind(store_precision(dto.valid_date))
            .bind(dto.coupon_id)
            .execute(&mut *conn)
            .await?;

        tracing::debug!(
            id = dto.coupon_id,
            rows = result.rows_affected(),
            "coupon updated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use crate::discount::InMemoryDiscountService;
    use chrono::{TimeZone, Utc};
    use multishop_core::DatabaseConfig;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p multishop-server -- --ignored

    async fn service() -> PgDiscountService {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let db = DbContext::connect(&DatabaseConfig {
            url,
            ..DatabaseConfig::default()
        })
        .await
        .expect("connect");
        schema::ensure_discount_schema(&db).await.expect("schema");
        PgDiscountService::new(db)
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn coupon_lifecycle() {
        let svc = service().await;
        let code = format!("SAVE10-{}", std::process::id());
        let valid_date = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();

        svc.create_coupon(CreateCouponDto {
            code: code.clone(),
            rate: 10,
            is_active: true,
            valid_date,
        })
        .await
        .unwrap();

        let created: Vec<_> = svc
            .list_coupons()
            .await
            .unwrap()
            .into_iter()
            .filter(|c| c.code == code)
            .collect();
        assert_eq!(created.len(), 1);
        let id = created[0].coupon_id;
        assert_eq!(created[0].rate, 10);
        assert_eq!(created[0].valid_date, valid_date);

        svc.update_coupon(UpdateCouponDto {
            coupon_id: id,
            code: code.clone(),
            rate: 25,
            is_active: false,
            valid_date,
        })
        .await
        .unwrap();

        let fetched = svc.get_coupon(id).await.unwrap().unwrap();
        assert_eq!(fetched.rate, 25);
        assert!(!fetched.is_active);

        svc.delete_coupon(id).await.unwrap();
        svc.delete_coupon(id).await.unwrap();
        assert!(svc.get_coupon(id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_of_unknown_id_is_silent() {
        let svc = service().await;
        svc.update_coupon(UpdateCouponDto {
            coupon_id: i32::MAX,
            code: "GHOST".into(),
            rate: 1,
            is_active: false,
            valid_date: Utc::now(),
        })
        .await
        .unwrap();

        assert!(svc.get_coupon(i32::MAX).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn sub_microsecond_dates_match_in_memory_store() {
        let svc = service().await;
        let memory = InMemoryDiscountService::new();
        let code = format!("NANOS-{}", std::process::id());
        let dto = CreateCouponDto {
            code: code.clone(),
            rate: 5,
            is_active: true,
            valid_date: Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap()
                + chrono::Duration::nanoseconds(123_456_789),
        };

        svc.create_coupon(dto.clone()).await.unwrap();
        memory.create_coupon(dto.clone()).await.unwrap();

        let id = svc
            .list_coupons()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.code == code)
            .unwrap()
            .coupon_id;
        let stored = svc.get_coupon(id).await.unwrap().unwrap();
        let faked = memory.get_coupon(1).await.unwrap().unwrap();

        assert_eq!(stored.valid_date, store_precision(dto.valid_date));
        assert_eq!(stored.valid_date, faked.valid_date);

        svc.delete_coupon(id).await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_store_surfaces_connection_error() {
        let db = DbContext::connect_lazy(&DatabaseConfig {
            url: "postgres://multishop@127.0.0.1:1/multishop".into(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        })
        .unwrap();

        let err = PgDiscountService::new(db).list_coupons().await.unwrap_err();
        assert!(err.is_connection());
    }
}
