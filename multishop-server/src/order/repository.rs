//! Generic repository
//!
//! `Repository<E>` is the only storage-facing interface the order handlers
//! see. `PgRepository` generates its statements from `Entity` metadata;
//! `InMemoryRepository` (see `memory`) is the test double.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{Arguments, FromRow};

use super::sql;
use crate::db::{DbContext, StorageError};

/// A table column and the struct field it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub field: &'static str,
}

impl Column {
    pub const fn new(name: &'static str, field: &'static str) -> Self {
        Self { name, field }
    }
}

/// A persisted entity with a store-generated integer key
pub trait Entity: for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static {
    /// Mutable fields, without the key
    type Draft: Clone + Send + Sync + 'static;

    /// Human-readable name used in logs and not-found errors
    const RESOURCE: &'static str;
    const TABLE: &'static str;
    const KEY: Column;
    /// Mutable columns, in the order `bind_draft` pushes them
    const COLUMNS: &'static [Column];

    fn id(&self) -> i32;

    fn draft(&self) -> Self::Draft;

    fn from_draft(id: i32, draft: Self::Draft) -> Self;

    /// Round fields to the precision the table keeps. Identity by default.
    fn normalize(self) -> Self {
        self
    }

    /// Push one argument per entry of `COLUMNS`, in order.
    fn bind_draft(draft: &Self::Draft, args: &mut PgArguments) -> Result<(), BoxDynError>;
}

/// Capability set every entity store provides
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Every row, ordered by key. Empty vec for an empty table.
    async fn list_all(&self) -> Result<Vec<E>, StorageError>;

    /// `None` when no row has this key.
    async fn get_by_id(&self, id: i32) -> Result<Option<E>, StorageError>;

    /// Insert and return the stored entity with its generated key.
    async fn add(&self, draft: E::Draft) -> Result<E, StorageError>;

    /// Overwrite every mutable column. No-op when the key does not exist.
    async fn update(&self, entity: E) -> Result<(), StorageError>;

    /// Delete by key. No-op when the key does not exist.
    async fn remove(&self, id: i32) -> Result<(), StorageError>;
}

/// PostgreSQL-backed repository
pub struct PgRepository<E> {
    db: DbContext,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> PgRepository<E> {
    pub fn new(db: DbContext) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn list_all(&self) -> Result<Vec<E>, StorageError> {
        let statement = sql::select_all::<E>();
        let mut conn = self.db.acquire().await?;

        let rows = sqlx::query_as::<_, E>(&statement)
            .fetch_all(&mut *conn)
            .await?;

        tracing::debug!(resource = E::RESOURCE, count = rows.len(), "listed");
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<E>, StorageError> {
        let statement = sql::select_by_id::<E>();
        let mut conn = self.db.acquire().await?;

        let row = sqlx::query_as::<_, E>(&statement)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        tracing::debug!(resource = E::RESOURCE, id, found = row.is_some(), "fetched");
        Ok(row)
    }

    async fn add(&self, draft: E::Draft) -> Result<E, StorageError> {
        let statement = sql::insert::<E>();
        let mut args = PgArguments::default();
        E::bind_draft(&draft, &mut args).map_err(sqlx::Error::Encode)?;

        let mut conn = self.db.acquire().await?;
        let entity = sqlx::query_as_with::<_, E, _>(&statement, args)
            .fetch_one(&mut *conn)
            .await?;

        tracing::debug!(resource = E::RESOURCE, id = entity.id(), "added");
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<(), StorageError> {
        let statement = sql::update::<E>();
        let mut args = PgArguments::default();
        E::bind_draft(&entity.draft(), &mut args).map_err(sqlx::Error::Encode)?;
        args.add(entity.id()).map_err(sqlx::Error::Encode)?;

        let mut conn = self.db.acquire().await?;
        let result = sqlx::query_with(&statement, args)
            .execute(&mut *conn)
            .await?;

        tracing::debug!(
            resource = E::RESOURCE,
            id = entity.id(),
            rows = result.rows_affected(),
            "updated"
        );
        Ok(())
    }

    async fn remove(&self, id: i32) -> Result<(), StorageError> {
        let statement = sql::delete::<E>();
        let mut conn = self.db.acquire().await?;

        let result = sqlx::query(&statement)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        tracing::debug!(
            resource = E::RESOURCE,
            id,
            rows = result.rows_affected(),
            "removed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use crate::models::{store_precision, OrderDetail, OrderDetailDraft, Ordering, OrderingDraft};
    use crate::order::memory::InMemoryRepository;
    use chrono::{TimeZone, Utc};
    use multishop_core::DatabaseConfig;
    use rust_decimal::Decimal;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p multishop-server -- --ignored

    async fn connect() -> DbContext {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let db = DbContext::connect(&DatabaseConfig {
            url,
            ..DatabaseConfig::default()
        })
        .await
        .expect("connect");
        schema::ensure_order_schema(&db).await.expect("schema");
        db
    }

    fn ordering_draft(user: &str) -> OrderingDraft {
        OrderingDraft {
            user_id: user.into(),
            total_price: Decimal::new(25050, 2),
            order_date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn add_then_get_returns_stored_fields() {
        let repo = PgRepository::<Ordering>::new(connect().await);

        let added = repo.add(ordering_draft("pg-user-1")).await.unwrap();
        let fetched = repo.get_by_id(added.ordering_id).await.unwrap().unwrap();

        assert_eq!(fetched, added);
        repo.remove(added.ordering_id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_overwrites_and_remove_is_idempotent() {
        let repo = PgRepository::<Ordering>::new(connect().await);
        let added = repo.add(ordering_draft("pg-user-2")).await.unwrap();

        let replacement = Ordering::from_draft(
            added.ordering_id,
            OrderingDraft {
                user_id: "pg-user-3".into(),
                total_price: Decimal::new(100, 2),
                order_date: Utc.with_ymd_and_hms(2024, 4, 2, 8, 30, 0).unwrap(),
            },
        );
        repo.update(replacement.clone()).await.unwrap();
        assert_eq!(repo.get_by_id(added.ordering_id).await.unwrap(), Some(replacement));

        repo.remove(added.ordering_id).await.unwrap();
        repo.remove(added.ordering_id).await.unwrap();
        assert!(repo.get_by_id(added.ordering_id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn sub_microsecond_order_date_matches_in_memory_store() {
        let repo = PgRepository::<Ordering>::new(connect().await);
        let memory = InMemoryRepository::<Ordering>::new();
        let draft = OrderingDraft {
            order_date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
                + chrono::Duration::nanoseconds(987_654_321),
            ..ordering_draft("pg-user-4")
        };

        let added = repo.add(draft.clone()).await.unwrap();
        let fetched = repo.get_by_id(added.ordering_id).await.unwrap().unwrap();
        let local = memory.add(draft.clone()).await.unwrap();

        assert_eq!(fetched.order_date, store_precision(draft.order_date));
        assert_eq!(fetched.order_date, local.order_date);
        repo.remove(added.ordering_id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn detail_with_unknown_ordering_is_constraint_violation() {
        let repo = PgRepository::<OrderDetail>::new(connect().await);

        let err = repo
            .add(OrderDetailDraft {
                product_id: "p-1".into(),
                product_name: "Keyboard".into(),
                product_price: Decimal::new(4500, 2),
                product_amount: 1,
                product_total_price: Decimal::new(4500, 2),
                ordering_id: i32::MAX,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation { .. }));
    }
}
