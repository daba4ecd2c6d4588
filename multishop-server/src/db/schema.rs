//! Idempotent table bootstrap
//!
//! Runs `CREATE TABLE IF NOT EXISTS` at service start so a fresh database is
//! usable. Existing tables are left untouched; there is no versioning.

use super::{DbContext, StorageError};

const COUPONS: &str = r#"
    CREATE TABLE IF NOT EXISTS Coupons (
        CouponId SERIAL PRIMARY KEY,
        Code TEXT NOT NULL,
        Rate INTEGER NOT NULL,
        IsActive BOOLEAN NOT NULL,
        ValidDate TIMESTAMPTZ NOT NULL
    )
"#;

const ORDERINGS: &str = r#"
    CREATE TABLE IF NOT EXISTS Orderings (
        OrderingId SERIAL PRIMARY KEY,
        UserId TEXT NOT NULL,
        TotalPrice NUMERIC(18, 2) NOT NULL,
        OrderDate TIMESTAMPTZ NOT NULL
    )
"#;

const ORDER_DETAILS: &str = r#"
    CREATE TABLE IF NOT EXISTS OrderDetails (
        OrderDetailId SERIAL PRIMARY KEY,
        ProductId TEXT NOT NULL,
        ProductName TEXT NOT NULL,
        ProductPrice NUMERIC(18, 2) NOT NULL,
        ProductAmount INTEGER NOT NULL,
        ProductTotalPrice NUMERIC(18, 2) NOT NULL,
        OrderingId INTEGER NOT NULL REFERENCES Orderings(OrderingId) ON DELETE CASCADE
    )
"#;

const ADDRESSES: &str = r#"
    CREATE TABLE IF NOT EXISTS Addresses (
        AddressId SERIAL PRIMARY KEY,
        UserId TEXT NOT NULL,
        District TEXT NOT NULL,
        City TEXT NOT NULL,
        Detail TEXT NOT NULL
    )
"#;

/// Tables owned by the discount service
pub async fn ensure_discount_schema(db: &DbContext) -> Result<(), StorageError> {
    tracing::info!("Ensuring discount schema...");
    run(db, &[COUPONS]).await
}

/// Tables owned by the order service
pub async fn ensure_order_schema(db: &DbContext) -> Result<(), StorageError> {
    tracing::info!("Ensuring order schema...");
    run(db, &[ORDERINGS, ORDER_DETAILS, ADDRESSES]).await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_orderdetails_ordering ON OrderDetails(OrderingId)")
        .execute(db.pool())
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_addresses_user ON Addresses(UserId)")
        .execute(db.pool())
        .await?;

    Ok(())
}

async fn run(db: &DbContext, statements: &[&str]) -> Result<(), StorageError> {
    let mut conn = db.acquire().await?;
    for statement in statements {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use multishop_core::DatabaseConfig;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bootstrap_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let db = DbContext::connect(&DatabaseConfig {
            url,
            ..DatabaseConfig::default()
        })
        .await
        .expect("connect");

        for _ in 0..2 {
            ensure_discount_schema(&db).await.expect("discount schema");
            ensure_order_schema(&db).await.expect("order schema");
        }
    }
}
