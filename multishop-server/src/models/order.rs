//! Order domain entities
//!
//! Each entity pairs with a draft (its mutable fields, no id) used for
//! inserts and full-overwrite updates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::error::BoxDynError;
use sqlx::postgres::PgArguments;
use sqlx::{Arguments, FromRow};

use super::timestamp::store_precision;
use crate::order::repository::{Column, Entity};

// ============================================================================
// Ordering
// ============================================================================

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Ordering {
    pub ordering_id: i32,
    /// Owning user; not validated against any user store
    pub user_id: String,
    pub total_price: Decimal,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderingDraft {
    pub user_id: String,
    pub total_price: Decimal,
    pub order_date: DateTime<Utc>,
}

impl Entity for Ordering {
    type Draft = OrderingDraft;

    const RESOURCE: &'static str = "ordering";
    const TABLE: &'static str = "Orderings";
    const KEY: Column = Column::new("OrderingId", "ordering_id");
    const COLUMNS: &'static [Column] = &[
        Column::new("UserId", "user_id"),
        Column::new("TotalPrice", "total_price"),
        Column::new("OrderDate", "order_date"),
    ];

    fn id(&self) -> i32 {
        self.ordering_id
    }

    fn draft(&self) -> OrderingDraft {
        OrderingDraft {
            user_id: self.user_id.clone(),
            total_price: self.total_price,
            order_date: self.order_date,
        }
    }

    fn from_draft(id: i32, draft: OrderingDraft) -> Self {
        Self {
            ordering_id: id,
            user_id: draft.user_id,
            total_price: draft.total_price,
            order_date: draft.order_date,
        }
    }

    fn normalize(self) -> Self {
        Self {
            order_date: store_precision(self.order_date),
            ..self
        }
    }

    fn bind_draft(draft: &OrderingDraft, args: &mut PgArguments) -> Result<(), BoxDynError> {
        args.add(draft.user_id.clone())?;
        args.add(draft.total_price)?;
        args.add(store_precision(draft.order_date))?;
        Ok(())
    }
}

// ============================================================================
// Order details (order lines)
// ============================================================================

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OrderDetail {
    pub order_detail_id: i32,
    pub product_id: String,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_amount: i32,
    pub product_total_price: Decimal,
    pub ordering_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetailDraft {
    pub product_id: String,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_amount: i32,
    pub product_total_price: Decimal,
    pub ordering_id: i32,
}

impl Entity for OrderDetail {
    type Draft = OrderDetailDraft;

    const RESOURCE: &'static str = "order detail";
    const TABLE: &'static str = "OrderDetails";
    const KEY: Column = Column::new("OrderDetailId", "order_detail_id");
    const COLUMNS: &'static [Column] = &[
        Column::new("ProductId", "product_id"),
        Column::new("ProductName", "product_name"),
        Column::new("ProductPrice", "product_price"),
        Column::new("ProductAmount", "product_amount"),
        Column::new("ProductTotalPrice", "product_total_price"),
        Column::new("OrderingId", "ordering_id"),
    ];

    fn id(&self) -> i32 {
        self.order_detail_id
    }

    fn draft(&self) -> OrderDetailDraft {
        OrderDetailDraft {
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            product_price: self.product_price,
            product_amount: self.product_amount,
            product_total_price: self.product_total_price,
            ordering_id: self.ordering_id,
        }
    }

    fn from_draft(id: i32, draft: OrderDetailDraft) -> Self {
        Self {
            order_detail_id: id,
            product_id: draft.product_id,
            product_name: draft.product_name,
            product_price: draft.product_price,
            product_amount: draft.product_amount,
            product_total_price: draft.product_total_price,
            ordering_id: draft.ordering_id,
        }
    }

    fn bind_draft(draft: &OrderDetailDraft, args: &mut PgArguments) -> Result<(), BoxDynError> {
        args.add(draft.product_id.clone())?;
        args.add(draft.product_name.clone())?;
        args.add(draft.product_price)?;
        args.add(draft.product_amount)?;
        args.add(draft.product_total_price)?;
        args.add(draft.ordering_id)?;
        Ok(())
    }
}

// ============================================================================
// Addresses
// ============================================================================

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Address {
    pub address_id: i32,
    pub user_id: String,
    pub district: String,
    pub city: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressDraft {
    pub user_id: String,
    pub district: String,
    pub city: String,
    pub detail: String,
}

impl Entity for Address {
    type Draft = AddressDraft;

    const RESOURCE: &'static str = "address";
    const TABLE: &'static str = "Addresses";
    const KEY: Column = Column::new("AddressId", "address_id");
    const COLUMNS: &'static [Column] = &[
        Column::new("UserId", "user_id"),
        Column::new("District", "district"),
        Column::new("City", "city"),
        Column::new("Detail", "detail"),
    ];

    fn id(&self) -> i32 {
        self.address_id
    }

    fn draft(&self) -> AddressDraft {
        AddressDraft {
            user_id: self.user_id.clone(),
            district: self.district.clone(),
            city: self.city.clone(),
            detail: self.detail.clone(),
        }
    }

    fn from_draft(id: i32, draft: AddressDraft) -> Self {
        Self {
            address_id: id,
            user_id: draft.user_id,
            district: draft.district,
            city: draft.city,
            detail: draft.detail,
        }
    }

    fn bind_draft(draft: &AddressDraft, args: &mut PgArguments) -> Result<(), BoxDynError> {
        args.add(draft.user_id.clone())?;
        args.add(draft.district.clone())?;
        args.add(draft.city.clone())?;
        args.add(draft.detail.clone())?;
        Ok(())
    }
}
