//! Entities and boundary DTOs
//!
//! DTOs are flat and carry no behavior. JSON field names are camelCase
//! (`couponId`, `isActive`, `orderingId`, ...).

pub mod coupon;
pub mod order;
pub mod timestamp;
pub mod validation;

pub use coupon::{CreateCouponDto, GetByIdCouponDto, ResultCouponDto, UpdateCouponDto};
pub use order::{Address, AddressDraft, OrderDetail, OrderDetailDraft, Ordering, OrderingDraft};
pub use timestamp::store_precision;
pub use validation::ValidationError;
