//! Discount service: coupon CRUD over direct parameterized statements

pub mod memory;
pub mod service;

pub use memory::InMemoryDiscountService;
pub use service::{DiscountService, PgDiscountService};
