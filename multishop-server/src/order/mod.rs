//! Order service: CQRS over a generic repository
//!
//! HTTP handlers build a request struct and `send` it through the
//! `Mediator`; the registered handler talks to a `Repository<E>` and maps
//! entities into flat result DTOs.

pub mod error;
pub mod features;
pub mod mediator;
pub mod memory;
pub mod repository;
pub mod sql;

pub use error::OrderError;
pub use features::{build_mediator, OrderRepositories};
pub use mediator::{Mediator, Request, RequestHandler};
pub use memory::InMemoryRepository;
pub use repository::{Column, Entity, PgRepository, Repository};
