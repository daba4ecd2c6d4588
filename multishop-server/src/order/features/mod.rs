//! Order service features
//!
//! One module per entity, each with five requests (create, update, remove,
//! list, get by id) and one handler per request. `build_mediator` wires all
//! fifteen handlers to their repositories.

pub mod address;
pub mod order_detail;
pub mod ordering;

use std::sync::Arc;

use crate::db::DbContext;
use crate::models::{Address, OrderDetail, Ordering};

use super::mediator::Mediator;
use super::memory::InMemoryRepository;
use super::repository::{PgRepository, Repository};

/// The three entity stores the handlers depend on
#[derive(Clone)]
pub struct OrderRepositories {
    pub orderings: Arc<dyn Repository<Ordering>>,
    pub order_details: Arc<dyn Repository<OrderDetail>>,
    pub addresses: Arc<dyn Repository<Address>>,
}

impl OrderRepositories {
    pub fn postgres(db: &DbContext) -> Self {
        Self {
            orderings: Arc::new(PgRepository::<Ordering>::new(db.clone())),
            order_details: Arc::new(PgRepository::<OrderDetail>::new(db.clone())),
            addresses: Arc::new(PgRepository::<Address>::new(db.clone())),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            orderings: Arc::new(InMemoryRepository::<Ordering>::new()),
            order_details: Arc::new(InMemoryRepository::<OrderDetail>::new()),
            addresses: Arc::new(InMemoryRepository::<Address>::new()),
        }
    }
}

/// Register every order handler on a fresh mediator.
pub fn build_mediator(repos: &OrderRepositories) -> Mediator {
    use address::*;
    use order_detail::*;
    use ordering::*;

    let mut mediator = Mediator::new();

    mediator
        .register(CreateOrderingCommandHandler::new(repos.orderings.clone()))
        .register(UpdateOrderingCommandHandler::new(repos.orderings.clone()))
        .register(RemoveOrderingCommandHandler::new(repos.orderings.clone()))
        .register(GetOrderingQueryHandler::new(repos.orderings.clone()))
        .register(GetOrderingByIdQueryHandler::new(repos.orderings.clone()));

    mediator
        .register(CreateOrderDetailCommandHandler::new(repos.order_details.clone()))
        .register(UpdateOrderDetailCommandHandler::new(repos.order_details.clone()))
        .register(RemoveOrderDetailByIdCommandHandler::new(repos.order_details.clone()))
        .register(GetOrderDetailQueryHandler::new(repos.order_details.clone()))
        .register(GetOrderDetailByIdQueryHandler::new(repos.order_details.clone()));

    mediator
        .register(CreateAddressCommandHandler::new(repos.addresses.clone()))
        .register(UpdateAddressCommandHandler::new(repos.addresses.clone()))
        .register(RemoveAddressCommandHandler::new(repos.addresses.clone()))
        .register(GetAddressQueryHandler::new(repos.addresses.clone()))
        .register(GetAddressByIdQueryHandler::new(repos.addresses.clone()));

    tracing::debug!("order handlers registered");
    mediator
}

#[cfg(test)]
mod tests {
    use super::address::*;
    use super::order_detail::*;
    use super::ordering::*;
    use super::*;
    use crate::order::OrderError;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    #[test]
    fn every_request_has_a_handler() {
        let mediator = build_mediator(&OrderRepositories::in_memory());

        assert!(mediator.handles::<CreateOrderingCommand>());
        assert!(mediator.handles::<UpdateOrderingCommand>());
        assert!(mediator.handles::<RemoveOrderingCommand>());
        assert!(mediator.handles::<GetOrderingQuery>());
        assert!(mediator.handles::<GetOrderingByIdQuery>());

        assert!(mediator.handles::<CreateOrderDetailCommand>());
        assert!(mediator.handles::<UpdateOrderDetailCommand>());
        assert!(mediator.handles::<RemoveOrderDetailByIdCommand>());
        assert!(mediator.handles::<GetOrderDetailQuery>());
        assert!(mediator.handles::<GetOrderDetailByIdQuery>());

        assert!(mediator.handles::<CreateAddressCommand>());
        assert!(mediator.handles::<UpdateAddressCommand>());
        assert!(mediator.handles::<RemoveAddressCommand>());
        assert!(mediator.handles::<GetAddressQuery>());
        assert!(mediator.handles::<GetAddressByIdQuery>());
    }

    #[tokio::test]
    async fn ordering_lifecycle_through_mediator() {
        let mediator = build_mediator(&OrderRepositories::in_memory());

        mediator
            .send(CreateOrderingCommand {
                user_id: "user-42".into(),
                total_price: Decimal::new(9990, 2),
                order_date: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
            })
            .await
            .unwrap();

        let listed = mediator.send(GetOrderingQuery).await.unwrap();
        assert_eq!(listed.len(), 1);
        let id = listed[0].ordering_id;

        let one = mediator.send(GetOrderingByIdQuery { id }).await.unwrap();
        assert_eq!(one.user_id, "user-42");
        assert_eq!(one.total_price, Decimal::new(9990, 2));

        mediator.send(RemoveOrderingCommand { id }).await.unwrap();
        let err = mediator.send(GetOrderingByIdQuery { id }).await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound { .. }));
    }

    #[tokio::test]
    async fn entity_stores_are_independent() {
        let repos = OrderRepositories::in_memory();
        let mediator = build_mediator(&repos);

        mediator
            .send(CreateAddressCommand {
                user_id: "user-1".into(),
                district: "Moda".into(),
                city: "Istanbul".into(),
                detail: "No 4".into(),
            })
            .await
            .unwrap();

        assert_eq!(mediator.send(GetAddressQuery).await.unwrap().len(), 1);
        assert!(mediator.send(GetOrderingQuery).await.unwrap().is_empty());
        assert!(mediator.send(GetOrderDetailQuery).await.unwrap().is_empty());
    }
}
