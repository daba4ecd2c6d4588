//! Ordering commands, queries and their handlers

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Ordering, OrderingDraft};
use crate::order::mediator::{Request, RequestHandler};
use crate::order::repository::{Entity, Repository};
use crate::order::OrderError;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderingCommand {
    pub user_id: String,
    pub total_price: Decimal,
    #[serde(deserialize_with = "crate::models::timestamp::deserialize")]
    pub order_date: DateTime<Utc>,
}

impl Request for CreateOrderingCommand {
    type Response = ();
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderingCommand {
    pub ordering_id: i32,
    pub user_id: String,
    pub total_price: Decimal,
    #[serde(deserialize_with = "crate::models::timestamp::deserialize")]
    pub order_date: DateTime<Utc>,
}

impl Request for UpdateOrderingCommand {
    type Response = ();
}

#[derive(Debug, Clone)]
pub struct RemoveOrderingCommand {
    pub id: i32,
}

impl Request for RemoveOrderingCommand {
    type Response = ();
}

#[derive(Debug, Clone)]
pub struct GetOrderingQuery;

impl Request for GetOrderingQuery {
    type Response = Vec<GetOrderingQueryResult>;
}

#[derive(Debug, Clone)]
pub struct GetOrderingByIdQuery {
    pub id: i32,
}

impl Request for GetOrderingByIdQuery {
    type Response = GetOrderingByIdQueryResult;
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderingQueryResult {
    pub ordering_id: i32,
    pub user_id: String,
    pub total_price: Decimal,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderingByIdQueryResult {
    pub ordering_id: i32,
    pub user_id: String,
    pub total_price: Decimal,
    pub order_date: DateTime<Utc>,
}

// ============================================================================
// Handlers
// ============================================================================

pub struct CreateOrderingCommandHandler {
    repository: Arc<dyn Repository<Ordering>>,
}

impl CreateOrderingCommandHandler {
    pub fn new(repository: Arc<dyn Repository<Ordering>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for CreateOrderingCommandHandler {
    type Request = CreateOrderingCommand;

    async fn handle(&self, command: CreateOrderingCommand) -> Result<(), OrderError> {
        self.repository
            .add(OrderingDraft {
                user_id: command.user_id,
                total_price: command.total_price,
                order_date: command.order_date,
            })
            .await?;
        Ok(())
    }
}

pub struct UpdateOrderingCommandHandler {
    repository: Arc<dyn Repository<Ordering>>,
}

impl UpdateOrderingCommandHandler {
    pub fn new(repository: Arc<dyn Repository<Ordering>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for UpdateOrderingCommandHandler {
    type Request = UpdateOrderingCommand;

    async fn handle(&self, command: UpdateOrderingCommand) -> Result<(), OrderError> {
        self.repository
            .update(Ordering {
                ordering_id: command.ordering_id,
                user_id: command.user_id,
                total_price: command.total_price,
                order_date: command.order_date,
            })
            .await?;
        Ok(())
    }
}

pub struct RemoveOrderingCommandHandler {
    repository: Arc<dyn Repository<Ordering>>,
}

impl RemoveOrderingCommandHandler {
    pub fn new(repository: Arc<dyn Repository<Ordering>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for RemoveOrderingCommandHandler {
    type Request = RemoveOrderingCommand;

    async fn handle(&self, command: RemoveOrderingCommand) -> Result<(), OrderError> {
        self.repository.remove(command.id).await?;
        Ok(())
    }
}

pub struct GetOrderingQueryHandler {
    repository: Arc<dyn Repository<Ordering>>,
}

impl GetOrderingQueryHandler {
    pub fn new(repository: Arc<dyn Repository<Ordering>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for GetOrderingQueryHandler {
    type Request = GetOrderingQuery;

    async fn handle(&self, _query: GetOrderingQuery) -> Result<Vec<GetOrderingQueryResult>, OrderError> {
        let values = self.repository.list_all().await?;
        Ok(values
            .into_iter()
            .map(|x| GetOrderingQueryResult {
                ordering_id: x.ordering_id,
                user_id: x.user_id,
                total_price: x.total_price,
                order_date: x.order_date,
            })
            .collect())
    }
}

pub struct GetOrderingByIdQueryHandler {
    repository: Arc<dyn Repository<Ordering>>,
}

impl GetOrderingByIdQueryHandler {
    pub fn new(repository: Arc<dyn Repository<Ordering>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for GetOrderingByIdQueryHandler {
    type Request = GetOrderingByIdQuery;

    async fn handle(&self, query: GetOrderingByIdQuery) -> Result<GetOrderingByIdQueryResult, OrderError> {
        let values = self
            .repository
            .get_by_id(query.id)
            .await?
            .ok_or_else(|| OrderError::not_found(Ordering::RESOURCE, query.id))?;

        Ok(GetOrderingByIdQueryResult {
            ordering_id: values.ordering_id,
            user_id: values.user_id,
            total_price: values.total_price,
            order_date: values.order_date,
        })
    }
}
