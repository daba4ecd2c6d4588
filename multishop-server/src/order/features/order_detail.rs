//! Order line commands, queries and their handlers

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{OrderDetail, OrderDetailDraft};
use crate::order::mediator::{Request, RequestHandler};
use crate::order::repository::{Entity, Repository};
use crate::order::OrderError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDetailCommand {
    pub product_id: String,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_amount: i32,
    pub product_total_price: Decimal,
    pub ordering_id: i32,
}

impl Request for CreateOrderDetailCommand {
    type Response = ();
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderDetailCommand {
    pub order_detail_id: i32,
    pub product_id: String,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_amount: i32,
    pub product_total_price: Decimal,
    pub ordering_id: i32,
}

impl Request for UpdateOrderDetailCommand {
    type Response = ();
}

/// Removes one order line; its ordering is untouched
#[derive(Debug, Clone)]
pub struct RemoveOrderDetailByIdCommand {
    pub id: i32,
}

impl RemoveOrderDetailByIdCommand {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

impl Request for RemoveOrderDetailByIdCommand {
    type Response = ();
}

#[derive(Debug, Clone)]
pub struct GetOrderDetailQuery;

impl Request for GetOrderDetailQuery {
    type Response = Vec<GetOrderDetailQueryResult>;
}

#[derive(Debug, Clone)]
pub struct GetOrderDetailByIdQuery {
    pub id: i32,
}

impl Request for GetOrderDetailByIdQuery {
    type Response = GetOrderDetailByIdQueryResult;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderDetailQueryResult {
    pub order_detail_id: i32,
    pub product_id: String,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_amount: i32,
    pub product_total_price: Decimal,
    pub ordering_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderDetailByIdQueryResult {
    pub order_detail_id: i32,
    pub product_id: String,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_amount: i32,
    pub product_total_price: Decimal,
    pub ordering_id: i32,
}

pub struct CreateOrderDetailCommandHandler {
    repository: Arc<dyn Repository<OrderDetail>>,
}

impl CreateOrderDetailCommandHandler {
    pub fn new(repository: Arc<dyn Repository<OrderDetail>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for CreateOrderDetailCommandHandler {
    type Request = CreateOrderDetailCommand;

    async fn handle(&self, command: CreateOrderDetailCommand) -> Result<(), OrderError> {
        self.repository
            .add(OrderDetailDraft {
                product_id: command.product_id,
                product_name: command.product_name,
                product_price: command.product_price,
                product_amount: command.product_amount,
                product_total_price: command.product_total_price,
                ordering_id: command.ordering_id,
            })
            .await?;
        Ok(())
    }
}

pub struct UpdateOrderDetailCommandHandler {
    repository: Arc<dyn Repository<OrderDetail>>,
}

impl UpdateOrderDetailCommandHandler {
    pub fn new(repository: Arc<dyn Repository<OrderDetail>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for UpdateOrderDetailCommandHandler {
    type Request = UpdateOrderDetailCommand;

    async fn handle(&self, command: UpdateOrderDetailCommand) -> Result<(), OrderError> {
        self.repository
            .update(OrderDetail {
                order_detail_id: command.order_detail_id,
                product_id: command.product_id,
                product_name: command.product_name,
                product_price: command.product_price,
                product_amount: command.product_amount,
                product_total_price: command.product_total_price,
                ordering_id: command.ordering_id,
            })
            .await?;
        Ok(())
    }
}

pub struct RemoveOrderDetailByIdCommandHandler {
    repository: Arc<dyn Repository<OrderDetail>>,
}

impl RemoveOrderDetailByIdCommandHandler {
    pub fn new(repository: Arc<dyn Repository<OrderDetail>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for RemoveOrderDetailByIdCommandHandler {
    type Request = RemoveOrderDetailByIdCommand;

    async fn handle(&self, command: RemoveOrderDetailByIdCommand) -> Result<(), OrderError> {
        self.repository.remove(command.id).await?;
        Ok(())
    }
}

pub struct GetOrderDetailQueryHandler {
    repository: Arc<dyn Repository<OrderDetail>>,
}

impl GetOrderDetailQueryHandler {
    pub fn new(repository: Arc<dyn Repository<OrderDetail>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for GetOrderDetailQueryHandler {
    type Request = GetOrderDetailQuery;

    async fn handle(
        &self,
        _query: GetOrderDetailQuery,
    ) -> Result<Vec<GetOrderDetailQueryResult>, OrderError> {
        let values = self.repository.list_all().await?;
        Ok(values
            .into_iter()
            .map(|x| GetOrderDetailQueryResult {
                order_detail_id: x.order_detail_id,
                product_id: x.product_id,
                product_name: x.product_name,
                product_price: x.product_price,
                product_amount: x.product_amount,
                product_total_price: x.product_total_price,
                ordering_id: x.ordering_id,
            })
            .collect())
    }
}

pub struct GetOrderDetailByIdQueryHandler {
    repository: Arc<dyn Repository<OrderDetail>>,
}

impl GetOrderDetailByIdQueryHandler {
    pub fn new(repository: Arc<dyn Repository<OrderDetail>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for GetOrderDetailByIdQueryHandler {
    type Request = GetOrderDetailByIdQuery;

    async fn handle(
        &self,
        query: GetOrderDetailByIdQuery,
    ) -> Result<GetOrderDetailByIdQueryResult, OrderError> {
        let values = self
            .repository
            .get_by_id(query.id)
            .await?
            .ok_or_else(|| OrderError::not_found(OrderDetail::RESOURCE, query.id))?;

        Ok(GetOrderDetailByIdQueryResult {
            order_detail_id: values.order_detail_id,
            product_id: values.product_id,
            product_name: values.product_name,
            product_price: values.product_price,
            product_amount: values.product_amount,
            product_total_price: values.product_total_price,
            ordering_id: values.ordering_id,
        })
    }
}
