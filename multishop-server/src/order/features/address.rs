//! Address commands, queries and their handlers

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Address, AddressDraft};
use crate::order::mediator::{Request, RequestHandler};
use crate::order::repository::{Entity, Repository};
use crate::order::OrderError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressCommand {
    pub user_id: String,
    pub district: String,
    pub city: String,
    pub detail: String,
}

impl Request for CreateAddressCommand {
    type Response = ();
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressCommand {
    pub address_id: i32,
    pub user_id: String,
    pub district: String,
    pub city: String,
    pub detail: String,
}

impl Request for UpdateAddressCommand {
    type Response = ();
}

#[derive(Debug, Clone)]
pub struct RemoveAddressCommand {
    pub id: i32,
}

impl Request for RemoveAddressCommand {
    type Response = ();
}

#[derive(Debug, Clone)]
pub struct GetAddressQuery;

impl Request for GetAddressQuery {
    type Response = Vec<GetAddressQueryResult>;
}

#[derive(Debug, Clone)]
pub struct GetAddressByIdQuery {
    pub id: i32,
}

impl Request for GetAddressByIdQuery {
    type Response = GetAddressByIdQueryResult;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAddressQueryResult {
    pub address_id: i32,
    pub user_id: String,
    pub district: String,
    pub city: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAddressByIdQueryResult {
    pub address_id: i32,
    pub user_id: String,
    pub district: String,
    pub city: String,
    pub detail: String,
}

pub struct CreateAddressCommandHandler {
    repository: Arc<dyn Repository<Address>>,
}

impl CreateAddressCommandHandler {
    pub fn new(repository: Arc<dyn Repository<Address>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for CreateAddressCommandHandler {
    type Request = CreateAddressCommand;

    async fn handle(&self, command: CreateAddressCommand) -> Result<(), OrderError> {
        self.repository
            .add(AddressDraft {
                user_id: command.user_id,
                district: command.district,
                city: command.city,
                detail: command.detail,
            })
            .await?;
        Ok(())
    }
}

pub struct UpdateAddressCommandHandler {
    repository: Arc<dyn Repository<Address>>,
}

impl UpdateAddressCommandHandler {
    pub fn new(repository: Arc<dyn Repository<Address>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for UpdateAddressCommandHandler {
    type Request = UpdateAddressCommand;

    async fn handle(&self, command: UpdateAddressCommand) -> Result<(), OrderError> {
        self.repository
            .update(Address {
                address_id: command.address_id,
                user_id: command.user_id,
                district: command.district,
                city: command.city,
                detail: command.detail,
            })
            .await?;
        Ok(())
    }
}

pub struct RemoveAddressCommandHandler {
    repository: Arc<dyn Repository<Address>>,
}

impl RemoveAddressCommandHandler {
    pub fn new(repository: Arc<dyn Repository<Address>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for RemoveAddressCommandHandler {
    type Request = RemoveAddressCommand;

    async fn handle(&self, command: RemoveAddressCommand) -> Result<(), OrderError> {
        self.repository.remove(command.id).await?;
        Ok(())
    }
}

pub struct GetAddressQueryHandler {
    repository: Arc<dyn Repository<Address>>,
}

impl GetAddressQueryHandler {
    pub fn new(repository: Arc<dyn Repository<Address>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for GetAddressQueryHandler {
    type Request = GetAddressQuery;

    async fn handle(&self, _query: GetAddressQuery) -> Result<Vec<GetAddressQueryResult>, OrderError> {
        let values = self.repository.list_all().await?;
        Ok(values
            .into_iter()
            .map(|x| GetAddressQueryResult {
                address_id: x.address_id,
                user_id: x.user_id,
                district: x.district,
                city: x.city,
                detail: x.detail,
            })
            .collect())
    }
}

pub struct GetAddressByIdQueryHandler {
    repository: Arc<dyn Repository<Address>>,
}

impl GetAddressByIdQueryHandler {
    pub fn new(repository: Arc<dyn Repository<Address>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler for GetAddressByIdQueryHandler {
    type Request = GetAddressByIdQuery;

    async fn handle(&self, query: GetAddressByIdQuery) -> Result<GetAddressByIdQueryResult, OrderError> {
        let values = self
            .repository
            .get_by_id(query.id)
            .await?
            .ok_or_else(|| OrderError::not_found(Address::RESOURCE, query.id))?;

        Ok(GetAddressByIdQueryResult {
            address_id: values.address_id,
            user_id: values.user_id,
            district: values.district,
            city: values.city,
            detail: values.detail,
        })
    }
}
