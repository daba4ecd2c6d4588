//! Request dispatch
//!
//! Commands and queries are plain structs implementing `Request`. Each has
//! exactly one `RequestHandler`, registered once on a `Mediator` at startup
//! and looked up by the request's type on every `send`.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::OrderError;

/// A command or query with its response type
pub trait Request: Send + 'static {
    type Response: Send + 'static;
}

/// Handles one request type
#[async_trait]
pub trait RequestHandler: Send + Sync + 'static {
    type Request: Request;

    async fn handle(
        &self,
        request: Self::Request,
    ) -> Result<<Self::Request as Request>::Response, OrderError>;
}

type DynHandler<R> = Arc<dyn RequestHandler<Request = R>>;

/// Registry of handlers keyed by request type
#[derive(Default)]
pub struct Mediator {
    handlers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Mediator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for its request type, replacing any previous one.
    pub fn register<H: RequestHandler>(&mut self, handler: H) -> &mut Self {
        let handler: DynHandler<H::Request> = Arc::new(handler);
        self.handlers
            .insert(TypeId::of::<H::Request>(), Box::new(handler));
        self
    }

    pub fn handles<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    /// Dispatch `request` to its handler. Handler errors are returned as-is.
    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response, OrderError> {
        let handler = self
            .handlers
            .get(&TypeId::of::<R>())
            .and_then(|h| h.downcast_ref::<DynHandler<R>>())
            .cloned()
            .ok_or(OrderError::HandlerNotRegistered(type_name::<R>()))?;

        tracing::debug!(request = type_name::<R>(), "dispatching");
        handler.handle(request).await
    }
}
