//! Order lifecycle between a client and a service listing.

use chrono::Utc;
use uuid::Uuid;

use campus_domain::status::OrderStatus;

use crate::domain::repository::{ListingRepository, OrderRepository};
use crate::domain::types::Order;
use crate::error::MarketError;

pub struct CreateOrderInput {
    pub service_id: Uuid,
    pub client_id: Uuid,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub struct CreateOrderOutcome {
    pub order: Order,
    /// False when an existing non-terminal order was returned instead.
    pub created: bool,
}

pub struct CreateOrderUseCase<O, L> {
    pub orders: O,
    pub listings: L,
}

impl<O, L> CreateOrderUseCase<O, L>
where
    O: OrderRepository,
    L: ListingRepository,
{
    pub async fn execute(
        &self,
        requester_id: Uuid,
        input: CreateOrderInput,
    ) -> Result<CreateOrderOutcome, MarketError> {
        let Some(listing) = self.listings.find_by_id(input.service_id).await? else {
            return Err(MarketError::NotFound);
        };
        // The provider may open an order on a client's behalf; anyone else
        // may only order for themselves.
        if requester_id != listing.owner_id && requester_id != input.client_id {
            return Err(MarketError::PermissionDenied);
        }
        // Contacting the same service twice resumes the running engagement
        // rather than opening a second one. Archived orders count too;
        // archiving hides an order, it does not end it.
        if let Some(existing) = self
            .orders
            .find_active(input.service_id, input.client_id)
            .await?
        {
            return Ok(CreateOrderOutcome {
                order: existing,
                created: false,
            });
        }
        let now = Utc::now();
        let order = Order {
            id: Uuid::now_v7(),
            service_id: input.service_id,
            client_id: input.client_id,
            amount: listing.price,
            status: OrderStatus::Pending,
            archived: false,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        self.orders.create(&order).await?;
        Ok(CreateOrderOutcome {
            order,
            created: true,
        })
    }
}

pub struct GetOrderUseCase<O, L> {
    pub orders: O,
    pub listings: L,
}

impl<O, L> GetOrderUseCase<O, L>
where
    O: OrderRepository,
    L: ListingRepository,
{
    pub async fn execute(&self, requester_id: Uuid, id: Uuid) -> Result<Order, MarketError> {
        let Some(order) = self.orders.find_by_id(id).await? else {
            return Err(MarketError::NotFound);
        };
        let Some(listing) = self.listings.find_by_id(order.service_id).await? else {
            return Err(MarketError::NotFound);
        };
        if requester_id != order.client_id && requester_id != listing.owner_id {
            return Err(MarketError::PermissionDenied);
        }
        Ok(order)
    }
}

/// Moves an order to any enumerated status. Only the provider drives the
/// lifecycle; the ladder itself is not policed, a provider may jump straight
/// from pending to completed.
pub struct TransitionOrderUseCase<O, L> {
    pub orders: O,
    pub listings: L,
}

impl<O, L> TransitionOrderUseCase<O, L>
where
    O: OrderRepository,
    L: ListingRepository,
{
    pub async fn execute(
        &self,
        requester_id: Uuid,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), MarketError> {
        let Some(order) = self.orders.find_by_id(id).await? else {
            return Err(MarketError::NotFound);
        };
        let Some(listing) = self.listings.find_by_id(order.service_id).await? else {
            return Err(MarketError::NotFound);
        };
        if requester_id != listing.owner_id {
            return Err(MarketError::PermissionDenied);
        }
        self.orders.set_status(id, status).await
    }
}

/// Either party may tuck an order away from (or back into) their lists.
pub struct ArchiveOrderUseCase<O, L> {
    pub orders: O,
    pub listings: L,
}

impl<O, L> ArchiveOrderUseCase<O, L>
where
    O: OrderRepository,
    L: ListingRepository,
{
    pub async fn execute(
        &self,
        requester_id: Uuid,
        id: Uuid,
        archived: bool,
    ) -> Result<(), MarketError> {
        let Some(order) = self.orders.find_by_id(id).await? else {
            return Err(MarketError::NotFound);
        };
        let Some(listing) = self.listings.find_by_id(order.service_id).await? else {
            return Err(MarketError::NotFound);
        };
        if requester_id != order.client_id && requester_id != listing.owner_id {
            return Err(MarketError::PermissionDenied);
        }
        self.orders.set_archived(id, archived).await
    }
}
