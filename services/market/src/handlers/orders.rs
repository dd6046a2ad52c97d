use axum::{extract::Path, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_domain::status::OrderStatus;

use crate::domain::types::Order;
use crate::error::MarketError;
use crate::handlers::extract::Caller;
use crate::state::AppState;
use crate::usecase::order::{
    ArchiveOrderUseCase, CreateOrderInput, CreateOrderUseCase, GetOrderUseCase,
    TransitionOrderUseCase,
};

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub service_id: String,
    pub client_id: String,
    pub amount: f64,
    pub status: OrderStatus,
    pub archived: bool,
    pub notes: Option<String>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            service_id: order.service_id.to_string(),
            client_id: order.client_id.to_string(),
            amount: order.amount,
            status: order.status,
            archived: order.archived,
            notes: order.notes,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

// ── POST /orders ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub service_id: Uuid,
    /// Defaults to the caller; providers may fill it to order on a client's
    /// behalf.
    pub client_id: Option<Uuid>,
    pub notes: Option<String>,
}

pub async fn create_order(
    caller: Caller,
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), MarketError> {
    let usecase = CreateOrderUseCase {
        orders: state.order_repo(),
        listings: state.listing_repo(),
    };
    let outcome = usecase
        .execute(
            caller.account_id,
            CreateOrderInput {
                service_id: body.service_id,
                client_id: body.client_id.unwrap_or(caller.account_id),
                notes: body.notes,
            },
        )
        .await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.order.into())))
}

// ── GET /orders/{id} ─────────────────────────────────────────────────────────

pub async fn get_order(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, MarketError> {
    let usecase = GetOrderUseCase {
        orders: state.order_repo(),
        listings: state.listing_repo(),
    };
    let order = usecase.execute(caller.account_id, id).await?;
    Ok(Json(order.into()))
}

// ── PATCH /orders/{id}/status ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TransitionOrderRequest {
    pub status: OrderStatus,
}

pub async fn transition_order(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionOrderRequest>,
) -> Result<StatusCode, MarketError> {
    let usecase = TransitionOrderUseCase {
        orders: state.order_repo(),
        listings: state.listing_repo(),
    };
    usecase.execute(caller.account_id, id, body.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /orders/{id}/archived ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ArchiveOrderRequest {
    pub archived: bool,
}

pub async fn archive_order(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ArchiveOrderRequest>,
) -> Result<StatusCode, MarketError> {
    let usecase = ArchiveOrderUseCase {
        orders: state.order_repo(),
        listings: state.listing_repo(),
    };
    usecase
        .execute(caller.account_id, id, body.archived)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
