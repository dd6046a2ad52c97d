use axum::{extract::Path, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::ServiceListing;
use crate::error::MarketError;
use crate::handlers::extract::Caller;
use crate::state::AppState;
use crate::usecase::listing::{CreateListingInput, CreateListingUseCase, GetListingUseCase};

#[derive(Serialize)]
pub struct ListingResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ServiceListing> for ListingResponse {
    fn from(listing: ServiceListing) -> Self {
        Self {
            id: listing.id.to_string(),
            owner_id: listing.owner_id.to_string(),
            title: listing.title,
            description: listing.description,
            price: listing.price,
            created_at: listing.created_at,
        }
    }
}

// ── POST /services ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub price: f64,
}

pub async fn create_listing(
    caller: Caller,
    State(state): State<AppState>,
    Json(body): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<ListingResponse>), MarketError> {
    let usecase = CreateListingUseCase {
        listings: state.listing_repo(),
    };
    let listing = usecase
        .execute(
            caller.account_id,
            CreateListingInput {
                title: body.title,
                description: body.description,
                price: body.price,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(listing.into())))
}

// ── GET /services/{id} ───────────────────────────────────────────────────────

pub async fn get_listing(
    _caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ListingResponse>, MarketError> {
    let usecase = GetListingUseCase {
        listings: state.listing_repo(),
    };
    let listing = usecase.execute(id).await?;
    Ok(Json(listing.into()))
}
