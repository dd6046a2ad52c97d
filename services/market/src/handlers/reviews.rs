use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Review;
use crate::error::MarketError;
use crate::handlers::extract::Caller;
use crate::state::AppState;
use crate::usecase::review::{CreateReviewInput, CreateReviewUseCase};

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub order_id: String,
    pub service_id: String,
    pub rater_id: String,
    pub score: i16,
    pub comment: Option<String>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.to_string(),
            order_id: review.order_id.to_string(),
            service_id: review.service_id.to_string(),
            rater_id: review.rater_id.to_string(),
            score: review.score,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

// ── POST /reviews ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub order_id: Uuid,
    pub score: i16,
    pub comment: Option<String>,
}

pub async fn create_review(
    caller: Caller,
    State(state): State<AppState>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), MarketError> {
    let usecase = CreateReviewUseCase {
        reviews: state.review_repo(),
        orders: state.order_repo(),
        listings: state.listing_repo(),
        accounts: state.account_repo(),
    };
    let review = usecase
        .execute(
            caller.account_id,
            CreateReviewInput {
                order_id: body.order_id,
                score: body.score,
                comment: body.comment,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}
