//! Reviews on completed orders and the provider rating they feed.

use chrono::Utc;
use uuid::Uuid;

use campus_domain::status::OrderStatus;

use crate::domain::repository::{
    AccountRepository, ListingRepository, OrderRepository, ReviewRepository,
};
use crate::domain::types::{Review, MAX_SCORE, MIN_SCORE};
use crate::error::MarketError;

pub struct CreateReviewInput {
    pub order_id: Uuid,
    pub score: i16,
    pub comment: Option<String>,
}

pub struct CreateReviewUseCase<R, O, L, A> {
    pub reviews: R,
    pub orders: O,
    pub listings: L,
    pub accounts: A,
}

impl<R, O, L, A> CreateReviewUseCase<R, O, L, A>
where
    R: ReviewRepository,
    O: OrderRepository,
    L: ListingRepository,
    A: AccountRepository,
{
    pub async fn execute(
        &self,
        rater_id: Uuid,
        input: CreateReviewInput,
    ) -> Result<Review, MarketError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&input.score) {
            return Err(MarketError::InvalidScore);
        }
        let Some(order) = self.orders.find_by_id(input.order_id).await? else {
            return Err(MarketError::NotFound);
        };
        if order.client_id != rater_id {
            return Err(MarketError::PermissionDenied);
        }
        if order.status != OrderStatus::Completed {
            return Err(MarketError::OrderNotCompleted);
        }
        if self.reviews.find_by_order(order.id).await?.is_some() {
            return Err(MarketError::Conflict);
        }
        let Some(listing) = self.listings.find_by_id(order.service_id).await? else {
            return Err(MarketError::NotFound);
        };
        let review = Review {
            id: Uuid::now_v7(),
            order_id: order.id,
            service_id: order.service_id,
            rater_id,
            score: input.score,
            comment: input.comment,
            created_at: Utc::now(),
        };
        self.reviews.create(&review).await?;
        // The average is recomputed from every stored score so it can never
        // drift from the ledger.
        let scores = self.reviews.list_scores_by_provider(listing.owner_id).await?;
        self.accounts
            .set_average_rating(listing.owner_id, mean(&scores))
            .await?;
        Ok(review)
    }
}

fn mean(scores: &[i16]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: i64 = scores.iter().map(|s| i64::from(*s)).sum();
    Some(sum as f64 / scores.len() as f64)
}
