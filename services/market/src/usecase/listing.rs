use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::ListingRepository;
use crate::domain::types::ServiceListing;
use crate::error::MarketError;

pub struct CreateListingInput {
    pub title: String,
    pub description: String,
    pub price: f64,
}

pub struct CreateListingUseCase<L> {
    pub listings: L,
}

impl<L> CreateListingUseCase<L>
where
    L: ListingRepository,
{
    pub async fn execute(
        &self,
        owner_id: Uuid,
        input: CreateListingInput,
    ) -> Result<ServiceListing, MarketError> {
        if input.title.trim().is_empty() {
            return Err(MarketError::MissingData);
        }
        let listing = ServiceListing {
            id: Uuid::now_v7(),
            owner_id,
            title: input.title,
            description: input.description,
            price: input.price,
            created_at: Utc::now(),
        };
        self.listings.create(&listing).await?;
        Ok(listing)
    }
}

pub struct GetListingUseCase<L> {
    pub listings: L,
}

impl<L> GetListingUseCase<L>
where
    L: ListingRepository,
{
    pub async fn execute(&self, id: Uuid) -> Result<ServiceListing, MarketError> {
        self.listings
            .find_by_id(id)
            .await?
            .ok_or(MarketError::NotFound)
    }
}
