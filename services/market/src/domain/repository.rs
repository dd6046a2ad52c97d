#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{
    Account, Application, Order, Requirement, RequirementPatch, Review, ServiceListing,
    VerificationRecord,
};
use crate::error::MarketError;
use campus_domain::status::{OrderStatus, RequirementStatus};

pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, MarketError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, MarketError>;
    async fn create(&self, account: &Account) -> Result<(), MarketError>;
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        career_id: Option<Uuid>,
    ) -> Result<(), MarketError>;
    async fn update_credential(&self, id: Uuid, password_hash: &str) -> Result<(), MarketError>;
    async fn set_active(&self, id: Uuid, active: bool) -> Result<(), MarketError>;
    async fn set_average_rating(&self, id: Uuid, rating: Option<f64>) -> Result<(), MarketError>;
    async fn list_active_students_by_career(
        &self,
        career_id: Uuid,
    ) -> Result<Vec<Account>, MarketError>;
}

pub trait VerificationRepository: Send + Sync {
    async fn create(&self, record: &VerificationRecord) -> Result<(), MarketError>;
    /// Most recently issued record for the email, if any.
    async fn find_latest(&self, email: &str) -> Result<Option<VerificationRecord>, MarketError>;
    async fn delete(&self, id: Uuid) -> Result<(), MarketError>;
}

pub trait ListingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceListing>, MarketError>;
    async fn create(&self, listing: &ServiceListing) -> Result<(), MarketError>;
}

pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, MarketError>;
    /// The non-terminal order between this client and service, if one exists.
    async fn find_active(
        &self,
        service_id: Uuid,
        client_id: Uuid,
    ) -> Result<Option<Order>, MarketError>;
    async fn create(&self, order: &Order) -> Result<(), MarketError>;
    async fn set_status(&self, id: Uuid, status: OrderStatus) -> Result<(), MarketError>;
    async fn set_archived(&self, id: Uuid, archived: bool) -> Result<(), MarketError>;
}

pub trait RequirementRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Requirement>, MarketError>;
    async fn create(&self, requirement: &Requirement) -> Result<(), MarketError>;
    async fn update_fields(&self, id: Uuid, patch: &RequirementPatch) -> Result<(), MarketError>;
    async fn set_status(&self, id: Uuid, status: RequirementStatus) -> Result<(), MarketError>;
    async fn set_archived(&self, id: Uuid, archived: bool) -> Result<(), MarketError>;
    async fn find_application(
        &self,
        requirement_id: Uuid,
        applicant_id: Uuid,
    ) -> Result<Option<Application>, MarketError>;
    async fn find_application_by_id(&self, id: Uuid) -> Result<Option<Application>, MarketError>;
    async fn create_application(&self, application: &Application) -> Result<(), MarketError>;
    /// Closes the requirement and accepts the application in one transaction.
    async fn close_with_selection(
        &self,
        requirement_id: Uuid,
        application_id: Uuid,
    ) -> Result<(), MarketError>;
}

pub trait ReviewRepository: Send + Sync {
    async fn find_by_order(&self, order_id: Uuid) -> Result<Option<Review>, MarketError>;
    async fn create(&self, review: &Review) -> Result<(), MarketError>;
    /// Every score ever left across the provider's listings.
    async fn list_scores_by_provider(&self, provider_id: Uuid) -> Result<Vec<i16>, MarketError>;
}

pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), anyhow::Error>;
}
