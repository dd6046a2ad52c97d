//! SeaORM-backed implementations of the domain ports.

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use campus_domain::role::AccountRole;
use campus_domain::status::{ApplicationStatus, OrderStatus, RequirementStatus};
use campus_market_schema::{
    accounts, applications, orders, requirements, reviews, service_listings, verification_codes,
};

use crate::domain::repository::{
    AccountRepository, ListingRepository, OrderRepository, RequirementRepository, ReviewRepository,
    VerificationRepository,
};
use crate::domain::types::{
    Account, Application, Order, Requirement, RequirementPatch, Review, ServiceListing,
    VerificationRecord,
};
use crate::error::MarketError;

// ── Account repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, MarketError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, MarketError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        model.map(account_from_model).transpose()
    }

    async fn create(&self, account: &Account) -> Result<(), MarketError> {
        accounts::ActiveModel {
            id: Set(account.id),
            email: Set(account.email.clone()),
            name: Set(account.name.clone()),
            password_hash: Set(account.password_hash.clone()),
            role: Set(account.role.as_u8() as i16),
            career_id: Set(account.career_id),
            active: Set(account.active),
            average_rating: Set(account.average_rating),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create account")?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        career_id: Option<Uuid>,
    ) -> Result<(), MarketError> {
        let mut am = accounts::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(new_name) = name {
            am.name = Set(new_name.to_owned());
        }
        if let Some(new_career) = career_id {
            am.career_id = Set(Some(new_career));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db)
            .await
            .context("update account profile")?;
        Ok(())
    }

    async fn update_credential(&self, id: Uuid, password_hash: &str) -> Result<(), MarketError> {
        accounts::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update account credential")?;
        Ok(())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<(), MarketError> {
        accounts::ActiveModel {
            id: Set(id),
            active: Set(active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set account active flag")?;
        Ok(())
    }

    async fn set_average_rating(&self, id: Uuid, rating: Option<f64>) -> Result<(), MarketError> {
        accounts::ActiveModel {
            id: Set(id),
            average_rating: Set(rating),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set account average rating")?;
        Ok(())
    }

    async fn list_active_students_by_career(
        &self,
        career_id: Uuid,
    ) -> Result<Vec<Account>, MarketError> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::CareerId.eq(career_id))
            .filter(accounts::Column::Role.eq(AccountRole::Student.as_u8() as i16))
            .filter(accounts::Column::Active.eq(true))
            .all(&self.db)
            .await
            .context("list active students by career")?;
        models.into_iter().map(account_from_model).collect()
    }
}

fn account_from_model(model: accounts::Model) -> Result<Account, MarketError> {
    let role = AccountRole::from_u8(model.role as u8).ok_or_else(|| {
        anyhow::anyhow!("unknown role value {} for account {}", model.role, model.id)
    })?;
    Ok(Account {
        id: model.id,
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        role,
        career_id: model.career_id,
        active: model.active,
        average_rating: model.average_rating,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Verification code repository ────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerificationRepository {
    pub db: DatabaseConnection,
}

impl VerificationRepository for DbVerificationRepository {
    async fn create(&self, record: &VerificationRecord) -> Result<(), MarketError> {
        verification_codes::ActiveModel {
            id: Set(record.id),
            email: Set(record.email.clone()),
            code_hash: Set(record.code_hash.clone()),
            issued_at: Set(record.issued_at),
        }
        .insert(&self.db)
        .await
        .context("create verification code")?;
        Ok(())
    }

    async fn find_latest(&self, email: &str) -> Result<Option<VerificationRecord>, MarketError> {
        // v7 ids break ties between records issued in the same instant.
        let model = verification_codes::Entity::find()
            .filter(verification_codes::Column::Email.eq(email))
            .order_by_desc(verification_codes::Column::IssuedAt)
            .order_by_desc(verification_codes::Column::Id)
            .one(&self.db)
            .await
            .context("find latest verification code")?;
        Ok(model.map(verification_record_from_model))
    }

    async fn delete(&self, id: Uuid) -> Result<(), MarketError> {
        verification_codes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete verification code")?;
        Ok(())
    }
}

fn verification_record_from_model(model: verification_codes::Model) -> VerificationRecord {
    VerificationRecord {
        id: model.id,
        email: model.email,
        code_hash: model.code_hash,
        issued_at: model.issued_at,
    }
}

// ── Service listing repository ──────────────────────────────────────────────

#[derive(Clone)]
pub struct DbListingRepository {
    pub db: DatabaseConnection,
}

impl ListingRepository for DbListingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceListing>, MarketError> {
        let model = service_listings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find listing by id")?;
        Ok(model.map(listing_from_model))
    }

    async fn create(&self, listing: &ServiceListing) -> Result<(), MarketError> {
        service_listings::ActiveModel {
            id: Set(listing.id),
            owner_id: Set(listing.owner_id),
            title: Set(listing.title.clone()),
            description: Set(listing.description.clone()),
            price: Set(listing.price),
            created_at: Set(listing.created_at),
        }
        .insert(&self.db)
        .await
        .context("create listing")?;
        Ok(())
    }
}

fn listing_from_model(model: service_listings::Model) -> ServiceListing {
    ServiceListing {
        id: model.id,
        owner_id: model.owner_id,
        title: model.title,
        description: model.description,
        price: model.price,
        created_at: model.created_at,
    }
}

// ── Order repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, MarketError> {
        let model = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order by id")?;
        model.map(order_from_model).transpose()
    }

    async fn find_active(
        &self,
        service_id: Uuid,
        client_id: Uuid,
    ) -> Result<Option<Order>, MarketError> {
        // No archived filter: an archived order still holds the active slot.
        let statuses: Vec<i16> = OrderStatus::ACTIVE
            .iter()
            .map(|s| s.as_u8() as i16)
            .collect();
        let model = orders::Entity::find()
            .filter(orders::Column::ServiceId.eq(service_id))
            .filter(orders::Column::ClientId.eq(client_id))
            .filter(orders::Column::Status.is_in(statuses))
            .one(&self.db)
            .await
            .context("find active order")?;
        model.map(order_from_model).transpose()
    }

    async fn create(&self, order: &Order) -> Result<(), MarketError> {
        orders::ActiveModel {
            id: Set(order.id),
            service_id: Set(order.service_id),
            client_id: Set(order.client_id),
            amount: Set(order.amount),
            status: Set(order.status.as_u8() as i16),
            archived: Set(order.archived),
            notes: Set(order.notes.clone()),
            created_at: Set(order.created_at),
            updated_at: Set(order.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create order")?;
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: OrderStatus) -> Result<(), MarketError> {
        orders::ActiveModel {
            id: Set(id),
            status: Set(status.as_u8() as i16),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set order status")?;
        Ok(())
    }

    async fn set_archived(&self, id: Uuid, archived: bool) -> Result<(), MarketError> {
        orders::ActiveModel {
            id: Set(id),
            archived: Set(archived),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set order archived flag")?;
        Ok(())
    }
}

fn order_from_model(model: orders::Model) -> Result<Order, MarketError> {
    let status = OrderStatus::from_u8(model.status as u8).ok_or_else(|| {
        anyhow::anyhow!("unknown status value {} for order {}", model.status, model.id)
    })?;
    Ok(Order {
        id: model.id,
        service_id: model.service_id,
        client_id: model.client_id,
        amount: model.amount,
        status,
        archived: model.archived,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Requirement repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRequirementRepository {
    pub db: DatabaseConnection,
}

impl RequirementRepository for DbRequirementRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Requirement>, MarketError> {
        let model = requirements::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find requirement by id")?;
        model.map(requirement_from_model).transpose()
    }

    async fn create(&self, requirement: &Requirement) -> Result<(), MarketError> {
        requirements::ActiveModel {
            id: Set(requirement.id),
            owner_id: Set(requirement.owner_id),
            career_id: Set(requirement.career_id),
            title: Set(requirement.title.clone()),
            description: Set(requirement.description.clone()),
            budget: Set(requirement.budget),
            status: Set(requirement.status.as_u8() as i16),
            archived: Set(requirement.archived),
            created_at: Set(requirement.created_at),
            updated_at: Set(requirement.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create requirement")?;
        Ok(())
    }

    async fn update_fields(&self, id: Uuid, patch: &RequirementPatch) -> Result<(), MarketError> {
        let mut am = requirements::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(title) = &patch.title {
            am.title = Set(title.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(description.clone());
        }
        if let Some(budget) = patch.budget {
            am.budget = Set(Some(budget));
        }
        if let Some(career_id) = patch.career_id {
            am.career_id = Set(career_id);
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db)
            .await
            .context("update requirement fields")?;
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: RequirementStatus) -> Result<(), MarketError> {
        requirements::ActiveModel {
            id: Set(id),
            status: Set(status.as_u8() as i16),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set requirement status")?;
        Ok(())
    }

    async fn set_archived(&self, id: Uuid, archived: bool) -> Result<(), MarketError> {
        requirements::ActiveModel {
            id: Set(id),
            archived: Set(archived),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set requirement archived flag")?;
        Ok(())
    }

    async fn find_application(
        &self,
        requirement_id: Uuid,
        applicant_id: Uuid,
    ) -> Result<Option<Application>, MarketError> {
        let model = applications::Entity::find()
            .filter(applications::Column::RequirementId.eq(requirement_id))
            .filter(applications::Column::ApplicantId.eq(applicant_id))
            .one(&self.db)
            .await
            .context("find application by requirement and applicant")?;
        model.map(application_from_model).transpose()
    }

    async fn find_application_by_id(&self, id: Uuid) -> Result<Option<Application>, MarketError> {
        let model = applications::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find application by id")?;
        model.map(application_from_model).transpose()
    }

    async fn create_application(&self, application: &Application) -> Result<(), MarketError> {
        applications::ActiveModel {
            id: Set(application.id),
            requirement_id: Set(application.requirement_id),
            applicant_id: Set(application.applicant_id),
            status: Set(application.status.as_u8() as i16),
            created_at: Set(application.created_at),
        }
        .insert(&self.db)
        .await
        .context("create application")?;
        Ok(())
    }

    async fn close_with_selection(
        &self,
        requirement_id: Uuid,
        application_id: Uuid,
    ) -> Result<(), MarketError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    requirements::ActiveModel {
                        id: Set(requirement_id),
                        status: Set(RequirementStatus::Closed.as_u8() as i16),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;

                    applications::ActiveModel {
                        id: Set(application_id),
                        status: Set(ApplicationStatus::Accepted.as_u8() as i16),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;

                    Ok(())
                })
            })
            .await
            .context("close requirement with selection")?;
        Ok(())
    }
}

fn requirement_from_model(model: requirements::Model) -> Result<Requirement, MarketError> {
    let status = RequirementStatus::from_u8(model.status as u8).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown status value {} for requirement {}",
            model.status,
            model.id
        )
    })?;
    Ok(Requirement {
        id: model.id,
        owner_id: model.owner_id,
        career_id: model.career_id,
        title: model.title,
        description: model.description,
        budget: model.budget,
        status,
        archived: model.archived,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn application_from_model(model: applications::Model) -> Result<Application, MarketError> {
    let status = ApplicationStatus::from_u8(model.status as u8).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown status value {} for application {}",
            model.status,
            model.id
        )
    })?;
    Ok(Application {
        id: model.id,
        requirement_id: model.requirement_id,
        applicant_id: model.applicant_id,
        status,
        created_at: model.created_at,
    })
}

// ── Review repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn find_by_order(&self, order_id: Uuid) -> Result<Option<Review>, MarketError> {
        let model = reviews::Entity::find()
            .filter(reviews::Column::OrderId.eq(order_id))
            .one(&self.db)
            .await
            .context("find review by order")?;
        Ok(model.map(review_from_model))
    }

    async fn create(&self, review: &Review) -> Result<(), MarketError> {
        reviews::ActiveModel {
            id: Set(review.id),
            order_id: Set(review.order_id),
            service_id: Set(review.service_id),
            rater_id: Set(review.rater_id),
            score: Set(review.score),
            comment: Set(review.comment.clone()),
            created_at: Set(review.created_at),
        }
        .insert(&self.db)
        .await
        .context("create review")?;
        Ok(())
    }

    async fn list_scores_by_provider(&self, provider_id: Uuid) -> Result<Vec<i16>, MarketError> {
        // Full walk over the provider's listings and their reviews. The
        // average is always recomputed from the whole set.
        let listing_ids: Vec<Uuid> = service_listings::Entity::find()
            .filter(service_listings::Column::OwnerId.eq(provider_id))
            .all(&self.db)
            .await
            .context("list provider listings")?
            .into_iter()
            .map(|m| m.id)
            .collect();
        if listing_ids.is_empty() {
            return Ok(Vec::new());
        }
        let scores = reviews::Entity::find()
            .filter(reviews::Column::ServiceId.is_in(listing_ids))
            .all(&self.db)
            .await
            .context("list provider review scores")?
            .into_iter()
            .map(|m| m.score)
            .collect();
        Ok(scores)
    }
}

fn review_from_model(model: reviews::Model) -> Review {
    Review {
        id: model.id,
        order_id: model.order_id,
        service_id: model.service_id,
        rater_id: model.rater_id,
        score: model.score,
        comment: model.comment,
        created_at: model.created_at,
    }
}
