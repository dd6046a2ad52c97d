use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbAccountRepository, DbListingRepository, DbOrderRepository, DbRequirementRepository,
    DbReviewRepository, DbVerificationRepository,
};
use crate::infra::email::RelayMailer;
use crate::usecase::auth::AuthPolicy;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: RelayMailer,
    pub jwt_secret: String,
    pub policy: AuthPolicy,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn verification_repo(&self) -> DbVerificationRepository {
        DbVerificationRepository {
            db: self.db.clone(),
        }
    }

    pub fn listing_repo(&self) -> DbListingRepository {
        DbListingRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }

    pub fn requirement_repo(&self) -> DbRequirementRepository {
        DbRequirementRepository {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbReviewRepository {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> RelayMailer {
        self.mailer.clone()
    }
}
