use campus_domain::role::AccountRole;
use campus_domain::status::{ApplicationStatus, OrderStatus, RequirementStatus};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// One-time verification codes are this many digits long.
pub const CODE_LEN: usize = 6;

/// A code older than this is rejected even when the digits match.
pub const CODE_TTL_MINUTES: i64 = 15;

pub const MIN_SCORE: i16 = 1;
pub const MAX_SCORE: i16 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub career_id: Option<Uuid>,
    pub active: bool,
    pub average_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single issued verification code. Rows are append-only; issuing a new
/// code does not touch earlier rows for the same email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationRecord {
    pub id: Uuid,
    pub email: String,
    pub code_hash: String,
    pub issued_at: DateTime<Utc>,
}

impl VerificationRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.issued_at >= Duration::minutes(CODE_TTL_MINUTES)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceListing {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub service_id: Uuid,
    pub client_id: Uuid,
    pub amount: f64,
    pub status: OrderStatus,
    pub archived: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Requirement {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub career_id: Uuid,
    pub title: String,
    pub description: String,
    pub budget: Option<f64>,
    pub status: RequirementStatus,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a requirement owner may edit while the requirement is open.
/// `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequirementPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub career_id: Option<Uuid>,
}

impl RequirementPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.budget.is_none()
            && self.career_id.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Application {
    pub id: Uuid,
    pub requirement_id: Uuid,
    pub applicant_id: Uuid,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub order_id: Uuid,
    pub service_id: Uuid,
    pub rater_id: Uuid,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Why a presented verification code was not accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeRejectReason {
    Incorrect,
    Expired,
    NoneFound,
}

impl CodeRejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incorrect => "incorrect",
            Self::Expired => "expired",
            Self::NoneFound => "none_found",
        }
    }
}

/// What a verification code is being issued for. Picks the mail template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodePurpose {
    Login,
    Registration,
}

impl CodePurpose {
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Login => "Your sign-in code",
            Self::Registration => "Your registration code",
        }
    }

    // The templates stay digit-free so the code is the only numeric content
    // of the message.
    pub fn body(&self, code: &str) -> String {
        match self {
            Self::Login => format!(
                "Use this code to finish signing in: {code}\n\nIt expires in fifteen minutes. If you did not request it, ignore this message."
            ),
            Self::Registration => format!(
                "Use this code to finish creating your account: {code}\n\nIt expires in fifteen minutes. If you did not request it, ignore this message."
            ),
        }
    }
}
