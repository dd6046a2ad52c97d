use axum::{extract::Path, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_domain::role::AccountRole;

use crate::domain::types::Account;
use crate::error::MarketError;
use crate::handlers::extract::Caller;
use crate::state::AppState;
use crate::usecase::account::{
    DeactivateAccountUseCase, GetAccountUseCase, UpdateAccountInput, UpdateAccountUseCase,
};

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: AccountRole,
    pub career_id: Option<Uuid>,
    pub active: bool,
    pub average_rating: Option<f64>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email,
            name: account.name,
            role: account.role,
            career_id: account.career_id,
            active: account.active,
            average_rating: account.average_rating,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

// ── GET /accounts/me ─────────────────────────────────────────────────────────

pub async fn get_me(
    caller: Caller,
    State(state): State<AppState>,
) -> Result<Json<AccountResponse>, MarketError> {
    let usecase = GetAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase.execute(caller.account_id).await?;
    Ok(Json(account.into()))
}

// ── PATCH /accounts/me ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub career_id: Option<Uuid>,
}

pub async fn update_me(
    caller: Caller,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<StatusCode, MarketError> {
    let usecase = UpdateAccountUseCase {
        accounts: state.account_repo(),
    };
    usecase
        .execute(
            caller.account_id,
            UpdateAccountInput {
                name: body.name,
                career_id: body.career_id,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /accounts/{id} ────────────────────────────────────────────────────

pub async fn deactivate(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, MarketError> {
    if caller.role != AccountRole::Admin {
        return Err(MarketError::PermissionDenied);
    }
    let usecase = DeactivateAccountUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
