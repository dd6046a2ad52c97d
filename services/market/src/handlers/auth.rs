use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_domain::role::AccountRole;

use crate::error::MarketError;
use crate::handlers::accounts::AccountResponse;
use crate::state::AppState;
use crate::usecase::auth::{
    CompleteRegistrationUseCase, LoginInput, LoginOutcome, LoginUseCase, RegistrationInput,
    RequestRegistrationCodeUseCase, SessionOutput, Verify2faInput, Verify2faUseCase,
};

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: u64,
    pub account: AccountResponse,
}

impl From<SessionOutput> for SessionResponse {
    fn from(output: SessionOutput) -> Self {
        Self {
            token: output.token,
            expires_at: output.expires_at,
            account: output.account.into(),
        }
    }
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoginResponse {
    /// A one-time code went out by mail; call `POST /auth/verify` next.
    CodeIssued,
    Session(SessionResponse),
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, MarketError> {
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
        codes: state.verification_repo(),
        mailer: state.mailer(),
        policy: state.policy.clone(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let outcome = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(match outcome {
        LoginOutcome::CodeIssued => LoginResponse::CodeIssued,
        LoginOutcome::Session(output) => LoginResponse::Session(output.into()),
    }))
}

// ── POST /auth/verify ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

pub async fn verify_2fa(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), MarketError> {
    let usecase = Verify2faUseCase {
        accounts: state.account_repo(),
        codes: state.verification_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(Verify2faInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(output.into())))
}

// ── POST /auth/registration/code ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegistrationCodeRequest {
    pub email: String,
}

pub async fn request_registration_code(
    State(state): State<AppState>,
    Json(body): Json<RegistrationCodeRequest>,
) -> Result<StatusCode, MarketError> {
    let usecase = RequestRegistrationCodeUseCase {
        accounts: state.account_repo(),
        codes: state.verification_repo(),
        mailer: state.mailer(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::CREATED)
}

// ── POST /auth/registration ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub code: String,
    pub name: String,
    pub password: String,
    pub role: AccountRole,
    pub career_id: Option<Uuid>,
}

pub async fn complete_registration(
    State(state): State<AppState>,
    Json(body): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), MarketError> {
    let usecase = CompleteRegistrationUseCase {
        accounts: state.account_repo(),
        codes: state.verification_repo(),
        policy: state.policy.clone(),
    };
    let account = usecase
        .execute(RegistrationInput {
            email: body.email,
            code: body.code,
            name: body.name,
            password: body.password,
            role: body.role,
            career_id: body.career_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}
