use axum::{extract::Path, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_domain::status::{ApplicationStatus, RequirementStatus};

use crate::domain::types::{Application, Requirement, RequirementPatch};
use crate::error::MarketError;
use crate::handlers::extract::Caller;
use crate::state::AppState;
use crate::usecase::requirement::{
    broadcast_requirement_posted, notify_applicant_selected, ApplyUseCase,
    ArchiveRequirementUseCase, CreateRequirementInput, CreateRequirementUseCase,
    DeleteRequirementUseCase, GetRequirementUseCase, SelectApplicantUseCase,
    UpdateRequirementUseCase,
};

#[derive(Serialize)]
pub struct RequirementResponse {
    pub id: String,
    pub owner_id: String,
    pub career_id: String,
    pub title: String,
    pub description: String,
    pub budget: Option<f64>,
    pub status: RequirementStatus,
    pub archived: bool,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Requirement> for RequirementResponse {
    fn from(requirement: Requirement) -> Self {
        Self {
            id: requirement.id.to_string(),
            owner_id: requirement.owner_id.to_string(),
            career_id: requirement.career_id.to_string(),
            title: requirement.title,
            description: requirement.description,
            budget: requirement.budget,
            status: requirement.status,
            archived: requirement.archived,
            created_at: requirement.created_at,
            updated_at: requirement.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub requirement_id: String,
    pub applicant_id: String,
    pub status: ApplicationStatus,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id.to_string(),
            requirement_id: application.requirement_id.to_string(),
            applicant_id: application.applicant_id.to_string(),
            status: application.status,
            created_at: application.created_at,
        }
    }
}

// ── POST /requirements ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRequirementRequest {
    pub title: String,
    pub description: String,
    pub budget: Option<f64>,
    pub career_id: Uuid,
}

pub async fn create_requirement(
    caller: Caller,
    State(state): State<AppState>,
    Json(body): Json<CreateRequirementRequest>,
) -> Result<(StatusCode, Json<RequirementResponse>), MarketError> {
    let usecase = CreateRequirementUseCase {
        requirements: state.requirement_repo(),
    };
    let requirement = usecase
        .execute(
            caller.account_id,
            CreateRequirementInput {
                title: body.title,
                description: body.description,
                budget: body.budget,
                career_id: body.career_id,
            },
        )
        .await?;
    // Fan-out runs detached; the response does not wait for the mails.
    tokio::spawn(broadcast_requirement_posted(
        state.account_repo(),
        state.mailer(),
        requirement.clone(),
    ));
    Ok((StatusCode::CREATED, Json(requirement.into())))
}

// ── GET /requirements/{id} ───────────────────────────────────────────────────

pub async fn get_requirement(
    _caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RequirementResponse>, MarketError> {
    let usecase = GetRequirementUseCase {
        requirements: state.requirement_repo(),
    };
    let requirement = usecase.execute(id).await?;
    Ok(Json(requirement.into()))
}

// ── POST /requirements/{id}/applications ─────────────────────────────────────

pub async fn apply(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApplicationResponse>), MarketError> {
    let usecase = ApplyUseCase {
        requirements: state.requirement_repo(),
        accounts: state.account_repo(),
    };
    let application = usecase.execute(caller.account_id, id).await?;
    Ok((StatusCode::CREATED, Json(application.into())))
}

// ── POST /requirements/{id}/selection ────────────────────────────────────────

#[derive(Deserialize)]
pub struct SelectApplicantRequest {
    pub application_id: Uuid,
}

pub async fn select_applicant(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectApplicantRequest>,
) -> Result<StatusCode, MarketError> {
    let usecase = SelectApplicantUseCase {
        requirements: state.requirement_repo(),
    };
    let outcome = usecase
        .execute(caller.account_id, id, body.application_id)
        .await?;
    tokio::spawn(notify_applicant_selected(
        state.account_repo(),
        state.mailer(),
        outcome,
    ));
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /requirements/{id} ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRequirementRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub career_id: Option<Uuid>,
}

pub async fn update_requirement(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateRequirementRequest>,
) -> Result<StatusCode, MarketError> {
    let usecase = UpdateRequirementUseCase {
        requirements: state.requirement_repo(),
    };
    usecase
        .execute(
            caller.account_id,
            id,
            RequirementPatch {
                title: body.title,
                description: body.description,
                budget: body.budget,
                career_id: body.career_id,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /requirements/{id}/archived ────────────────────────────────────────

#[derive(Deserialize)]
pub struct ArchiveRequirementRequest {
    pub archived: bool,
}

pub async fn archive_requirement(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ArchiveRequirementRequest>,
) -> Result<StatusCode, MarketError> {
    let usecase = ArchiveRequirementUseCase {
        requirements: state.requirement_repo(),
    };
    usecase
        .execute(caller.account_id, id, body.archived)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /requirements/{id} ────────────────────────────────────────────────

pub async fn delete_requirement(
    caller: Caller,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, MarketError> {
    let usecase = DeleteRequirementUseCase {
        requirements: state.requirement_repo(),
    };
    usecase.execute(caller.account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
