//! Requirements posted by clients and the applications students make on them.

use chrono::Utc;
use uuid::Uuid;

use campus_domain::role::AccountRole;
use campus_domain::status::{ApplicationStatus, RequirementStatus};

use crate::domain::repository::{AccountRepository, Mailer, RequirementRepository};
use crate::domain::types::{Application, Requirement, RequirementPatch};
use crate::error::MarketError;

/// Looks a requirement up, treating soft-deleted rows as absent.
async fn find_visible<R>(repo: &R, id: Uuid) -> Result<Requirement, MarketError>
where
    R: RequirementRepository,
{
    match repo.find_by_id(id).await? {
        Some(requirement) if requirement.status != RequirementStatus::Deleted => Ok(requirement),
        _ => Err(MarketError::NotFound),
    }
}

pub struct CreateRequirementInput {
    pub title: String,
    pub description: String,
    pub budget: Option<f64>,
    pub career_id: Uuid,
}

pub struct CreateRequirementUseCase<R> {
    pub requirements: R,
}

impl<R> CreateRequirementUseCase<R>
where
    R: RequirementRepository,
{
    pub async fn execute(
        &self,
        owner_id: Uuid,
        input: CreateRequirementInput,
    ) -> Result<Requirement, MarketError> {
        if input.title.trim().is_empty() {
            return Err(MarketError::MissingData);
        }
        let now = Utc::now();
        let requirement = Requirement {
            id: Uuid::now_v7(),
            owner_id,
            career_id: input.career_id,
            title: input.title,
            description: input.description,
            budget: input.budget,
            status: RequirementStatus::Open,
            archived: false,
            created_at: now,
            updated_at: now,
        };
        self.requirements.create(&requirement).await?;
        Ok(requirement)
    }
}

/// Mails every active student of the requirement's career about the new
/// posting. Runs detached from the creating request; failures are logged and
/// never surface to the poster, and one refused mailbox does not stop the
/// rest of the fan-out.
pub async fn broadcast_requirement_posted<A, M>(accounts: A, mailer: M, requirement: Requirement)
where
    A: AccountRepository,
    M: Mailer,
{
    let students = match accounts
        .list_active_students_by_career(requirement.career_id)
        .await
    {
        Ok(students) => students,
        Err(e) => {
            tracing::warn!(requirement_id = %requirement.id, error = %e, "could not load students for broadcast");
            return;
        }
    };
    let subject = format!("New requirement: {}", requirement.title);
    let body = format!(
        "A new requirement in your career is open for applications.\n\n{}\n\n{}",
        requirement.title, requirement.description
    );
    for student in students {
        if let Err(e) = mailer.send(&student.email, &subject, &body).await {
            tracing::warn!(requirement_id = %requirement.id, to = %student.email, error = %e, "broadcast mail failed");
        }
    }
}

pub struct GetRequirementUseCase<R> {
    pub requirements: R,
}

impl<R> GetRequirementUseCase<R>
where
    R: RequirementRepository,
{
    pub async fn execute(&self, id: Uuid) -> Result<Requirement, MarketError> {
        find_visible(&self.requirements, id).await
    }
}

pub struct ApplyUseCase<R, A> {
    pub requirements: R,
    pub accounts: A,
}

impl<R, A> ApplyUseCase<R, A>
where
    R: RequirementRepository,
    A: AccountRepository,
{
    pub async fn execute(
        &self,
        applicant_id: Uuid,
        requirement_id: Uuid,
    ) -> Result<Application, MarketError> {
        let requirement = find_visible(&self.requirements, requirement_id).await?;
        if requirement.status != RequirementStatus::Open {
            return Err(MarketError::RequirementNotOpen);
        }
        if requirement.owner_id == applicant_id {
            return Err(MarketError::PermissionDenied);
        }
        let Some(applicant) = self.accounts.find_by_id(applicant_id).await? else {
            return Err(MarketError::NotFound);
        };
        if applicant.role != AccountRole::Student {
            return Err(MarketError::PermissionDenied);
        }
        // Career match is eligibility, not preference. A student outside the
        // requirement's career never sees an accept path.
        if applicant.career_id != Some(requirement.career_id) {
            return Err(MarketError::PermissionDenied);
        }
        if self
            .requirements
            .find_application(requirement_id, applicant_id)
            .await?
            .is_some()
        {
            return Err(MarketError::Conflict);
        }
        let application = Application {
            id: Uuid::now_v7(),
            requirement_id,
            applicant_id,
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        };
        self.requirements.create_application(&application).await?;
        Ok(application)
    }
}

/// What the selection produced, carried to the notification mail.
#[derive(Clone, Debug)]
pub struct SelectionOutcome {
    pub requirement_id: Uuid,
    pub requirement_title: String,
    pub applicant_id: Uuid,
}

pub struct SelectApplicantUseCase<R> {
    pub requirements: R,
}

impl<R> SelectApplicantUseCase<R>
where
    R: RequirementRepository,
{
    pub async fn execute(
        &self,
        requester_id: Uuid,
        requirement_id: Uuid,
        application_id: Uuid,
    ) -> Result<SelectionOutcome, MarketError> {
        let requirement = find_visible(&self.requirements, requirement_id).await?;
        if requirement.owner_id != requester_id {
            return Err(MarketError::PermissionDenied);
        }
        if requirement.status != RequirementStatus::Open {
            return Err(MarketError::RequirementNotOpen);
        }
        let Some(application) = self
            .requirements
            .find_application_by_id(application_id)
            .await?
        else {
            return Err(MarketError::NotFound);
        };
        if application.requirement_id != requirement_id {
            return Err(MarketError::NotFound);
        }
        // The requirement closes and the application is accepted together or
        // not at all.
        self.requirements
            .close_with_selection(requirement_id, application_id)
            .await?;
        Ok(SelectionOutcome {
            requirement_id,
            requirement_title: requirement.title,
            applicant_id: application.applicant_id,
        })
    }
}

/// Tells the selected student they won the requirement. Detached from the
/// selecting request like the posting broadcast.
pub async fn notify_applicant_selected<A, M>(accounts: A, mailer: M, outcome: SelectionOutcome)
where
    A: AccountRepository,
    M: Mailer,
{
    let applicant = match accounts.find_by_id(outcome.applicant_id).await {
        Ok(Some(applicant)) => applicant,
        Ok(None) => {
            tracing::warn!(applicant_id = %outcome.applicant_id, "selected applicant vanished before notification");
            return;
        }
        Err(e) => {
            tracing::warn!(applicant_id = %outcome.applicant_id, error = %e, "could not load selected applicant");
            return;
        }
    };
    let subject = format!("You were selected: {}", outcome.requirement_title);
    let body = format!(
        "Your application for \"{}\" was selected. The requirement is now closed to other applicants.",
        outcome.requirement_title
    );
    if let Err(e) = mailer.send(&applicant.email, &subject, &body).await {
        tracing::warn!(requirement_id = %outcome.requirement_id, to = %applicant.email, error = %e, "selection mail failed");
    }
}

pub struct UpdateRequirementUseCase<R> {
    pub requirements: R,
}

impl<R> UpdateRequirementUseCase<R>
where
    R: RequirementRepository,
{
    pub async fn execute(
        &self,
        requester_id: Uuid,
        id: Uuid,
        patch: RequirementPatch,
    ) -> Result<(), MarketError> {
        if patch.is_empty() {
            return Err(MarketError::MissingData);
        }
        let requirement = find_visible(&self.requirements, id).await?;
        if requirement.owner_id != requester_id {
            return Err(MarketError::PermissionDenied);
        }
        if requirement.status != RequirementStatus::Open {
            return Err(MarketError::RequirementNotOpen);
        }
        self.requirements.update_fields(id, &patch).await
    }
}

/// Archiving stays available after close so owners can tidy finished work.
pub struct ArchiveRequirementUseCase<R> {
    pub requirements: R,
}

impl<R> ArchiveRequirementUseCase<R>
where
    R: RequirementRepository,
{
    pub async fn execute(
        &self,
        requester_id: Uuid,
        id: Uuid,
        archived: bool,
    ) -> Result<(), MarketError> {
        let requirement = find_visible(&self.requirements, id).await?;
        if requirement.owner_id != requester_id {
            return Err(MarketError::PermissionDenied);
        }
        self.requirements.set_archived(id, archived).await
    }
}

pub struct DeleteRequirementUseCase<R> {
    pub requirements: R,
}

impl<R> DeleteRequirementUseCase<R>
where
    R: RequirementRepository,
{
    pub async fn execute(&self, requester_id: Uuid, id: Uuid) -> Result<(), MarketError> {
        let requirement = find_visible(&self.requirements, id).await?;
        if requirement.owner_id != requester_id {
            return Err(MarketError::PermissionDenied);
        }
        // A closed requirement carries an accepted application; it stays on
        // the record.
        if requirement.status != RequirementStatus::Open {
            return Err(MarketError::RequirementNotOpen);
        }
        self.requirements
            .set_status(id, RequirementStatus::Deleted)
            .await
    }
}
