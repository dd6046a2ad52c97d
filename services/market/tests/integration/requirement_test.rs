use campus_domain::role::AccountRole;
use campus_domain::status::{ApplicationStatus, RequirementStatus};
use campus_market::domain::types::RequirementPatch;
use campus_market::error::MarketError;
use campus_market::usecase::requirement::{
    broadcast_requirement_posted, notify_applicant_selected, ApplyUseCase,
    ArchiveRequirementUseCase, CreateRequirementInput, CreateRequirementUseCase,
    DeleteRequirementUseCase, GetRequirementUseCase, SelectApplicantUseCase, SelectionOutcome,
    UpdateRequirementUseCase,
};
use uuid::Uuid;

use crate::helpers::{
    test_account, test_application, test_requirement, MockAccountRepo, MockMailer,
    MockRequirementRepo,
};

fn student_in(career_id: Uuid) -> campus_market::domain::types::Account {
    let mut account = test_account("student@unicauca.edu.co", AccountRole::Student);
    account.career_id = Some(career_id);
    account
}

// ── Posting ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_post_an_open_requirement() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let career_id = Uuid::now_v7();

    let usecase = CreateRequirementUseCase {
        requirements: MockRequirementRepo::new(vec![], vec![]),
    };

    let requirement = usecase
        .execute(
            owner.id,
            CreateRequirementInput {
                title: "Build a landing page".to_owned(),
                description: "One page, responsive".to_owned(),
                budget: Some(200.0),
                career_id,
            },
        )
        .await
        .unwrap();

    assert_eq!(requirement.status, RequirementStatus::Open);
    assert_eq!(requirement.owner_id, owner.id);
    assert!(!requirement.archived);
}

#[tokio::test]
async fn should_require_a_title() {
    let usecase = CreateRequirementUseCase {
        requirements: MockRequirementRepo::new(vec![], vec![]),
    };

    let result = usecase
        .execute(
            Uuid::now_v7(),
            CreateRequirementInput {
                title: "   ".to_owned(),
                description: "whitespace only".to_owned(),
                budget: None,
                career_id: Uuid::now_v7(),
            },
        )
        .await;

    assert!(
        matches!(result, Err(MarketError::MissingData)),
        "expected MissingData, got {result:?}"
    );
}

// ── Broadcast ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_broadcast_only_to_active_students_of_the_career() {
    let career_id = Uuid::now_v7();
    let other_career = Uuid::now_v7();

    let mut matching = test_account("match@unicauca.edu.co", AccountRole::Student);
    matching.career_id = Some(career_id);
    let mut wrong_career = test_account("wrong@unicauca.edu.co", AccountRole::Student);
    wrong_career.career_id = Some(other_career);
    let mut inactive = test_account("inactive@unicauca.edu.co", AccountRole::Student);
    inactive.career_id = Some(career_id);
    inactive.active = false;
    let mut client = test_account("client@gmail.com", AccountRole::Client);
    client.career_id = Some(career_id);

    let accounts = MockAccountRepo::new(vec![matching, wrong_career, inactive, client]);
    let mailer = MockMailer::new();
    let requirement = test_requirement(Uuid::now_v7(), career_id);

    broadcast_requirement_posted(accounts, mailer.clone(), requirement.clone()).await;

    let sent = mailer.sent_handle();
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "match@unicauca.edu.co");
    assert_eq!(sent[0].subject, format!("New requirement: {}", requirement.title));
}

#[tokio::test]
async fn should_keep_broadcasting_past_a_refused_mailbox() {
    let career_id = Uuid::now_v7();
    let mut first = test_account("first@unicauca.edu.co", AccountRole::Student);
    first.career_id = Some(career_id);
    let mut second = test_account("second@unicauca.edu.co", AccountRole::Student);
    second.career_id = Some(career_id);

    let accounts = MockAccountRepo::new(vec![first, second]);
    let mailer = MockMailer::new();
    mailer.refuse("first@unicauca.edu.co");

    broadcast_requirement_posted(accounts, mailer.clone(), test_requirement(Uuid::now_v7(), career_id)).await;

    let sent = mailer.sent_handle();
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "second@unicauca.edu.co");
}

// ── Applications ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_accept_an_application_from_a_matching_student() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let career_id = Uuid::now_v7();
    let student = student_in(career_id);
    let requirement = test_requirement(owner.id, career_id);

    let repo = MockRequirementRepo::new(vec![requirement.clone()], vec![]);
    let usecase = ApplyUseCase {
        requirements: repo.clone(),
        accounts: MockAccountRepo::new(vec![student.clone()]),
    };

    let application = usecase.execute(student.id, requirement.id).await.unwrap();

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.applicant_id, student.id);
    assert_eq!(repo.applications_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_students_from_another_career() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let requirement = test_requirement(owner.id, Uuid::now_v7());
    let student = student_in(Uuid::now_v7());

    let usecase = ApplyUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![]),
        accounts: MockAccountRepo::new(vec![student.clone()]),
    };

    let result = usecase.execute(student.id, requirement.id).await;

    assert!(
        matches!(result, Err(MarketError::PermissionDenied)),
        "expected PermissionDenied, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_applicants_without_a_career() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let requirement = test_requirement(owner.id, Uuid::now_v7());
    // Student fixture has no career set.
    let student = test_account("student@unicauca.edu.co", AccountRole::Student);

    let usecase = ApplyUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![]),
        accounts: MockAccountRepo::new(vec![student.clone()]),
    };

    let result = usecase.execute(student.id, requirement.id).await;

    assert!(
        matches!(result, Err(MarketError::PermissionDenied)),
        "expected PermissionDenied, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_non_students() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let career_id = Uuid::now_v7();
    let requirement = test_requirement(owner.id, career_id);
    let mut other_client = test_account("other@gmail.com", AccountRole::Client);
    other_client.career_id = Some(career_id);

    let usecase = ApplyUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![]),
        accounts: MockAccountRepo::new(vec![other_client.clone()]),
    };

    let result = usecase.execute(other_client.id, requirement.id).await;

    assert!(
        matches!(result, Err(MarketError::PermissionDenied)),
        "expected PermissionDenied, got {result:?}"
    );
}

#[tokio::test]
async fn should_not_let_the_owner_apply_to_their_own_requirement() {
    let career_id = Uuid::now_v7();
    let mut owner = student_in(career_id);
    owner.email = "owner@unicauca.edu.co".to_owned();
    let requirement = test_requirement(owner.id, career_id);

    let usecase = ApplyUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![]),
        accounts: MockAccountRepo::new(vec![owner.clone()]),
    };

    let result = usecase.execute(owner.id, requirement.id).await;

    assert!(
        matches!(result, Err(MarketError::PermissionDenied)),
        "expected PermissionDenied, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_a_second_application_from_the_same_student() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let career_id = Uuid::now_v7();
    let student = student_in(career_id);
    let requirement = test_requirement(owner.id, career_id);
    let existing = test_application(requirement.id, student.id);

    let usecase = ApplyUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![existing]),
        accounts: MockAccountRepo::new(vec![student.clone()]),
    };

    let result = usecase.execute(student.id, requirement.id).await;

    assert!(
        matches!(result, Err(MarketError::Conflict)),
        "expected Conflict, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_applications_once_closed() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let career_id = Uuid::now_v7();
    let student = student_in(career_id);
    let mut requirement = test_requirement(owner.id, career_id);
    requirement.status = RequirementStatus::Closed;

    let usecase = ApplyUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![]),
        accounts: MockAccountRepo::new(vec![student.clone()]),
    };

    let result = usecase.execute(student.id, requirement.id).await;

    assert!(
        matches!(result, Err(MarketError::RequirementNotOpen)),
        "expected RequirementNotOpen, got {result:?}"
    );
}

#[tokio::test]
async fn should_treat_deleted_requirements_as_absent() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let career_id = Uuid::now_v7();
    let student = student_in(career_id);
    let mut requirement = test_requirement(owner.id, career_id);
    requirement.status = RequirementStatus::Deleted;

    let repo = MockRequirementRepo::new(vec![requirement.clone()], vec![]);

    let result = ApplyUseCase {
        requirements: repo.clone(),
        accounts: MockAccountRepo::new(vec![student.clone()]),
    }
    .execute(student.id, requirement.id)
    .await;
    assert!(
        matches!(result, Err(MarketError::NotFound)),
        "expected NotFound, got {result:?}"
    );

    let fetched = GetRequirementUseCase { requirements: repo }
        .execute(requirement.id)
        .await;
    assert!(matches!(fetched, Err(MarketError::NotFound)));
}

// ── Selection ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_close_the_requirement_and_accept_the_chosen_application() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let career_id = Uuid::now_v7();
    let requirement = test_requirement(owner.id, career_id);
    let chosen = test_application(requirement.id, Uuid::now_v7());
    let passed_over = test_application(requirement.id, Uuid::now_v7());
    let chosen_id = chosen.id;
    let passed_over_id = passed_over.id;

    let repo = MockRequirementRepo::new(vec![requirement.clone()], vec![chosen, passed_over]);
    let usecase = SelectApplicantUseCase {
        requirements: repo.clone(),
    };

    let outcome = usecase
        .execute(owner.id, requirement.id, chosen_id)
        .await
        .unwrap();
    assert_eq!(outcome.requirement_id, requirement.id);

    let requirements = repo.requirements_handle();
    assert_eq!(
        requirements.lock().unwrap()[0].status,
        RequirementStatus::Closed
    );
    let applications = repo.applications_handle();
    let applications = applications.lock().unwrap();
    let chosen = applications.iter().find(|a| a.id == chosen_id).unwrap();
    assert_eq!(chosen.status, ApplicationStatus::Accepted);
    // The sibling stays pending; only the winner's row moves.
    let sibling = applications.iter().find(|a| a.id == passed_over_id).unwrap();
    assert_eq!(sibling.status, ApplicationStatus::Pending);
}

#[tokio::test]
async fn should_leave_both_rows_untouched_when_the_close_fails() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let requirement = test_requirement(owner.id, Uuid::now_v7());
    let application = test_application(requirement.id, Uuid::now_v7());
    let application_id = application.id;

    let repo =
        MockRequirementRepo::new(vec![requirement.clone()], vec![application]).with_failing_close();
    let usecase = SelectApplicantUseCase {
        requirements: repo.clone(),
    };

    let result = usecase.execute(owner.id, requirement.id, application_id).await;
    assert!(
        matches!(result, Err(MarketError::Internal(_))),
        "expected Internal, got {result:?}"
    );

    let requirements = repo.requirements_handle();
    assert_eq!(requirements.lock().unwrap()[0].status, RequirementStatus::Open);
    let applications = repo.applications_handle();
    assert_eq!(
        applications.lock().unwrap()[0].status,
        ApplicationStatus::Pending
    );
}

#[tokio::test]
async fn should_only_let_the_owner_select() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let stranger = test_account("stranger@gmail.com", AccountRole::Client);
    let requirement = test_requirement(owner.id, Uuid::now_v7());
    let application = test_application(requirement.id, Uuid::now_v7());
    let application_id = application.id;

    let usecase = SelectApplicantUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![application]),
    };

    let result = usecase
        .execute(stranger.id, requirement.id, application_id)
        .await;

    assert!(
        matches!(result, Err(MarketError::PermissionDenied)),
        "expected PermissionDenied, got {result:?}"
    );
}

#[tokio::test]
async fn should_not_select_twice() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let mut requirement = test_requirement(owner.id, Uuid::now_v7());
    requirement.status = RequirementStatus::Closed;
    let application = test_application(requirement.id, Uuid::now_v7());
    let application_id = application.id;

    let usecase = SelectApplicantUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![application]),
    };

    let result = usecase
        .execute(owner.id, requirement.id, application_id)
        .await;

    assert!(
        matches!(result, Err(MarketError::RequirementNotOpen)),
        "expected RequirementNotOpen, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_an_application_from_another_requirement() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let requirement = test_requirement(owner.id, Uuid::now_v7());
    let other_requirement = test_requirement(owner.id, Uuid::now_v7());
    let foreign = test_application(other_requirement.id, Uuid::now_v7());
    let foreign_id = foreign.id;

    let usecase = SelectApplicantUseCase {
        requirements: MockRequirementRepo::new(
            vec![requirement.clone(), other_requirement],
            vec![foreign],
        ),
    };

    let result = usecase.execute(owner.id, requirement.id, foreign_id).await;

    assert!(
        matches!(result, Err(MarketError::NotFound)),
        "expected NotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_mail_the_selected_applicant() {
    let student = student_in(Uuid::now_v7());
    let accounts = MockAccountRepo::new(vec![student.clone()]);
    let mailer = MockMailer::new();

    notify_applicant_selected(
        accounts,
        mailer.clone(),
        SelectionOutcome {
            requirement_id: Uuid::now_v7(),
            requirement_title: "Thesis data analysis".to_owned(),
            applicant_id: student.id,
        },
    )
    .await;

    let sent = mailer.sent_handle();
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, student.email);
    assert_eq!(sent[0].subject, "You were selected: Thesis data analysis");
}

// ── Editing and removal ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_apply_a_partial_patch() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let requirement = test_requirement(owner.id, Uuid::now_v7());

    let repo = MockRequirementRepo::new(vec![requirement.clone()], vec![]);
    let usecase = UpdateRequirementUseCase {
        requirements: repo.clone(),
    };

    usecase
        .execute(
            owner.id,
            requirement.id,
            RequirementPatch {
                title: None,
                description: None,
                budget: Some(300.0),
                career_id: None,
            },
        )
        .await
        .unwrap();

    let stored = repo.requirements_handle();
    let stored = stored.lock().unwrap();
    assert_eq!(stored[0].budget, Some(300.0));
    assert_eq!(stored[0].title, requirement.title);
}

#[tokio::test]
async fn should_reject_an_empty_patch() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let requirement = test_requirement(owner.id, Uuid::now_v7());

    let usecase = UpdateRequirementUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![]),
    };

    let result = usecase
        .execute(
            owner.id,
            requirement.id,
            RequirementPatch {
                title: None,
                description: None,
                budget: None,
                career_id: None,
            },
        )
        .await;

    assert!(
        matches!(result, Err(MarketError::MissingData)),
        "expected MissingData, got {result:?}"
    );
}

#[tokio::test]
async fn should_not_edit_after_close() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let mut requirement = test_requirement(owner.id, Uuid::now_v7());
    requirement.status = RequirementStatus::Closed;

    let usecase = UpdateRequirementUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![]),
    };

    let result = usecase
        .execute(
            owner.id,
            requirement.id,
            RequirementPatch {
                title: Some("new title".to_owned()),
                description: None,
                budget: None,
                career_id: None,
            },
        )
        .await;

    assert!(
        matches!(result, Err(MarketError::RequirementNotOpen)),
        "expected RequirementNotOpen, got {result:?}"
    );
}

#[tokio::test]
async fn should_soft_delete_an_open_requirement() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let requirement = test_requirement(owner.id, Uuid::now_v7());

    let repo = MockRequirementRepo::new(vec![requirement.clone()], vec![]);
    DeleteRequirementUseCase {
        requirements: repo.clone(),
    }
    .execute(owner.id, requirement.id)
    .await
    .unwrap();

    // The row stays, flagged deleted, and reads as absent.
    let stored = repo.requirements_handle();
    assert_eq!(
        stored.lock().unwrap()[0].status,
        RequirementStatus::Deleted
    );
    let fetched = GetRequirementUseCase { requirements: repo }
        .execute(requirement.id)
        .await;
    assert!(matches!(fetched, Err(MarketError::NotFound)));
}

#[tokio::test]
async fn should_not_delete_a_closed_requirement() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let mut requirement = test_requirement(owner.id, Uuid::now_v7());
    requirement.status = RequirementStatus::Closed;

    let usecase = DeleteRequirementUseCase {
        requirements: MockRequirementRepo::new(vec![requirement.clone()], vec![]),
    };

    let result = usecase.execute(owner.id, requirement.id).await;

    assert!(
        matches!(result, Err(MarketError::RequirementNotOpen)),
        "expected RequirementNotOpen, got {result:?}"
    );
}

#[tokio::test]
async fn should_archive_even_after_close() {
    let owner = test_account("client@gmail.com", AccountRole::Client);
    let mut requirement = test_requirement(owner.id, Uuid::now_v7());
    requirement.status = RequirementStatus::Closed;

    let repo = MockRequirementRepo::new(vec![requirement.clone()], vec![]);
    ArchiveRequirementUseCase {
        requirements: repo.clone(),
    }
    .execute(owner.id, requirement.id, true)
    .await
    .unwrap();

    let stored = repo.requirements_handle();
    assert!(stored.lock().unwrap()[0].archived);
}
