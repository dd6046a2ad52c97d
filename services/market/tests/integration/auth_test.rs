use campus_auth_types::validate_session;
use campus_domain::role::AccountRole;
use campus_market::error::MarketError;
use campus_market::usecase::auth::{
    AuthPolicy, CompleteRegistrationUseCase, LoginInput, LoginOutcome, LoginUseCase,
    RegistrationInput, RequestRegistrationCodeUseCase, Verify2faInput, Verify2faUseCase,
};
use campus_market::usecase::credential::{check_password, hash_password, CredentialCheck};
use campus_market::usecase::verification::hash_code;

use crate::helpers::{
    extract_code, test_account, test_policy, MockAccountRepo, MockMailer, MockVerificationRepo,
    TEST_JWT_SECRET,
};

fn login_usecase(
    accounts: MockAccountRepo,
    codes: MockVerificationRepo,
    mailer: MockMailer,
    policy: AuthPolicy,
) -> LoginUseCase<MockAccountRepo, MockVerificationRepo, MockMailer> {
    LoginUseCase {
        accounts,
        codes,
        mailer,
        policy,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_unknown_email() {
    let usecase = login_usecase(
        MockAccountRepo::empty(),
        MockVerificationRepo::empty(),
        MockMailer::new(),
        test_policy(),
    );

    let result = usecase
        .execute(LoginInput {
            email: "nobody@example.com".to_owned(),
            password: "whatever".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(MarketError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let mut account = test_account("ana@unicauca.edu.co", AccountRole::Student);
    account.password_hash = hash_password("right-password").unwrap();

    let usecase = login_usecase(
        MockAccountRepo::new(vec![account]),
        MockVerificationRepo::empty(),
        MockMailer::new(),
        test_policy(),
    );

    let result = usecase
        .execute(LoginInput {
            email: "ana@unicauca.edu.co".to_owned(),
            password: "wrong-password".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(MarketError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_mail_a_second_factor_code_on_valid_password() {
    let mut account = test_account("ana@unicauca.edu.co", AccountRole::Student);
    account.password_hash = hash_password("right-password").unwrap();

    let codes = MockVerificationRepo::empty();
    let mailer = MockMailer::new();
    let usecase = login_usecase(
        MockAccountRepo::new(vec![account]),
        codes.clone(),
        mailer.clone(),
        test_policy(),
    );

    let outcome = usecase
        .execute(LoginInput {
            email: "ana@unicauca.edu.co".to_owned(),
            password: "right-password".to_owned(),
        })
        .await
        .unwrap();

    assert!(matches!(outcome, LoginOutcome::CodeIssued));

    let sent = mailer.sent_handle();
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let mailed_code = extract_code(&sent[0].body);

    let records = codes.records_handle();
    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].code_hash, hash_code(&mailed_code));
}

#[tokio::test]
async fn should_upgrade_legacy_plaintext_credentials_during_login() {
    let mut account = test_account("ana@unicauca.edu.co", AccountRole::Student);
    account.password_hash = "plaintext-password".to_owned();
    let account_id = account.id;

    let accounts = MockAccountRepo::new(vec![account]);
    let accounts_handle = accounts.accounts_handle();
    let usecase = login_usecase(
        accounts,
        MockVerificationRepo::empty(),
        MockMailer::new(),
        test_policy(),
    );

    let outcome = usecase
        .execute(LoginInput {
            email: "ana@unicauca.edu.co".to_owned(),
            password: "plaintext-password".to_owned(),
        })
        .await
        .unwrap();

    assert!(matches!(outcome, LoginOutcome::CodeIssued));

    // The stored credential is now a salted hash of the same password.
    let accounts = accounts_handle.lock().unwrap();
    let stored = &accounts.iter().find(|a| a.id == account_id).unwrap().password_hash;
    assert_ne!(stored, "plaintext-password");
    assert_eq!(
        check_password(stored, "plaintext-password"),
        CredentialCheck::Match
    );
}

#[tokio::test]
async fn should_reject_deactivated_accounts() {
    let mut account = test_account("ana@unicauca.edu.co", AccountRole::Student);
    account.password_hash = hash_password("right-password").unwrap();
    account.active = false;

    let usecase = login_usecase(
        MockAccountRepo::new(vec![account]),
        MockVerificationRepo::empty(),
        MockMailer::new(),
        test_policy(),
    );

    let result = usecase
        .execute(LoginInput {
            email: "ana@unicauca.edu.co".to_owned(),
            password: "right-password".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(MarketError::AccountInactive)),
        "expected AccountInactive, got {result:?}"
    );
}

#[tokio::test]
async fn should_mint_a_session_directly_for_the_bypass_identity() {
    let mut account = test_account("ops@example.com", AccountRole::Admin);
    account.password_hash = hash_password("admin-password").unwrap();
    let account_id = account.id;

    let mailer = MockMailer::new();
    let policy = AuthPolicy {
        bypass_identity: Some("ops@example.com".to_owned()),
        student_suffix: "@unicauca.edu.co".to_owned(),
    };
    let usecase = login_usecase(
        MockAccountRepo::new(vec![account]),
        MockVerificationRepo::empty(),
        mailer.clone(),
        policy,
    );

    let outcome = usecase
        .execute(LoginInput {
            email: "ops@example.com".to_owned(),
            password: "admin-password".to_owned(),
        })
        .await
        .unwrap();

    let LoginOutcome::Session(output) = outcome else {
        panic!("expected a direct session for the bypass identity");
    };
    let identity = validate_session(&output.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(identity.account_id, account_id);
    assert_eq!(identity.role, AccountRole::Admin.as_u8());

    // No second factor went out.
    let sent = mailer.sent_handle();
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_bypass_admins_when_no_identity_is_configured() {
    let mut account = test_account("ops@example.com", AccountRole::Admin);
    account.password_hash = hash_password("admin-password").unwrap();

    let usecase = login_usecase(
        MockAccountRepo::new(vec![account]),
        MockVerificationRepo::empty(),
        MockMailer::new(),
        test_policy(),
    );

    let outcome = usecase
        .execute(LoginInput {
            email: "ops@example.com".to_owned(),
            password: "admin-password".to_owned(),
        })
        .await
        .unwrap();

    assert!(matches!(outcome, LoginOutcome::CodeIssued));
}

// ── Second factor ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_mint_a_session_after_code_verification() {
    let account = test_account("ana@unicauca.edu.co", AccountRole::Student);
    let account_id = account.id;

    let codes = MockVerificationRepo::empty();
    let mailer = MockMailer::new();
    // Issue through the login path so the record matches production shape.
    let mut login_account = test_account("ana@unicauca.edu.co", AccountRole::Student);
    login_account.id = account_id;
    login_account.password_hash = hash_password("pw").unwrap();
    login_usecase(
        MockAccountRepo::new(vec![login_account.clone()]),
        codes.clone(),
        mailer.clone(),
        test_policy(),
    )
    .execute(LoginInput {
        email: "ana@unicauca.edu.co".to_owned(),
        password: "pw".to_owned(),
    })
    .await
    .unwrap();

    let sent = mailer.sent_handle();
    let code = extract_code(&sent.lock().unwrap()[0].body);

    let usecase = Verify2faUseCase {
        accounts: MockAccountRepo::new(vec![login_account]),
        codes: codes.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let output = usecase
        .execute(Verify2faInput {
            email: "ana@unicauca.edu.co".to_owned(),
            code,
        })
        .await
        .unwrap();

    let identity = validate_session(&output.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(identity.account_id, account_id);
    assert_eq!(identity.email, "ana@unicauca.edu.co");

    // Single use: the record is gone.
    let records = codes.records_handle();
    assert!(records.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_mint_a_session_for_an_account_deactivated_mid_flow() {
    use campus_market::domain::types::VerificationRecord;
    use chrono::Utc;
    use uuid::Uuid;

    let mut account = test_account("ana@unicauca.edu.co", AccountRole::Student);
    account.active = false;

    let codes = MockVerificationRepo::new(vec![VerificationRecord {
        id: Uuid::now_v7(),
        email: "ana@unicauca.edu.co".to_owned(),
        code_hash: hash_code("314159"),
        issued_at: Utc::now(),
    }]);

    let usecase = Verify2faUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        codes,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = usecase
        .execute(Verify2faInput {
            email: "ana@unicauca.edu.co".to_owned(),
            code: "314159".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(MarketError::AccountInactive)),
        "expected AccountInactive, got {result:?}"
    );
}

// ── Registration ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_issue_registration_codes_for_taken_addresses() {
    let account = test_account("ana@unicauca.edu.co", AccountRole::Student);

    let usecase = RequestRegistrationCodeUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        codes: MockVerificationRepo::empty(),
        mailer: MockMailer::new(),
    };

    let result = usecase.execute("ana@unicauca.edu.co").await;

    assert!(
        matches!(result, Err(MarketError::AlreadyRegistered)),
        "expected AlreadyRegistered, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_admin_role_requests_without_spending_the_code() {
    use campus_market::domain::types::VerificationRecord;
    use chrono::Utc;
    use uuid::Uuid;

    let codes = MockVerificationRepo::new(vec![VerificationRecord {
        id: Uuid::now_v7(),
        email: "mallory@example.com".to_owned(),
        code_hash: hash_code("314159"),
        issued_at: Utc::now(),
    }]);

    let usecase = CompleteRegistrationUseCase {
        accounts: MockAccountRepo::empty(),
        codes: codes.clone(),
        policy: test_policy(),
    };

    let result = usecase
        .execute(RegistrationInput {
            email: "mallory@example.com".to_owned(),
            code: "314159".to_owned(),
            name: "Mallory".to_owned(),
            password: "pw".to_owned(),
            role: AccountRole::Admin,
            career_id: None,
        })
        .await;

    assert!(
        matches!(result, Err(MarketError::PermissionDenied)),
        "expected PermissionDenied, got {result:?}"
    );
    // The code survives for a retry with a legitimate role.
    let records = codes.records_handle();
    assert_eq!(records.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_force_student_role_on_institutional_addresses() {
    use campus_market::domain::types::VerificationRecord;
    use chrono::Utc;
    use uuid::Uuid;

    let codes = MockVerificationRepo::new(vec![VerificationRecord {
        id: Uuid::now_v7(),
        email: "ana@unicauca.edu.co".to_owned(),
        code_hash: hash_code("314159"),
        issued_at: Utc::now(),
    }]);

    let usecase = CompleteRegistrationUseCase {
        accounts: MockAccountRepo::empty(),
        codes,
        policy: test_policy(),
    };

    let account = usecase
        .execute(RegistrationInput {
            email: "ana@unicauca.edu.co".to_owned(),
            code: "314159".to_owned(),
            name: "Ana".to_owned(),
            password: "pw".to_owned(),
            role: AccountRole::Client,
            career_id: None,
        })
        .await
        .unwrap();

    assert_eq!(account.role, AccountRole::Student);
    assert!(account.active);
}

#[tokio::test]
async fn should_honor_the_requested_role_on_external_addresses() {
    use campus_market::domain::types::VerificationRecord;
    use chrono::Utc;
    use uuid::Uuid;

    let codes = MockVerificationRepo::new(vec![VerificationRecord {
        id: Uuid::now_v7(),
        email: "bob@gmail.com".to_owned(),
        code_hash: hash_code("314159"),
        issued_at: Utc::now(),
    }]);

    let usecase = CompleteRegistrationUseCase {
        accounts: MockAccountRepo::empty(),
        codes,
        policy: test_policy(),
    };

    let account = usecase
        .execute(RegistrationInput {
            email: "bob@gmail.com".to_owned(),
            code: "314159".to_owned(),
            name: "Bob".to_owned(),
            password: "pw".to_owned(),
            role: AccountRole::Client,
            career_id: None,
        })
        .await
        .unwrap();

    assert_eq!(account.role, AccountRole::Client);
}

// ── Full flow ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_run_the_full_signup_and_login_flow() {
    let accounts = MockAccountRepo::empty();
    let codes = MockVerificationRepo::empty();
    let mailer = MockMailer::new();
    let sent = mailer.sent_handle();

    // 1. Ask for a registration code.
    RequestRegistrationCodeUseCase {
        accounts: accounts.clone(),
        codes: codes.clone(),
        mailer: mailer.clone(),
    }
    .execute("Ana@unicauca.edu.co")
    .await
    .unwrap();

    let registration_code = extract_code(&sent.lock().unwrap()[0].body);

    // 2. Complete registration with the mailed code.
    let account = CompleteRegistrationUseCase {
        accounts: accounts.clone(),
        codes: codes.clone(),
        policy: test_policy(),
    }
    .execute(RegistrationInput {
        email: "Ana@unicauca.edu.co".to_owned(),
        code: registration_code.clone(),
        name: "Ana".to_owned(),
        password: "correct horse".to_owned(),
        role: AccountRole::Client,
        career_id: None,
    })
    .await
    .unwrap();

    assert_eq!(account.email, "ana@unicauca.edu.co");
    assert_eq!(account.role, AccountRole::Student);

    // The registration code is spent.
    let stale = campus_market::usecase::verification::verify_code(
        &codes,
        "ana@unicauca.edu.co",
        &registration_code,
    )
    .await;
    assert!(matches!(stale, Err(MarketError::CodeRejected(_))));

    // 3. Log in with the password; a second-factor code goes out.
    let outcome = login_usecase(accounts.clone(), codes.clone(), mailer.clone(), test_policy())
        .execute(LoginInput {
            email: "ana@unicauca.edu.co".to_owned(),
            password: "correct horse".to_owned(),
        })
        .await
        .unwrap();
    assert!(matches!(outcome, LoginOutcome::CodeIssued));

    let login_code = extract_code(&sent.lock().unwrap()[1].body);

    // 4. Trade the code for a session token.
    let output = Verify2faUseCase {
        accounts: accounts.clone(),
        codes: codes.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
    .execute(Verify2faInput {
        email: "ana@unicauca.edu.co".to_owned(),
        code: login_code,
    })
    .await
    .unwrap();

    let identity = validate_session(&output.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(identity.account_id, account.id);
    assert_eq!(identity.role, AccountRole::Student.as_u8());
}
