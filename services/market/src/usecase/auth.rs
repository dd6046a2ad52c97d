//! Sign-in, second-factor verification and registration flows.

use chrono::Utc;
use uuid::Uuid;

use campus_auth_types::{SessionClaims, SESSION_TTL};
use campus_domain::role::AccountRole;

use crate::domain::repository::{AccountRepository, Mailer, VerificationRepository};
use crate::domain::types::{Account, CodePurpose};
use crate::error::MarketError;
use crate::usecase::credential::{check_password, hash_password, CredentialCheck};
use crate::usecase::verification::{issue_code, verify_code};

/// Deployment-level knobs that shape authentication decisions.
#[derive(Clone, Debug)]
pub struct AuthPolicy {
    /// Admin identity allowed to skip the mailed second factor. `None`
    /// disables the bypass entirely.
    pub bypass_identity: Option<String>,
    /// Accounts registering under this email suffix are students no matter
    /// what role they ask for.
    pub student_suffix: String,
}

impl AuthPolicy {
    pub fn bypasses_second_factor(&self, email: &str) -> bool {
        self.bypass_identity
            .as_deref()
            .is_some_and(|bypass| campus_domain::email::normalize(bypass) == email)
    }

    pub fn resolve_role(&self, email: &str, requested: AccountRole) -> AccountRole {
        if campus_domain::email::has_suffix(email, &self.student_suffix) {
            AccountRole::Student
        } else {
            requested
        }
    }
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Mints a session token for the account. Returns the token and its
/// expiration timestamp.
pub fn issue_session_token(account: &Account, secret: &str) -> Result<(String, u64), MarketError> {
    let expires_at = now_secs() + SESSION_TTL;
    let claims = SessionClaims {
        sub: account.id.to_string(),
        email: account.email.clone(),
        role: account.role.as_u8(),
        exp: expires_at,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| MarketError::Internal(anyhow::anyhow!(e).context("encode session token")))?;
    Ok((token, expires_at))
}

#[derive(Debug)]
pub struct SessionOutput {
    pub account: Account,
    pub token: String,
    pub expires_at: u64,
}

/// What a successful password check leads to.
#[derive(Debug)]
pub enum LoginOutcome {
    /// A second-factor code was mailed; the client must call verify next.
    CodeIssued,
    /// Bypass identity, session minted directly.
    Session(SessionOutput),
}

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<A, V, M> {
    pub accounts: A,
    pub codes: V,
    pub mailer: M,
    pub policy: AuthPolicy,
    pub jwt_secret: String,
}

impl<A, V, M> LoginUseCase<A, V, M>
where
    A: AccountRepository,
    V: VerificationRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutcome, MarketError> {
        let email = campus_domain::email::normalize(&input.email);
        let Some(account) = self.accounts.find_by_email(&email).await? else {
            return Err(MarketError::InvalidCredentials);
        };
        match check_password(&account.password_hash, &input.password) {
            CredentialCheck::Match => {}
            CredentialCheck::LegacyMatch => {
                // Upgrade the stored plaintext to a salted hash while the
                // cleartext is in hand.
                let rehashed = hash_password(&input.password)?;
                self.accounts
                    .update_credential(account.id, &rehashed)
                    .await?;
                tracing::info!(account_id = %account.id, "migrated legacy credential");
            }
            CredentialCheck::Mismatch => return Err(MarketError::InvalidCredentials),
        }
        if !account.active {
            return Err(MarketError::AccountInactive);
        }
        if self.policy.bypasses_second_factor(&email) {
            let (token, expires_at) = issue_session_token(&account, &self.jwt_secret)?;
            return Ok(LoginOutcome::Session(SessionOutput {
                account,
                token,
                expires_at,
            }));
        }
        issue_code(&self.codes, &self.mailer, &email, CodePurpose::Login).await?;
        Ok(LoginOutcome::CodeIssued)
    }
}

pub struct Verify2faInput {
    pub email: String,
    pub code: String,
}

pub struct Verify2faUseCase<A, V> {
    pub accounts: A,
    pub codes: V,
    pub jwt_secret: String,
}

impl<A, V> Verify2faUseCase<A, V>
where
    A: AccountRepository,
    V: VerificationRepository,
{
    pub async fn execute(&self, input: Verify2faInput) -> Result<SessionOutput, MarketError> {
        let email = campus_domain::email::normalize(&input.email);
        verify_code(&self.codes, &email, &input.code).await?;
        // Re-fetch after the code check so the minted token reflects the
        // account's current role and status, not the ones at password time.
        let Some(account) = self.accounts.find_by_email(&email).await? else {
            return Err(MarketError::InvalidCredentials);
        };
        if !account.active {
            return Err(MarketError::AccountInactive);
        }
        let (token, expires_at) = issue_session_token(&account, &self.jwt_secret)?;
        Ok(SessionOutput {
            account,
            token,
            expires_at,
        })
    }
}

pub struct RequestRegistrationCodeUseCase<A, V, M> {
    pub accounts: A,
    pub codes: V,
    pub mailer: M,
}

impl<A, V, M> RequestRegistrationCodeUseCase<A, V, M>
where
    A: AccountRepository,
    V: VerificationRepository,
    M: Mailer,
{
    pub async fn execute(&self, email: &str) -> Result<(), MarketError> {
        let email = campus_domain::email::normalize(email);
        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(MarketError::AlreadyRegistered);
        }
        issue_code(&self.codes, &self.mailer, &email, CodePurpose::Registration).await
    }
}

pub struct RegistrationInput {
    pub email: String,
    pub code: String,
    pub name: String,
    pub password: String,
    pub role: AccountRole,
    pub career_id: Option<Uuid>,
}

pub struct CompleteRegistrationUseCase<A, V> {
    pub accounts: A,
    pub codes: V,
    pub policy: AuthPolicy,
}

impl<A, V> CompleteRegistrationUseCase<A, V>
where
    A: AccountRepository,
    V: VerificationRepository,
{
    pub async fn execute(&self, input: RegistrationInput) -> Result<Account, MarketError> {
        let email = campus_domain::email::normalize(&input.email);
        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(MarketError::AlreadyRegistered);
        }
        // Admin accounts are provisioned out of band. Reject before the code
        // is spent so the applicant can still use it for a valid role.
        if input.role == AccountRole::Admin {
            return Err(MarketError::PermissionDenied);
        }
        verify_code(&self.codes, &email, &input.code).await?;
        let role = self.policy.resolve_role(&email, input.role);
        let now = Utc::now();
        let account = Account {
            id: Uuid::now_v7(),
            email,
            name: input.name,
            password_hash: hash_password(&input.password)?,
            role,
            career_id: input.career_id,
            active: true,
            average_rating: None,
            created_at: now,
            updated_at: now,
        };
        self.accounts.create(&account).await?;
        Ok(account)
    }
}
