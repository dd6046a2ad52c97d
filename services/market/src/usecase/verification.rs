//! One-time verification codes: issue them over mail, verify them once.

use chrono::Utc;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::domain::repository::{Mailer, VerificationRepository};
use crate::domain::types::{CodePurpose, CodeRejectReason, VerificationRecord, CODE_LEN};
use crate::error::MarketError;

const CHARSET: &[u8] = b"0123456789";

pub fn generate_code() -> String {
    use rand::RngExt;

    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn hashes_match(stored: &str, presented: &str) -> bool {
    stored
        .as_bytes()
        .ct_eq(hash_code(presented).as_bytes())
        .into()
}

/// Generates a fresh code for the email, appends it to the ledger and mails
/// it out. Earlier codes for the same email are left in place; verification
/// only ever consults the newest one.
pub async fn issue_code<V, M>(
    codes: &V,
    mailer: &M,
    email: &str,
    purpose: CodePurpose,
) -> Result<(), MarketError>
where
    V: VerificationRepository,
    M: Mailer,
{
    let email = campus_domain::email::normalize(email);
    let code = generate_code();
    let record = VerificationRecord {
        id: Uuid::now_v7(),
        email: email.clone(),
        code_hash: hash_code(&code),
        issued_at: Utc::now(),
    };
    codes.create(&record).await?;
    // A failed send leaves the record behind. The code already exists, and
    // the caller may retry delivery without invalidating it.
    mailer
        .send(&email, purpose.subject(), &purpose.body(&code))
        .await
        .map_err(MarketError::DeliveryFailure)?;
    Ok(())
}

/// Checks the presented code against the newest record for the email and
/// consumes the record when it matches. A record is only deleted on success;
/// a wrong or stale attempt leaves the ledger untouched.
pub async fn verify_code<V>(codes: &V, email: &str, presented: &str) -> Result<(), MarketError>
where
    V: VerificationRepository,
{
    let email = campus_domain::email::normalize(email);
    let Some(record) = codes.find_latest(&email).await? else {
        return Err(MarketError::CodeRejected(CodeRejectReason::NoneFound));
    };
    if !hashes_match(&record.code_hash, presented) {
        return Err(MarketError::CodeRejected(CodeRejectReason::Incorrect));
    }
    if record.is_expired(Utc::now()) {
        return Err(MarketError::CodeRejected(CodeRejectReason::Expired));
    }
    codes.delete(record.id).await?;
    Ok(())
}
