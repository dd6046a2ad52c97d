//! Bearer-token caller extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use campus_auth_types::validate_session;
use campus_domain::role::AccountRole;

use crate::error::MarketError;
use crate::state::AppState;

/// Authenticated caller behind `Authorization: Bearer <jwt>`.
///
/// Extraction only proves the token; ownership and role checks stay in the
/// handlers and usecases.
#[derive(Debug, Clone)]
pub struct Caller {
    pub account_id: Uuid,
    pub email: String,
    pub role: AccountRole,
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = MarketError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_owned());
        let secret = state.jwt_secret.clone();

        async move {
            let token = token.ok_or(MarketError::InvalidToken)?;
            let identity =
                validate_session(&token, &secret).map_err(|_| MarketError::InvalidToken)?;
            let role = AccountRole::from_u8(identity.role).ok_or(MarketError::InvalidToken)?;
            Ok(Self {
                account_id: identity.account_id,
                email: identity.email,
                role,
            })
        }
    }
}
