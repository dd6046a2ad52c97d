use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::types::CodeRejectReason;

/// Market service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("code rejected")]
    CodeRejected(CodeRejectReason),
    #[error("account inactive")]
    AccountInactive,
    #[error("permission denied")]
    PermissionDenied,
    #[error("not found")]
    NotFound,
    #[error("already registered")]
    AlreadyRegistered,
    #[error("conflict")]
    Conflict,
    #[error("requirement not open")]
    RequirementNotOpen,
    #[error("order not completed")]
    OrderNotCompleted,
    #[error("invalid score")]
    InvalidScore,
    #[error("missing data")]
    MissingData,
    #[error("mail delivery failed")]
    DeliveryFailure(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MarketError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::CodeRejected(_) => "CODE_REJECTED",
            Self::AccountInactive => "ACCOUNT_INACTIVE",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::Conflict => "CONFLICT",
            Self::RequirementNotOpen => "REQUIREMENT_NOT_OPEN",
            Self::OrderNotCompleted => "ORDER_NOT_COMPLETED",
            Self::InvalidScore => "INVALID_SCORE",
            Self::MissingData => "MISSING_DATA",
            Self::DeliveryFailure(_) => "DELIVERY_FAILURE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials | Self::InvalidToken | Self::CodeRejected(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::AccountInactive | Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyRegistered
            | Self::Conflict
            | Self::RequirementNotOpen
            | Self::OrderNotCompleted => StatusCode::CONFLICT,
            Self::InvalidScore | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::DeliveryFailure(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) => tracing::error!(error = %e, kind = "INTERNAL", "internal error"),
            Self::DeliveryFailure(e) => {
                tracing::warn!(error = %e, kind = "DELIVERY_FAILURE", "mail delivery failed")
            }
            _ => {}
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::CodeRejected(reason) = &self {
            body["reason"] = serde_json::Value::String(reason.as_str().to_owned());
        }
        (status, axum::Json(body)).into_response()
    }
}
