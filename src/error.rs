// region:    --- Imports
use crate::forms::FormErrors;
use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::error;
// endregion: --- Imports

// region:    --- Error Body
/// 모든 실패 응답의 공통 형태
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<&'static str, String>>,
    /// LOW_BID 에서 거부된 입찰 금액
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_amount: Option<i64>,
}
// endregion: --- Error Body

// region:    --- App Error
#[derive(Debug)]
pub enum AppError {
    Validation(FormErrors),
    LowBid { amount: i64 },
    AuctionClosed,
    PasswordMismatch,
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    PermissionDenied,
    NotFound(String),
    UsernameTaken,
    MaxRetriesExceeded,
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::LowBid { .. } => "LOW_BID",
            AppError::AuctionClosed => "AUCTION_CLOSED",
            AppError::PasswordMismatch => "PASSWORD_MISMATCH",
            AppError::TokenMissing => "TOKEN_MISSING",
            AppError::TokenInvalid => "TOKEN_INVALID",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::PermissionDenied => "PERMISSION_DENIED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::UsernameTaken => "USERNAME_TAKEN",
            AppError::MaxRetriesExceeded => "MAX_RETRIES_EXCEEDED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let code = self.code();
        let bid_amount = match &self {
            AppError::LowBid { amount } => Some(*amount),
            _ => None,
        };
        let (status, message, fields) = match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Please correct the errors below.".to_string(),
                Some(errors.into_inner()),
            ),
            AppError::LowBid { .. } => (
                StatusCode::BAD_REQUEST,
                "The bid you submitted was not high enough.".to_string(),
                None,
            ),
            AppError::AuctionClosed => (
                StatusCode::BAD_REQUEST,
                "This listing is closed.".to_string(),
                None,
            ),
            AppError::PasswordMismatch => (
                StatusCode::BAD_REQUEST,
                "Passwords must match.".to_string(),
                None,
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
                None,
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired session".to_string(),
                None,
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username and/or password.".to_string(),
                None,
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                "Only the owner of this listing can do that.".to_string(),
                None,
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::UsernameTaken => (
                StatusCode::CONFLICT,
                "Username already taken.".to_string(),
                None,
            ),
            AppError::MaxRetriesExceeded => (
                StatusCode::CONFLICT,
                "Too many competing bids, please try again.".to_string(),
                None,
            ),
            AppError::Internal(detail) => {
                error!("{:<12} --> 내부 오류: {}", "Error", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        };

        (
            status,
            ErrorBody {
                code,
                message,
                fields,
                bid_amount,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken => AppError::UsernameTaken,
            other => AppError::Internal(other.to_string()),
        }
    }
}
// endregion: --- App Error
