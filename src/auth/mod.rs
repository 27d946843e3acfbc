/// 인증 / 세션
/// 세션 토큰은 `Authorization: Bearer <token>` 헤더로 전달된다.
// region:    --- Imports
use crate::auction::model::User;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::AuctionStore;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use rand::Rng;
use tracing::{debug, info};
// endregion: --- Imports

pub mod password;

// region:    --- Session
/// 32바이트 난수를 hex 로 인코딩한 세션 토큰
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// 세션 발급
pub async fn start_session(
    store: &dyn AuctionStore,
    user: &User,
    ttl_hours: i64,
) -> Result<String, AppError> {
    let token = generate_token();
    let expires_at = Utc::now() + Duration::hours(ttl_hours);
    store.create_session(&token, user.id, expires_at).await?;
    info!("{:<12} --> 세션 발급: user={}", "Auth", user.username);
    Ok(token)
}

/// 요청 헤더에서 세션 토큰 추출
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header.to_str().map_err(|_| AppError::TokenInvalid)?;
    value
        .strip_prefix("Bearer ")
        .map(|token| Some(token.trim()))
        .ok_or(AppError::TokenInvalid)
}
// endregion: --- Session

// region:    --- Extractors
/// 로그인한 사용자
/// 인증이 필요한 핸들러는 이 값을 인자로 받는다.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?.ok_or(AppError::TokenMissing)?;

        let user = state
            .store
            .find_session_user(token, Utc::now())
            .await?
            .ok_or_else(|| {
                debug!("{:<12} --> 알 수 없거나 만료된 세션", "Auth");
                AppError::TokenInvalid
            })?;

        Ok(CurrentUser {
            user,
            token: token.to_string(),
        })
    }
}

/// 로그인 여부가 선택인 핸들러용
/// 토큰이 없거나 유효하지 않으면 익명, 저장소 오류는 그대로 실패한다.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let result = CurrentUser::from_request_parts(parts, state).await;
        anonymous_if_unauthenticated(result).map(OptionalUser)
    }
}

fn anonymous_if_unauthenticated(
    result: Result<CurrentUser, AppError>,
) -> Result<Option<CurrentUser>, AppError> {
    match result {
        Ok(current) => Ok(Some(current)),
        Err(AppError::TokenMissing | AppError::TokenInvalid) => Ok(None),
        Err(e) => Err(e),
    }
}
// endregion: --- Extractors
