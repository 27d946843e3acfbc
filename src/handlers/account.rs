// region:    --- Imports
use super::{AppForm, FormSchema};
use crate::auction::model::NewUser;
use crate::auth::{password, start_session, OptionalUser};
use crate::error::AppError;
use crate::forms::{LoginForm, RegisterForm};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::info;
// endregion: --- Imports

/// 로그인/회원가입 성공 응답
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub username: String,
}

// region:    --- Account Handlers

/// 로그인 폼
pub async fn handle_login_form() -> Json<FormSchema> {
    Json(FormSchema {
        form: "login",
        fields: LoginForm::FIELDS,
    })
}

/// 로그인
/// 어떤 필드가 틀렸는지는 알려주지 않는다.
pub async fn handle_login(
    State(state): State<AppState>,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Json<SessionResponse>, AppError> {
    let (username, password) = form.validate()?;
    info!("{:<12} --> 로그인 요청: {}", "Handler", username);

    let user = state.store.find_user_by_username(&username).await?;

    // 사용자가 없어도 해시 검증을 거친다
    let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());
    let is_valid = password::verify_credentials(&password, stored_hash)
        .map_err(|e| AppError::Internal(format!("Password verify error: {e}")))?;
    let user = match user {
        Some(user) if is_valid => user,
        _ => return Err(AppError::InvalidCredentials),
    };

    let token = start_session(
        state.store.as_ref(),
        &user,
        state.config.auth.session_ttl_hours,
    )
    .await?;

    Ok(Json(SessionResponse {
        token,
        username: user.username,
    }))
}

/// 로그아웃 (세션이 없어도 성공)
pub async fn handle_logout(
    State(state): State<AppState>,
    OptionalUser(current): OptionalUser,
) -> Result<impl IntoResponse, AppError> {
    if let Some(current) = current {
        state.store.delete_session(&current.token).await?;
        info!("{:<12} --> 로그아웃: {}", "Handler", current.user.username);
    }
    Ok(Json(serde_json::json!({ "message": "Logged out." })))
}

/// 회원가입 폼
pub async fn handle_register_form() -> Json<FormSchema> {
    Json(FormSchema {
        form: "register",
        fields: RegisterForm::FIELDS,
    })
}

/// 회원가입 후 바로 로그인
pub async fn handle_register(
    State(state): State<AppState>,
    AppForm(form): AppForm<RegisterForm>,
) -> Result<impl IntoResponse, AppError> {
    let registration = form.validate()?;
    if !registration.passwords_match {
        return Err(AppError::PasswordMismatch);
    }
    info!("{:<12} --> 회원가입 요청: {}", "Handler", registration.username);

    let password_hash = password::hash_password(&registration.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {e}")))?;

    let user = state
        .store
        .create_user(NewUser {
            username: registration.username,
            email: registration.email,
            password_hash,
        })
        .await?;

    let token = start_session(
        state.store.as_ref(),
        &user,
        state.config.auth.session_ttl_hours,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            username: user.username,
        }),
    ))
}

// endregion: --- Account Handlers
