// region:    --- Imports
use crate::error::AppError;
use crate::forms::FormErrors;
use axum::async_trait;
use axum::extract::rejection::FormRejection;
use axum::extract::{FromRequest, Request};
use axum::Form;
use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
// endregion: --- Imports

// region:    --- Modules
pub mod account;
pub mod listing;
pub mod watchlist;
// endregion: --- Modules

// region:    --- Helpers
/// 폼 역직렬화 실패를 검증 오류 응답으로 바꾸는 `Form<T>` 래퍼
pub struct AppForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppForm<T>
where
    Form<T>: FromRequest<S, Rejection = FormRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
            let mut errors = FormErrors::default();
            errors.add("form", e.body_text());
            AppError::Validation(errors)
        })?;
        Ok(AppForm(value))
    }
}

/// GET 요청에 돌려주는 빈 폼 정보
#[derive(Debug, Serialize)]
pub struct FormSchema {
    pub form: &'static str,
    pub fields: &'static [&'static str],
}

/// 날짜 비교 기준일 (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
// endregion: --- Helpers
