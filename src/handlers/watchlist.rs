// region:    --- Imports
use super::AppForm;
use crate::auth::CurrentUser;
use crate::bidding::commands::handle_watchlist;
use crate::error::AppError;
use crate::forms::WatchlistForm;
use crate::query;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;
// endregion: --- Imports

/// 관심 경매 조회
pub async fn handle_get_watchlist(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let auctions = query::handlers::watched_auctions(state.store.as_ref(), &current.user).await?;
    Ok(Json(auctions))
}

/// 관심 목록 추가/삭제 후 현재 목록 반환
pub async fn handle_post_watchlist(
    State(state): State<AppState>,
    current: CurrentUser,
    AppForm(form): AppForm<WatchlistForm>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 관심 목록 요청: {:?} listing={}", "Handler", form.to_watchlist, form.listing_id);
    let store = state.store.as_ref();
    handle_watchlist(store, &current.user, form.listing_id, form.to_watchlist).await?;

    let auctions = query::handlers::watched_auctions(store, &current.user).await?;
    Ok(Json(auctions))
}
