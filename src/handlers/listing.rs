// region:    --- Imports
use super::{today, AppForm, FormSchema};
use crate::auth::{CurrentUser, OptionalUser};
use crate::bidding::commands::{self, PlaceBidCommand};
use crate::error::AppError;
use crate::forms::{AuctionForm, CloseListingForm, ListingAction, ListingPost};
use crate::query;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;
// endregion: --- Imports

// region:    --- Query Handlers

/// 모든 경매 조회
pub async fn handle_index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 모든 경매 조회", "Handler");
    let auctions = query::handlers::list_auctions(state.store.as_ref()).await?;
    Ok(Json(auctions))
}

/// 경매 상세 조회
pub async fn handle_get_listing(
    State(state): State<AppState>,
    Path(auction_id): Path<i64>,
    OptionalUser(current): OptionalUser,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 경매 상세 조회 id: {}", "Handler", auction_id);
    let viewer = current.as_ref().map(|c| &c.user);
    let view =
        query::handlers::view_listing(state.store.as_ref(), auction_id, viewer, today()).await?;
    Ok(Json(view))
}

/// 입찰 이력 조회
pub async fn handle_get_bid_history(
    State(state): State<AppState>,
    Path(auction_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "Handler", auction_id);
    let bids = query::handlers::bid_history(state.store.as_ref(), auction_id).await?;
    Ok(Json(bids))
}

// endregion: --- Query Handlers

// region:    --- Command Handlers

/// 경매 등록 폼
pub async fn handle_create_listing_form(_current: CurrentUser) -> Json<FormSchema> {
    Json(FormSchema {
        form: "createlisting",
        fields: AuctionForm::FIELDS,
    })
}

/// 경매 등록
pub async fn handle_create_listing(
    State(state): State<AppState>,
    current: CurrentUser,
    AppForm(form): AppForm<AuctionForm>,
) -> Result<impl IntoResponse, AppError> {
    let new_auction = form.validate(today())?;
    let auction =
        commands::handle_create_listing(state.store.as_ref(), &current.user, new_auction).await?;

    let location = format!("/listing/{}", auction.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(auction),
    ))
}

/// 입찰 또는 댓글
/// 처리 후 현재 경매 상태를 돌려준다.
pub async fn handle_post_listing(
    State(state): State<AppState>,
    Path(auction_id): Path<i64>,
    current: CurrentUser,
    AppForm(post): AppForm<ListingPost>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.store.as_ref();
    let today = today();

    match post.validate()? {
        ListingAction::Bid(amount) => {
            commands::handle_place_bid(
                store,
                &current.user,
                PlaceBidCommand { auction_id, amount },
                today,
            )
            .await?;
        }
        ListingAction::Comment(body) => {
            commands::handle_post_comment(store, &current.user, auction_id, &body).await?;
        }
    }

    let view = query::handlers::view_listing(store, auction_id, Some(&current.user), today).await?;
    Ok(Json(view))
}

/// 경매 종료 (등록자만 가능)
pub async fn handle_close_listing(
    State(state): State<AppState>,
    current: CurrentUser,
    AppForm(form): AppForm<CloseListingForm>,
) -> Result<impl IntoResponse, AppError> {
    let auction =
        commands::handle_close_listing(state.store.as_ref(), &current.user, form.listing_id)
            .await?;
    Ok(Json(auction))
}

// endregion: --- Command Handlers
