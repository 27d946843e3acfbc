// region:    --- Imports
use crate::handlers::{account, listing, watchlist};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
// endregion: --- Imports

/// 라우터 설정
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .route("/", get(listing::handle_index))
        .route(
            "/login",
            get(account::handle_login_form).post(account::handle_login),
        )
        .route("/logout", get(account::handle_logout))
        .route(
            "/register",
            get(account::handle_register_form).post(account::handle_register),
        )
        .route(
            "/createlisting",
            get(listing::handle_create_listing_form).post(listing::handle_create_listing),
        )
        .route(
            "/listing/:id",
            get(listing::handle_get_listing).post(listing::handle_post_listing),
        )
        .route("/listing/:id/bids", get(listing::handle_get_bid_history))
        .route(
            "/watchlist",
            get(watchlist::handle_get_watchlist).post(watchlist::handle_post_watchlist),
        )
        .route("/closelisting", post(listing::handle_close_listing))
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
