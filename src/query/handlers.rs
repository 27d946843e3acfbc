// region:    --- Imports
use crate::auction::model::{Auction, Bid, Comment, User};
use crate::error::AppError;
use crate::store::AuctionStore;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
// endregion: --- Imports

// region:    --- Views
/// 경매 상세 화면
#[derive(Debug, Serialize)]
pub struct ListingView {
    pub listing: Auction,
    pub comments: Vec<Comment>,
    /// 로그인한 경우에만 포함
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watching: Option<bool>,
}
// endregion: --- Views

// region:    --- Query Handlers

/// 경매 조회 (없으면 NotFound)
pub async fn load_auction(store: &dyn AuctionStore, auction_id: i64) -> Result<Auction, AppError> {
    store
        .get_auction(auction_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Listing {auction_id} not found")))
}

/// 종료일이 지났으면 종료 처리
pub async fn expire_if_due(
    store: &dyn AuctionStore,
    auction_id: i64,
    today: NaiveDate,
) -> Result<(), AppError> {
    if store.close_if_expired(auction_id, today).await? {
        info!("{:<12} --> 종료일 경과로 경매 종료: id={}", "Query", auction_id);
    }
    Ok(())
}

/// 모든 경매 조회
pub async fn list_auctions(store: &dyn AuctionStore) -> Result<Vec<Auction>, AppError> {
    info!("{:<12} --> 모든 경매 조회", "Query");
    Ok(store.list_auctions().await?)
}

/// 경매 상세 조회
/// 조회 시점에 종료일이 지났으면 먼저 종료시킨다.
pub async fn view_listing(
    store: &dyn AuctionStore,
    auction_id: i64,
    viewer: Option<&User>,
    today: NaiveDate,
) -> Result<ListingView, AppError> {
    info!("{:<12} --> 경매 상세 조회 id: {}", "Query", auction_id);
    expire_if_due(store, auction_id, today).await?;

    let listing = load_auction(store, auction_id).await?;
    let comments = store.list_comments(auction_id).await?;
    let watching = match viewer {
        Some(user) => Some(store.is_watching(user.id, auction_id).await?),
        None => None,
    };

    Ok(ListingView {
        listing,
        comments,
        watching,
    })
}

/// 입찰 이력 조회
pub async fn bid_history(store: &dyn AuctionStore, auction_id: i64) -> Result<Vec<Bid>, AppError> {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "Query", auction_id);
    load_auction(store, auction_id).await?;
    Ok(store.list_bids(auction_id).await?)
}

/// 관심 경매 조회
pub async fn watched_auctions(
    store: &dyn AuctionStore,
    user: &User,
) -> Result<Vec<Auction>, AppError> {
    info!("{:<12} --> 관심 경매 조회 user: {}", "Query", user.username);
    Ok(store.watched_auctions(user.id).await?)
}

// endregion: --- Query Handlers

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::model::{AuctionStatus, NewAuction, NewUser};
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn viewing_expired_listing_closes_it_idempotently() {
        let store = InMemoryStore::new();
        let seller = store
            .create_user(NewUser {
                username: "seller".into(),
                email: String::new(),
                password_hash: "x".into(),
            })
            .await
            .unwrap();
        let auction = store
            .insert_auction_unchecked(
                seller.id,
                NewAuction {
                    title: "Old radio".into(),
                    description: "Crackles".into(),
                    image_url: "https://example.com/radio.png".into(),
                    price: 10,
                    end_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
                },
            )
            .await;
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();

        for _ in 0..3 {
            let view = view_listing(&store, auction.id, Some(&seller), today)
                .await
                .unwrap();
            assert_eq!(view.listing.status, AuctionStatus::Closed);
            assert_eq!(view.watching, Some(false));
        }
    }

    #[tokio::test]
    async fn anonymous_view_has_no_watch_flag() {
        let store = InMemoryStore::new();
        let auction = store
            .create_auction(
                1,
                NewAuction {
                    title: "Chair".into(),
                    description: "Oak".into(),
                    image_url: "https://example.com/chair.png".into(),
                    price: 10,
                    end_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
                },
            )
            .await
            .unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let view = view_listing(&store, auction.id, None, today).await.unwrap();
        assert!(view.watching.is_none());
        assert_eq!(view.listing.status, AuctionStatus::Open);
    }
}
