/// 경매 관련 커맨드 처리
/// 1. 경매 등록
/// 2. 입찰
/// 3. 댓글
/// 4. 경매 종료
/// 5. 관심 목록 추가/삭제
// region:    --- Imports
use crate::auction::model::{Auction, Bid, Comment, NewAuction, User};
use crate::auction::rules::{self, BidDecision};
use crate::error::AppError;
use crate::forms::WatchAction;
use crate::query::handlers::{expire_if_due, load_auction};
use crate::store::AuctionStore;
use chrono::NaiveDate;
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Clone)]
pub struct PlaceBidCommand {
    pub auction_id: i64,
    pub amount: i64,
}

// 최대 재시도 횟수
const MAX_RETRIES: i32 = 100;

/// 1. 경매 등록
pub async fn handle_create_listing(
    store: &dyn AuctionStore,
    owner: &User,
    auction: NewAuction,
) -> Result<Auction, AppError> {
    info!("{:<12} --> 경매 등록: owner={}, title={}", "Command", owner.username, auction.title);
    Ok(store.create_auction(owner.id, auction).await?)
}

/// 2. 입찰
/// 최고가를 읽고 비교한 뒤 compare-and-set 으로 반영한다.
/// 다른 입찰이 먼저 반영되었으면 새 최고가로 다시 검증한다.
pub async fn handle_place_bid(
    store: &dyn AuctionStore,
    bidder: &User,
    cmd: PlaceBidCommand,
    today: NaiveDate,
) -> Result<(Auction, Bid), AppError> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);
    expire_if_due(store, cmd.auction_id, today).await?;

    let mut retries = 0;
    while retries < MAX_RETRIES {
        let auction = load_auction(store, cmd.auction_id).await?;

        match rules::judge_bid(&auction, cmd.amount) {
            BidDecision::Closed => return Err(AppError::AuctionClosed),
            BidDecision::BelowReserve | BidDecision::NotAboveHighest => {
                info!(
                    "{:<12} --> 입찰 거부: amount={}, price={}, highest={}",
                    "Command", cmd.amount, auction.price, auction.highest_bid
                );
                return Err(AppError::LowBid { amount: cmd.amount });
            }
            BidDecision::Accept => {}
        }

        match store
            .apply_bid(cmd.auction_id, bidder, cmd.amount, auction.highest_bid)
            .await?
        {
            Some(bid) => {
                info!(
                    "{:<12} --> 입찰 성공: auction={}, bidder={}, amount={}",
                    "Command", cmd.auction_id, bidder.username, cmd.amount
                );
                let auction = load_auction(store, cmd.auction_id).await?;
                return Ok((auction, bid));
            }
            None => {
                warn!("{:<12} --> 최고가 변경으로 인한 충돌: 재시도", "Command");
                retries += 1;
            }
        }
    }

    Err(AppError::MaxRetriesExceeded)
}

/// 3. 댓글
pub async fn handle_post_comment(
    store: &dyn AuctionStore,
    author: &User,
    auction_id: i64,
    body: &str,
) -> Result<Comment, AppError> {
    load_auction(store, auction_id).await?;
    let comment = store.add_comment(auction_id, author, body).await?;
    info!("{:<12} --> 댓글 등록: auction={}, author={}", "Command", auction_id, author.username);
    Ok(comment)
}

/// 4. 경매 종료 (등록자만 가능)
pub async fn handle_close_listing(
    store: &dyn AuctionStore,
    caller: &User,
    auction_id: i64,
) -> Result<Auction, AppError> {
    let auction = load_auction(store, auction_id).await?;
    if auction.owner_id != caller.id {
        warn!(
            "{:<12} --> 등록자가 아닌 사용자의 종료 시도: auction={}, caller={}",
            "Command", auction_id, caller.username
        );
        return Err(AppError::PermissionDenied);
    }

    let auction = store
        .close_auction(auction_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Listing {auction_id} not found")))?;
    info!("{:<12} --> 경매 종료: auction={}", "Command", auction_id);
    Ok(auction)
}

/// 5. 관심 목록 추가/삭제
pub async fn handle_watchlist(
    store: &dyn AuctionStore,
    user: &User,
    auction_id: i64,
    action: WatchAction,
) -> Result<(), AppError> {
    load_auction(store, auction_id).await?;
    let changed = match action {
        WatchAction::AddToWatchlist => store.add_to_watchlist(user.id, auction_id).await?,
        WatchAction::RemoveFromWatchlist => {
            store.remove_from_watchlist(user.id, auction_id).await?
        }
    };
    info!("{:<12} --> 관심 목록 {:?}: auction={}, changed={}", "Command", action, auction_id, changed);
    Ok(())
}
// endregion: --- Commands

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::model::{AuctionStatus, NewUser};
    use crate::store::InMemoryStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    async fn seed(store: &InMemoryStore) -> (User, User, Auction) {
        let mut users = Vec::new();
        for name in ["seller", "bidder"] {
            users.push(
                store
                    .create_user(NewUser {
                        username: name.to_string(),
                        email: String::new(),
                        password_hash: "x".to_string(),
                    })
                    .await
                    .unwrap(),
            );
        }
        let bidder = users.pop().unwrap();
        let seller = users.pop().unwrap();
        let auction = store
            .create_auction(
                seller.id,
                NewAuction {
                    title: "Bicycle".to_string(),
                    description: "Red".to_string(),
                    image_url: "https://example.com/bike.png".to_string(),
                    price: 100,
                    end_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
                },
            )
            .await
            .unwrap();
        (seller, bidder, auction)
    }

    fn bid(auction_id: i64, amount: i64) -> PlaceBidCommand {
        PlaceBidCommand { auction_id, amount }
    }

    #[tokio::test]
    async fn reserve_and_highest_bid_scenario() {
        let store = InMemoryStore::new();
        let (_seller, bidder, auction) = seed(&store).await;

        let err = handle_place_bid(&store, &bidder, bid(auction.id, 80), today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LowBid { amount: 80 }));

        let (updated, _) = handle_place_bid(&store, &bidder, bid(auction.id, 100), today())
            .await
            .unwrap();
        assert_eq!(updated.highest_bid, 100);
        assert_eq!(updated.highest_bidder.as_deref(), Some("bidder"));

        let err = handle_place_bid(&store, &bidder, bid(auction.id, 90), today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LowBid { .. }));
        let current = store.get_auction(auction.id).await.unwrap().unwrap();
        assert_eq!(current.highest_bid, 100);
        assert_eq!(store.list_bids(auction.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bid_on_closed_listing_is_rejected() {
        let store = InMemoryStore::new();
        let (seller, bidder, auction) = seed(&store).await;
        handle_close_listing(&store, &seller, auction.id).await.unwrap();

        let err = handle_place_bid(&store, &bidder, bid(auction.id, 500), today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuctionClosed));
    }

    #[tokio::test]
    async fn bid_after_end_date_closes_listing_first() {
        let store = InMemoryStore::new();
        let (_seller, bidder, auction) = seed(&store).await;
        let later = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();

        let err = handle_place_bid(&store, &bidder, bid(auction.id, 500), later)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuctionClosed));
        let current = store.get_auction(auction.id).await.unwrap().unwrap();
        assert_eq!(current.status, AuctionStatus::Closed);
    }

    #[tokio::test]
    async fn only_owner_can_close() {
        let store = InMemoryStore::new();
        let (seller, bidder, auction) = seed(&store).await;

        let err = handle_close_listing(&store, &bidder, auction.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied));

        let closed = handle_close_listing(&store, &seller, auction.id).await.unwrap();
        assert_eq!(closed.status, AuctionStatus::Closed);
    }

    #[tokio::test]
    async fn unknown_listing_is_not_found() {
        let store = InMemoryStore::new();
        let (_seller, bidder, _auction) = seed(&store).await;
        let err = handle_post_comment(&store, &bidder, 9999, "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn watch_then_unwatch_leaves_nothing() {
        let store = InMemoryStore::new();
        let (_seller, bidder, auction) = seed(&store).await;

        handle_watchlist(&store, &bidder, auction.id, WatchAction::AddToWatchlist)
            .await
            .unwrap();
        handle_watchlist(&store, &bidder, auction.id, WatchAction::AddToWatchlist)
            .await
            .unwrap();
        assert_eq!(store.watched_auctions(bidder.id).await.unwrap().len(), 1);

        handle_watchlist(&store, &bidder, auction.id, WatchAction::RemoveFromWatchlist)
            .await
            .unwrap();
        assert!(!store.is_watching(bidder.id, auction.id).await.unwrap());
        assert!(store.watched_auctions(bidder.id).await.unwrap().is_empty());
    }
}
