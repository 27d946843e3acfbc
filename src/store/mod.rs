// region:    --- Imports
use crate::auction::model::{Auction, Bid, Comment, NewAuction, NewUser, User};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
// endregion: --- Imports

// region:    --- Modules
pub mod memory;
pub mod postgres;
mod queries;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
// endregion: --- Modules

// region:    --- Store Error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username already taken")]
    UsernameTaken,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
// endregion: --- Store Error

// region:    --- Auction Store Trait
/// 경매 저장소 트레이트
/// 모든 상태 변경은 여기서 원자적으로 처리된다.
#[async_trait]
pub trait AuctionStore: Send + Sync {
    // --- 사용자 / 세션
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn create_session(
        &self,
        token: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
    /// 만료되지 않은 세션의 사용자
    async fn find_session_user(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError>;
    async fn delete_session(&self, token: &str) -> Result<(), StoreError>;
    /// 만료된 세션 삭제. 삭제된 개수 반환
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;

    // --- 경매
    /// 최신순
    async fn list_auctions(&self) -> Result<Vec<Auction>, StoreError>;
    async fn get_auction(&self, id: i64) -> Result<Option<Auction>, StoreError>;
    async fn create_auction(&self, owner_id: i64, auction: NewAuction)
        -> Result<Auction, StoreError>;
    async fn close_auction(&self, id: i64) -> Result<Option<Auction>, StoreError>;
    /// Open 이고 end_date < today 인 경우에만 Closed 로 변경. 변경 여부 반환
    async fn close_if_expired(&self, id: i64, today: NaiveDate) -> Result<bool, StoreError>;
    /// 만료된 모든 경매 종료. 종료된 개수 반환
    async fn close_expired(&self, today: NaiveDate) -> Result<u64, StoreError>;

    // --- 입찰
    /// 비교 후 교체(compare-and-set)
    /// 저장된 highest_bid 가 expected_highest 와 같고 Open 일 때만 반영하며, 아니면 None
    async fn apply_bid(
        &self,
        auction_id: i64,
        bidder: &User,
        amount: i64,
        expected_highest: i64,
    ) -> Result<Option<Bid>, StoreError>;
    /// 최신순
    async fn list_bids(&self, auction_id: i64) -> Result<Vec<Bid>, StoreError>;

    // --- 댓글
    async fn add_comment(
        &self,
        auction_id: i64,
        author: &User,
        body: &str,
    ) -> Result<Comment, StoreError>;
    /// 작성순
    async fn list_comments(&self, auction_id: i64) -> Result<Vec<Comment>, StoreError>;

    // --- 관심 목록
    /// 새로 추가된 경우 true
    async fn add_to_watchlist(&self, user_id: i64, auction_id: i64) -> Result<bool, StoreError>;
    /// 실제로 삭제된 경우 true
    async fn remove_from_watchlist(&self, user_id: i64, auction_id: i64)
        -> Result<bool, StoreError>;
    async fn is_watching(&self, user_id: i64, auction_id: i64) -> Result<bool, StoreError>;
    async fn watched_auctions(&self, user_id: i64) -> Result<Vec<Auction>, StoreError>;
}
// endregion: --- Auction Store Trait
