use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// region:    --- Auction Status
/// 경매 상태
/// Open -> Closed 로만 전이된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionStatus {
    Open,
    Closed,
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Open => "Open",
            AuctionStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("알 수 없는 경매 상태: {0}")]
pub struct UnknownStatus(pub String);

impl TryFrom<String> for AuctionStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Open" => Ok(AuctionStatus::Open),
            "Closed" => Ok(AuctionStatus::Closed),
            _ => Err(UnknownStatus(value)),
        }
    }
}
// endregion: --- Auction Status

// region:    --- Models
// 사용자 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// 경매(상품) 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Auction {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// 최저 입찰가(reserve price)
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub end_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: AuctionStatus,
    pub highest_bid: i64,
    pub highest_bidder: Option<String>,
}

impl Auction {
    pub fn is_open(&self) -> bool {
        self.status == AuctionStatus::Open
    }
}

// 입찰 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub auction_id: i64,
    pub user_id: i64,
    pub bidder: String,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

// 댓글 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub auction_id: i64,
    pub user_id: i64,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// 관심 목록 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WatchlistEntry {
    pub user_id: i64,
    pub auction_id: i64,
    pub created_at: DateTime<Utc>,
}
// endregion: --- Models

// region:    --- Inputs
/// 신규 사용자 (비밀번호는 해시된 상태)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// 검증을 통과한 신규 경매
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuction {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price: i64,
    pub end_date: NaiveDate,
}
// endregion: --- Inputs
