/// 경매 도메인 규칙
/// 1. 입찰 수락 여부
/// 2. 종료일 경과 여부
// region:    --- Imports
use crate::auction::model::{Auction, AuctionStatus};
use chrono::NaiveDate;
// endregion: --- Imports

// region:    --- Rules
/// 입찰 판정 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidDecision {
    Accept,
    /// 최저 입찰가 미만
    BelowReserve,
    /// 현재 최고가 이하
    NotAboveHighest,
    Closed,
}

/// 1. 입찰 수락 여부
/// amount >= price 이고 amount > highest_bid 일 때만 수락
pub fn judge_bid(auction: &Auction, amount: i64) -> BidDecision {
    if auction.status == AuctionStatus::Closed {
        return BidDecision::Closed;
    }
    if amount < auction.price {
        return BidDecision::BelowReserve;
    }
    if amount <= auction.highest_bid {
        return BidDecision::NotAboveHighest;
    }
    BidDecision::Accept
}

/// 2. 종료일 경과 여부 (종료일 당일은 아직 열려 있음)
pub fn is_expired(auction: &Auction, today: NaiveDate) -> bool {
    auction.status == AuctionStatus::Open && auction.end_date < today
}
// endregion: --- Rules
