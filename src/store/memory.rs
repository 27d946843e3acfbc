//! 메모리 저장소
//!
//! 테스트용. 하나의 뮤텍스 안에서 모든 연산을 처리하므로 각 연산은 원자적이다.
// region:    --- Imports
use super::{AuctionStore, StoreError};
use crate::auction::model::{
    Auction, AuctionStatus, Bid, Comment, NewAuction, NewUser, User, WatchlistEntry,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
// endregion: --- Imports

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    sessions: HashMap<String, (i64, DateTime<Utc>)>,
    auctions: Vec<Auction>,
    bids: Vec<Bid>,
    comments: Vec<Comment>,
    watchlist: Vec<WatchlistEntry>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn auction_mut(&mut self, id: i64) -> Option<&mut Auction> {
        self.auctions.iter_mut().find(|a| a.id == id)
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 검증을 거치지 않고 경매를 직접 넣는다. 종료일이 지난 경매 등 테스트 준비용
    pub async fn insert_auction_unchecked(&self, owner_id: i64, auction: NewAuction) -> Auction {
        let mut tables = self.tables.lock().await;
        let auction = Auction {
            id: tables.next_id(),
            owner_id,
            title: auction.title,
            description: auction.description,
            image_url: auction.image_url,
            price: auction.price,
            created_at: Utc::now(),
            end_date: auction.end_date,
            status: AuctionStatus::Open,
            highest_bid: 0,
            highest_bidder: None,
        };
        tables.auctions.push(auction.clone());
        auction
    }
}

#[async_trait]
impl AuctionStore for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UsernameTaken);
        }
        let user = User {
            id: tables.next_id(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_session(
        &self,
        token: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables.sessions.insert(token.to_string(), (user_id, expires_at));
        Ok(())
    }

    async fn find_session_user(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        let user = match tables.sessions.get(token) {
            Some((user_id, expires_at)) if *expires_at > now => {
                tables.users.iter().find(|u| u.id == *user_id).cloned()
            }
            _ => None,
        };
        Ok(user)
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.tables.lock().await.sessions.remove(token);
        Ok(())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, (_, expires_at)| *expires_at > now);
        Ok((before - tables.sessions.len()) as u64)
    }

    async fn list_auctions(&self) -> Result<Vec<Auction>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.auctions.iter().rev().cloned().collect())
    }

    async fn get_auction(&self, id: i64) -> Result<Option<Auction>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.auctions.iter().find(|a| a.id == id).cloned())
    }

    async fn create_auction(
        &self,
        owner_id: i64,
        auction: NewAuction,
    ) -> Result<Auction, StoreError> {
        Ok(self.insert_auction_unchecked(owner_id, auction).await)
    }

    async fn close_auction(&self, id: i64) -> Result<Option<Auction>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.auction_mut(id).map(|auction| {
            auction.status = AuctionStatus::Closed;
            auction.clone()
        }))
    }

    async fn close_if_expired(&self, id: i64, today: NaiveDate) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        match tables.auction_mut(id) {
            Some(auction) if auction.is_open() && auction.end_date < today => {
                auction.status = AuctionStatus::Closed;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn close_expired(&self, today: NaiveDate) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        let mut closed = 0;
        for auction in tables
            .auctions
            .iter_mut()
            .filter(|a| a.is_open() && a.end_date < today)
        {
            auction.status = AuctionStatus::Closed;
            closed += 1;
        }
        Ok(closed)
    }

    async fn apply_bid(
        &self,
        auction_id: i64,
        bidder: &User,
        amount: i64,
        expected_highest: i64,
    ) -> Result<Option<Bid>, StoreError> {
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        let Some(auction) = tables.auction_mut(auction_id) else {
            return Ok(None);
        };
        if !auction.is_open() || auction.highest_bid != expected_highest {
            return Ok(None);
        }
        auction.highest_bid = amount;
        auction.highest_bidder = Some(bidder.username.clone());

        let bid = Bid {
            id,
            auction_id,
            user_id: bidder.id,
            bidder: bidder.username.clone(),
            amount,
            created_at: Utc::now(),
        };
        tables.bids.push(bid.clone());
        Ok(Some(bid))
    }

    async fn list_bids(&self, auction_id: i64) -> Result<Vec<Bid>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .bids
            .iter()
            .rev()
            .filter(|b| b.auction_id == auction_id)
            .cloned()
            .collect())
    }

    async fn add_comment(
        &self,
        auction_id: i64,
        author: &User,
        body: &str,
    ) -> Result<Comment, StoreError> {
        let mut tables = self.tables.lock().await;
        let comment = Comment {
            id: tables.next_id(),
            auction_id,
            user_id: author.id,
            author: author.username.clone(),
            body: body.to_string(),
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, auction_id: i64) -> Result<Vec<Comment>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.auction_id == auction_id)
            .cloned()
            .collect())
    }

    async fn add_to_watchlist(&self, user_id: i64, auction_id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables
            .watchlist
            .iter()
            .any(|w| w.user_id == user_id && w.auction_id == auction_id)
        {
            return Ok(false);
        }
        tables.watchlist.push(WatchlistEntry {
            user_id,
            auction_id,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn remove_from_watchlist(
        &self,
        user_id: i64,
        auction_id: i64,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        let before = tables.watchlist.len();
        tables
            .watchlist
            .retain(|w| !(w.user_id == user_id && w.auction_id == auction_id));
        Ok(tables.watchlist.len() < before)
    }

    async fn is_watching(&self, user_id: i64, auction_id: i64) -> Result<bool, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .watchlist
            .iter()
            .any(|w| w.user_id == user_id && w.auction_id == auction_id))
    }

    async fn watched_auctions(&self, user_id: i64) -> Result<Vec<Auction>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .watchlist
            .iter()
            .rev()
            .filter(|w| w.user_id == user_id)
            .filter_map(|w| tables.auctions.iter().find(|a| a.id == w.auction_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            email: String::new(),
            password_hash: "hash".to_string(),
        }
    }

    fn lamp(end_date: NaiveDate) -> NewAuction {
        NewAuction {
            title: "Desk lamp".to_string(),
            description: "Brass".to_string(),
            image_url: "https://example.com/lamp.png".to_string(),
            price: 100,
            end_date,
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = InMemoryStore::new();
        store.create_user(new_user("alice")).await.unwrap();
        let err = store.create_user(new_user("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken));
    }

    #[tokio::test]
    async fn compare_and_set_rejects_stale_baseline() {
        let store = InMemoryStore::new();
        let alice = store.create_user(new_user("alice")).await.unwrap();
        let bob = store.create_user(new_user("bob")).await.unwrap();
        let end = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let auction = store.create_auction(alice.id, lamp(end)).await.unwrap();

        let first = store.apply_bid(auction.id, &bob, 120, 0).await.unwrap();
        assert!(first.is_some());
        // 이전 최고가(0) 기준으로 다시 시도하면 실패
        let stale = store.apply_bid(auction.id, &alice, 110, 0).await.unwrap();
        assert!(stale.is_none());

        let auction = store.get_auction(auction.id).await.unwrap().unwrap();
        assert_eq!(auction.highest_bid, 120);
        assert_eq!(auction.highest_bidder.as_deref(), Some("bob"));
        assert_eq!(store.list_bids(auction.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn close_if_expired_fires_once() {
        let store = InMemoryStore::new();
        let end = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let auction = store.create_auction(1, lamp(end)).await.unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();

        assert!(store.close_if_expired(auction.id, today).await.unwrap());
        assert!(!store.close_if_expired(auction.id, today).await.unwrap());
        let auction = store.get_auction(auction.id).await.unwrap().unwrap();
        assert_eq!(auction.status, AuctionStatus::Closed);
    }

    #[tokio::test]
    async fn expired_sessions_are_ignored() {
        let store = InMemoryStore::new();
        let alice = store.create_user(new_user("alice")).await.unwrap();
        let now = Utc::now();
        store
            .create_session("old", alice.id, now - chrono::Duration::hours(1))
            .await
            .unwrap();
        assert!(store.find_session_user("old", now).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_sessions_are_purged() {
        let store = InMemoryStore::new();
        let alice = store.create_user(new_user("alice")).await.unwrap();
        let now = Utc::now();
        store
            .create_session("old", alice.id, now - chrono::Duration::hours(1))
            .await
            .unwrap();
        store
            .create_session("fresh", alice.id, now + chrono::Duration::hours(1))
            .await
            .unwrap();

        assert_eq!(store.delete_expired_sessions(now).await.unwrap(), 1);
        assert_eq!(store.delete_expired_sessions(now).await.unwrap(), 0);
        assert!(store.find_session_user("fresh", now).await.unwrap().is_some());
    }
}
