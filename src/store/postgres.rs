// region:    --- Imports
use super::queries;
use super::{AuctionStore, StoreError};
use crate::auction::model::{Auction, Bid, Comment, NewAuction, NewUser, User};
use crate::database::DatabaseManager;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info};
// endregion: --- Imports

// region:    --- Postgres Store
/// PostgreSQL 저장소 구현체
pub struct PostgresStore {
    db_manager: Arc<DatabaseManager>,
}

impl PostgresStore {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl AuctionStore for PostgresStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        info!("{:<12} --> 사용자 생성: {}", "Store", user.username);
        sqlx::query_as::<_, User>(queries::INSERT_USER)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(Utc::now())
            .fetch_one(self.db_manager.pool())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::UsernameTaken
                } else {
                    StoreError::Database(e)
                }
            })
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(sqlx::query_as::<_, User>(queries::GET_USER_BY_USERNAME)
            .bind(username)
            .fetch_optional(self.db_manager.pool())
            .await?)
    }

    async fn create_session(
        &self,
        token: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query(queries::INSERT_SESSION)
            .bind(token)
            .bind(user_id)
            .bind(Utc::now())
            .bind(expires_at)
            .execute(self.db_manager.pool())
            .await?;
        Ok(())
    }

    async fn find_session_user(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError> {
        Ok(sqlx::query_as::<_, User>(queries::GET_SESSION_USER)
            .bind(token)
            .bind(now)
            .fetch_optional(self.db_manager.pool())
            .await?)
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        sqlx::query(queries::DELETE_SESSION)
            .bind(token)
            .execute(self.db_manager.pool())
            .await?;
        Ok(())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query(queries::DELETE_EXPIRED_SESSIONS)
            .bind(now)
            .execute(self.db_manager.pool())
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_auctions(&self) -> Result<Vec<Auction>, StoreError> {
        Ok(sqlx::query_as::<_, Auction>(queries::GET_ALL_AUCTIONS)
            .fetch_all(self.db_manager.pool())
            .await?)
    }

    async fn get_auction(&self, id: i64) -> Result<Option<Auction>, StoreError> {
        Ok(sqlx::query_as::<_, Auction>(queries::GET_AUCTION)
            .bind(id)
            .fetch_optional(self.db_manager.pool())
            .await?)
    }

    async fn create_auction(
        &self,
        owner_id: i64,
        auction: NewAuction,
    ) -> Result<Auction, StoreError> {
        Ok(sqlx::query_as::<_, Auction>(queries::INSERT_AUCTION)
            .bind(owner_id)
            .bind(&auction.title)
            .bind(&auction.description)
            .bind(&auction.image_url)
            .bind(auction.price)
            .bind(Utc::now())
            .bind(auction.end_date)
            .fetch_one(self.db_manager.pool())
            .await?)
    }

    async fn close_auction(&self, id: i64) -> Result<Option<Auction>, StoreError> {
        Ok(sqlx::query_as::<_, Auction>(queries::CLOSE_AUCTION)
            .bind(id)
            .fetch_optional(self.db_manager.pool())
            .await?)
    }

    async fn close_if_expired(&self, id: i64, today: NaiveDate) -> Result<bool, StoreError> {
        let result = sqlx::query(queries::CLOSE_IF_EXPIRED)
            .bind(id)
            .bind(today)
            .execute(self.db_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn close_expired(&self, today: NaiveDate) -> Result<u64, StoreError> {
        let result = sqlx::query(queries::CLOSE_ALL_EXPIRED)
            .bind(today)
            .execute(self.db_manager.pool())
            .await?;
        Ok(result.rows_affected())
    }

    async fn apply_bid(
        &self,
        auction_id: i64,
        bidder: &User,
        amount: i64,
        expected_highest: i64,
    ) -> Result<Option<Bid>, StoreError> {
        let user_id = bidder.id;
        let username = bidder.username.clone();

        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    // 최고가가 그대로일 때만 교체
                    let updated = sqlx::query(queries::COMPARE_AND_SET_HIGHEST_BID)
                        .bind(amount)
                        .bind(&username)
                        .bind(auction_id)
                        .bind(expected_highest)
                        .execute(&mut **tx)
                        .await?;

                    if updated.rows_affected() == 0 {
                        debug!(
                            "{:<12} --> 최고가 변경 감지: auction={}, expected={}",
                            "Store", auction_id, expected_highest
                        );
                        return Ok(None);
                    }

                    let created_at = Utc::now();
                    let id = sqlx::query_scalar::<_, i64>(queries::INSERT_BID)
                        .bind(auction_id)
                        .bind(user_id)
                        .bind(amount)
                        .bind(created_at)
                        .fetch_one(&mut **tx)
                        .await?;

                    Ok(Some(Bid {
                        id,
                        auction_id,
                        user_id,
                        bidder: username,
                        amount,
                        created_at,
                    }))
                })
            })
            .await
    }

    async fn list_bids(&self, auction_id: i64) -> Result<Vec<Bid>, StoreError> {
        Ok(sqlx::query_as::<_, Bid>(queries::GET_BID_HISTORY)
            .bind(auction_id)
            .fetch_all(self.db_manager.pool())
            .await?)
    }

    async fn add_comment(
        &self,
        auction_id: i64,
        author: &User,
        body: &str,
    ) -> Result<Comment, StoreError> {
        let created_at = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(queries::INSERT_COMMENT)
            .bind(auction_id)
            .bind(author.id)
            .bind(body)
            .bind(created_at)
            .fetch_one(self.db_manager.pool())
            .await?;

        Ok(Comment {
            id,
            auction_id,
            user_id: author.id,
            author: author.username.clone(),
            body: body.to_string(),
            created_at,
        })
    }

    async fn list_comments(&self, auction_id: i64) -> Result<Vec<Comment>, StoreError> {
        Ok(sqlx::query_as::<_, Comment>(queries::GET_COMMENTS)
            .bind(auction_id)
            .fetch_all(self.db_manager.pool())
            .await?)
    }

    async fn add_to_watchlist(&self, user_id: i64, auction_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(queries::INSERT_WATCH)
            .bind(user_id)
            .bind(auction_id)
            .bind(Utc::now())
            .execute(self.db_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_from_watchlist(
        &self,
        user_id: i64,
        auction_id: i64,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(queries::DELETE_WATCH)
            .bind(user_id)
            .bind(auction_id)
            .execute(self.db_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn is_watching(&self, user_id: i64, auction_id: i64) -> Result<bool, StoreError> {
        Ok(sqlx::query_scalar::<_, bool>(queries::IS_WATCHING)
            .bind(user_id)
            .bind(auction_id)
            .fetch_one(self.db_manager.pool())
            .await?)
    }

    async fn watched_auctions(&self, user_id: i64) -> Result<Vec<Auction>, StoreError> {
        Ok(sqlx::query_as::<_, Auction>(queries::GET_WATCHED_AUCTIONS)
            .bind(user_id)
            .fetch_all(self.db_manager.pool())
            .await?)
    }
}
// endregion: --- Postgres Store
