/// 만료 경매 / 세션 정리 스케줄러
/// 경매는 상세 조회 시에도 같은 규칙으로 종료되므로, 조회가 없는 경매를 위한 보조 수단이다.
/// 만료 세션은 여기서만 삭제된다.
// region:    --- Imports
use crate::store::{AuctionStore, StoreError};
use chrono::Utc;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info};

// endregion: --- Imports

// region:    --- Auction Scheduler
pub struct AuctionScheduler {
    store: Arc<dyn AuctionStore>,
    period: Duration,
}

impl AuctionScheduler {
    pub fn new(store: Arc<dyn AuctionStore>, period: Duration) -> Self {
        Self { store, period }
    }

    /// 스케줄러 시작
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = interval(self.period);
            loop {
                interval.tick().await;
                Self::sweep(self.store.as_ref()).await;
            }
        })
    }

    /// 한 주기 작업. 한쪽이 실패해도 다른 쪽은 수행한다.
    pub async fn sweep(store: &dyn AuctionStore) {
        if let Err(e) = Self::close_expired_auctions(store).await {
            error!("{:<12} --> 경매 상태 업데이트 중 오류 발생: {:?}", "Scheduler", e);
        }
        if let Err(e) = Self::purge_expired_sessions(store).await {
            error!("{:<12} --> 세션 정리 중 오류 발생: {:?}", "Scheduler", e);
        }
    }

    /// 종료일이 지난 경매 종료
    pub async fn close_expired_auctions(store: &dyn AuctionStore) -> Result<u64, StoreError> {
        let today = Utc::now().date_naive();
        let closed = store.close_expired(today).await?;
        if closed > 0 {
            info!("{:<12} --> 만료 경매 {}건 종료", "Scheduler", closed);
        } else {
            debug!("{:<12} --> 만료 경매 없음", "Scheduler");
        }
        Ok(closed)
    }

    /// 만료된 세션 삭제
    pub async fn purge_expired_sessions(store: &dyn AuctionStore) -> Result<u64, StoreError> {
        let purged = store.delete_expired_sessions(Utc::now()).await?;
        if purged > 0 {
            info!("{:<12} --> 만료 세션 {}건 삭제", "Scheduler", purged);
        }
        Ok(purged)
    }
}
// endregion: --- Auction Scheduler
