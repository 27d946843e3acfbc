// region:    --- Imports
use auction_site::config::AppConfig;
use auction_site::database::DatabaseManager;
use auction_site::routes::build_router;
use auction_site::scheduler::AuctionScheduler;
use auction_site::state::AppState;
use auction_site::store::{AuctionStore, PostgresStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .without_time()
        .with_target(false)
        .init();

    // 설정 로드
    let config = AppConfig::load()?;

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new(&config.database).await?);

    // 데이터베이스 초기화
    if let Err(e) = db_manager
        .initialize_database(config.database.recreate)
        .await
    {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    let store: Arc<dyn AuctionStore> = Arc::new(PostgresStore::new(db_manager));

    // 만료 경매 / 세션 정리 스케줄러 (주기가 0 이면 끔)
    if config.scheduler.interval_secs > 0 {
        let period = Duration::from_secs(config.scheduler.interval_secs);
        AuctionScheduler::new(Arc::clone(&store), period).start();
        info!("{:<12} --> 스케줄러 시작: {}초 주기", "Main", config.scheduler.interval_secs);
    }

    let listen_addr = config.listen_addr();
    let routes_all = build_router(AppState::new(store, config));

    // 리스너 생성
    let listener = TcpListener::bind(&listen_addr).await?;
    info!("{:<12} --> Web Server: Listening on {}", "Main", listener.local_addr()?);

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
