// region:    --- Imports
use auction_house::app::{self, AppState};
use auction_house::config::Config;
use auction_house::database::DatabaseManager;
use auction_house::scheduler::SessionSweeper;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 설정 로드
    let config = Config::from_env()?;

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new(&config).await?);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database(config.reset_database).await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 만료 세션 정리
    let sweeper = SessionSweeper::new(db_manager.get_pool(), config.session_sweep_secs);
    sweeper.start();

    // 라우터 설정
    let address = config.server_address();
    let routes_all = app::router(AppState::new(db_manager, config));

    // 리스너 생성
    let listener = TcpListener::bind(&address).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    info!("{:<12} --> Web Server: 종료", "Main");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("{:<12} --> 종료 시그널 대기 실패: {}", "Main", e);
    }
}
// endregion: --- Main
